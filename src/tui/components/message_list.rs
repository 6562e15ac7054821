//! # MessageList Component
//!
//! Scrollable view of the chat transcript.
//!
//! ## Responsibilities
//!
//! - Display every message in the transcript, oldest first
//! - Keep the newest message in view whenever the transcript changes
//! - Let the user scroll back without being yanked down until something new arrives
//! - Cache message heights per (revision, width)
//!
//! `MessageList` is transient (created each frame) and wraps
//! `&'a mut MessageListState` (persistent) plus the `Transcript` (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Scroll and layout state for the message list.
/// Lives in the parent TuiState across frames.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, the view follows the newest message.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Transcript revision seen at the last render.
    seen_revision: Option<u64>,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            seen_revision: None,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never runs past the last message.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage follow mode once the user scrolls back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Any change to the transcript brings the newest message back into view.
    fn observe_revision(&mut self, revision: u64) {
        if self.seen_revision != Some(revision) {
            self.seen_revision = Some(revision);
            self.stick_to_bottom = true;
        }
    }
}

/// Scrollable transcript view.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    /// Index of the analyzing placeholder, if one is showing
    pub placeholder_index: Option<usize>,
    pub pulse_value: f32,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        placeholder_index: Option<usize>,
        pulse_value: f32,
    ) -> Self {
        Self {
            state,
            transcript,
            placeholder_index,
            pulse_value,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column
        let revision = self.transcript.revision();

        self.state.observe_revision(revision);
        self.state
            .layout
            .refresh(self.transcript, revision, content_width);

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let layout = &self.state.layout;
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, layout.total_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = layout.top_of(visible_range.start);
        for (i, message) in self
            .transcript
            .messages()
            .enumerate()
            .skip(visible_range.start)
            .take(visible_range.len())
        {
            let height = layout.heights[i];
            let is_placeholder = self.placeholder_index == Some(i);
            let pulse = if is_placeholder { self.pulse_value } else { 0.0 };

            scroll_view.render_widget(
                Message::new(message, is_placeholder, pulse),
                Rect::new(0, y_offset, content_width, height),
            );
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state: scrolling has to survive the per-frame
/// recreation of `MessageList`.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached message heights.
///
/// Messages can disappear (the placeholder), so the cache is rebuilt whole
/// whenever the transcript revision or the width changes.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    key: Option<(u64, u16)>,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            key: None,
        }
    }

    pub fn refresh(&mut self, transcript: &Transcript, revision: u64, content_width: u16) {
        if self.key == Some((revision, content_width)) {
            return;
        }
        self.heights = transcript
            .messages()
            .map(|message| Message::calculate_height(message, content_width))
            .collect();
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
        self.key = Some((revision, content_width));
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas row where message `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or(0),
        }
    }

    /// Messages intersecting the viewport, with half a screen of slack on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
