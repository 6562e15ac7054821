//! # InputBox Component
//!
//! The chat input field.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newlines)
//! - Edit in place (backspace, delete, left/right/home/end)
//! - Emit `Submit` on Enter with non-blank text, then clear itself
//!
//! The buffer is internal state. `busy` is a prop: while an analysis is in
//! flight the parent stops forwarding Enter, and the title says why.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_position,
    inner_width, line_count, next_char_boundary, prev_char_boundary, wrapped_lines,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed). Untrimmed.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    buffer: String,
    /// Cursor as a byte offset into `buffer`.
    cursor: usize,
    /// First visible wrapped line when the content is taller than the box.
    scroll_offset: u16,
    /// An analysis is in flight (Prop)
    pub busy: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            busy: false,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Height needed for the current buffer, clamped to the visible maximum.
    pub fn calculate_height(&self, outer_width: u16) -> u16 {
        let lines = line_count(&self.buffer, inner_width(outer_width));
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn keep_cursor_visible(&mut self, width: u16) {
        let (row, _) = cursor_position(&self.buffer, self.cursor, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    fn title(&self) -> &'static str {
        if self.busy {
            " Message (analyzing...) "
        } else {
            " Message  Enter send · Ctrl+J newline · Ctrl+T trends "
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.keep_cursor_visible(width);

        let visible: Vec<String> = wrapped_lines(&self.buffer, width)
            .into_iter()
            .skip(self.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .collect();

        let border_style = if self.busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title())
            .title_style(border_style.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1));

        let input = Paragraph::new(visible.join("\n"))
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        let (row, col) = cursor_position(&self.buffer, self.cursor, width);
        frame.set_cursor_position((
            area.x + CONTENT_OFFSET_X + col,
            area.y + CONTENT_OFFSET_Y + row.saturating_sub(self.scroll_offset),
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map_or(0, |i| i + 1);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor + i);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit if !self.buffer.trim().is_empty() => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
