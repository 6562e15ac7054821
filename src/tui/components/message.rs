use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{ChatMessage, Sender};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Pulse intensity above which the placeholder border turns BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity above which the placeholder border loses DIM.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

/// One chat bubble.
///
/// Transient: built each frame by `MessageList` with the data it needs.
/// User messages are cyan, bot messages green. The analyzing placeholder is
/// rendered italic and breathes with `pulse_intensity`.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options that match `Paragraph`'s own wrapping, so the list
/// can lay out its scroll canvas without rendering first.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub is_placeholder: bool,
    pub pulse_intensity: f32,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, is_placeholder: bool, pulse_intensity: f32) -> Self {
        Self {
            message,
            is_placeholder,
            pulse_intensity,
        }
    }

    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn role(&self) -> &'static str {
        match self.message.sender {
            Sender::User => "you",
            Sender::Bot => "emotioneye",
        }
    }

    fn style(&self) -> Style {
        if self.is_placeholder {
            return Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC);
        }
        match self.message.sender {
            Sender::User => Style::default().fg(Color::Cyan),
            Sender::Bot => Style::default().fg(Color::Green),
        }
    }

    fn border_style(&self) -> Style {
        let base = self.style().add_modifier(Modifier::DIM);
        if !self.is_placeholder {
            return base;
        }
        // DIM → normal → BOLD
        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            base.remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD)
        } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            base.remove_modifier(Modifier::DIM)
        } else {
            base
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.style();
        let border_style = self.border_style();

        let block = Block::bordered()
            .title(self.role())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
