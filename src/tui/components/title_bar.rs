//! # TitleBar Component
//!
//! Single-line header: product name, service reachability, latest status.
//!
//! Purely presentational. All three props come from `App`:
//!
//! 1. With a status: `"EmotionEye | service: online | Analysis complete"`
//! 2. Without: `"EmotionEye | service: online"`
//!
//! The health label is colored so an offline service stands out.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::ServiceHealth;
use crate::tui::component::Component;

pub struct TitleBar {
    pub service_health: ServiceHealth,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(service_health: ServiceHealth, status_message: String) -> Self {
        Self {
            service_health,
            status_message,
        }
    }

    fn health_style(&self) -> Style {
        let color = match self.service_health {
            ServiceHealth::Unknown => Color::DarkGray,
            ServiceHealth::Healthy => Color::Green,
            ServiceHealth::Unhealthy => Color::Yellow,
            ServiceHealth::Unreachable => Color::Red,
        };
        Style::default().fg(color)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "EmotionEye",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | service: "),
            Span::styled(self.service_health.label(), self.health_style()),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(self.status_message.as_str()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
