//! # StatsPanel Component
//!
//! Side panel with the session counters: how many analyses succeeded and the
//! most recent emotion label.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::stats::SessionStats;
use crate::tui::component::Component;

pub const PANEL_WIDTH: u16 = 26;

pub struct StatsPanel<'a> {
    pub stats: &'a SessionStats,
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: &'a SessionStats) -> Self {
        Self { stats }
    }
}

impl<'a> Component for StatsPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled("Sessions", label)),
            Line::from(Span::styled(self.stats.session_count().to_string(), value)),
            Line::default(),
            Line::from(Span::styled("Current emotion", label)),
            Line::from(Span::styled(self.stats.current_emotion(), value)),
            Line::default(),
            Line::from(Span::styled("Ctrl+T  trends", label)),
        ];

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Stats ")
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(stats: &SessionStats) -> String {
        let backend = TestBackend::new(PANEL_WIDTH, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                StatsPanel::new(stats).render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn fresh_session_shows_defaults() {
        let text = render_text(&SessionStats::default());
        assert!(text.contains("Sessions"));
        assert!(text.contains('0'));
        assert!(text.contains('-'));
    }

    #[test]
    fn shows_recorded_analysis() {
        let mut stats = SessionStats::default();
        stats.record_analysis("joy");
        stats.record_analysis("sadness");

        let text = render_text(&stats);
        assert!(text.contains('2'));
        assert!(text.contains("Sadness"));
    }
}
