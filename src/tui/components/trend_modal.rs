//! # Trend Modal
//!
//! Overlay with the emotion-frequency bar chart. Opened with Ctrl+T, dismissed
//! with Esc, `q`/`x`, the ✕ control, or a click on the dimmed backdrop.
//!
//! Transient wrapper over `TrendVisualizer`; all lifecycle state (visible,
//! loading, the chart instance) lives in core.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::trend::{DATASET_LABEL, Rgb, TrendChart, TrendVisualizer};
use crate::tui::component::Component;

const MODAL_WIDTH_PERCENT: u16 = 70;
const MODAL_HEIGHT_PERCENT: u16 = 70;
const MAX_Y_TICKS: usize = 6;
const MAX_BAR_WIDTH: u16 = 12;
const CLOSE_LABEL: &str = " ✕ ";

/// Where a click landed relative to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Backdrop,
    CloseButton,
    Content,
}

/// Modal rectangle for a given frame.
pub fn modal_area(frame_area: Rect) -> Rect {
    centered_rect(MODAL_WIDTH_PERCENT, MODAL_HEIGHT_PERCENT, frame_area)
}

/// The ✕ sits on the top border, one cell in from the right corner.
fn close_button_area(modal: Rect) -> Rect {
    let width = CLOSE_LABEL.width() as u16;
    Rect::new(
        modal.right().saturating_sub(width + 1).max(modal.x),
        modal.y,
        width.min(modal.width),
        1,
    )
}

pub fn classify_click(frame_area: Rect, column: u16, row: u16) -> ModalClick {
    let modal = modal_area(frame_area);
    let position = Position::new(column, row);
    if close_button_area(modal).contains(position) {
        ModalClick::CloseButton
    } else if modal.contains(position) {
        ModalClick::Content
    } else {
        ModalClick::Backdrop
    }
}

pub struct TrendModal<'a> {
    pub trend: &'a TrendVisualizer,
}

impl<'a> TrendModal<'a> {
    pub fn new(trend: &'a TrendVisualizer) -> Self {
        Self { trend }
    }

    fn render_message(frame: &mut Frame, area: Rect, text: &str) {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(paragraph, middle);
    }

    fn render_chart(frame: &mut Frame, area: Rect, chart: &TrendChart) {
        let [legend_area, plot_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(area);

        let legend_color = chart
            .bars()
            .first()
            .map_or(Color::Cyan, |bar| to_color(bar.color));
        frame.render_widget(
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(legend_color)),
                Span::raw(DATASET_LABEL),
            ])
            .centered(),
            legend_area,
        );

        let ticks = chart.y_ticks(MAX_Y_TICKS);
        let top = ticks.last().copied().unwrap_or(1);
        let tick_labels: Vec<String> = ticks.iter().map(u64::to_string).collect();
        let axis_width = tick_labels
            .iter()
            .map(|label| label.width() as u16)
            .max()
            .unwrap_or(1)
            + 1;

        let [axis_area, bars_area] =
            Layout::horizontal([Constraint::Length(axis_width), Constraint::Fill(1)])
                .areas(plot_area);

        Self::render_y_axis(frame, axis_area, &ticks, &tick_labels, top);

        let bar_count = chart.bars().len().max(1) as u16;
        let bar_width = (bars_area.width / bar_count)
            .saturating_sub(1)
            .clamp(1, MAX_BAR_WIDTH);

        let bars: Vec<Bar> = chart
            .bars()
            .iter()
            .map(|bar| {
                Bar::default()
                    .value(bar.value)
                    .label(Line::from(bar.label.clone()))
                    .style(Style::default().fg(to_color(bar.color)))
                    .value_style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(to_color(bar.color))
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();

        let bar_chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .max(top);
        frame.render_widget(bar_chart, bars_area);
    }

    /// Tick labels aligned to the bar scale. The bottom row holds bar labels.
    fn render_y_axis(frame: &mut Frame, area: Rect, ticks: &[u64], labels: &[String], top: u64) {
        let plot_rows = area.height.saturating_sub(1);
        if plot_rows == 0 || top == 0 {
            return;
        }
        let baseline = area.y + plot_rows.saturating_sub(1);
        for (tick, label) in ticks.iter().zip(labels) {
            let offset = ((*tick as f64 / top as f64) * plot_rows.saturating_sub(1) as f64)
                .round() as u16;
            let row = baseline.saturating_sub(offset);
            frame.render_widget(
                Line::from(label.as_str())
                    .right_aligned()
                    .style(Style::default().fg(Color::DarkGray)),
                Rect::new(area.x, row, area.width.saturating_sub(1), 1),
            );
        }
    }
}

impl<'a> Component for TrendModal<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = modal_area(area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Emotion Trends ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Esc / q close ").centered());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);
        frame.render_widget(
            Span::styled(
                CLOSE_LABEL,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            close_button_area(overlay),
        );

        if self.trend.is_loading() {
            Self::render_message(frame, inner, "Loading sentiment trends...");
            return;
        }
        match self.trend.chart() {
            Some(chart) if !chart.bars().is_empty() => Self::render_chart(frame, inner, chart),
            _ => Self::render_message(frame, inner, "No emotions recorded yet."),
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
