use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::stats_panel::PANEL_WIDTH;
use crate::tui::components::{MessageList, StatsPanel, TitleBar, TrendModal};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions for one frame.
pub struct ScreenLayout {
    pub title: Rect,
    pub messages: Rect,
    pub stats: Rect,
    pub input: Rect,
}

pub fn screen_layout(area: Rect, input_height: u16) -> ScreenLayout {
    use Constraint::{Fill, Length};
    let [title, body, input] =
        Layout::vertical([Length(1), Fill(1), Length(input_height)]).areas(area);
    let [messages, stats] = Layout::horizontal([Fill(1), Length(PANEL_WIDTH)]).areas(body);
    ScreenLayout {
        title,
        messages,
        stats,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = screen_layout(frame.area(), input_height);

    TitleBar::new(app.service_health, app.status_message.clone()).render(frame, layout.title);

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.placeholder_index(),
        tui.pulse_value,
    )
    .render(frame, layout.messages);

    StatsPanel::new(app.stats()).render(frame, layout.stats);

    tui.input_box.busy = app.is_analyzing();
    tui.input_box.render(frame, layout.input);

    if app.trend.is_visible() {
        let area = frame.area();
        TrendModal::new(&app.trend).render(frame, area);
    }
}
