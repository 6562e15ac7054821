//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, draws the UI, turns key
//! presses into `core::Action` values and runs the I/O that `update()` asks
//! for as tokio tasks.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (analysis or trend fetch in flight): draws every ~80ms so the
//!   placeholder can pulse.
//! - **Idle**: sleeps up to 500ms and only redraws on input, resize, or a
//!   finished background task.
//!
//! A `SteadyBlock` cursor is used because `set_cursor_position` resets the
//! terminal's blink timer on every `draw()`.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, error, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::analysis::{AnalysisRequest, EmotionService, Endpoints, HttpEmotionService};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::trend_modal::classify_click;
use crate::tui::components::{InputBox, InputEvent, MessageListState, ModalClick};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub pulse_value: f32,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            pulse_value: 0.0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP client for the configured host.
pub fn build_service(config: &ResolvedConfig) -> std::io::Result<Arc<dyn EmotionService>> {
    let endpoints = Endpoints::from_config(config);
    info!(
        "Using analysis service at {} (host: {})",
        endpoints.base(),
        config.host
    );
    let service = HttpEmotionService::new(endpoints, config.timeout).map_err(|e| {
        error!("Could not build analysis client: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    Ok(Arc::new(service))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service = build_service(&config)?;
    let mut app = App::new(service);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_health_check(app.service.clone(), tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'event_loop: loop {
        let animating = app.is_analyzing() || app.trend.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(if animating { ANIMATION_TICK } else { IDLE_TICK });
        if first_event.is_some() {
            needs_redraw = true;
        }

        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(effect) = handle_tui_event(&event, &mut app, &mut tui, frame_area)
                && run_effect(effect, &app, &tx)
            {
                break 'event_loop;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if run_effect(effect, &app, &tx) {
                break 'event_loop;
            }
        }
    }

    ratatui::restore();
    info!("EmotionEye shutting down");
    Ok(())
}

/// Route one terminal event. Returns the effect of any core update it caused.
fn handle_tui_event(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    frame_area: Rect,
) -> Option<Effect> {
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(update(app, Action::Quit)),
        TuiEvent::Escape => return Some(update(app, Action::CloseTrend)),
        TuiEvent::ShowTrend => return Some(update(app, Action::ShowTrend)),
        _ => {}
    }

    // The overlay is modal: it gets first refusal and swallows the rest.
    if app.trend.is_visible() {
        return match event {
            TuiEvent::InputChar('q' | 'x') => Some(update(app, Action::CloseTrend)),
            TuiEvent::MouseClick(column, row) => {
                match classify_click(frame_area, *column, *row) {
                    ModalClick::Backdrop | ModalClick::CloseButton => {
                        Some(update(app, Action::CloseTrend))
                    }
                    ModalClick::Content => None,
                }
            }
            _ => None,
        };
    }

    match event {
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            None
        }
        TuiEvent::MouseClick(..) => None,
        // Refused by core; the input keeps its text for after the reply lands.
        TuiEvent::Submit if app.is_analyzing() => Some(update(
            app,
            Action::Submit(tui.input_box.buffer().to_string()),
        )),
        _ => match tui.input_box.handle_event(event)? {
            InputEvent::Submit(text) => Some(update(app, Action::Submit(text))),
            InputEvent::ContentChanged => None,
        },
    }
}

/// Start whatever I/O an effect calls for. Returns true when the app should exit.
fn run_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Analyze(request) => {
            spawn_analysis(app.service.clone(), request, tx.clone());
            false
        }
        Effect::FetchTrend => {
            spawn_trend_fetch(app.service.clone(), tx.clone());
            false
        }
    }
}

fn send_action(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

fn spawn_analysis(
    service: Arc<dyn EmotionService>,
    request: AnalysisRequest,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning analysis request via {} ({} chars)",
        service.name(),
        request.message.chars().count()
    );
    tokio::spawn(async move {
        let started = Instant::now();
        let result = service.analyze(&request).await;
        debug!(
            "Analysis request finished in {}ms (ok: {})",
            started.elapsed().as_millis(),
            result.is_ok()
        );
        send_action(&tx, Action::AnalysisFinished(result));
    });
}

fn spawn_trend_fetch(service: Arc<dyn EmotionService>, tx: mpsc::Sender<Action>) {
    info!("Spawning sentiment trend fetch");
    tokio::spawn(async move {
        let result = service.sentiment_trend().await;
        send_action(&tx, Action::TrendFetched(result));
    });
}

fn spawn_health_check(service: Arc<dyn EmotionService>, tx: mpsc::Sender<Action>) {
    debug!("Spawning health check");
    tokio::spawn(async move {
        let result = service.health().await;
        send_action(&tx, Action::HealthChecked(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::replies::PLACEHOLDER;
    use crate::test_support::test_app;
    use crate::tui::components::trend_modal::modal_area;

    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_tui_event(&TuiEvent::InputChar(c), app, tui, FRAME);
        }
    }

    fn open_trend(app: &mut App, tui: &mut TuiState) {
        let effect = handle_tui_event(&TuiEvent::ShowTrend, app, tui, FRAME);
        assert_eq!(effect, Some(Effect::FetchTrend));
        assert!(app.trend.is_visible());
    }

    #[test]
    fn enter_submits_typed_text() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "I feel great today");

        let effect = handle_tui_event(&TuiEvent::Submit, &mut app, &mut tui, FRAME);

        assert_eq!(
            effect,
            Some(Effect::Analyze(AnalysisRequest {
                message: "I feel great today".to_string()
            }))
        );
        assert!(tui.input_box.buffer().is_empty());
    }

    #[test]
    fn blank_enter_does_nothing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "   ");

        assert_eq!(
            handle_tui_event(&TuiEvent::Submit, &mut app, &mut tui, FRAME),
            None
        );
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn enter_while_analyzing_keeps_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "first");
        handle_tui_event(&TuiEvent::Submit, &mut app, &mut tui, FRAME);
        type_text(&mut app, &mut tui, "second");

        let effect = handle_tui_event(&TuiEvent::Submit, &mut app, &mut tui, FRAME);

        assert_eq!(effect, Some(Effect::None));
        assert_eq!(tui.input_box.buffer(), "second");
        let placeholders = app
            .transcript
            .messages()
            .filter(|m| m.text == PLACEHOLDER)
            .count();
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            handle_tui_event(&TuiEvent::ForceQuit, &mut app, &mut tui, FRAME),
            Some(Effect::Quit)
        );
    }

    #[test]
    fn escape_closes_trend_overlay() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        open_trend(&mut app, &mut tui);

        handle_tui_event(&TuiEvent::Escape, &mut app, &mut tui, FRAME);
        assert!(!app.trend.is_visible());
    }

    #[test]
    fn q_closes_overlay_without_typing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        open_trend(&mut app, &mut tui);

        handle_tui_event(&TuiEvent::InputChar('q'), &mut app, &mut tui, FRAME);
        assert!(!app.trend.is_visible());
        assert!(tui.input_box.buffer().is_empty());

        // With the overlay gone, q is ordinary input again
        handle_tui_event(&TuiEvent::InputChar('q'), &mut app, &mut tui, FRAME);
        assert_eq!(tui.input_box.buffer(), "q");
    }

    #[test]
    fn overlay_swallows_other_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        open_trend(&mut app, &mut tui);

        handle_tui_event(&TuiEvent::InputChar('a'), &mut app, &mut tui, FRAME);
        assert_eq!(
            handle_tui_event(&TuiEvent::Submit, &mut app, &mut tui, FRAME),
            None
        );
        assert!(app.trend.is_visible());
        assert!(tui.input_box.buffer().is_empty());
    }

    #[test]
    fn backdrop_click_closes_and_content_click_does_not() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        open_trend(&mut app, &mut tui);
        let modal = modal_area(FRAME);

        handle_tui_event(
            &TuiEvent::MouseClick(modal.x + 2, modal.y + 3),
            &mut app,
            &mut tui,
            FRAME,
        );
        assert!(app.trend.is_visible());

        handle_tui_event(&TuiEvent::MouseClick(0, 0), &mut app, &mut tui, FRAME);
        assert!(!app.trend.is_visible());
    }

    #[test]
    fn escape_without_overlay_is_harmless() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            handle_tui_event(&TuiEvent::Escape, &mut app, &mut tui, FRAME),
            Some(Effect::None)
        );
        assert!(!app.trend.is_visible());
        assert!(app.trend.chart().is_none());
    }
}
