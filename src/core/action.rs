//! # Actions
//!
//! Everything that can happen in EmotionEye becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The service answers? That's `Action::AnalysisFinished(result)`.
//!
//! `update()` applies an action to the state and returns an [`Effect`]
//! describing any I/O the adapter should start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, error, info, warn};

use crate::analysis::{AnalysisOutcome, AnalysisRequest, HealthReport, ServiceError, TrendData};
use crate::core::replies::{self, CONNECTIVITY_FAILURE, PLACEHOLDER, TREND_FAILURE};
use crate::core::state::{App, ServiceHealth};
use crate::core::transcript::Sender;

#[derive(Debug)]
pub enum Action {
    /// Raw text from the input box, untrimmed.
    Submit(String),
    AnalysisFinished(Result<AnalysisOutcome, ServiceError>),
    ShowTrend,
    TrendFetched(Result<TrendData, ServiceError>),
    CloseTrend,
    HealthChecked(Result<HealthReport, ServiceError>),
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Analyze(AnalysisRequest),
    FetchTrend,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(raw) => submit(app, &raw),
        Action::AnalysisFinished(result) => {
            finish_analysis(app, result);
            Effect::None
        }
        Action::ShowTrend => {
            app.trend.open();
            app.status_message = "Loading emotion trends...".to_string();
            Effect::FetchTrend
        }
        Action::TrendFetched(result) => {
            match result {
                Ok(data) => {
                    let chart = app.trend.render(&data);
                    info!(
                        "Trend chart #{} rendered ({} categories)",
                        chart.generation(),
                        chart.bars().len()
                    );
                    app.status_message = "Emotion trends".to_string();
                }
                Err(e) => {
                    error!("Error fetching sentiment trend: {}", e);
                    app.transcript.append(TREND_FAILURE, Sender::Bot);
                    app.trend.fail();
                    app.status_message = "Trends unavailable".to_string();
                }
            }
            Effect::None
        }
        Action::CloseTrend => {
            app.trend.close();
            Effect::None
        }
        Action::HealthChecked(result) => {
            app.service_health = match result {
                Ok(report) if report.is_healthy() => ServiceHealth::Healthy,
                Ok(report) => {
                    warn!("Service reports status '{}'", report.status);
                    ServiceHealth::Unhealthy
                }
                Err(e @ (ServiceError::Status { .. } | ServiceError::Parse(_))) => {
                    warn!("Health check failed: {}", e);
                    ServiceHealth::Unhealthy
                }
                Err(e) => {
                    warn!("Health check failed: {}", e);
                    ServiceHealth::Unreachable
                }
            };
            debug!("Service health: {:?}", app.service_health);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, raw: &str) -> Effect {
    let Some(request) = AnalysisRequest::from_input(raw) else {
        return Effect::None;
    };

    // One analysis at a time; overlapping placeholders are never shown.
    if app.is_analyzing() {
        app.status_message = "Still analyzing your last message...".to_string();
        return Effect::None;
    }

    app.transcript.append(request.message.clone(), Sender::User);
    app.pending_placeholder = Some(app.transcript.append(PLACEHOLDER, Sender::Bot));
    app.status_message = "Analyzing...".to_string();
    Effect::Analyze(request)
}

fn finish_analysis(app: &mut App, result: Result<AnalysisOutcome, ServiceError>) {
    match app.pending_placeholder.take() {
        Some(placeholder) => {
            placeholder.remove(&mut app.transcript);
        }
        None => warn!("Analysis finished with no placeholder showing"),
    }

    match result {
        Err(e) => {
            error!("API Error: {}", e);
            app.transcript.append(CONNECTIVITY_FAILURE, Sender::Bot);
            app.status_message = "Analysis failed".to_string();
        }
        Ok(AnalysisOutcome::Rejected(message)) => {
            warn!("Service rejected message: {}", message);
            app.transcript.append(replies::service_error(&message), Sender::Bot);
            app.status_message = "Analysis rejected".to_string();
        }
        Ok(AnalysisOutcome::Analyzed(analysis)) => {
            app.stats.record_analysis(&analysis.emotion);
            for message in replies::analysis_messages(&analysis) {
                app.transcript.append(message, Sender::Bot);
            }
            info!(
                "Analysis #{}: {} ({:.3})",
                app.stats.session_count(),
                analysis.emotion,
                analysis.confidence
            );
            app.status_message = format!("Detected {}", app.stats.current_emotion());
        }
    }
}
