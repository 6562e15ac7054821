//! # Application State
//!
//! Core business state for EmotionEye. Domain data only; presentation state
//! (scroll offsets, input buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<dyn EmotionService>     // remote analysis API
//! ├── transcript: Transcript              // chat history
//! ├── trend: TrendVisualizer              // overlay + live chart
//! ├── status_message: String              // title bar text
//! ├── service_health: ServiceHealth       // startup probe result
//! ├── stats: SessionStats                 // read-only outside core
//! └── pending_placeholder: Option<handle> // set while an analysis is in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::analysis::EmotionService;
use crate::core::stats::SessionStats;
use crate::core::transcript::{MessageHandle, Transcript};
use crate::core::trend::TrendVisualizer;

/// Result of the startup health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceHealth {
    #[default]
    Unknown,
    Healthy,
    /// Reachable, but reported itself unhealthy or answered garbage.
    Unhealthy,
    Unreachable,
}

impl ServiceHealth {
    pub fn label(self) -> &'static str {
        match self {
            ServiceHealth::Unknown => "checking",
            ServiceHealth::Healthy => "online",
            ServiceHealth::Unhealthy => "degraded",
            ServiceHealth::Unreachable => "offline",
        }
    }
}

pub struct App {
    pub service: Arc<dyn EmotionService>,
    pub transcript: Transcript,
    pub trend: TrendVisualizer,
    pub status_message: String,
    pub service_health: ServiceHealth,
    pub(crate) stats: SessionStats,
    pub(crate) pending_placeholder: Option<MessageHandle>,
}

impl App {
    pub fn new(service: Arc<dyn EmotionService>) -> Self {
        Self {
            service,
            transcript: Transcript::new(),
            trend: TrendVisualizer::new(),
            status_message: String::from("Welcome to EmotionEye!"),
            service_health: ServiceHealth::default(),
            stats: SessionStats::default(),
            pending_placeholder: None,
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// True while a submission is waiting for the service.
    pub fn is_analyzing(&self) -> bool {
        self.pending_placeholder.is_some()
    }

    /// Transcript index of the placeholder, if one is showing.
    pub fn placeholder_index(&self) -> Option<usize> {
        self.pending_placeholder
            .as_ref()
            .and_then(|handle| self.transcript.position(handle))
    }
}
