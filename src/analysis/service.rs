use std::fmt;

use async_trait::async_trait;

use super::types::{AnalysisOutcome, AnalysisRequest, HealthReport, TrendData};

/// Errors that can occur while talking to the analysis service.
///
/// Every variant is a transport-class failure from the user's point of view:
/// the UI shows one generic message and the detail only goes to the log.
/// A semantic `error` field in a 2xx body is not an error here; it arrives as
/// [`AnalysisOutcome::Rejected`].
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Client could not be built (bad timeout, TLS backend failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a non-success HTTP status.
    Status { status: u16, message: String },
    /// Body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Status { status, message } => {
                write!(f, "service error (HTTP {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// The remote emotion-analysis API.
///
/// Implementations make a single attempt per call; retrying is the user's
/// decision.
#[async_trait]
pub trait EmotionService: Send + Sync {
    /// Returns the name of the service implementation.
    fn name(&self) -> &str;

    /// Classifies one chat message.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, ServiceError>;

    /// Fetches aggregated emotion counts across all analyzed messages.
    async fn sentiment_trend(&self) -> Result<TrendData, ServiceError>;

    /// Probes the service's health endpoint.
    async fn health(&self) -> Result<HealthReport, ServiceError>;
}
