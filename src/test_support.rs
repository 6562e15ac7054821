//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::analysis::{
    AnalysisOutcome, AnalysisRequest, EmotionService, HealthReport, ServiceError, TrendData,
};

/// A service for tests that never reaches the network.
/// Every call fails as if the host were down.
pub struct NoopService;

#[async_trait]
impl EmotionService for NoopService {
    fn name(&self) -> &str {
        "noop"
    }

    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisOutcome, ServiceError> {
        Err(ServiceError::Network("noop service".to_string()))
    }

    async fn sentiment_trend(&self) -> Result<TrendData, ServiceError> {
        Err(ServiceError::Network("noop service".to_string()))
    }

    async fn health(&self) -> Result<HealthReport, ServiceError> {
        Err(ServiceError::Network("noop service".to_string()))
    }
}

/// Creates a test App with a NoopService.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopService))
}
