//! reqwest-backed implementation of [`EmotionService`].
//!
//! One request per call, JSON in and out. Non-success statuses are turned
//! into [`ServiceError::Status`] before the body is ever parsed, so an error
//! page from a proxy never reaches the JSON decoder.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::endpoint::Endpoints;
use super::service::{EmotionService, ServiceError};
use super::types::{AnalysisOutcome, AnalysisRequest, AnalysisResponse, HealthReport, TrendData};

pub struct HttpEmotionService {
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl HttpEmotionService {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        info!(
            "Analysis service at {} (timeout {}s)",
            endpoints.base(),
            timeout.as_secs()
        );

        Ok(Self { endpoints, client })
    }

    /// Checks the status, then decodes the body as `T`.
    async fn read_json<T: DeserializeOwned>(
        route: &str,
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        debug!("{} response status: {}", route, status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{} failed: {} - {}", route, status.as_u16(), body);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        debug!("{} response body: {} bytes", route, body.len());

        serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl EmotionService for HttpEmotionService {
    fn name(&self) -> &str {
        "http"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, ServiceError> {
        info!("POST {} ({} chars)", self.endpoints.analyze(), request.message.len());

        let response = self
            .client
            .post(self.endpoints.analyze())
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let body: AnalysisResponse = Self::read_json("analyze", response).await?;
        AnalysisOutcome::try_from(body)
    }

    async fn sentiment_trend(&self) -> Result<TrendData, ServiceError> {
        info!("GET {}", self.endpoints.sentiment_trend());

        let response = self
            .client
            .get(self.endpoints.sentiment_trend())
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Self::read_json("sentiment-trend", response).await
    }

    async fn health(&self) -> Result<HealthReport, ServiceError> {
        debug!("GET {}", self.endpoints.health());

        let response = self
            .client
            .get(self.endpoints.health())
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Self::read_json("health", response).await
    }
}
