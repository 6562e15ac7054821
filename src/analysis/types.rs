use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::service::ServiceError;

/// Body of `POST /analyze`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub message: String,
}

impl AnalysisRequest {
    /// Builds a request from raw user input.
    /// Returns `None` when the input is empty after trimming.
    pub fn from_input(raw: &str) -> Option<Self> {
        let message = raw.trim();
        if message.is_empty() {
            return None;
        }
        Some(Self {
            message: message.to_string(),
        })
    }
}

/// Response body of `POST /analyze` exactly as the service sends it.
///
/// A failed analysis only carries `error`, so every field is optional here.
/// Use [`AnalysisOutcome::try_from`] to get a checked value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnalysisResponse {
    pub reply: Option<String>,
    pub emotion: Option<String>,
    pub confidence: Option<f64>,
    pub quranic_aayat: Option<String>,
    pub translation: Option<String>,
    pub original_classification: Option<String>,
    pub error: Option<String>,
}

/// A successful analysis with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub reply: String,
    pub emotion: String,
    /// Classifier score in `[0, 1]`.
    pub confidence: f64,
    pub quranic_aayat: String,
    pub translation: String,
    /// Label before the service's negative-phrase correction, when it reports one.
    pub original_classification: Option<String>,
}

impl Analysis {
    /// The pre-correction label, only when it differs from the final emotion.
    pub fn overridden_classification(&self) -> Option<&str> {
        self.original_classification
            .as_deref()
            .filter(|original| !original.is_empty() && *original != self.emotion)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The service understood the request and classified it.
    Analyzed(Analysis),
    /// The service answered with an `error` field.
    Rejected(String),
}

impl TryFrom<AnalysisResponse> for AnalysisOutcome {
    type Error = ServiceError;

    fn try_from(response: AnalysisResponse) -> Result<Self, Self::Error> {
        if let Some(error) = response.error.filter(|e| !e.is_empty()) {
            return Ok(AnalysisOutcome::Rejected(error));
        }

        fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
            value.ok_or_else(|| ServiceError::Parse(format!("missing field `{field}`")))
        }

        let confidence = required(response.confidence, "confidence")?;
        if !confidence.is_finite() {
            return Err(ServiceError::Parse(format!(
                "confidence is not a finite number: {confidence}"
            )));
        }

        Ok(AnalysisOutcome::Analyzed(Analysis {
            reply: required(response.reply, "reply")?,
            emotion: required(response.emotion, "emotion")?,
            confidence,
            quranic_aayat: required(response.quranic_aayat, "quranic_aayat")?,
            translation: required(response.translation, "translation")?,
            original_classification: response.original_classification,
        }))
    }
}

/// Aggregated emotion counts from `GET /sentiment-trend`.
///
/// Keys are kept sorted so the chart is stable between fetches.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TrendData(BTreeMap<String, u64>);

impl TrendData {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.get(label).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for TrendData {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub model_loaded: Option<bool>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
