//! # Analysis Service
//!
//! Everything that talks to the remote emotion-analysis API: wire types,
//! the service trait, endpoint dispatch and the reqwest-backed client.

pub mod endpoint;
pub mod http;
pub mod service;
pub mod types;

pub use endpoint::Endpoints;
pub use http::HttpEmotionService;
pub use service::{EmotionService, ServiceError};
pub use types::{
    Analysis, AnalysisOutcome, AnalysisRequest, AnalysisResponse, HealthReport, TrendData,
};
