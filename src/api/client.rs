use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::models::{AccuracySummary, GamePrediction, PerformanceSample};
use crate::league::League;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} responded with {status}")]
    Status { path: String, status: StatusCode },
    #[error("invalid response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// The prediction REST API the dashboard reads from.
#[async_trait]
pub trait PredictionsApi: Send + Sync {
    /// `GET /results/{league}`
    async fn accuracy(&self, league: League) -> Result<AccuracySummary, ApiError>;

    /// `GET /dashboard/performance`
    async fn performance(&self) -> Result<Vec<PerformanceSample>, ApiError>;

    /// `GET /games/{league}`
    async fn games(&self, league: League) -> Result<Vec<GamePrediction>, ApiError>;
}

/// reqwest-backed client for the prediction API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Build)?;
        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: resp.status(),
            });
        }

        resp.json().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PredictionsApi for ApiClient {
    async fn accuracy(&self, league: League) -> Result<AccuracySummary, ApiError> {
        self.get_json(&format!("/results/{}", league.code())).await
    }

    async fn performance(&self) -> Result<Vec<PerformanceSample>, ApiError> {
        self.get_json("/dashboard/performance").await
    }

    async fn games(&self, league: League) -> Result<Vec<GamePrediction>, ApiError> {
        self.get_json(&format!("/games/{}", league.code())).await
    }
}
