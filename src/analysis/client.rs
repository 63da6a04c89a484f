//! HTTP client for the text analysis service.
//!
//! One endpoint: `POST {base_url}/analyze_text` with `{"text": ...}`.
//! Every failure is reported as an [`AnalysisError`]; callers decide what the
//! user sees.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{AnalysisResponse, AnalyzeRequest};

/// Errors that can occur while talking to the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The request never reached the server or the response never arrived.
    Transport(String),
    /// The server answered with a non-success status.
    Protocol { status: u16, message: String },
    /// The body was not the expected JSON shape.
    Malformed(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Transport(msg) => write!(f, "transport error: {msg}"),
            AnalysisError::Protocol { status, message } => {
                write!(f, "analysis service error (HTTP {status}): {message}")
            }
            AnalysisError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Returns the name of the service (used in logs).
    fn name(&self) -> &str;

    /// Analyzes one user utterance.
    async fn analyze_text(&self, text: &str) -> Result<AnalysisResponse, AnalysisError>;
}

/// Talks to the analysis backend over HTTP.
pub struct HttpAnalysisService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    fn name(&self) -> &str {
        "http"
    }

    async fn analyze_text(&self, text: &str) -> Result<AnalysisResponse, AnalysisError> {
        let request = AnalyzeRequest {
            text: text.to_string(),
        };

        info!("POST {}/analyze_text ({} chars)", self.base_url, text.len());

        let response = self
            .client
            .post(format!("{}/analyze_text", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        debug!("Analysis response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Analysis service error: {} - {}", status, message);
            return Err(AnalysisError::Protocol { status, message });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let parsed: AnalysisResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!("Analysis response did not parse: {}", e);
            AnalysisError::Malformed(e.to_string())
        })?;

        debug!(
            "Analysis: emotion={} score={:?} risk={} sentiment={:?} resources={}",
            parsed.emotion.label,
            parsed.emotion.score,
            parsed.risk_level,
            parsed.sentiment.as_ref().map(|s| s.label.as_str()),
            parsed.resources.len()
        );

        Ok(parsed)
    }
}
