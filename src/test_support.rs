//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::analysis::{AnalysisError, AnalysisResponse, AnalysisService, Emotion};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;

/// Returns scripted outcomes in order. Once the script runs out, calls never complete.
///
/// A gated service additionally holds each call until [`ScriptedService::release`].
pub struct ScriptedService {
    outcomes: Mutex<VecDeque<Result<AnalysisResponse, AnalysisError>>>,
    gate: Option<Semaphore>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedService {
    pub fn new(outcomes: Vec<Result<AnalysisResponse, AnalysisError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            gate: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn gated(outcomes: Vec<Result<AnalysisResponse, AnalysisError>>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(outcomes)
        }
    }

    /// Lets one held call proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn analyze_text(&self, _text: &str) -> Result<AnalysisResponse, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate
            && let Ok(permit) = gate.acquire().await
        {
            permit.forget();
        }

        let next = self.outcomes.lock().expect("script lock").pop_front();
        let Some(outcome) = next else {
            return std::future::pending().await;
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// Builds a success body the way the analysis service would.
pub fn response(text: &str, resources: &[&str], label: &str, risk_level: &str) -> AnalysisResponse {
    AnalysisResponse {
        response: text.to_string(),
        resources: resources.iter().map(|r| r.to_string()).collect(),
        emotion: Emotion {
            label: label.to_string(),
            score: Some(0.9),
        },
        risk_level: risk_level.to_string(),
        sentiment: None,
    }
}

pub fn test_config() -> ResolvedConfig {
    ResolvedConfig::default()
}

/// Creates a test App with default settings.
pub fn test_app() -> App {
    App::from_config(&test_config())
}
