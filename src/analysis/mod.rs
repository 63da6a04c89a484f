pub mod client;
pub mod types;

pub use client::{AnalysisError, AnalysisService, HttpAnalysisService};
pub use types::{AnalysisResponse, AnalyzeRequest, Emotion, Sentiment};
