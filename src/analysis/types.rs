use serde::{Deserialize, Serialize};

/// Request body for `POST /analyze_text`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Emotion {
    pub label: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Sentiment {
    pub label: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Success body of `POST /analyze_text`. Extra fields are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    pub response: String,
    pub resources: Vec<String>,
    pub emotion: Emotion,
    /// Opaque severity string. Only `"low"` changes behavior.
    pub risk_level: String,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

impl AnalysisResponse {
    pub fn is_low_risk(&self) -> bool {
        self.risk_level == "low"
    }
}
