use serde::{Deserialize, Serialize};

/// Which classifier an explanation is requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationKind {
    Sentiment,
    Disorder,
}

impl ExplanationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplanationKind::Sentiment => "sentiment",
            ExplanationKind::Disorder => "disorder",
        }
    }
}

/// POST /explain request to the explanation sidecar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ExplanationKind,
}

/// POST /explain response from the sidecar. The predicted class is a raw
/// numeric index; the engine maps it back through the label dictionaries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub predicted_class: u32,
    /// Score in [0, 1].
    pub confidence: f64,
    /// Ordered (token, weight) pairs, most influential first.
    pub features: Vec<(String, f64)>,
}
