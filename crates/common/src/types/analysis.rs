use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AnalysisId, UserId};

/// Label forced onto a result whose confidence never cleared the detection
/// threshold.
pub const NO_DISORDER_LABEL: &str = "No significant disorder detected";

/// A single classifier verdict: human-readable label plus confidence in
/// [0, 100]. Produced fresh per call; embedded into [`AnalysisRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f64,
}

/// Risk tier derived from a disorder confidence score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "No Risk")]
    NoRisk,
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskTier {
    /// Stable string form used for the risk_level column.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            RiskTier::NoRisk => "No Risk",
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }
}

/// Outcome of risk banding: the tier plus the label the rest of the
/// pipeline should use (forced to [`NO_DISORDER_LABEL`] below threshold).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandedRisk {
    pub tier: RiskTier,
    pub effective_label: String,
}

/// Direction a feature pushed the prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Supports,
    Contradicts,
}

/// One attributed feature from the explanation service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub feature: String,
    pub weight: f64,
    pub impact: Impact,
}

/// Successful explanation payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplanationResult {
    pub predicted_label: String,
    pub confidence: f64,
    pub top_features: Vec<FeatureWeight>,
}

/// Best-effort explanation outcome. Failures are values, not errors: the
/// orchestrator attaches them to the response without failing the analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExplanationOutcome {
    Ready(ExplanationResult),
    Failed { error: String },
}

impl ExplanationOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ExplanationOutcome::Ready(_))
    }
}

/// A persisted analysis, exactly one per successful analyze call.
/// Never mutated after creation; exclusively owned by its user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub user_id: UserId,
    pub text: String,
    pub sentiment: String,
    pub sentiment_confidence: f64,
    pub disorder: String,
    pub disorder_confidence: f64,
    pub risk_level: RiskTier,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Insert payload for the store; id and timestamp are store-assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAnalysis {
    pub user_id: UserId,
    pub text: String,
    pub sentiment: String,
    pub sentiment_confidence: f64,
    pub disorder: String,
    pub disorder_confidence: f64,
    pub risk_level: RiskTier,
    pub recommendations: Vec<String>,
}

/// Compact row for the risk-level history view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub id: AnalysisId,
    pub timestamp: DateTime<Utc>,
    pub risk_level: RiskTier,
    pub disorder: String,
}
