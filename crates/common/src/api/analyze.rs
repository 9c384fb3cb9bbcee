use serde::{Deserialize, Serialize};

use crate::ids::{AnalysisId, UserId};
use crate::types::{AnalysisRecord, ExplanationOutcome, RiskPoint, RiskTier};

/// POST /analyze request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Both best-effort explanations, one per classifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplanationBundle {
    pub sentiment: ExplanationOutcome,
    pub disorder: ExplanationOutcome,
}

/// POST /analyze response: the persisted record plus live-only enrichment
/// (alert text and explanations are never stored).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub id: AnalysisId,
    pub user_id: UserId,
    pub text: String,
    pub sentiment: String,
    pub sentiment_confidence: f64,
    pub disorder: String,
    pub disorder_confidence: f64,
    pub risk_level: RiskTier,
    pub recommendations: Vec<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub alert: String,
    pub explanations: ExplanationBundle,
}

/// GET /results response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub user_id: UserId,
    pub count: usize,
    pub analyses: Vec<AnalysisRecord>,
}

/// GET /risk-levels response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskLevelsResponse {
    pub user_id: UserId,
    pub count: usize,
    pub risk_levels: Vec<RiskPoint>,
}

/// GET /trend response — full records ascending by timestamp, chart-ready.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendResponse {
    pub user_id: UserId,
    pub count: usize,
    pub trend_data: Vec<AnalysisRecord>,
}

/// One entry of GET /suggestions: the stored recommendation context without
/// the free-text input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub id: AnalysisId,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub disorder: String,
    pub risk_level: RiskTier,
    pub recommendations: Vec<String>,
}

/// GET /suggestions response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub user_id: UserId,
    pub count: usize,
    pub suggestions: Vec<SuggestionEntry>,
}

/// DELETE /results/{id} response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: AnalysisId,
    pub deleted: bool,
}
