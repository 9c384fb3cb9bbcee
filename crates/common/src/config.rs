use serde::{Deserialize, Serialize};

/// Top-level system configuration, deserialized from system.toml.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemConfig {
    pub inference: InferenceConfig,
    pub explanation: ExplanationConfig,
    pub analysis: AnalysisConfig,
    pub retry: RetryDefaults,
}

/// Remote classifier endpoints and their call budget.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the hosted sentiment classifier.
    pub sentiment_url: String,
    /// Base URL of the hosted disorder classifier.
    pub disorder_url: String,
    /// Per-call timeout. Classification is on the critical path, so
    /// exceeding this aborts the whole analysis.
    pub classify_timeout_ms: u64,
}

/// Explanation sidecar endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplanationConfig {
    /// Base URL of the local explanation service.
    pub base_url: String,
    /// Per-call timeout. Explanations are enrichment; exceeding this is
    /// captured as a failed outcome, never propagated.
    pub explain_timeout_ms: u64,
}

/// Risk banding parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Disorder confidence (0–100) at or below which no risk is reported.
    /// Clinical-adjacent cutoff: the comparison is `<=` and must stay so.
    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: f64,
}

fn default_detection_threshold() -> f64 {
    35.0
}

/// Default retry parameters, per remote target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryDefaults {
    pub inference: RetryConfig,
}

/// Retry configuration for a specific target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}
