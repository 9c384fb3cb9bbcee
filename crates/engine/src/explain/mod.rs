use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use mindtrace_common::api::explain::{ExplainRequest, ExplainResponse, ExplanationKind};
use mindtrace_common::types::{ExplanationOutcome, ExplanationResult, FeatureWeight, Impact};

use crate::inference::labels;

#[derive(Debug, thiserror::Error)]
enum ExplainError {
    #[error("Explanation HTTP error: {0}")]
    Http(String),

    #[error("Explanation service error: {0}")]
    Api(String),

    #[error("Explanation response parse error: {0}")]
    Parse(String),

    #[error("Explanation timed out after {0}ms")]
    Timeout(u64),
}

/// Client for the local explanation sidecar. Explanations are enrichment:
/// every failure mode is captured into the outcome, never raised.
pub struct ExplanationClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ExplanationClient {
    pub fn new(base_url: String, timeout_ms: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Request an explanation for one classifier's verdict on `text`.
    pub async fn explain(&self, text: &str, kind: ExplanationKind) -> ExplanationOutcome {
        match self.explain_inner(text, kind).await {
            Ok(result) => ExplanationOutcome::Ready(result),
            Err(e) => {
                metrics::counter!("explain.request.errors", "kind" => kind.as_str()).increment(1);
                tracing::warn!(
                    kind = kind.as_str(),
                    error = %e,
                    "Explanation unavailable, continuing without it"
                );
                ExplanationOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn explain_inner(
        &self,
        text: &str,
        kind: ExplanationKind,
    ) -> Result<ExplanationResult, ExplainError> {
        let start = std::time::Instant::now();

        let request = ExplainRequest {
            text: text.to_string(),
            kind,
        };

        let response = self
            .http
            .post(format!("{}/explain", self.base_url))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExplainError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    ExplainError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        metrics::histogram!("explain.request.latency", "kind" => kind.as_str())
            .record(start.elapsed().as_secs_f64());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplainError::Api(format!("{}: {}", status, body)));
        }

        let body: ExplainResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::Parse(e.to_string()))?;

        Ok(from_wire_response(kind, body))
    }
}

fn from_wire_response(kind: ExplanationKind, resp: ExplainResponse) -> ExplanationResult {
    let top_features = resp
        .features
        .into_iter()
        .map(|(feature, weight)| FeatureWeight {
            feature,
            weight,
            impact: if weight > 0.0 {
                Impact::Supports
            } else {
                Impact::Contradicts
            },
        })
        .collect();

    ExplanationResult {
        predicted_label: labels::human_label_for_class(kind, resp.predicted_class),
        confidence: (resp.confidence * 100.0).clamp(0.0, 100.0),
        top_features,
    }
}

/// Object-safe trait for testability (dyn dispatch).
pub trait Explainer: Send + Sync {
    fn explain<'a>(
        &'a self,
        text: &'a str,
        kind: ExplanationKind,
    ) -> Pin<Box<dyn Future<Output = ExplanationOutcome> + Send + 'a>>;
}

impl Explainer for ExplanationClient {
    fn explain<'a>(
        &'a self,
        text: &'a str,
        kind: ExplanationKind,
    ) -> Pin<Box<dyn Future<Output = ExplanationOutcome> + Send + 'a>> {
        Box::pin(self.explain(text, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_maps_class_and_impacts() {
        let json = r#"{
            "predicted_class": 7,
            "confidence": 0.82,
            "features": [["hopeless", 0.31], ["sleep", -0.12], ["tired", 0.08]]
        }"#;

        let resp: ExplainResponse = serde_json::from_str(json).unwrap();
        let result = from_wire_response(ExplanationKind::Disorder, resp);

        assert_eq!(result.predicted_label, "Depression");
        assert_eq!(result.confidence, 82.0);
        assert_eq!(result.top_features.len(), 3);
        assert_eq!(result.top_features[0].impact, Impact::Supports);
        assert_eq!(result.top_features[1].impact, Impact::Contradicts);
        // Order from the service is preserved.
        assert_eq!(result.top_features[0].feature, "hopeless");
    }

    #[test]
    fn test_outcome_serializes_error_key_on_failure() {
        let outcome = ExplanationOutcome::Failed {
            error: "connection refused".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"], "connection refused");
    }
}
