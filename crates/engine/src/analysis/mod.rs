pub mod recommendations;
pub mod risk;

use std::sync::Arc;

use mindtrace_common::api::analyze::{AnalyzeResponse, ExplanationBundle};
use mindtrace_common::api::explain::ExplanationKind;
use mindtrace_common::ids::UserId;
use mindtrace_common::types::{NewAnalysis, RiskTier};

use crate::explain::Explainer;
use crate::inference::{Classifier, InferenceError};
use crate::store::{AnalysisStore, StoreError};

/// Alert text, a pure projection of the risk tier. Exact wording is part of
/// the client contract.
pub const HIGH_RISK_ALERT: &str = "🚨 Alert Notification Triggered: High risk detected!";
pub const NO_ALERT: &str = "Risk is not high. No alert triggered.";

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Classification failed: {0}")]
    Classification(#[from] InferenceError),

    #[error("Failed to persist analysis: {0}")]
    Persistence(#[from] StoreError),
}

impl From<AnalysisError> for mindtrace_common::MindtraceError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Validation(msg) => mindtrace_common::MindtraceError::Validation(msg),
            AnalysisError::Classification(e) => e.into(),
            AnalysisError::Persistence(e) => e.into(),
        }
    }
}

/// Coordinates classification, risk banding, recommendation resolution,
/// best-effort explanation and the single store write for one submission.
pub struct AnalysisService {
    classifier: Arc<dyn Classifier>,
    explainer: Arc<dyn Explainer>,
    store: Arc<dyn AnalysisStore>,
    detection_threshold: f64,
}

impl AnalysisService {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        explainer: Arc<dyn Explainer>,
        store: Arc<dyn AnalysisStore>,
        detection_threshold: f64,
    ) -> Self {
        Self {
            classifier,
            explainer,
            store,
            detection_threshold,
        }
    }

    /// Run one full analysis. Exactly one store write on success, zero on
    /// any failure. Not idempotent: every call is a new journal entry.
    pub async fn analyze(
        &self,
        user_id: UserId,
        text: &str,
    ) -> Result<AnalyzeResponse, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::Validation("text must not be empty".into()));
        }

        let start = std::time::Instant::now();

        // Join A: both classifiers together, fail-together. Either failure
        // aborts the analysis before anything is persisted.
        let (sentiment, disorder) = tokio::try_join!(
            self.classifier.classify_sentiment(text),
            self.classifier.classify_disorder(text),
        )?;

        let banded = risk::band_risk(&disorder.label, disorder.confidence, self.detection_threshold);
        let suggestions = recommendations::resolve(&banded.effective_label, banded.tier);

        let alert = if banded.tier == RiskTier::High {
            tracing::warn!(user_id = %user_id, disorder = %banded.effective_label, "High risk detected");
            HIGH_RISK_ALERT
        } else {
            NO_ALERT
        };

        // Join B: explanations together, fail-independently. Failures are
        // already captured inside the explainer; nothing here can abort.
        let (sentiment_explanation, disorder_explanation) = tokio::join!(
            self.explainer.explain(text, ExplanationKind::Sentiment),
            self.explainer.explain(text, ExplanationKind::Disorder),
        );

        let record = self
            .store
            .insert_analysis(&NewAnalysis {
                user_id,
                text: text.to_string(),
                sentiment: sentiment.label,
                sentiment_confidence: sentiment.confidence,
                disorder: banded.effective_label,
                disorder_confidence: disorder.confidence,
                risk_level: banded.tier,
                recommendations: suggestions,
            })
            .await?;

        metrics::histogram!("analysis.latency").record(start.elapsed().as_secs_f64());
        metrics::counter!("analysis.completed", "risk" => record.risk_level.as_db_str())
            .increment(1);

        Ok(AnalyzeResponse {
            id: record.id,
            user_id: record.user_id,
            text: record.text,
            sentiment: record.sentiment,
            sentiment_confidence: record.sentiment_confidence,
            disorder: record.disorder,
            disorder_confidence: record.disorder_confidence,
            risk_level: record.risk_level,
            recommendations: record.recommendations,
            timestamp: record.timestamp,
            alert: alert.to_string(),
            explanations: ExplanationBundle {
                sentiment: sentiment_explanation,
                disorder: disorder_explanation,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mindtrace_common::ids::AnalysisId;
    use mindtrace_common::types::{
        AnalysisRecord, ClassificationResult, ExplanationOutcome, ExplanationResult,
        NO_DISORDER_LABEL,
    };

    /// Classifier stub: `None` for a slot means that call fails.
    struct MockClassifier {
        sentiment: Option<ClassificationResult>,
        disorder: Option<ClassificationResult>,
    }

    impl Classifier for MockClassifier {
        fn classify_sentiment<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<ClassificationResult, InferenceError>> + Send + 'a>>
        {
            let result = self
                .sentiment
                .clone()
                .ok_or_else(|| InferenceError::Http("sentiment endpoint down".into()));
            Box::pin(async move { result })
        }

        fn classify_disorder<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<ClassificationResult, InferenceError>> + Send + 'a>>
        {
            let result = self
                .disorder
                .clone()
                .ok_or_else(|| InferenceError::Http("disorder endpoint down".into()));
            Box::pin(async move { result })
        }
    }

    struct MockExplainer {
        fail: bool,
    }

    impl Explainer for MockExplainer {
        fn explain<'a>(
            &'a self,
            _text: &'a str,
            kind: ExplanationKind,
        ) -> Pin<Box<dyn Future<Output = ExplanationOutcome> + Send + 'a>> {
            let outcome = if self.fail {
                ExplanationOutcome::Failed {
                    error: "sidecar unreachable".into(),
                }
            } else {
                ExplanationOutcome::Ready(ExplanationResult {
                    predicted_label: kind.as_str().to_string(),
                    confidence: 90.0,
                    top_features: vec![],
                })
            };
            Box::pin(async move { outcome })
        }
    }

    /// Store stub counting writes.
    struct MockStore {
        writes: AtomicUsize,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl AnalysisStore for MockStore {
        fn insert_analysis<'a>(
            &'a self,
            new: &'a NewAnalysis,
        ) -> Pin<Box<dyn Future<Output = Result<AnalysisRecord, StoreError>> + Send + 'a>>
        {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let record = AnalysisRecord {
                id: AnalysisId::from_i64(1),
                user_id: new.user_id,
                text: new.text.clone(),
                sentiment: new.sentiment.clone(),
                sentiment_confidence: new.sentiment_confidence,
                disorder: new.disorder.clone(),
                disorder_confidence: new.disorder_confidence,
                risk_level: new.risk_level,
                recommendations: new.recommendations.clone(),
                timestamp: chrono::Utc::now(),
            };
            Box::pin(async move { Ok(record) })
        }
    }

    fn service(
        classifier: MockClassifier,
        explainer_fails: bool,
    ) -> (AnalysisService, Arc<MockStore>) {
        let store = Arc::new(MockStore::new());
        let svc = AnalysisService::new(
            Arc::new(classifier),
            Arc::new(MockExplainer {
                fail: explainer_fails,
            }),
            Arc::clone(&store) as Arc<dyn AnalysisStore>,
            risk::DEFAULT_DETECTION_THRESHOLD,
        );
        (svc, store)
    }

    fn positive() -> Option<ClassificationResult> {
        Some(ClassificationResult {
            label: "Positive".into(),
            confidence: 91.0,
        })
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_write() {
        let (svc, store) = service(
            MockClassifier {
                sentiment: positive(),
                disorder: positive(),
            },
            false,
        );

        let err = svc.analyze(UserId::from_i64(1), "   ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_classification_failure_aborts_without_write() {
        let (svc, store) = service(
            MockClassifier {
                sentiment: positive(),
                disorder: None,
            },
            false,
        );

        let err = svc
            .analyze(UserId::from_i64(1), "rough week")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Classification(_)));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_explanation_failure_does_not_block_persistence() {
        let (svc, store) = service(
            MockClassifier {
                sentiment: positive(),
                disorder: Some(ClassificationResult {
                    label: "Anxiety".into(),
                    confidence: 55.0,
                }),
            },
            true,
        );

        let response = svc
            .analyze(UserId::from_i64(7), "constant worry")
            .await
            .unwrap();

        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
        assert!(matches!(
            response.explanations.sentiment,
            ExplanationOutcome::Failed { .. }
        ));
        assert!(matches!(
            response.explanations.disorder,
            ExplanationOutcome::Failed { .. }
        ));
        assert_eq!(response.risk_level, RiskTier::Moderate);
    }

    #[tokio::test]
    async fn test_high_risk_fires_alert_and_targeted_recommendations() {
        let (svc, store) = service(
            MockClassifier {
                sentiment: Some(ClassificationResult {
                    label: "Negative".into(),
                    confidence: 88.0,
                }),
                disorder: Some(ClassificationResult {
                    label: "Depression".into(),
                    confidence: 82.0,
                }),
            },
            false,
        );

        let response = svc
            .analyze(UserId::from_i64(3), "everything feels hopeless")
            .await
            .unwrap();

        assert_eq!(response.risk_level, RiskTier::High);
        assert_eq!(response.alert, HIGH_RISK_ALERT);
        assert_eq!(response.disorder, "Depression");
        assert_eq!(
            response.recommendations,
            recommendations::resolve("Depression", RiskTier::High)
        );
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_below_threshold_reports_no_risk_and_fallback() {
        let (svc, _store) = service(
            MockClassifier {
                sentiment: positive(),
                disorder: Some(ClassificationResult {
                    label: "Anxiety".into(),
                    confidence: 20.0,
                }),
            },
            false,
        );

        let response = svc
            .analyze(UserId::from_i64(3), "a decent day overall")
            .await
            .unwrap();

        assert_eq!(response.risk_level, RiskTier::NoRisk);
        assert_eq!(response.disorder, NO_DISORDER_LABEL);
        assert_eq!(response.alert, NO_ALERT);
        assert_eq!(
            response.recommendations,
            vec![recommendations::FALLBACK_RECOMMENDATION.to_string()]
        );
    }
}
