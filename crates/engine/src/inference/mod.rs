mod gradio;
pub mod labels;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use mindtrace_common::api::explain::ExplanationKind;
use mindtrace_common::config::{InferenceConfig, RetryConfig};
use mindtrace_common::types::ClassificationResult;

/// Errors from the hosted classifier endpoints.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Inference HTTP error: {0}")]
    Http(String),

    #[error("Inference API error: {0}")]
    Api(String),

    #[error("Inference response parse error: {0}")]
    Parse(String),

    #[error("Inference timed out: {0}")]
    Timeout(String),

    #[error("Inference rate limited")]
    RateLimited,

    #[error("Classifier returned no usable prediction: {0}")]
    EmptyPrediction(String),

    #[error("Inference client used before connect()")]
    NotInitialized,
}

impl InferenceError {
    /// Whether this error should not be retried.
    fn is_non_retryable(&self) -> bool {
        matches!(
            self,
            InferenceError::NotInitialized | InferenceError::Timeout(_)
        )
    }
}

impl From<InferenceError> for mindtrace_common::MindtraceError {
    fn from(e: InferenceError) -> Self {
        mindtrace_common::MindtraceError::Inference(e.to_string())
    }
}

/// Client for the two hosted classifiers. Constructed once at process start
/// and shared; holds one HTTP connection pool for both endpoints.
pub struct InferenceClient {
    http: reqwest::Client,
    config: InferenceConfig,
    retry_config: RetryConfig,
    ready: AtomicBool,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig, retry_config: RetryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            retry_config,
            ready: AtomicBool::new(false),
        }
    }

    /// Handshake with both model endpoints. Classification before a
    /// successful connect returns `NotInitialized`.
    pub async fn connect(&self) -> Result<(), InferenceError> {
        tracing::info!(
            sentiment_url = %self.config.sentiment_url,
            disorder_url = %self.config.disorder_url,
            "Connecting to hosted classifiers"
        );

        gradio::handshake(&self.http, &self.config.sentiment_url).await?;
        gradio::handshake(&self.http, &self.config.disorder_url).await?;

        self.ready.store(true, Ordering::Release);
        tracing::info!("Classifier endpoints ready");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub async fn classify_sentiment(
        &self,
        text: &str,
    ) -> Result<ClassificationResult, InferenceError> {
        self.classify(ExplanationKind::Sentiment, text).await
    }

    pub async fn classify_disorder(
        &self,
        text: &str,
    ) -> Result<ClassificationResult, InferenceError> {
        self.classify(ExplanationKind::Disorder, text).await
    }

    /// Classify with bounded retry and exponential backoff.
    async fn classify(
        &self,
        kind: ExplanationKind,
        text: &str,
    ) -> Result<ClassificationResult, InferenceError> {
        if !self.is_ready() {
            return Err(InferenceError::NotInitialized);
        }

        let mut attempt = 0u32;
        let mut backoff_ms = self.retry_config.initial_backoff_ms;

        loop {
            attempt += 1;
            let result = self.classify_once(kind, text).await;

            match result {
                Ok(classification) => return Ok(classification),
                Err(ref e) if e.is_non_retryable() => {
                    metrics::counter!("inference.api.errors", "model" => kind.as_str())
                        .increment(1);
                    return result;
                }
                Err(e) => {
                    if attempt >= self.retry_config.max_attempts {
                        metrics::counter!("inference.api.errors", "model" => kind.as_str())
                            .increment(1);
                        return Err(e);
                    }
                    let jitter = if self.retry_config.jitter {
                        compute_jitter(attempt, backoff_ms)
                    } else {
                        0
                    };
                    let wait = backoff_ms + jitter;
                    tracing::warn!(
                        model = kind.as_str(),
                        attempt,
                        wait_ms = wait,
                        error = %e,
                        "Classifier call failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(wait)).await;
                    backoff_ms = (backoff_ms as f64 * self.retry_config.backoff_multiplier) as u64;
                    backoff_ms = backoff_ms.min(self.retry_config.max_backoff_ms);
                }
            }
        }
    }

    /// Single attempt against the endpoint for the given classifier.
    async fn classify_once(
        &self,
        kind: ExplanationKind,
        text: &str,
    ) -> Result<ClassificationResult, InferenceError> {
        let base_url = match kind {
            ExplanationKind::Sentiment => &self.config.sentiment_url,
            ExplanationKind::Disorder => &self.config.disorder_url,
        };
        let timeout = Duration::from_millis(self.config.classify_timeout_ms);

        let raw = gradio::send_predict(&self.http, base_url, kind.as_str(), timeout, text).await?;

        Ok(ClassificationResult {
            label: labels::human_label(kind, &raw.label),
            confidence: (raw.score * 100.0).clamp(0.0, 100.0),
        })
    }
}

/// Compute jitter for retry backoff using simple hash-based approach.
fn compute_jitter(attempt: u32, backoff_ms: u64) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::hash::DefaultHasher::new();
    attempt.hash(&mut hasher);
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos()
        .hash(&mut hasher);
    hasher.finish() % (backoff_ms / 2 + 1)
}

/// Object-safe trait for testability (dyn dispatch).
/// Tests provide mock classifiers; production uses InferenceClient.
pub trait Classifier: Send + Sync {
    fn classify_sentiment<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ClassificationResult, InferenceError>> + Send + 'a>>;

    fn classify_disorder<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ClassificationResult, InferenceError>> + Send + 'a>>;
}

impl Classifier for InferenceClient {
    fn classify_sentiment<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ClassificationResult, InferenceError>> + Send + 'a>>
    {
        Box::pin(self.classify_sentiment(text))
    }

    fn classify_disorder<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ClassificationResult, InferenceError>> + Send + 'a>>
    {
        Box::pin(self.classify_disorder(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindtrace_common::config::{InferenceConfig, RetryConfig};

    fn test_client() -> InferenceClient {
        InferenceClient::new(
            InferenceConfig {
                sentiment_url: "http://localhost:7860".into(),
                disorder_url: "http://localhost:7861".into(),
                classify_timeout_ms: 1000,
            },
            RetryConfig {
                max_attempts: 1,
                initial_backoff_ms: 10,
                max_backoff_ms: 100,
                backoff_multiplier: 2.0,
                jitter: false,
            },
        )
    }

    #[tokio::test]
    async fn test_classify_before_connect_is_not_initialized() {
        let client = test_client();
        let err = client.classify_sentiment("feeling fine").await.unwrap_err();
        assert!(matches!(err, InferenceError::NotInitialized));
    }

    #[test]
    fn test_timeout_is_non_retryable() {
        assert!(InferenceError::Timeout("x".into()).is_non_retryable());
        assert!(InferenceError::NotInitialized.is_non_retryable());
        assert!(!InferenceError::Http("x".into()).is_non_retryable());
        assert!(!InferenceError::RateLimited.is_non_retryable());
    }
}
