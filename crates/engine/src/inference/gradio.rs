use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::InferenceError;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PredictRequest<'a> {
    data: [&'a str; 1],
}

#[derive(Deserialize)]
struct PredictResponse {
    data: Vec<PredictPayload>,
}

#[derive(Deserialize)]
struct PredictPayload {
    #[allow(dead_code)]
    label: String,
    #[serde(default)]
    confidences: Vec<PredictConfidence>,
}

#[derive(Deserialize)]
struct PredictConfidence {
    label: String,
    confidence: f64,
}

/// Top-scoring machine label and its score in [0, 1], before label mapping
/// and confidence rescaling.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPrediction {
    pub label: String,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

fn from_wire_response(resp: PredictResponse) -> Result<RawPrediction, InferenceError> {
    let payload = resp
        .data
        .into_iter()
        .next()
        .ok_or_else(|| InferenceError::EmptyPrediction("response carried no data".into()))?;

    let top = payload
        .confidences
        .into_iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .ok_or_else(|| InferenceError::EmptyPrediction("prediction carried no scores".into()))?;

    Ok(RawPrediction {
        label: top.label,
        score: top.confidence,
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Verify a hosted model endpoint is reachable and serving its app config.
pub async fn handshake(http: &reqwest::Client, base_url: &str) -> Result<(), InferenceError> {
    let response = http
        .get(format!("{}/config", base_url))
        .send()
        .await
        .map_err(|e| InferenceError::Http(e.to_string()))?;

    if !response.status().is_success() {
        return Err(InferenceError::Api(format!(
            "handshake with {} failed: {}",
            base_url,
            response.status()
        )));
    }

    Ok(())
}

/// Send one text through a hosted classifier and return its top prediction.
pub async fn send_predict(
    http: &reqwest::Client,
    base_url: &str,
    model: &str,
    timeout: Duration,
    text: &str,
) -> Result<RawPrediction, InferenceError> {
    let start = std::time::Instant::now();

    let response = http
        .post(format!("{}/run/predict", base_url))
        .timeout(timeout)
        .json(&PredictRequest { data: [text] })
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout(format!("{} did not answer in time", model))
            } else {
                InferenceError::Http(e.to_string())
            }
        })?;

    let status = response.status();
    let latency = start.elapsed().as_secs_f64();
    metrics::histogram!("inference.api.latency", "model" => model.to_string()).record(latency);

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(InferenceError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(InferenceError::Api(format!("{}: {}", status, body)));
    }

    let body: PredictResponse = response
        .json()
        .await
        .map_err(|e| InferenceError::Parse(format!("Failed to parse model response: {}", e)))?;

    from_wire_response(body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
