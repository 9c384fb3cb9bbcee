use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;

use mindtrace_common::api::analyze::{
    AnalyzeRequest, AnalyzeResponse, DeleteResponse, ResultsResponse, RiskLevelsResponse,
    SuggestionsResponse, TrendResponse,
};
use mindtrace_common::ids::{AnalysisId, UserId};
use mindtrace_common::MindtraceError;

use crate::analysis::AnalysisService;
use crate::inference::InferenceClient;
use crate::store::StoreClient;

/// Shared application state accessible from axum handlers.
pub struct AppState {
    pub analysis: AnalysisService,
    pub store: Arc<StoreClient>,
    pub inference: Arc<InferenceClient>,
    pub metrics_handle: PrometheusHandle,
}

/// Resolve the caller from the `x-user-id` header set by the upstream
/// session layer. The value is trusted unconditionally; auth itself lives
/// outside this service.
fn caller(headers: &HeaderMap) -> Result<UserId, (StatusCode, String)> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .map(UserId::from_i64)
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "missing or invalid x-user-id header".to_string(),
        ))
}

fn internal_error(detail: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!(error = %detail, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Analysis service error. Please try again.".to_string(),
    )
}

/// POST /analyze — run one full analysis and persist the record.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let user_id = caller(&headers)?;

    match state.analysis.analyze(user_id, &request.text).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let error: MindtraceError = e.into();
            match error {
                MindtraceError::Validation(msg) => Err((StatusCode::BAD_REQUEST, msg)),
                other => {
                    if other.is_hard_dependency() {
                        metrics::counter!("analysis.errors").increment(1);
                    }
                    Err(internal_error(other))
                }
            }
        }
    }
}

/// GET /results — all of the caller's analyses, insertion order.
pub async fn results_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ResultsResponse>, (StatusCode, String)> {
    let user_id = caller(&headers)?;

    let analyses = state
        .store
        .list_by_user(user_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ResultsResponse {
        user_id,
        count: analyses.len(),
        analyses,
    }))
}

/// GET /risk-levels — risk history, most recent first.
pub async fn risk_levels_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RiskLevelsResponse>, (StatusCode, String)> {
    let user_id = caller(&headers)?;

    let risk_levels = state
        .store
        .list_risk_levels_by_user(user_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(RiskLevelsResponse {
        user_id,
        count: risk_levels.len(),
        risk_levels,
    }))
}

/// GET /trend — chart-ready records ascending by timestamp.
pub async fn trend_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TrendResponse>, (StatusCode, String)> {
    let user_id = caller(&headers)?;

    let trend_data = state
        .store
        .list_trend_by_user(user_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(TrendResponse {
        user_id,
        count: trend_data.len(),
        trend_data,
    }))
}

/// GET /suggestions — stored recommendation sets, most recent first.
pub async fn suggestions_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SuggestionsResponse>, (StatusCode, String)> {
    let user_id = caller(&headers)?;

    let suggestions = state
        .store
        .list_suggestions_by_user(user_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(SuggestionsResponse {
        user_id,
        count: suggestions.len(),
        suggestions,
    }))
}

/// DELETE /results/{id} — administrative removal of one record.
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, (StatusCode, String)> {
    let user_id = caller(&headers)?;
    let id = AnalysisId::from_i64(id);

    let deleted = state
        .store
        .delete_by_id(user_id, id)
        .await
        .map_err(internal_error)?;

    Ok(Json(DeleteResponse { id, deleted }))
}

/// Health check endpoint: store connectivity plus classifier readiness.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store_ok = state.store.health_check().await.is_ok();
    let inference_ok = state.inference.is_ready();

    let all_healthy = store_ok && inference_ok;

    let status = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = serde_json::json!({
        "status": if all_healthy { "healthy" } else { "unhealthy" },
        "services": {
            "store": if store_ok { "healthy" } else { "unhealthy" },
            "inference": if inference_ok { "healthy" } else { "unhealthy" },
        }
    });

    (status, Json(body))
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
