use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;

use mindtrace_engine::analysis::AnalysisService;
use mindtrace_engine::config;
use mindtrace_engine::explain::ExplanationClient;
use mindtrace_engine::inference::InferenceClient;
use mindtrace_engine::routes::{self, AppState};
use mindtrace_engine::store::StoreClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Mindtrace Engine starting");

    // Load configuration — fail loudly on misconfiguration.
    let config_dir = std::env::var("MINDTRACE_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let system_config = match config::load_config(&config_dir) {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration — refusing to start");
            std::process::exit(1);
        }
    };

    // Install Prometheus metrics recorder.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    // Open the database.
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://mindtrace.db?mode=rwc".into());

    let store = match StoreClient::connect(&database_url, 5).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open SQLite database");
            std::process::exit(1);
        }
    };

    if let Err(e) = store.migrate().await {
        tracing::error!(error = %e, "Failed to run SQLite migrations");
        std::process::exit(1);
    }

    let store = Arc::new(store);

    // Connect to the hosted classifiers; classification is the critical
    // path, so refuse to start if the handshake fails.
    let inference = Arc::new(InferenceClient::new(
        system_config.inference.clone(),
        system_config.retry.inference.clone(),
    ));

    if let Err(e) = inference.connect().await {
        tracing::error!(error = %e, "Failed to connect to hosted classifiers");
        std::process::exit(1);
    }

    // Explanation sidecar: best-effort, no handshake needed. Failures at
    // call time are captured into the response.
    let explainer = Arc::new(ExplanationClient::new(
        system_config.explanation.base_url.clone(),
        system_config.explanation.explain_timeout_ms,
    ));

    let analysis = AnalysisService::new(
        Arc::clone(&inference) as _,
        Arc::clone(&explainer) as _,
        Arc::clone(&store) as _,
        system_config.analysis.detection_threshold,
    );

    tracing::info!("Store and classifiers ready");

    // Build shared state.
    let state = Arc::new(AppState {
        analysis,
        store,
        inference,
        metrics_handle,
    });

    // Build HTTP server.
    let app = Router::new()
        .route("/analyze", post(routes::analyze_handler))
        .route("/results", get(routes::results_handler))
        .route("/results/{id}", delete(routes::delete_handler))
        .route("/risk-levels", get(routes::risk_levels_handler))
        .route("/trend", get(routes::trend_handler))
        .route("/suggestions", get(routes::suggestions_handler))
        .route("/health", get(routes::health_handler))
        .route("/metrics", get(routes::metrics_handler))
        .with_state(state);

    let port: u16 = std::env::var("ENGINE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "Mindtrace Engine listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}
