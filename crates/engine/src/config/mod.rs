use std::path::{Path, PathBuf};

use mindtrace_common::config::SystemConfig;

/// Load and validate system.toml from the given config directory.
///
/// Fails loudly with clear error messages if anything is misconfigured.
/// The engine refuses to start on validation failure.
pub fn load_config(config_dir: &Path) -> Result<SystemConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let system_path = config_dir.join("system.toml");
    let content = std::fs::read_to_string(&system_path).map_err(|e| ConfigError::FileRead {
        path: system_path.clone(),
        source: e,
    })?;

    let config: SystemConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: system_path,
        detail: e.to_string(),
    })?;

    validate(&config)?;

    tracing::info!(
        detection_threshold = config.analysis.detection_threshold,
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn validate(config: &SystemConfig) -> Result<(), ConfigError> {
    if config.inference.sentiment_url.is_empty() || config.inference.disorder_url.is_empty() {
        return Err(ConfigError::Validation(
            "inference.sentiment_url and inference.disorder_url must be set".into(),
        ));
    }

    if config.explanation.base_url.is_empty() {
        return Err(ConfigError::Validation(
            "explanation.base_url must be set".into(),
        ));
    }

    if config.inference.classify_timeout_ms == 0 || config.explanation.explain_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeouts must be greater than zero".into(),
        ));
    }

    let threshold = config.analysis.detection_threshold;
    if !(0.0..=100.0).contains(&threshold) {
        return Err(ConfigError::Validation(format!(
            "analysis.detection_threshold must be in [0, 100], got {}",
            threshold
        )));
    }

    let retry = &config.retry.inference;
    if retry.max_attempts == 0 {
        return Err(ConfigError::Validation(
            "retry.inference.max_attempts must be at least 1".into(),
        ));
    }
    if retry.backoff_multiplier < 1.0 {
        return Err(ConfigError::Validation(
            "retry.inference.backoff_multiplier must be >= 1.0".into(),
        ));
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
