mod analyses;

use std::future::Future;
use std::pin::Pin;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use mindtrace_common::types::{AnalysisRecord, NewAnalysis};

/// SQLite client for the analysis store.
pub struct StoreClient {
    pool: SqlitePool,
}

impl StoreClient {
    /// Open the SQLite database and return a client with a connection pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        tracing::info!("Opening SQLite database");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let client = Self { pool };
        client.health_check().await?;
        tracing::info!("SQLite database open");

        Ok(client)
    }

    /// Verify the connection is alive.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running SQLite migrations");

        sqlx::migrate!("src/store/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        tracing::info!("SQLite migrations complete");
        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite connection error: {0}")]
    Connection(String),

    #[error("SQLite query error: {0}")]
    Query(String),

    #[error("SQLite migration error: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for mindtrace_common::MindtraceError {
    fn from(e: StoreError) -> Self {
        mindtrace_common::MindtraceError::Store(e.to_string())
    }
}

/// The one write path the orchestrator needs, object-safe so tests can
/// count writes with a mock.
pub trait AnalysisStore: Send + Sync {
    fn insert_analysis<'a>(
        &'a self,
        new: &'a NewAnalysis,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisRecord, StoreError>> + Send + 'a>>;
}

impl AnalysisStore for StoreClient {
    fn insert_analysis<'a>(
        &'a self,
        new: &'a NewAnalysis,
    ) -> Pin<Box<dyn Future<Output = Result<AnalysisRecord, StoreError>> + Send + 'a>> {
        Box::pin(self.insert_analysis(new))
    }
}
