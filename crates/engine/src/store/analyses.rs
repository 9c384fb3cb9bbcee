use chrono::Utc;

use mindtrace_common::api::analyze::SuggestionEntry;
use mindtrace_common::ids::{AnalysisId, UserId};
use mindtrace_common::types::{AnalysisRecord, NewAnalysis, RiskPoint, RiskTier};

use super::{StoreClient, StoreError};

impl StoreClient {
    /// Insert one analysis record. The id and timestamp are assigned here;
    /// the returned record is what a later read will yield.
    pub async fn insert_analysis(&self, new: &NewAnalysis) -> Result<AnalysisRecord, StoreError> {
        let recommendations_json = serde_json::to_string(&new.recommendations)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let timestamp = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO analyses (user_id, text, sentiment, sentiment_confidence,
                                  disorder, disorder_confidence, risk_level,
                                  recommendations, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.user_id.as_i64())
        .bind(&new.text)
        .bind(&new.sentiment)
        .bind(new.sentiment_confidence)
        .bind(&new.disorder)
        .bind(new.disorder_confidence)
        .bind(new.risk_level.as_db_str())
        .bind(&recommendations_json)
        .bind(timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(AnalysisRecord {
            id: AnalysisId::from_i64(result.last_insert_rowid()),
            user_id: new.user_id,
            text: new.text.clone(),
            sentiment: new.sentiment.clone(),
            sentiment_confidence: new.sentiment_confidence,
            disorder: new.disorder.clone(),
            disorder_confidence: new.disorder_confidence,
            risk_level: new.risk_level,
            recommendations: new.recommendations.clone(),
            timestamp,
        })
    }

    /// All of a user's analyses, ascending by id (insertion order).
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AnalysisRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, user_id, text, sentiment, sentiment_confidence,
                   disorder, disorder_confidence, risk_level, recommendations, timestamp
            FROM analyses
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Risk history for a user, most recent first.
    pub async fn list_risk_levels_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RiskPoint>, StoreError> {
        let rows = sqlx::query_as::<_, RiskPointRow>(
            r#"
            SELECT id, timestamp, risk_level, disorder
            FROM analyses
            WHERE user_id = ?
            ORDER BY timestamp DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| RiskPoint {
                id: AnalysisId::from_i64(row.id),
                timestamp: row.timestamp,
                risk_level: parse_risk_tier(&row.risk_level),
                disorder: row.disorder,
            })
            .collect())
    }

    /// Full records ascending by timestamp, for trend charting.
    pub async fn list_trend_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, user_id, text, sentiment, sentiment_confidence,
                   disorder, disorder_confidence, risk_level, recommendations, timestamp
            FROM analyses
            WHERE user_id = ?
            ORDER BY timestamp ASC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Records carrying a non-empty recommendation list, most recent first.
    pub async fn list_suggestions_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SuggestionEntry>, StoreError> {
        let rows = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, user_id, text, sentiment, sentiment_confidence,
                   disorder, disorder_confidence, risk_level, recommendations, timestamp
            FROM analyses
            WHERE user_id = ? AND recommendations != '[]'
            ORDER BY timestamp DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let record: AnalysisRecord = row.into();
                SuggestionEntry {
                    id: record.id,
                    timestamp: record.timestamp,
                    disorder: record.disorder,
                    risk_level: record.risk_level,
                    recommendations: record.recommendations,
                }
            })
            .collect())
    }

    /// Delete one record by id, scoped to its owner. Returns whether a row
    /// existed. Administrative path, not part of the main flow.
    pub async fn delete_by_id(
        &self,
        user_id: UserId,
        id: AnalysisId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM analyses WHERE id = ? AND user_id = ?")
            .bind(id.as_i64())
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal row type for sqlx deserialization.
#[derive(sqlx::FromRow)]
struct AnalysisRow {
    id: i64,
    user_id: i64,
    text: String,
    sentiment: String,
    sentiment_confidence: f64,
    disorder: String,
    disorder_confidence: f64,
    risk_level: String,
    recommendations: String,
    timestamp: chrono::DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RiskPointRow {
    id: i64,
    timestamp: chrono::DateTime<Utc>,
    risk_level: String,
    disorder: String,
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(row: AnalysisRow) -> Self {
        let recommendations = serde_json::from_str(&row.recommendations).unwrap_or_else(|e| {
            tracing::warn!(id = row.id, error = %e, "Unreadable recommendations column");
            Vec::new()
        });

        Self {
            id: AnalysisId::from_i64(row.id),
            user_id: UserId::from_i64(row.user_id),
            text: row.text,
            sentiment: row.sentiment,
            sentiment_confidence: row.sentiment_confidence,
            disorder: row.disorder,
            disorder_confidence: row.disorder_confidence,
            risk_level: parse_risk_tier(&row.risk_level),
            recommendations,
            timestamp: row.timestamp,
        }
    }
}

fn parse_risk_tier(s: &str) -> RiskTier {
    match s {
        "No Risk" => RiskTier::NoRisk,
        "Low Risk" => RiskTier::Low,
        "Moderate Risk" => RiskTier::Moderate,
        "High Risk" => RiskTier::High,
        other => {
            tracing::warn!(risk_level = other, "Unknown risk level, defaulting to No Risk");
            RiskTier::NoRisk
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_tier_db_roundtrip() {
        for tier in [
            RiskTier::NoRisk,
            RiskTier::Low,
            RiskTier::Moderate,
            RiskTier::High,
        ] {
            assert_eq!(parse_risk_tier(tier.as_db_str()), tier);
        }
    }

    #[test]
    fn test_unknown_risk_string_defaults_to_no_risk() {
        assert_eq!(parse_risk_tier("Extreme"), RiskTier::NoRisk);
    }
}
