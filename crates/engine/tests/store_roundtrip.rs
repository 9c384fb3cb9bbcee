//! Store integration tests against in-memory SQLite.
//!
//! A single pool connection is required: every connection to
//! `sqlite::memory:` is a separate database.

use mindtrace_engine::store::StoreClient;

use mindtrace_common::ids::UserId;
use mindtrace_common::types::{NewAnalysis, RiskTier};

async fn setup() -> StoreClient {
    let store = StoreClient::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory SQLite");

    store.migrate().await.expect("Failed to run migrations");

    // Analyses reference a user; seed one (user management itself lives in
    // the auth layer, outside this service).
    sqlx::query("INSERT INTO users (username) VALUES ('test-user')")
        .execute(store.pool())
        .await
        .expect("Failed to seed user");

    store
}

fn sample(user_id: UserId, text: &str, tier: RiskTier) -> NewAnalysis {
    NewAnalysis {
        user_id,
        text: text.to_string(),
        sentiment: "Negative".into(),
        sentiment_confidence: 88.0,
        disorder: "Depression".into(),
        disorder_confidence: 82.0,
        risk_level: tier,
        recommendations: vec![
            "Reach out to a mental health professional as soon as possible.".into(),
            "Tell someone you trust how you are feeling today.".into(),
            "If you have thoughts of self-harm, contact a crisis line immediately.".into(),
        ],
    }
}

#[tokio::test]
async fn test_insert_assigns_id_and_timestamp() {
    let store = setup().await;
    let user = UserId::from_i64(1);

    let first = store
        .insert_analysis(&sample(user, "first entry", RiskTier::High))
        .await
        .unwrap();
    let second = store
        .insert_analysis(&sample(user, "second entry", RiskTier::Low))
        .await
        .unwrap();

    assert!(second.id.as_i64() > first.id.as_i64());
    assert!(second.timestamp >= first.timestamp);
}

#[tokio::test]
async fn test_recommendations_roundtrip_is_lossless() {
    let store = setup().await;
    let user = UserId::from_i64(1);

    let inserted = store
        .insert_analysis(&sample(user, "roundtrip", RiskTier::High))
        .await
        .unwrap();

    let listed = store.list_by_user(user).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].recommendations, inserted.recommendations);
    assert_eq!(listed[0].risk_level, RiskTier::High);
    assert_eq!(listed[0].id, inserted.id);
}

#[tokio::test]
async fn test_list_by_user_is_scoped_and_ascending() {
    let store = setup().await;

    sqlx::query("INSERT INTO users (username) VALUES ('other-user')")
        .execute(store.pool())
        .await
        .unwrap();

    let alice = UserId::from_i64(1);
    let bob = UserId::from_i64(2);

    store
        .insert_analysis(&sample(alice, "a1", RiskTier::Low))
        .await
        .unwrap();
    store
        .insert_analysis(&sample(bob, "b1", RiskTier::High))
        .await
        .unwrap();
    store
        .insert_analysis(&sample(alice, "a2", RiskTier::Moderate))
        .await
        .unwrap();

    let listed = store.list_by_user(alice).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].text, "a1");
    assert_eq!(listed[1].text, "a2");
    assert!(listed.iter().all(|r| r.user_id == alice));
}

#[tokio::test]
async fn test_risk_levels_are_most_recent_first() {
    let store = setup().await;
    let user = UserId::from_i64(1);

    store
        .insert_analysis(&sample(user, "older", RiskTier::Low))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store
        .insert_analysis(&sample(user, "newer", RiskTier::High))
        .await
        .unwrap();

    let points = store.list_risk_levels_by_user(user).await.unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].risk_level, RiskTier::High);
    assert_eq!(points[1].risk_level, RiskTier::Low);
}

#[tokio::test]
async fn test_trend_is_ascending_by_timestamp() {
    let store = setup().await;
    let user = UserId::from_i64(1);

    store
        .insert_analysis(&sample(user, "older", RiskTier::Low))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store
        .insert_analysis(&sample(user, "newer", RiskTier::High))
        .await
        .unwrap();

    let trend = store.list_trend_by_user(user).await.unwrap();
    assert_eq!(trend.len(), 2);
    assert!(trend[0].timestamp <= trend[1].timestamp);
    assert_eq!(trend[0].text, "older");
}

#[tokio::test]
async fn test_suggestions_skip_empty_lists() {
    let store = setup().await;
    let user = UserId::from_i64(1);

    let mut empty = sample(user, "no recs", RiskTier::NoRisk);
    empty.recommendations = vec![];
    store.insert_analysis(&empty).await.unwrap();

    store
        .insert_analysis(&sample(user, "with recs", RiskTier::High))
        .await
        .unwrap();

    let suggestions = store.list_suggestions_by_user(user).await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].recommendations.len(), 3);
}

#[tokio::test]
async fn test_delete_by_id_reports_existence() {
    let store = setup().await;
    let user = UserId::from_i64(1);

    let record = store
        .insert_analysis(&sample(user, "to delete", RiskTier::Low))
        .await
        .unwrap();

    assert!(store.delete_by_id(user, record.id).await.unwrap());
    // Second delete finds nothing.
    assert!(!store.delete_by_id(user, record.id).await.unwrap());
    assert!(store.list_by_user(user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_is_scoped_to_owner() {
    let store = setup().await;

    sqlx::query("INSERT INTO users (username) VALUES ('other-user')")
        .execute(store.pool())
        .await
        .unwrap();

    let alice = UserId::from_i64(1);
    let bob = UserId::from_i64(2);

    let record = store
        .insert_analysis(&sample(alice, "mine", RiskTier::Low))
        .await
        .unwrap();

    // Bob cannot delete Alice's record.
    assert!(!store.delete_by_id(bob, record.id).await.unwrap());
    assert_eq!(store.list_by_user(alice).await.unwrap().len(), 1);
}
