use crate::models::SubscriptionPlan;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading subscriptions
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid plan data: {0}")]
    InvalidData(String),
}

/// Read access to subscription plans and user subscriptions
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// The plan of the user's active subscription, if any
    async fn active_plan(&self, user_id: &str) -> Result<Option<SubscriptionPlan>, StoreError>;

    /// All plans on offer
    async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, StoreError>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// PostgreSQL-backed subscription store
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Connect and run migrations (which also seed the default plans)
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }
}

fn plan_from_row(row: &sqlx::postgres::PgRow) -> Result<SubscriptionPlan, StoreError> {
    let max_matches: i32 = row.try_get("max_matches")?;
    let max_matches = usize::try_from(max_matches)
        .map_err(|_| StoreError::InvalidData(format!("negative max_matches {}", max_matches)))?;
    let features: String = row.try_get("features")?;

    Ok(SubscriptionPlan {
        name: row.try_get("name")?,
        max_matches,
        price_cents: row.try_get("price_cents")?,
        features: features
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn active_plan(&self, user_id: &str) -> Result<Option<SubscriptionPlan>, StoreError> {
        let query = r#"
            SELECT p.name, p.max_matches, p.price_cents, p.features
            FROM user_subscriptions s
            JOIN subscription_plans p ON p.id = s.plan_id
            WHERE s.user_id = $1
              AND s.is_active
              AND (s.end_date IS NULL OR s.end_date > NOW())
            ORDER BY s.start_date DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(plan_from_row).transpose()
    }

    async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, StoreError> {
        let query = r#"
            SELECT name, max_matches, price_cents, features
            FROM subscription_plans
            ORDER BY price_cents ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        rows.iter().map(plan_from_row).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}

/// In-memory store, used when no database is configured
#[derive(Debug, Clone)]
pub struct InMemorySubscriptionStore {
    plans: Vec<SubscriptionPlan>,
    active: HashMap<String, SubscriptionPlan>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self {
            plans: SubscriptionPlan::catalogue(),
            active: HashMap::new(),
        }
    }

    pub fn with_subscription(mut self, user_id: impl Into<String>, plan: SubscriptionPlan) -> Self {
        self.active.insert(user_id.into(), plan);
        self
    }
}

impl Default for InMemorySubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn active_plan(&self, user_id: &str) -> Result<Option<SubscriptionPlan>, StoreError> {
        Ok(self.active.get(user_id).cloned())
    }

    async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>, StoreError> {
        Ok(self.plans.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let store = InMemorySubscriptionStore::new().with_subscription("alice", SubscriptionPlan::premium());

        let plan = store.active_plan("alice").await.unwrap();
        assert_eq!(plan.map(|p| p.max_matches), Some(30));
        assert!(store.active_plan("bob").await.unwrap().is_none());
        assert_eq!(store.list_plans().await.unwrap().len(), 3);
    }
}
