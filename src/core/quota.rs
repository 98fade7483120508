use crate::services::SubscriptionStore;
use std::sync::Arc;

/// Match ceiling for callers without an active subscription
pub const FREE_TIER_MAX_MATCHES: usize = 10;

/// Resolves how many matches a caller may receive
#[derive(Clone)]
pub struct QuotaResolver {
    store: Arc<dyn SubscriptionStore>,
    default_max_matches: usize,
}

impl QuotaResolver {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            store,
            default_max_matches: FREE_TIER_MAX_MATCHES,
        }
    }

    pub fn with_default(mut self, default_max_matches: usize) -> Self {
        self.default_max_matches = default_max_matches.max(1);
        self
    }

    /// The active plan's ceiling, or the free-tier default
    ///
    /// A store failure is logged and treated like "no subscription".
    pub async fn max_matches(&self, user_id: &str) -> usize {
        match self.store.active_plan(user_id).await {
            Ok(Some(plan)) => {
                tracing::debug!("User {} is on plan {} ({} matches)", user_id, plan.name, plan.max_matches);
                plan.max_matches
            }
            Ok(None) => self.default_max_matches,
            Err(e) => {
                tracing::warn!("Subscription lookup failed for {}, using free tier: {}", user_id, e);
                self.default_max_matches
            }
        }
    }
}
