//! Application state for the warehouse labor API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{ConfigLoader, RatePolicy};
use crate::store::InMemoryStore;

/// Shared application state.
///
/// The rate policy is read-only after startup. The store sits behind a
/// read-write lock: analysis takes the read side, while provisioning and
/// manual edits take the write side for their whole batch.
#[derive(Clone)]
pub struct AppState {
    policy: Arc<RatePolicy>,
    store: Arc<RwLock<InMemoryStore>>,
}

impl AppState {
    /// Creates state from loaded configuration, seeding the store with the
    /// configured agency markup history.
    pub fn new(config: ConfigLoader) -> Self {
        let (policy, agencies) = config.into_parts();
        Self::with_store(policy, InMemoryStore::with_agencies(agencies))
    }

    /// Creates state around an existing store.
    pub fn with_store(policy: RatePolicy, store: InMemoryStore) -> Self {
        Self {
            policy: Arc::new(policy),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns the rate policy.
    pub fn policy(&self) -> &RatePolicy {
        &self.policy
    }

    /// Returns the shared store.
    pub fn store(&self) -> &RwLock<InMemoryStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Agency, AgencyMarkup};
    use crate::store::WageRateStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_new_seeds_agencies_into_store() {
        let mut agency = Agency::new("JJ Staffing");
        agency.add_markup(AgencyMarkup {
            markup: Decimal::new(27, 2),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        let state = AppState::new(ConfigLoader::from_parts(RatePolicy::default(), vec![agency]));

        let store = state.store().read().await;
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(store.agency_markup_as_of("JJ Staffing", date), Some(Decimal::new(27, 2)));
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let state = AppState::with_store(RatePolicy::default(), InMemoryStore::new());
        let clone = state.clone();

        clone
            .store()
            .write()
            .await
            .upsert_worker(crate::models::Worker::new("W1"))
            .unwrap();

        assert!(state.store().read().await.worker("W1").is_some());
    }
}
