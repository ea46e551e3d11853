//! Feature flag provider

use crate::domain::FeatureFlagSet;
use crate::error::ApiError;
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};

/// Where the flag set comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlagSource: Send + Sync {
    async fn fetch_flags(&self) -> Result<FeatureFlagSet, ApiError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagState {
    pub flags: FeatureFlagSet,
    pub loaded: bool,
}

/// Read-only view of the flag set
#[derive(Debug, Clone)]
pub struct FlagHandle {
    rx: watch::Receiver<FlagState>,
}

impl FlagHandle {
    /// Unknown flags, and every flag before loading finishes, read as disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.rx.borrow().flags.is_enabled(name)
    }

    pub fn is_loaded(&self) -> bool {
        self.rx.borrow().loaded
    }

    pub fn snapshot(&self) -> FeatureFlagSet {
        self.rx.borrow().flags.clone()
    }
}

/// Owner of the flag set
pub struct FlagStore {
    tx: watch::Sender<FlagState>,
}

impl Default for FlagStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FlagState::default());
        Self { tx }
    }

    pub fn handle(&self) -> FlagHandle {
        FlagHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Fetch the flag set. On failure every flag stays disabled.
    pub async fn load<S>(&self, source: &S) -> FeatureFlagSet
    where
        S: FlagSource + ?Sized,
    {
        let flags = match source.fetch_flags().await {
            Ok(flags) => {
                info!(count = flags.len(), "feature flags loaded");
                flags
            }
            Err(e) => {
                warn!(error = %e, "failed to load feature flags, treating all as disabled");
                FeatureFlagSet::new()
            }
        };

        self.tx.send_replace(FlagState {
            flags: flags.clone(),
            loaded: true,
        });
        flags
    }

    /// Record a toggle the server has already accepted.
    pub fn set(&self, name: &str, enabled: bool) {
        self.tx.send_modify(|state| state.flags.set(name, enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QSTASH_FLAG;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_flags_disabled_before_load() {
        let store = FlagStore::new();
        let handle = store.handle();
        assert!(!handle.is_loaded());
        assert!(!handle.is_enabled(QSTASH_FLAG));
    }

    #[tokio::test]
    async fn test_load_publishes_flags() {
        let mut source = MockFlagSource::new();
        source
            .expect_fetch_flags()
            .times(1)
            .returning(|| Ok([(QSTASH_FLAG, true)].into_iter().collect()));

        let store = FlagStore::new();
        let handle = store.handle();
        store.load(&source).await;

        assert!(handle.is_loaded());
        assert!(handle.is_enabled(QSTASH_FLAG));
    }

    #[tokio::test]
    async fn test_load_failure_disables_everything() {
        let mut source = MockFlagSource::new();
        source.expect_fetch_flags().returning(|| {
            Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            })
        });

        let store = FlagStore::new();
        let flags = store.load(&source).await;
        assert!(flags.is_empty());
        assert!(store.handle().is_loaded());
    }

    #[tokio::test]
    async fn test_set_updates_readers() {
        let store = FlagStore::new();
        let handle = store.handle();
        store.set(QSTASH_FLAG, true);
        assert!(handle.is_enabled(QSTASH_FLAG));
        store.set(QSTASH_FLAG, false);
        assert!(!handle.snapshot().is_enabled(QSTASH_FLAG));
    }
}
