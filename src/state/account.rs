//! Active account context

use crate::client::transport::RequestScope;
use crate::domain::Account;
use tokio::sync::watch;
use tracing::debug;

/// Read-only view of the active account
#[derive(Debug, Clone)]
pub struct AccountHandle {
    rx: watch::Receiver<Option<Account>>,
}

impl AccountHandle {
    pub fn current(&self) -> Option<Account> {
        self.rx.borrow().clone()
    }

    /// Scope a page should use for its next request
    pub fn scope(&self) -> RequestScope {
        RequestScope::from(self.rx.borrow().as_ref().map(|a| &a.id))
    }
}

/// Owner of the active account selection
pub struct AccountContextStore {
    tx: watch::Sender<Option<Account>>,
}

impl Default for AccountContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountContextStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn handle(&self) -> AccountHandle {
        AccountHandle {
            rx: self.tx.subscribe(),
        }
    }

    pub fn select(&self, account: Account) {
        debug!(account_id = %account.id, "account context selected");
        self.tx.send_replace(Some(account));
    }

    /// Back to the caller's default context
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    pub fn current(&self) -> Option<Account> {
        self.tx.borrow().clone()
    }

    pub fn scope(&self) -> RequestScope {
        RequestScope::from(self.tx.borrow().as_ref().map(|a| &a.id))
    }
}
