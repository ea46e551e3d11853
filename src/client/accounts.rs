//! Accounts API

use super::resource::{Resource, ResourceClient, NO_QUERY};
use super::transport::{ApiResult, RequestScope, Transport};
use crate::domain::{Account, AccountId, AccountInput};

pub struct Accounts;

impl Resource for Accounts {
    const PATH: &'static str = "/accounts";
    const ITEM_KEY: &'static str = "account";
    const LIST_KEY: &'static str = "accounts";

    type Item = Account;
    type Input = AccountInput;
}

#[derive(Clone)]
pub struct AccountsApi {
    inner: ResourceClient<Accounts>,
}

impl AccountsApi {
    pub fn new(transport: Transport) -> Self {
        Self {
            inner: ResourceClient::new(transport),
        }
    }

    /// Accounts the caller belongs to
    pub async fn list(&self) -> ApiResult<Vec<Account>> {
        self.inner.list(&RequestScope::Default, &NO_QUERY).await
    }

    /// Accounts visible from inside another account (e.g. its sub-accounts)
    pub async fn list_in_account(&self, account_id: &AccountId) -> ApiResult<Vec<Account>> {
        self.inner
            .list(&RequestScope::Account(account_id.clone()), &NO_QUERY)
            .await
    }

    pub async fn get(&self, id: &AccountId) -> ApiResult<Account> {
        self.inner.get(&RequestScope::Default, id.as_str()).await
    }

    pub async fn get_in_account(
        &self,
        account_id: &AccountId,
        id: &AccountId,
    ) -> ApiResult<Account> {
        self.inner
            .get(&RequestScope::Account(account_id.clone()), id.as_str())
            .await
    }

    pub async fn create(&self, input: &AccountInput) -> ApiResult<Account> {
        self.inner.create(&RequestScope::Default, input).await
    }

    pub async fn create_in_account(
        &self,
        account_id: &AccountId,
        input: &AccountInput,
    ) -> ApiResult<Account> {
        self.inner
            .create(&RequestScope::Account(account_id.clone()), input)
            .await
    }

    pub async fn update(&self, id: &AccountId, input: &AccountInput) -> ApiResult<Account> {
        self.inner
            .update(&RequestScope::Default, id.as_str(), input)
            .await
    }

    pub async fn update_in_account(
        &self,
        account_id: &AccountId,
        id: &AccountId,
        input: &AccountInput,
    ) -> ApiResult<Account> {
        self.inner
            .update(&RequestScope::Account(account_id.clone()), id.as_str(), input)
            .await
    }

    pub async fn delete(&self, id: &AccountId) -> ApiResult<()> {
        self.inner.delete(&RequestScope::Default, id.as_str()).await
    }

    pub async fn delete_in_account(&self, account_id: &AccountId, id: &AccountId) -> ApiResult<()> {
        self.inner
            .delete(&RequestScope::Account(account_id.clone()), id.as_str())
            .await
    }
}
