//! Blog API. Posts are addressed by slug.

use super::resource::{Resource, ResourceClient};
use super::transport::{ApiResult, RequestScope, Transport};
use crate::domain::{AccountId, BlogPost, BlogPostInput, BlogQuery};

pub struct BlogPosts;

impl Resource for BlogPosts {
    const PATH: &'static str = "/blog/posts";
    const ITEM_KEY: &'static str = "post";
    const LIST_KEY: &'static str = "posts";

    type Item = BlogPost;
    type Input = BlogPostInput;
}

#[derive(Clone)]
pub struct BlogApi {
    inner: ResourceClient<BlogPosts>,
}

impl BlogApi {
    pub fn new(transport: Transport) -> Self {
        Self {
            inner: ResourceClient::new(transport),
        }
    }

    /// Public listing: published posts only
    pub async fn list_published(&self) -> ApiResult<Vec<BlogPost>> {
        let query = BlogQuery {
            published: Some(true),
            ..Default::default()
        };
        self.inner.list(&RequestScope::Default, &query).await
    }

    pub async fn list(&self, query: &BlogQuery) -> ApiResult<Vec<BlogPost>> {
        self.inner.list(&RequestScope::Default, query).await
    }

    pub async fn list_in_account(
        &self,
        account_id: &AccountId,
        query: &BlogQuery,
    ) -> ApiResult<Vec<BlogPost>> {
        self.inner
            .list(&RequestScope::Account(account_id.clone()), query)
            .await
    }

    pub async fn get(&self, slug: &str) -> ApiResult<BlogPost> {
        self.inner.get(&RequestScope::Default, slug).await
    }

    pub async fn get_in_account(&self, account_id: &AccountId, slug: &str) -> ApiResult<BlogPost> {
        self.inner
            .get(&RequestScope::Account(account_id.clone()), slug)
            .await
    }

    pub async fn create(&self, input: &BlogPostInput) -> ApiResult<BlogPost> {
        self.inner.create(&RequestScope::Default, input).await
    }

    pub async fn create_in_account(
        &self,
        account_id: &AccountId,
        input: &BlogPostInput,
    ) -> ApiResult<BlogPost> {
        self.inner
            .create(&RequestScope::Account(account_id.clone()), input)
            .await
    }

    pub async fn update(&self, slug: &str, input: &BlogPostInput) -> ApiResult<BlogPost> {
        self.inner.update(&RequestScope::Default, slug, input).await
    }

    pub async fn update_in_account(
        &self,
        account_id: &AccountId,
        slug: &str,
        input: &BlogPostInput,
    ) -> ApiResult<BlogPost> {
        self.inner
            .update(&RequestScope::Account(account_id.clone()), slug, input)
            .await
    }

    pub async fn delete(&self, slug: &str) -> ApiResult<()> {
        self.inner.delete(&RequestScope::Default, slug).await
    }

    pub async fn delete_in_account(&self, account_id: &AccountId, slug: &str) -> ApiResult<()> {
        self.inner
            .delete(&RequestScope::Account(account_id.clone()), slug)
            .await
    }
}
