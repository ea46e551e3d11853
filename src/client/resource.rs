//! Generic CRUD client over a REST collection
//!
//! Every operation takes an explicit [`RequestScope`]; the typed APIs expose
//! a default-context method and an `*_in_account` method on top of it, so
//! both variants share one request path and differ only in scoping.

use super::transport::{segment, ApiResponse, ApiResult, RequestScope, Transport};
use crate::error::ApiError;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// A REST collection such as `/notes`
pub trait Resource {
    /// Collection path
    const PATH: &'static str;
    /// Envelope key of a single item (`{"note": {...}}`)
    const ITEM_KEY: &'static str;
    /// Envelope key of a list (`{"notes": [...]}`)
    const LIST_KEY: &'static str;

    type Item: DeserializeOwned;
    type Input: Serialize + Sync;
}

/// Query for list calls without filters
pub const NO_QUERY: [(&str, &str); 0] = [];

pub struct ResourceClient<R> {
    transport: Transport,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, segment(id))
    }

    pub async fn list<Q>(&self, scope: &RequestScope, query: &Q) -> ApiResult<Vec<R::Item>>
    where
        Q: Serialize + Sync + ?Sized,
    {
        let response = self
            .transport
            .execute(Method::GET, R::PATH, scope, |b| b.query(query))
            .await?;
        unwrap_envelope(response, R::LIST_KEY)
    }

    pub async fn get(&self, scope: &RequestScope, id: &str) -> ApiResult<R::Item> {
        let response = self
            .transport
            .execute(Method::GET, &Self::item_path(id), scope, |b| b)
            .await?;
        unwrap_envelope(response, R::ITEM_KEY)
    }

    pub async fn create(&self, scope: &RequestScope, input: &R::Input) -> ApiResult<R::Item> {
        let response = self
            .transport
            .execute(Method::POST, R::PATH, scope, |b| b.json(input))
            .await?;
        unwrap_envelope(response, R::ITEM_KEY)
    }

    pub async fn update(
        &self,
        scope: &RequestScope,
        id: &str,
        input: &R::Input,
    ) -> ApiResult<R::Item> {
        let response = self
            .transport
            .execute(Method::PUT, &Self::item_path(id), scope, |b| b.json(input))
            .await?;
        unwrap_envelope(response, R::ITEM_KEY)
    }

    pub async fn delete(&self, scope: &RequestScope, id: &str) -> ApiResult<()> {
        let response = self
            .transport
            .execute(Method::DELETE, &Self::item_path(id), scope, |b| b)
            .await?;
        Ok(response.map(|_| ()))
    }
}

/// Pull `key` out of a JSON object body and decode it.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
    response: ApiResponse<Value>,
    key: &str,
) -> ApiResult<T> {
    let status = response.status;
    let inner = match response.data {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| ApiError::Decode(format!("missing `{}` in response", key)))?,
        other => {
            return Err(ApiError::Decode(format!(
                "expected object with `{}`, got {}",
                key, other
            )))
        }
    };

    let data = serde_json::from_value(inner).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(ApiResponse { data, status })
}
