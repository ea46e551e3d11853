//! Feature flag API

use super::resource::unwrap_envelope;
use super::transport::{segment, ApiResult, RequestScope, Transport};
use crate::domain::{FeatureFlag, FeatureFlagSet};
use crate::error::ApiError;
use crate::state::flags::FlagSource;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

#[derive(Clone)]
pub struct FlagsApi {
    transport: Transport,
}

impl FlagsApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ApiResult<Vec<FeatureFlag>> {
        let response = self
            .transport
            .execute(Method::GET, "/feature-flags", &RequestScope::Default, |b| b)
            .await?;
        unwrap_envelope(response, "flags")
    }

    /// Toggle a flag (super-admin only on the server side)
    pub async fn set_enabled(&self, name: &str, enabled: bool) -> ApiResult<FeatureFlag> {
        let path = format!("/feature-flags/{}", segment(name));
        let response = self
            .transport
            .execute(Method::PUT, &path, &RequestScope::Default, |b| {
                b.json(&json!({ "enabled": enabled }))
            })
            .await?;
        unwrap_envelope(response, "flag")
    }
}

#[async_trait]
impl FlagSource for FlagsApi {
    async fn fetch_flags(&self) -> Result<FeatureFlagSet, ApiError> {
        Ok(FeatureFlagSet::from(self.list().await?.data))
    }
}
