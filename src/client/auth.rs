//! Authentication API

use super::resource::unwrap_envelope;
use super::transport::{ApiResponse, ApiResult, RequestScope, Transport};
use crate::domain::{AuthPayload, Identity, LoginInput, ProfileUpdate, RegisterInput};
use crate::error::ApiError;
use crate::state::session::AuthBackend;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

#[derive(Clone)]
pub struct AuthApi {
    transport: Transport,
}

impl AuthApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    async fn post_credentials<B>(&self, path: &str, body: &B) -> ApiResult<AuthPayload>
    where
        B: serde::Serialize + Sync,
    {
        let response = self
            .transport
            .execute(Method::POST, path, &RequestScope::Default, |b| b.json(body))
            .await?;
        let status = response.status;
        let payload: AuthPayload =
            serde_json::from_value(response.data).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(ApiResponse {
            data: payload,
            status,
        })
    }

    pub async fn login(&self, input: &LoginInput) -> ApiResult<AuthPayload> {
        self.post_credentials("/auth/login", input).await
    }

    pub async fn register(&self, input: &RegisterInput) -> ApiResult<AuthPayload> {
        self.post_credentials("/auth/register", input).await
    }

    /// The user behind the current bearer token
    pub async fn me(&self) -> ApiResult<Identity> {
        let response = self
            .transport
            .execute(Method::GET, "/auth/me", &RequestScope::Default, |b| b)
            .await?;
        unwrap_envelope(response, "user")
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<Identity> {
        let response = self
            .transport
            .execute(Method::PUT, "/auth/profile", &RequestScope::Default, |b| {
                b.json(update)
            })
            .await?;
        unwrap_envelope(response, "user")
    }

    pub async fn logout(&self) -> ApiResult<()> {
        let response = self
            .transport
            .execute(Method::POST, "/auth/logout", &RequestScope::Default, |b| {
                b.json(&Value::Null)
            })
            .await?;
        Ok(response.map(|_| ()))
    }
}

#[async_trait]
impl AuthBackend for AuthApi {
    async fn login(&self, input: &LoginInput) -> Result<AuthPayload, ApiError> {
        Ok(AuthApi::login(self, input).await?.data)
    }

    async fn register(&self, input: &RegisterInput) -> Result<AuthPayload, ApiError> {
        Ok(AuthApi::register(self, input).await?.data)
    }

    async fn current_user(&self) -> Result<Identity, ApiError> {
        Ok(self.me().await?.data)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Identity, ApiError> {
        Ok(AuthApi::update_profile(self, update).await?.data)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        AuthApi::logout(self).await.map(|_| ())
    }
}
