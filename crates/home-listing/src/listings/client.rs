//! HTTP client for the listing backend.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use super::domain::{AuthenticatedUser, CreateHomePayload};
use crate::config::ApiConfig;

/// Errors from the listing backend client.
#[derive(Debug, thiserror::Error)]
pub enum HomeApiError {
    /// The request itself failed (connection refused, DNS, TLS, ...).
    #[error("listing request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a body that is not JSON.
    #[error("listing backend returned a malformed body (HTTP {status})")]
    Malformed {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Backend operations used by the listing form.
#[async_trait]
pub trait HomeApi: Send + Sync {
    /// Issue the create request and return the parsed response body,
    /// whatever the HTTP status.
    async fn create_home(
        &self,
        user: &AuthenticatedUser,
        payload: &CreateHomePayload,
    ) -> Result<Value, HomeApiError>;
}

/// [`HomeApi`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHomeApi {
    client: reqwest::Client,
    host_url: String,
}

impl ReqwestHomeApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing client (shared connection pool).
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            host_url: config.host_url.clone(),
        }
    }

    pub fn create_url(&self) -> String {
        format!("{}/home", self.host_url)
    }
}

#[async_trait]
impl HomeApi for ReqwestHomeApi {
    async fn create_home(
        &self,
        user: &AuthenticatedUser,
        payload: &CreateHomePayload,
    ) -> Result<Value, HomeApiError> {
        let url = self.create_url();
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", user.token))
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "create home responded");

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| HomeApiError::Malformed {
            status: status.as_u16(),
            source,
        })
    }
}
