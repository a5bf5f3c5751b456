//! reqwest-backed implementation of the profile service.

pub mod routes;

use std::time::Duration;

use async_trait::async_trait;
use log::info;
use persona_model::{Profile, ProfileId, ProfilePatch};
use reqwest::{Client, Response};

use crate::errors::ServiceError;
use crate::service::ProfileService;

/// Connection settings for [`ProfileApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server base URL, e.g. `"http://localhost:3000"`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the profile server
///
/// Speaks `GET /users/{id}` and `PATCH /users/{id}` with a JSON body of
/// editable fields, and maps HTTP outcomes onto [`ServiceError`].
#[derive(Debug, Clone)]
pub struct ProfileApi {
    client: Client,
    base_url: String,
}

impl ProfileApi {
    /// Create a new API client
    pub fn new(config: ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "[ProfileApi] Creating new API client with base URL: {}",
            config.base_url
        );

        Self {
            client,
            base_url: config.base_url,
        }
    }

    /// Build a full URL for a route path
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn item_url(&self, id: &ProfileId) -> String {
        self.build_url(&routes::utils::replace_param(
            routes::users::ITEM,
            "{id}",
            id.as_str(),
        ))
    }

    /// Map a settled response onto the authoritative profile.
    async fn read_profile(response: Response) -> Result<Profile, ServiceError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<Profile>()
                .await
                .map_err(|e| ServiceError::Message(e.to_string()))
        } else {
            Err(ServiceError::Status {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or_default()
                    .to_string(),
            })
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        ServiceError::Message(error.to_string())
    }
}

#[async_trait]
impl ProfileService for ProfileApi {
    async fn fetch_profile(
        &self,
        id: &ProfileId,
    ) -> Result<Profile, ServiceError> {
        let response = self.client.get(self.item_url(id)).send().await?;
        Self::read_profile(response).await
    }

    async fn patch_profile(
        &self,
        id: &ProfileId,
        patch: &ProfilePatch,
    ) -> Result<Profile, ServiceError> {
        let response = self
            .client
            .patch(self.item_url(id))
            .json(patch)
            .send()
            .await?;
        Self::read_profile(response).await
    }
}
