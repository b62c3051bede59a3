//! Content API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::ErrorResponse;
use crate::domain::entities::{Achievement, Project, ResumeLink};
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentPort;

/// Read-only client for the portfolio content API.
#[derive(Debug, Clone)]
pub struct ContentApiClient {
    client: Client,
    base_url: String,
}

impl ContentApiClient {
    /// Creates client for the API rooted at `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ContentError> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::NAME, crate::VERSION))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ContentError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ContentError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Requesting content");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to reach content API");
            if e.is_timeout() {
                ContentError::network("request timed out")
            } else if e.is_connect() {
                ContentError::network("failed to connect to content API")
            } else {
                ContentError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response.json::<T>().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse content response");
            ContentError::parse(e.to_string())
        })
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ContentError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {status}"),
        };
        ContentError::status(status.as_u16(), message)
    }
}

#[async_trait]
impl ContentPort for ContentApiClient {
    async fn list_achievements(&self) -> Result<Vec<Achievement>, ContentError> {
        self.get_json("achievements").await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ContentError> {
        self.get_json("projects").await
    }

    async fn resume(&self) -> Result<ResumeLink, ContentError> {
        self.get_json("resume").await
    }
}
