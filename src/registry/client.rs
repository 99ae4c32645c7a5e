//! HTTP client for chart repositories
//!
//! One GET per repository index. There is no retry and no request timeout;
//! a failed download is reported to the caller immediately.

use super::index::index_url;
use super::IndexFetcher;
use crate::config::DEFAULT_USER_AGENT;
use crate::error::RepositoryError;
use async_trait::async_trait;
use reqwest::Client;

/// HTTP client wrapper used to download repository indices
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the default User-Agent
    pub fn new() -> Result<Self, RepositoryError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom User-Agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RepositoryError::network_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and return the body as text
    pub async fn get_text(&self, url: &str) -> Result<String, RepositoryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RepositoryError::network_error(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepositoryError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| RepositoryError::network_error(url, format!("failed to read body: {}", e)))
    }
}

#[async_trait]
impl IndexFetcher for HttpClient {
    async fn fetch_index(&self, repository_url: &str) -> Result<String, RepositoryError> {
        self.get_text(&index_url(repository_url)).await
    }
}
