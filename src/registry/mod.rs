//! Chart repository access
//!
//! This module provides:
//! - IndexFetcher trait for downloading a repository's index.yaml
//! - HTTP client implementation on top of reqwest
//! - Repository index model and latest-version lookup
//! - Concurrent refresh of the local index cache

mod cache;
mod client;
mod index;

pub use cache::{refresh_all, RefreshOutcome, RefreshReport};
pub use client::HttpClient;
pub use index::{index_url, normalize_repository_name, ChartVersion, RepositoryIndex};

use crate::error::RepositoryError;
use async_trait::async_trait;

/// Trait for fetching repository indices
#[async_trait]
pub trait IndexFetcher: Send + Sync {
    /// Download the raw index.yaml body of a repository
    async fn fetch_index(&self, repository_url: &str) -> Result<String, RepositoryError>;
}
