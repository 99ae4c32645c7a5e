//! Concurrent refresh of the local repository index cache
//!
//! Every distinct cache entry gets its own task. A task downloads the index,
//! checks that it parses and replaces the cached copy. Tasks do not print or
//! log; the coordinator reports every outcome after all of them finished.

use super::index::{normalize_repository_name, RepositoryIndex};
use super::IndexFetcher;
use crate::config::Settings;
use crate::error::RepositoryError;
use crate::manifest::write_atomic;
use futures::future::join_all;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of refreshing one repository
#[derive(Debug)]
pub struct RefreshOutcome {
    /// Repository URL as declared
    pub repository: String,
    /// Normalized name keying the cache file
    pub name: String,
    /// Cache file of the repository
    pub cache_path: PathBuf,
    /// Whether the cache file was refreshed
    pub result: Result<(), RepositoryError>,
}

impl RefreshOutcome {
    /// Returns true if the refresh succeeded
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of one refresh batch, in request order
#[derive(Debug, Default)]
pub struct RefreshReport {
    outcomes: Vec<RefreshOutcome>,
}

impl RefreshReport {
    /// All outcomes in request order
    pub fn outcomes(&self) -> &[RefreshOutcome] {
        &self.outcomes
    }

    /// Outcome for a repository, if it was part of the batch.
    ///
    /// URLs sharing a cache entry share one outcome.
    pub fn outcome(&self, repository: &str) -> Option<&RefreshOutcome> {
        let name = normalize_repository_name(repository);
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Returns true if the repository was refreshed in this batch
    pub fn is_available(&self, repository: &str) -> bool {
        self.outcome(repository).is_some_and(RefreshOutcome::is_success)
    }

    /// Repositories whose refresh succeeded
    pub fn succeeded(&self) -> impl Iterator<Item = &RefreshOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Repositories whose refresh failed
    pub fn failed(&self) -> impl Iterator<Item = &RefreshOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Number of repositories in the batch
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if the batch was empty
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Refresh the cached index of every repository concurrently.
///
/// URLs that map to the same cache file are refreshed once. Individual failures are recorded in
/// the report and never abort the batch.
pub async fn refresh_all(
    settings: &Settings,
    fetcher: Arc<dyn IndexFetcher>,
    repositories: &[String],
) -> RefreshReport {
    let mut distinct: Vec<(String, &String)> = Vec::new();
    for repository in repositories {
        let name = normalize_repository_name(repository);
        if distinct.iter().all(|(seen, _)| *seen != name) {
            distinct.push((name, repository));
        }
    }

    let handles: Vec<_> = distinct
        .iter()
        .map(|(name, repository)| {
            let fetcher = Arc::clone(&fetcher);
            let repository = (*repository).clone();
            let name = name.clone();
            let cache_path = settings.cache_index_path(&name);
            tokio::spawn(async move {
                let result = refresh_one(fetcher.as_ref(), &repository, &cache_path).await;
                RefreshOutcome {
                    repository,
                    name,
                    cache_path,
                    result,
                }
            })
        })
        .collect();

    let joined = join_all(handles).await;

    let outcomes: Vec<RefreshOutcome> = joined
        .into_iter()
        .zip(distinct)
        .map(|(joined, (name, repository))| {
            joined.unwrap_or_else(|e| RefreshOutcome {
                repository: repository.clone(),
                cache_path: settings.cache_index_path(&name),
                name,
                result: Err(RepositoryError::network_error(
                    repository.as_str(),
                    format!("refresh task failed: {}", e),
                )),
            })
        })
        .collect();

    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => info!("Successfully got an update from the {} chart repository", outcome.repository),
            Err(e) => warn!(
                "Unable to get an update from the {} chart repository: {}",
                outcome.repository, e
            ),
        }
    }

    RefreshReport { outcomes }
}

async fn refresh_one(
    fetcher: &dyn IndexFetcher,
    repository: &str,
    cache_path: &Path,
) -> Result<(), RepositoryError> {
    let body = fetcher.fetch_index(repository).await?;
    RepositoryIndex::parse(&body, repository)?;

    let cache_error = |source: std::io::Error| RepositoryError::CacheError {
        path: cache_path.to_path_buf(),
        source,
    };
    if let Some(dir) = cache_path.parent() {
        fs::create_dir_all(dir).map_err(cache_error)?;
    }
    write_atomic(cache_path, body.as_bytes()).map_err(cache_error)
}
