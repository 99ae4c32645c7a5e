//! Dependency resolution
//!
//! This module provides:
//! - Repository filter built from CLI args
//! - Resolver that refreshes indices and finds outdated dependencies
//!
//! Resolution is a sequential pipeline with one concurrent step, the index
//! refresh batch. Problems with a single dependency never abort the run;
//! they are recorded as skips and logged.

mod filter;

pub use filter::RepositoryFilter;

use crate::config::Settings;
use crate::domain::{
    sort_outdated, Dependency, OutdatedDependency, SkipReason, SkippedDependency,
};
use crate::error::{ChartError, RepositoryError};
use crate::manifest::load_requirements;
use crate::progress::Progress;
use crate::registry::{normalize_repository_name, refresh_all, IndexFetcher, RefreshReport, RepositoryIndex};
use crate::version;
use semver::Version;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of resolving one chart
#[derive(Debug, Default)]
pub struct Resolution {
    /// Whether the chart has a requirements file
    pub has_requirements: bool,
    /// Number of declared dependencies
    pub declared: usize,
    /// Number of local (file://) dependencies left out
    pub local: usize,
    /// Number of dependencies dropped by the repository filter
    pub filtered: usize,
    /// Number of resolved dependencies already at the latest version
    pub up_to_date: usize,
    /// Outdated dependencies, sorted by name
    pub outdated: Vec<OutdatedDependency>,
    /// Dependencies that could not be resolved
    pub skipped: Vec<SkippedDependency>,
    /// Per-repository refresh outcomes
    pub refresh: RefreshReport,
}

impl Resolution {
    /// Resolution of a chart without requirements
    pub fn without_requirements() -> Self {
        Self::default()
    }

    /// Returns true if any dependency is outdated
    pub fn has_outdated(&self) -> bool {
        !self.outdated.is_empty()
    }
}

/// Finds the outdated dependencies of a chart
pub struct Resolver<'a> {
    settings: &'a Settings,
    fetcher: Arc<dyn IndexFetcher>,
    filter: RepositoryFilter,
    show_progress: bool,
}

impl<'a> Resolver<'a> {
    /// Create a resolver without repository filter
    pub fn new(settings: &'a Settings, fetcher: Arc<dyn IndexFetcher>) -> Self {
        Self {
            settings,
            fetcher,
            filter: RepositoryFilter::new(),
            show_progress: false,
        }
    }

    /// Restrict resolution to matching repositories
    pub fn with_filter(mut self, filter: RepositoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Show a spinner while indices are refreshed
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Resolve the outdated dependencies of the chart at `chart_dir`.
    ///
    /// A chart without requirements resolves to an empty result. Only a
    /// chart that cannot be loaded is an error.
    pub async fn resolve(&self, chart_dir: &Path) -> Result<Resolution, ChartError> {
        let Some(requirements) = load_requirements(chart_dir)? else {
            debug!("{} has no requirements", chart_dir.display());
            return Ok(Resolution::without_requirements());
        };

        let mut resolution = Resolution {
            has_requirements: true,
            declared: requirements.len(),
            ..Resolution::default()
        };

        resolution.local = requirements.len() - requirements.remote_dependencies().count();

        let mut candidates: Vec<&Dependency> = Vec::new();
        for dependency in requirements.remote_dependencies() {
            if !self.filter.should_process(dependency) {
                debug!("{} does not match the repository filter", dependency.name);
                resolution.filtered += 1;
            } else {
                candidates.push(dependency);
            }
        }

        let repositories: Vec<String> = candidates.iter().map(|d| d.repository.clone()).collect();
        resolution.refresh = self.refresh(&repositories).await;

        let mut indices = IndexLookup::new(self.settings, &resolution.refresh);
        for dependency in candidates {
            match check_dependency(dependency, &mut indices) {
                Ok(Some(outdated)) => resolution.outdated.push(outdated),
                Ok(None) => resolution.up_to_date += 1,
                Err(reason) => {
                    warn!("Skipping {}: {}", dependency, reason);
                    resolution
                        .skipped
                        .push(SkippedDependency::new(dependency.clone(), reason));
                }
            }
        }

        sort_outdated(&mut resolution.outdated);
        Ok(resolution)
    }

    async fn refresh(&self, repositories: &[String]) -> RefreshReport {
        if repositories.is_empty() {
            return RefreshReport::default();
        }

        let mut progress = Progress::new(self.show_progress);
        progress.spinner("Refreshing chart repositories...");
        let report = refresh_all(self.settings, Arc::clone(&self.fetcher), repositories).await;
        progress.finish_and_clear();
        report
    }
}

/// Compare a dependency against its repository's latest version
fn check_dependency(
    dependency: &Dependency,
    indices: &mut IndexLookup<'_>,
) -> Result<Option<OutdatedDependency>, SkipReason> {
    let current = version::parse(&dependency.version).map_err(|e| SkipReason::from(&e))?;
    let latest = indices.latest_version(dependency)?;

    if version::is_newer(&current, &latest) {
        Ok(Some(OutdatedDependency::new(dependency.clone(), latest)))
    } else {
        Ok(None)
    }
}

/// Loads cached indices on first use
struct IndexLookup<'a> {
    settings: &'a Settings,
    report: &'a RefreshReport,
    loaded: HashMap<String, Result<RepositoryIndex, SkipReason>>,
}

impl<'a> IndexLookup<'a> {
    fn new(settings: &'a Settings, report: &'a RefreshReport) -> Self {
        Self {
            settings,
            report,
            loaded: HashMap::new(),
        }
    }

    fn latest_version(&mut self, dependency: &Dependency) -> Result<Version, SkipReason> {
        let repository = dependency.repository.as_str();
        if !self.report.is_available(repository) {
            let err = RepositoryError::Unavailable {
                repository: repository.to_string(),
            };
            return Err(SkipReason::from(&err));
        }

        let settings = self.settings;
        let index = self
            .loaded
            .entry(repository.to_string())
            .or_insert_with(|| {
                let path = settings.cache_index_path(&normalize_repository_name(repository));
                RepositoryIndex::load(&path).map_err(|e| SkipReason::from(&e))
            })
            .as_ref()
            .map_err(Clone::clone)?;

        index
            .latest_version(&dependency.name, repository)
            .map_err(|e| SkipReason::from(&e))
    }
}
