//! Command orchestration
//!
//! This module provides:
//! - The `list` workflow: resolve outdated dependencies
//! - The `update` workflow: resolve → bump chart version → rewrite requirements
//! - Dry-run mode support
//!
//! Nothing is printed here; callers render the returned result.

use crate::config::Settings;
use crate::domain::IncrementKind;
use crate::error::AppError;
use crate::manifest::{ManifestWriter, VersionBump, WriteResult, DEFAULT_INDENT};
use crate::registry::{HttpClient, IndexFetcher};
use crate::update::{RepositoryFilter, Resolution, Resolver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Which workflow produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `list`
    List,
    /// `update`
    Update,
}

/// Options of the update workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Bump the chart version by this kind when dependencies change
    pub increment: Option<IncrementKind>,
    /// Indentation of rewritten files
    pub indent: usize,
    /// Report changes without writing files
    pub dry_run: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            increment: None,
            indent: DEFAULT_INDENT,
            dry_run: false,
        }
    }
}

/// Result of running a workflow on one chart
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Workflow that produced this result
    pub kind: CommandKind,
    /// Chart directory
    pub chart_path: PathBuf,
    /// Resolved dependencies
    pub resolution: Resolution,
    /// Chart version bump, if one was applied
    pub version_bump: Option<VersionBump>,
    /// Requirements rewrite, if one was applied
    pub write: Option<WriteResult>,
    /// Whether files were left untouched on purpose
    pub dry_run: bool,
}

impl OrchestratorResult {
    fn new(kind: CommandKind, chart_path: &Path, resolution: Resolution) -> Self {
        Self {
            kind,
            chart_path: chart_path.to_path_buf(),
            resolution,
            version_bump: None,
            write: None,
            dry_run: false,
        }
    }

    /// Returns true if any dependency is outdated
    pub fn has_outdated(&self) -> bool {
        self.resolution.has_outdated()
    }
}

/// Coordinates resolution and rewriting for the CLI
pub struct Orchestrator {
    settings: Settings,
    fetcher: Arc<dyn IndexFetcher>,
    show_progress: bool,
}

impl Orchestrator {
    /// Create an orchestrator downloading indices over HTTP
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let client = HttpClient::with_user_agent(&settings.user_agent)?;
        Ok(Self::with_fetcher(settings, Arc::new(client)))
    }

    /// Create an orchestrator with a custom index fetcher
    pub fn with_fetcher(settings: Settings, fetcher: Arc<dyn IndexFetcher>) -> Self {
        Self {
            settings,
            fetcher,
            show_progress: false,
        }
    }

    /// Show a spinner while indices are refreshed
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Settings in use
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// List the outdated dependencies of a chart
    pub async fn list(
        &self,
        chart_path: &Path,
        filter: RepositoryFilter,
    ) -> Result<OrchestratorResult, AppError> {
        let resolution = self.resolve(chart_path, filter).await?;
        Ok(OrchestratorResult::new(CommandKind::List, chart_path, resolution))
    }

    /// Update the outdated dependencies of a chart.
    ///
    /// Files are only touched when something is outdated. The chart version
    /// is bumped before requirements are rewritten.
    pub async fn update(
        &self,
        chart_path: &Path,
        filter: RepositoryFilter,
        options: &UpdateOptions,
    ) -> Result<OrchestratorResult, AppError> {
        let resolution = self.resolve(chart_path, filter).await?;
        let mut result = OrchestratorResult::new(CommandKind::Update, chart_path, resolution);
        result.dry_run = options.dry_run;

        if !result.has_outdated() {
            debug!("nothing to update in {}", chart_path.display());
            return Ok(result);
        }

        let writer = ManifestWriter::new(options.indent).with_dry_run(options.dry_run);

        if let Some(kind) = options.increment {
            let bump = writer.bump_chart_version(chart_path, kind)?;
            info!(
                "chart version {} -> {} ({})",
                bump.previous, bump.current, kind
            );
            result.version_bump = Some(bump);
        }

        let write = writer.update_dependencies(chart_path, &result.resolution.outdated)?;
        info!(
            "updated {} dependencies in {}",
            write.updated.len(),
            write.requirements_path.display()
        );
        result.write = Some(write);

        Ok(result)
    }

    async fn resolve(&self, chart_path: &Path, filter: RepositoryFilter) -> Result<Resolution, AppError> {
        let resolution = Resolver::new(&self.settings, Arc::clone(&self.fetcher))
            .with_filter(filter)
            .with_progress(self.show_progress)
            .resolve(chart_path)
            .await?;
        Ok(resolution)
    }
}
