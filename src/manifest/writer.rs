//! Manifest file writing and update operations
//!
//! This module provides:
//! - ManifestWriter for applying resolved versions to requirements.yaml
//! - requirements.lock regeneration after a rewrite
//! - Chart version bumps in Chart.yaml
//! - Dry-run mode support (no actual file modifications)
//! - Atomic whole-file writes (temporary file + rename)

use super::chart::{load_requirements, read_optional, ChartMetadata};
use super::lock::RequirementsLock;
use super::yaml::to_string_with_indent;
use super::{REQUIREMENTS_FILE, REQUIREMENTS_LOCK_FILE};
use crate::domain::{IncrementKind, OutdatedDependency, Requirements};
use crate::error::ChartError;
use crate::version;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default indentation of rewritten documents
pub const DEFAULT_INDENT: usize = 4;

/// Writer for chart files that applies version updates
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    /// Indentation used when serializing documents
    indent: usize,
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of rewriting a chart's requirements
#[derive(Debug, Clone, PartialEq)]
pub struct WriteResult {
    /// Path to requirements.yaml
    pub requirements_path: PathBuf,
    /// Path to requirements.lock
    pub lock_path: PathBuf,
    /// Names of the dependencies whose version was changed
    pub updated: Vec<String>,
    /// Findings that matched no declared dependency
    pub unmatched: Vec<String>,
    /// Whether requirements.yaml was (or in dry-run would be) rewritten
    pub requirements_modified: bool,
    /// Whether requirements.lock was (or in dry-run would be) rewritten
    pub lock_modified: bool,
}

impl WriteResult {
    /// Returns true if any dependency version was changed
    pub fn has_updates(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Result of bumping the chart version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    /// Path to Chart.yaml
    pub path: PathBuf,
    /// Version before the bump
    pub previous: String,
    /// Version after the bump
    pub current: String,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            dry_run: false,
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Indentation used for serialized documents
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Apply resolved versions to requirements.yaml and regenerate requirements.lock.
    ///
    /// The requirements are reloaded from disk rather than taken from the
    /// resolver. A finding only updates the declared entry with the same
    /// name and the same repository.
    pub fn update_dependencies(
        &self,
        chart_dir: &Path,
        results: &[OutdatedDependency],
    ) -> Result<WriteResult, ChartError> {
        let mut requirements =
            load_requirements(chart_dir)?.ok_or_else(|| ChartError::NoRequirements {
                path: chart_dir.to_path_buf(),
            })?;

        let mut updated = Vec::new();
        let mut unmatched = Vec::new();

        for result in results {
            let latest = result.latest_version.to_string();
            let mut matched = false;

            for dep in requirements.dependencies.iter_mut() {
                if dep.name == result.dependency.name
                    && dep.repository == result.dependency.repository
                {
                    matched = true;
                    if dep.version != latest {
                        debug!("{}: {} -> {}", dep.name, dep.version, latest);
                        dep.version = latest.clone();
                        updated.push(dep.name.clone());
                    }
                }
            }

            if !matched {
                warn!(
                    "{} ({}) is no longer declared in {}, skipping",
                    result.dependency.name, result.dependency.repository, REQUIREMENTS_FILE
                );
                unmatched.push(result.dependency.name.clone());
            }
        }

        requirements.sort_by_name();

        let requirements_path = chart_dir.join(REQUIREMENTS_FILE);
        let requirements_modified = self.persist(&requirements_path, &requirements)?;

        let lock_path = chart_dir.join(REQUIREMENTS_LOCK_FILE);
        let lock_modified = self.write_lock(&lock_path, &requirements)?;

        Ok(WriteResult {
            requirements_path,
            lock_path,
            updated,
            unmatched,
            requirements_modified,
            lock_modified,
        })
    }

    /// Bump the chart version in Chart.yaml by the given kind
    pub fn bump_chart_version(
        &self,
        chart_dir: &Path,
        kind: IncrementKind,
    ) -> Result<VersionBump, ChartError> {
        let mut metadata = ChartMetadata::load(chart_dir)?;
        let previous = metadata.version().ok_or_else(|| ChartError::MissingVersion {
            path: chart_dir.to_path_buf(),
        })?;

        let parsed = version::parse(&previous).map_err(|source| ChartError::InvalidChartVersion {
            path: chart_dir.to_path_buf(),
            source,
        })?;
        let current = version::increment(&parsed, kind).to_string();

        metadata.set_version(current.clone());
        let path = metadata.path().to_path_buf();
        self.persist(&path, metadata.document())?;

        Ok(VersionBump {
            path,
            previous,
            current,
        })
    }

    /// Regenerate requirements.lock from the updated requirements
    fn write_lock(&self, lock_path: &Path, requirements: &Requirements) -> Result<bool, ChartError> {
        let previous = match read_optional(lock_path)? {
            Some(content) => match serde_yaml::from_str::<RequirementsLock>(&content) {
                Ok(lock) => Some(lock),
                Err(e) => {
                    warn!("ignoring unreadable {}: {}", lock_path.display(), e);
                    None
                }
            },
            None => None,
        };

        let lock = RequirementsLock::from_requirements(requirements, Utc::now())
            .reuse_timestamp(previous.as_ref());
        self.persist(lock_path, &lock)
    }

    /// Serialize and write a document if its content changed.
    ///
    /// Returns whether the file differs from the serialized document.
    fn persist<T: Serialize>(&self, path: &Path, document: &T) -> Result<bool, ChartError> {
        let content = to_string_with_indent(document, self.indent)
            .map_err(|e| ChartError::yaml_write_error(path, e.to_string()))?;

        if read_optional(path)?.as_deref() == Some(content.as_str()) {
            debug!("{} is up to date", path.display());
            return Ok(false);
        }

        if !self.dry_run {
            write_manifest(path, &content)?;
        }
        Ok(true)
    }
}

impl Default for ManifestWriter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

/// Write content to a chart file, replacing it atomically
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ChartError> {
    write_atomic(path, content.as_bytes()).map_err(|e| ChartError::write_error(path, e))
}

/// Replace a file by writing a sibling temporary file and renaming it over
/// the target. Permissions of an existing target are carried over; new
/// files get 0644.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(metadata) => fs::set_permissions(tmp.path(), metadata.permissions())?,
        Err(_) => set_new_file_permissions(tmp.path())?,
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_new_file_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
