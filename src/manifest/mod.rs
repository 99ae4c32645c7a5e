//! Chart file loading and rewriting
//!
//! This module provides functionality to:
//! - Load Chart.yaml and requirements.yaml from a chart directory
//! - Rewrite requirements.yaml with resolved versions
//! - Regenerate requirements.lock
//! - Bump the chart version

mod chart;
mod lock;
mod writer;
pub mod yaml;

pub use chart::{load_requirements, ChartMetadata};
pub use lock::{digest, LockedDependency, RequirementsLock};
pub use writer::{
    write_atomic, write_manifest, ManifestWriter, VersionBump, WriteResult,
    DEFAULT_INDENT,
};

/// Chart metadata file name
pub const CHART_METADATA_FILE: &str = "Chart.yaml";

/// Declared dependencies file name
pub const REQUIREMENTS_FILE: &str = "requirements.yaml";

/// Resolved dependencies file name
pub const REQUIREMENTS_LOCK_FILE: &str = "requirements.lock";
