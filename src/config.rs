//! Runtime settings
//!
//! Built once at process start and passed to the components that need it.

use std::path::{Path, PathBuf};

/// Environment variable overriding the Helm home directory
pub const HELM_HOME_ENV: &str = "HELM_HOME";

/// Helm home directory name below the user's home
const DEFAULT_HELM_HOME_DIR: &str = ".helm";

/// Default User-Agent header for index downloads
pub const DEFAULT_USER_AGENT: &str = concat!("helm-outdated-deps/", env!("CARGO_PKG_VERSION"));

/// Process-wide settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Helm home directory holding the repository index cache
    pub helm_home: PathBuf,
    /// User-Agent sent to chart repositories
    pub user_agent: String,
}

impl Settings {
    /// Create settings with an explicit Helm home
    pub fn new(helm_home: impl Into<PathBuf>) -> Self {
        Self {
            helm_home: helm_home.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Create settings from the environment.
    ///
    /// Uses $HELM_HOME if set and non-empty, otherwise ~/.helm,
    /// or ./.helm if no home directory is available.
    pub fn from_env() -> Self {
        Self::new(helm_home_with_env(
            std::env::var(HELM_HOME_ENV).ok(),
            dirs::home_dir(),
        ))
    }

    /// Directory holding downloaded repository indices
    pub fn cache_dir(&self) -> PathBuf {
        self.helm_home.join("repository").join("cache")
    }

    /// Path of the cached index for a normalized repository name
    pub fn cache_index_path(&self, repository_name: &str) -> PathBuf {
        self.cache_dir()
            .join(format!("{}-index.yaml", repository_name))
    }

    /// Returns the Helm home directory
    pub fn helm_home(&self) -> &Path {
        &self.helm_home
    }
}

fn helm_home_with_env(helm_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    helm_home
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(DEFAULT_HELM_HOME_DIR)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HELM_HOME_DIR))
}
