//! Repository index model
//!
//! A chart repository publishes `index.yaml`:
//!
//! ```yaml
//! apiVersion: v1
//! entries:
//!   redis:
//!     - version: 1.1.0
//!     - version: 1.0.0
//! generated: 2024-01-15T10:00:00Z
//! ```

use crate::error::RepositoryError;
use crate::version;
use semver::Version;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File name of a repository index below the repository URL
pub const INDEX_FILE: &str = "index.yaml";

/// One published chart version
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChartVersion {
    /// Chart name as recorded in the entry
    #[serde(default)]
    pub name: Option<String>,
    /// Published version string
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
}

/// Parsed repository index
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryIndex {
    /// Index format version
    #[serde(default)]
    pub api_version: Option<String>,
    /// Chart name -> published versions
    #[serde(default)]
    entries: Option<HashMap<String, Vec<ChartVersion>>>,
}

impl RepositoryIndex {
    /// Parse an index body. `source` names the origin in error messages.
    pub fn parse(content: &str, source: &str) -> Result<Self, RepositoryError> {
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| RepositoryError::invalid_index(source, e.to_string()))?;
        if !value.is_mapping() {
            return Err(RepositoryError::invalid_index(
                source,
                "expected a mapping at the top level",
            ));
        }

        serde_yaml::from_value(value).map_err(|e| RepositoryError::invalid_index(source, e.to_string()))
    }

    /// Load a cached index file
    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path).map_err(|e| RepositoryError::CacheError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Published versions of a chart
    pub fn versions(&self, chart: &str) -> &[ChartVersion] {
        self.entries
            .as_ref()
            .and_then(|entries| entries.get(chart))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of charts in the index
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, HashMap::len)
    }

    /// Returns true if the index lists no charts
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest stable version of a chart.
    ///
    /// Unparseable and pre-release versions are ignored.
    pub fn latest_version(&self, chart: &str, repository: &str) -> Result<Version, RepositoryError> {
        let versions = self.versions(chart);
        if versions.is_empty() {
            return Err(RepositoryError::chart_not_found(chart, repository));
        }

        versions
            .iter()
            .filter_map(|v| version::parse(&v.version).ok())
            .filter(|v| v.pre.is_empty())
            .max_by(version::compare)
            .ok_or_else(|| RepositoryError::NoVersion {
                chart: chart.to_string(),
                repository: repository.to_string(),
            })
    }
}

/// URL of a repository's index file
pub fn index_url(repository_url: &str) -> String {
    format!("{}/{}", repository_url.trim_end_matches('/'), INDEX_FILE)
}

/// Cache name of a repository: scheme and trailing slash stripped, path
/// separators and dots replaced with '-'.
///
/// Distinct URLs may map to the same name and then share one cache entry.
pub fn normalize_repository_name(repository_url: &str) -> String {
    let name = repository_url
        .split_once("://")
        .map_or(repository_url, |(_, rest)| rest);
    name.trim_end_matches('/').replace(['/', '.'], "-")
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const INDEX: &str = r#"apiVersion: v1
entries:
  redis:
    - name: redis
      version: 1.0.0
      urls: [https://charts.example.com/redis-1.0.0.tgz]
    - name: redis
      version: 1.10.0
    - name: redis
      version: 1.9.3
    - name: redis
      version: 2.0.0-rc.1
  mariadb:
    - version: not-a-version
    - version: 0.2.0
  nightly:
    - version: 3.0.0-alpha
generated: 2024-01-15T10:00:00Z
"#;

    const REPO: &str = "https://charts.example.com";

    #[test]
    fn test_parse_index() {
        let index = RepositoryIndex::parse(INDEX, REPO).unwrap();
        assert_eq!(index.api_version.as_deref(), Some("v1"));
        assert_eq!(index.len(), 3);
        assert_eq!(index.versions("redis").len(), 4);
        assert!(index.versions("unknown").is_empty());
    }

    #[test]
    fn test_latest_version_uses_semver_precedence() {
        let index = RepositoryIndex::parse(INDEX, REPO).unwrap();
        assert_eq!(
            index.latest_version("redis", REPO).unwrap(),
            Version::new(1, 10, 0)
        );
    }

    #[test]
    fn test_latest_version_skips_invalid_versions() {
        let index = RepositoryIndex::parse(INDEX, REPO).unwrap();
        assert_eq!(
            index.latest_version("mariadb", REPO).unwrap(),
            Version::new(0, 2, 0)
        );
    }

    #[test]
    fn test_latest_version_only_prereleases() {
        let index = RepositoryIndex::parse(INDEX, REPO).unwrap();
        let result = index.latest_version("nightly", REPO);
        assert!(matches!(result, Err(RepositoryError::NoVersion { .. })));
    }

    #[test]
    fn test_latest_version_chart_not_found() {
        let index = RepositoryIndex::parse(INDEX, REPO).unwrap();
        let result = index.latest_version("postgresql", REPO);
        assert!(matches!(result, Err(RepositoryError::ChartNotFound { .. })));
    }

    #[test]
    fn test_parse_numeric_version() {
        let index = RepositoryIndex::parse("entries:\n  app:\n    - version: 1.5\n", REPO).unwrap();
        assert_eq!(index.versions("app")[0].version, "1.5");
        assert_eq!(
            index.latest_version("app", REPO).unwrap(),
            Version::new(1, 5, 0)
        );
    }

    #[test]
    fn test_parse_null_entries() {
        let index = RepositoryIndex::parse("apiVersion: v1\nentries:\n", REPO).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_index() {
        let result = RepositoryIndex::parse("<html>not found</html>", REPO);
        assert!(matches!(result, Err(RepositoryError::InvalidIndex { .. })));

        let result = RepositoryIndex::parse("entries: [unclosed", REPO);
        assert!(matches!(result, Err(RepositoryError::InvalidIndex { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repo-index.yaml");
        fs::write(&path, INDEX).unwrap();

        let index = RepositoryIndex::load(&path).unwrap();
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = RepositoryIndex::load(Path::new("/nonexistent/repo-index.yaml"));
        assert!(matches!(result, Err(RepositoryError::CacheError { .. })));
    }

    #[test]
    fn test_index_url() {
        assert_eq!(
            index_url("https://charts.example.com/stable/"),
            "https://charts.example.com/stable/index.yaml"
        );
        assert_eq!(
            index_url("https://charts.example.com"),
            "https://charts.example.com/index.yaml"
        );
    }

    #[test]
    fn test_normalize_repository_name() {
        assert_eq!(
            normalize_repository_name("https://charts.example.com/stable/"),
            "charts-example-com-stable"
        );
        assert_eq!(
            normalize_repository_name("http://127.0.0.1:8879"),
            "127-0-0-1:8879"
        );
        assert_eq!(normalize_repository_name("repo.local"), "repo-local");
    }

    #[test]
    fn test_normalize_repository_name_collisions_share_entry() {
        assert_eq!(
            normalize_repository_name("https://charts.example.com/a.b"),
            normalize_repository_name("https://charts.example.com/a/b/")
        );
    }

    #[test]
    fn test_normalize_keeps_hosts_starting_with_scheme_letters() {
        assert_eq!(
            normalize_repository_name("https://sp.example.com"),
            "sp-example-com"
        );
    }
}
