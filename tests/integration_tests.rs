//! Integration tests for helm-outdated-deps
//!
//! These tests verify:
//! - Resolution across several repositories, including unreachable ones
//! - Repository filtering and local chart exclusion
//! - Requirements rewrite idempotence and round-trip
//! - Chart version bumps

use async_trait::async_trait;
use helm_outdated_deps::config::Settings;
use helm_outdated_deps::domain::{IncrementKind, Requirements};
use helm_outdated_deps::error::RepositoryError;
use helm_outdated_deps::manifest::{load_requirements, ChartMetadata, RequirementsLock};
use helm_outdated_deps::orchestrator::{Orchestrator, UpdateOptions};
use helm_outdated_deps::registry::IndexFetcher;
use helm_outdated_deps::update::RepositoryFilter;
use semver::Version;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const R1: &str = "https://r1.example.com/charts";
const R2: &str = "https://r2.example.com";

const R1_INDEX: &str = r#"apiVersion: v1
entries:
  a:
    - name: a
      version: 0.2.0
    - name: a
      version: 0.1.0
generated: 2024-01-15T10:00:00Z
"#;

const R2_INDEX: &str = r#"apiVersion: v1
entries:
  b:
    - name: b
      version: 1.0.0
generated: 2024-01-15T10:00:00Z
"#;

const REQUIREMENTS: &str = r#"dependencies:
- name: b
  version: 1.0.0
  repository: https://r2.example.com
- name: a
  version: 0.1.0
  repository: https://r1.example.com/charts
  condition: a.enabled
- name: common
  version: 0.0.1
  repository: file://../common
"#;

/// Serves fixed index bodies; unknown repositories are unreachable
struct FixtureFetcher {
    indices: HashMap<String, String>,
}

impl FixtureFetcher {
    fn new(indices: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            indices: indices
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        })
    }
}

#[async_trait]
impl IndexFetcher for FixtureFetcher {
    async fn fetch_index(&self, repository_url: &str) -> Result<String, RepositoryError> {
        self.indices
            .get(repository_url)
            .cloned()
            .ok_or_else(|| RepositoryError::network_error(repository_url, "connection refused"))
    }
}

/// Test fixture directory creation helper
fn create_chart(requirements: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(
        dir.path().join("Chart.yaml"),
        "apiVersion: v1\nname: app\nversion: 1.2.3\ndescription: Test chart\n",
    )
    .unwrap();
    if let Some(requirements) = requirements {
        fs::write(dir.path().join("requirements.yaml"), requirements).unwrap();
    }
    dir
}

fn orchestrator(home: &Path, indices: &[(&str, &str)]) -> Orchestrator {
    Orchestrator::with_fetcher(Settings::new(home), FixtureFetcher::new(indices))
}

fn triples(requirements: &Requirements) -> Vec<(String, String, String)> {
    requirements
        .dependencies
        .iter()
        .map(|d| (d.name.clone(), d.version.clone(), d.repository.clone()))
        .collect()
}

mod resolution {
    use super::*;

    #[tokio::test]
    async fn test_list_reports_single_outdated_dependency() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(REQUIREMENTS));

        let result = orchestrator(home.path(), &[(R1, R1_INDEX), (R2, R2_INDEX)])
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();

        let outdated = &result.resolution.outdated;
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].name(), "a");
        assert_eq!(outdated[0].version(), "0.1.0");
        assert_eq!(outdated[0].latest_version, Version::new(0, 2, 0));
        assert_eq!(result.resolution.up_to_date, 1);
        assert_eq!(result.resolution.local, 1);
    }

    #[tokio::test]
    async fn test_unreachable_repository_does_not_abort() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(
            r#"dependencies:
- name: a
  version: 0.1.0
  repository: https://r1.example.com/charts
- name: b
  version: 0.5.0
  repository: https://r2.example.com
"#,
        ));

        let result = orchestrator(home.path(), &[(R2, R2_INDEX)])
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();

        let names: Vec<_> = result.resolution.outdated.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["b"]);
        assert_eq!(result.resolution.skipped.len(), 1);
        assert_eq!(result.resolution.refresh.failed().count(), 1);
    }

    #[tokio::test]
    async fn test_all_repositories_unreachable_yields_empty_result() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(REQUIREMENTS));

        let result = orchestrator(home.path(), &[])
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();

        assert!(!result.has_outdated());
        assert_eq!(result.resolution.skipped.len(), 2);
    }

    #[tokio::test]
    async fn test_repository_filter_substring_match() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(
            r#"dependencies:
- name: a
  version: 0.1.0
  repository: https://repo.evil.corp/charts
"#,
        ));
        let index = "entries:\n  a:\n    - version: 0.2.0\n";
        let indices = [("https://repo.evil.corp/charts", index)];

        let kept = orchestrator(home.path(), &indices)
            .list(
                chart.path(),
                RepositoryFilter::new().with_repositories(["evil.corp"]),
            )
            .await
            .unwrap();
        assert_eq!(kept.resolution.outdated.len(), 1);

        let dropped = orchestrator(home.path(), &indices)
            .list(
                chart.path(),
                RepositoryFilter::new().with_repositories(["other.org"]),
            )
            .await
            .unwrap();
        assert!(dropped.resolution.outdated.is_empty());
        assert_eq!(dropped.resolution.filtered, 1);
    }

    #[tokio::test]
    async fn test_local_charts_never_reported() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(
            r#"dependencies:
- name: common
  version: 0.0.1
  repository: file://../common
"#,
        ));
        // Even an index claiming a newer version must be ignored
        let result = orchestrator(home.path(), &[("file://../common", "entries:\n  common:\n    - version: 9.9.9\n")])
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();

        assert!(result.resolution.outdated.is_empty());
        assert!(result.resolution.refresh.is_empty());
    }

    #[tokio::test]
    async fn test_output_sorted_by_name() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(
            r#"dependencies:
- name: zeta
  version: 0.1.0
  repository: https://r1.example.com/charts
- name: alpha
  version: 0.1.0
  repository: https://r2.example.com
- name: mid
  version: 0.1.0
  repository: https://r1.example.com/charts
"#,
        ));
        let r1 = "entries:\n  zeta: [{version: 1.0.0}]\n  mid: [{version: 1.0.0}]\n";
        let r2 = "entries:\n  alpha: [{version: 1.0.0}]\n";

        let result = orchestrator(home.path(), &[(R1, r1), (R2, r2)])
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();

        let names: Vec<_> = result.resolution.outdated.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_chart_without_requirements() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(None);

        let result = orchestrator(home.path(), &[])
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();

        assert!(!result.resolution.has_requirements);
        assert!(!result.has_outdated());
    }

    #[tokio::test]
    async fn test_refresh_populates_cache() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(REQUIREMENTS));

        orchestrator(home.path(), &[(R1, R1_INDEX), (R2, R2_INDEX)])
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();

        let cache = home.path().join("repository").join("cache");
        assert!(cache.join("r1-example-com-charts-index.yaml").exists());
        assert!(cache.join("r2-example-com-index.yaml").exists());
    }
}

mod rewrite {
    use super::*;

    #[tokio::test]
    async fn test_update_then_list_reports_nothing() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(REQUIREMENTS));
        let orchestrator = orchestrator(home.path(), &[(R1, R1_INDEX), (R2, R2_INDEX)]);

        let result = orchestrator
            .update(chart.path(), RepositoryFilter::new(), &UpdateOptions::default())
            .await
            .unwrap();
        assert_eq!(result.write.unwrap().updated, vec!["a"]);

        let reqs = load_requirements(chart.path()).unwrap().unwrap();
        assert_eq!(
            triples(&reqs),
            vec![
                ("a".to_string(), "0.2.0".to_string(), R1.to_string()),
                ("b".to_string(), "1.0.0".to_string(), R2.to_string()),
                (
                    "common".to_string(),
                    "0.0.1".to_string(),
                    "file://../common".to_string()
                ),
            ]
        );

        let lock: RequirementsLock = serde_yaml::from_str(
            &fs::read_to_string(chart.path().join("requirements.lock")).unwrap(),
        )
        .unwrap();
        assert_eq!(lock.dependencies.len(), 3);
        assert_eq!(lock.dependencies[0].version, "0.2.0");

        let after = orchestrator
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap();
        assert!(!after.has_outdated());
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(REQUIREMENTS));
        let orchestrator = orchestrator(home.path(), &[(R1, R1_INDEX), (R2, R2_INDEX)]);
        let outdated = orchestrator
            .list(chart.path(), RepositoryFilter::new())
            .await
            .unwrap()
            .resolution
            .outdated;

        let writer = helm_outdated_deps::manifest::ManifestWriter::default();
        writer.update_dependencies(chart.path(), &outdated).unwrap();
        let first_reqs = fs::read(chart.path().join("requirements.yaml")).unwrap();
        let first_lock = fs::read(chart.path().join("requirements.lock")).unwrap();

        let second = writer.update_dependencies(chart.path(), &outdated).unwrap();
        assert!(!second.requirements_modified);
        assert!(!second.lock_modified);
        assert_eq!(fs::read(chart.path().join("requirements.yaml")).unwrap(), first_reqs);
        assert_eq!(fs::read(chart.path().join("requirements.lock")).unwrap(), first_lock);
    }

    #[tokio::test]
    async fn test_update_preserves_unknown_fields() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(REQUIREMENTS));

        orchestrator(home.path(), &[(R1, R1_INDEX), (R2, R2_INDEX)])
            .update(chart.path(), RepositoryFilter::new(), &UpdateOptions::default())
            .await
            .unwrap();

        let reqs = load_requirements(chart.path()).unwrap().unwrap();
        let a = reqs.dependencies.iter().find(|d| d.name == "a").unwrap();
        assert_eq!(
            a.extra.get("condition"),
            Some(&serde_yaml::Value::String("a.enabled".to_string()))
        );
    }

    #[tokio::test]
    async fn test_increment_chart_version_patch() {
        let home = TempDir::new().unwrap();
        let chart = create_chart(Some(REQUIREMENTS));
        let options = UpdateOptions {
            increment: Some(IncrementKind::Patch),
            ..UpdateOptions::default()
        };

        orchestrator(home.path(), &[(R1, R1_INDEX), (R2, R2_INDEX)])
            .update(chart.path(), RepositoryFilter::new(), &options)
            .await
            .unwrap();

        let meta = ChartMetadata::load(chart.path()).unwrap();
        assert_eq!(meta.version().as_deref(), Some("1.2.4"));
        assert_eq!(meta.name().as_deref(), Some("app"));
    }

    #[test]
    fn test_round_trip_keeps_triples_sorted() {
        let chart = create_chart(Some(REQUIREMENTS));
        let before = load_requirements(chart.path()).unwrap().unwrap();

        // Rewrite with nothing outdated
        helm_outdated_deps::manifest::ManifestWriter::new(2)
            .update_dependencies(chart.path(), &[])
            .unwrap();
        let after = load_requirements(chart.path()).unwrap().unwrap();

        let mut expected = triples(&before);
        expected.sort();
        assert_eq!(triples(&after), expected);
    }
}
