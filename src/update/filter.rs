//! Repository filter
//!
//! Restricts resolution to dependencies from selected repositories. Entries
//! are matched loosely so partial URLs work: an entry matches when it is a
//! substring of the declared repository or the other way round.

use crate::domain::Dependency;

/// Filter on dependency repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryFilter {
    /// Repository fragments to keep (empty means all)
    repositories: Vec<String>,
}

impl RepositoryFilter {
    /// Create a filter that keeps every repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repositories to keep. Blank entries are ignored.
    pub fn with_repositories<I, S>(mut self, repositories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.repositories = repositories
            .into_iter()
            .map(|r| r.as_ref().trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        self
    }

    /// Returns true if the filter keeps everything
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Repository fragments of this filter
    pub fn repositories(&self) -> &[String] {
        &self.repositories
    }

    /// Check if a repository passes the filter
    pub fn matches(&self, repository: &str) -> bool {
        if self.repositories.is_empty() {
            return true;
        }
        self.repositories
            .iter()
            .any(|r| repository.contains(r.as_str()) || r.contains(repository))
    }

    /// Check if a dependency passes the filter
    pub fn should_process(&self, dependency: &Dependency) -> bool {
        self.matches(&dependency.repository)
    }
}
