//! helm-outdated-deps - Helm chart dependency updater library
//!
//! This library provides the core functionality for keeping the
//! dependencies of a Helm chart current:
//! - Resolving the latest version of each dependency from its repository
//! - Listing outdated dependencies
//! - Rewriting requirements.yaml and requirements.lock
//! - Bumping the chart version

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
pub mod version;
