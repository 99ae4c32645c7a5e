//! Core domain models
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency and requirements document structures
//! - Outdated dependency findings and skipped dependencies
//! - Chart version increment kinds

mod dependency;
mod increment;
mod outdated;
mod skip;

pub use dependency::{Dependency, Requirements, LOCAL_REPOSITORY_SCHEME};
pub use increment::IncrementKind;
pub use outdated::{sort_outdated, OutdatedDependency};
pub use skip::{SkipReason, SkippedDependency};
