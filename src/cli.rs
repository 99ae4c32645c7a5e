//! CLI argument parsing module for helm-outdated-deps

use crate::domain::IncrementKind;
use crate::manifest::DEFAULT_INDENT;
use crate::update::RepositoryFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default maximum width of a table column
pub const DEFAULT_MAX_COLUMN_WIDTH: usize = 60;

/// Lists and updates outdated dependencies of a Helm chart
#[derive(Parser, Debug, Clone)]
#[command(
    name = "helm-outdated-deps",
    version,
    about = "Manage outdated dependencies of a Helm chart"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - only errors are logged
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List outdated dependencies of a chart
    List(ListArgs),
    /// Update outdated dependencies of a chart to their latest version
    Update(UpdateArgs),
}

/// Options shared by all subcommands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Chart directory (default: current directory)
    #[arg(default_value = ".")]
    pub chart_path: PathBuf,

    /// Limit search to the given repositories (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub repositories: Vec<String>,

    /// Max column width to use for tables
    #[arg(short = 'w', long, default_value_t = DEFAULT_MAX_COLUMN_WIDTH)]
    pub max_column_width: usize,
}

impl CommonArgs {
    /// Build the repository filter from --repositories
    pub fn repository_filter(&self) -> RepositoryFilter {
        RepositoryFilter::new().with_repositories(&self.repositories)
    }
}

/// Arguments of `list`
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Fail if any dependency is outdated (exit code 1)
    #[arg(long)]
    pub fail_on_outdated_dependencies: bool,
}

/// Arguments of `update`
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Increment the chart version if requirements are updated
    #[arg(
        long,
        value_enum,
        value_name = "KIND",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "patch"
    )]
    pub increment_chart_version: Option<IncrementKind>,

    /// Indent to use when writing requirements.yaml and requirements.lock
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Options shared by the selected subcommand
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::List(args) => &args.common,
            Command::Update(args) => &args.common,
        }
    }
}
