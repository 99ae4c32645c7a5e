//! helm-outdated-deps - lists and updates outdated Helm chart dependencies

use anyhow::{bail, Context};
use clap::Parser;
use helm_outdated_deps::cli::{CliArgs, Command};
use helm_outdated_deps::config::Settings;
use helm_outdated_deps::orchestrator::{Orchestrator, UpdateOptions};
use helm_outdated_deps::output::{OutputConfig, TextFormatter};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG overrides the level chosen by flags
fn init_logging(args: &CliArgs) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,helm_outdated_deps={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(!args.no_color)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let settings = Settings::from_env();
    tracing::debug!("helm home: {}", settings.helm_home().display());

    let common = args.common();
    let chart_path = absolute(&common.chart_path)?;
    let filter = common.repository_filter();
    let formatter = TextFormatter::new(OutputConfig {
        max_column_width: common.max_column_width,
        color: !args.no_color,
    });

    let orchestrator = Orchestrator::new(settings)?.with_progress(!args.quiet);

    let result = match &args.command {
        Command::List(_) => orchestrator.list(&chart_path, filter).await?,
        Command::Update(update) => {
            let options = UpdateOptions {
                increment: update.increment_chart_version,
                indent: update.indent,
                dry_run: update.dry_run,
            };
            orchestrator.update(&chart_path, filter, &options).await?
        }
    };

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if let Command::List(list) = &args.command {
        if list.fail_on_outdated_dependencies && result.has_outdated() {
            bail!("dependencies are outdated");
        }
    }

    Ok(())
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    Ok(cwd
        .join(path)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}
