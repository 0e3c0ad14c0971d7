use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anime_relocator::host::{apply_relocation, ApplyResult};
use anime_relocator::{Relocation, Relocator, RequestMode, Settings, StrategyKind};

mod batch;
mod tui;

use batch::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Both,
    Filename,
    Destination,
}

impl From<ModeArg> for RequestMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Both => RequestMode::BOTH,
            ModeArg::Filename => RequestMode::FILENAME_ONLY,
            ModeArg::Destination => RequestMode::DESTINATION_ONLY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Standard,
    DubSubAware,
    GroupFolder,
    CopyToBackup,
    DuplicateFile,
    OriginalName,
}

impl From<StrategyArg> for StrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Standard => StrategyKind::Standard,
            StrategyArg::DubSubAware => StrategyKind::DubSubAware,
            StrategyArg::GroupFolder => StrategyKind::GroupFolder,
            StrategyArg::CopyToBackup => StrategyKind::CopyToBackup,
            StrategyArg::DuplicateFile => StrategyKind::DuplicateFile,
            StrategyArg::OriginalName => StrategyKind::OriginalName,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "anime-relocator",
    version,
    about = "Decides filenames and destination folders for anime files"
)]
struct Cli {
    /// Invocation manifests (JSON), one per media file
    #[arg(required = true)]
    manifests: Vec<PathBuf>,

    /// Settings file (JSON); defaults apply when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Override the strategy named in the settings
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Which parts of the decision to produce
    #[arg(long, value_enum, default_value = "both")]
    mode: ModeArg,

    /// Move, rename and copy files according to the decisions
    #[arg(long)]
    apply: bool,

    /// Print decisions as JSON instead of text
    #[arg(long, conflicts_with = "tui")]
    json: bool,

    /// Review decisions in a terminal UI
    #[arg(long)]
    tui: bool,
}

fn init_tracing(quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if quiet {
        // the TUI owns the terminal
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.tui);

    let mut settings = load_settings(cli.settings.as_deref())?;
    if let Some(strategy) = cli.strategy {
        settings.strategy = strategy.into();
    }
    let strategy = settings.strategy;
    let relocator = Arc::new(Relocator::new(settings).context("Invalid settings")?);

    let decisions = batch::decide_all(relocator, &cli.manifests, cli.mode.into()).await;

    if cli.tui {
        return tui::run_tui(decisions, strategy).await;
    }
    if cli.json {
        return print_json(&decisions);
    }

    print_report(&decisions, strategy, cli.apply);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    manifest: &'a Path,
    relocation: Option<&'a Relocation>,
    error: Option<&'a str>,
}

fn print_json(decisions: &[Decision]) -> Result<()> {
    let reports: Vec<Report> = decisions
        .iter()
        .map(|d| Report {
            manifest: &d.source,
            relocation: d.outcome.as_ref().ok(),
            error: d.outcome.as_ref().err().map(String::as_str),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn print_report(decisions: &[Decision], strategy: StrategyKind, apply: bool) {
    println!("Anime Relocator ({})", strategy.id());
    println!("===================");
    println!("{}\n", strategy.description());

    let total = decisions.len();
    let mut success_count = 0;

    for (index, decision) in decisions.iter().enumerate() {
        println!("--- Processing file {} of {} ---", index + 1, total);
        println!("Manifest: {}", decision.source.display());

        let relocation = match &decision.outcome {
            Ok(relocation) => relocation,
            Err(message) => {
                println!("✗ Error: {}\n", message);
                continue;
            }
        };

        println!("File: {}", decision.display_name());
        if relocation.is_deferred() {
            println!("ℹ No changes requested for: {}\n", decision.display_name());
            success_count += 1;
            continue;
        }

        if let Some(name) = &relocation.file_name {
            println!("New name: {}", name);
        }
        if let Some(folder) = &relocation.destination {
            println!("Destination: {} ({})", folder.location, folder.name);
        }
        if let Some(subfolder) = &relocation.subfolder {
            println!("Subfolder: {}", subfolder);
        }
        if let Some(copy) = &relocation.backup_copy {
            println!("Backup copy: {}", copy.display());
        }

        match (&decision.file, apply) {
            (Some(file), true) => match apply_relocation(file, relocation) {
                ApplyResult::Success(path) => {
                    println!("✓ Done: {}", path.display());
                    success_count += 1;
                }
                ApplyResult::Unchanged => {
                    println!("ℹ Already in place");
                    success_count += 1;
                }
                other => println!("✗ Error applying: {}", other),
            },
            _ => success_count += 1,
        }
        println!();
    }

    println!("===================");
    println!("Summary: {} of {} files processed successfully", success_count, total);

    if success_count == total && total > 0 {
        println!("✓ All files handled!");
    } else if success_count > 0 {
        println!("⚠ Some files were handled, but there were errors with others.");
    } else {
        println!("✗ No files were handled.");
    }
}
