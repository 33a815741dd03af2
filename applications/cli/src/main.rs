/// dvtag - tag voice-work folders from their metadata records
use clap::Parser;
use dvtag_core::JsonFileProvider;
use dvtag_organizer::{discover_work_dirs, TagReport, Tagger, TaggerOptions, TracingObserver};
use settings::{Overrides, Settings};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod settings;

const DEFAULT_LOG_FILTER: &str = "dvtag=info,dvtag_organizer=info";
const VERBOSE_LOG_FILTER: &str = "dvtag=debug,dvtag_organizer=debug,dvtag_metadata=debug";

#[derive(Parser)]
#[command(name = "dvtag")]
#[command(version, about = "Tag voice-work folders from their metadata records", long_about = None)]
struct Cli {
    /// Work folders, or directories containing work folders
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Configuration file path (default: ./dvtag.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding <WORKID>.json metadata records
    #[arg(short, long)]
    metadata_dir: Option<PathBuf>,

    /// Move disc-prefixed files to the work root
    #[arg(long)]
    flatten: bool,

    /// Treat each path as a work folder instead of searching below it
    #[arg(long)]
    no_recursive: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(settings: &Settings, verbose: u8) {
    let fallback = if verbose > 0 {
        VERBOSE_LOG_FILTER.to_string()
    } else {
        settings
            .log_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn summary(report: &TagReport) -> String {
    let mut line = format!(
        "{}: {} files, {} tagged, {} unchanged, {} moved",
        report.work_id,
        report.files_seen(),
        report.written.len(),
        report.unchanged.len(),
        report.moved.len()
    );
    if report.cover_created.is_some() {
        line.push_str(", cover created");
    }
    if !report.pruned.is_empty() {
        line.push_str(&format!(", {} directories removed", report.pruned.len()));
    }
    line.push_str(&format!(" -> {}", report.folder.display()));
    line
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = Overrides {
        metadata_dir: cli.metadata_dir.clone(),
        flatten: cli.flatten,
        no_recursive: cli.no_recursive,
    };
    let settings = Settings::load(cli.config.as_deref(), &overrides)?;
    init_tracing(&settings, cli.verbose);
    settings.validate()?;

    tracing::debug!("Settings: {:?}", settings);

    let options = TaggerOptions::new()
        .with_flatten(settings.flatten)
        .with_dry_run(cli.dry_run);
    let provider = JsonFileProvider::new(&settings.metadata_dir);
    tracing::debug!("Reading metadata records from {}", provider.dir().display());
    let tagger = Tagger::new(provider, TracingObserver::new()).with_options(options);

    if cli.dry_run {
        tracing::info!("Dry run: nothing will be written");
    }

    let mut total = 0usize;
    let mut failed = 0usize;

    for path in &cli.paths {
        let folders = if settings.recursive {
            match discover_work_dirs(path) {
                Ok(folders) => folders,
                Err(e) => {
                    tracing::error!("Failed to scan {}: {}", path.display(), e);
                    total += 1;
                    failed += 1;
                    continue;
                }
            }
        } else {
            vec![path.clone()]
        };

        if folders.is_empty() {
            tracing::warn!("No work folders found under {}", path.display());
        }

        for folder in folders {
            total += 1;
            match tagger.tag(&folder) {
                Ok(report) => println!("{}", summary(&report)),
                Err(e) => {
                    tracing::error!("Failed to tag {}: {}", folder.display(), e);
                    failed += 1;
                }
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {total} work folders failed");
    }

    Ok(())
}
