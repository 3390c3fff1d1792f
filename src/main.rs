use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tts_duration::config::{Config, ENV_LOG_LEVEL};
use tts_duration::probe::{walk, Prober};
use tts_duration::{report, AudioFormat};

#[derive(Parser, Debug)]
#[command(name = "mp3dur")]
#[command(version, about = "Measure the playback duration of synthesized MP3 audio")]
struct Cli {
    /// Config file (defaults to ./mp3dur.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tracing filter, e.g. "debug" or "tts_duration=trace"
    #[arg(long, global = true, env = ENV_LOG_LEVEL)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe files or directories and print their durations
    Scan {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Treat every file as this format instead of guessing from its extension
        #[arg(long)]
        format: Option<AudioFormat>,

        /// Write a report (.json, anything else is CSV)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print JSON to stdout instead of the table
        #[arg(long)]
        json: bool,

        /// Only look at the top level of directories
        #[arg(long)]
        no_recursive: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let source = Config::locate(cli.config.as_deref(), &cwd);
    let mut config = match &source {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level))?;
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "config loaded"),
        None => tracing::debug!("no config file, using defaults"),
    }

    match cli.command {
        Command::Scan {
            paths,
            format,
            report,
            json,
            no_recursive,
            no_color,
        } => {
            if no_recursive {
                config.recursive = false;
            }
            if no_color {
                colored::control::set_override(false);
            }
            let report_path = report.or_else(|| config.report.clone());
            run_scan(&paths, format, report_path, json, &config)
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "mp3dur", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter {filter:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_scan(
    paths: &[PathBuf],
    format: Option<AudioFormat>,
    report_path: Option<PathBuf>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let files = walk::collect_files(paths, config);
    tracing::info!(files = files.len(), recursive = config.recursive, "scanning");

    let results = Prober::new().with_format(format).probe_all(&files);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        report::json::write(&mut out, &results)?;
    } else {
        report::terminal::write(&mut out, &results)?;
    }
    out.flush()?;

    if let Some(path) = report_path {
        report::generate(&path, &results)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    Ok(())
}
