use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use jobscope_core::ports::Reloader;
use jobscope_core::{AutoRefresh, JobInfo, JobView, JobscopeError, RefreshInterval, ViewConfig};

#[derive(Debug, Parser)]
#[command(name = "jobscope", version, about = "Explain why a job failed, stopped or is waiting")]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the summary and hints for a job info JSON document
    Show {
        /// Path to the job info JSON, or `-` for stdin
        input: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Re-read the input on the refresh interval until Ctrl-C
        #[arg(long)]
        watch: bool,

        /// Refresh interval: off, 10, 30 or 60 (overrides config)
        #[arg(long)]
        refresh: Option<RefreshInterval>,
    },
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Text,
    Json,
}

fn render(info: &JobInfo, config: &ViewConfig, format: Format) -> Result<String> {
    let view = JobView::build(info, config, chrono::Utc::now());
    Ok(match format {
        Format::Text => view.to_string(),
        Format::Json => serde_json::to_string_pretty(&view).context("serialize job view")?,
    })
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read job info from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("read job info from {input}"))
}

/// Re-reads the job file and prints its view on every tick.
struct FileReloader {
    path: PathBuf,
    config: ViewConfig,
    format: Format,
}

#[async_trait]
impl Reloader for FileReloader {
    async fn reload(&self) -> Result<(), JobscopeError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| JobscopeError::Reload(format!("{}: {e}", self.path.display())))?;
        let info = JobInfo::from_json(&content)?;
        let out = render(&info, &self.config, self.format)
            .map_err(|e| JobscopeError::Reload(e.to_string()))?;
        tracing::debug!(job = %info.name, "reloaded");
        println!("{out}");
        Ok(())
    }
}

/// Rejects flag combinations before any input is read.
fn check_watch_args(input: &str, watching: bool, refresh: RefreshInterval) -> Result<()> {
    if !watching {
        return Ok(());
    }
    if input == "-" {
        bail!("--watch cannot be used with stdin");
    }
    if refresh == RefreshInterval::Disabled {
        bail!("--watch needs a refresh interval; got `off`");
    }
    Ok(())
}

async fn watch(path: &Path, config: ViewConfig, format: Format) -> Result<()> {
    let reloader = Arc::new(FileReloader {
        path: path.to_path_buf(),
        config: config.clone(),
        format,
    });
    let mut refresh = AutoRefresh::spawn(config.refresh, reloader);
    tracing::info!(interval = %refresh.interval(), path = %path.display(), "watching job info");

    tokio::signal::ctrl_c().await.context("wait for ctrl-c")?;
    refresh.stop();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ViewConfig::load(cli.config.as_deref()).context("load config")?;

    match cli.command {
        Command::Show {
            input,
            json,
            watch: watching,
            refresh,
        } => {
            if let Some(refresh) = refresh {
                config.refresh = refresh;
            }
            check_watch_args(&input, watching, config.refresh)?;
            let format = if json { Format::Json } else { Format::Text };

            let content = read_input(&input)?;
            let info = JobInfo::from_json(&content).context("parse job info")?;
            println!("{}", render(&info, &config, format)?);

            if watching {
                watch(Path::new(&input), config, format).await?;
            }
        }
    }

    Ok(())
}
