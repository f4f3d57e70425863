//! Command-line interface for protocol retrieval and extraction.
//!
//! Resources are printed as JSON on stdout. The spinner and status lines go
//! to stderr, so the output can be piped.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::ProtocolCache;
use crate::config::ProtocolConfig;
use crate::error::{ProtocolError, Result};
use crate::resource::ResourceContent;
use crate::service::ProtocolService;
use crate::source::FileSource;

/// Default file name for `download`.
pub const DEFAULT_DOWNLOAD_FILE: &str = "latest_protocol.xml";

/// Bundestag Protocol - Extract structured data from the latest plenary protocol.
#[derive(Parser)]
#[command(name = "bundestag-protocol")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read the protocol from a local XML file instead of the DIP API
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Session metadata.
    Metadata,
    /// Table of contents.
    Toc,
    /// Agenda items.
    Agenda,
    /// Deduplicated speaker list.
    Speakers,
    /// All speeches, or one speech by id.
    Speeches {
        /// Speech identifier (e.g., ID2021400100)
        #[arg(long)]
        id: Option<String>,
    },
    /// Speeches given by one speaker.
    Speaker {
        /// Speaker identifier
        id: String,
    },
    /// Speeches given by members of a parliamentary group.
    Fraction {
        /// Group name (e.g., "SPD"), compared case-insensitively
        name: String,
    },
    /// Attachments listed in the table of contents.
    Attachments,
    /// Complete protocol with all views.
    Full,
    /// Case-insensitive keyword search across speeches.
    Search {
        /// Keyword to search for
        keyword: String,
    },
    /// Save the raw protocol XML.
    Download {
        /// Output file (default: latest_protocol.xml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let service = build_service(cli.file.as_deref())?;

    match cli.command {
        Commands::Metadata => print_resource(service.metadata()).await,
        Commands::Toc => print_resource(service.toc()).await,
        Commands::Agenda => print_resource(service.agenda_items()).await,
        Commands::Speakers => print_resource(service.speaker_list()).await,
        Commands::Speeches { id: Some(id) } => print_resource(service.speech(&id)).await,
        Commands::Speeches { id: None } => print_resource(service.speeches()).await,
        Commands::Speaker { id } => print_resource(service.speeches_by_speaker(&id)).await,
        Commands::Fraction { name } => print_resource(service.speeches_by_fraction(&name)).await,
        Commands::Attachments => print_resource(service.attachments()).await,
        Commands::Full => print_resource(service.full_protocol()).await,
        Commands::Search { keyword } => print_resource(service.search(&keyword)).await,
        Commands::Download { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_FILE));
            download_command(&service, &path).await
        }
    }
}

fn build_service(file: Option<&Path>) -> Result<ProtocolService> {
    match file {
        Some(path) => {
            if !path.is_file() {
                return Err(ProtocolError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Protocol file does not exist: {}", path.display()),
                )));
            }
            tracing::debug!(path = %path.display(), "using local protocol file");
            Ok(ProtocolService::new(ProtocolCache::new(FileSource::new(path))))
        }
        None => ProtocolService::from_config(ProtocolConfig::from_env()?),
    }
}

/// Print the JSON body of a resource on stdout.
async fn print_resource(task: impl Future<Output = Result<ResourceContent>>) -> Result<()> {
    let content = with_spinner("Loading plenary protocol...", task).await?;
    println!("{}", content.text);
    Ok(())
}

/// Execute the download command.
async fn download_command(service: &ProtocolService, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(ProtocolError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", parent.display()),
            )));
        }
    }

    eprintln!("{} latest plenary protocol", style("Downloading").bold());

    let xml = with_spinner("Fetching protocol XML...", service.raw_protocol()).await?;
    tokio::fs::write(path, &xml[..]).await?;

    eprintln!("  Size: {} bytes", style(xml.len()).cyan());
    eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
    Ok(())
}

async fn with_spinner<T>(
    message: &'static str,
    task: impl Future<Output = Result<T>>,
) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = task.await;
    pb.finish_and_clear();
    result
}
