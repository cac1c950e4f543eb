// Dayreel CLI binary

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod config;
mod constants;
mod error;
mod tools;
mod metadata;
mod playback;
mod resolver;
mod state;
mod upload;

use state::{reduce, UploadResult, ViewEvent, ViewState};
use upload::{AnalysisClient, DescribeOutcome};

#[derive(Parser)]
#[command(name = "dayreel")]
#[command(about = "Find, play, and analyze daily progress videos", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show footage details for a date
    Show {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<NaiveDate>,
        /// Footage directory (defaults to the configured location)
        #[arg(short, long)]
        footage_dir: Option<PathBuf>,
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all dates with recorded footage
    List {
        /// Footage directory (defaults to the configured location)
        #[arg(short, long)]
        footage_dir: Option<PathBuf>,
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play the footage for a date
    Play {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<NaiveDate>,
        /// Footage directory (defaults to the configured location)
        #[arg(short, long)]
        footage_dir: Option<PathBuf>,
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Upload the footage for a date and print the server's description
    Describe {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<NaiveDate>,
        /// Footage directory (defaults to the configured location)
        #[arg(short, long)]
        footage_dir: Option<PathBuf>,
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { date, footage_dir, config } => cmd_show(date, footage_dir, config),
        Commands::List { footage_dir, config } => cmd_list(footage_dir, config),
        Commands::Play { date, footage_dir, config } => cmd_play(date, footage_dir, config),
        Commands::Describe { date, footage_dir, config } => cmd_describe(date, footage_dir, config),
    }
}

fn cmd_show(
    date: Option<NaiveDate>,
    footage_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cfg = config::load_config(config_path.as_deref())?;
    let dir = resolver::footage_dir(footage_dir, &cfg.footage)?;
    let date = date.unwrap_or_else(today);

    let media = resolver::resolve_for_date(&dir, date);
    let state = reduce(&ViewState::default(), ViewEvent::DateSelected { date, media });

    println!("Date:        {}", date.format(constants::DATE_FORMAT));
    println!("Expected:    {}", dir.join(resolver::expected_filename(date)).display());

    match state.media {
        Some(ref path) => {
            println!("Footage:     present");

            if let Ok(meta) = std::fs::metadata(path) {
                println!("Size:        {}", format_size(meta.len() as i64));
            }

            match metadata::probe(path) {
                Ok(info) => {
                    if let Some(duration) = info.duration_ms {
                        println!("Duration:    {}", format_duration(duration));
                    }
                    if let (Some(w), Some(h)) = (info.width, info.height) {
                        println!("Resolution:  {}x{}", w, h);
                    }
                    if let Some(fps) = info.fps {
                        println!("FPS:         {:.2}", fps);
                    }
                    if let Some(ref codec) = info.codec {
                        println!("Codec:       {}", codec);
                    }
                    if let Some(ref audio) = info.audio_codec {
                        println!("Audio:       {}", audio);
                    }
                }
                Err(e) => {
                    log::warn!("Could not probe {}: {}", path.display(), e);
                    println!("Details:     unavailable");
                }
            }

            println!("Actions:     play, describe");
        }
        None => {
            println!("Footage:     none recorded");
            println!("Actions:     none");
        }
    }

    Ok(())
}

fn cmd_list(footage_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let cfg = config::load_config(config_path.as_deref())?;
    let dir = resolver::footage_dir(footage_dir, &cfg.footage)?;

    let dates = resolver::list_recorded_dates(&dir)?;

    println!("Footage in {} ({} days)", dir.display(), dates.len());
    println!();

    if dates.is_empty() {
        println!(
            "No footage found. Record a clip named {} to get started.",
            resolver::expected_filename(today())
        );
        return Ok(());
    }

    let probe_available = metadata::is_available();

    println!("{:>12}  {:>10}  {:>10}  {}", "Date", "Duration", "Size", "File");
    println!("{}", "-".repeat(55));

    for date in &dates {
        let filename = resolver::expected_filename(*date);
        let path = dir.join(&filename);

        let size = std::fs::metadata(&path)
            .map(|m| format_size(m.len() as i64))
            .unwrap_or_else(|_| "-".to_string());

        let duration = if probe_available {
            metadata::probe(&path)
                .ok()
                .and_then(|info| info.duration_ms)
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string())
        } else {
            "-".to_string()
        };

        println!(
            "{:>12}  {:>10}  {:>10}  {}",
            date.format(constants::DATE_FORMAT).to_string(),
            duration,
            size,
            filename
        );
    }

    Ok(())
}

fn cmd_play(
    date: Option<NaiveDate>,
    footage_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cfg = config::load_config(config_path.as_deref())?;
    let dir = resolver::footage_dir(footage_dir, &cfg.footage)?;
    let date = date.unwrap_or_else(today);

    match resolver::resolve_for_date(&dir, date) {
        Some(path) => {
            println!("Playing {}", path.display());
            playback::play(&path)?;
            Ok(())
        }
        None => {
            println!("No footage recorded for {}.", date.format(constants::DATE_FORMAT));
            Ok(())
        }
    }
}

fn cmd_describe(
    date: Option<NaiveDate>,
    footage_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cfg = config::load_config(config_path.as_deref())?;
    let dir = resolver::footage_dir(footage_dir, &cfg.footage)?;
    let date = date.unwrap_or_else(today);

    let media = resolver::resolve_for_date(&dir, date);
    let mut state = reduce(&ViewState::default(), ViewEvent::DateSelected { date, media });

    let video = match state.media.clone() {
        Some(v) => v,
        None => {
            println!(
                "No footage recorded for {}; nothing to describe.",
                date.format(constants::DATE_FORMAT)
            );
            return Ok(());
        }
    };

    let client = AnalysisClient::new(&cfg.server);
    state = reduce(&state, ViewEvent::UploadRequested);
    println!("Uploading {} to {} ...", video.display(), cfg.server.describe_endpoint);

    let task = client.describe_in_background(&video)?;
    let outcome = task.join();

    match &outcome {
        Ok(DescribeOutcome::Description(_)) => {}
        Ok(DescribeOutcome::Rejected(reason)) => {
            log::error!("Description server rejected the upload: {}", reason);
        }
        Err(e) => log::error!("Description request failed: {}", e),
    }

    state = reduce(
        &state,
        ViewEvent::ResponseReceived(UploadResult::from_describe(&outcome)),
    );

    if state.description.is_empty() {
        println!("No description available.");
    } else {
        println!();
        println!("Description: {}", state.description);
    }

    Ok(())
}

// --- Helper Functions ---

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn format_duration(ms: i64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

fn format_size(bytes: i64) -> String {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
