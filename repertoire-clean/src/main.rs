//! repertoire-clean - Repertoire document cleaner
//!
//! Loads a repertoire document, fixes known piece-name typos, removes repeated
//! pieces, merges participants listed more than once in a group, and writes the
//! result back to the same file.
//!
//! **Usage:**
//! ```bash
//! repertoire-clean [--file <path>] [clean] [--dry-run]
//! repertoire-clean add --group <name> --participant <name> <piece>...
//! repertoire-clean summary
//! repertoire-clean search --piece <text> [--count <n>]
//! repertoire-clean pieces
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repertoire_common::config::{load_config, resolve_correction_table, resolve_document_path};
use repertoire_common::query::DEFAULT_SEARCH_LIMIT;
use repertoire_common::{
    add_repertoire, load_document, normalize_document, render_document, save_document, search,
    unique_pieces, Document, DocumentSummary,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for repertoire-clean
#[derive(Parser, Debug)]
#[command(name = "repertoire-clean")]
#[command(about = "Clean and merge participant repertoires in a JSON document")]
#[command(version)]
struct Args {
    /// Document to read and overwrite
    #[arg(short, long, global = true, value_name = "FILE")]
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON object of piece-name corrections, replacing the configured table
    #[arg(long, global = true, value_name = "FILE")]
    corrections: Option<PathBuf>,

    /// Log level when RUST_LOG is not set, overriding the config file (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize the document and save it (default)
    Clean {
        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Normalize, add pieces to a participant, and save
    Add {
        /// Group to add to (created if missing)
        #[arg(short, long)]
        group: String,

        /// Participant to add to (created if missing)
        #[arg(short, long)]
        participant: String,

        /// Pieces to add
        #[arg(required = true)]
        pieces: Vec<String>,

        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print group, participant and piece totals without modifying the file
    Summary,

    /// List participants who know a piece (case-insensitive substring match)
    Search {
        /// Text to look for in piece names
        #[arg(long)]
        piece: String,

        /// Maximum number of participants to list
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        count: usize,
    },

    /// List every distinct piece in first-seen order
    Pieces,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG or --log-level pin the filter; otherwise the configured level
    // replaces the default once the config file has been read
    let env_filter = EnvFilter::try_from_default_env().ok();
    let pinned = env_filter.is_some() || args.log_level.is_some();
    let initial = env_filter
        .unwrap_or_else(|| EnvFilter::new(args.log_level.as_deref().unwrap_or("info")));
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if !pinned {
        filter_handle
            .reload(EnvFilter::new(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }

    info!(
        "Starting repertoire-clean v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let path = resolve_document_path(args.file.as_deref(), &config);
    let table = resolve_correction_table(args.corrections.as_deref(), &config)
        .context("Failed to load corrections")?;
    info!("Document path: {}", path.display());
    info!("Using {} corrections", table.len());

    let mut document = load_document(&path)
        .with_context(|| format!("Failed to load document {}", path.display()))?;

    match args.command.unwrap_or(Command::Clean { dry_run: false }) {
        Command::Clean { dry_run } => {
            normalize_document(&table, &mut document);
            finish(&path, &document, dry_run)?;
        }
        Command::Add {
            group,
            participant,
            pieces,
            dry_run,
        } => {
            normalize_document(&table, &mut document);
            add_repertoire(&table, &mut document, &group, &participant, pieces.as_slice());
            finish(&path, &document, dry_run)?;
        }
        Command::Summary => {
            println!("{}", DocumentSummary::from_document(&document));
        }
        Command::Search { piece, count } => {
            let matches = search(&document, &piece, count);
            info!("{} participants know a piece matching '{}'", matches.len(), piece);
            for m in matches {
                println!("{}\t{}", m.name, m.group);
            }
        }
        Command::Pieces => {
            for title in unique_pieces(&document) {
                println!("{}", title);
            }
        }
    }

    Ok(())
}

/// Save the document, or print it on a dry run
fn finish(path: &Path, document: &Document, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{}", render_document(document)?);
        info!("Dry run: {} not modified", path.display());
        return Ok(());
    }

    save_document(path, document)
        .with_context(|| format!("Failed to save document {}", path.display()))?;
    println!("Data cleaned and saved to {}", path.display());
    Ok(())
}
