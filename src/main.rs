//! # Quill - A Small Terminal Text Editor
//!
//! Opens one file in a raw-mode terminal and edits it in place.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start with an empty document
//! cargo run
//!
//! # Open (or create) a file
//! cargo run -- notes.txt
//!
//! # Log to a file while editing
//! cargo run -- notes.txt --log-file quill.log -vv
//! ```

use anyhow::Context;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use quill_core::{CLEAR_SCREEN, Config, ConfigError, Editor, Terminal};
use quill_term::RawTerminal;

/// Quill - a small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is busy drawing the editor)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Tab width, overriding the config file
    #[arg(long, value_name = "N")]
    tab_stop: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, args.verbose)?;
    }
    tracing::info!("Starting Quill v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    let size = quill_term::screen_size().context("Failed to query terminal size")?;

    let mut editor = Editor::new(config, size);
    if let Some(file) = &args.file {
        editor.open(&file.display().to_string())?;
    }

    let mut terminal = RawTerminal::enable(editor.config().terminal.read_timeout_tenths)
        .context("Failed to enable raw mode")?;

    if let Err(err) = editor.run(&mut terminal) {
        let _ = terminal.write_frame(CLEAR_SCREEN);
        drop(terminal);
        tracing::error!(%err, "editor stopped");
        return Err(err.into());
    }

    Ok(())
}

/// Sends log output to `path`. `RUST_LOG` wins over `-v` when set.
fn init_logging(path: &Path, verbose: u8) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();
    Ok(())
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Reads the config file and applies command line overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match Config::load() {
            Ok(config) => config,
            Err(ConfigError::NoConfigDir) => {
                tracing::warn!("no config directory, using defaults");
                Config::default()
            }
            Err(err) => return Err(err).context("Failed to load config"),
        },
    };

    if let Some(tab_stop) = args.tab_stop {
        config.editor.tab_stop = tab_stop;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
