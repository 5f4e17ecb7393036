//! Code-operated lock console.
//!
//! # Usage
//!
//! ```bash
//! # Codes on the command line, entries on stdin
//! printf '00000000\n12345678\n' | codelock --primary 12345678 --supercode 87654321
//!
//! # Everything from a config file, JSON reports
//! codelock --config lock.json --json < entries.txt
//! ```
//!
//! Reports go to stdout, logs to stderr.

mod config;
mod console;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use codelock_core::LockState;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LockConfig;
use crate::console::OutputFormat;

/// Code-operated lock console
#[derive(Parser, Debug)]
#[command(name = "codelock")]
#[command(about = "Drive a code-operated lock from standard input")]
#[command(version)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Primary code (overrides the config file)
    #[arg(short, long)]
    primary: Option<String>,

    /// Supercode (overrides the config file)
    #[arg(short, long)]
    supercode: Option<String>,

    /// Initial state (locked, unlocked, error)
    #[arg(long)]
    initial_state: Option<LockState>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print reports as JSON lines
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(LockConfig, OutputFormat)> {
        let mut config = match &self.config {
            Some(path) => LockConfig::load(path)?,
            None => LockConfig::default(),
        };

        if let Some(primary) = self.primary {
            config.primary = Some(primary);
        }
        if let Some(supercode) = self.supercode {
            config.supercode = Some(supercode);
        }
        if let Some(state) = self.initial_state {
            config.initial_state = state;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }

        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        Ok((config, format))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, format) = Args::parse().into_config()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut lock = config.build_lock().context("Failed to configure lock")?;
    tracing::info!(
        lock_id = %lock.id(),
        state = %lock.state(),
        "Lock ready, reading codes from stdin"
    );

    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    let summary = console::run(&mut lock, input, &mut output, format).await?;

    tracing::info!(
        applied = summary.applied,
        invalid = summary.invalid,
        state = %lock.state(),
        "Input closed"
    );

    Ok(())
}
