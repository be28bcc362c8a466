//! Logging initialization: logs go to a file or nowhere, never to the console.
//!
//! stdout carries the agent trace and the answers only. `RUST_LOG` selects levels
//! (default `info`); `LOG_FILE` names a file to append to. Without `LOG_FILE` events are
//! filtered and dropped.

use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::log_format::SpanPathFormat;

const DEFAULT_FILTER: &str = "info,hyper_util=off,reqwest=warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. `bin` is logged once so runs of both binaries can
/// share one log file.
pub fn init(bin: &str) -> Result<(), Box<dyn std::error::Error>> {
    match std::env::var_os("LOG_FILE") {
        Some(path) => init_file(bin, Path::new(&path)),
        None => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::sink)
                        .with_filter(filter()),
                )
                .try_init()?;
            Ok(())
        }
    }
}

fn init_file(bin: &str, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(SpanPathFormat::new())
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_filter(filter()),
        )
        .try_init()?;
    tracing::info!(bin, path = %path.display(), "logging to file");
    Ok(())
}
