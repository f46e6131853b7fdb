//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout, so the dashboard logs to a file in the data
//! directory. One-shot commands log to stderr. The filter comes from
//! `CA_TRACKER_LOG` and defaults to `info`.

use crate::constants::{ENV_LOG, LOG_FILE};
use crate::persistence::DataDir;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Append logs to `<data_dir>/ca-tracker.log`.
pub fn init_file(data_dir: &DataDir) -> io::Result<()> {
    data_dir.ensure()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.path(LOG_FILE))?;

    // A subscriber may already be installed (tests); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Log to stderr, warnings and above unless `CA_TRACKER_LOG` says otherwise.
pub fn init_stderr() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
