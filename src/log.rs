// src/log.rs
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, fmt::time::Uptime, prelude::*, EnvFilter};

/// Install the global subscriber: `RUST_LOG` filter (default `info`), elapsed
/// timestamps, stderr output, and an appended copy in `log_file` when given.
///
/// A log file that cannot be opened is reported on stderr and skipped.
pub fn init(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_timer(Uptime::default())
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = log_file.and_then(|path| match open_append(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_timer(Uptime::default())
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(e) => {
            eprintln!("log file {} unavailable: {e}", path.display());
            None
        }
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

fn open_append(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Debug-level logging into the test harness's captured output.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
