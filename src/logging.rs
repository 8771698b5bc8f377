use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// Used while the terminal UI owns the screen and no log file is set.
    Discard,
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "csv_quiz=debug,info"
    } else {
        "csv_quiz=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_logger(verbose: bool, target: LogTarget<'_>) -> std::io::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    match target {
        LogTarget::Stderr => registry.with(layer.with_writer(std::io::stderr)).init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            registry
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .init()
        }
        LogTarget::Discard => registry.with(layer.with_writer(std::io::sink)).init(),
    }

    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
