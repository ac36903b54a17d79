//! Tracing subscriber for clipsync.
//!
//! Writes formatted events to stdout and, when the log directory is
//! writable, to `<data_dir>/logs/clipsync.log` through a non-blocking
//! appender. `RUST_LOG` replaces the default directives.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

pub const LOG_FILE_NAME: &str = "clipsync.log";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default directives when `RUST_LOG` is unset.
///
/// # Returns
///
/// A global level followed by the same level for each workspace crate:
/// `debug` in debug builds, `info` in release builds.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("cs_core={level}"),
        format!("cs_app={level}"),
        format!("cs_infra={level}"),
        format!("clipsync_lib={level}"),
    ]
}

/// Registers the global subscriber. Call once, before any event.
///
/// File logging is best effort: when `logs_dir` cannot be created the
/// failure goes to stderr and events only reach stdout.
///
/// # Errors
/// A subscriber is already registered.
///
/// # Examples
///
/// ```ignore
/// init_tracing_subscriber(&logs_dir(&data_dir))?;
/// tracing::info!("logging to stdout and clipsync.log");
/// ```
pub fn init_tracing_subscriber(logs_dir: &Path) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer(logs_dir) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let subscriber = registry().with(env_filter).with(stdout_layer);
    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directives_follow_build_mode() {
        let dev = build_filter_directives(true);
        assert_eq!(dev[0], "debug");
        assert!(dev.contains(&"cs_app=debug".to_string()));

        let prod = build_filter_directives(false);
        assert_eq!(prod[0], "info");
        assert!(prod.contains(&"cs_infra=info".to_string()));
    }
}
