use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with tracing.
///
/// If `log_dir` is provided, logs will also be written to a file in that directory.
/// The `verbose` flag turns on per-note debug logs from the timing core.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));

    if let Some(dir) = log_dir {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "beatparry.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Flushes on drop; the subscriber lives for the whole process.
        std::mem::forget(guard);

        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("beatparry=debug,warn")
    } else {
        EnvFilter::new("beatparry=info,warn")
    }
}
