//! Tracing setup for the `solace` binary.

use solace_infrastructure::SolacePaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directives, e.g. `SOLACE_LOG=solace_application=debug`.
pub const LOG_ENV: &str = "SOLACE_LOG";

/// Installs stderr logging plus a daily rolling file.
///
/// `SOLACE_LOG` wins over the configured level. The file layer is skipped
/// when the log directory cannot be created. Keep the returned guard alive
/// until exit so buffered lines are flushed.
pub fn init(configured_level: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|e| {
            eprintln!(
                "WARN: log level '{}' is not a valid tracing filter ({}); falling back to 'info'",
                configured_level, e
            );
            EnvFilter::new("info")
        });

    let (file_layer, guard) = match SolacePaths::log_dir() {
        Ok(dir) if std::fs::create_dir_all(&dir).is_ok() => {
            let appender = tracing_appender::rolling::daily(dir, "solace.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init();

    if let Err(e) = installed {
        eprintln!("WARN: logging already initialised: {}", e);
    }
    guard
}
