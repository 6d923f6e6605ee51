use std::sync::{Once, OnceLock};

use tracing_appender::rolling::{self, Builder};
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, Layer as _};

static INIT_LOG: Once = Once::new();
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Install the global subscriber: terminal output, plus a daily rolling
/// log file when a directory is given.
///
/// Only the first call has any effect.
pub fn log_init(filter: String, log_path: Option<String>) {
    INIT_LOG.call_once(|| {
        let terminal_layer = Layer::new()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true);

        let file_layer = log_path.and_then(|log_directory| {
            let file_appender = match Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix("movie-catalog")
                .filename_suffix("log")
                .build(&log_directory)
            {
                Ok(file_appender) => file_appender,
                Err(err) => {
                    eprintln!("Failed to create log file in {}: {:?}", log_directory, err);
                    return None;
                }
            };
            let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes the file writer, and so it must live as long as the program
            let _ = LOG_GUARD.set(guard);

            Some(
                Layer::new()
                    .with_writer(non_blocking_file_writer)
                    .with_ansi(false)
                    .boxed(),
            )
        });

        // RUST_LOG wins over the provided filter
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| filter.into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(terminal_layer)
            .init();
    });
}

/// Default initialize tracing log.
///
/// Must also import [`catalog_core::core::logging::log_init`] function.
///
/// ## Using
/// ```no_run
/// use catalog_core::{core::logging::log_init, init_log};
///
/// init_log!();
/// tracing::info!("Adding movie: {}", "Matrix");
/// ```
///
/// # Configuring
/// Standard `RUST_LOG` environment variable can be used to configure, e.g.:
///
/// ```bash
/// export RUST_LOG="movie_catalog=debug,catalog_core=debug"
/// ```
#[macro_export]
macro_rules! init_log {
    () => {
        log_init(format!("{}=info", env!("CARGO_CRATE_NAME")), None);
    };
    ($log_path:expr) => {
        log_init(format!("{}=info", env!("CARGO_CRATE_NAME")), $log_path);
    };
    ($filter:expr, $log_path:expr) => {
        log_init($filter, $log_path);
    };
}
