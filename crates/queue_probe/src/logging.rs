//! Logging system setup.
//!
//! Structured logging through `tracing`, filtered by `RUST_LOG` when set and
//! by the configured level otherwise.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingSettings;

/// Builds the event filter: `RUST_LOG` wins, then the configured level.
///
/// # Arguments
/// * `level` - Fallback filter directive, usually `logging.level` from the
///   configuration (e.g. "info", "queue_probe=debug")
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global tracing subscriber.
///
/// Output goes to stdout through the `fmt` layer, human-readable by default
/// or one JSON object per line when `json_format` is set. Targets are left
/// out so each line reads as the probe's own narration.
///
/// # Arguments
/// * `settings` - The `[logging]` section after CLI overrides
///
/// # Returns
/// * `Result<()>` - Success, or an error if a global subscriber has already
///   been installed
///
/// # Environment Variables
/// * `RUST_LOG` - Overrides the configured level (e.g. "debug",
///   "queue_probe=trace,tungstenite=warn")
///
/// # Examples
/// ```no_run
/// use queue_probe::config::LoggingSettings;
/// use queue_probe::logging::setup_logging;
///
/// setup_logging(&LoggingSettings::default()).expect("logging already initialized");
/// ```
pub fn setup_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = build_filter(&settings.level);

    if settings.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(false))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()?;
    }

    info!("🔧 Logging initialized with level: {}", settings.level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_setup() {
        let settings = LoggingSettings::default();

        // Only the first installation in a test binary can succeed.
        let _ = setup_logging(&settings);
        assert!(setup_logging(&settings).is_err());
    }
}
