//! Tracing subscriber bootstrap driven by [`TelemetrySettings`].

use isbn_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the level filter: `RUST_LOG` wins, then the configured directive.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok(), settings)
}

/// An unparsable `env_directive` falls back to `settings.filter`.
fn filter_from(
    env_directive: Option<String>,
    settings: &TelemetrySettings,
) -> anyhow::Result<EnvFilter> {
    if let Some(filter) = env_directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
    {
        return Ok(filter);
    }
    EnvFilter::try_new(&settings.filter)
        .map_err(|e| anyhow::anyhow!("invalid telemetry filter '{}': {}", settings.filter, e))
}

/// Install the global subscriber writing to stderr, leaving stdout to command
/// output. Returns `false` if a subscriber was already set.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<bool> {
    let filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
            .is_ok(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::info!(
            target: "isbn-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(filter: &str) -> TelemetrySettings {
        TelemetrySettings {
            log_format: LogFormat::Pretty,
            filter: filter.to_string(),
        }
    }

    #[test]
    fn rejects_malformed_filter() {
        assert!(filter_from(None, &settings_with("isbn_lookup=loud")).is_err());
    }

    #[test]
    fn env_directive_wins_over_settings() {
        let filter = filter_from(Some("debug".into()), &settings_with("warn")).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn malformed_env_directive_falls_back_to_settings() {
        let filter = filter_from(Some("isbn_lookup=loud".into()), &settings_with("warn")).unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn second_init_is_a_no_op() {
        let settings = TelemetrySettings::default();
        init(&settings).unwrap();
        assert!(!init(&settings).unwrap());
    }
}
