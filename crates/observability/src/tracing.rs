//! Tracing/logging initialization.
//!
//! Logs go to stderr so that stdout carries only the estimate (plain or JSON).

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Logging settings as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression). `RUST_LOG` wins when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Filter used when `RUST_LOG` is absent; falls back to `warn` on a bad directive.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.filter());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if config.json {
        builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init()
    } else {
        builder.compact().try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet_plain_text() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.level, "warn");
        assert!(!cfg.json);
    }

    #[test]
    fn bad_directive_falls_back() {
        let cfg = LoggingConfig {
            level: "petrocost=loud".to_string(),
            json: false,
        };
        assert!(cfg.filter().to_string().contains("warn"));
    }

    #[test]
    fn init_twice_is_noop() {
        let cfg = LoggingConfig::default();
        init(&cfg);
        init(&LoggingConfig {
            level: "debug".into(),
            json: true,
        });
    }
}
