//! Layered configuration.
//!
//! Sources, later ones winning:
//! built-in defaults → `<dir>/default.toml` → `<dir>/$PETROCOST_ENV.toml`
//! → `PETROCOST__SECTION__KEY` environment variables → command-line flags.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use petrocost_ai::OutputMode;
use petrocost_observability::LoggingConfig;

use crate::args::Args;

pub const DEFAULT_MODEL_PATH: &str = "models/modelo_costos.json";
pub const ENV_PREFIX: &str = "PETROCOST";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub model: ModelSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    /// Serialized model artifact, loaded once at startup.
    pub path: PathBuf,
    /// How the model output is interpreted.
    #[serde(default)]
    pub mode: OutputMode,
}

impl Settings {
    /// Load configuration from `config_dir` and the environment.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        Self::load_with_env(config_dir, env_source())
    }

    /// Same as [`Settings::load_from`] with an explicit environment source.
    pub fn load_with_env<P: AsRef<Path>>(
        config_dir: P,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        builder(config_dir.as_ref())?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Apply command-line overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.model {
            self.model.path = path.clone();
        }
        if let Some(mode) = args.command.output().and_then(|o| o.mode) {
            self.model.mode = mode;
        }
        if let Some(level) = args.verbosity_filter() {
            self.logging.level = level.to_string();
        }
    }
}

fn builder(config_dir: &Path) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let profile = std::env::var("PETROCOST_ENV").unwrap_or_else(|_| "development".to_string());

    Ok(Config::builder()
        .set_default("model.path", DEFAULT_MODEL_PATH)?
        .set_default("model.mode", OutputMode::default().as_str())?
        .set_default("logging.level", "warn")?
        .set_default("logging.json", false)?
        .add_source(File::from(config_dir.join("default.toml")).required(false))
        .add_source(File::from(config_dir.join(profile)).required(false)))
}

/// `PETROCOST__MODEL__PATH`, `PETROCOST__LOGGING__JSON`, ...
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
