/// CLI configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "dvtag.toml";

/// Environment variable prefix (`DVTAG_METADATA_DIR`, `DVTAG_FLATTEN`, ...)
const ENV_PREFIX: &str = "DVTAG";

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Config file not found: {0}")]
    MissingFile(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Directory of `<WORKID>.json` metadata records
    pub metadata_dir: PathBuf,

    /// Move disc-prefixed files to the work root
    pub flatten: bool,

    /// Search below each given path for work folders
    pub recursive: bool,

    /// `tracing` filter directive
    #[serde(default)]
    pub log_filter: Option<String>,
}

/// Values given on the command line; they win over file and environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub metadata_dir: Option<PathBuf>,
    pub flatten: bool,
    pub no_recursive: bool,
}

impl Settings {
    /// Load defaults, then the config file, then `DVTAG_*` variables, then CLI overrides
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("metadata_dir", "./metadata")?
            .set_default("flatten", false)?
            .set_default("recursive", true)?;

        match config_file {
            Some(path) if !path.exists() => {
                return Err(SettingsError::MissingFile(path.display().to_string()));
            }
            Some(path) => {
                builder = builder.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    builder = builder.add_source(config::File::from(default_path));
                }
            }
        }

        builder = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "metadata_dir",
                overrides
                    .metadata_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string()),
            )?
            .set_override_option("flatten", overrides.flatten.then_some(true))?
            .set_override_option("recursive", overrides.no_recursive.then_some(false))?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.metadata_dir.is_dir() {
            return Err(SettingsError::Invalid(format!(
                "metadata directory {} does not exist (set metadata_dir or DVTAG_METADATA_DIR)",
                self.metadata_dir.display()
            )));
        }

        Ok(())
    }
}
