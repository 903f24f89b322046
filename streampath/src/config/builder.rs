//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::schema::Config;
use crate::error::Result;

/// Builds a [`Config`] from defaults, an optional file and the environment.
///
/// A file replaces the base as a whole, and fields it omits take the built-in
/// defaults. Environment variables then replace single fields.
///
/// # Examples
///
/// ```
/// use streampath::config::{AdapterChoice, Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_env()
///     .with_config(Config {
///         adapter: AdapterChoice::Posix,
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.adapter, AdapterChoice::Posix);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    base: Option<Config>,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Start from the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `config` instead of the built-in defaults.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.base = Some(config);
        self
    }

    /// Layer the YAML file at `path` over the base, if it exists.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Ignore `STREAMPATH_*` variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Assemble and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an environment
    /// override is invalid, or the result fails [`Config::validate`].
    pub fn build(self) -> Result<Config> {
        let mut config = self.base.unwrap_or_default();

        if let Some(path) = &self.file {
            if let Some(file_config) = ConfigLoader::load_optional(path)? {
                config = file_config;
            }
        }

        if self.skip_env {
            debug!("skipping environment overrides");
        } else {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }
}
