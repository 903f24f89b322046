//! Configuration file loading.

use std::fs;
use std::path::Path;

use log::debug;

use crate::config::schema::Config;
use crate::error::Result;

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use streampath::config::ConfigLoader;
/// use std::path::Path;
///
/// let config = ConfigLoader::load_file(Path::new("streampath.yaml")).unwrap();
/// println!("adapter: {:?}", config.adapter);
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read, or
    /// [`crate::Error::Configuration`] if the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        let config = Config::from_yaml_str(&contents)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like [`ConfigLoader::load_file`], but a missing file yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_optional(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            debug!("no configuration at {}", path.display());
            return Ok(None);
        }
        Self::load_file(path).map(Some)
    }
}
