//! Environment variable overrides.
//!
//! | Variable                      | Field             | Format           |
//! |-------------------------------|-------------------|------------------|
//! | `STREAMPATH_ADAPTER`          | `adapter`         | `auto`, `posix`, `windows` |
//! | `STREAMPATH_REMOTE_SCHEMES`   | `remote_schemes`  | comma-separated  |
//! | `STREAMPATH_VIRTUAL_SCHEMES`  | `virtual_schemes` | comma-separated  |

use std::env;

use log::debug;

use crate::config::schema::{AdapterChoice, Config};
use crate::error::{Error, Result};

/// Variable selecting the adapter.
pub const ADAPTER_VAR: &str = "STREAMPATH_ADAPTER";
/// Variable replacing the remote scheme list.
pub const REMOTE_SCHEMES_VAR: &str = "STREAMPATH_REMOTE_SCHEMES";
/// Variable replacing the virtual scheme list.
pub const VIRTUAL_SCHEMES_VAR: &str = "STREAMPATH_VIRTUAL_SCHEMES";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use streampath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `STREAMPATH_*` overrides to `config`.
    ///
    /// List variables replace the configured list rather than extend it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `STREAMPATH_ADAPTER` names an unknown
    /// adapter.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(value) = env::var(ADAPTER_VAR) {
            config.adapter = AdapterChoice::parse(&value).ok_or_else(|| Error::Validation {
                field: ADAPTER_VAR.into(),
                message: format!("Invalid adapter: '{value}' (expected auto/posix/windows)"),
            })?;
            debug!("{ADAPTER_VAR} overrides adapter with {:?}", config.adapter);
        }

        if let Ok(value) = env::var(REMOTE_SCHEMES_VAR) {
            config.remote_schemes = Self::parse_list(&value);
            debug!("{REMOTE_SCHEMES_VAR} overrides remote schemes");
        }

        if let Ok(value) = env::var(VIRTUAL_SCHEMES_VAR) {
            config.virtual_schemes = Self::parse_list(&value);
            debug!("{VIRTUAL_SCHEMES_VAR} overrides virtual schemes");
        }

        Ok(())
    }

    /// Split a comma-separated list, dropping blank entries.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
