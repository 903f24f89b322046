//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::adapter::AdapterKind;
use crate::environment::DEFAULT_REMOTE_SCHEMES;
use crate::error::Result;
use crate::router::DEFAULT_VIRTUAL_SCHEMES;

/// Which adapter a router should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterChoice {
    /// Follow the host platform.
    #[default]
    Auto,
    /// Always POSIX.
    Posix,
    /// Always Windows.
    Windows,
}

impl AdapterChoice {
    /// The forced adapter kind, or `None` for host detection.
    #[must_use]
    pub fn kind(self) -> Option<AdapterKind> {
        match self {
            Self::Auto => None,
            Self::Posix => Some(AdapterKind::Posix),
            Self::Windows => Some(AdapterKind::Windows),
        }
    }

    /// Parse an adapter name (`auto`, `posix`, `windows`), ignoring case.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "posix" => Some(Self::Posix),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }
}

/// Router configuration.
///
/// Scheme lists hold bare names such as `http` or `vfs`, without `://`.
///
/// # Examples
///
/// ```
/// use streampath::config::{AdapterChoice, Config};
///
/// let config = Config::from_yaml_str("adapter: windows\nvirtual_schemes: [vfs, mem]\n").unwrap();
/// assert_eq!(config.adapter, AdapterChoice::Windows);
/// assert_eq!(config.virtual_schemes, vec!["vfs", "mem"]);
/// assert!(config.remote_schemes.contains(&"https".to_string()));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Adapter selection.
    pub adapter: AdapterChoice,

    /// Schemes whose streams are not on the local filesystem.
    pub remote_schemes: Vec<String>,

    /// Schemes that are always joined POSIX-style.
    pub virtual_schemes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adapter: AdapterChoice::Auto,
            remote_schemes: DEFAULT_REMOTE_SCHEMES.iter().map(|s| (*s).to_string()).collect(),
            virtual_schemes: DEFAULT_VIRTUAL_SCHEMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Parse a YAML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if the YAML is malformed or
    /// names an unknown field.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check that every scheme name is usable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] naming the first bad entry.
    pub fn validate(&self) -> Result<()> {
        validate_schemes("remote_schemes", &self.remote_schemes)?;
        validate_schemes("virtual_schemes", &self.virtual_schemes)
    }
}

/// A scheme name must survive being turned into a `name://` token that the
/// prefix parser recognizes.
fn validate_schemes(field: &str, schemes: &[String]) -> Result<()> {
    for scheme in schemes {
        let message = if scheme.len() < 2 {
            Some("must be at least two characters")
        } else if scheme.contains(['/', '\\']) {
            Some("must not contain slashes")
        } else if scheme.ends_with(':') {
            Some("must be given without the trailing \"://\"")
        } else {
            None
        };

        if let Some(message) = message {
            return Err(crate::error::Error::Validation {
                field: field.into(),
                message: format!("invalid scheme {scheme:?}: {message}"),
            });
        }
    }
    Ok(())
}
