//! Injected collaborators.
//!
//! The path algebra is pure apart from a handful of reads of the host
//! environment: the current working directory, the per-drive working
//! directories Windows keeps, the host OS, and whether a stream wrapper points
//! at the local filesystem. All of them go through the [`Environment`] trait.

use std::collections::HashMap;
use std::env;

use crate::error::{Error, Result};

/// Scheme names treated as remote streams by default.
///
/// Any scheme not listed here is considered local.
pub const DEFAULT_REMOTE_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps", "data"];

/// Read-only view of the environment the path algebra depends on.
#[cfg_attr(test, mockall::automock)]
pub trait Environment: Send + Sync {
    /// The current working directory, in the host's native separator style.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined or is not valid
    /// UTF-8.
    fn current_dir(&self) -> Result<String>;

    /// The last working directory recorded for a Windows drive (`"c:"`).
    fn drive_dir(&self, device: &str) -> Option<String>;

    /// Whether the host OS uses Windows path conventions.
    fn host_is_windows(&self) -> bool;

    /// Whether a scheme prefix such as `"glob://"` denotes a local stream.
    fn is_local_stream(&self, prefix: &str) -> bool;
}

fn scheme_name(prefix: &str) -> &str {
    prefix.strip_suffix("://").unwrap_or(prefix)
}

fn is_remote(remote_schemes: &[String], prefix: &str) -> bool {
    let name = scheme_name(prefix);
    remote_schemes.iter().any(|s| s.eq_ignore_ascii_case(name))
}

/// The process environment.
///
/// # Examples
///
/// ```
/// use streampath::{Environment, SystemEnvironment};
///
/// let env = SystemEnvironment::new();
/// assert!(env.is_local_stream("glob://"));
/// assert!(!env.is_local_stream("http://"));
/// ```
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    remote_schemes: Vec<String>,
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self {
            remote_schemes: DEFAULT_REMOTE_SCHEMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl SystemEnvironment {
    /// Create an environment with the default remote scheme list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list of scheme names considered remote.
    ///
    /// # Examples
    ///
    /// ```
    /// use streampath::{Environment, SystemEnvironment};
    ///
    /// let env = SystemEnvironment::new().with_remote_schemes(["s3"]);
    /// assert!(!env.is_local_stream("s3://"));
    /// assert!(env.is_local_stream("http://"));
    /// ```
    #[must_use]
    pub fn with_remote_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remote_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Scheme names considered remote.
    #[must_use]
    pub fn remote_schemes(&self) -> &[String] {
        &self.remote_schemes
    }
}

impl Environment for SystemEnvironment {
    fn current_dir(&self) -> Result<String> {
        let cwd = env::current_dir()?;
        cwd.into_os_string()
            .into_string()
            .map_err(|raw| Error::InvalidInput {
                path: raw.to_string_lossy().into_owned(),
                reason: "current directory is not valid UTF-8".to_string(),
            })
    }

    fn drive_dir(&self, device: &str) -> Option<String> {
        // cmd.exe records these as hidden variables named like "=C:".
        let key = format!("={device}");
        env::vars_os().find_map(|(name, value)| {
            let matches = name.to_str()?.eq_ignore_ascii_case(&key);
            if matches {
                value.into_string().ok()
            } else {
                None
            }
        })
    }

    fn host_is_windows(&self) -> bool {
        cfg!(windows)
    }

    fn is_local_stream(&self, prefix: &str) -> bool {
        !is_remote(&self.remote_schemes, prefix)
    }
}

/// A fixed environment.
///
/// Useful when resolution must not depend on the process state, for example
/// when resolving Windows paths on a POSIX host.
///
/// # Examples
///
/// ```
/// use streampath::{Environment, StaticEnvironment};
///
/// let env = StaticEnvironment::new("c:\\users\\me")
///     .with_windows_host(true)
///     .with_drive_dir("d:", "d:\\games");
///
/// assert_eq!(env.current_dir().unwrap(), "c:\\users\\me");
/// assert_eq!(env.drive_dir("D:").as_deref(), Some("d:\\games"));
/// assert!(env.drive_dir("e:").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    cwd: String,
    drive_dirs: HashMap<String, String>,
    windows: bool,
    remote_schemes: Vec<String>,
}

impl StaticEnvironment {
    /// Create an environment reporting `cwd` as the working directory.
    #[must_use]
    pub fn new(cwd: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            drive_dirs: HashMap::new(),
            windows: false,
            remote_schemes: SystemEnvironment::default().remote_schemes,
        }
    }

    /// Record a working directory for a drive such as `"c:"`.
    #[must_use]
    pub fn with_drive_dir(mut self, device: &str, dir: impl Into<String>) -> Self {
        self.drive_dirs
            .insert(device.to_ascii_lowercase(), dir.into());
        self
    }

    /// Report a Windows host.
    #[must_use]
    pub fn with_windows_host(mut self, windows: bool) -> Self {
        self.windows = windows;
        self
    }

    /// Replace the list of scheme names considered remote.
    #[must_use]
    pub fn with_remote_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remote_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }
}

impl Environment for StaticEnvironment {
    fn current_dir(&self) -> Result<String> {
        Ok(self.cwd.clone())
    }

    fn drive_dir(&self, device: &str) -> Option<String> {
        self.drive_dirs.get(&device.to_ascii_lowercase()).cloned()
    }

    fn host_is_windows(&self) -> bool {
        self.windows
    }

    fn is_local_stream(&self, prefix: &str) -> bool {
        !is_remote(&self.remote_schemes, prefix)
    }
}
