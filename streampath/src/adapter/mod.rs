//! OS-specific path conventions.
//!
//! An adapter bundles the separator conventions of one platform with the
//! join, normalize, resolve and relative algorithms for it. Two adapters exist:
//!
//! - [`PosixAdapter`]: `/` separator, case-sensitive.
//! - [`WindowsAdapter`]: `\` separator (accepts `/` on input), case-insensitive,
//!   aware of drive letters and UNC roots.
//!
//! Adapters are plain values. Both can be used on any host, which is how
//! Windows paths are resolved on a POSIX machine and vice versa.
//!
//! # Examples
//!
//! ```
//! use streampath::adapter::{PathAdapter, PosixAdapter, WindowsAdapter};
//!
//! let posix = PosixAdapter::new();
//! assert_eq!(posix.join(&["/var/lib", "../", "file/"]), "/var/file/");
//!
//! let windows = WindowsAdapter::new();
//! assert_eq!(windows.join(&["c:", "file"]), "c:\\file");
//! assert_eq!(windows.join(&["c:.", "file"]), "c:file");
//! ```

mod posix;
mod windows;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fmt;
use std::sync::Arc;

use crate::environment::Environment;
use crate::error::{Error, Result};

pub use posix::PosixAdapter;
pub use windows::{DeviceSplit, WindowsAdapter};

/// The platform convention an adapter implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// POSIX paths.
    Posix,
    /// Windows paths.
    Windows,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl AdapterKind {
    /// The kind matching the host reported by `env`.
    ///
    /// # Examples
    ///
    /// ```
    /// use streampath::adapter::AdapterKind;
    /// use streampath::StaticEnvironment;
    ///
    /// let env = StaticEnvironment::new("c:\\").with_windows_host(true);
    /// assert_eq!(AdapterKind::detect(&env), AdapterKind::Windows);
    /// ```
    #[must_use]
    pub fn detect(env: &dyn Environment) -> Self {
        if env.host_is_windows() {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Build an adapter of this kind reading from `env`.
    #[must_use]
    pub fn build(self, env: Arc<dyn Environment>) -> Arc<dyn PathAdapter> {
        match self {
            Self::Posix => Arc::new(PosixAdapter::with_environment(env)),
            Self::Windows => Arc::new(WindowsAdapter::with_environment(env)),
        }
    }
}

/// A path broken into its parts, as produced by [`PathAdapter::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPath {
    /// Root, such as `/` or `c:\`.
    pub root: String,
    /// Directory portion, including the root.
    pub dir: String,
    /// Last portion, with extension.
    pub base: String,
    /// Extension with its leading dot.
    pub ext: String,
    /// Last portion without extension.
    pub name: String,
}

/// Path operations for one platform convention.
///
/// `resolve` and `relative` may consult the adapter's [`Environment`] for the
/// working directory and are therefore fallible. The other operations are
/// pure string transforms.
pub trait PathAdapter: fmt::Debug + Send + Sync {
    /// Which convention this adapter implements.
    fn kind(&self) -> AdapterKind;

    /// The path separator used in output.
    fn separator(&self) -> &'static str;

    /// The separator between entries of a `PATH`-style list.
    fn delimiter(&self) -> &'static str;

    /// Whether path comparison distinguishes case.
    fn is_case_sensitive(&self) -> bool;

    /// Whether `path` is absolute.
    fn is_absolute(&self, path: &str) -> bool;

    /// Join non-empty `paths` with the separator and normalize the result.
    fn join(&self, paths: &[&str]) -> String;

    /// Collapse `.`, `..` and repeated separators in `path`.
    fn normalize(&self, path: &str) -> String;

    /// Resolve `paths` right to left into an absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is needed and cannot be read.
    fn resolve(&self, paths: &[&str]) -> Result<String>;

    /// The relative path leading from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if resolving either operand fails.
    fn relative(&self, from: &str, to: &str) -> Result<String>;

    /// The directory portion of `path`.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::NotImplemented`] unless an adapter overrides it.
    fn dirname(&self, _path: &str) -> Result<String> {
        Err(Error::NotImplemented {
            operation: "dirname",
        })
    }

    /// The last portion of `path`, optionally without `ext`.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::NotImplemented`] unless an adapter overrides it.
    fn basename(&self, _path: &str, _ext: Option<&str>) -> Result<String> {
        Err(Error::NotImplemented {
            operation: "basename",
        })
    }

    /// The extension of `path`, including the leading dot.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::NotImplemented`] unless an adapter overrides it.
    fn extname(&self, _path: &str) -> Result<String> {
        Err(Error::NotImplemented {
            operation: "extname",
        })
    }

    /// Assemble a path from its parts.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::NotImplemented`] unless an adapter overrides it.
    fn format(&self, _parts: &ParsedPath) -> Result<String> {
        Err(Error::NotImplemented {
            operation: "format",
        })
    }

    /// Break `path` into its parts.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::NotImplemented`] unless an adapter overrides it.
    fn parse(&self, _path: &str) -> Result<ParsedPath> {
        Err(Error::NotImplemented {
            operation: "parse",
        })
    }
}

/// Emit one `..` per unmatched `from` segment, then the unmatched `to` tail.
fn relative_parts<'a>(from_len: usize, to: &[&'a str], same: usize) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = std::iter::repeat("..").take(from_len - same).collect();
    out.extend_from_slice(&to[same..]);
    out
}

/// Length of the common leading run of two segment lists.
fn common_prefix_len(from: &[&str], to: &[&str]) -> usize {
    from.iter().zip(to).take_while(|(a, b)| a == b).count()
}
