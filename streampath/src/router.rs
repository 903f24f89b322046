//! Scheme-aware path operations.
//!
//! [`PathRouter`] is the main entry point. It strips stream-wrapper prefixes
//! (`glob://`, `vfs://`, `http://`, ...) from its arguments, runs the path
//! algebra of the selected adapter on what is left, and puts the winning
//! prefix back on the result.
//!
//! # Routing
//!
//! - Arguments without a prefix inherit the prefix seen so far.
//! - An argument with a different prefix than the one seen so far is a root
//!   change: everything accumulated before it is discarded.
//! - A prefix made only of `file://` is dropped from the output.
//! - Virtual streams (`vfs://`) and streams the [`Environment`] reports as not
//!   local have no filesystem root to resolve against, so their fragments are
//!   joined POSIX-style instead of resolved.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use streampath::{PathRouter, StaticEnvironment};
//!
//! let router = PathRouter::with_environment(Arc::new(StaticEnvironment::new("/srv")));
//!
//! assert_eq!(router.resolve(["/var/lib", "glob://../", "file/"]).unwrap(), "glob:///var/file");
//! assert_eq!(router.resolve(["glob://bar", "http://foo"]).unwrap(), "http://foo");
//! assert_eq!(router.resolve(["vfs://foo", "/bar"]).unwrap(), "vfs://foo/bar");
//! assert!(router.is_inside("/path/foo", "/path").unwrap());
//! ```

use std::ffi::OsStr;
use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::adapter::{AdapterKind, PathAdapter, PosixAdapter};
use crate::config::Config;
use crate::environment::{Environment, SystemEnvironment};
use crate::error::{Error, Result};
use crate::input::{path_str, path_strings};
use crate::scheme::{self, SchemeSplit, DEFAULT_PREFIX};

/// Scheme names joined POSIX-style by default.
pub const DEFAULT_VIRTUAL_SCHEMES: &[&str] = &["vfs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Join,
    Resolve,
}

fn scheme_token(name: &str) -> String {
    format!("{}://", name.to_ascii_lowercase())
}

/// Path operations over possibly scheme-prefixed paths.
///
/// A router owns the currently selected adapter, a POSIX adapter used for
/// remote and virtual streams whatever the host, and the [`Environment`] both
/// read from.
#[derive(Clone)]
pub struct PathRouter {
    env: Arc<dyn Environment>,
    adapter: Arc<dyn PathAdapter>,
    posix: Arc<dyn PathAdapter>,
    virtual_schemes: Vec<String>,
}

impl fmt::Debug for PathRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathRouter")
            .field("adapter", &self.adapter.kind())
            .field("virtual_schemes", &self.virtual_schemes)
            .finish_non_exhaustive()
    }
}

impl Default for PathRouter {
    fn default() -> Self {
        Self::with_environment(Arc::new(SystemEnvironment::new()))
    }
}

impl PathRouter {
    /// Create a router over the process environment with the host's adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router over `env` with the adapter matching its host.
    #[must_use]
    pub fn with_environment(env: Arc<dyn Environment>) -> Self {
        let adapter = AdapterKind::detect(env.as_ref()).build(env.clone());
        Self {
            posix: Arc::new(PosixAdapter::with_environment(env.clone())),
            env,
            adapter,
            virtual_schemes: DEFAULT_VIRTUAL_SCHEMES
                .iter()
                .map(|s| scheme_token(s))
                .collect(),
        }
    }

    /// Create a router over the process environment as described by `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use streampath::config::{AdapterChoice, Config};
    /// use streampath::PathRouter;
    ///
    /// let config = Config {
    ///     adapter: AdapterChoice::Windows,
    ///     ..Default::default()
    /// };
    /// let router = PathRouter::from_config(&config);
    /// assert_eq!(router.separator(), "\\");
    /// ```
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let env: Arc<dyn Environment> = Arc::new(
            SystemEnvironment::new().with_remote_schemes(config.remote_schemes.iter().cloned()),
        );
        let mut router =
            Self::with_environment(env.clone()).with_virtual_schemes(config.virtual_schemes.iter());

        if let Some(kind) = config.adapter.kind() {
            router.select_adapter(Some(kind.build(env)));
        }
        router
    }

    /// Replace the scheme names (`"vfs"`) that are always joined POSIX-style.
    #[must_use]
    pub fn with_virtual_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.virtual_schemes = schemes
            .into_iter()
            .map(|s| scheme_token(s.as_ref()))
            .collect();
        self
    }

    /// Install `adapter`, or the adapter matching the host when `None`.
    ///
    /// Returns the installed adapter.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use streampath::adapter::{AdapterKind, WindowsAdapter};
    /// use streampath::PathRouter;
    ///
    /// let mut router = PathRouter::new();
    /// let installed = router.select_adapter(Some(Arc::new(WindowsAdapter::new())));
    /// assert_eq!(installed.kind(), AdapterKind::Windows);
    /// assert_eq!(router.delimiter(), ";");
    /// ```
    pub fn select_adapter(&mut self, adapter: Option<Arc<dyn PathAdapter>>) -> Arc<dyn PathAdapter> {
        self.adapter = match adapter {
            Some(adapter) => adapter,
            None => AdapterKind::detect(self.env.as_ref()).build(self.env.clone()),
        };
        debug!("selected {} path adapter", self.adapter.kind());
        self.adapter.clone()
    }

    /// The currently selected adapter.
    #[must_use]
    pub fn adapter(&self) -> &dyn PathAdapter {
        self.adapter.as_ref()
    }

    /// Separator of the current adapter.
    #[must_use]
    pub fn separator(&self) -> &'static str {
        self.adapter.separator()
    }

    /// `PATH`-list delimiter of the current adapter.
    #[must_use]
    pub fn delimiter(&self) -> &'static str {
        self.adapter.delimiter()
    }

    /// Whether the current adapter compares paths case-sensitively.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.adapter.is_case_sensitive()
    }

    /// Resolve `paths` right to left into an absolute, prefixed path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if an argument is not valid UTF-8, or an
    /// error from the environment when the working directory is needed.
    pub fn resolve<I>(&self, paths: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        self.resolve_routed(paths).map(|(resolved, _)| resolved)
    }

    /// Join `paths` with the current adapter. Prefixes are not interpreted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if an argument is not valid UTF-8.
    pub fn join<I>(&self, paths: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let paths = path_strings(paths)?;
        let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
        Ok(self.adapter.join(&paths))
    }

    /// Normalize `path` with the current adapter. Prefixes are not interpreted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `path` is not valid UTF-8.
    pub fn normalize<P: AsRef<OsStr>>(&self, path: P) -> Result<String> {
        Ok(self.adapter.normalize(path_str(&path)?))
    }

    /// Whether `path` is absolute once its prefix is stripped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `path` is not valid UTF-8.
    pub fn is_absolute<P: AsRef<OsStr>>(&self, path: P) -> Result<bool> {
        let path = path_str(&path)?;
        Ok(self.adapter.is_absolute(scheme::strip_scheme(path)))
    }

    /// The relative path from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemeMismatch`] if the operands carry different
    /// prefixes, [`Error::InvalidInput`] for non UTF-8 arguments, or an error
    /// from the environment.
    pub fn relative<F, T>(&self, from: F, to: T) -> Result<String>
    where
        F: AsRef<OsStr>,
        T: AsRef<OsStr>,
    {
        let from = SchemeSplit::parse(path_str(&from)?);
        let to = SchemeSplit::parse(path_str(&to)?);
        let prefixes = Self::shared_prefixes(&from, &to)?;

        let (adapter, _) = self.route(&prefixes);
        adapter.relative(from.residual(), to.residual())
    }

    /// Whether `path` lies strictly inside `potential_parent`.
    ///
    /// Both operands are resolved first. A path is never inside itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemeMismatch`] if the operands carry different
    /// prefixes, [`Error::InvalidInput`] for non UTF-8 arguments, or an error
    /// from the environment.
    pub fn is_inside<P, Q>(&self, path: P, potential_parent: Q) -> Result<bool>
    where
        P: AsRef<OsStr>,
        Q: AsRef<OsStr>,
    {
        let path = path_str(&path)?;
        let parent = path_str(&potential_parent)?;
        Self::shared_prefixes(&SchemeSplit::parse(path), &SchemeSplit::parse(parent))?;

        let (path, adapter) = self.resolve_routed([path])?;
        let (parent, _) = self.resolve_routed([parent])?;

        if path == parent {
            return Ok(false);
        }

        let sep = adapter.separator();
        let mut path = path.strip_suffix(sep).unwrap_or(&path).to_string();
        let mut parent = parent.strip_suffix(sep).unwrap_or(&parent).to_string();

        if !adapter.is_case_sensitive() {
            path.make_ascii_lowercase();
            parent.make_ascii_lowercase();
        }

        Ok(path
            .strip_prefix(parent.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(sep)))
    }

    /// The prefix stack of `path`, or `file://` when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `path` is not valid UTF-8.
    pub fn get_prefix<P: AsRef<OsStr>>(&self, path: P) -> Result<String> {
        self.get_prefix_or(path, DEFAULT_PREFIX)
    }

    /// The prefix stack of `path`, or `default` when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `path` is not valid UTF-8.
    pub fn get_prefix_or<P: AsRef<OsStr>>(&self, path: P, default: &str) -> Result<String> {
        Ok(scheme::get_prefix(path_str(&path)?, default))
    }

    /// Prefix tokens both operands share, with an all-`file://` stack
    /// reduced to nothing.
    fn shared_prefixes(from: &SchemeSplit<'_>, to: &SchemeSplit<'_>) -> Result<Vec<String>> {
        let prefix_of = |split: &SchemeSplit<'_>| {
            if split.has_scheme() {
                split.prefix()
            } else {
                DEFAULT_PREFIX.to_string()
            }
        };

        let (from_prefix, to_prefix) = (prefix_of(from), prefix_of(to));
        if from_prefix != to_prefix {
            return Err(Error::SchemeMismatch {
                from: from_prefix,
                to: to_prefix,
            });
        }

        Ok(effective_prefixes(from.prefixes().to_vec()))
    }

    fn is_virtual(&self, token: &str) -> bool {
        self.virtual_schemes.iter().any(|s| s == token)
    }

    /// Pick the adapter and algorithm for a (non-default) prefix stack.
    fn route(&self, prefixes: &[String]) -> (&dyn PathAdapter, Strategy) {
        let detached = prefixes
            .iter()
            .find(|token| self.is_virtual(token) || !self.env.is_local_stream(token));

        match detached {
            Some(token) => {
                debug!("{token} has no local root; joining posix-style");
                (self.posix.as_ref(), Strategy::Join)
            }
            None => (self.adapter.as_ref(), Strategy::Resolve),
        }
    }

    fn resolve_routed<I>(&self, paths: I) -> Result<(String, &dyn PathAdapter)>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let mut prefixes: Vec<String> = Vec::new();
        let mut current: Option<String> = None;
        let mut stripped: Vec<String> = Vec::new();

        for arg in paths {
            let (found, residual) = SchemeSplit::parse(path_str(&arg)?).into_parts();

            if !found.is_empty() {
                let joined = found.concat();
                if let Some(previous) = current.as_ref().filter(|c| **c != joined) {
                    debug!(
                        "scheme changed from {previous} to {joined}; dropping {} earlier path(s)",
                        stripped.len()
                    );
                    stripped.clear();
                }
                prefixes = found;
                current = Some(joined);
            }

            if !residual.is_empty() {
                stripped.push(residual.to_string());
            }
        }

        let prefixes = effective_prefixes(prefixes);
        let fragments: Vec<&str> = stripped.iter().map(String::as_str).collect();

        let (adapter, strategy) = self.route(&prefixes);
        let resolved = match strategy {
            Strategy::Join => adapter.join(&fragments),
            Strategy::Resolve => adapter.resolve(&fragments)?,
        };

        let prefix = prefixes.concat();
        trace!("resolved {fragments:?} to {prefix}{resolved} with {} adapter", adapter.kind());
        Ok((format!("{prefix}{resolved}"), adapter))
    }
}

/// Drop a prefix stack that only names the plain filesystem.
fn effective_prefixes(mut prefixes: Vec<String>) -> Vec<String> {
    if prefixes.iter().all(|p| p == DEFAULT_PREFIX) {
        prefixes.clear();
    }
    prefixes
}
