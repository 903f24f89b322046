//! POSIX path conventions.

use std::fmt;
use std::sync::Arc;

use super::{common_prefix_len, relative_parts, AdapterKind, PathAdapter};
use crate::environment::{Environment, SystemEnvironment};
use crate::error::Result;
use crate::segments::{normalize_segments, trim_edges};

const SEP: char = '/';

/// POSIX paths: `/` separator, `:` delimiter, case-sensitive.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use streampath::adapter::{PathAdapter, PosixAdapter};
/// use streampath::StaticEnvironment;
///
/// let posix = PosixAdapter::with_environment(Arc::new(StaticEnvironment::new("/home/user")));
///
/// assert_eq!(posix.resolve(&["/var/lib", "/../", "file/"]).unwrap(), "/file");
/// assert_eq!(posix.resolve(&["src", "main.rs"]).unwrap(), "/home/user/src/main.rs");
/// assert_eq!(posix.relative("/var/lib", "/var/apache").unwrap(), "../apache");
/// ```
#[derive(Clone)]
pub struct PosixAdapter {
    env: Arc<dyn Environment>,
}

impl fmt::Debug for PosixAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosixAdapter").finish_non_exhaustive()
    }
}

impl Default for PosixAdapter {
    fn default() -> Self {
        Self::with_environment(Arc::new(SystemEnvironment::new()))
    }
}

impl PosixAdapter {
    /// Create an adapter reading the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter reading from `env`.
    #[must_use]
    pub fn with_environment(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl PathAdapter for PosixAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Posix
    }

    fn separator(&self) -> &'static str {
        "/"
    }

    fn delimiter(&self) -> &'static str {
        ":"
    }

    fn is_case_sensitive(&self) -> bool {
        true
    }

    fn is_absolute(&self, path: &str) -> bool {
        path.starts_with(SEP)
    }

    fn join(&self, paths: &[&str]) -> String {
        let joined = paths
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/");

        self.normalize(&joined)
    }

    fn normalize(&self, path: &str) -> String {
        let is_absolute = self.is_absolute(path);
        let trailing_slash = path.ends_with(SEP);

        let mut out = normalize_segments(path.split(SEP), !is_absolute).join("/");

        if out.is_empty() && !is_absolute {
            out.push('.');
        }
        if !out.is_empty() && trailing_slash {
            out.push(SEP);
        }

        if is_absolute {
            out.insert(0, SEP);
        }
        out
    }

    fn resolve(&self, paths: &[&str]) -> Result<String> {
        let mut resolved_path = String::new();
        let mut resolved_absolute = false;

        for path in paths.iter().rev() {
            if path.is_empty() {
                continue;
            }
            resolved_path = format!("{path}/{resolved_path}");
            resolved_absolute = self.is_absolute(path);
            if resolved_absolute {
                break;
            }
        }

        if !resolved_absolute {
            let cwd = self.env.current_dir()?;
            if !cwd.is_empty() {
                resolved_path = format!("{cwd}/{resolved_path}");
                resolved_absolute = self.is_absolute(&cwd);
            }
        }

        // Still relative only when the working directory itself is relative.
        let tail = normalize_segments(resolved_path.split(SEP), !resolved_absolute).join("/");

        let out = if resolved_absolute {
            format!("/{tail}")
        } else {
            tail
        };
        Ok(if out.is_empty() { ".".to_string() } else { out })
    }

    fn relative(&self, from: &str, to: &str) -> Result<String> {
        let from = self.resolve(&[from])?;
        let to = self.resolve(&[to])?;

        let from_parts: Vec<&str> = from.strip_prefix(SEP).unwrap_or(&from).split(SEP).collect();
        let to_parts: Vec<&str> = to.strip_prefix(SEP).unwrap_or(&to).split(SEP).collect();
        let from_parts = trim_edges(&from_parts);
        let to_parts = trim_edges(&to_parts);

        let same = common_prefix_len(from_parts, to_parts);
        Ok(relative_parts(from_parts.len(), to_parts, same).join("/"))
    }
}
