//! Validation of path arguments.
//!
//! Router operations accept anything convertible to an [`OsStr`]. The path
//! algebra itself works on UTF-8 text, so arguments are checked here once at the
//! boundary.

use std::ffi::OsStr;

use crate::error::{Error, Result};

/// Borrow a path argument as `&str`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the value is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use streampath::input::path_str;
/// use std::path::Path;
///
/// assert_eq!(path_str(Path::new("/var/lib")).unwrap(), "/var/lib");
/// assert_eq!(path_str("c:\\temp").unwrap(), "c:\\temp");
/// ```
pub fn path_str<P: AsRef<OsStr> + ?Sized>(path: &P) -> Result<&str> {
    let path = path.as_ref();
    path.to_str().ok_or_else(|| Error::InvalidInput {
        path: path.to_string_lossy().into_owned(),
        reason: "path is not valid UTF-8".to_string(),
    })
}

/// Collect a sequence of path arguments into owned strings.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for the first argument that is not valid
/// UTF-8.
pub fn path_strings<I>(paths: I) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    paths
        .into_iter()
        .map(|p| path_str(&p).map(str::to_owned))
        .collect()
}
