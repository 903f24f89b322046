//! Stream-wrapper scheme prefixes.
//!
//! A path such as `compress.zlib://php://temp` is a stack of scheme tokens
//! (`compress.zlib://`, `php://`) in front of a residual path (`temp`). A
//! scheme token is two or more characters other than `/` and `\` followed by
//! `://`, so drive letters (`c://x`) and bare `//server` paths are never
//! mistaken for schemes.

/// Prefix reported for paths that carry no scheme.
pub const DEFAULT_PREFIX: &str = "file://";

/// A path decomposed into its scheme stack and residual path.
///
/// # Examples
///
/// ```
/// use streampath::scheme::SchemeSplit;
///
/// let split = SchemeSplit::parse("GLOB://file://c:/some/file");
/// assert_eq!(split.prefixes(), &["glob://", "file://"]);
/// assert_eq!(split.residual(), "c:/some/file");
/// assert_eq!(split.prefix(), "glob://file://");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSplit<'a> {
    prefixes: Vec<String>,
    residual: &'a str,
}

impl<'a> SchemeSplit<'a> {
    /// Strip every leading scheme token from `path`.
    ///
    /// Tokens are lowercased. A token repeated back to back
    /// (`file://file://`) is recorded once.
    #[must_use]
    pub fn parse(path: &'a str) -> Self {
        let mut prefixes: Vec<String> = Vec::new();
        let mut rest = path;

        while let Some(len) = scheme_len(rest) {
            let token = rest[..len].to_ascii_lowercase();
            if prefixes.last() != Some(&token) {
                prefixes.push(token);
            }
            rest = &rest[len..];
        }

        Self {
            prefixes,
            residual: rest,
        }
    }

    /// The scheme tokens, outermost first.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// The path left after all scheme tokens.
    #[must_use]
    pub fn residual(&self) -> &'a str {
        self.residual
    }

    /// Whether the path had no scheme at all.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        !self.prefixes.is_empty()
    }

    /// The scheme tokens concatenated, or an empty string.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.prefixes.concat()
    }

    /// Split into owned tokens and the residual.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, &'a str) {
        (self.prefixes, self.residual)
    }
}

/// Byte length of the scheme token at the start of `path`, if any.
fn scheme_len(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    // The token name cannot contain a slash, so the first slash of either kind
    // must be the first one of "://".
    let slash = bytes.iter().position(|&b| b == b'/' || b == b'\\')?;

    let is_token = slash >= 3
        && bytes[slash] == b'/'
        && bytes[slash - 1] == b':'
        && bytes.get(slash + 1) == Some(&b'/');

    is_token.then_some(slash + 2)
}

/// Remove all scheme tokens from `path`.
///
/// # Examples
///
/// ```
/// use streampath::scheme::strip_scheme;
///
/// assert_eq!(strip_scheme("file:///var/lib"), "/var/lib");
/// assert_eq!(strip_scheme("c:/var/lib"), "c:/var/lib");
/// ```
#[must_use]
pub fn strip_scheme(path: &str) -> &str {
    SchemeSplit::parse(path).residual()
}

/// The concatenated scheme stack of `path`, or `default` when it has none.
///
/// # Examples
///
/// ```
/// use streampath::scheme::{get_prefix, DEFAULT_PREFIX};
///
/// assert_eq!(get_prefix("compress.zlib://php://temp", DEFAULT_PREFIX), "compress.zlib://php://");
/// assert_eq!(get_prefix("foo", DEFAULT_PREFIX), "file://");
/// assert_eq!(get_prefix("foo", "beep://"), "beep://");
/// ```
#[must_use]
pub fn get_prefix(path: &str, default: &str) -> String {
    let split = SchemeSplit::parse(path);
    if split.has_scheme() {
        split.prefix()
    } else {
        default.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_prefix_table() {
        let cases = [
            ("file://foo", "file://"),
            ("file:///foo", "file://"),
            ("file://file://foo", "file://"),
            ("glob://file://foo", "glob://file://"),
            ("foo", "file://"),
            ("//foo", "file://"),
            ("invalid:\\foo", "file://"),
            ("compress.zlib://php://temp", "compress.zlib://php://"),
        ];

        for (path, expected) in cases {
            assert_eq!(get_prefix(path, DEFAULT_PREFIX), expected, "get_prefix({path:?})");
        }
    }

    #[test]
    fn test_get_prefix_custom_default() {
        assert_eq!(get_prefix("foo", "beep://"), "beep://");
        assert_eq!(get_prefix("file://foo", "beep://"), "file://");
    }

    #[test]
    fn test_drive_letters_are_not_schemes() {
        assert!(!SchemeSplit::parse("c://foo").has_scheme());
        assert!(!SchemeSplit::parse("c:/foo").has_scheme());
        assert!(!SchemeSplit::parse("c:\\foo").has_scheme());
    }

    #[test]
    fn test_scheme_requires_double_slash() {
        assert!(!SchemeSplit::parse("/file:/absolute/").has_scheme());
        assert!(!SchemeSplit::parse("file:/absolute").has_scheme());
        assert!(!SchemeSplit::parse("file:\\\\absolute").has_scheme());
    }

    #[test]
    fn test_scheme_name_may_contain_colons_and_dots() {
        let split = SchemeSplit::parse("a:b://x");
        assert_eq!(split.prefixes(), &["a:b://"]);
        assert_eq!(split.residual(), "x");
    }

    #[test]
    fn test_non_adjacent_repeats_are_kept() {
        let split = SchemeSplit::parse("glob://file://file://glob://c:/");
        assert_eq!(split.prefixes(), &["glob://", "file://", "glob://"]);
        assert_eq!(split.residual(), "c:/");
    }

    #[test]
    fn test_empty_residual() {
        let split = SchemeSplit::parse("glob://");
        assert_eq!(split.prefixes(), &["glob://"]);
        assert_eq!(split.residual(), "");

        let split = SchemeSplit::parse("glob:////server/share");
        assert_eq!(split.residual(), "//server/share");
    }

    #[test]
    fn test_stripping_is_idempotent() {
        for path in ["glob://file://x", "vfs://foo", "/plain", "http://h/p", ""] {
            let residual = strip_scheme(path);
            let again = SchemeSplit::parse(residual);
            assert!(!again.has_scheme(), "{path:?}");
            assert_eq!(again.residual(), residual);
        }
    }

    #[test]
    fn test_into_parts() {
        let (prefixes, residual) = SchemeSplit::parse("vfs://foo").into_parts();
        assert_eq!(prefixes, vec!["vfs://".to_string()]);
        assert_eq!(residual, "foo");
    }
}
