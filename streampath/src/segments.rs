//! Segment-level path normalization shared by both adapters.
//!
//! Segments are the pieces left after splitting a path on its separator. They
//! never contain separators or device names, so the functions here do not
//! know whether a path was absolute; callers decide that through
//! `allow_above_root`.

/// Resolve `.`, `..` and empty segments.
///
/// Empty and `.` segments are dropped. A `..` removes the previous segment;
/// when there is nothing to remove (or the previous segment is itself `..`) it
/// is kept only if `allow_above_root` is set.
///
/// # Examples
///
/// ```
/// use streampath::segments::normalize_segments;
///
/// let parts = normalize_segments("a/./b/../../../c".split('/'), true);
/// assert_eq!(parts, vec!["..", "c"]);
///
/// let parts = normalize_segments("a/./b/../../../c".split('/'), false);
/// assert_eq!(parts, vec!["c"]);
/// ```
pub fn normalize_segments<'a, I>(segments: I, allow_above_root: bool) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut res: Vec<&'a str> = Vec::new();

    for segment in segments {
        match segment {
            "" | "." => {}
            ".." => {
                if res.last().is_some_and(|last| *last != "..") {
                    res.pop();
                } else if allow_above_root {
                    res.push("..");
                }
            }
            _ => res.push(segment),
        }
    }

    res
}

/// Drop leading and trailing empty segments.
///
/// # Examples
///
/// ```
/// use streampath::segments::trim_edges;
///
/// let parts: Vec<&str> = "/var/lib/".split('/').collect();
/// assert_eq!(trim_edges(&parts), &["var", "lib"]);
///
/// let parts: Vec<&str> = "//".split('/').collect();
/// assert!(trim_edges(&parts).is_empty());
/// ```
#[must_use]
pub fn trim_edges<'s, 'a>(segments: &'s [&'a str]) -> &'s [&'a str] {
    let Some(start) = segments.iter().position(|s| !s.is_empty()) else {
        return &[];
    };
    let end = segments
        .iter()
        .rposition(|s| !s.is_empty())
        .map_or(start, |i| i + 1);

    &segments[start..end]
}
