//! Windows path conventions.
//!
//! Input may use either `/` or `\`; output always uses `\`. A path may start
//! with a device: a drive letter (`c:`) or a UNC root (`\\server\share`). A
//! drive letter without a root separator (`c:file`) is drive-relative and is
//! resolved against the working directory of that drive.

use std::fmt;
use std::sync::Arc;

use super::{common_prefix_len, relative_parts, AdapterKind, PathAdapter};
use crate::environment::{Environment, SystemEnvironment};
use crate::error::Result;
use crate::segments::{normalize_segments, trim_edges};

const SEP: char = '\\';

fn is_sep(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

fn is_sep_char(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Number of leading bytes satisfying `pred`.
fn run_len(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

fn drive_len(bytes: &[u8]) -> Option<usize> {
    (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':').then_some(2)
}

/// `[/\]{2}server[/\]+share`, all parts non-empty.
fn unc_len(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 2 || !is_sep(bytes[0]) || !is_sep(bytes[1]) {
        return None;
    }

    let server_end = 2 + run_len(&bytes[2..], |b| !is_sep(b));
    if server_end == 2 {
        return None;
    }
    let seps_end = server_end + run_len(&bytes[server_end..], is_sep);
    if seps_end == server_end {
        return None;
    }
    let share_end = seps_end + run_len(&bytes[seps_end..], |b| !is_sep(b));
    if share_end == seps_end {
        return None;
    }

    Some(share_end)
}

fn is_unc_device(device: &str) -> bool {
    device.as_bytes().get(1).is_some_and(|&b| b != b':')
}

/// Rewrite a UNC device as `\\server\share`.
fn normalize_unc_root(device: &str) -> String {
    let mut out = String::from("\\\\");
    let mut prev_sep = false;

    for c in device.trim_start_matches(is_sep_char).chars() {
        if is_sep_char(c) {
            if !prev_sep {
                out.push(SEP);
            }
            prev_sep = true;
        } else {
            out.push(c);
            prev_sep = false;
        }
    }

    out
}

/// A Windows path split into device, root separator and tail.
///
/// # Examples
///
/// ```
/// use streampath::adapter::DeviceSplit;
///
/// let split = DeviceSplit::parse("c:\\temp\\file");
/// assert_eq!(split.device, "c:");
/// assert!(split.root);
/// assert_eq!(split.tail, "temp\\file");
///
/// let split = DeviceSplit::parse("//server/share/dir");
/// assert_eq!(split.device, "//server/share");
/// assert!(split.is_unc());
/// assert_eq!(split.tail, "dir");
///
/// let split = DeviceSplit::parse("c:file");
/// assert!(!split.is_absolute());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSplit<'a> {
    /// Drive letter with colon, UNC head, or empty.
    pub device: &'a str,
    /// Whether a root separator follows the device.
    pub root: bool,
    /// Everything after the device and root separator.
    pub tail: &'a str,
}

impl<'a> DeviceSplit<'a> {
    /// Split `path`.
    #[must_use]
    pub fn parse(path: &'a str) -> Self {
        let bytes = path.as_bytes();
        let device_len = drive_len(bytes).or_else(|| unc_len(bytes)).unwrap_or(0);
        let root = bytes.get(device_len).copied().is_some_and(is_sep);
        let tail_start = device_len + usize::from(root);

        Self {
            device: &path[..device_len],
            root,
            tail: &path[tail_start..],
        }
    }

    /// Whether the device is a UNC root.
    #[must_use]
    pub fn is_unc(&self) -> bool {
        is_unc_device(self.device)
    }

    /// Whether the path is absolute. UNC paths always are.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.root || self.is_unc()
    }
}

/// Accumulator for a right-to-left resolve.
#[derive(Debug, Default)]
struct Resolution {
    device: String,
    tail: String,
    absolute: bool,
}

impl Resolution {
    fn is_complete(&self) -> bool {
        !self.device.is_empty() && self.absolute
    }

    /// Fold one path in; returns whether resolution is complete.
    fn push(&mut self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }

        let split = DeviceSplit::parse(path);
        if !split.device.is_empty()
            && !self.device.is_empty()
            && !split.device.eq_ignore_ascii_case(&self.device)
        {
            // Another drive; not applicable.
            return false;
        }

        if self.device.is_empty() {
            self.device = split.device.to_string();
        }
        if !self.absolute {
            self.tail = format!("{}{SEP}{}", split.tail, self.tail);
            self.absolute = split.is_absolute();
        }

        self.is_complete()
    }

    fn finish(self) -> String {
        let device = if is_unc_device(&self.device) {
            normalize_unc_root(&self.device)
        } else {
            self.device
        };

        let tail = normalize_segments(self.tail.split(is_sep_char), !self.absolute).join("\\");
        let root = if self.absolute { "\\" } else { "" };

        let out = format!("{device}{root}{tail}");
        if out.is_empty() {
            ".".to_string()
        } else {
            out
        }
    }
}

/// Windows paths: `\` separator, `;` delimiter, case-insensitive.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use streampath::adapter::{PathAdapter, WindowsAdapter};
/// use streampath::StaticEnvironment;
///
/// let env = StaticEnvironment::new("c:\\users\\me").with_windows_host(true);
/// let windows = WindowsAdapter::with_environment(Arc::new(env));
///
/// assert_eq!(
///     windows.resolve(&["c:/blah\\blah", "d:/games", "c:../a"]).unwrap(),
///     "c:\\blah\\a"
/// );
/// assert_eq!(windows.relative("c:/aaaa/bbbb", "c:/cccc").unwrap(), "..\\..\\cccc");
/// assert_eq!(windows.resolve(&["docs"]).unwrap(), "c:\\users\\me\\docs");
/// ```
#[derive(Clone)]
pub struct WindowsAdapter {
    env: Arc<dyn Environment>,
}

impl fmt::Debug for WindowsAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowsAdapter").finish_non_exhaustive()
    }
}

impl Default for WindowsAdapter {
    fn default() -> Self {
        Self::with_environment(Arc::new(SystemEnvironment::new()))
    }
}

impl WindowsAdapter {
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

    /// Working directory of a drive, or the drive root when none is recorded
    /// or the recorded one points elsewhere.
    fn drive_cwd(&self, device: &str) -> String {
        let root = format!("{device}{SEP}");
        match self.env.drive_dir(device) {
            Some(dir)
                if dir
                    .get(..root.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(&root)) =>
            {
                dir
            }
            _ => root,
        }
    }
}

impl PathAdapter for WindowsAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Windows
    }

    fn separator(&self) -> &'static str {
        "\\"
    }

    fn delimiter(&self) -> &'static str {
        ";"
    }

    fn is_case_sensitive(&self) -> bool {
        false
    }

    fn is_absolute(&self, path: &str) -> bool {
        DeviceSplit::parse(path).is_absolute()
    }

    fn join(&self, paths: &[&str]) -> String {
        let kept: Vec<&str> = paths.iter().copied().filter(|p| !p.is_empty()).collect();
        let mut joined = kept.join("\\");

        // A leading double separator would be read as a UNC root. Keep it only
        // when the first input clearly names a server (`//server`).
        let names_server = kept.first().is_some_and(|first| {
            let b = first.as_bytes();
            b.len() >= 3 && is_sep(b[0]) && is_sep(b[1]) && !is_sep(b[2])
        });
        if !names_server {
            let lead = run_len(joined.as_bytes(), is_sep);
            if lead >= 2 {
                joined.replace_range(..lead, "\\");
            }
        }

        self.normalize(&joined)
    }

    fn normalize(&self, path: &str) -> String {
        let split = DeviceSplit::parse(path);
        let is_absolute = split.is_absolute();
        let trailing_sep = split.tail.ends_with(is_sep_char);

        let mut tail = normalize_segments(split.tail.split(is_sep_char), !is_absolute).join("\\");
        if tail.is_empty() && !is_absolute {
            tail.push('.');
        }
        if !tail.is_empty() && trailing_sep {
            tail.push(SEP);
        }
        // A relative tail must not collapse into something that reads as a drive.
        if split.device.is_empty() && !is_absolute && drive_len(tail.as_bytes()).is_some() {
            tail.insert_str(0, ".\\");
        }

        let device = if split.is_unc() {
            normalize_unc_root(split.device)
        } else {
            split.device.to_string()
        };
        let root = if is_absolute { "\\" } else { "" };

        format!("{device}{root}{tail}")
    }

    fn resolve(&self, paths: &[&str]) -> Result<String> {
        let mut state = Resolution::default();

        let mut complete = false;
        for path in paths.iter().rev() {
            if state.push(path) {
                complete = true;
                break;
            }
        }

        if !complete {
            let fallback = if state.device.is_empty() {
                self.env.current_dir()?
            } else {
                self.drive_cwd(&state.device)
            };
            state.push(&fallback);
        }

        Ok(state.finish())
    }

    /// Segments are compared after resolution with the device as the first
    /// segment, so two UNC roots on the same server but different shares still
    /// share their server segment and produce a `..` path.
    fn relative(&self, from: &str, to: &str) -> Result<String> {
        let from = self.resolve(&[from])?;
        let to = self.resolve(&[to])?;

        let lower_from = from.to_ascii_lowercase();
        let lower_to = to.to_ascii_lowercase();

        let to_parts: Vec<&str> = to.split(SEP).collect();
        let lower_from_parts: Vec<&str> = lower_from.split(SEP).collect();
        let lower_to_parts: Vec<&str> = lower_to.split(SEP).collect();

        let to_parts = trim_edges(&to_parts);
        let lower_from_parts = trim_edges(&lower_from_parts);
        let lower_to_parts = trim_edges(&lower_to_parts);

        let same = common_prefix_len(lower_from_parts, lower_to_parts);
        if same == 0 {
            // Different devices: no relative path exists.
            return Ok(to);
        }

        Ok(relative_parts(lower_from_parts.len(), to_parts, same).join("\\"))
    }
}
