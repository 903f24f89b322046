//! Property-based tests for the adapters and prefix handling.
//!
//! The segment normalizer has its own properties; these cover the
//! adapter-level laws built on top of it.

use super::{PathAdapter, PosixAdapter, WindowsAdapter};
use crate::environment::StaticEnvironment;
use crate::scheme::{get_prefix, strip_scheme, DEFAULT_PREFIX};
use proptest::prelude::*;
use std::sync::Arc;

fn posix() -> PosixAdapter {
    PosixAdapter::with_environment(Arc::new(StaticEnvironment::new("/home/user")))
}

fn windows() -> WindowsAdapter {
    let env = StaticEnvironment::new("c:\\users\\me").with_windows_host(true);
    WindowsAdapter::with_environment(Arc::new(env))
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,8}"
}

// Names, dots and empty segments (which become repeated separators)
fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => name_strategy(),
        1 => Just(String::new()),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn posix_path_strategy() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(segment_strategy(), 0..8)).prop_map(|(absolute, parts)| {
        let body = parts.join("/");
        if absolute {
            format!("/{body}")
        } else {
            body
        }
    })
}

// Segments that look like drives once they end up first in a tail
fn windows_segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => segment_strategy(),
        1 => Just("c:".to_string()),
        1 => "[a-z]:[a-z0-9]{0,4}",
    ]
}

// Drive-letter and rootless paths with mixed separators. UNC roots are
// covered by the conformance tables.
fn windows_path_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["", "c:", "d:", "c:\\", "C:/", "\\"]),
        prop::collection::vec((windows_segment_strategy(), any::<bool>()), 0..8),
    )
        .prop_map(|(head, parts)| {
            let mut out = head.to_string();
            for (i, (part, slash)) in parts.into_iter().enumerate() {
                if i > 0 {
                    out.push(if slash { '/' } else { '\\' });
                }
                out.push_str(&part);
            }
            out
        })
}

fn absolute_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name_strategy(), 0..6)
}

fn prefixed_path_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(
            prop::sample::select(vec!["file://", "glob://", "vfs://", "http://", "GLOB://"]),
            0..4,
        ),
        posix_path_strategy(),
    )
        .prop_map(|(tokens, residual)| format!("{}{residual}", tokens.concat()))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // normalize(normalize(p)) == normalize(p)
    #[test]
    fn posix_normalize_idempotent(path in posix_path_strategy()) {
        let adapter = posix();
        let once = adapter.normalize(&path);
        prop_assert_eq!(adapter.normalize(&once), once);
    }

    #[test]
    fn windows_normalize_idempotent(path in windows_path_strategy()) {
        let adapter = windows();
        let once = adapter.normalize(&path);
        prop_assert_eq!(adapter.normalize(&once), once);
    }

    // Joining two non-empty paths is normalizing their concatenation
    #[test]
    fn posix_join_is_normalized_concat(
        a in posix_path_strategy().prop_filter("non-empty", |p| !p.is_empty()),
        b in posix_path_strategy().prop_filter("non-empty", |p| !p.is_empty()),
    ) {
        let adapter = posix();
        prop_assert_eq!(adapter.join(&[a.as_str(), b.as_str()]), adapter.normalize(&format!("{a}/{b}")));
    }

    #[test]
    fn windows_join_is_normalized_concat(
        first in name_strategy(),
        a in windows_path_strategy(),
        b in windows_path_strategy().prop_filter("non-empty", |p| !p.is_empty()),
    ) {
        // Starting with a name keeps the join from producing a leading double separator.
        let a = format!("{first}\\{a}");
        let adapter = windows();
        prop_assert_eq!(adapter.join(&[a.as_str(), b.as_str()]), adapter.normalize(&format!("{a}\\{b}")));
    }

    // resolve always yields an absolute path when the working directory is absolute
    #[test]
    fn posix_resolve_is_absolute(paths in prop::collection::vec(posix_path_strategy(), 0..4)) {
        let adapter = posix();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let resolved = adapter.resolve(&refs).unwrap();
        prop_assert!(adapter.is_absolute(&resolved), "{} is not absolute", resolved);
    }

    #[test]
    fn windows_resolve_is_absolute(paths in prop::collection::vec(windows_path_strategy(), 0..4)) {
        let adapter = windows();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let resolved = adapter.resolve(&refs).unwrap();
        prop_assert!(adapter.is_absolute(&resolved), "{} is not absolute", resolved);
    }

    // Following relative(from, to) from `from` lands on `to`
    #[test]
    fn posix_relative_round_trip(
        from in absolute_names_strategy(),
        to in absolute_names_strategy(),
    ) {
        let adapter = posix();
        let from = format!("/{}", from.join("/"));
        let to = format!("/{}", to.join("/"));

        let rel = adapter.relative(&from, &to).unwrap();
        prop_assert_eq!(adapter.resolve(&[from.as_str(), rel.as_str()]).unwrap(), adapter.resolve(&[to.as_str()]).unwrap());
    }

    #[test]
    fn windows_relative_round_trip_same_drive(
        from in absolute_names_strategy(),
        to in absolute_names_strategy(),
    ) {
        let adapter = windows();
        let from = format!("c:\\{}", from.join("\\"));
        let to = format!("c:\\{}", to.join("\\"));

        let rel = adapter.relative(&from, &to).unwrap();
        prop_assert_eq!(adapter.resolve(&[from.as_str(), rel.as_str()]).unwrap(), adapter.resolve(&[to.as_str()]).unwrap());
    }

    // Re-attaching the prefix to the stripped path yields the same prefix
    #[test]
    fn prefix_reattachment_is_stable(path in prefixed_path_strategy()) {
        let prefix = get_prefix(&path, DEFAULT_PREFIX);
        let rebuilt = format!("{prefix}{}", strip_scheme(&path));
        prop_assert_eq!(get_prefix(&rebuilt, DEFAULT_PREFIX), prefix);
    }
}
