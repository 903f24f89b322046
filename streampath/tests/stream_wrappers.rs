//! Resolution of paths carrying stream-wrapper prefixes.
//!
//! Covers the routing rules of [`PathRouter::resolve`]:
//! - `file://` alone is stripped from the output
//! - other schemes are kept and the path under them is resolved
//! - `vfs://` and remote schemes are joined POSIX-style
//! - a different scheme acts like a root change

mod common;

use std::sync::Arc;

use common::{posix_router, windows_router, POSIX_CWD};
use streampath::{PathRouter, StaticEnvironment};

fn check(router: &PathRouter, cases: &[(&[&str], &str)]) {
    for (args, expected) in cases {
        assert_eq!(router.resolve(*args).unwrap(), *expected, "resolve({args:?})");
    }
}

#[test]
fn test_file_scheme_is_removed() {
    check(
        &windows_router(),
        &[
            (&["c:/blah\\blah", "file://d:/games", "c:../a"], "c:\\blah\\a"),
            (&["c:/ignore", "file://FILE://d:\\a/b\\c/d", "\\e.exe"], "d:\\e.exe"),
        ],
    );
}

#[test]
fn test_file_scheme_kept_when_combined() {
    check(
        &windows_router(),
        &[(&["c:/ignore", "glob://file://c:/some/file"], "glob://file://c:\\some\\file")],
    );
}

#[test]
fn test_other_schemes_are_kept() {
    check(
        &windows_router(),
        &[
            (&["d:/ignore", "glob://d:some/dir//"], "glob://d:\\ignore\\some\\dir"),
            (&["glob://d:/ignore", "d:some/dir//"], "glob://d:\\ignore\\some\\dir"),
        ],
    );
}

#[test]
fn test_virtual_and_remote_streams_are_joined() {
    check(
        &windows_router(),
        &[
            (&["vfs://foo", "/bar"], "vfs://foo/bar"),
            (&["http://example.com", "//dir"], "http://example.com/dir"),
        ],
    );
}

#[test]
fn test_new_scheme_is_a_root_change() {
    check(
        &windows_router(),
        &[
            (&["glob://bar", "http://foo"], "http://foo"),
            (&["glob://c:\\bar", "file://c:\\bar"], "c:\\bar"),
            (&["glob://c:\\bar", "file://c:\\bar", "bop"], "c:\\bar\\bop"),
            (&["glob://c:\\bar", "c:\\bar", "file://c:\\bop"], "c:\\bop"),
            (&["c:\\one", "c:\\two", "glob://c:\\three"], "glob://c:\\three"),
        ],
    );
}

#[test]
fn test_same_scheme_is_not_a_root_change() {
    check(
        &windows_router(),
        &[
            (&["file://c:\\bar", "file://foo"], "c:\\bar\\foo"),
            (&["file://c:\\bar", "file://foo", "bee"], "c:\\bar\\foo\\bee"),
            (&["file://c:\\bar", "file://file://foo"], "c:\\bar\\foo"),
            (
                &["file://glob://c:\\bar", "file://glob://foo"],
                "file://glob://c:\\bar\\foo",
            ),
        ],
    );
}

#[test]
fn test_unc_paths_under_schemes() {
    check(
        &windows_router(),
        &[
            (
                &["glob:////server/share", "..", "relative"],
                "glob://\\\\server\\share\\relative",
            ),
            (&["glob://c:/", "//server/share"], "glob://\\\\server\\share\\"),
            (
                &["file://glob://c:/", "//server//share"],
                "file://glob://\\\\server\\share\\",
            ),
            (
                &["glob://file://file://glob://c:/", "///some//dir"],
                "glob://file://glob://c:\\some\\dir",
            ),
        ],
    );
}

#[test]
fn test_posix_wrappers() {
    check(
        &posix_router(),
        &[
            (&["/var/lib", "glob://../", "file/"], "glob:///var/file"),
            (&["/var/lib", "file:///../", "file/"], "/file"),
            (&["/some/dir", ".", "/file:/absolute/"], "/file:/absolute"),
        ],
    );
}

#[test]
fn test_empty_residual_paths() {
    let router = posix_router();
    check(
        &router,
        &[
            (&["glob://", "/foo"], "glob:///foo"),
            (&["file://", "/foo", "bar"], "/foo/bar"),
        ],
    );

    assert_eq!(
        router.resolve(["glob://"]).unwrap(),
        format!("glob://{POSIX_CWD}")
    );
}

#[test]
fn test_remote_scheme_list_is_configurable() {
    let env = StaticEnvironment::new(POSIX_CWD).with_remote_schemes(["s3"]);
    let router = PathRouter::with_environment(Arc::new(env));

    check(
        &router,
        &[
            (&["s3://bucket", "../key"], "s3://key"),
            // http is an ordinary local scheme now
            (&["http://host", "page"], "http:///home/user/host/page"),
        ],
    );
}

#[test]
fn test_prefix_queries() {
    let router = posix_router();

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
        assert_eq!(router.get_prefix(path).unwrap(), expected, "get_prefix({path:?})");
    }

    assert_eq!(router.get_prefix_or("foo", "beep://").unwrap(), "beep://");
    assert_eq!(router.get_prefix_or("file://foo", "beep://").unwrap(), "file://");
}

#[test]
fn test_relative_and_is_inside_under_schemes() {
    let router = posix_router();

    assert_eq!(router.relative("glob:///var/lib", "glob:///var/apache").unwrap(), "../apache");
    assert!(router.is_inside("glob:///srv/www/site", "glob:///srv").unwrap());
    assert!(router.is_inside("vfs://root/a", "vfs://root").unwrap());
    assert!(!router.is_inside("vfs://root", "vfs://root/a").unwrap());

    assert!(router
        .relative("glob:///a", "vfs:///a")
        .unwrap_err()
        .is_scheme_mismatch());
}
