//! Common test utilities for integration tests.
//!
//! Every helper here pins the working directory and host through a
//! [`StaticEnvironment`], so results do not depend on where the tests run.

use std::sync::Arc;

use streampath::adapter::{PosixAdapter, WindowsAdapter};
use streampath::{Environment, PathRouter, StaticEnvironment};

/// Working directory used by the POSIX helpers.
#[allow(dead_code)]
pub const POSIX_CWD: &str = "/home/user";

/// Working directory used by the Windows helpers.
#[allow(dead_code)]
pub const WINDOWS_CWD: &str = "c:\\users\\me";

/// Environment of a POSIX host sitting in [`POSIX_CWD`].
#[allow(dead_code)]
pub fn posix_env() -> Arc<dyn Environment> {
    Arc::new(StaticEnvironment::new(POSIX_CWD))
}

/// Environment of a Windows host sitting in [`WINDOWS_CWD`].
#[allow(dead_code)]
pub fn windows_env() -> Arc<dyn Environment> {
    Arc::new(StaticEnvironment::new(WINDOWS_CWD).with_windows_host(true))
}

#[allow(dead_code)]
pub fn posix_adapter() -> PosixAdapter {
    PosixAdapter::with_environment(posix_env())
}

#[allow(dead_code)]
pub fn windows_adapter() -> WindowsAdapter {
    WindowsAdapter::with_environment(windows_env())
}

/// Router on a POSIX host.
#[allow(dead_code)]
pub fn posix_router() -> PathRouter {
    PathRouter::with_environment(posix_env())
}

/// Router on a Windows host.
#[allow(dead_code)]
pub fn windows_router() -> PathRouter {
    PathRouter::with_environment(windows_env())
}

/// Rewrite `/` as `\`, for sharing expectation tables between adapters.
#[allow(dead_code)]
pub fn backslashed(path: &str) -> String {
    path.replace('/', "\\")
}
