#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # streampath
//!
//! Node-style path operations for POSIX and Windows paths that may carry
//! stream-wrapper prefixes such as `glob://`, `vfs://` or `http://`.
//!
//! ## Core Types
//!
//! - [`PathRouter`]: scheme-aware `resolve`, `relative`, `is_inside` and friends
//! - [`PathAdapter`], [`PosixAdapter`] and [`WindowsAdapter`]: per-platform path algebra
//! - [`Environment`]: working directory, drive directories and stream locality
//! - [`Config`]: adapter and scheme selection
//! - [`Error`] and [`Result`]: Error handling types
//!
//! Both adapters work on any host, so Windows paths can be handled on Linux
//! and the other way round.
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use streampath::{PathRouter, StaticEnvironment, WindowsAdapter};
//!
//! let env = Arc::new(StaticEnvironment::new("c:\\work"));
//! let mut router = PathRouter::with_environment(env.clone());
//! router.select_adapter(Some(Arc::new(WindowsAdapter::with_environment(env))));
//!
//! assert_eq!(
//!     router.resolve(["c:/ignore", "glob://file://c:/some/file"]).unwrap(),
//!     "glob://file://c:\\some\\file"
//! );
//! assert_eq!(router.resolve(["file://c:\\bar", "file://foo"]).unwrap(), "c:\\bar\\foo");
//! assert_eq!(router.relative("C:\\orandea\\test", "c:\\orandea\\impl").unwrap(), "..\\impl");
//! ```

pub mod adapter;
pub mod config;
pub mod environment;
pub mod error;
pub mod input;
pub mod router;
pub mod scheme;
pub mod segments;

// Re-export key types at crate root for convenience
pub use adapter::{AdapterKind, PathAdapter, PosixAdapter, WindowsAdapter};
pub use config::{Config, ConfigBuilder};
pub use environment::{Environment, StaticEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use router::PathRouter;
pub use scheme::DEFAULT_PREFIX;
