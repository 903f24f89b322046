//! Router configuration.
//!
//! Configuration decides which adapter a [`crate::PathRouter`] uses and which
//! scheme prefixes bypass filesystem resolution. It is assembled in layers,
//! lowest precedence first:
//!
//! 1. Built-in defaults (or a programmatic base via `ConfigBuilder::with_config`)
//! 2. A YAML file (`ConfigBuilder::with_file`)
//! 3. Environment variables (`STREAMPATH_*`)
//!
//! # Examples
//!
//! ```
//! use streampath::config::{AdapterChoice, ConfigBuilder};
//! use streampath::PathRouter;
//!
//! let config = ConfigBuilder::new().skip_env().build().unwrap();
//! assert_eq!(config.adapter, AdapterChoice::Auto);
//!
//! let router = PathRouter::from_config(&config);
//! assert_eq!(router.resolve(["vfs://foo", "/bar"]).unwrap(), "vfs://foo/bar");
//! ```
//!
//! A YAML file:
//!
//! ```yaml
//! adapter: windows
//! remote_schemes: [http, https, s3]
//! virtual_schemes: [vfs, mem]
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod schema;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::ConfigLoader;
pub use schema::{AdapterChoice, Config};
