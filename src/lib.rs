//! Thin wrapper around the SqlPackage database schema tool.
//!
//! The crate translates a [`SqlPackageSettings`] instance into the
//! ordered `/Name:value` token sequence the executable expects, locates
//! the executable on disk and runs it. The settings model is
//! permissive; all emission policy (endpoint precedence, action-gated
//! variables, quoting) lives in [`args::build_arguments`].

pub mod args;
pub mod config;
pub mod error;
pub mod settings;
pub mod tool;

pub use error::SqlPackageError;
pub use settings::{EndpointSettings, ParamMap, SqlPackageAction, SqlPackageSettings};
pub use tool::{ProcessOptions, SqlPackageRunner};
