//! Command-line construction for SqlPackage.
//!
//! ```text
//! SqlPackageSettings → build_arguments → ordered token list → spawn
//! ```
//!
//! A single pure pass over an immutable settings instance. The emission
//! order is part of the contract with the wrapped executable, not a
//! convenience: action token first, scalar flags, source endpoint,
//! target endpoint, authentication, properties, variables.

mod builder;
mod format;

pub use builder::build_arguments;
pub use format::resolve_path;
