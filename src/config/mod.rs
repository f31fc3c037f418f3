//! TOML configuration surface.
//!
//! A config file can pre-declare the tool path and a full invocation;
//! command-line flags override individual values on top of it.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, EndpointConfig, InvocationConfig, ToolConfig};
