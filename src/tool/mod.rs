//! Locating and running the SqlPackage executable.

mod resolver;
mod runner;

pub use resolver::{ToolResolver, EXECUTABLE_NAMES, TOOL_NAME};
pub use runner::{ProcessOptions, ProcessSpawner, SqlPackageRunner, StdSpawner};
