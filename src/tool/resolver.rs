//! Executable discovery.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::args::resolve_path;
use crate::error::SqlPackageError;

/// Display name used in error messages and logs.
pub const TOOL_NAME: &str = "SqlPackage";

/// Accepted executable file names, in probe order.
pub const EXECUTABLE_NAMES: [&str; 2] = ["SqlPackage.exe", "sqlpackage"];

/// Locates the SqlPackage executable.
///
/// Resolution order: explicit override path, the working directory's
/// `tools/` subdirectory, the working directory itself, then each
/// directory on `PATH`.
#[derive(Debug, Clone)]
pub struct ToolResolver {
    working_dir: PathBuf,
    override_path: Option<PathBuf>,
}

impl ToolResolver {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            override_path: None,
        }
    }

    /// Use an explicit executable path instead of probing. A relative
    /// override is resolved against the working directory.
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn resolve(&self) -> Result<PathBuf, SqlPackageError> {
        if let Some(override_path) = &self.override_path {
            let resolved = resolve_path(override_path, &self.working_dir);
            if resolved.is_file() {
                debug!(path = %resolved.display(), "using tool path override");
                return Ok(resolved);
            }
            // A named override that does not exist is not papered over
            // by falling back to probing.
            return Err(SqlPackageError::ToolNotFound);
        }

        let mut search_dirs = vec![self.working_dir.join("tools"), self.working_dir.clone()];
        if let Some(path_var) = env::var_os("PATH") {
            search_dirs.extend(env::split_paths(&path_var));
        }

        for dir in &search_dirs {
            for name in EXECUTABLE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    debug!(path = %candidate.display(), "located {TOOL_NAME}");
                    return Ok(candidate);
                }
            }
        }

        Err(SqlPackageError::ToolNotFound)
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
