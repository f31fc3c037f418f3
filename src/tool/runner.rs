//! Process execution for SqlPackage.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::args::build_arguments;
use crate::error::SqlPackageError;
use crate::settings::SqlPackageSettings;
use crate::tool::resolver::{ToolResolver, TOOL_NAME};

/// Process-execution options passed through by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Suppress the tool's stdout instead of inheriting it.
    pub silence_stdout: bool,
    /// Suppress the tool's stderr instead of inheriting it.
    pub silence_stderr: bool,
}

/// Seam between the runner and the operating system, so tests can
/// record an invocation without a real binary.
pub trait ProcessSpawner {
    /// Start the program and wait for it, returning the exit code.
    fn run(
        &self,
        program: &Path,
        args: &[String],
        working_dir: &Path,
        options: &ProcessOptions,
    ) -> Result<i32, SqlPackageError>;
}

/// Spawner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdSpawner;

impl ProcessSpawner for StdSpawner {
    fn run(
        &self,
        program: &Path,
        args: &[String],
        working_dir: &Path,
        options: &ProcessOptions,
    ) -> Result<i32, SqlPackageError> {
        let mut command = Command::new(program);
        command.args(args).current_dir(working_dir);
        if options.silence_stdout {
            command.stdout(Stdio::null());
        }
        if options.silence_stderr {
            command.stderr(Stdio::null());
        }

        let status = command
            .status()
            .map_err(|source| SqlPackageError::ProcessNotStarted {
                path: program.to_path_buf(),
                source,
            })?;

        // Terminated by signal on Unix yields no code.
        Ok(status.code().unwrap_or(-1))
    }
}

/// Runs SqlPackage with a given settings instance.
pub struct SqlPackageRunner<S: ProcessSpawner = StdSpawner> {
    resolver: ToolResolver,
    spawner: S,
}

impl SqlPackageRunner<StdSpawner> {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver: ToolResolver::new(working_dir),
            spawner: StdSpawner,
        }
    }

    /// Use an explicit executable path instead of probing.
    pub fn with_tool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.resolver = self.resolver.with_override(path);
        self
    }
}

impl<S: ProcessSpawner> SqlPackageRunner<S> {
    /// Construct with a custom spawner.
    pub fn with_spawner(resolver: ToolResolver, spawner: S) -> Self {
        Self { resolver, spawner }
    }

    /// Resolve the tool, build the token sequence and run to completion.
    ///
    /// Fails before any process interaction when the tool cannot be
    /// located, and afterwards with the exit code when the tool reports
    /// failure. Nothing is retried.
    pub fn execute(
        &self,
        settings: &SqlPackageSettings,
        options: Option<ProcessOptions>,
    ) -> Result<(), SqlPackageError> {
        let tool = self.resolver.resolve()?;
        let args = build_arguments(settings, self.resolver.working_dir());

        info!(action = %settings.action(), tool = %tool.display(), "running {TOOL_NAME}");
        debug!(args = ?masked(&args), "invocation arguments");

        let options = options.unwrap_or_default();
        let code = self
            .spawner
            .run(&tool, &args, self.resolver.working_dir(), &options)?;

        if code == 0 {
            Ok(())
        } else {
            warn!(code, "{TOOL_NAME} reported failure");
            Err(SqlPackageError::NonZeroExit { code })
        }
    }
}

/// Copy of the argument list with password values replaced, for logging.
fn masked(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            for name in ["/SourcePassword:", "/TargetPassword:"] {
                if arg.starts_with(name) {
                    return format!("{name}****");
                }
            }
            arg.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::masked;

    #[test]
    fn masks_both_password_tokens() {
        let args = vec![
            "/Action:Publish".to_string(),
            "/SourcePassword:hunter2".to_string(),
            "/TargetPassword:\"p w\"".to_string(),
        ];
        assert_eq!(
            masked(&args),
            [
                "/Action:Publish",
                "/SourcePassword:****",
                "/TargetPassword:****"
            ]
        );
    }
}
