//! Error types for the wrapper.
//!
//! All failures surface synchronously to the caller; nothing is retried
//! or recovered internally. Either the full token sequence is produced
//! and handed to the process, or nothing executes.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while preparing or running a SqlPackage
/// invocation.
#[derive(Debug, Error)]
pub enum SqlPackageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Action name outside the known enumeration
    #[error("SqlPackage: Unknown action '{name}'")]
    UnknownAction { name: String },

    /// The executable could not be located
    #[error("SqlPackage: Could not locate executable")]
    ToolNotFound,

    /// The resolved executable could not be started
    #[error("SqlPackage: Process was not started ({})", path.display())]
    ProcessNotStarted {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but reported failure
    #[error("SqlPackage: Process returned an error (exit code {code})")]
    NonZeroExit { code: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_tool() {
        assert_eq!(
            SqlPackageError::ToolNotFound.to_string(),
            "SqlPackage: Could not locate executable"
        );
        assert_eq!(
            SqlPackageError::NonZeroExit { code: 1 }.to_string(),
            "SqlPackage: Process returned an error (exit code 1)"
        );
    }

    #[test]
    fn unknown_action_carries_the_name() {
        let err = SqlPackageError::UnknownAction {
            name: "Upgrade".into(),
        };
        assert_eq!(err.to_string(), "SqlPackage: Unknown action 'Upgrade'");
    }
}
