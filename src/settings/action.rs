//! SqlPackage action selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SqlPackageError;

/// The SqlPackage mode of invocation.
///
/// Fixed at settings construction time; determines which parameter
/// groups are eligible for emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlPackageAction {
    Export,
    Import,
    Extract,
    Publish,
    Script,
    DriftReport,
    DeployReport,
}

impl SqlPackageAction {
    /// All actions, in declaration order.
    pub const ALL: [SqlPackageAction; 7] = [
        SqlPackageAction::Export,
        SqlPackageAction::Import,
        SqlPackageAction::Extract,
        SqlPackageAction::Publish,
        SqlPackageAction::Script,
        SqlPackageAction::DriftReport,
        SqlPackageAction::DeployReport,
    ];

    /// The exact name used in the `/Action:<Name>` token.
    pub fn name(self) -> &'static str {
        match self {
            SqlPackageAction::Export => "Export",
            SqlPackageAction::Import => "Import",
            SqlPackageAction::Extract => "Extract",
            SqlPackageAction::Publish => "Publish",
            SqlPackageAction::Script => "Script",
            SqlPackageAction::DriftReport => "DriftReport",
            SqlPackageAction::DeployReport => "DeployReport",
        }
    }

    /// Whether SQLCMD variables (`/v:`) are forwarded for this action.
    ///
    /// Only the script-generating and publishing actions consume them;
    /// for everything else populated variables are silently dropped.
    pub fn uses_variables(self) -> bool {
        matches!(
            self,
            SqlPackageAction::Publish | SqlPackageAction::Script | SqlPackageAction::DeployReport
        )
    }
}

impl fmt::Display for SqlPackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlPackageAction {
    type Err = SqlPackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SqlPackageError::UnknownAction {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::SqlPackageAction;

    #[test]
    fn display_matches_token_capitalization() {
        assert_eq!(SqlPackageAction::DriftReport.to_string(), "DriftReport");
        assert_eq!(SqlPackageAction::Export.to_string(), "Export");
    }

    #[test]
    fn parse_is_case_insensitive() {
        let action: SqlPackageAction = "deployreport".parse().unwrap();
        assert_eq!(action, SqlPackageAction::DeployReport);
    }

    #[test]
    fn parse_rejects_unknown_action() {
        assert!("Upgrade".parse::<SqlPackageAction>().is_err());
    }

    #[test]
    fn variables_gated_to_publish_family() {
        assert!(SqlPackageAction::Publish.uses_variables());
        assert!(SqlPackageAction::Script.uses_variables());
        assert!(SqlPackageAction::DeployReport.uses_variables());
        assert!(!SqlPackageAction::Export.uses_variables());
        assert!(!SqlPackageAction::Import.uses_variables());
        assert!(!SqlPackageAction::Extract.uses_variables());
        assert!(!SqlPackageAction::DriftReport.uses_variables());
    }
}
