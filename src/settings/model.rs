//! The SqlPackage settings record.

use std::path::PathBuf;

use crate::settings::{ParamMap, SqlPackageAction};

/// One endpoint (source or target) of a SqlPackage invocation.
///
/// The connection-string, file and discrete-field forms may all be
/// populated at once; the argument builder applies the precedence
/// (connection string > file > discrete fields) at emission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointSettings {
    /// SQL Server/Azure connection string. When present it is used
    /// exclusively of every other field in this group.
    pub connection_string: Option<String>,
    /// A file (e.g. a .dacpac) standing in for a database endpoint.
    pub file: Option<PathBuf>,
    pub database_name: Option<String>,
    pub server_name: Option<String>,
    /// SQL Server auth user.
    pub user: Option<String>,
    /// SQL Server auth password.
    pub password: Option<String>,
    pub encrypt_connection: Option<bool>,
    pub trust_server_certificate: Option<bool>,
    /// Connection timeout in seconds.
    pub timeout: Option<u32>,
}

impl EndpointSettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full parameter set for one SqlPackage invocation.
///
/// The action is fixed at construction and never changes. All other
/// fields are optional; the model performs no cross-field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlPackageSettings {
    action: SqlPackageAction,
    /// Directory or file where output artifacts are generated.
    pub output_path: Option<PathBuf>,
    /// Whether existing output files may be overwritten.
    pub overwrite_files: Option<bool>,
    /// Suppress detailed feedback.
    pub quiet: Option<bool>,
    /// DAC publish profile path. Accepted and stored, but never
    /// forwarded to the tool (see the argument builder).
    pub profile: Option<PathBuf>,
    /// Azure AD tenant identifier.
    pub tenant_id: Option<String>,
    /// Use Universal Authentication.
    pub universal_authentication: Option<bool>,
    pub source: EndpointSettings,
    pub target: EndpointSettings,
    /// Action-specific `/p:` properties, forwarded verbatim.
    pub properties: ParamMap,
    /// SQLCMD `/v:` variables, forwarded only for variable-consuming
    /// actions.
    pub variables: ParamMap,
}

impl SqlPackageSettings {
    pub fn new(action: SqlPackageAction) -> Self {
        Self {
            action,
            output_path: None,
            overwrite_files: None,
            quiet: None,
            profile: None,
            tenant_id: None,
            universal_authentication: None,
            source: EndpointSettings::default(),
            target: EndpointSettings::default(),
            properties: ParamMap::new(),
            variables: ParamMap::new(),
        }
    }

    pub fn export() -> Self {
        Self::new(SqlPackageAction::Export)
    }

    pub fn import() -> Self {
        Self::new(SqlPackageAction::Import)
    }

    pub fn extract() -> Self {
        Self::new(SqlPackageAction::Extract)
    }

    pub fn publish() -> Self {
        Self::new(SqlPackageAction::Publish)
    }

    pub fn script() -> Self {
        Self::new(SqlPackageAction::Script)
    }

    pub fn drift_report() -> Self {
        Self::new(SqlPackageAction::DriftReport)
    }

    pub fn deploy_report() -> Self {
        Self::new(SqlPackageAction::DeployReport)
    }

    /// The action this settings instance was constructed for.
    pub fn action(&self) -> SqlPackageAction {
        self.action
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_overwrite_files(mut self, overwrite: bool) -> Self {
        self.overwrite_files = Some(overwrite);
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }

    pub fn with_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile = Some(path.into());
        self
    }

    pub fn with_tenant_id(mut self, tenant: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant.into());
        self
    }

    pub fn with_universal_authentication(mut self, enabled: bool) -> Self {
        self.universal_authentication = Some(enabled);
        self
    }

    pub fn with_source(mut self, endpoint: EndpointSettings) -> Self {
        self.source = endpoint;
        self
    }

    pub fn with_target(mut self, endpoint: EndpointSettings) -> Self {
        self.target = endpoint;
        self
    }

    pub fn with_source_connection_string(mut self, conn: impl Into<String>) -> Self {
        self.source.connection_string = Some(conn.into());
        self
    }

    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source.file = Some(path.into());
        self
    }

    pub fn with_target_connection_string(mut self, conn: impl Into<String>) -> Self {
        self.target.connection_string = Some(conn.into());
        self
    }

    pub fn with_target_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target.file = Some(path.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key, value);
        self
    }
}
