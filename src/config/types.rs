use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::settings::{EndpointSettings, SqlPackageSettings};

/// Root configuration container.
///
/// Every field is optional; an empty file (or a missing one) is a valid
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub invocation: InvocationConfig,
    /// `/p:` properties; table order in the document is preserved.
    #[serde(default)]
    pub properties: toml::Table,
    /// `/v:` variables; table order in the document is preserved.
    #[serde(default)]
    pub variables: toml::Table,
}

/// Executable discovery overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Explicit path to the executable, bypassing probing.
    pub path: Option<PathBuf>,
}

/// Invocation parameters, mirroring the settings model field for field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationConfig {
    /// Action name (e.g. "Publish"). The CLI positional action wins
    /// over this when both are given.
    pub action: Option<String>,
    pub output_path: Option<PathBuf>,
    pub overwrite_files: Option<bool>,
    pub quiet: Option<bool>,
    pub profile: Option<PathBuf>,
    pub tenant_id: Option<String>,
    pub universal_authentication: Option<bool>,
    #[serde(default)]
    pub source: EndpointConfig,
    #[serde(default)]
    pub target: EndpointConfig,
}

/// One endpoint table (`[invocation.source]` / `[invocation.target]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub connection_string: Option<String>,
    pub file: Option<PathBuf>,
    pub database_name: Option<String>,
    pub server_name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub encrypt_connection: Option<bool>,
    pub trust_server_certificate: Option<bool>,
    pub timeout: Option<u32>,
}

impl EndpointConfig {
    fn apply_to(&self, endpoint: &mut EndpointSettings) {
        clone_into(&self.connection_string, &mut endpoint.connection_string);
        clone_into(&self.file, &mut endpoint.file);
        clone_into(&self.database_name, &mut endpoint.database_name);
        clone_into(&self.server_name, &mut endpoint.server_name);
        clone_into(&self.user, &mut endpoint.user);
        clone_into(&self.password, &mut endpoint.password);
        clone_into(&self.encrypt_connection, &mut endpoint.encrypt_connection);
        clone_into(
            &self.trust_server_certificate,
            &mut endpoint.trust_server_certificate,
        );
        clone_into(&self.timeout, &mut endpoint.timeout);
    }
}

impl Config {
    /// Fill a settings instance from this configuration. Only values
    /// present in the file are written; everything else is left as-is.
    pub fn apply_to(&self, mut settings: SqlPackageSettings) -> SqlPackageSettings {
        let inv = &self.invocation;
        clone_into(&inv.output_path, &mut settings.output_path);
        clone_into(&inv.overwrite_files, &mut settings.overwrite_files);
        clone_into(&inv.quiet, &mut settings.quiet);
        clone_into(&inv.profile, &mut settings.profile);
        clone_into(&inv.tenant_id, &mut settings.tenant_id);
        clone_into(
            &inv.universal_authentication,
            &mut settings.universal_authentication,
        );
        inv.source.apply_to(&mut settings.source);
        inv.target.apply_to(&mut settings.target);

        for (key, value) in &self.properties {
            settings.properties.insert(key.as_str(), value_to_string(value));
        }
        for (key, value) in &self.variables {
            settings.variables.insert(key.as_str(), value_to_string(value));
        }

        settings
    }
}

fn clone_into<T: Clone>(source: &Option<T>, dest: &mut Option<T>) {
    if let Some(value) = source {
        *dest = Some(value.clone());
    }
}

/// Property/variable values are forwarded verbatim, so scalars are
/// rendered without TOML syntax around them.
fn value_to_string(value: &toml::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
