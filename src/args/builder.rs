//! Argument builder — translates settings into the token sequence.

use std::path::Path;

use crate::args::format::{bool_str, quoted_path, scalar};
use crate::settings::{EndpointSettings, SqlPackageSettings};

/// Ordered token accumulator with the tool's `/Name:value` shapes.
struct TokenList<'a> {
    tokens: Vec<String>,
    working_dir: &'a Path,
}

impl<'a> TokenList<'a> {
    fn new(working_dir: &'a Path) -> Self {
        Self {
            tokens: Vec::new(),
            working_dir,
        }
    }

    /// Append a preformatted token verbatim.
    fn push_raw(&mut self, token: String) {
        self.tokens.push(token);
    }

    fn push_bool(&mut self, name: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.tokens.push(format!("/{name}:{}", bool_str(value)));
        }
    }

    fn push_scalar(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.tokens.push(format!("/{name}:{}", scalar(value)));
        }
    }

    fn push_number(&mut self, name: &str, value: Option<u32>) {
        if let Some(value) = value {
            self.tokens.push(format!("/{name}:{value}"));
        }
    }

    fn push_path(&mut self, name: &str, value: Option<&Path>) {
        if let Some(value) = value {
            self.tokens
                .push(format!("/{name}:{}", quoted_path(value, self.working_dir)));
        }
    }

    /// Emit one endpoint group under the connection-string > file >
    /// discrete-fields precedence. `prefix` is `Source` or `Target`.
    fn push_endpoint(&mut self, prefix: &str, endpoint: &EndpointSettings) {
        if let Some(conn) = &endpoint.connection_string {
            // Exclusive form; never quoted, never path-resolved.
            self.push_raw(format!("/{prefix}ConnectionString:{conn}"));
            return;
        }

        if let Some(file) = &endpoint.file {
            self.push_path(&format!("{prefix}File"), Some(file));
            return;
        }

        self.push_scalar(
            &format!("{prefix}DatabaseName"),
            endpoint.database_name.as_deref(),
        );
        self.push_scalar(
            &format!("{prefix}ServerName"),
            endpoint.server_name.as_deref(),
        );
        self.push_scalar(&format!("{prefix}User"), endpoint.user.as_deref());
        self.push_scalar(&format!("{prefix}Password"), endpoint.password.as_deref());
        self.push_bool(
            &format!("{prefix}EncryptConnection"),
            endpoint.encrypt_connection,
        );
        self.push_bool(
            &format!("{prefix}TrustServerCertificate"),
            endpoint.trust_server_certificate,
        );
        self.push_number(&format!("{prefix}Timeout"), endpoint.timeout);
    }
}

/// Build the ordered token sequence for one invocation.
///
/// Pure and deterministic: the settings are only read, and building
/// twice from the same instance yields identical output. Relative paths
/// are resolved against `working_dir`.
pub fn build_arguments(settings: &SqlPackageSettings, working_dir: &Path) -> Vec<String> {
    let mut list = TokenList::new(working_dir);

    list.push_raw(format!("/Action:{}", settings.action()));

    list.push_path("OutputPath", settings.output_path.as_deref());
    list.push_bool("OverwriteFiles", settings.overwrite_files);
    list.push_bool("Quiet", settings.quiet);

    // Profile is stored on the settings but never forwarded.

    list.push_endpoint("Source", &settings.source);
    list.push_endpoint("Target", &settings.target);

    list.push_scalar("TenantId", settings.tenant_id.as_deref());
    list.push_bool("UniversalAuthentication", settings.universal_authentication);

    for (key, value) in settings.properties.iter() {
        list.push_raw(format!("/p:{key}={value}"));
    }

    if settings.action().uses_variables() {
        for (key, value) in settings.variables.iter() {
            list.push_raw(format!("/v:{key}={value}"));
        }
    }

    list.tokens
}
