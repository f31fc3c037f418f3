use std::path::PathBuf;
use std::process::exit;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sqlpack::args::build_arguments;
use sqlpack::config::Config;
use sqlpack::{
    ProcessOptions, SqlPackageAction, SqlPackageError, SqlPackageRunner, SqlPackageSettings,
};

/// Run the SqlPackage database schema tool.
#[derive(Debug, Parser)]
#[command(name = "sqlpack", version)]
struct Cli {
    /// Action to run: Export, Import, Extract, Publish, Script,
    /// DriftReport or DeployReport. May also come from the config file.
    action: Option<String>,

    /// Path to a config file (default: platform config dir).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Explicit path to the SqlPackage executable.
    #[arg(long, value_name = "FILE")]
    tool_path: Option<PathBuf>,

    /// Print the command line instead of executing it.
    #[arg(long)]
    dry_run: bool,

    /// Suppress the tool's stdout and stderr.
    #[arg(long)]
    silent: bool,

    #[arg(long, value_name = "PATH")]
    output_path: Option<PathBuf>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    overwrite_files: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    quiet: Option<bool>,

    /// DAC publish profile path.
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    #[arg(long, value_name = "ID")]
    tenant_id: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    universal_authentication: Option<bool>,

    #[arg(long, value_name = "CONN")]
    source_connection_string: Option<String>,

    #[arg(long, value_name = "FILE")]
    source_file: Option<PathBuf>,

    #[arg(long, value_name = "NAME")]
    source_database_name: Option<String>,

    #[arg(long, value_name = "NAME")]
    source_server_name: Option<String>,

    #[arg(long, value_name = "USER")]
    source_user: Option<String>,

    #[arg(long, value_name = "PASSWORD")]
    source_password: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    source_encrypt_connection: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    source_trust_server_certificate: Option<bool>,

    #[arg(long, value_name = "SECONDS")]
    source_timeout: Option<u32>,

    #[arg(long, value_name = "CONN")]
    target_connection_string: Option<String>,

    #[arg(long, value_name = "FILE")]
    target_file: Option<PathBuf>,

    #[arg(long, value_name = "NAME")]
    target_database_name: Option<String>,

    #[arg(long, value_name = "NAME")]
    target_server_name: Option<String>,

    #[arg(long, value_name = "USER")]
    target_user: Option<String>,

    #[arg(long, value_name = "PASSWORD")]
    target_password: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    target_encrypt_connection: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    target_trust_server_certificate: Option<bool>,

    #[arg(long, value_name = "SECONDS")]
    target_timeout: Option<u32>,

    /// Action-specific property, NAME=VALUE. Repeatable.
    #[arg(long = "property", value_name = "NAME=VALUE")]
    properties: Vec<String>,

    /// SQLCMD variable, NAME=VALUE. Repeatable.
    #[arg(long = "variable", value_name = "NAME=VALUE")]
    variables: Vec<String>,
}

impl Cli {
    /// Layer CLI values over a (possibly config-filled) settings
    /// instance. Only flags that were actually given override.
    fn apply_to(&self, settings: &mut SqlPackageSettings) -> anyhow::Result<()> {
        override_opt(&self.output_path, &mut settings.output_path);
        override_opt(&self.overwrite_files, &mut settings.overwrite_files);
        override_opt(&self.quiet, &mut settings.quiet);
        override_opt(&self.profile, &mut settings.profile);
        override_opt(&self.tenant_id, &mut settings.tenant_id);
        override_opt(
            &self.universal_authentication,
            &mut settings.universal_authentication,
        );

        override_opt(
            &self.source_connection_string,
            &mut settings.source.connection_string,
        );
        override_opt(&self.source_file, &mut settings.source.file);
        override_opt(&self.source_database_name, &mut settings.source.database_name);
        override_opt(&self.source_server_name, &mut settings.source.server_name);
        override_opt(&self.source_user, &mut settings.source.user);
        override_opt(&self.source_password, &mut settings.source.password);
        override_opt(
            &self.source_encrypt_connection,
            &mut settings.source.encrypt_connection,
        );
        override_opt(
            &self.source_trust_server_certificate,
            &mut settings.source.trust_server_certificate,
        );
        override_opt(&self.source_timeout, &mut settings.source.timeout);

        override_opt(
            &self.target_connection_string,
            &mut settings.target.connection_string,
        );
        override_opt(&self.target_file, &mut settings.target.file);
        override_opt(&self.target_database_name, &mut settings.target.database_name);
        override_opt(&self.target_server_name, &mut settings.target.server_name);
        override_opt(&self.target_user, &mut settings.target.user);
        override_opt(&self.target_password, &mut settings.target.password);
        override_opt(
            &self.target_encrypt_connection,
            &mut settings.target.encrypt_connection,
        );
        override_opt(
            &self.target_trust_server_certificate,
            &mut settings.target.trust_server_certificate,
        );
        override_opt(&self.target_timeout, &mut settings.target.timeout);

        for pair in &self.properties {
            let (key, value) = parse_pair(pair)
                .with_context(|| format!("invalid --property '{pair}'"))?;
            settings.properties.insert(key, value);
        }
        for pair in &self.variables {
            let (key, value) = parse_pair(pair)
                .with_context(|| format!("invalid --variable '{pair}'"))?;
            settings.variables.insert(key, value);
        }

        Ok(())
    }
}

fn override_opt<T: Clone>(source: &Option<T>, dest: &mut Option<T>) {
    if let Some(value) = source {
        *dest = Some(value.clone());
    }
}

/// Split a `NAME=VALUE` pair on the first `=`.
fn parse_pair(pair: &str) -> anyhow::Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => anyhow::bail!("expected NAME=VALUE"),
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        // Pass the wrapped tool's exit code through to our caller.
        if let Some(SqlPackageError::NonZeroExit { code }) = err.downcast_ref::<SqlPackageError>()
        {
            eprintln!("{err}");
            exit(*code);
        }
        eprintln!("Error: {err:#}");
        exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let action_name = cli
        .action
        .clone()
        .or_else(|| config.invocation.action.clone())
        .context("no action given; pass one on the command line or set [invocation] action")?;
    let action: SqlPackageAction = action_name.parse()?;

    let mut settings = config.apply_to(SqlPackageSettings::new(action));
    cli.apply_to(&mut settings)?;

    let working_dir = std::env::current_dir().context("could not determine working directory")?;

    if cli.dry_run {
        println!("{}", build_arguments(&settings, &working_dir).join(" "));
        return Ok(());
    }

    let mut runner = SqlPackageRunner::new(working_dir);
    if let Some(path) = cli.tool_path.clone().or_else(|| config.tool.path.clone()) {
        runner = runner.with_tool_path(path);
    }

    let options = ProcessOptions {
        silence_stdout: cli.silent,
        silence_stderr: cli.silent,
    };
    runner.execute(&settings, Some(options))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_pair;

    #[test]
    fn parse_pair_splits_on_first_equals() {
        let (key, value) = parse_pair("ConnectionString=Server=.;Db=x").unwrap();
        assert_eq!(key, "ConnectionString");
        assert_eq!(value, "Server=.;Db=x");
    }

    #[test]
    fn parse_pair_allows_empty_value() {
        let (key, value) = parse_pair("Flag=").unwrap();
        assert_eq!(key, "Flag");
        assert_eq!(value, "");
    }

    #[test]
    fn parse_pair_rejects_missing_equals() {
        assert!(parse_pair("NoEquals").is_err());
        assert!(parse_pair("=value").is_err());
    }
}
