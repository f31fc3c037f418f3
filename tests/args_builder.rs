//! Integration tests for the argument builder policy.

use std::path::Path;

use sqlpack::args::build_arguments;
use sqlpack::{EndpointSettings, SqlPackageAction, SqlPackageSettings};

fn working_dir() -> &'static Path {
    Path::new("/Working")
}

fn build(settings: &SqlPackageSettings) -> Vec<String> {
    build_arguments(settings, working_dir())
}

fn populated_endpoint() -> EndpointSettings {
    EndpointSettings {
        connection_string: None,
        file: None,
        database_name: Some("db".into()),
        server_name: Some("server".into()),
        user: Some("sa".into()),
        password: Some("secret".into()),
        encrypt_connection: Some(true),
        trust_server_certificate: Some(false),
        timeout: Some(30),
    }
}

// =============================================================================
// ACTION TOKEN
// =============================================================================

#[test]
fn action_token_is_first_and_unique_for_every_action() {
    for action in SqlPackageAction::ALL {
        let args = build(&SqlPackageSettings::new(action));
        let expected = format!("/Action:{action}");
        assert_eq!(args[0], expected);
        assert_eq!(args.iter().filter(|a| a.starts_with("/Action:")).count(), 1);
    }
}

#[test]
fn bare_settings_emit_only_the_action_token() {
    assert_eq!(build(&SqlPackageSettings::export()), ["/Action:Export"]);
}

// =============================================================================
// SCALAR FLAGS
// =============================================================================

#[test]
fn output_path_is_resolved_and_quoted() {
    let settings = SqlPackageSettings::import().with_output_path("./artifacts");
    assert_eq!(
        build(&settings),
        ["/Action:Import", "/OutputPath:\"/Working/artifacts\""]
    );
}

#[test]
fn overwrite_files_uses_invariant_boolean_form() {
    let settings = SqlPackageSettings::publish().with_overwrite_files(true);
    assert_eq!(build(&settings), ["/Action:Publish", "/OverwriteFiles:True"]);

    let settings = SqlPackageSettings::publish().with_overwrite_files(false);
    assert_eq!(
        build(&settings),
        ["/Action:Publish", "/OverwriteFiles:False"]
    );
}

#[test]
fn quiet_is_emitted_only_when_set() {
    let settings = SqlPackageSettings::publish().with_quiet(true);
    assert_eq!(build(&settings), ["/Action:Publish", "/Quiet:True"]);

    let settings = SqlPackageSettings::publish();
    assert_eq!(build(&settings), ["/Action:Publish"]);
}

#[test]
fn profile_is_never_emitted() {
    for action in SqlPackageAction::ALL {
        let settings = SqlPackageSettings::new(action).with_profile("./profile.pubxml");
        let args = build(&settings);
        assert!(
            args.iter().all(|a| !a.contains("Profile")),
            "unexpected profile token for {action}: {args:?}"
        );
    }
}

// =============================================================================
// ENDPOINT PRECEDENCE
// =============================================================================

#[test]
fn source_connection_string_is_verbatim_and_unquoted() {
    let conn = "Data Source=(LocalDB)\\v11.0;Initial Catalog=Db;Integrated Security=True";
    let settings = SqlPackageSettings::publish().with_source_connection_string(conn);
    assert_eq!(
        build(&settings),
        ["/Action:Publish".to_string(), format!("/SourceConnectionString:{conn}")]
    );
}

#[test]
fn source_connection_string_suppresses_file_and_discrete_fields() {
    let mut endpoint = populated_endpoint();
    endpoint.connection_string = Some("Server=.;Database=db".into());
    endpoint.file = Some("./a.dacpac".into());
    let settings = SqlPackageSettings::publish().with_source(endpoint);

    let args = build(&settings);
    assert_eq!(
        args,
        ["/Action:Publish", "/SourceConnectionString:Server=.;Database=db"]
    );
}

#[test]
fn source_file_suppresses_discrete_fields() {
    let mut endpoint = populated_endpoint();
    endpoint.file = Some("./a.dacpac".into());
    let settings = SqlPackageSettings::publish().with_source(endpoint);

    let args = build(&settings);
    assert_eq!(
        args,
        ["/Action:Publish", "/SourceFile:\"/Working/a.dacpac\""]
    );
}

#[test]
fn discrete_source_fields_are_each_independent() {
    let settings = SqlPackageSettings::publish().with_source(populated_endpoint());
    assert_eq!(
        build(&settings),
        [
            "/Action:Publish",
            "/SourceDatabaseName:db",
            "/SourceServerName:server",
            "/SourceUser:sa",
            "/SourcePassword:secret",
            "/SourceEncryptConnection:True",
            "/SourceTrustServerCertificate:False",
            "/SourceTimeout:30",
        ]
    );
}

#[test]
fn target_group_applies_the_same_precedence_independently() {
    let mut target = populated_endpoint();
    target.connection_string = Some("Server=target;Database=db".into());
    target.file = Some("./t.dacpac".into());

    let settings = SqlPackageSettings::publish()
        .with_source_file("./s.dacpac")
        .with_target(target);

    assert_eq!(
        build(&settings),
        [
            "/Action:Publish",
            "/SourceFile:\"/Working/s.dacpac\"",
            "/TargetConnectionString:Server=target;Database=db",
        ]
    );
}

#[test]
fn target_file_suppresses_target_discrete_fields() {
    let mut target = populated_endpoint();
    target.file = Some("./t.dacpac".into());
    let settings = SqlPackageSettings::script().with_target(target);

    assert_eq!(
        build(&settings),
        ["/Action:Script", "/TargetFile:\"/Working/t.dacpac\""]
    );
}

#[test]
fn scalar_values_with_whitespace_are_quoted() {
    let mut source = EndpointSettings::default();
    source.server_name = Some("my server".into());
    let settings = SqlPackageSettings::extract().with_source(source);

    assert_eq!(
        build(&settings),
        ["/Action:Extract", "/SourceServerName:\"my server\""]
    );
}

// =============================================================================
// AUTHENTICATION, PROPERTIES, VARIABLES
// =============================================================================

#[test]
fn tenant_and_universal_auth_precede_properties() {
    let settings = SqlPackageSettings::export()
        .with_universal_authentication(true)
        .with_property("CommandTimeout", "120");

    assert_eq!(
        build(&settings),
        [
            "/Action:Export",
            "/UniversalAuthentication:True",
            "/p:CommandTimeout=120",
        ]
    );
}

#[test]
fn tenant_id_is_emitted_when_set() {
    let settings = SqlPackageSettings::export().with_tenant_id("common");
    assert_eq!(build(&settings), ["/Action:Export", "/TenantId:common"]);
}

#[test]
fn properties_keep_insertion_order_and_casing() {
    let settings = SqlPackageSettings::publish()
        .with_property("CreateNewDatabase", "True")
        .with_property("CommandTimeout", "120");

    assert_eq!(
        build(&settings),
        [
            "/Action:Publish",
            "/p:CreateNewDatabase=True",
            "/p:CommandTimeout=120",
        ]
    );
}

#[test]
fn property_values_are_never_quoted() {
    let settings = SqlPackageSettings::publish().with_property("Comment", "two words");
    assert_eq!(
        build(&settings),
        ["/Action:Publish", "/p:Comment=two words"]
    );
}

#[test]
fn variables_are_emitted_for_variable_consuming_actions() {
    for action in [
        SqlPackageAction::Publish,
        SqlPackageAction::Script,
        SqlPackageAction::DeployReport,
    ] {
        let settings = SqlPackageSettings::new(action).with_variable("Env", "prod");
        let args = build(&settings);
        assert!(args.contains(&"/v:Env=prod".to_string()), "{action}: {args:?}");
    }
}

#[test]
fn variables_are_dropped_for_other_actions() {
    for action in [
        SqlPackageAction::Export,
        SqlPackageAction::Import,
        SqlPackageAction::Extract,
        SqlPackageAction::DriftReport,
    ] {
        let settings = SqlPackageSettings::new(action).with_variable("X", "1");
        let args = build(&settings);
        assert!(
            args.iter().all(|a| !a.starts_with("/v:")),
            "{action}: {args:?}"
        );
    }
}

#[test]
fn properties_come_before_variables() {
    let settings = SqlPackageSettings::publish()
        .with_variable("Env", "prod")
        .with_property("CommandTimeout", "120");

    assert_eq!(
        build(&settings),
        [
            "/Action:Publish",
            "/p:CommandTimeout=120",
            "/v:Env=prod",
        ]
    );
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn building_twice_yields_identical_sequences() {
    let settings = SqlPackageSettings::publish()
        .with_output_path("./out")
        .with_source_connection_string("Server=.;Database=db")
        .with_target_file("./t.dacpac")
        .with_property("p1", "a")
        .with_property("p2", "b")
        .with_variable("v1", "c");

    assert_eq!(build(&settings), build(&settings));
}
