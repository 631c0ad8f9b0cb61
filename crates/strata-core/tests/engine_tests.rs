//! End-to-end resolution against real files on disk

use pretty_assertions::assert_eq;
use rstest::rstest;
use strata_core::{ConfigEngine, EngineOptions, EnvironmentSource, Error, Value, Variables};
use strata_fs::LocalFs;
use strata_test_utils::TestApp;

const SETTINGS: &str = r#"
[production]
test = 1
"database.default.password" = "secret"
"database.default.host" = "db.internal"
featureflags = { search = true, beta = false }

["production : development"]
x = 2
"a.c" = 2
featureflags = ""

["production : development : testing"]
"database.default.host" = "localhost"
"#;

fn options(app: &TestApp) -> EngineOptions {
    EngineOptions::new(app.root().to_path_buf()).with_variables(Variables::empty())
}

fn build(app: &TestApp, opts: &EngineOptions) -> ConfigEngine {
    ConfigEngine::with_options(&LocalFs::new(), opts).unwrap_or_else(|e| {
        panic!("engine for {} failed: {e}", app.root().display())
    })
}

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scenario_a_flat_and_dotted_keys() {
        let app = TestApp::new().settings(
            "[production]\ntest = 1\n\"database.default.password\" = \"secret\"\n",
        );
        let engine = build(&app, &options(&app).with_environment("production"));

        assert_eq!(engine.get_setting("test", Value::Null), Value::Integer(1));
        assert_eq!(
            engine.get_setting("database.default.password", Value::Null),
            Value::from("secret")
        );
        assert_eq!(engine.get_setting("missing", "nope"), Value::from("nope"));
    }

    #[test]
    fn scenario_b_child_overrides_parent_scalar() {
        let app = TestApp::new()
            .settings("[production]\nx = 1\n\n[\"production:development\"]\nx = 2\n");
        let engine = build(&app, &options(&app).with_environment("development"));

        assert_eq!(engine.get_setting("x", Value::Null), Value::Integer(2));
    }

    #[test]
    fn scenario_c_child_extends_inherited_mapping() {
        let app = TestApp::new()
            .settings("[production]\n\"a.b\" = 1\n\n[\"production:development\"]\n\"a.c\" = 2\n");
        let engine = build(&app, &options(&app).with_environment("development"));

        assert_eq!(engine.get_setting("a.b", Value::Null), Value::Integer(1));
        assert_eq!(engine.get_setting("a.c", Value::Null), Value::Integer(2));
    }

    #[test]
    fn scenario_d_undeclared_active_environment() {
        let app = TestApp::new().settings("[production]\nx = 1\n");
        let err = ConfigEngine::with_options(
            &LocalFs::new(),
            &options(&app).with_environment("staging"),
        )
        .unwrap_err();

        assert!(err.is_config_load());
        assert!(matches!(err, Error::EnvironmentNotDeclared { .. }));
    }

    #[test]
    fn scenario_e_local_file_wins() {
        let app = TestApp::new()
            .settings("[production]\n\"database.default.password\" = \"secret\"\n")
            .local("\"database.default.password\" = \"from_local\"\n");
        let engine = build(&app, &options(&app));

        assert_eq!(
            engine.get_setting("database.default.password", Value::Null),
            Value::from("from_local")
        );
    }
}

#[rstest]
#[case("production", "db.internal", true)]
#[case("development", "db.internal", false)]
#[case("testing", "localhost", false)]
fn inheritance_chain_per_environment(
    #[case] environment: &str,
    #[case] host: &str,
    #[case] flags_are_mapping: bool,
) {
    let app = TestApp::new().settings(SETTINGS);
    let engine = build(&app, &options(&app).with_environment(environment));

    assert_eq!(engine.environment_name(), environment);
    assert_eq!(engine.get_setting("database.default.host", Value::Null), Value::from(host));
    assert_eq!(engine.get_setting("database.default.password", Value::Null), Value::from("secret"));
    assert_eq!(engine.get("featureflags").unwrap().is_mapping(), flags_are_mapping);
}

#[test]
fn demoted_mapping_hides_nested_lookups() {
    let app = TestApp::new().settings(SETTINGS);
    let engine = build(&app, &options(&app).with_environment("development"));

    assert_eq!(engine.get_setting("featureflags", Value::Null), Value::from(""));
    assert_eq!(engine.get_setting("featureflags.search", false), Value::Bool(false));
}

#[test]
fn missing_primary_file_is_fatal() {
    let app = TestApp::new();
    let err = ConfigEngine::with_options(&LocalFs::new(), &options(&app)).unwrap_err();
    assert!(matches!(err, Error::ConfigLoad { .. }));
}

#[test]
fn malformed_local_file_is_fatal() {
    let app = TestApp::new()
        .settings("[production]\nx = 1\n")
        .local("this is = = not toml");
    let err = ConfigEngine::with_options(&LocalFs::new(), &options(&app)).unwrap_err();
    assert!(err.is_config_load());
}

#[test]
fn environment_precedence_from_disk() {
    let app = TestApp::new().settings(SETTINGS).marker("testing");

    let from_marker = build(&app, &options(&app));
    assert_eq!(from_marker.environment_name(), "testing");
    assert!(matches!(
        from_marker.environment_source(),
        EnvironmentSource::MarkerFile(_)
    ));

    let from_variable = build(
        &app,
        &options(&app).with_variables(Variables::fixed([("STRATA_ENV", "development")])),
    );
    assert_eq!(from_variable.environment_name(), "development");

    let custom_variable = build(
        &app,
        &options(&app)
            .with_variable("APP_ENV")
            .with_variables(Variables::fixed([("APP_ENV", "production")])),
    );
    assert_eq!(custom_variable.environment_name(), "production");
}

#[test]
fn yaml_declaration_with_json_overrides() {
    let app = TestApp::new();
    app.write(
        "config/settings.yaml",
        "production:\n  mail:\n    driver: smtp\n    port: 25\n\"production : development\":\n  mail.driver: log\n",
    );
    app.write("config/settings.local.json", r#"{"mail": {"port": 2525}}"#);

    let opts = options(&app)
        .with_settings_path("config/settings.yaml")
        .with_local_path("config/settings.local.json")
        .with_environment("development");
    let engine = build(&app, &opts);

    assert_eq!(engine.get_setting("mail.driver", Value::Null), Value::from("log"));
    assert_eq!(engine.get_setting("mail.port", Value::Null), Value::Integer(2525));
}

#[test]
fn engine_is_shared_across_threads() {
    let app = TestApp::new().settings(SETTINGS);
    let engine = std::sync::Arc::new(build(&app, &options(&app)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || engine.get_setting("test", Value::Null))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Value::Integer(1));
    }
}
