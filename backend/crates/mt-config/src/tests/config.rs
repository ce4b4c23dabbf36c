use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, setup_valid_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, none, ok, some};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.database.store_path.as_str(), eq("store.db"));
    assert_that!(config.database.identity_path.as_str(), eq("identity.db"));
    assert_that!(config.store.users_collection.as_str(), eq("users"));
    assert_that!(config.auth.jwt_secret, none());
    assert_that!(config.metrics.enabled, eq(true));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_is_created() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let nested = temp.path().join("nested").join("config");
    let _dir = EnvGuard::set("MT_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.is_dir());
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_ok_and_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [server]
              port = 9000

              [store]
              users_collection = "accounts"
              delete_batch_size = 250

              [rate_limit]
              max_requests = 3
          "#,
    )
    .unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.store.users_collection.as_str(), eq("accounts"));
    assert_that!(config.store.delete_batch_size, eq(250));
    assert_that!(config.rate_limit.max_requests, eq(3));
    assert_that!(config.rate_limit.window_secs, eq(60));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server]\nport = 9000").unwrap();
    let _port_guard = EnvGuard::set("MT_SERVER_PORT", "8888");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(8888));
}

#[test]
#[serial]
fn given_multiple_env_overrides_when_load_then_all_apply() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _host = EnvGuard::set("MT_SERVER_HOST", "0.0.0.0");
    let _colored = EnvGuard::set("MT_LOG_COLORED", "false");
    let _file = EnvGuard::set("MT_LOG_FILE", "server.log");
    let _batch = EnvGuard::set("MT_STORE_DELETE_BATCH_SIZE", "42");
    let _metrics = EnvGuard::set("MT_METRICS_ENABLED", "0");
    let _issuer = EnvGuard::set("MT_AUTH_ISSUER", "https://issuer.example");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.host.as_str(), eq("0.0.0.0"));
    assert_that!(config.logging.colored, eq(false));
    assert_that!(config.logging.file, some(eq("server.log")));
    assert_that!(config.store.delete_batch_size, eq(42));
    assert_that!(config.metrics.enabled, eq(false));
    assert_that!(config.auth.issuer, some(eq("https://issuer.example")));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_keeps_previous_value() {
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("MT_SERVER_PORT", "not-a-port");

    let config = Config::load().unwrap();

    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_error_names_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server\nport = ").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_secret_configured_when_load_and_validate_then_ok() {
    let (_temp, _dir, _secret) = setup_valid_config_dir();

    let config = Config::load().unwrap();

    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_low_port_when_validate_then_error() {
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _port = EnvGuard::set("MT_SERVER_PORT", "80");

    let config = Config::load().unwrap();
    let result = config.validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("server.port"));
}

#[test]
#[serial]
fn given_port_zero_when_validate_then_ok() {
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _port = EnvGuard::set("MT_SERVER_PORT", "0");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_zero_rate_limit_when_validate_then_error() {
    let (_temp, _dir, _secret) = setup_valid_config_dir();
    let _max = EnvGuard::set("MT_RATE_LIMIT_MAX_REQUESTS", "0");

    let config = Config::load().unwrap();
    let result = config.validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("rate_limit.max_requests"));
}

#[test]
#[serial]
fn given_config_dir_when_resolving_paths_then_joined_under_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("MT_LOG_FILE", "server.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.store_database_path().unwrap(),
        eq(&temp.path().join("store.db"))
    );
    assert_that!(
        config.identity_database_path().unwrap(),
        eq(&temp.path().join("identity.db"))
    );
    assert_that!(
        config.log_file_path().unwrap(),
        some(eq(&temp.path().join("log").join("server.log")))
    );
}

#[test]
#[serial]
fn given_default_config_when_bind_addr_then_host_and_port() {
    let (_temp, _guard) = setup_config_dir();

    let config = Config::load().unwrap();

    assert_that!(config.bind_addr().as_str(), eq("127.0.0.1:8000"));
}
