use p3a_replay::app::{Config, ConfigError, DEFAULT_ENDPOINT, LogLevel};
use p3a_replay::ResponsePolicy;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ENV_VARS: &[&str] = &[
    "REPLAY_CONFIG",
    "ENCLAVE_ENDPOINT",
    "ACCEPT_INVALID_CERTS",
    "REQUEST_TIMEOUT_SECS",
    "RESPONSE_POLICY",
    "LOG_LEVEL",
];

fn clear_env() {
    unsafe {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_single_directory_argument() {
    clear_env();

    let config = Config::from_args_and_env(["p3a-replay", "/data/p3a"]).unwrap();

    assert_eq!(config.directory, PathBuf::from("/data/p3a"));
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert!(!config.accept_invalid_certs);
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.response_policy, ResponsePolicy::Tolerate);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
#[serial]
fn test_wrong_argument_count_is_usage_error() {
    clear_env();

    match Config::from_args_and_env(["/usr/bin/p3a-replay"]) {
        Err(ConfigError::Usage { program }) => assert_eq!(program, "/usr/bin/p3a-replay"),
        other => panic!("Expected usage error, got: {other:?}"),
    }

    let result = Config::from_args_and_env(["p3a-replay", "/data/a", "/data/b"]);
    assert!(matches!(result, Err(ConfigError::Usage { .. })));

    let result = Config::from_args_and_env(["p3a-replay", "--endpoint", "http://x"]);
    assert!(matches!(result, Err(ConfigError::Usage { .. })));
}

#[test]
#[serial]
fn test_directory_starting_with_hyphen() {
    clear_env();

    let config = Config::from_args_and_env(["p3a-replay", "-captures"]).unwrap();
    assert_eq!(config.directory, PathBuf::from("-captures"));
}

#[test]
#[serial]
fn test_usage_message() {
    let error = ConfigError::Usage {
        program: "p3a-replay".to_string(),
    };
    assert_eq!(error.to_string(), "Usage: p3a-replay DIRECTORY");
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    unsafe {
        env::set_var("ENCLAVE_ENDPOINT", "https://enclave.example:8080/reports");
        env::set_var("ACCEPT_INVALID_CERTS", "true");
        env::set_var("REQUEST_TIMEOUT_SECS", "20");
        env::set_var("RESPONSE_POLICY", "abort");
        env::set_var("LOG_LEVEL", "WARN");
    }

    let config = Config::from_args_and_env(["p3a-replay", "/data/p3a"]).unwrap();

    assert_eq!(config.endpoint, "https://enclave.example:8080/reports");
    assert!(config.accept_invalid_certs);
    assert_eq!(config.request_timeout, Some(Duration::from_secs(20)));
    assert_eq!(config.response_policy, ResponsePolicy::Abort);
    assert_eq!(config.log_level, LogLevel::Warn);

    clear_env();
}

#[test]
#[serial]
fn test_inline_config_with_env_override() {
    clear_env();
    unsafe {
        env::set_var(
            "REPLAY_CONFIG",
            r#"
endpoint = "http://from-toml:9000/reports"
response_policy = "abort"
"#,
        );
        env::set_var("ENCLAVE_ENDPOINT", "http://from-env:9000/reports");
    }

    let config = Config::from_args_and_env(["p3a-replay", "/data/p3a"]).unwrap();

    assert_eq!(config.endpoint, "http://from-env:9000/reports");
    assert_eq!(config.response_policy, ResponsePolicy::Abort);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values() {
    clear_env();

    unsafe {
        env::set_var("LOG_LEVEL", "verbose");
    }
    let result = Config::from_args_and_env(["p3a-replay", "/data/p3a"]);
    assert!(matches!(result, Err(ConfigError::EnvError(_))));
    clear_env();

    unsafe {
        env::set_var("ACCEPT_INVALID_CERTS", "maybe");
    }
    let result = Config::from_args_and_env(["p3a-replay", "/data/p3a"]);
    assert!(matches!(result, Err(ConfigError::EnvError(_))));
    clear_env();

    unsafe {
        env::set_var("REQUEST_TIMEOUT_SECS", "0");
    }
    let result = Config::from_args_and_env(["p3a-replay", "/data/p3a"]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    clear_env();

    unsafe {
        env::set_var("ENCLAVE_ENDPOINT", "ftp://enclave/reports");
    }
    let result = Config::from_args_and_env(["p3a-replay", "/data/p3a"]);
    assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    clear_env();

    unsafe {
        env::set_var("REPLAY_CONFIG", "endpoint = ");
    }
    let result = Config::from_args_and_env(["p3a-replay", "/data/p3a"]);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
    clear_env();
}
