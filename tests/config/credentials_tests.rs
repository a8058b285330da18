// Credential tests - Credentials::from_env against the process environment
//
// These mutate process-wide variables, so every test runs serially.

use docsmith_core::constants::{DEFAULT_ARCADE_BASE_URL, DEFAULT_OPENAI_BASE_URL};
use docsmith_core::{ConfigError, Credentials};
use serial_test::serial;

const VARS: [&str; 6] = [
    "ARCADE_API_KEY",
    "ARCADE_USER_ID",
    "ARCADE_BASE_URL",
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "OPENAI_BASE_URL",
];

fn set_env(pairs: &[(&str, &str)]) {
    for name in VARS {
        unsafe { std::env::remove_var(name) };
    }
    for (name, value) in pairs {
        unsafe { std::env::set_var(name, value) };
    }
}

#[test]
#[serial]
fn reads_required_values_and_defaults_base_urls() {
    set_env(&[
        ("ARCADE_API_KEY", "arc_key"),
        ("ARCADE_USER_ID", "me@example.com"),
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_MODEL", "gpt-4o-mini"),
    ]);

    let credentials = Credentials::from_env().expect("credentials");
    assert_eq!(credentials.arcade_api_key, "arc_key");
    assert_eq!(credentials.arcade_user_id, "me@example.com");
    assert_eq!(credentials.arcade_base_url, DEFAULT_ARCADE_BASE_URL);
    assert_eq!(credentials.openai_model, "gpt-4o-mini");
    assert_eq!(credentials.openai_base_url, DEFAULT_OPENAI_BASE_URL);

    let debug = format!("{credentials:?}");
    assert!(!debug.contains("arc_key"));
    assert!(!debug.contains("sk-test"));
}

#[test]
#[serial]
fn missing_user_id_is_reported_by_name() {
    set_env(&[
        ("ARCADE_API_KEY", "arc_key"),
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_MODEL", "gpt-4o-mini"),
    ]);

    let err = Credentials::from_env().expect_err("user id missing");
    assert!(matches!(&err, ConfigError::MissingEnv { name } if name == "ARCADE_USER_ID"));
    assert_eq!(
        err.to_string(),
        "Missing ARCADE_USER_ID. Add it to your .env file."
    );
}

#[test]
#[serial]
fn blank_value_counts_as_missing() {
    set_env(&[
        ("ARCADE_API_KEY", "arc_key"),
        ("ARCADE_USER_ID", "me@example.com"),
        ("OPENAI_API_KEY", "   "),
        ("OPENAI_MODEL", "gpt-4o-mini"),
    ]);

    let err = Credentials::from_env().expect_err("blank key");
    assert!(matches!(err, ConfigError::MissingEnv { name } if name == "OPENAI_API_KEY"));
}

#[test]
#[serial]
fn base_urls_and_overrides_apply() {
    set_env(&[
        ("ARCADE_API_KEY", "arc_key"),
        ("ARCADE_USER_ID", "me@example.com"),
        ("ARCADE_BASE_URL", "http://127.0.0.1:9099"),
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_MODEL", "gpt-4o-mini"),
        ("OPENAI_BASE_URL", "http://127.0.0.1:9100"),
    ]);

    let credentials = Credentials::from_env()
        .expect("credentials")
        .with_model("gpt-4o")
        .with_user_id("other@example.com");
    assert_eq!(credentials.arcade_base_url, "http://127.0.0.1:9099");
    assert_eq!(credentials.openai_base_url, "http://127.0.0.1:9100");
    assert_eq!(credentials.openai_model, "gpt-4o");
    assert_eq!(credentials.arcade_user_id, "other@example.com");
}
