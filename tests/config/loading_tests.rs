// Config loading tests - AgentConfig::load from agent.toml files
//
// Covers defaults, overrides from the file, and validation errors.

use docsmith_core::config::defaults::DEFAULT_CONFIRM_TOOLS;
use docsmith_core::{AgentConfig, ConfigError, Overrides};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("agent.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn returns_error_when_explicit_file_not_found() {
    let result = AgentConfig::load(Some(Path::new("/nonexistent/path/agent.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn missing_default_file_falls_back_to_defaults() {
    let config = AgentConfig::load(None).expect("defaults");
    assert_eq!(config.name, "google_agent");
    assert_eq!(config.app_name, "my_agent");
    assert_eq!(config.toolkits, vec!["GoogleDocs".to_string()]);
    assert_eq!(config.tool_limit, 100);
    assert_eq!(config.confirm_tools.len(), DEFAULT_CONFIRM_TOOLS.len());
    assert!(config.preauthorize);
}

#[test]
fn file_values_replace_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
name = "docs_helper"
toolkits = ["GoogleDocs", "GoogleDrive"]
tools = ["Gmail.SendEmail"]
tool_limit = 30
instructions = "Be brief."
confirm_tools = ["*"]
preauthorize = false
max_turns = 4
auth_timeout_secs = 60
"#,
    );

    let config = AgentConfig::load(Some(&path)).expect("config loads");
    assert_eq!(config.name, "docs_helper");
    assert_eq!(config.toolkits.len(), 2);
    assert_eq!(config.tools, vec!["Gmail.SendEmail".to_string()]);
    assert_eq!(config.tool_limit, 30);
    assert_eq!(config.instructions, "Be brief.");
    assert_eq!(config.confirm_tools, vec!["*".to_string()]);
    assert!(!config.preauthorize);
    assert_eq!(config.max_turns, 4);
    assert_eq!(config.auth_timeout, Duration::from_secs(60));
}

#[test]
fn empty_confirm_list_is_kept() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "confirm_tools = []\n");

    let config = AgentConfig::load(Some(&path)).expect("config loads");
    assert!(config.confirm_tools.is_empty());
}

#[test]
fn returns_parse_error_for_unknown_field() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "toolkit = \"GoogleDocs\"\n");

    let result = AgentConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn returns_parse_error_for_malformed_toml() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "toolkits = [\"GoogleDocs\"\n");

    let result = AgentConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn returns_invalid_when_nothing_to_load() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "toolkits = []\ntools = []\n");

    let result = AgentConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn returns_invalid_for_zero_limits() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "tool_limit = 0\n");
    assert!(matches!(
        AgentConfig::load(Some(&path)),
        Err(ConfigError::Invalid { .. })
    ));

    let path = write_config(dir.path(), "max_turns = 0\n");
    assert!(matches!(
        AgentConfig::load(Some(&path)),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn cli_overrides_apply_after_file() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "toolkits = [\"GoogleDocs\"]\n");

    let mut config = AgentConfig::load(Some(&path)).expect("config loads");
    config.apply_overrides(&Overrides {
        toolkits: vec!["Gmail".into(), "Slack".into()],
        preauthorize: Some(false),
    });
    config.validate().expect("still valid");

    assert_eq!(config.toolkits, vec!["Gmail".to_string(), "Slack".to_string()]);
    assert!(!config.preauthorize);
}
