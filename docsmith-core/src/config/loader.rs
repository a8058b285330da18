use super::app::AgentConfig;
use super::defaults::*;
use super::error::ConfigError;
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename_override;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawConfig {
    pub name: Option<String>,
    pub app_name: Option<String>,
    pub toolkits: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
    pub tool_limit: Option<usize>,
    pub instructions: Option<String>,
    pub confirm_tools: Option<Vec<String>>,
    pub preauthorize: Option<bool>,
    pub max_turns: Option<usize>,
    pub auth_timeout_secs: Option<u64>,
}

/// Applies `.env` once per process; its values win over the inherited environment.
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| match from_filename_override(ENV_PATH) {
        Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
        Err(err) => debug!(%err, "No environment file applied"),
    });
}

/// Load and validate configuration.
///
/// Without an explicit path the default location is tried and a missing file
/// falls back to built-in defaults. An explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<AgentConfig, ConfigError> {
    let (config_path, explicit) = match path {
        Some(path) => (expand(path), true),
        None => (PathBuf::from(CONFIG_PATH), false),
    };

    let raw = match read_raw(&config_path) {
        Ok(raw) => raw,
        Err(ConfigError::NotFound { .. }) if !explicit => {
            info!(path = %config_path.display(), "No agent config file, using defaults");
            RawConfig::default()
        }
        Err(err) => return Err(err),
    };

    let config = build(raw);
    config.validate()?;
    Ok(config)
}

/// Parse configuration from TOML text without touching the filesystem.
pub fn parse_config(content: &str) -> Result<AgentConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: PathBuf::from("<inline>"),
        source,
    })?;
    let config = build(raw);
    config.validate()?;
    Ok(config)
}

fn expand(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&text).into_owned())
}

fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build(raw: RawConfig) -> AgentConfig {
    AgentConfig {
        name: raw.name.unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string()),
        app_name: raw.app_name.unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        toolkits: raw
            .toolkits
            .unwrap_or_else(|| vec![DEFAULT_TOOLKIT.to_string()]),
        tools: raw.tools.unwrap_or_default(),
        tool_limit: raw.tool_limit.unwrap_or(DEFAULT_TOOL_LIMIT),
        instructions: raw
            .instructions
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
        confirm_tools: raw.confirm_tools.unwrap_or_else(|| {
            DEFAULT_CONFIRM_TOOLS
                .iter()
                .map(|name| name.to_string())
                .collect()
        }),
        preauthorize: raw.preauthorize.unwrap_or(true),
        max_turns: raw.max_turns.unwrap_or(DEFAULT_MAX_TURNS),
        auth_timeout: Duration::from_secs(
            raw.auth_timeout_secs.unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS),
        ),
    }
}
