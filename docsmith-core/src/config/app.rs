use super::defaults::*;
use super::error::ConfigError;
use std::path::Path;
use std::time::Duration;

/// Agent behavior loaded from `agent.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub name: String,
    pub app_name: String,
    /// Toolkits whose tools are fetched in full
    pub toolkits: Vec<String>,
    /// Individual tools fetched in addition to the toolkits
    pub tools: Vec<String>,
    /// Maximum number of tool definitions fetched overall
    pub tool_limit: usize,
    pub instructions: String,
    /// Tools that need user confirmation; `"*"` gates all of them
    pub confirm_tools: Vec<String>,
    pub preauthorize: bool,
    pub max_turns: usize,
    pub auth_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            toolkits: vec![DEFAULT_TOOLKIT.to_string()],
            tools: Vec::new(),
            tool_limit: DEFAULT_TOOL_LIMIT,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            confirm_tools: DEFAULT_CONFIRM_TOOLS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            preauthorize: true,
            max_turns: DEFAULT_MAX_TURNS,
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub toolkits: Vec<String>,
    pub preauthorize: Option<bool>,
}

impl AgentConfig {
    /// Load configuration from a file path (or the default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content)
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if !overrides.toolkits.is_empty() {
            self.toolkits = overrides.toolkits.clone();
        }
        if let Some(preauthorize) = overrides.preauthorize {
            self.preauthorize = preauthorize;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool_limit == 0 {
            return Err(ConfigError::invalid("tool_limit must be greater than zero"));
        }
        if self.max_turns == 0 {
            return Err(ConfigError::invalid("max_turns must be greater than zero"));
        }
        if self.toolkits.is_empty() && self.tools.is_empty() {
            return Err(ConfigError::invalid(
                "at least one toolkit or tool must be configured",
            ));
        }
        Ok(())
    }
}
