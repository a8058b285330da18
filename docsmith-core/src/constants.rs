//! Application constants
//!
//! Single source of truth for paths, endpoints and environment variable names.

/// Default agent configuration file path
pub const CONFIG_PATH: &str = "config/agent.toml";

/// Default environment file path
pub const ENV_PATH: &str = ".env";

/// Arcade API endpoint used when `ARCADE_BASE_URL` is unset
pub const DEFAULT_ARCADE_BASE_URL: &str = "https://api.arcade.dev";

/// OpenAI-compatible endpoint used when `OPENAI_BASE_URL` is unset
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

pub const ENV_ARCADE_API_KEY: &str = "ARCADE_API_KEY";
pub const ENV_ARCADE_USER_ID: &str = "ARCADE_USER_ID";
pub const ENV_ARCADE_BASE_URL: &str = "ARCADE_BASE_URL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
