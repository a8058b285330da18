use super::error::ConfigError;
use super::loader::ensure_env_loaded;
use crate::constants::{
    DEFAULT_ARCADE_BASE_URL, DEFAULT_OPENAI_BASE_URL, ENV_ARCADE_API_KEY, ENV_ARCADE_BASE_URL,
    ENV_ARCADE_USER_ID, ENV_OPENAI_API_KEY, ENV_OPENAI_BASE_URL, ENV_OPENAI_MODEL,
};
use std::env;
use std::fmt;

/// Secrets and endpoints read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub arcade_api_key: String,
    pub arcade_user_id: String,
    pub arcade_base_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
}

impl Credentials {
    /// Read credentials from the process environment after applying `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        ensure_env_loaded();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |name: &str| get(name).ok_or_else(|| ConfigError::missing_env(name));

        Ok(Self {
            arcade_api_key: require(ENV_ARCADE_API_KEY)?,
            arcade_user_id: require(ENV_ARCADE_USER_ID)?,
            arcade_base_url: get(ENV_ARCADE_BASE_URL)
                .unwrap_or_else(|| DEFAULT_ARCADE_BASE_URL.to_string()),
            openai_api_key: require(ENV_OPENAI_API_KEY)?,
            openai_model: require(ENV_OPENAI_MODEL)?,
            openai_base_url: get(ENV_OPENAI_BASE_URL)
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.openai_model = model.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.arcade_user_id = user_id.into();
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("arcade_api_key", &"<redacted>")
            .field("arcade_user_id", &self.arcade_user_id)
            .field("arcade_base_url", &self.arcade_base_url)
            .field("openai_api_key", &"<redacted>")
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .finish()
    }
}
