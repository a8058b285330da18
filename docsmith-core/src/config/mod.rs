//! # Configuration
//!
//! Credentials come from the environment (with `.env` applied first); agent
//! behavior comes from an optional TOML file, then CLI overrides.

pub mod app;
pub mod credentials;
pub mod defaults;
pub mod error;
pub mod loader;

pub use app::{AgentConfig, Overrides};
pub use credentials::Credentials;
pub use error::ConfigError;
pub use loader::ensure_env_loaded;
