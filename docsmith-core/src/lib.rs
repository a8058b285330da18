//! Tool-calling document agent backed by the Arcade remote tool service.
//!
//! The library holds everything the `docsmith` binary wires together:
//! configuration, the Arcade and OpenAI clients, the agent loop with its
//! human-in-the-loop gate, in-memory sessions and the console loops.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, console, session, tooling};
pub use config::{AgentConfig, ConfigError, Credentials, Overrides};
pub use domain::types;
pub use infrastructure::{arcade, model};
