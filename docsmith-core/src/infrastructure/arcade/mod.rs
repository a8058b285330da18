//! Arcade tool-execution service
//!
//! REST client for listing tool definitions, authorizing them for a user and
//! executing them.

mod client;
mod error;
pub mod types;

pub use client::ArcadeClient;
pub use error::ArcadeError;
pub use types::{
    AuthorizationResponse, AuthorizationStatus, ExecuteToolResponse, ToolDefinition,
    qualify_tool_name,
};
