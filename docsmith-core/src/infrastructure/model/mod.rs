//! Model infrastructure module
//!
//! Provides the LLM provider seam and the OpenAI-compatible client.
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - ModelProvider trait
//! - `adapter` - Message and tool format adapters
//! - `clients` - Client implementations

pub mod adapter;
pub mod clients;
pub mod traits;
pub mod types;

pub use clients::OpenAIClient;
pub use traits::ModelProvider;
pub use types::{ModelError, ModelRequest, ModelResponse, ToolSpec};
