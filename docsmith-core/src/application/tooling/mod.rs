mod auth;
mod fetch;
mod interface;
mod registry;

pub use auth::{AuthPrompt, AuthorizationOutcome, Authorizer, NoopAuthPrompt};
pub use fetch::fetch_tools;
pub use interface::ToolService;
pub use registry::ToolRegistry;
