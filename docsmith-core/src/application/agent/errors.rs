use crate::infrastructure::arcade::ArcadeError;
use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    /// The user refused a gated tool call; the run was abandoned.
    #[error("user denied the call to {tool_name}")]
    ToolDenied { tool_name: String },
    #[error("agent exceeded the maximum of {max_turns} turns")]
    MaxTurnsExceeded { max_turns: usize },
}

impl AgentError {
    pub fn denied_tool(&self) -> Option<&str> {
        match self {
            AgentError::ToolDenied { tool_name } => Some(tool_name),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AgentError::Model(err) => err.user_message(),
            AgentError::ToolDenied { tool_name } => {
                format!("The call to {tool_name} was cancelled.")
            }
            AgentError::MaxTurnsExceeded { max_turns } => format!(
                "The agent gave up after {max_turns} steps without an answer. Try a narrower request."
            ),
        }
    }
}

/// Failures of a single tool call. These are reported back to the model as
/// the call's result rather than ending the run.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Authorization for {tool} was not granted")]
    NotAuthorized { tool: String },
    #[error("Authorization for {tool} failed: {source}")]
    Authorization {
        tool: String,
        #[source]
        source: ArcadeError,
    },
    #[error("Failed to execute {tool}: {source}")]
    Execution {
        tool: String,
        #[source]
        source: ArcadeError,
    },
}
