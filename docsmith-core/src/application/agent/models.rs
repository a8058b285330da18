use crate::types::ChatMessage;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationStatus {
    Succeeded,
    Failed,
    Denied,
}

/// Result of pushing one tool call through the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub call_id: String,
    pub tool: String,
    pub input: Value,
    pub status: InvocationStatus,
    /// Text recorded as the tool result in the transcript
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStep {
    pub tool: String,
    pub input: Value,
    pub status: InvocationStatus,
    pub output: String,
}

impl From<ToolInvocation> for AgentStep {
    fn from(invocation: ToolInvocation) -> Self {
        Self {
            tool: invocation.tool,
            input: invocation.input,
            status: invocation.status,
            output: invocation.content,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub input: Vec<ChatMessage>,
    pub new_items: Vec<ChatMessage>,
    pub final_output: String,
    pub steps: Vec<AgentStep>,
}

impl RunResult {
    /// The run's input followed by everything it produced, ready to seed the next turn.
    pub fn to_input_list(&self) -> Vec<ChatMessage> {
        let mut items = self.input.clone();
        items.extend(self.new_items.iter().cloned());
        items
    }
}
