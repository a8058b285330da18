//! Human-in-the-loop confirmation for sensitive tool calls.

use crate::types::ChatMessage;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Which tools need the user's approval before they run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPolicy {
    Never,
    Always,
    Tools(HashSet<String>),
}

impl ConfirmPolicy {
    /// `"*"` anywhere in the list gates every tool; an empty list gates none.
    /// Dotted names (`GoogleDocs.EditDocument`) are accepted alongside
    /// function names (`GoogleDocs_EditDocument`).
    pub fn from_list(names: &[String]) -> Self {
        if names.iter().any(|name| name.trim() == "*") {
            return ConfirmPolicy::Always;
        }
        let tools: HashSet<String> = names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| match name.split_once('.') {
                Some((toolkit, tool)) => format!("{toolkit}_{tool}"),
                None => name.to_string(),
            })
            .collect();
        if tools.is_empty() {
            ConfirmPolicy::Never
        } else {
            ConfirmPolicy::Tools(tools)
        }
    }

    pub fn requires_confirmation(&self, function_name: &str) -> bool {
        match self {
            ConfirmPolicy::Never => false,
            ConfirmPolicy::Always => true,
            ConfirmPolicy::Tools(tools) => tools.contains(function_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationRequest {
    pub tool_name: String,
    pub input: Value,
}

/// Asks a human whether a tool call may proceed.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

/// Approves everything without asking.
pub struct AutoApprove;

#[async_trait]
impl Confirm for AutoApprove {
    async fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Approved,
    Denied,
}

/// What a run does when the user refuses a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DenialPolicy {
    /// Abort the run with [`AgentError::ToolDenied`](super::AgentError::ToolDenied)
    #[default]
    Raise,
    /// Record the refusal as the tool result and let the model continue
    Record,
}

#[derive(Clone)]
pub struct ConfirmationGate {
    policy: ConfirmPolicy,
    confirmer: Arc<dyn Confirm>,
}

impl ConfirmationGate {
    pub fn new(policy: ConfirmPolicy, confirmer: Arc<dyn Confirm>) -> Self {
        Self { policy, confirmer }
    }

    pub fn disabled() -> Self {
        Self::new(ConfirmPolicy::Never, Arc::new(AutoApprove))
    }

    /// Non-gated tools pass straight through; gated tools pass only on an
    /// affirmative answer.
    pub async fn check(&self, tool_name: &str, input: &Value) -> GateDecision {
        if !self.policy.requires_confirmation(tool_name) {
            debug!(tool = tool_name, "Tool not gated");
            return GateDecision::Approved;
        }
        let request = ConfirmationRequest {
            tool_name: tool_name.to_string(),
            input: input.clone(),
        };
        if self.confirmer.confirm(&request).await {
            info!(tool = tool_name, "User approved tool call");
            GateDecision::Approved
        } else {
            info!(tool = tool_name, "User denied tool call");
            GateDecision::Denied
        }
    }
}

/// `y` / `yes`, any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Tool result recorded in place of a refused call.
pub fn denial_record(tool_name: &str) -> String {
    json!({ "error": format!("The user denied the call to {tool_name}") }).to_string()
}

/// Messages appended to the history after a refused call aborts a run.
pub fn refusal_transcript(tool_name: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::assistant(format!("Please confirm the call to {tool_name}")),
        ChatMessage::user("I changed my mind, please don't do it!"),
        ChatMessage::assistant(format!(
            "Sure, I cancelled the call to {tool_name}. What else can I do for you today?"
        )),
    ]
}
