//! Message adapters - convert between internal and OpenAI wire formats

use super::types::ToolSpec;
use crate::types::{ChatMessage, MessageRole, ToolCall};
use serde::Deserialize;
use serde_json::{Value, json};

/// Adapter for converting messages to and from the OpenAI chat format
pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to OpenAI-style format, prefixed by the instructions
    /// as a system message.
    pub fn to_openai_format(instructions: Option<&str>, messages: &[ChatMessage]) -> Vec<Value> {
        let mut out = Vec::with_capacity(messages.len() + 1);
        if let Some(instructions) = instructions.filter(|text| !text.trim().is_empty()) {
            out.push(json!({ "role": "system", "content": instructions }));
        }
        out.extend(messages.iter().map(Self::message_to_openai));
        out
    }

    fn message_to_openai(message: &ChatMessage) -> Value {
        match message.role {
            MessageRole::Assistant if message.has_tool_calls() => {
                let calls: Vec<Value> = message
                    .tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "id": call.id,
                            "type": "function",
                            "function": { "name": call.name, "arguments": call.arguments },
                        })
                    })
                    .collect();
                json!({
                    "role": "assistant",
                    "content": message.content,
                    "tool_calls": calls,
                })
            }
            MessageRole::Tool => json!({
                "role": "tool",
                "tool_call_id": message.tool_call_id.clone().unwrap_or_default(),
                "content": message.text(),
            }),
            role => json!({ "role": role.as_str(), "content": message.text() }),
        }
    }

    /// Convert tool specs to OpenAI function tools
    pub fn tools_to_openai(tools: &[ToolSpec]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.parameters,
                    }
                })
            })
            .collect()
    }

    /// Convert an OpenAI assistant message back into a [`ChatMessage`]
    pub fn from_openai_message(message: OpenAIMessage) -> ChatMessage {
        let content = message.content.filter(|text| !text.is_empty());
        let calls: Vec<ToolCall> = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall::new(call.id, call.function.name, call.function.arguments))
            .collect();
        if calls.is_empty() {
            ChatMessage::assistant(content.unwrap_or_default())
        } else {
            ChatMessage::assistant_tool_calls(content, calls)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenAIMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIToolCall {
    pub id: String,
    pub function: OpenAIFunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}
