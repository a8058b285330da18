//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::infrastructure::model::adapter::{MessageAdapter, OpenAIMessage};
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

const DEFAULT_API_PATH: &str = "/v1/chat/completions";

/// OpenAI-compatible chat completions client with function calling
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
}

impl OpenAIClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base: HttpClientBase::new("openai".to_string(), endpoint.into(), Some(api_key.into())),
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAIClient {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(DEFAULT_API_PATH);

        let tools = MessageAdapter::tools_to_openai(&request.tools);
        let payload = OpenAIRequest {
            model: request.model.clone(),
            messages: MessageAdapter::to_openai_format(
                request.instructions.as_deref(),
                &request.messages,
            ),
            tools,
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_with_bearer(&url, &payload).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing choices"))?;
        let message = choice
            .message
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing message"))?;

        let message = MessageAdapter::from_openai_message(message);
        debug!(
            tool_calls = message.tool_calls.len(),
            finish_reason = choice.finish_reason.as_deref(),
            "Received response from OpenAI-compatible provider"
        );

        Ok(ModelResponse {
            message,
            finish_reason: choice.finish_reason,
        })
    }
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}
