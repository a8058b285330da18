use super::errors::ToolError;
use super::gate::{ConfirmationGate, GateDecision, denial_record};
use super::models::{InvocationStatus, ToolInvocation};
use crate::application::tooling::{Authorizer, ToolRegistry, ToolService};
use crate::types::{RunContext, ToolCall};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes model tool calls against the remote service.
///
/// Order per call: resolve, parse arguments, confirmation gate, lazy
/// authorization, execute. Only a refusal at the gate is surfaced as
/// [`InvocationStatus::Denied`]; every other failure becomes an error
/// result for the model to read.
pub struct ToolRuntime {
    registry: ToolRegistry,
    service: Arc<dyn ToolService>,
    gate: ConfirmationGate,
    authorizer: Arc<Authorizer>,
}

impl ToolRuntime {
    pub fn new(
        registry: ToolRegistry,
        service: Arc<dyn ToolService>,
        gate: ConfirmationGate,
        authorizer: Arc<Authorizer>,
    ) -> Self {
        Self {
            registry,
            service,
            gate,
            authorizer,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn invoke(&self, call: &ToolCall, context: &RunContext) -> ToolInvocation {
        let input = call.parsed_arguments().unwrap_or(Value::Null);
        match self.try_invoke(call, context).await {
            Ok(invocation) => invocation,
            Err(err) => {
                warn!(tool = call.name.as_str(), error = %err, "Tool call failed");
                ToolInvocation {
                    call_id: call.id.clone(),
                    tool: call.name.clone(),
                    input,
                    status: InvocationStatus::Failed,
                    content: json!({ "error": err.to_string() }).to_string(),
                }
            }
        }
    }

    async fn try_invoke(
        &self,
        call: &ToolCall,
        context: &RunContext,
    ) -> Result<ToolInvocation, ToolError> {
        let tool = self
            .registry
            .get(&call.name)
            .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;
        let input = call
            .parsed_arguments()
            .map_err(|source| ToolError::InvalidArguments {
                tool: call.name.clone(),
                source,
            })?;

        if self.gate.check(&call.name, &input).await == GateDecision::Denied {
            return Ok(ToolInvocation {
                call_id: call.id.clone(),
                tool: call.name.clone(),
                input,
                status: InvocationStatus::Denied,
                content: denial_record(&call.name),
            });
        }

        let qualified = tool.qualified_name();
        if tool.requires_authorization()
            && !self
                .authorizer
                .is_authorized(&qualified, &context.user_id)
                .await
        {
            debug!(tool = qualified.as_str(), "Authorizing tool before first use");
            let outcome = self
                .authorizer
                .authorize_tool(&qualified, &context.user_id)
                .await
                .map_err(|source| ToolError::Authorization {
                    tool: call.name.clone(),
                    source,
                })?;
            if !outcome.is_authorized() {
                return Err(ToolError::NotAuthorized {
                    tool: call.name.clone(),
                });
            }
        }

        let response = self
            .service
            .execute(&qualified, &input, &context.user_id)
            .await
            .map_err(|source| ToolError::Execution {
                tool: call.name.clone(),
                source,
            })?;

        let status = if response.success && response.error_message().is_none() {
            InvocationStatus::Succeeded
        } else {
            InvocationStatus::Failed
        };
        info!(tool = qualified.as_str(), ?status, "Tool call finished");

        Ok(ToolInvocation {
            call_id: call.id.clone(),
            tool: call.name.clone(),
            input,
            status,
            content: response.to_model_content(),
        })
    }
}
