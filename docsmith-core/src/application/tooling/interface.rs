use crate::infrastructure::arcade::{
    ArcadeError, AuthorizationResponse, ExecuteToolResponse, ToolDefinition,
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Remote tool-execution service as seen by the agent runtime.
#[async_trait]
pub trait ToolService: Send + Sync {
    async fn list_tools(
        &self,
        toolkit: &str,
        limit: usize,
    ) -> Result<Vec<ToolDefinition>, ArcadeError>;

    async fn get_tool(&self, name: &str) -> Result<ToolDefinition, ArcadeError>;

    async fn authorize(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationResponse, ArcadeError>;

    async fn wait_for_completion(
        &self,
        auth_id: &str,
        timeout: Duration,
    ) -> Result<AuthorizationResponse, ArcadeError>;

    async fn execute(
        &self,
        tool_name: &str,
        input: &Value,
        user_id: &str,
    ) -> Result<ExecuteToolResponse, ArcadeError>;
}
