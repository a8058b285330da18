use crate::types::RunContext;
use async_trait::async_trait;
use tracing::info;

/// Lifecycle callbacks around an agent run. Every method defaults to a no-op.
#[async_trait]
pub trait AgentHooks: Send + Sync {
    async fn on_start(&self, _context: &RunContext, _agent: &str) {}

    async fn on_end(&self, _context: &RunContext, _agent: &str, _output: &str) {}

    async fn on_tool_start(&self, _context: &RunContext, _agent: &str, _tool: &str) {}

    async fn on_tool_end(&self, _context: &RunContext, _agent: &str, _tool: &str, _result: &str) {}
}

pub struct NoopHooks;

impl AgentHooks for NoopHooks {}

/// Logs lifecycle events through `tracing`.
pub struct TracingHooks;

#[async_trait]
impl AgentHooks for TracingHooks {
    async fn on_start(&self, context: &RunContext, agent: &str) {
        info!(agent, user = context.user_id.as_str(), "Agent started");
    }

    async fn on_end(&self, _context: &RunContext, agent: &str, output: &str) {
        info!(agent, output_len = output.len(), "Agent ended");
    }

    async fn on_tool_start(&self, _context: &RunContext, agent: &str, tool: &str) {
        info!(agent, tool, "Agent started tool");
    }

    async fn on_tool_end(&self, _context: &RunContext, agent: &str, tool: &str, result: &str) {
        info!(agent, tool, result_len = result.len(), "Agent ended tool");
    }
}
