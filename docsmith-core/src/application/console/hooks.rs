use super::io::Console;
use crate::agent::AgentHooks;
use crate::types::RunContext;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::warn;

/// Prints numbered lifecycle lines such as
/// `### (docs) 1: Agent google_agent started`.
pub struct ConsoleHooks<R, W> {
    display_name: String,
    counter: AtomicUsize,
    console: Arc<Console<R, W>>,
}

impl<R, W> ConsoleHooks<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(display_name: impl Into<String>, console: Arc<Console<R, W>>) -> Self {
        Self {
            display_name: display_name.into(),
            counter: AtomicUsize::new(0),
            console,
        }
    }

    pub fn event_count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    async fn announce(&self, text: String) {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let line = format!("### ({}) {n}: {text}", self.display_name);
        if let Err(err) = self.console.write_line(&line).await {
            warn!(error = %err, "Failed to print hook event");
        }
    }
}

#[async_trait]
impl<R, W> AgentHooks for ConsoleHooks<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn on_start(&self, _context: &RunContext, agent: &str) {
        self.announce(format!("Agent {agent} started")).await;
    }

    async fn on_end(&self, _context: &RunContext, agent: &str, _output: &str) {
        self.announce(format!("Agent {agent} ended")).await;
    }

    async fn on_tool_start(&self, context: &RunContext, agent: &str, tool: &str) {
        self.announce(format!(
            "Agent {agent} started tool {tool} with context: user_id={}",
            context.user_id
        ))
        .await;
    }

    async fn on_tool_end(&self, _context: &RunContext, agent: &str, tool: &str, _result: &str) {
        self.announce(format!("Agent {agent} ended tool {tool}")).await;
    }
}
