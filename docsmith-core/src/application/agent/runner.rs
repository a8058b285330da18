use super::errors::AgentError;
use super::events::AgentEvent;
use super::gate::DenialPolicy;
use super::hooks::{AgentHooks, NoopHooks};
use super::models::{AgentStep, InvocationStatus, RunResult};
use super::runtime::ToolRuntime;
use crate::config::defaults::DEFAULT_MAX_TURNS;
use crate::model::{ModelProvider, ModelRequest};
use crate::types::{ChatMessage, RunContext};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

const EVENT_BUFFER: usize = 32;

type EventSender = mpsc::Sender<Result<AgentEvent, AgentError>>;

pub struct Agent {
    name: String,
    instructions: String,
    model: String,
    provider: Arc<dyn ModelProvider>,
    runtime: ToolRuntime,
    hooks: Arc<dyn AgentHooks>,
    max_turns: usize,
    denial_policy: DenialPolicy,
}

pub struct AgentBuilder {
    agent: Agent,
}

impl AgentBuilder {
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.agent.instructions = instructions.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.agent.model = model.into();
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.agent.hooks = hooks;
        self
    }

    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.agent.max_turns = max_turns.max(1);
        self
    }

    pub fn denial_policy(mut self, policy: DenialPolicy) -> Self {
        self.agent.denial_policy = policy;
        self
    }

    pub fn build(self) -> Agent {
        self.agent
    }
}

impl Agent {
    pub fn builder(
        name: impl Into<String>,
        provider: Arc<dyn ModelProvider>,
        runtime: ToolRuntime,
    ) -> AgentBuilder {
        AgentBuilder {
            agent: Agent {
                name: name.into(),
                instructions: String::new(),
                model: String::new(),
                provider,
                runtime,
                hooks: Arc::new(NoopHooks),
                max_turns: DEFAULT_MAX_TURNS,
                denial_policy: DenialPolicy::default(),
            },
        }
    }

    /// Runs the agent over `input` until the model answers without tool calls.
    pub async fn run(
        &self,
        input: Vec<ChatMessage>,
        context: &RunContext,
    ) -> Result<RunResult, AgentError> {
        self.run_inner(input, context, None).await
    }

    /// Like [`Agent::run`], but yields every produced message as it happens.
    /// A failed run ends the stream with its error.
    pub fn run_streamed(
        self: &Arc<Self>,
        input: Vec<ChatMessage>,
        context: RunContext,
    ) -> ReceiverStream<Result<AgentEvent, AgentError>> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let agent = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = agent.run_inner(input, &context, Some(&tx)).await {
                let _ = tx.send(Err(err)).await;
            }
        });
        ReceiverStream::new(rx)
    }

    async fn run_inner(
        &self,
        input: Vec<ChatMessage>,
        context: &RunContext,
        events: Option<&EventSender>,
    ) -> Result<RunResult, AgentError> {
        info!(agent = self.name.as_str(), items = input.len(), "Agent run started");
        self.hooks.on_start(context, &self.name).await;

        let specs = self.runtime.registry().specs();
        let mut new_items: Vec<ChatMessage> = Vec::new();
        let mut steps: Vec<AgentStep> = Vec::new();

        for turn in 0..self.max_turns {
            let mut messages = input.clone();
            messages.extend(new_items.iter().cloned());
            debug!(turn, messages = messages.len(), "Submitting agent turn to model provider");

            let response = self
                .provider
                .chat(ModelRequest {
                    model: self.model.clone(),
                    instructions: Some(self.instructions.clone()),
                    messages,
                    tools: specs.clone(),
                })
                .await?;
            let message = response.message;
            new_items.push(message.clone());
            self.emit(events, &message).await;

            if !message.has_tool_calls() {
                let final_output = message.text().to_string();
                info!(agent = self.name.as_str(), turn, "Agent returned final response");
                self.hooks.on_end(context, &self.name, &final_output).await;
                return Ok(RunResult {
                    input,
                    new_items,
                    final_output,
                    steps,
                });
            }

            for call in &message.tool_calls {
                self.hooks.on_tool_start(context, &self.name, &call.name).await;
                let invocation = self.runtime.invoke(call, context).await;

                if invocation.status == InvocationStatus::Denied
                    && self.denial_policy == DenialPolicy::Raise
                {
                    warn!(tool = call.name.as_str(), "Run cancelled by tool denial");
                    return Err(AgentError::ToolDenied {
                        tool_name: call.name.clone(),
                    });
                }

                self.hooks
                    .on_tool_end(context, &self.name, &call.name, &invocation.content)
                    .await;
                let result = ChatMessage::tool_result(&call.id, &invocation.content);
                new_items.push(result.clone());
                self.emit(events, &result).await;
                steps.push(AgentStep::from(invocation));
            }
        }

        warn!(max_turns = self.max_turns, "Agent exceeded max turns");
        Err(AgentError::MaxTurnsExceeded {
            max_turns: self.max_turns,
        })
    }

    async fn emit(&self, events: Option<&EventSender>, message: &ChatMessage) {
        if let Some(tx) = events {
            let event = AgentEvent {
                author: self.name.clone(),
                message: message.clone(),
            };
            if tx.send(Ok(event)).await.is_err() {
                debug!("Event receiver dropped");
            }
        }
    }
}
