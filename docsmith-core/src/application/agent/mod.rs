//! # Agent Module
//!
//! A tool-calling agent over an OpenAI-compatible model and Arcade tools.
//!
//! ## Key Types
//!
//! - [`Agent`] - Instructions, model and tools bound together; runs the loop
//! - [`ToolRuntime`] - Resolves, gates, authorizes and executes tool calls
//! - [`ConfirmationGate`] - Human-in-the-loop approval for sensitive tools
//! - [`AgentHooks`] - Lifecycle callbacks
//! - [`RunResult`] - Final output plus the items a run produced
//!
//! ## Agent Loop
//!
//! 1. Send instructions, transcript and tool specs to the model
//! 2. If the reply carries no tool calls, it is the final output
//! 3. Otherwise run each call through the runtime, append the results, repeat

mod errors;
mod events;
mod gate;
mod hooks;
mod models;
mod runner;
mod runtime;


pub use errors::{AgentError, ToolError};
pub use events::AgentEvent;
pub use gate::{
    AutoApprove, Confirm, ConfirmPolicy, ConfirmationGate, ConfirmationRequest, DenialPolicy,
    GateDecision, denial_record, is_affirmative, refusal_transcript,
};
pub use hooks::{AgentHooks, NoopHooks, TracingHooks};
pub use models::{AgentStep, InvocationStatus, RunResult, ToolInvocation};
pub use runner::{Agent, AgentBuilder};
pub use runtime::ToolRuntime;
