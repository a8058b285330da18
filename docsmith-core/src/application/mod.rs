//! # Application Module
//!
//! ## Submodules
//!
//! - [`tooling`] - Remote tool discovery, registry and authorization
//! - [`agent`] - Tool-calling agent loop, hooks and the confirmation gate
//! - [`session`] - In-memory sessions and the event-streaming runner
//! - [`console`] - Interactive read/print loops over any async reader/writer

pub mod agent;
pub mod console;
pub mod session;
pub mod tooling;
