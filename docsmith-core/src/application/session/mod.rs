//! In-memory conversation sessions and a runner that streams agent events
//! into them.

mod runner;
mod service;

pub use runner::SessionRunner;
pub use service::{Event, InMemorySessionService, Session, SessionError};
