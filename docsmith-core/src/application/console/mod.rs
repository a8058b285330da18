//! Interactive loops over any async line reader and writer.
//!
//! `runner` mode keeps the transcript as a message list and aborts a turn
//! when a gated call is refused; `session` mode stores turns in an
//! in-memory session and prints each agent event as it arrives.

mod hooks;
mod io;
mod loops;

pub use hooks::ConsoleHooks;
pub use io::{Console, ConsoleError};
pub use loops::{GOODBYE, WELCOME, run_runner_loop, run_session_loop};
