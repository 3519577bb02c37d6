//! Remote execution of a single job on a single workspace.
//!
//! # Components
//!
//! - [`CommandDispatcher`]: sends the script through SSM `SendCommand`
//! - [`CompletionPoller`]: waits for the invocation to finish and captures output
//!
//! # Execution Flow
//!
//! 1. [`CommandDispatcher::dispatch`] submits the script and returns a command id
//! 2. [`CompletionPoller::poll`] queries the invocation every interval
//! 3. Polling stops on a terminal status, a failed query, or the deadline
//! 4. Returns [`PollResult`] with status, response code and full stdout/stderr

pub mod dispatcher;
pub mod poller;

pub use dispatcher::CommandDispatcher;
pub use poller::{CompletionPoller, PollResult};
