pub mod job;
pub mod orchestrator;
pub mod outcome;
pub mod resolver;

pub use job::{CommandStatus, Job};
pub use orchestrator::RunOrchestrator;
pub use outcome::{Outcome, Workspace};
pub use resolver::EndpointResolver;
