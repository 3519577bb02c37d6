pub mod config;
pub mod error;
pub mod inputs;
pub mod report;
pub mod rollout;
pub mod scheduler;
pub mod ssm;
pub mod worker;
