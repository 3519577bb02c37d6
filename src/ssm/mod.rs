//! Seam between the rollout engine and AWS Systems Manager.
//!
//! The engine only needs three calls: one page of the managed-instance
//! registry, `SendCommand`, and `ListCommandInvocations`. [`CommandService`]
//! abstracts them so a run can be driven against the real service
//! ([`SsmCommandService`]) or an in-memory fake in tests.

pub mod client;

use async_trait::async_trait;

use crate::error::ServiceError;

pub use client::SsmCommandService;

/// One page of `DescribeInstanceInformation`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePage {
    pub instance_ids: Vec<String>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCommandRequest<'a> {
    pub document_name: &'a str,
    pub instance_id: &'a str,
    pub script: &'a str,
    pub comment: Option<&'a str>,
}

/// First-plugin output of an invocation. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOutput {
    pub response_code: Option<i32>,
    pub output: Option<String>,
    pub standard_error: Option<String>,
}

/// One `CommandInvocation` record with details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub status: Option<String>,
    pub plugins: Vec<PluginOutput>,
}

#[async_trait]
pub trait CommandService: Send + Sync {
    /// Fetch one page of managed instances, starting at `next_token`.
    async fn describe_instances(
        &self,
        next_token: Option<String>,
    ) -> Result<InstancePage, ServiceError>;

    /// Submit one command. `Ok(None)` means the service accepted the call but
    /// returned no command id.
    async fn send_command(
        &self,
        request: SendCommandRequest<'_>,
    ) -> Result<Option<String>, ServiceError>;

    /// Invocation records for `command_id` on `instance_id`, with plugin details.
    async fn list_invocations(
        &self,
        command_id: &str,
        instance_id: &str,
    ) -> Result<Vec<Invocation>, ServiceError>;
}
