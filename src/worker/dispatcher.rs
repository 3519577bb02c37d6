use std::sync::Arc;

use crate::error::DispatchError;
use crate::ssm::{CommandService, SendCommandRequest};

/// Submits one script to one workspace. Exactly one attempt, no retries.
#[derive(Clone)]
pub struct CommandDispatcher {
    service: Arc<dyn CommandService>,
    document_name: String,
}

impl CommandDispatcher {
    pub fn new(service: Arc<dyn CommandService>, document_name: impl Into<String>) -> Self {
        Self {
            service,
            document_name: document_name.into(),
        }
    }

    /// Send `script` to `instance_id` and return the command id.
    pub async fn dispatch(
        &self,
        instance_id: &str,
        script: &str,
        comment: Option<&str>,
    ) -> Result<String, DispatchError> {
        let request = SendCommandRequest {
            document_name: &self.document_name,
            instance_id,
            script,
            comment,
        };

        match self.service.send_command(request).await {
            Ok(Some(command_id)) => {
                tracing::debug!(
                    instance_id,
                    command_id = %command_id,
                    comment = ?comment,
                    "Command sent"
                );
                Ok(command_id)
            }
            Ok(None) => Err(DispatchError::MissingCommandId(instance_id.to_string())),
            Err(e) => {
                tracing::error!(instance_id, error = %e, "SendCommand failed");
                Err(DispatchError::Service(e))
            }
        }
    }
}
