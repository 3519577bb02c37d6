use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client;

use crate::error::ServiceError;
use crate::ssm::{CommandService, InstancePage, Invocation, PluginOutput, SendCommandRequest};

/// [`CommandService`] backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct SsmCommandService {
    client: Client,
}

impl SsmCommandService {
    /// Build a client for `region` from the default credential chain.
    pub async fn connect(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        tracing::debug!(region, "Loaded AWS configuration");
        Self::new(Client::new(&config))
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn service_error<E>(operation: &'static str, err: E) -> ServiceError
where
    E: std::error::Error,
{
    ServiceError::new(operation, DisplayErrorContext(err).to_string())
}

#[async_trait]
impl CommandService for SsmCommandService {
    async fn describe_instances(
        &self,
        next_token: Option<String>,
    ) -> Result<InstancePage, ServiceError> {
        let resp = self
            .client
            .describe_instance_information()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| service_error("DescribeInstanceInformation", e))?;

        Ok(InstancePage {
            instance_ids: resp
                .instance_information_list()
                .iter()
                .filter_map(|info| info.instance_id().map(str::to_string))
                .collect(),
            next_token: resp.next_token().map(str::to_string),
        })
    }

    async fn send_command(
        &self,
        request: SendCommandRequest<'_>,
    ) -> Result<Option<String>, ServiceError> {
        let resp = self
            .client
            .send_command()
            .document_name(request.document_name)
            .instance_ids(request.instance_id)
            .parameters("commands", vec![request.script.to_string()])
            .set_comment(request.comment.map(str::to_string))
            .send()
            .await
            .map_err(|e| service_error("SendCommand", e))?;

        Ok(resp
            .command()
            .and_then(|cmd| cmd.command_id())
            .map(str::to_string))
    }

    async fn list_invocations(
        &self,
        command_id: &str,
        instance_id: &str,
    ) -> Result<Vec<Invocation>, ServiceError> {
        let resp = self
            .client
            .list_command_invocations()
            .command_id(command_id)
            .instance_id(instance_id)
            .details(true)
            .send()
            .await
            .map_err(|e| service_error("ListCommandInvocations", e))?;

        Ok(resp
            .command_invocations()
            .iter()
            .map(|inv| Invocation {
                status: inv.status().map(|s| s.as_str().to_string()),
                plugins: inv
                    .command_plugins()
                    .iter()
                    .map(|p| PluginOutput {
                        response_code: Some(p.response_code()),
                        output: p.output().map(str::to_string),
                        standard_error: p.standard_error_content().map(str::to_string),
                    })
                    .collect(),
            })
            .collect())
    }
}
