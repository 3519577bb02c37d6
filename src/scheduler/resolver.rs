use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::ssm::CommandService;

/// Checks which workspace ids are registered as SSM managed instances.
#[derive(Clone)]
pub struct EndpointResolver {
    service: Arc<dyn CommandService>,
}

impl EndpointResolver {
    pub fn new(service: Arc<dyn CommandService>) -> Self {
        Self { service }
    }

    /// Map every requested id to whether it appears in the managed-instance
    /// registry. Walks all pages; any page failure fails the whole call.
    pub async fn resolve<'a, I>(&self, ids: I) -> Result<HashMap<String, bool>, ServiceError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found: HashMap<String, bool> =
            ids.into_iter().map(|id| (id.to_string(), false)).collect();

        let mut next_token: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let page = self.service.describe_instances(next_token.take()).await?;
            pages += 1;

            for instance_id in &page.instance_ids {
                if let Some(registered) = found.get_mut(instance_id) {
                    *registered = true;
                }
            }

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(
            pages,
            requested = found.len(),
            registered = found.values().filter(|v| **v).count(),
            "Resolved SSM managed instances"
        );
        Ok(found)
    }
}
