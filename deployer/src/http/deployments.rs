//! ARM deployments API client
//!
//! Owns the poll-until-terminal semantics of the deployments
//! long-running operation: callers submit once and get back the
//! terminal deployment resource.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::errors::DeployerError;
use crate::http::client::HttpClient;
use crate::models::deployment::{Deployment, DeploymentMode};

/// The deployments API seam. Submission blocks until the remote
/// long-running operation reaches a terminal state.
#[async_trait]
pub trait DeploymentsApi: Send + Sync {
    async fn create_or_update(
        &self,
        resource_group: &str,
        deployment_name: &str,
        template: serde_json::Value,
        parameters: serde_json::Value,
        mode: DeploymentMode,
    ) -> Result<Deployment, DeployerError>;
}

/// Deployments client against the ARM REST API
pub struct ArmDeploymentsClient {
    http: HttpClient,
    subscription_id: String,
    api_version: String,
    poll_interval: Duration,
}

impl ArmDeploymentsClient {
    pub fn new(
        http: HttpClient,
        subscription_id: &str,
        api_version: &str,
        poll_interval: Duration,
    ) -> Self {
        Self {
            http,
            subscription_id: subscription_id.to_string(),
            api_version: api_version.to_string(),
            poll_interval,
        }
    }

    fn deployment_path(&self, resource_group: &str, deployment_name: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Resources/deployments/{}?api-version={}",
            self.subscription_id, resource_group, deployment_name, self.api_version
        )
    }

    /// Poll the deployment until it reports a terminal provisioning
    /// state
    async fn wait_for_completion(
        &self,
        resource_group: &str,
        deployment_name: &str,
    ) -> Result<Deployment, DeployerError> {
        loop {
            let deployment: Deployment = self
                .http
                .get(&self.deployment_path(resource_group, deployment_name))
                .await?;

            match deployment.provisioning_state() {
                Some(state) if state.is_terminal() => return Ok(deployment),
                state => {
                    debug!(
                        "Deployment {} still running (state: {:?})",
                        deployment_name, state
                    );
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl DeploymentsApi for ArmDeploymentsClient {
    async fn create_or_update(
        &self,
        resource_group: &str,
        deployment_name: &str,
        template: serde_json::Value,
        parameters: serde_json::Value,
        mode: DeploymentMode,
    ) -> Result<Deployment, DeployerError> {
        let body = json!({
            "properties": {
                "template": template,
                "parameters": parameters,
                "mode": mode,
            }
        });

        let submitted: Deployment = self
            .http
            .put(&self.deployment_path(resource_group, deployment_name), &body)
            .await?;

        match submitted.provisioning_state() {
            Some(state) if state.is_terminal() => Ok(submitted),
            _ => self.wait_for_completion(resource_group, deployment_name).await,
        }
    }
}
