//! ARM deployment models

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deployment mode accepted by the ARM deployments API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentMode {
    Incremental,
    Complete,
}

/// A single ARM template parameter, wrapped the way the deployments
/// API expects: `{"value": <raw>}`.
///
/// Building the map out of this type makes double-wrapping
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub value: serde_json::Value,
}

impl ParameterValue {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A fully assembled deployment request, built once per invocation and
/// consumed exactly once by the deployments client.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    /// Target resource group
    pub resource_group: String,

    /// Deployment name (defaults to the bot resource name)
    pub deployment_name: String,

    /// Path to the ARM template file on disk
    pub template_file: PathBuf,

    /// Template parameters
    pub parameters: BTreeMap<String, ParameterValue>,

    /// Deployment mode
    pub mode: DeploymentMode,
}

/// Provisioning state reported by the deployments API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningState {
    Accepted,
    Creating,
    Running,
    Deleting,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl ProvisioningState {
    /// Whether the long-running operation has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProvisioningState::Succeeded | ProvisioningState::Failed | ProvisioningState::Canceled
        )
    }
}

/// Error detail attached to a failed deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Deployment properties returned by the deployments API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProperties {
    pub provisioning_state: Option<ProvisioningState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DeploymentErrorDetail>,
}

/// A deployment resource as returned by the deployments API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: Option<String>,
    pub name: Option<String>,
    pub properties: Option<DeploymentProperties>,
}

impl Deployment {
    pub fn provisioning_state(&self) -> Option<ProvisioningState> {
        self.properties.as_ref().and_then(|p| p.provisioning_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_value_shape() {
        let param = ParameterValue::new("westus");
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json, serde_json::json!({"value": "westus"}));

        let param = ParameterValue::new(true);
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            serde_json::json!({"value": true})
        );
    }

    #[test]
    fn test_provisioning_state_terminal() {
        assert!(ProvisioningState::Succeeded.is_terminal());
        assert!(ProvisioningState::Failed.is_terminal());
        assert!(ProvisioningState::Canceled.is_terminal());
        assert!(!ProvisioningState::Running.is_terminal());
    }

    #[test]
    fn test_deployment_deserialization() {
        let body = serde_json::json!({
            "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Resources/deployments/bot",
            "name": "bot",
            "properties": {
                "provisioningState": "Succeeded",
                "correlationId": "abc"
            }
        });
        let deployment: Deployment = serde_json::from_value(body).unwrap();
        assert_eq!(
            deployment.provisioning_state(),
            Some(ProvisioningState::Succeeded)
        );
    }

    #[test]
    fn test_unknown_provisioning_state() {
        let state: ProvisioningState = serde_json::from_str("\"SomeNewState\"").unwrap();
        assert_eq!(state, ProvisioningState::Unknown);
        assert!(!state.is_terminal());
    }
}
