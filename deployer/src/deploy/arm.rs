//! Generic ARM template submission

use std::path::Path;

use serde_json::{json, Value};
use tracing::debug;

use crate::errors::DeployerError;
use crate::http::deployments::DeploymentsApi;
use crate::models::deployment::{Deployment, DeploymentRequest, ProvisioningState};
use crate::params::merge_parameter_sources;

/// Read an ARM template file. The template content is opaque to the
/// deployer apart from requiring a JSON object with a `resources`
/// array.
async fn load_template(template_file: &Path) -> Result<Value, DeployerError> {
    let raw = tokio::fs::read_to_string(template_file).await?;
    let mut template: Value = serde_json::from_str(&raw)?;

    let Some(obj) = template.as_object_mut() else {
        return Err(DeployerError::Validation(format!(
            "Template file {} does not contain a JSON object",
            template_file.display()
        )));
    };
    obj.entry("resources").or_insert_with(|| json!([]));

    Ok(template)
}

/// Submit an ARM template deployment and wait for its terminal result.
///
/// The request's own parameter map is serialized as the first raw
/// parameter source; `extra_parameter_sources` are merged over it,
/// later sources winning. A terminal failure from the deployments API
/// is propagated unchanged as `DeploymentFailed`.
pub async fn deploy_arm_template(
    client: &dyn DeploymentsApi,
    request: DeploymentRequest,
    extra_parameter_sources: &[Vec<String>],
) -> Result<Deployment, DeployerError> {
    let template = load_template(&request.template_file).await?;

    let mut sources = vec![vec![serde_json::to_string(&request.parameters)?]];
    sources.extend_from_slice(extra_parameter_sources);
    let parameters = Value::Object(merge_parameter_sources(&sources));

    debug!(
        "Deploying ARM template {} as deployment {}",
        request.template_file.display(),
        request.deployment_name
    );
    let deployment = client
        .create_or_update(
            &request.resource_group,
            &request.deployment_name,
            template,
            parameters,
            request.mode,
        )
        .await?;

    match deployment.provisioning_state() {
        Some(ProvisioningState::Succeeded) => Ok(deployment),
        Some(state) => {
            let detail = deployment
                .properties
                .as_ref()
                .and_then(|p| p.error.as_ref())
                .and_then(|e| e.message.clone())
                .unwrap_or_else(|| format!("provisioning state {:?}", state));
            Err(DeployerError::DeploymentFailed(format!(
                "Deployment {} failed: {}",
                request.deployment_name, detail
            )))
        }
        None => Err(DeployerError::DeploymentFailed(format!(
            "Deployment {} returned no provisioning state",
            request.deployment_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::models::deployment::{
        DeploymentErrorDetail, DeploymentMode, DeploymentProperties, ParameterValue,
    };

    /// Deployments API stub that records the submitted payload
    struct StubDeploymentsApi {
        state: ProvisioningState,
        error_message: Option<String>,
        seen_parameters: Mutex<Option<Value>>,
        seen_template: Mutex<Option<Value>>,
    }

    impl StubDeploymentsApi {
        fn succeeding() -> Self {
            Self {
                state: ProvisioningState::Succeeded,
                error_message: None,
                seen_parameters: Mutex::new(None),
                seen_template: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                state: ProvisioningState::Failed,
                error_message: Some(message.to_string()),
                seen_parameters: Mutex::new(None),
                seen_template: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl DeploymentsApi for StubDeploymentsApi {
        async fn create_or_update(
            &self,
            _resource_group: &str,
            deployment_name: &str,
            template: Value,
            parameters: Value,
            _mode: DeploymentMode,
        ) -> Result<Deployment, DeployerError> {
            *self.seen_parameters.lock().unwrap() = Some(parameters);
            *self.seen_template.lock().unwrap() = Some(template);
            Ok(Deployment {
                id: None,
                name: Some(deployment_name.to_string()),
                properties: Some(DeploymentProperties {
                    provisioning_state: Some(self.state),
                    correlation_id: None,
                    timestamp: None,
                    outputs: None,
                    error: self.error_message.as_ref().map(|m| DeploymentErrorDetail {
                        code: Some("DeploymentFailed".to_string()),
                        message: Some(m.clone()),
                    }),
                }),
            })
        }
    }

    fn write_template(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn request(template_file: std::path::PathBuf) -> DeploymentRequest {
        let mut parameters = BTreeMap::new();
        parameters.insert("sku".to_string(), ParameterValue::new("F0"));
        DeploymentRequest {
            resource_group: "rg".to_string(),
            deployment_name: "mybot".to_string(),
            template_file,
            parameters,
            mode: DeploymentMode::Incremental,
        }
    }

    #[tokio::test]
    async fn test_successful_deployment() {
        let template_file = write_template(
            "botforge-test-ok.template.json",
            r#"{"$schema": "x", "resources": []}"#,
        );
        let api = StubDeploymentsApi::succeeding();

        let deployment = deploy_arm_template(&api, request(template_file), &[])
            .await
            .unwrap();
        assert_eq!(deployment.name.as_deref(), Some("mybot"));

        // The request's own parameter map went through the merge helper
        let params = self_params(&api);
        assert_eq!(params["sku"], json!({"value": "F0"}));
    }

    #[tokio::test]
    async fn test_missing_resources_key_is_added() {
        let template_file = write_template("botforge-test-nores.template.json", r#"{"a": 1}"#);
        let api = StubDeploymentsApi::succeeding();

        deploy_arm_template(&api, request(template_file), &[])
            .await
            .unwrap();
        let template = api.seen_template.lock().unwrap().clone().unwrap();
        assert_eq!(template["resources"], json!([]));
    }

    #[tokio::test]
    async fn test_extra_sources_override() {
        let template_file = write_template(
            "botforge-test-extra.template.json",
            r#"{"resources": []}"#,
        );
        let api = StubDeploymentsApi::succeeding();

        let extra = vec![vec![r#"{"parameters":{"sku":{"value":"S1"}}}"#.to_string()]];
        deploy_arm_template(&api, request(template_file), &extra)
            .await
            .unwrap();
        let params = self_params(&api);
        assert_eq!(params["sku"], json!({"value": "S1"}));
    }

    #[tokio::test]
    async fn test_failed_deployment_propagates() {
        let template_file = write_template(
            "botforge-test-fail.template.json",
            r#"{"resources": []}"#,
        );
        let api = StubDeploymentsApi::failing("quota exceeded");

        let err = deploy_arm_template(&api, request(template_file), &[])
            .await
            .unwrap_err();
        match err {
            DeployerError::DeploymentFailed(message) => {
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_object_template_is_rejected() {
        let template_file = write_template("botforge-test-badtpl.template.json", "[1, 2]");
        let api = StubDeploymentsApi::succeeding();

        let err = deploy_arm_template(&api, request(template_file), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DeployerError::Validation(_)));
    }

    fn self_params(api: &StubDeploymentsApi) -> Value {
        api.seen_parameters.lock().unwrap().clone().unwrap()
    }
}
