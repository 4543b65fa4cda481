//! Bot update path

use serde_json::Value;

use crate::config::Settings;
use crate::errors::DeployerError;
use crate::http::client::HttpClient;
use crate::models::bot::BotResource;

/// Update an existing bot service resource.
///
/// The payload must carry a non-empty `name` field identifying the
/// bot; a payload without one is a validation error, not a silent
/// no-op.
pub async fn update_bot(
    http: &HttpClient,
    settings: &Settings,
    subscription_id: &str,
    resource_group: &str,
    payload: &Value,
) -> Result<BotResource, DeployerError> {
    let resource_name = extract_resource_name(payload)?;

    http.update_bot(
        subscription_id,
        resource_group,
        &resource_name,
        &settings.arm.bot_service_api_version,
        payload,
    )
    .await
}

fn extract_resource_name(payload: &Value) -> Result<String, DeployerError> {
    payload
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            DeployerError::Validation(
                "Update payload is missing the bot resource 'name' field".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_extract_resource_name() {
        let payload = json!({"name": "mybot", "properties": {"description": "x"}});
        assert_eq!(extract_resource_name(&payload).unwrap(), "mybot");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        for payload in [json!({}), json!({"name": ""}), json!({"name": 42})] {
            let err = extract_resource_name(&payload).unwrap_err();
            assert!(matches!(err, DeployerError::Validation(_)));
        }
    }
}
