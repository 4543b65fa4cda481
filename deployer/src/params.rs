//! ARM template parameter assembly
//!
//! Builds the flat `key -> {"value": ...}` parameter map the
//! deployments API expects, derives azure-compatible site and storage
//! account names from the bot resource name, and merges best-effort
//! raw parameter overrides from multiple sources.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::DeployerError;
use crate::models::deployment::ParameterValue;
use crate::templates::catalog::{BotKind, SdkVersion};

/// Inputs for building the bot deployment parameter map
#[derive(Debug, Clone)]
pub struct BotParameterInputs<'a> {
    pub resource_name: &'a str,
    pub resource_group: &'a str,
    pub subscription_id: &'a str,
    pub description: Option<&'a str>,
    pub kind: BotKind,
    pub version: SdkVersion,
    pub app_id: &'a str,
    pub password: &'a str,
    pub storage_account_name: Option<&'a str>,
    pub location: &'a str,
    pub sku_name: &'a str,
    pub app_insights_location: &'a str,
    pub zip_url: &'a str,
}

/// Derive the web/function app site name from the bot resource name.
///
/// Lowercased, truncated to 40 characters, stripped of everything
/// outside `[a-z0-9-]`. Site names cannot end with '-'
/// ("testname-.azurewebsites.net" is invalid), so trailing dashes are
/// stripped too. An input that strips down to nothing is a validation
/// error.
pub fn derive_site_name(resource_name: &str) -> Result<String, DeployerError> {
    let truncated: String = resource_name.chars().take(40).collect();
    let site_name: String = truncated
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    let site_name = site_name.trim_end_matches('-');

    if site_name.is_empty() {
        return Err(DeployerError::Validation(format!(
            "Resource name '{}' contains no usable characters for a site name. \
             Site names must contain letters or digits.",
            resource_name
        )));
    }
    Ok(site_name.to_string())
}

/// Derive a storage account name from the bot resource name: lowercase
/// alphanumerics only, at most 24 characters.
pub fn derive_storage_account_name(resource_name: &str) -> String {
    let truncated: String = resource_name.chars().take(24).collect();
    truncated
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Synthesize the server farm resource id for a bot
pub fn server_farm_id(subscription_id: &str, resource_group: &str, resource_name: &str) -> String {
    format!(
        "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Web/serverfarms/{}",
        subscription_id, resource_group, resource_name
    )
}

/// Build the ARM template parameter map for a bot deployment
pub fn build_bot_parameters(
    inputs: &BotParameterInputs<'_>,
) -> Result<BTreeMap<String, ParameterValue>, DeployerError> {
    let site_name = derive_site_name(inputs.resource_name)?;
    debug!("Web or Function app name to be used is {}.", site_name);

    let mut params: BTreeMap<String, ParameterValue> = BTreeMap::new();
    params.insert("location".to_string(), ParameterValue::new(inputs.location));
    params.insert("kind".to_string(), ParameterValue::new(inputs.kind.as_str()));
    params.insert("sku".to_string(), ParameterValue::new(inputs.sku_name));
    params.insert("siteName".to_string(), ParameterValue::new(site_name));
    params.insert("appId".to_string(), ParameterValue::new(inputs.app_id));
    params.insert("appSecret".to_string(), ParameterValue::new(inputs.password));
    params.insert(
        "serverFarmId".to_string(),
        ParameterValue::new(server_farm_id(
            inputs.subscription_id,
            inputs.resource_group,
            inputs.resource_name,
        )),
    );
    params.insert("zipUrl".to_string(), ParameterValue::new(inputs.zip_url));
    params.insert("botEnv".to_string(), ParameterValue::new("prod"));
    params.insert("createServerFarm".to_string(), ParameterValue::new(true));
    params.insert(
        "serverFarmLocation".to_string(),
        ParameterValue::new(inputs.location.to_lowercase().replace(' ', "")),
    );
    params.insert(
        "azureWebJobsBotFrameworkDirectLineSecret".to_string(),
        ParameterValue::new(""),
    );
    params.insert("botId".to_string(), ParameterValue::new(inputs.resource_name));

    if let Some(description) = inputs.description {
        if !description.is_empty() {
            params.insert("description".to_string(), ParameterValue::new(description));
        }
    }

    if inputs.version == SdkVersion::V3 {
        // Storage prep
        let mut create_new_storage = false;
        let storage_account_name = match inputs.storage_account_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                create_new_storage = true;
                let derived = derive_storage_account_name(inputs.resource_name);
                debug!(
                    "Storage name not provided. If storage is to be created, name to be used is {}.",
                    derived
                );
                derived
            }
        };
        params.insert(
            "createNewStorage".to_string(),
            ParameterValue::new(create_new_storage),
        );
        params.insert(
            "storageAccountResourceId".to_string(),
            ParameterValue::new(""),
        );
        params.insert(
            "storageAccountName".to_string(),
            ParameterValue::new(storage_account_name),
        );

        // Application insights prep
        let app_insights_location = inputs.app_insights_location.to_lowercase().replace(' ', "");
        debug!(
            "Application insights location resolved to {}.",
            app_insights_location
        );
        params.insert("useAppInsights".to_string(), ParameterValue::new(true));
        params.insert(
            "appInsightsLocation".to_string(),
            ParameterValue::new(app_insights_location),
        );
    }

    Ok(params)
}

/// Merge raw parameter override sources into a flat JSON object.
///
/// Each raw string is attempted as JSON. An object carrying a
/// `"parameters"` key contributes that nested object; any other object
/// contributes itself. Entries that do not parse to an object are
/// skipped silently: the sources are best-effort overrides accumulated
/// from multiple places. Later sources win on key collision.
pub fn merge_parameter_sources(sources: &[Vec<String>]) -> Map<String, Value> {
    let mut merged = Map::new();
    for source in sources {
        for raw in source {
            let Ok(Value::Object(mut parsed)) = serde_json::from_str::<Value>(raw) else {
                continue;
            };
            match parsed.remove("parameters") {
                Some(Value::Object(nested)) => merged.extend(nested),
                Some(_) => {}
                None => merged.extend(parsed),
            }
        }
    }
    merged
}
