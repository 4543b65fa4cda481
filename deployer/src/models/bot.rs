//! Bot service resource models

use serde::{Deserialize, Serialize};

/// Properties of a bot service resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub msa_app_id: Option<String>,
}

/// A bot service resource as returned by the bot service API
#[derive(Debug, Clone, Deserialize)]
pub struct BotResource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub kind: Option<String>,
    pub properties: Option<BotProperties>,
}

/// Registration document handed to downstream tooling after a bot is
/// provisioned. Mirrors the `.bot` file service entry consumed by the
/// bot framework tools.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotRegistration {
    #[serde(rename = "type")]
    pub service_type: String,

    pub id: String,
    pub name: String,
    pub app_id: String,
    pub app_password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    pub resource_group: String,
    pub service_name: String,
    pub subscription_id: String,
}
