//! Deployer settings

use serde::{Deserialize, Serialize};

use crate::logs::LogLevel;

/// Deployer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Azure Resource Manager configuration
    #[serde(default)]
    pub arm: ArmSettings,

    /// Bot template configuration
    #[serde(default)]
    pub templates: TemplateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            arm: ArmSettings::default(),
            templates: TemplateSettings::default(),
        }
    }
}

/// Azure Resource Manager API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmSettings {
    /// Management endpoint base URL
    #[serde(default = "default_management_endpoint")]
    pub management_endpoint: String,

    /// API version for the deployments resource provider
    #[serde(default = "default_deployments_api_version")]
    pub deployments_api_version: String,

    /// API version for the bot service resource provider
    #[serde(default = "default_bot_service_api_version")]
    pub bot_service_api_version: String,

    /// Seconds between polls of a running deployment
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_management_endpoint() -> String {
    "https://management.azure.com".to_string()
}

fn default_deployments_api_version() -> String {
    "2021-04-01".to_string()
}

fn default_bot_service_api_version() -> String {
    "2021-03-01".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

impl Default for ArmSettings {
    fn default() -> Self {
        Self {
            management_endpoint: default_management_endpoint(),
            deployments_api_version: default_deployments_api_version(),
            bot_service_api_version: default_bot_service_api_version(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// Bot code template settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSettings {
    /// Endpoint that publishes the CDN root for bot code archives
    #[serde(default = "default_template_root_endpoint")]
    pub root_endpoint: String,

    /// Directory holding the ARM template files
    #[serde(default = "default_template_dir")]
    pub template_dir: String,
}

fn default_template_root_endpoint() -> String {
    "https://dev.botframework.com/api/misc/bottemplateroot".to_string()
}

fn default_template_dir() -> String {
    "templates".to_string()
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            root_endpoint: default_template_root_endpoint(),
            template_dir: default_template_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.arm.management_endpoint, "https://management.azure.com");
        assert_eq!(settings.arm.deployments_api_version, "2021-04-01");
        assert_eq!(
            settings.templates.root_endpoint,
            "https://dev.botframework.com/api/misc/bottemplateroot"
        );
        assert_eq!(settings.templates.template_dir, "templates");
    }

    #[test]
    fn test_partial_override() {
        let settings: Settings =
            serde_json::from_str(r#"{"arm": {"poll_interval_secs": 1}}"#).unwrap();
        assert_eq!(settings.arm.poll_interval_secs, 1);
        assert_eq!(settings.arm.bot_service_api_version, "2021-03-01");
    }
}
