//! Bot registration JSON formatter
//!
//! Builds the registration document handed to downstream tooling once
//! a bot is provisioned. The deployer only passes identifiers through;
//! everything else comes from the fetched bot resource.

use crate::config::Settings;
use crate::errors::DeployerError;
use crate::http::client::HttpClient;
use crate::models::bot::{BotRegistration, BotResource};

/// Service type marker for Azure Bot Service entries
const SERVICE_TYPE_ABS: &str = "abs";

/// Build the registration document for a provisioned bot
pub async fn create_bot_json(
    http: &HttpClient,
    settings: &Settings,
    subscription_id: &str,
    resource_group: &str,
    resource_name: &str,
    app_password: &str,
) -> Result<BotRegistration, DeployerError> {
    let bot = http
        .get_bot(
            subscription_id,
            resource_group,
            resource_name,
            &settings.arm.bot_service_api_version,
        )
        .await?;

    Ok(format_registration(
        bot,
        subscription_id,
        resource_group,
        resource_name,
        app_password,
    ))
}

fn format_registration(
    bot: BotResource,
    subscription_id: &str,
    resource_group: &str,
    resource_name: &str,
    app_password: &str,
) -> BotRegistration {
    let properties = bot.properties.unwrap_or_default();
    BotRegistration {
        service_type: SERVICE_TYPE_ABS.to_string(),
        id: bot.id.unwrap_or_default(),
        name: bot.name.unwrap_or_else(|| resource_name.to_string()),
        app_id: properties.msa_app_id.unwrap_or_default(),
        app_password: app_password.to_string(),
        endpoint: properties.endpoint,
        resource_group: resource_group.to_string(),
        service_name: resource_name.to_string(),
        subscription_id: subscription_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::bot::BotProperties;

    #[test]
    fn test_format_registration() {
        let bot = BotResource {
            id: Some("/subscriptions/sub/resourceGroups/rg/providers/Microsoft.BotService/botServices/mybot".to_string()),
            name: Some("mybot".to_string()),
            location: Some("westus".to_string()),
            kind: Some("sdk".to_string()),
            properties: Some(BotProperties {
                display_name: Some("My Bot".to_string()),
                description: None,
                endpoint: Some("https://mybot.azurewebsites.net/api/messages".to_string()),
                msa_app_id: Some("app-id".to_string()),
            }),
        };

        let registration = format_registration(bot, "sub", "rg", "mybot", "hunter2");
        assert_eq!(registration.service_type, "abs");
        assert_eq!(registration.app_id, "app-id");
        assert_eq!(registration.app_password, "hunter2");
        assert_eq!(registration.service_name, "mybot");

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["type"], "abs");
        assert_eq!(json["appId"], "app-id");
        assert_eq!(json["resourceGroup"], "rg");
    }

    #[test]
    fn test_format_registration_without_properties() {
        let bot = BotResource {
            id: None,
            name: None,
            location: None,
            kind: None,
            properties: None,
        };
        let registration = format_registration(bot, "sub", "rg", "mybot", "pw");
        assert_eq!(registration.name, "mybot");
        assert!(registration.endpoint.is_none());
    }
}
