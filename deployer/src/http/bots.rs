//! Bot service API client

use crate::errors::DeployerError;
use crate::http::client::HttpClient;
use crate::models::bot::BotResource;

fn bot_path(
    subscription_id: &str,
    resource_group: &str,
    resource_name: &str,
    api_version: &str,
) -> String {
    format!(
        "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.BotService/botServices/{}?api-version={}",
        subscription_id, resource_group, resource_name, api_version
    )
}

impl HttpClient {
    /// Fetch a bot service resource
    pub async fn get_bot(
        &self,
        subscription_id: &str,
        resource_group: &str,
        resource_name: &str,
        api_version: &str,
    ) -> Result<BotResource, DeployerError> {
        let path = bot_path(subscription_id, resource_group, resource_name, api_version);
        self.get(&path).await
    }

    /// Patch a bot service resource with an update payload
    pub async fn update_bot(
        &self,
        subscription_id: &str,
        resource_group: &str,
        resource_name: &str,
        api_version: &str,
        payload: &serde_json::Value,
    ) -> Result<BotResource, DeployerError> {
        let path = bot_path(subscription_id, resource_group, resource_name, api_version);
        self.patch(&path, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_path() {
        assert_eq!(
            bot_path("sub", "rg", "mybot", "2021-03-01"),
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.BotService/botServices/mybot?api-version=2021-03-01"
        );
    }
}
