//! Bot code template resolution
//!
//! Resolves the deployable code artifact URL for a bot: a CDN root is
//! fetched from the bot framework lookup endpoint, then the
//! version/language/kind-specific archive name from the catalog is
//! appended to it.

pub mod catalog;

use tracing::{debug, error};

use crate::errors::DeployerError;
use catalog::{select_template, BotKind, BotLanguage, SdkVersion, TemplateKind};

/// Where users should report CDN lookup failures
const ISSUE_TRACKER_URL: &str = "https://github.com/Microsoft/botbuilder-tools/issues";

/// Result of template resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSelection {
    /// Fully qualified URL of the bot code archive
    pub artifact_url: String,

    /// ARM template family to deploy with
    pub template: TemplateKind,
}

/// Resolves bot code templates against the CDN root lookup endpoint
pub struct TemplateResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl TemplateResolver {
    /// Create a resolver against the given lookup endpoint
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DeployerError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Resolve the artifact URL and template family for a bot
    /// configuration.
    ///
    /// A single lookup attempt is made; a non-success response is a
    /// terminal `RemoteLookup` error.
    pub async fn resolve(
        &self,
        version: SdkVersion,
        language: BotLanguage,
        kind: BotKind,
    ) -> Result<TemplateSelection, DeployerError> {
        let (template, suffix) = select_template(version, language, kind)?;
        let root = self.fetch_template_root().await?;

        let selection = TemplateSelection {
            artifact_url: format!("{}{}", root, suffix),
            template,
        };
        debug!(
            "Resolved SDK version {}, kind {} and language {:?} to template {}: {}",
            version.as_str(),
            kind.as_str(),
            language,
            template.file_name(),
            selection.artifact_url
        );
        Ok(selection)
    }

    /// Fetch the CDN root URL from the lookup endpoint
    async fn fetch_template_root(&self) -> Result<String, DeployerError> {
        debug!("GET {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            error!("Template root lookup failed: {}", response.status());
            return Err(DeployerError::RemoteLookup(format!(
                "Unable to get bot code template from CDN. Please file an issue on {}",
                ISSUE_TRACKER_URL
            )));
        }

        // The endpoint returns the root as a quoted JSON string
        let body = response.text().await?;
        Ok(strip_quotes(&body).to_string())
    }
}

/// Strip surrounding quote characters from a raw response body
fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(
            strip_quotes("\"https://cdn.botframework.com/templates/\""),
            "https://cdn.botframework.com/templates/"
        );
        assert_eq!(strip_quotes("https://plain.example/"), "https://plain.example/");
        assert_eq!(strip_quotes("  \"x\"\n"), "x");
    }
}
