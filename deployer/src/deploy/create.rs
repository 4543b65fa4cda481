//! Bot creation orchestration

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::Settings;
use crate::deploy::arm::deploy_arm_template;
use crate::errors::DeployerError;
use crate::http::client::HttpClient;
use crate::http::deployments::ArmDeploymentsClient;
use crate::models::bot::BotRegistration;
use crate::models::deployment::{DeploymentMode, DeploymentRequest};
use crate::params::{build_bot_parameters, BotParameterInputs};
use crate::registration;
use crate::templates::catalog::{BotKind, BotLanguage, SdkVersion};
use crate::templates::TemplateResolver;

/// Options for creating a web app or function app bot
#[derive(Debug, Clone)]
pub struct CreateBotOptions {
    /// Bot resource name
    pub resource_name: String,

    /// Target resource group
    pub resource_group: String,

    /// Azure subscription id
    pub subscription_id: String,

    /// Optional bot description
    pub description: Option<String>,

    /// Hosting kind: "function" or "webapp"
    pub kind: String,

    /// Microsoft app id for the bot
    pub app_id: String,

    /// Microsoft app password for the bot
    pub password: String,

    /// Storage account name (v3 only; derived when absent)
    pub storage_account_name: Option<String>,

    /// Azure region
    pub location: String,

    /// App service plan SKU
    pub sku_name: String,

    /// Application insights region (v3 only)
    pub app_insights_location: String,

    /// Programming language of the bot code template
    pub language: String,

    /// Bot SDK version: "v3" or "v4"
    pub version: String,

    /// Extra raw parameter override sources, merged over the built
    /// parameters
    pub extra_parameter_sources: Vec<Vec<String>>,
}

/// Create a web app or function app bot.
///
/// Resolves the bot code template, builds the ARM parameter payload,
/// deploys the matching ARM template with mode Incremental, and
/// returns the registration document for the provisioned bot.
pub async fn create_bot(
    settings: &Settings,
    token: &str,
    options: &CreateBotOptions,
) -> Result<BotRegistration, DeployerError> {
    let kind: BotKind = options.kind.parse()?;
    let version: SdkVersion = options.version.parse()?;
    let language: BotLanguage = options.language.parse()?;

    let resolver = TemplateResolver::new(&settings.templates.root_endpoint)?;
    let selection = resolver.resolve(version, language, kind).await?;

    let parameters = build_bot_parameters(&BotParameterInputs {
        resource_name: &options.resource_name,
        resource_group: &options.resource_group,
        subscription_id: &options.subscription_id,
        description: options.description.as_deref(),
        kind,
        version,
        app_id: &options.app_id,
        password: &options.password,
        storage_account_name: options.storage_account_name.as_deref(),
        location: &options.location,
        sku_name: &options.sku_name,
        app_insights_location: &options.app_insights_location,
        zip_url: &selection.artifact_url,
    })?;

    let request = DeploymentRequest {
        resource_group: options.resource_group.clone(),
        deployment_name: options.resource_name.clone(),
        template_file: Path::new(&settings.templates.template_dir)
            .join(selection.template.file_name()),
        parameters,
        mode: DeploymentMode::Incremental,
    };

    let http = HttpClient::new(&settings.arm.management_endpoint, token)?;
    let arm_client = ArmDeploymentsClient::new(
        http.clone(),
        &options.subscription_id,
        &settings.arm.deployments_api_version,
        Duration::from_secs(settings.arm.poll_interval_secs),
    );

    debug!("ARM template creation complete. Deploying ARM template.");
    let deployment =
        deploy_arm_template(&arm_client, request, &options.extra_parameter_sources).await?;
    debug!("ARM template deployment complete. Result {:?}", deployment);
    info!("Bot creation completed successfully.");

    registration::create_bot_json(
        &http,
        settings,
        &options.subscription_id,
        &options.resource_group,
        &options.resource_name,
        &options.password,
    )
    .await
}
