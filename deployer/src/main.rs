//! Botforge - Entry Point
//!
//! Provisions Azure Bot Service web app and function app bots from
//! prebuilt code templates and ARM deployment templates.

use std::collections::HashMap;
use std::env;

use botforge::config::Settings;
use botforge::deploy::create::{create_bot, CreateBotOptions};
use botforge::deploy::update::update_bot;
use botforge::errors::DeployerError;
use botforge::http::client::HttpClient;
use botforge::logs::{init_logging, LogOptions};
use botforge::utils::version_info;

use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    // Print version and exit
    if cli_args.contains_key("version") {
        println!("{}", serde_json::to_string_pretty(&version_info()).unwrap());
        return;
    }

    // Load settings
    let settings = match load_settings(&cli_args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings file: {}", e);
            return;
        }
    };

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        println!("Failed to initialize logging: {e}");
    }

    let result = if cli_args.contains_key("create") {
        run_create(&settings, &cli_args).await
    } else if cli_args.contains_key("update") {
        run_update(&settings, &cli_args).await
    } else {
        print_usage();
        return;
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  botforge --create --name=<bot> --resource-group=<rg> --subscription=<id> \\");
    println!("           --app-id=<appid> --password=<secret> [--kind=webapp|function] \\");
    println!("           [--language=Csharp|Javascript] [--sdk-version=v3|v4] [--location=<region>] \\");
    println!("           [--sku=<sku>] [--insights-location=<region>] [--storage=<account>] \\");
    println!("           [--description=<text>] [--parameters=<json>]");
    println!("  botforge --update --resource-group=<rg> --subscription=<id> --parameters=<json>");
    println!("  botforge --version");
    println!();
    println!("The ARM bearer token is read from --token or the ARM_ACCESS_TOKEN environment variable.");
}

fn load_settings(cli_args: &HashMap<String, String>) -> Result<Settings, DeployerError> {
    match cli_args.get("settings") {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Settings::default()),
    }
}

fn required(cli_args: &HashMap<String, String>, key: &str) -> Result<String, DeployerError> {
    cli_args
        .get(key)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| DeployerError::Validation(format!("Missing required argument --{}", key)))
}

fn bearer_token(cli_args: &HashMap<String, String>) -> Result<String, DeployerError> {
    if let Some(token) = cli_args.get("token").filter(|t| !t.is_empty()) {
        return Ok(token.clone());
    }
    env::var("ARM_ACCESS_TOKEN").map_err(|_| {
        DeployerError::Validation(
            "No ARM bearer token. Pass --token or set ARM_ACCESS_TOKEN.".to_string(),
        )
    })
}

async fn run_create(
    settings: &Settings,
    cli_args: &HashMap<String, String>,
) -> Result<(), DeployerError> {
    let token = bearer_token(cli_args)?;

    let extra_parameter_sources = match cli_args.get("parameters") {
        Some(raw) => vec![vec![raw.clone()]],
        None => Vec::new(),
    };

    let options = CreateBotOptions {
        resource_name: required(cli_args, "name")?,
        resource_group: required(cli_args, "resource-group")?,
        subscription_id: required(cli_args, "subscription")?,
        description: cli_args.get("description").cloned(),
        kind: cli_args.get("kind").cloned().unwrap_or_else(|| "webapp".to_string()),
        app_id: required(cli_args, "app-id")?,
        password: required(cli_args, "password")?,
        storage_account_name: cli_args.get("storage").cloned(),
        location: cli_args.get("location").cloned().unwrap_or_else(|| "westus".to_string()),
        sku_name: cli_args.get("sku").cloned().unwrap_or_else(|| "F0".to_string()),
        app_insights_location: cli_args
            .get("insights-location")
            .cloned()
            .unwrap_or_else(|| "South Central US".to_string()),
        language: cli_args.get("language").cloned().unwrap_or_else(|| "Csharp".to_string()),
        version: cli_args.get("sdk-version").cloned().unwrap_or_else(|| "v4".to_string()),
        extra_parameter_sources,
    };

    let registration = create_bot(settings, &token, &options).await?;
    println!("{}", serde_json::to_string_pretty(&registration)?);
    Ok(())
}

async fn run_update(
    settings: &Settings,
    cli_args: &HashMap<String, String>,
) -> Result<(), DeployerError> {
    let token = bearer_token(cli_args)?;
    let subscription_id = required(cli_args, "subscription")?;
    let resource_group = required(cli_args, "resource-group")?;
    let payload: serde_json::Value = serde_json::from_str(&required(cli_args, "parameters")?)?;

    let http = HttpClient::new(&settings.arm.management_endpoint, &token)?;
    let bot = update_bot(&http, settings, &subscription_id, &resource_group, &payload).await?;
    println!("Updated bot {}", bot.name.unwrap_or_default());
    Ok(())
}
