//! HTTP client implementation

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::DeployerError;

/// HTTP client for the Azure management endpoint
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new client against a management endpoint, authenticated
    /// with a caller-supplied bearer token
    pub fn new(base_url: &str, token: &str) -> Result<Self, DeployerError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DeployerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP GET failed: {} - {}", status, body);
            return Err(DeployerError::ApiError(format!("{}: {}", status, body)));
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DeployerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP PUT failed: {} - {}", status, body);
            return Err(DeployerError::ApiError(format!("{}: {}", status, body)));
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DeployerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PATCH {}", url);

        let response = self
            .client
            .patch(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP PATCH failed: {} - {}", status, body);
            return Err(DeployerError::ApiError(format!("{}: {}", status, body)));
        }

        let body = response.json().await?;
        Ok(body)
    }
}
