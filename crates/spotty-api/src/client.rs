//! Authenticated HTTP plumbing shared by every endpoint.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ApiConfig;

const USER_AGENT: &str = concat!("spotty/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors returned by the Spotify client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Spotify API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Spotify Web API client.
///
/// Every request carries the configured bearer token unchanged; the client
/// never inspects or refreshes it.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl SpotifyClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET {base}/{path}` with query parameters, decoding a JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .query(query)
            .send()
            .await?;

        decode(&url, response).await
    }

    /// `POST {base}/{path}` with a JSON body, decoding a JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(body)
            .send()
            .await?;

        decode(&url, response).await
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), url = %url, body = %body, "Spotify API error");
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        endpoint: url.to_owned(),
        message: e.to_string(),
    })
}
