//! HTTP client for the Kagi API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::KagiBackend;
use super::error::KagiError;
use super::types::{Envelope, ErrorEnvelope, FastGptAnswer, FastGptRequest, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://kagi.com/api/v0";

/// Kagi client configuration
#[derive(Debug, Clone)]
pub struct KagiClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for KagiClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Kagi API client
pub struct KagiClient {
    config: KagiClientConfig,
    client: Client,
}

impl KagiClient {
    /// Create a new client; fails if no API key is configured
    pub fn new(config: KagiClientConfig) -> Result<Self, KagiError> {
        if config.api_key.trim().is_empty() {
            return Err(KagiError::not_configured(
                "KAGI_API_KEY is required",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.config.api_key)
    }

    /// Check status, then decode the `{meta, data}` envelope
    async fn read_envelope<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Envelope<T>, KagiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.message())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            warn!("Kagi API returned {}: {}", status, message);
            return Err(KagiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| KagiError::decode(e.to_string()))?;

        if let Some(meta) = &envelope.meta {
            debug!(
                "Kagi request {} served by {} in {}ms",
                meta.id.as_deref().unwrap_or("-"),
                meta.node.as_deref().unwrap_or("-"),
                meta.ms.unwrap_or_default()
            );
        }

        Ok(envelope)
    }
}

#[async_trait]
impl KagiBackend for KagiClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, KagiError> {
        debug!("Kagi search: {}", query);
        let response = self
            .client
            .get(self.endpoint("search"))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .query(&[("q", query)])
            .send()
            .await?;

        Self::read_envelope(response).await
    }

    async fn fastgpt(&self, query: &str, cache: bool) -> Result<FastGptAnswer, KagiError> {
        debug!("Kagi FastGPT: {} (cache={})", query, cache);
        let body = FastGptRequest {
            query,
            cache,
            web_search: true,
        };

        let response = self
            .client
            .post(self.endpoint("fastgpt"))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await?;

        let envelope: Envelope<FastGptAnswer> = Self::read_envelope(response).await?;
        Ok(envelope.data)
    }
}
