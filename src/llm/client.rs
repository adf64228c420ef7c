use crate::config::ClientConfig;
use crate::error::{ReportError, Result};
use crate::llm::types::{GenerationRequest, GenerationResult};
use log::{debug, info};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

/// Sends prompts to the chat-completion endpoint, one POST per call.
///
/// Holds only the credential, endpoint and a connection pool; cloning is cheap
/// and every call is independent.
#[derive(Clone, Debug)]
pub struct QueryClient {
    client: Client,
    config: ClientConfig,
}

impl QueryClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn query(&self, prompt: &str) -> Result<GenerationResult> {
        self.query_with_key(prompt, &self.config.api_key).await
    }

    /// Same as [`query`](Self::query) but authenticates with `api_key` instead
    /// of the configured credential.
    pub async fn query_with_key(&self, prompt: &str, api_key: &str) -> Result<GenerationResult> {
        if prompt.trim().is_empty() {
            return Err(ReportError::EmptyPrompt);
        }

        let url = self.config.completions_url();
        let payload = GenerationRequest::new(prompt);

        debug!(
            "POST {} (model {}, {} prompt chars)",
            url,
            payload.model,
            prompt.len()
        );

        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ReportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result = GenerationResult::from_json(&body)?;
        info!(
            "Received {} chars with {} citations",
            result.text().len(),
            result.citations().len()
        );

        Ok(result)
    }
}
