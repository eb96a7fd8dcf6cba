//! REST client for the Bedrock Converse endpoint.
//!
//! Sends one user turn per call with [`reqwest`] and bearer-token auth, and
//! pulls the first text completion out of the response envelope.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::GenerationConfig;
use crate::messages::{extract_completion_text, extract_usage, ConverseRequest, InferenceConfig};
use crate::{GenerationError, TextGenerator};

/// HTTP client for one model on one Bedrock runtime endpoint.
pub struct BedrockClient {
    client: reqwest::Client,
    converse_url: reqwest::Url,
    model_id: String,
    api_key: Option<String>,
    inference: InferenceConfig,
}

impl BedrockClient {
    /// Build a client from configuration. Fails on an unusable endpoint URL.
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(client, config)
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: &GenerationConfig,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            client,
            converse_url: converse_url(&config.endpoint, &config.model_id)?,
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
            inference: config.inference,
        })
    }

    /// The model this client targets.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Send `prompt` and return the raw response body.
    pub async fn converse(&self, prompt: &str) -> Result<Value, GenerationError> {
        let body = ConverseRequest::user_prompt(prompt, self.inference);

        let mut request = self.client.post(self.converse_url.clone()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = Self::ensure_success(request.send().await?).await?;
        Ok(response.json::<Value>().await?)
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`GenerationError::Api`] with its body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GenerationError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for BedrockClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(
            model_id = %self.model_id,
            prompt_chars = prompt.len(),
            "Sending generation request",
        );

        let body = self.converse(prompt).await?;

        if let Some(usage) = extract_usage(&body) {
            tracing::info!(
                model_id = %self.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Generation completed",
            );
        }

        extract_completion_text(&body)
            .map(str::to_string)
            .ok_or_else(|| {
                GenerationError::MalformedResponse(
                    "no text at output.message.content[0].text".to_string(),
                )
            })
    }
}

/// `{endpoint}/model/{model_id}/converse`, with the model id as a single
/// percent-encoded path segment (inference-profile ARNs contain `/`).
pub fn converse_url(endpoint: &str, model_id: &str) -> Result<reqwest::Url, GenerationError> {
    let mut url = reqwest::Url::parse(endpoint)
        .map_err(|e| GenerationError::Config(format!("Invalid endpoint '{endpoint}': {e}")))?;

    url.path_segments_mut()
        .map_err(|()| GenerationError::Config(format!("Endpoint '{endpoint}' cannot be a base URL")))?
        .pop_if_empty()
        .extend(["model", model_id, "converse"]);

    Ok(url)
}
