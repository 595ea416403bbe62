use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TRANSLATOR_API_VERSION: &str = "3.0";

/// Errors that can occur when calling the Translator service
#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Translator returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct TranslateItem<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslationResult {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Azure Translator v3 client
pub struct TranslatorClient {
    endpoint: String,
    key: String,
    region: String,
    client: Client,
}

impl TranslatorClient {
    pub fn new(endpoint: String, key: String, region: String, client: Client) -> Self {
        Self {
            endpoint,
            key,
            region,
            client,
        }
    }

    /// Translate `text` into `language` and return the first candidate
    pub async fn translate(&self, text: &str, language: &str) -> Result<String, TranslatorError> {
        tracing::debug!("Translating {} chars to {}", text.len(), language);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api-version", TRANSLATOR_API_VERSION), ("to", language)])
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .json(&[TranslateItem { text }])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslatorError::ApiError(format!(
                "Failed to translate text: {}",
                response.status()
            )));
        }

        let results: Vec<TranslationResult> = response.json().await?;

        results
            .into_iter()
            .next()
            .and_then(|r| r.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or_else(|| TranslatorError::InvalidResponse("No translation in response".into()))
    }
}
