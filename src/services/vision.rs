use crate::models::ClassificationResult;
use actix_web::web::Bytes;
use reqwest::Client;
use thiserror::Error;

/// Errors that can occur when calling the Custom Vision prediction endpoint
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Custom Vision returned error: {0}")]
    ApiError(String),
}

/// Custom Vision image classification client
pub struct VisionClient {
    prediction_url: String,
    prediction_key: String,
    threshold: f64,
    client: Client,
}

impl VisionClient {
    pub fn new(prediction_url: String, prediction_key: String, threshold: f64, client: Client) -> Self {
        Self {
            prediction_url,
            prediction_key,
            threshold,
            client,
        }
    }

    /// Classify raw image bytes
    pub async fn classify(&self, image: Bytes) -> Result<ClassificationResult, VisionError> {
        tracing::debug!("Classifying image of {} bytes", image.len());

        let response = self
            .client
            .post(&self.prediction_url)
            .header("Prediction-Key", &self.prediction_key)
            .header("Content-Type", "application/octet-stream")
            .body(image)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VisionError::ApiError(format!(
                "Failed to classify image: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Classify an image and keep the labels above the configured threshold
    pub async fn recognize(&self, image: Bytes) -> Result<Vec<String>, VisionError> {
        let result = self.classify(image).await?;
        let labels = result.labels_above(self.threshold);

        tracing::debug!(
            "Recognized {} of {} predicted labels",
            labels.len(),
            result.predictions.len()
        );

        Ok(labels)
    }
}
