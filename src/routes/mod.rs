// Route exports
pub mod advice;
pub mod media;
pub mod profile;
pub mod system;
pub mod translate;

use crate::config::Settings;
use crate::core::AdviceEngine;
use crate::models::ErrorResponse;
use crate::services::{
    self, BlobAccount, BlobError, BlobStorageClient, CosmosAccount, CosmosClient, CosmosError,
    TranslatorClient, VisionClient,
};
use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Application state shared across all handlers
///
/// Every client is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub blob: Arc<BlobStorageClient>,
    pub cosmos: Arc<CosmosClient>,
    pub translator: Arc<TranslatorClient>,
    pub vision: Arc<VisionClient>,
    pub advice: Arc<AdviceEngine>,
    pub index_file: PathBuf,
}

/// Errors that prevent the service clients from being built
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Blob Storage configuration: {0}")]
    Blob(#[from] BlobError),

    #[error("Cosmos DB configuration: {0}")]
    Cosmos(#[from] CosmosError),
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self, StartupError> {
        let http = services::http_client(
            settings
                .server
                .upstream_timeout_secs
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        )?;

        let blob_account = BlobAccount::from_connection_string(&settings.blob.connection_string)?;
        let cosmos_account = CosmosAccount::from_connection_string(&settings.cosmos.connection_string)?;

        Ok(Self {
            blob: Arc::new(BlobStorageClient::new(
                blob_account,
                settings.blob.container.clone(),
                http.clone(),
            )),
            cosmos: Arc::new(CosmosClient::new(
                cosmos_account,
                settings.cosmos.database.clone(),
                settings.cosmos.container.clone(),
                http.clone(),
            )),
            translator: Arc::new(TranslatorClient::new(
                settings.translator.endpoint.clone(),
                settings.translator.key.clone(),
                settings.translator.region.clone(),
                http.clone(),
            )),
            vision: Arc::new(VisionClient::new(
                settings.vision.url.clone(),
                settings.vision.key.clone(),
                settings.vision.threshold,
                http,
            )),
            advice: Arc::new(AdviceEngine::default()),
            index_file: PathBuf::from(&settings.frontend.dir).join(&settings.frontend.index),
        })
    }
}

/// JSON error for rejected request payloads
#[derive(Debug)]
pub struct JsonError {
    pub error: String,
    pub status_code: StatusCode,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code, self.error)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code).json(ErrorResponse::new(self.error.clone()))
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::warn!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: format!("Invalid JSON: {}", err),
        status_code: StatusCode::BAD_REQUEST,
    }
    .into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error));

    system::configure(cfg);
    profile::configure(cfg);
    media::configure(cfg);
    translate::configure(cfg);
    advice::configure(cfg);
}
