// Service exports
pub mod azure;
pub mod blob;
pub mod cosmos;
pub mod translator;
pub mod vision;

pub use blob::{BlobAccount, BlobError, BlobStorageClient};
pub use cosmos::{CosmosAccount, CosmosClient, CosmosError};
pub use translator::{TranslatorClient, TranslatorError};
pub use vision::{VisionClient, VisionError};

use reqwest::Client;
use std::time::Duration;

/// Outbound HTTP client shared by every service adapter
pub fn http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
