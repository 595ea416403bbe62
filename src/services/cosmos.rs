use crate::models::UserProfile;
use crate::services::azure::{self, ConnectionString, ConnectionStringError};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use thiserror::Error;

const COSMOS_API_VERSION: &str = "2018-12-31";

/// Errors that can occur when interacting with Cosmos DB
#[derive(Debug, Error)]
pub enum CosmosError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("A document with id `{0}` already exists")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cosmos DB returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(#[from] ConnectionStringError),
}

/// Cosmos DB account endpoint and master key
#[derive(Clone)]
pub struct CosmosAccount {
    pub endpoint: String,
    key: Vec<u8>,
}

impl std::fmt::Debug for CosmosAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosAccount")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl CosmosAccount {
    pub fn from_connection_string(raw: &str) -> Result<Self, CosmosError> {
        let cs = ConnectionString::parse(raw)?;
        let endpoint = cs.require("AccountEndpoint")?.trim_end_matches('/').to_string();
        let key = azure::decode_key(cs.require("AccountKey")?)?;

        Ok(Self { endpoint, key })
    }
}

/// Cosmos DB client for the profile container
///
/// The container is expected to be partitioned on `/id`.
pub struct CosmosClient {
    account: CosmosAccount,
    database: String,
    container: String,
    client: Client,
}

impl CosmosClient {
    pub fn new(account: CosmosAccount, database: String, container: String, client: Client) -> Self {
        Self {
            account,
            database,
            container,
            client,
        }
    }

    fn collection_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    /// Attach the master-key authorization for `verb` on `resource_link`
    fn authorize(
        &self,
        request: RequestBuilder,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        partition_key: &str,
    ) -> RequestBuilder {
        let date = azure::http_date();
        let token = master_key_token(&self.account.key, verb, resource_type, resource_link, &date);

        request
            .header("authorization", token)
            .header("x-ms-date", date)
            .header("x-ms-version", COSMOS_API_VERSION)
            .header("x-ms-documentdb-partitionkey", partition_key_header(partition_key))
    }

    /// Create a profile document; an existing id is reported as `Conflict`
    pub async fn create_profile(&self, profile: &UserProfile) -> Result<(), CosmosError> {
        let link = self.collection_link();
        let url = format!("{}/{}/docs", self.account.endpoint, link);

        tracing::debug!("Creating document {} in {}", profile.id, link);

        let request = self.authorize(self.client.post(&url), "post", "docs", &link, &profile.id);
        let response = request.json(profile).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(CosmosError::Conflict(profile.id.clone())),
            status => {
                let message = error_message(response).await;
                Err(CosmosError::ApiError(format!("{}: {}", status, message)))
            }
        }
    }

    /// Read a profile document by id
    pub async fn get_profile(&self, id: &str) -> Result<UserProfile, CosmosError> {
        let link = format!("{}/docs/{}", self.collection_link(), id);
        let url = format!(
            "{}/{}/docs/{}",
            self.account.endpoint,
            self.collection_link(),
            urlencoding::encode(id)
        );

        let request = self.authorize(self.client.get(&url), "get", "docs", &link, id);
        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => {
                let json: Value = response.json().await?;
                serde_json::from_value(json)
                    .map_err(|e| CosmosError::InvalidResponse(format!("Failed to parse profile: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(CosmosError::NotFound(format!("Profile {} not found", id))),
            status => {
                let message = error_message(response).await;
                Err(CosmosError::ApiError(format!("{}: {}", status, message)))
            }
        }
    }
}

/// Pull the `message` field out of a Cosmos error body, falling back to the raw text
async fn error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());

    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body)
}

/// JSON array holding the partition key, with non-ASCII characters as `\uXXXX` escapes
fn partition_key_header(partition_key: &str) -> String {
    let json = serde_json::json!([partition_key]).to_string();
    let mut header = String::with_capacity(json.len());
    let mut units = [0u16; 2];

    for c in json.chars() {
        if c.is_ascii() {
            header.push(c);
        } else {
            for unit in c.encode_utf16(&mut units).iter() {
                header.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }

    header
}

/// URL-encoded `type=master&ver=1.0&sig=...` authorization token
fn master_key_token(
    key: &[u8],
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> String {
    let payload = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase()
    );
    let signature = azure::sign(key, &payload);

    urlencoding::encode(&format!("type=master&ver=1.0&sig={}", signature)).into_owned()
}
