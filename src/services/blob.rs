use crate::models::UploadedFile;
use crate::services::azure::{self, ConnectionString, ConnectionStringError};
use reqwest::{Client, Url};
use thiserror::Error;

const STORAGE_API_VERSION: &str = "2021-08-06";

// Azurite's published development account
const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// Errors that can occur when interacting with Blob Storage
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Blob Storage returned error: {0}")]
    ApiError(String),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(#[from] ConnectionStringError),

    #[error("Invalid blob endpoint: {0}")]
    InvalidEndpoint(String),
}

/// How requests are authorized against the storage account
#[derive(Clone)]
pub enum BlobCredential {
    SharedKey(Vec<u8>),
    /// SAS token, without the leading '?'
    Sas(String),
}

impl std::fmt::Debug for BlobCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobCredential::SharedKey(_) => f.write_str("SharedKey(..)"),
            BlobCredential::Sas(_) => f.write_str("Sas(..)"),
        }
    }
}

/// Storage account coordinates read from a connection string
#[derive(Debug, Clone)]
pub struct BlobAccount {
    pub name: String,
    pub endpoint: Url,
    pub credential: BlobCredential,
}

impl BlobAccount {
    pub fn from_connection_string(raw: &str) -> Result<Self, BlobError> {
        let cs = ConnectionString::parse(raw)?;

        if cs
            .get("UseDevelopmentStorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Ok(Self {
                name: DEV_ACCOUNT_NAME.to_string(),
                endpoint: parse_endpoint(DEV_BLOB_ENDPOINT)?,
                credential: BlobCredential::SharedKey(azure::decode_key(DEV_ACCOUNT_KEY)?),
            });
        }

        let credential = match (cs.get("AccountKey"), cs.get("SharedAccessSignature")) {
            (Some(key), _) => BlobCredential::SharedKey(azure::decode_key(key)?),
            (None, Some(sas)) => BlobCredential::Sas(sas.trim_start_matches('?').to_string()),
            (None, None) => return Err(ConnectionStringError::MissingKey("AccountKey").into()),
        };

        let endpoint = match cs.get("BlobEndpoint") {
            Some(endpoint) => parse_endpoint(endpoint)?,
            None => {
                let account = cs.require("AccountName")?;
                let protocol = cs.get("DefaultEndpointsProtocol").unwrap_or("https");
                let suffix = cs.get("EndpointSuffix").unwrap_or("core.windows.net");
                parse_endpoint(&format!("{}://{}.blob.{}", protocol, account, suffix))?
            }
        };

        // Shared keys sign with the account name; a SAS can work without it
        let name = match (cs.get("AccountName"), &credential) {
            (Some(name), _) => name.to_string(),
            (None, BlobCredential::Sas(_)) => endpoint
                .host_str()
                .and_then(|host| host.split('.').next())
                .unwrap_or_default()
                .to_string(),
            (None, BlobCredential::SharedKey(_)) => {
                return Err(ConnectionStringError::MissingKey("AccountName").into())
            }
        };

        Ok(Self {
            name,
            endpoint,
            credential,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, BlobError> {
    Url::parse(raw.trim_end_matches('/')).map_err(|e| BlobError::InvalidEndpoint(format!("{}: {}", raw, e)))
}

/// Blob Storage client scoped to a single container
pub struct BlobStorageClient {
    account: BlobAccount,
    container: String,
    client: Client,
}

impl BlobStorageClient {
    pub fn new(account: BlobAccount, container: String, client: Client) -> Self {
        Self {
            account,
            container,
            client,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// URL-encoded path of a blob below the account endpoint
    fn blob_path(&self, blob_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.account.endpoint.path().trim_end_matches('/'),
            self.container,
            urlencoding::encode(blob_name)
        )
    }

    /// Upload a file as a block blob, replacing any blob with the same name
    pub async fn upload(&self, file: &UploadedFile) -> Result<(), BlobError> {
        let path = self.blob_path(&file.filename);
        let date = azure::http_date();
        let request_id = uuid::Uuid::new_v4().to_string();
        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let base = format!("{}{}", self.account.endpoint.origin().ascii_serialization(), path);
        let url = match &self.account.credential {
            BlobCredential::Sas(token) => format!("{}?{}", base, token),
            BlobCredential::SharedKey(_) => base,
        };

        let mut request = self
            .client
            .put(&url)
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-client-request-id", &request_id)
            .header("x-ms-date", &date)
            .header("x-ms-version", STORAGE_API_VERSION)
            .header("Content-Type", &content_type);

        if let BlobCredential::SharedKey(key) = &self.account.credential {
            let string_to_sign = shared_key_string_to_sign(
                "PUT",
                file.content.len(),
                &content_type,
                &[
                    ("x-ms-blob-type", "BlockBlob"),
                    ("x-ms-client-request-id", request_id.as_str()),
                    ("x-ms-date", date.as_str()),
                    ("x-ms-version", STORAGE_API_VERSION),
                ],
                &format!("/{}{}", self.account.name, path),
            );
            request = request.header(
                "Authorization",
                format!("SharedKey {}:{}", self.account.name, azure::sign(key, &string_to_sign)),
            );
        }

        tracing::debug!(
            "Uploading {} ({} bytes) to container {} [request {}]",
            file.filename,
            file.content.len(),
            self.container,
            request_id
        );

        let response = request.body(file.content.clone()).send().await?;

        if !response.status().is_success() {
            return Err(BlobError::ApiError(format!(
                "Failed to upload blob {}: {}",
                file.filename,
                response.status()
            )));
        }

        Ok(())
    }
}

/// Shared Key string-to-sign for a request without conditional or range headers
///
/// `ms_headers` must already be sorted by name.
fn shared_key_string_to_sign(
    verb: &str,
    content_length: usize,
    content_type: &str,
    ms_headers: &[(&str, &str)],
    canonical_resource: &str,
) -> String {
    let length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };

    let canonical_headers: String = ms_headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
        .collect();

    // Verb, Content-Encoding, Content-Language, Content-Length, Content-MD5,
    // Content-Type, Date, If-Modified-Since, If-Match, If-None-Match,
    // If-Unmodified-Since, Range
    format!(
        "{}\n\n\n{}\n\n{}\n\n\n\n\n\n\n{}{}",
        verb, length, content_type, canonical_headers, canonical_resource
    )
}
