use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub frontend: FrontendSettings,
    #[serde(default)]
    pub blob: BlobSettings,
    #[serde(default)]
    pub cosmos: CosmosSettings,
    #[serde(default)]
    pub translator: TranslatorSettings,
    #[serde(default)]
    pub vision: VisionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    pub upstream_timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            upstream_timeout_secs: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

/// Where the front-end entry document lives
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendSettings {
    #[serde(default = "default_frontend_dir")]
    pub dir: String,
    #[serde(default = "default_frontend_index")]
    pub index: String,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            dir: default_frontend_dir(),
            index: default_frontend_index(),
        }
    }
}

fn default_frontend_dir() -> String { "frontend".to_string() }
fn default_frontend_index() -> String { "index.html".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct BlobSettings {
    #[serde(default = "default_blob_connection_string")]
    pub connection_string: String,
    #[serde(default = "default_blob_container")]
    pub container: String,
}

impl Default for BlobSettings {
    fn default() -> Self {
        Self {
            connection_string: default_blob_connection_string(),
            container: default_blob_container(),
        }
    }
}

fn default_blob_connection_string() -> String { "UseDevelopmentStorage=true".to_string() }
fn default_blob_container() -> String { "files".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CosmosSettings {
    #[serde(default = "default_cosmos_connection_string")]
    pub connection_string: String,
    #[serde(default = "default_cosmos_database")]
    pub database: String,
    #[serde(default = "default_cosmos_container")]
    pub container: String,
}

impl Default for CosmosSettings {
    fn default() -> Self {
        Self {
            connection_string: default_cosmos_connection_string(),
            database: default_cosmos_database(),
            container: default_cosmos_container(),
        }
    }
}

// Well-known key of the local Cosmos DB emulator
fn default_cosmos_connection_string() -> String {
    "AccountEndpoint=https://localhost:8081/;AccountKey=C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==;".to_string()
}
fn default_cosmos_database() -> String { "nutriai".to_string() }
fn default_cosmos_container() -> String { "userdata".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorSettings {
    #[serde(default = "default_translator_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_translator_region")]
    pub region: String,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            endpoint: default_translator_endpoint(),
            key: String::new(),
            region: default_translator_region(),
        }
    }
}

fn default_translator_endpoint() -> String {
    "https://api.cognitive.microsofttranslator.com/translate".to_string()
}
fn default_translator_region() -> String { "westeurope".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct VisionSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_vision_threshold")]
    pub threshold: f64,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            threshold: default_vision_threshold(),
        }
    }
}

fn default_vision_threshold() -> f64 { crate::models::RECOGNITION_THRESHOLD }

/// Environment variable names the deployment scripts already export,
/// mapped to the configuration key they override.
const AZURE_ENV_KEYS: &[(&str, &str)] = &[
    ("AZURE_BLOB_CONNECTION_STRING", "blob.connection_string"),
    ("AZURE_BLOB_CONTAINER", "blob.container"),
    ("AZURE_COSMOS_CONNECTION_STRING", "cosmos.connection_string"),
    ("AZURE_COSMOS_DB_NAME", "cosmos.database"),
    ("AZURE_COSMOS_CONTAINER_NAME", "cosmos.container"),
    ("AZURE_TRANSLATOR_ENDPOINT", "translator.endpoint"),
    ("AZURE_TRANSLATOR_KEY", "translator.key"),
    ("AZURE_TRANSLATOR_REGION", "translator.region"),
    ("AZURE_CUSTOM_VISION_URL", "vision.url"),
    ("AZURE_CUSTOM_VISION_KEY", "vision.key"),
];

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables prefixed with NUTRI (NUTRI__SERVER__PORT -> server.port)
    /// 4. The plain AZURE_* variables
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("NUTRI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_azure_overrides(settings, |name| std::env::var(name).ok())?;

        settings.try_deserialize()
    }
}

/// Layer the AZURE_* variables found by `lookup` on top of `settings`
fn apply_azure_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in AZURE_ENV_KEYS {
        if let Some(value) = lookup(var) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn empty_config() -> Config {
        Config::builder().build().unwrap()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let settings: Settings = apply_azure_overrides(empty_config(), |_| None)
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.blob.container, "files");
        assert_eq!(settings.cosmos.database, "nutriai");
        assert_eq!(settings.cosmos.container, "userdata");
        assert_eq!(settings.translator.region, "westeurope");
        assert_eq!(
            settings.translator.endpoint,
            "https://api.cognitive.microsofttranslator.com/translate"
        );
        assert_eq!(settings.vision.threshold, 0.7);
        assert_eq!(settings.frontend.index, "index.html");
    }

    #[test]
    fn test_azure_variables_override() {
        let env: HashMap<&str, &str> = [
            ("AZURE_BLOB_CONTAINER", "uploads"),
            ("AZURE_COSMOS_DB_NAME", "other-db"),
            ("AZURE_TRANSLATOR_KEY", "secret"),
            ("AZURE_CUSTOM_VISION_URL", "https://vision.test/classify"),
        ]
        .into_iter()
        .collect();

        let settings: Settings =
            apply_azure_overrides(empty_config(), |name| env.get(name).map(|v| v.to_string()))
                .unwrap()
                .try_deserialize()
                .unwrap();

        assert_eq!(settings.blob.container, "uploads");
        assert_eq!(settings.cosmos.database, "other-db");
        assert_eq!(settings.cosmos.container, "userdata");
        assert_eq!(settings.translator.key, "secret");
        assert_eq!(settings.vision.url, "https://vision.test/classify");
    }
}
