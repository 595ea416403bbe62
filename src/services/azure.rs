//! Pieces shared by the Azure storage clients: connection string parsing,
//! request dates and HMAC-SHA256 shared-key signatures.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors raised while reading a connection string or its key
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("missing `{0}` in connection string")]
    MissingKey(&'static str),

    #[error("malformed segment `{0}` in connection string")]
    Malformed(String),

    #[error("account key is not valid base64")]
    InvalidAccountKey,
}

/// `Key=Value;Key=Value` pairs with case-insensitive keys
#[derive(Debug, Clone, Default)]
pub struct ConnectionString {
    pairs: HashMap<String, String>,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self, ConnectionStringError> {
        let mut pairs = HashMap::new();

        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            // Values (keys, SAS tokens) may contain '=' themselves
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::Malformed(segment.to_string()))?;
            pairs.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }

        Ok(Self { pairs })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn require(&self, key: &'static str) -> Result<&str, ConnectionStringError> {
        self.get(key).ok_or(ConnectionStringError::MissingKey(key))
    }
}

/// Decode a base64 account key
pub fn decode_key(key: &str) -> Result<Vec<u8>, ConnectionStringError> {
    STANDARD
        .decode(key.trim())
        .map_err(|_| ConnectionStringError::InvalidAccountKey)
}

/// Base64 HMAC-SHA256 of `message` under `key`
pub fn sign(key: &[u8], message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Current time in the RFC 1123 form the storage APIs expect
pub fn http_date() -> String {
    format_http_date(chrono::Utc::now())
}

pub fn format_http_date(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_keeps_equals_in_values() {
        let cs = ConnectionString::parse(
            "AccountEndpoint=https://acct.documents.azure.com:443/;AccountKey=abc==;",
        )
        .unwrap();

        assert_eq!(cs.get("accountendpoint"), Some("https://acct.documents.azure.com:443/"));
        assert_eq!(cs.get("AccountKey"), Some("abc=="));
        assert_eq!(cs.get("Missing"), None);
    }

    #[test]
    fn test_parse_rejects_segment_without_equals() {
        let err = ConnectionString::parse("AccountName=a;garbage").unwrap_err();
        assert_eq!(err, ConnectionStringError::Malformed("garbage".to_string()));
    }

    #[test]
    fn test_require_reports_key() {
        let cs = ConnectionString::parse("AccountName=a").unwrap();
        assert_eq!(
            cs.require("AccountKey").unwrap_err(),
            ConnectionStringError::MissingKey("AccountKey")
        );
    }

    #[test]
    fn test_decode_key() {
        assert_eq!(decode_key("a2V5").unwrap(), b"key");
        assert_eq!(decode_key("not base64!").unwrap_err(), ConnectionStringError::InvalidAccountKey);
    }

    #[test]
    fn test_sign_known_vector() {
        // RFC 4231 test case 2
        let sig = sign(b"Jefe", "what do ya want for nothing?");
        let expected = STANDARD.encode(
            [
                0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95,
                0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9,
                0x64, 0xec, 0x38, 0x43,
            ],
        );
        assert_eq!(sig, expected);
    }

    #[test]
    fn test_http_date_format() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(format_http_date(at), "Tue, 05 Mar 2024 07:08:09 GMT");
    }
}
