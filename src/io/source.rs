//! Image byte acquisition
//!
//! Decoding works on a complete in-memory buffer. This module turns the
//! ways an image can be referenced (data URI, http(s) URL, file path,
//! object URL) into that buffer.

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::errors::{MetadataError, MetadataResult};

lazy_static! {
    static ref DATA_URI: Regex = Regex::new(r"(?is)^data:([^,]*),(.*)$").expect("data URI pattern");
    static ref OBJECT_URL: Regex = Regex::new(r"(?i)^blob:").expect("object URL pattern");
    static ref HTTP_URL: Regex = Regex::new(r"(?i)^https?://").expect("URL pattern");
}

/// Where the image bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `data:` URI with a base64 payload
    DataUri(String),
    /// http or https URL
    Url(String),
    /// `blob:` URL, only resolvable inside the browser that created it
    ObjectUrl(String),
    /// File on the local filesystem
    Path(PathBuf),
    /// Bytes already in memory
    Bytes(Vec<u8>),
}

impl Source {
    /// Classifies a textual image reference
    pub fn parse(input: &str) -> Source {
        if DATA_URI.is_match(input) {
            Source::DataUri(input.to_string())
        } else if OBJECT_URL.is_match(input) {
            Source::ObjectUrl(input.to_string())
        } else if HTTP_URL.is_match(input) {
            Source::Url(input.to_string())
        } else {
            Source::Path(PathBuf::from(input))
        }
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Source::DataUri(uri) => format!("data URI ({} chars)", uri.len()),
            Source::Url(url) => url.clone(),
            Source::ObjectUrl(url) => url.clone(),
            Source::Path(path) => path.display().to_string(),
            Source::Bytes(bytes) => format!("{} bytes in memory", bytes.len()),
        }
    }
}

impl From<&str> for Source {
    fn from(input: &str) -> Self {
        Source::parse(input)
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

/// Loads the complete image buffer for `source`
///
/// # Returns
/// The bytes, or `SourceUnavailable` describing why they could not be loaded
pub async fn acquire_bytes(source: &Source) -> MetadataResult<Vec<u8>> {
    debug!("Acquiring bytes from {}", source.describe());

    let bytes = match source {
        Source::Bytes(bytes) => bytes.clone(),
        Source::DataUri(uri) => decode_data_uri(uri)?,
        Source::Url(url) => fetch(url).await?,
        Source::Path(path) => tokio::fs::read(path)
            .await
            .map_err(|e| MetadataError::SourceUnavailable(format!("{}: {}", path.display(), e)))?,
        Source::ObjectUrl(url) => {
            return Err(MetadataError::SourceUnavailable(format!(
                "object URL {} can only be resolved by the browser that created it",
                url
            )))
        }
    };

    info!("Loaded {} bytes from {}", bytes.len(), source.describe());
    Ok(bytes)
}

/// Decodes the base64 payload of a data URI
pub fn decode_data_uri(uri: &str) -> MetadataResult<Vec<u8>> {
    let captures = DATA_URI
        .captures(uri)
        .ok_or_else(|| MetadataError::SourceUnavailable("not a data URI".to_string()))?;
    let header = captures.get(1).map_or("", |m| m.as_str());
    let payload = captures.get(2).map_or("", |m| m.as_str());

    if !header.to_ascii_lowercase().ends_with(";base64") {
        return Err(MetadataError::SourceUnavailable(format!(
            "data URI is not base64 encoded: data:{}",
            header
        )));
    }

    BASE64
        .decode(payload.trim())
        .map_err(|e| MetadataError::SourceUnavailable(format!("invalid base64 payload: {}", e)))
}

async fn fetch(url: &str) -> MetadataResult<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| MetadataError::SourceUnavailable(format!("{}: {}", url, e)))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(MetadataError::SourceUnavailable(format!("{}: HTTP {}", url, status)));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| MetadataError::SourceUnavailable(format!("{}: {}", url, e)))?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_sources() {
        assert!(matches!(Source::parse("data:image/jpeg;base64,/9g="), Source::DataUri(_)));
        assert!(matches!(Source::parse("DATA:image/jpeg;base64,/9g="), Source::DataUri(_)));
        assert!(matches!(Source::parse("blob:https://example.com/1234"), Source::ObjectUrl(_)));
        assert!(matches!(Source::parse("https://example.com/a.jpg"), Source::Url(_)));
        assert!(matches!(Source::parse("HTTP://example.com/a.jpg"), Source::Url(_)));
        assert_eq!(Source::parse("photos/a.jpg"), Source::Path(PathBuf::from("photos/a.jpg")));
    }

    #[test]
    fn test_decode_data_uri() {
        assert_eq!(decode_data_uri("data:image/jpeg;base64,/9j/4A==").unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(decode_data_uri("data:;BASE64,AAE=").unwrap(), vec![0x00, 0x01]);
    }

    #[test]
    fn test_data_uri_without_base64_is_rejected() {
        assert!(matches!(
            decode_data_uri("data:text/plain,hello"),
            Err(MetadataError::SourceUnavailable(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/jpeg;base64,not base64!"),
            Err(MetadataError::SourceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_acquire_from_data_uri() {
        let bytes = acquire_bytes(&Source::parse("data:image/jpeg;base64,/9j/2Q==")).await.unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[tokio::test]
    async fn test_acquire_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

        let source = Source::Path(file.path().to_path_buf());
        assert_eq!(acquire_bytes(&source).await.unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source::Path(dir.path().join("missing.jpg"));

        assert!(matches!(acquire_bytes(&source).await, Err(MetadataError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_object_url_is_unavailable() {
        let source = Source::parse("blob:https://example.com/1234");
        assert!(matches!(acquire_bytes(&source).await, Err(MetadataError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_bytes_are_passed_through() {
        let source = Source::from(vec![1, 2, 3]);
        assert_eq!(acquire_bytes(&source).await.unwrap(), vec![1, 2, 3]);
    }
}
