//! Image Payload
//!
//! The web client submits meal photos as data URLs produced by
//! `FileReader.readAsDataURL`, e.g. `data:image/jpeg;base64,/9j/4AAQ...`.
//! This module validates that envelope and decodes the body once so the
//! rest of the pipeline can rely on it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:image/";

/// A validated image submitted for analysis
#[derive(Debug, Clone)]
pub struct ImagePayload {
    data_url: String,
    media_type: String,
    body_start: usize,
    decoded_len: usize,
}

impl ImagePayload {
    /// Parse and validate a `data:image/...;base64,...` URL
    pub fn parse(data_url: &str) -> Result<Self, ImageError> {
        if !data_url.starts_with(DATA_URL_PREFIX) {
            return Err(ImageError::MissingMimePrefix);
        }

        let comma = data_url.find(',').ok_or(ImageError::MissingSeparator)?;
        let header = &data_url["data:".len()..comma];

        let mut parts = header.split(';');
        let media_type = parts.next().unwrap_or_default().trim();
        if media_type.len() <= "image/".len() {
            return Err(ImageError::MissingMimePrefix);
        }
        if !parts.any(|p| p.eq_ignore_ascii_case("base64")) {
            return Err(ImageError::NotBase64);
        }

        let body = &data_url[comma + 1..];
        let decoded = STANDARD
            .decode(body.trim())
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        if decoded.is_empty() {
            return Err(ImageError::Empty);
        }

        Ok(Self {
            data_url: data_url.to_string(),
            media_type: media_type.to_ascii_lowercase(),
            body_start: comma + 1,
            decoded_len: decoded.len(),
        })
    }

    /// Build a data URL from raw image bytes
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Result<Self, ImageError> {
        let data_url = format!("data:{};base64,{}", media_type, STANDARD.encode(bytes));
        Self::parse(&data_url)
    }

    /// The full data URL as submitted
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Media type from the header, e.g. `image/png`
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The base64 body without the `data:...,` header
    pub fn base64_body(&self) -> &str {
        self.data_url[self.body_start..].trim()
    }

    /// Size of the decoded image in bytes
    pub fn decoded_len(&self) -> usize {
        self.decoded_len
    }
}

/// Guess an image media type from a file extension
pub fn media_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Reasons an image payload is rejected
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("Image data doesn't have the expected MIME prefix")]
    MissingMimePrefix,

    #[error("Image data doesn't contain the expected base64 separator")]
    MissingSeparator,

    #[error("Image data is not base64 encoded")]
    NotBase64,

    #[error("Invalid base64 image data: {0}")]
    Decode(String),

    #[error("Image data is empty")]
    Empty,
}
