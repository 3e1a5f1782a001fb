use crate::error::{Result, WhiskError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One entry of the user history listing. The service omits fields freely,
/// so everything is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaItem {
    pub media_key: Option<String>,
    pub workflow_id: Option<String>,
    pub prompt: Option<String>,
    pub created_at: Option<String>,
}

/// A single stored image as returned by the media fetch endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaImage {
    pub media_key: Option<String>,
    pub encoded_image: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
}

impl MediaImage {
    /// Decode the base64 payload and write the raw bytes to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let encoded = self.encoded_image.as_deref().ok_or_else(|| {
            WhiskError::Precondition("media image has no encoded payload".into())
        })?;

        save_base64_image(encoded, path)
    }
}

/// Write a base64-encoded image string to a file as raw bytes.
pub fn save_base64_image(encoded: &str, path: impl AsRef<Path>) -> Result<()> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| WhiskError::Decode(format!("invalid base64 image data: {}", e)))?;

    fs::write(path.as_ref(), bytes)
        .map_err(|e| WhiskError::Io(format!("failed to write {}: {}", path.as_ref().display(), e)))
}
