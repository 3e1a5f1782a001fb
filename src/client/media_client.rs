use crate::{
    client::{decode_trpc, Backend},
    error::{Result, WhiskError},
    models::{MediaImage, MediaItem},
};
use reqwest::Method;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

/// Operations on stored media: history listing, fetch, delete, and local
/// persistence of decoded image bytes.
#[derive(Clone)]
pub struct MediaClient {
    backend: Arc<Backend>,
}

impl MediaClient {
    pub(crate) fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    /// List the most recent generations, newest first.
    pub async fn history(&self, limit: u32) -> Result<Vec<MediaItem>> {
        if limit == 0 {
            return Err(WhiskError::Precondition(
                "history limit must be positive".into(),
            ));
        }

        let filter = json!({"json": {"limit": limit, "tool": "BACKBONE"}});
        let url = format!(
            "{}?input={}",
            self.backend.trpc_url("media.fetchUserHistory"),
            urlencoding::encode(&filter.to_string())
        );

        let raw = self
            .backend
            .transport
            .execute(Method::GET, &url, &self.backend.cookie_headers(), None)
            .await?;

        let value = decode_trpc("media.fetchUserHistory", &raw)?;

        let items = value
            .pointer("/result/media")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                WhiskError::Decode(format!(
                    "media.fetchUserHistory: response has no media array: {}",
                    raw
                ))
            })?;

        items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).map_err(|e| {
                    WhiskError::Decode(format!(
                        "media.fetchUserHistory: malformed media entry ({}): {}",
                        e, item
                    ))
                })
            })
            .collect()
    }

    /// Fetch a single stored image by its media key.
    pub async fn fetch(&self, media_key: &str) -> Result<MediaImage> {
        if media_key.trim().is_empty() {
            return Err(WhiskError::Precondition("media key is empty".into()));
        }

        let filter = json!({"json": {"mediaKey": media_key}});
        let url = format!(
            "{}?input={}",
            self.backend.trpc_url("media.fetchMedia"),
            urlencoding::encode(&filter.to_string())
        );

        let raw = self
            .backend
            .transport
            .execute(Method::GET, &url, &self.backend.cookie_headers(), None)
            .await?;

        let value = decode_trpc("media.fetchMedia", &raw)?;

        let image = value.pointer("/result/image").ok_or_else(|| {
            WhiskError::Decode(format!(
                "media.fetchMedia: response has no image object: {}",
                raw
            ))
        })?;

        serde_json::from_value(image.clone()).map_err(|e| {
            WhiskError::Decode(format!(
                "media.fetchMedia: malformed image object ({}): {}",
                e, raw
            ))
        })
    }

    pub async fn delete(&self, media_key: &str) -> Result<()> {
        if media_key.trim().is_empty() {
            return Err(WhiskError::Precondition("media key is empty".into()));
        }

        log::info!("Deleting media: {}", media_key);

        let body = json!({"json": {"mediaKey": media_key}});

        let raw = self
            .backend
            .transport
            .execute(
                Method::POST,
                &self.backend.trpc_url("media.deleteMedia"),
                &self.backend.cookie_headers(),
                Some(body.to_string()),
            )
            .await?;

        decode_trpc("media.deleteMedia", &raw)?;
        Ok(())
    }

    /// Fetch an image and write its decoded bytes to `path`.
    pub async fn download(&self, media_key: &str, path: impl AsRef<Path>) -> Result<()> {
        let image = self.fetch(media_key).await?;
        image.save_to_file(path)
    }
}
