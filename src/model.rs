//! Talk data handed to the layout engine.

use std::sync::Arc;

use url::Url;

/// Transcript extension stripped from server filenames to form item ids.
const TRANSCRIPT_EXT: &str = ".stm";

/// Opaque image handle.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    /// Image served at a URL (recording thumbnails).
    Url(String),
    /// Encoded image bytes already in memory (topic images arrive as a
    /// POST response body). `key` identifies the image for caching.
    Bytes { key: String, data: Arc<[u8]> },
}

impl ImageRef {
    pub fn bytes(key: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        ImageRef::Bytes {
            key: key.into(),
            data: data.into(),
        }
    }

    /// Stable cache key (texture name, loader key).
    pub fn key(&self) -> &str {
        match self {
            ImageRef::Url(url) => url,
            ImageRef::Bytes { key, .. } => key,
        }
    }
}

/// One child recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Filename-derived key (transcript name without `.stm`).
    pub id: String,
    pub image: Option<ImageRef>,
    pub category: String,
}

impl Item {
    pub fn new(id: impl Into<String>, image: Option<ImageRef>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image,
            category: category.into(),
        }
    }

    /// Build an item from a transcript filename listed by the server.
    /// The thumbnail lives at `<server>/images/<id>`.
    pub fn from_filename(filename: &str, category: &str, server: &Url) -> Self {
        let id = filename.replacen(TRANSCRIPT_EXT, "", 1);
        let image = image_url(server, &id).map(ImageRef::Url);
        if image.is_none() {
            log::warn!("cannot build image url for {} on {}", id, server);
        }
        Self {
            id,
            image,
            category: category.to_string(),
        }
    }
}

/// `<server>/images/<id>` with `id` percent-encoded as a single segment.
pub fn image_url(server: &Url, id: &str) -> Option<String> {
    let mut url = server.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push("images")
        .push(id);
    Some(url.to_string())
}

/// The topic node.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralNode {
    pub label: String,
    pub image: Option<ImageRef>,
}

impl CentralNode {
    pub fn new(label: impl Into<String>, image: Option<ImageRef>) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }
}
