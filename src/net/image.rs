//! Background image loading.
//!
//! Thumbnails are downloaded and topic images decoded on worker threads;
//! the results come back over channels as RGBA buffers ready for texture
//! upload.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;
use std::time::Duration;

use crate::model::ImageRef;

/// Longest side of a decoded image. Nodes are at most 150px across.
pub const MAX_IMAGE_SIDE: u32 = 256;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Manages background image fetching and decoding, keyed by
/// [`ImageRef::key`].
pub struct ImageLoader {
    timeout: Duration,
    pending: HashMap<String, mpsc::Receiver<Option<ImageData>>>,
    loaded: HashMap<String, ImageData>,
    failed: HashSet<String>,
}

impl ImageLoader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Request an image in the background. Repeated requests are no-ops.
    pub fn request(&mut self, image: &ImageRef) {
        let key = image.key();
        if self.loaded.contains_key(key) || self.pending.contains_key(key) || self.failed.contains(key)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let image = image.clone();
        let timeout = self.timeout;

        std::thread::spawn(move || {
            let result = match &image {
                ImageRef::Url(url) => fetch_and_decode(url, timeout),
                ImageRef::Bytes { data, .. } => decode(data),
            };
            if result.is_none() {
                log::warn!("could not load image {}", image.key());
            }
            let _ = tx.send(result);
        });

        self.pending.insert(key.to_string(), rx);
    }

    /// Collect finished loads. Call every frame.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        for (key, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Some(data)) => {
                    self.loaded.insert(key.clone(), data);
                    completed.push(key.clone());
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                    self.failed.insert(key.clone());
                    completed.push(key.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for key in completed {
            self.pending.remove(&key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ImageData> {
        self.loaded.get(key)
    }

    pub fn loaded_keys(&self) -> Vec<String> {
        self.loaded.keys().cloned().collect()
    }

    pub fn has_failed(&self, key: &str) -> bool {
        self.failed.contains(key)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn fetch_and_decode(url: &str, timeout: Duration) -> Option<ImageData> {
    let resp = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .ok()?
        .get(url)
        .send()
        .ok()?;

    if !resp.status().is_success() {
        return None;
    }

    let bytes = resp.bytes().ok()?;
    decode(&bytes)
}

/// Decode encoded image bytes, shrinking anything larger than
/// [`MAX_IMAGE_SIDE`].
pub fn decode(bytes: &[u8]) -> Option<ImageData> {
    let img = image::load_from_memory(bytes).ok()?;
    let img = if img.width() > MAX_IMAGE_SIDE || img.height() > MAX_IMAGE_SIDE {
        img.thumbnail(MAX_IMAGE_SIDE, MAX_IMAGE_SIDE)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Some(ImageData {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
