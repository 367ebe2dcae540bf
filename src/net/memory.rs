//! In-memory [`TalkSource`] for tests and offline demos.

use std::collections::{BTreeMap, HashMap};

use crate::model::{ImageRef, Item};
use crate::net::fetch::{FetchError, TalkSource};

#[derive(Debug, Clone, Default)]
struct Recording {
    title: Option<String>,
    transcript: String,
}

/// Topics and recordings held in maps. Unknown topics answer with HTTP 404
/// like the real server.
#[derive(Debug, Clone, Default)]
pub struct MemoryTalkSource {
    topics: BTreeMap<String, Vec<Item>>,
    central_images: HashMap<String, ImageRef>,
    recordings: HashMap<String, Recording>,
    /// Topics whose item listing fails
    broken: Vec<String>,
    /// Topics whose image request fails
    broken_images: Vec<String>,
}

impl MemoryTalkSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, topic: &str, items: Vec<Item>) -> Self {
        self.topics.insert(topic.to_string(), items);
        self
    }

    pub fn with_central_image(mut self, topic: &str, image: ImageRef) -> Self {
        self.central_images.insert(topic.to_string(), image);
        self
    }

    pub fn with_recording(mut self, id: &str, title: Option<&str>, transcript: &str) -> Self {
        self.recordings.insert(
            id.to_string(),
            Recording {
                title: title.map(str::to_string),
                transcript: transcript.to_string(),
            },
        );
        self
    }

    /// Make item listing for `topic` fail with a server error.
    pub fn with_broken_topic(mut self, topic: &str) -> Self {
        self.broken.push(topic.to_string());
        self
    }

    /// Make the topic image request for `topic` fail with a server error.
    pub fn with_broken_central_image(mut self, topic: &str) -> Self {
        self.broken_images.push(topic.to_string());
        self
    }

    fn not_found(what: &str) -> FetchError {
        FetchError::Status {
            status: 404,
            url: format!("memory://{}", what),
        }
    }
}

impl TalkSource for MemoryTalkSource {
    fn fetch_topics(&self) -> Result<Vec<String>, FetchError> {
        Ok(self.topics.keys().cloned().collect())
    }

    fn fetch_central_image(&self, topic: &str) -> Result<Option<ImageRef>, FetchError> {
        if self.broken_images.iter().any(|t| t == topic) {
            return Err(FetchError::Status {
                status: 500,
                url: format!("memory://data/central-image/{}", topic),
            });
        }
        Ok(self.central_images.get(topic).cloned())
    }

    fn fetch_child_items(&self, topic: &str) -> Result<Vec<Item>, FetchError> {
        if self.broken.iter().any(|t| t == topic) {
            return Err(FetchError::Status {
                status: 500,
                url: format!("memory://data/categories/{}", topic),
            });
        }
        Ok(self.topics.get(topic).cloned().unwrap_or_default())
    }

    fn fetch_title(&self, id: &str) -> Result<String, FetchError> {
        Ok(self
            .recordings
            .get(id)
            .and_then(|r| r.title.clone())
            .unwrap_or_else(|| id.to_string()))
    }

    fn fetch_transcript(&self, id: &str) -> Result<String, FetchError> {
        self.recordings
            .get(id)
            .map(|r| r.transcript.clone())
            .ok_or_else(|| Self::not_found(&format!("get-stm/{}", id)))
    }

    fn audio_url(&self, id: &str) -> Option<String> {
        Some(format!("memory://get-mp3/{}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_title_echoes_id() {
        let source = MemoryTalkSource::new().with_recording("talk_1", Some("On Stars"), "text");
        assert_eq!(source.fetch_title("talk_1").unwrap(), "On Stars");
        assert_eq!(source.fetch_title("talk_2").unwrap(), "talk_2");
    }

    #[test]
    fn unknown_topic_is_empty() {
        let source = MemoryTalkSource::new().with_topic("Physics", vec![Item::new("a", None, "Physics")]);
        assert_eq!(source.fetch_topics().unwrap(), vec!["Physics"]);
        assert!(source.fetch_child_items("Biology").unwrap().is_empty());
        assert!(source.fetch_central_image("Physics").unwrap().is_none());
    }

    #[test]
    fn broken_central_image_errors() {
        let source = MemoryTalkSource::new()
            .with_central_image("Physics", ImageRef::bytes("central:Physics", vec![0u8; 4]))
            .with_broken_central_image("Physics");
        assert!(matches!(
            source.fetch_central_image("Physics"),
            Err(FetchError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn missing_transcript_is_not_found() {
        let source = MemoryTalkSource::new();
        assert!(matches!(
            source.fetch_transcript("x"),
            Err(FetchError::Status { status: 404, .. })
        ));
    }
}
