//! Talk server client.
//!
//! The server lists topics, the transcripts filed under each topic, one
//! topic image per topic and a thumbnail, title, transcript and audio file
//! per recording. All calls are blocking; callers run them off the UI
//! thread.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::ViewerConfig;
use crate::model::{ImageRef, Item};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0} cannot be used as a server base url")]
    NotABase(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("cannot decode response: {0}")]
    Decode(String),
}

/// Where topic maps get their data from.
pub trait TalkSource: Send + Sync {
    fn fetch_topics(&self) -> Result<Vec<String>, FetchError>;

    /// `Ok(None)` when the topic has no image.
    fn fetch_central_image(&self, topic: &str) -> Result<Option<ImageRef>, FetchError>;

    fn fetch_child_items(&self, topic: &str) -> Result<Vec<Item>, FetchError>;

    /// Display title; the server echoes the id for unknown recordings.
    fn fetch_title(&self, id: &str) -> Result<String, FetchError>;

    fn fetch_transcript(&self, id: &str) -> Result<String, FetchError>;

    /// Link to the recording's audio. Not fetched.
    fn audio_url(&self, id: &str) -> Option<String>;
}

#[derive(Deserialize)]
struct TopicList {
    categories: Vec<String>,
}

/// Blocking HTTP client for the talk server
pub struct HttpTalkSource {
    base: Url,
    client: Client,
}

impl HttpTalkSource {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(server_url)?;
        if base.cannot_be_a_base() {
            return Err(FetchError::NotABase(server_url.to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!("talkmap/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { base, client })
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.server_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::NotABase(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn by_filename(&self, path: &str, id: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&[path])?;
        url.query_pairs_mut().append_pair("filename", id);
        Ok(url)
    }

    fn topic_body(topic: &str) -> serde_json::Value {
        serde_json::json!({ "categories": [topic] })
    }
}

fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

/// Transcripts come back with stray double quotes around and inside the
/// text.
pub fn clean_transcript(raw: &str) -> String {
    raw.replace('"', "")
}

/// Transcript filenames for a topic, as returned by `/data/categories`.
pub fn parse_filenames(body: &str) -> Result<Vec<String>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

impl TalkSource for HttpTalkSource {
    fn fetch_topics(&self) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(&["data"])?;
        let response = check_status(self.client.get(url).send()?)?;
        let list: TopicList = response.json()?;
        log::debug!("server lists {} topics", list.categories.len());
        Ok(list.categories)
    }

    fn fetch_central_image(&self, topic: &str) -> Result<Option<ImageRef>, FetchError> {
        let url = self.endpoint(&["data", "central-image"])?;
        let response = self
            .client
            .post(url)
            .json(&Self::topic_body(topic))
            .send()?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("no topic image for {}", topic);
            return Ok(None);
        }
        let bytes = check_status(response)?.bytes()?;
        Ok(Some(ImageRef::bytes(format!("central:{}", topic), bytes.to_vec())))
    }

    fn fetch_child_items(&self, topic: &str) -> Result<Vec<Item>, FetchError> {
        let url = self.endpoint(&["data", "categories"])?;
        let response = check_status(
            self.client
                .post(url)
                .json(&Self::topic_body(topic))
                .send()?,
        )?;
        let filenames = parse_filenames(&response.text()?)?;
        Ok(filenames
            .iter()
            .map(|name| Item::from_filename(name, topic, &self.base))
            .collect())
    }

    fn fetch_title(&self, id: &str) -> Result<String, FetchError> {
        let url = self.by_filename("get-title", id)?;
        let response = check_status(self.client.get(url).send()?)?;
        Ok(response.text()?.trim().to_string())
    }

    fn fetch_transcript(&self, id: &str) -> Result<String, FetchError> {
        let url = self.by_filename("get-stm", id)?;
        let response = check_status(self.client.get(url).send()?)?;
        Ok(clean_transcript(&response.text()?))
    }

    fn audio_url(&self, id: &str) -> Option<String> {
        self.by_filename("get-mp3", id).ok().map(String::from)
    }
}
