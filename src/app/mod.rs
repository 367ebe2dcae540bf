//! `TalkMapApp`: the top-level egui application state.
//!
//! This module declares the app struct and its constructor. Methods are
//! split across the sibling sub-modules:
//!
//! - `navigation`: page history, background fetches, click dispatch
//! - `toolbar`: home/back buttons, topic toggles, dark mode
//! - `content`: maps page and recording page

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use eframe::egui;

use talkmap::config::ViewerConfig;
use talkmap::engine::loader::TopicData;
use talkmap::engine::pipeline::RadialEngine;
use talkmap::model::{ImageRef, Item};
use talkmap::net::image::ImageLoader;
use talkmap::net::{FetchError, TalkSource};
use talkmap::render::paint::MapPainter;
use talkmap::render::scene::LayoutResult;

/// What the central panel shows
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// Topic picker only
    Home,
    /// One radial map per selected topic
    Maps,
    /// A single recording, by item id
    Recording(String),
}

static HOME: Page = Page::Home;

/// One laid-out topic on the maps page
pub struct TopicMap {
    pub data: TopicData,
    pub result: LayoutResult,
    pub painter: MapPainter,
}

/// Everything shown on the recording page
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub thumbnail: Option<ImageRef>,
    pub audio_url: Option<String>,
    pub transcript: Result<String, String>,
}

pub struct TalkMapApp {
    pub config: ViewerConfig,
    pub source: Arc<dyn TalkSource>,
    pub engine: RadialEngine,
    pub dark_mode: bool,
    pub error: Option<String>,

    // Topics offered by the server and the user's selection, in click order
    pub topics: Vec<String>,
    pub selected: Vec<String>,
    pub topics_rx: Option<mpsc::Receiver<Result<Vec<String>, FetchError>>>,

    // Maps page
    pub maps: Vec<TopicMap>,
    pub maps_loading: bool,
    pub maps_rx: Option<mpsc::Receiver<Vec<TopicData>>>,

    // Recording page
    pub recording: Option<RecordingView>,
    pub recording_rx: Option<mpsc::Receiver<RecordingView>>,

    // History; the last entry is the current page
    pub history: Vec<Page>,
    /// Set by the navigation host callback, consumed next frame
    pub pending_open: Option<String>,
    /// Item under the last click, taken from the map that was clicked
    pub clicked_item: Option<Item>,

    // Image loading
    pub image_loader: ImageLoader,
    pub image_textures: HashMap<String, egui::TextureHandle>,
}

impl TalkMapApp {
    pub fn new(config: ViewerConfig, source: Arc<dyn TalkSource>, engine: RadialEngine) -> Self {
        Self {
            dark_mode: config.dark_mode,
            image_loader: ImageLoader::new(Duration::from_secs(config.request_timeout_secs)),
            config,
            source,
            engine,
            error: None,
            topics: Vec::new(),
            selected: Vec::new(),
            topics_rx: None,
            maps: Vec::new(),
            maps_loading: false,
            maps_rx: None,
            recording: None,
            recording_rx: None,
            history: vec![Page::Home],
            pending_open: None,
            clicked_item: None,
            image_textures: HashMap::new(),
        }
    }

    pub fn current_page(&self) -> &Page {
        self.history.last().unwrap_or(&HOME)
    }

    /// Upload finished images as textures.
    fn upload_textures(&mut self, ctx: &egui::Context) {
        self.image_loader.poll();
        for key in self.image_loader.loaded_keys() {
            if self.image_textures.contains_key(&key) {
                continue;
            }
            if let Some(data) = self.image_loader.get(&key) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [data.width as usize, data.height as usize],
                    &data.rgba,
                );
                let tex = ctx.load_texture(format!("img_{}", key), image, egui::TextureOptions::LINEAR);
                self.image_textures.insert(key, tex);
            }
        }
    }
}

impl eframe::App for TalkMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_topics();
        self.check_maps();
        self.check_recording();

        if let Some(id) = self.pending_open.take() {
            self.open_recording(&id, ctx);
        }

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.upload_textures(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui, &ctx_clone);
        });
    }
}
