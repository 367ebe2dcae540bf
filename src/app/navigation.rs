//! Navigation methods for `TalkMapApp`.
//!
//! Covers page history (`go_home`, `go_back`, `open_recording`), the
//! background fetch lifecycle for topics, maps and recordings, and routing
//! map clicks through the navigation dispatcher.

use std::sync::{mpsc, Arc};

use eframe::egui;

use talkmap::engine::loader::{load_topics, sort_topics};
use talkmap::engine::navigation::{dispatch, NavigationHost};
use talkmap::model::Item;
use talkmap::render::paint::MapPainter;

use super::{Page, RecordingView, TalkMapApp, TopicMap};

impl NavigationHost for TalkMapApp {
    fn on_item_activated(&mut self, item_id: &str) {
        self.pending_open = Some(item_id.to_string());
    }
}

impl TalkMapApp {
    /// Return to the topic picker and clear the selection.
    pub fn go_home(&mut self) {
        self.selected.clear();
        self.maps.clear();
        self.maps_rx = None;
        self.maps_loading = false;
        self.recording = None;
        self.recording_rx = None;
        self.history = vec![Page::Home];
    }

    /// Navigate one step back in history.
    pub fn go_back(&mut self) {
        if self.history.len() > 1 {
            self.history.pop();
            if !matches!(self.current_page(), Page::Recording(_)) {
                self.recording = None;
                self.recording_rx = None;
            }
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Fetch the topic list in the background.
    pub fn fetch_topics(&mut self, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel();
        self.topics_rx = Some(rx);

        let source = Arc::clone(&self.source);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(source.fetch_topics());
            ctx.request_repaint();
        });
    }

    pub fn check_topics(&mut self) {
        if let Some(rx) = &self.topics_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(mut topics) => {
                        sort_topics(&mut topics);
                        log::info!("{} topics available", topics.len());
                        self.topics = topics;
                        self.error = None;
                    }
                    Err(e) => {
                        log::error!("cannot list topics: {}", e);
                        self.error = Some(format!("Cannot reach {}: {}", self.config.server_url, e));
                    }
                }
                self.topics_rx = None;
            }
        }
    }

    /// Select or deselect a topic and reload the maps page.
    pub fn toggle_topic(&mut self, topic: &str, ctx: &egui::Context) {
        if let Some(pos) = self.selected.iter().position(|t| t == topic) {
            self.selected.remove(pos);
        } else {
            self.selected.push(topic.to_string());
        }

        if self.selected.is_empty() {
            self.go_home();
            return;
        }

        self.history = vec![Page::Home, Page::Maps];
        self.recording = None;
        self.recording_rx = None;
        self.reload_maps(ctx);
    }

    /// Load every selected topic in the background. A newer request
    /// replaces the receiver, so stale results are dropped.
    pub fn reload_maps(&mut self, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel();
        self.maps_rx = Some(rx);
        self.maps_loading = true;

        let source = Arc::clone(&self.source);
        let topics = self.selected.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let data = load_topics(source.as_ref(), &topics);
            let _ = tx.send(data);
            ctx.request_repaint();
        });
    }

    /// Lay out freshly loaded topics, replacing the previous maps.
    pub fn check_maps(&mut self) {
        let Some(rx) = &self.maps_rx else { return };
        let Ok(loaded) = rx.try_recv() else { return };

        self.maps = loaded
            .into_iter()
            .map(|data| {
                let result = self.engine.layout(Some(&data.central), &data.items);
                TopicMap {
                    data,
                    result,
                    painter: MapPainter::new(),
                }
            })
            .collect();

        for map in &self.maps {
            for node in &map.result.nodes {
                self.image_loader.request(&node.image);
            }
        }

        self.maps_loading = false;
        self.maps_rx = None;
    }

    /// Route a click on node `index` of map `map_idx` through the
    /// dispatcher.
    pub fn activate_node(&mut self, map_idx: usize, index: usize) {
        let maps = std::mem::take(&mut self.maps);
        if let Some(map) = maps.get(map_idx) {
            self.clicked_item = map.result.item_at(index).cloned();
            dispatch(index, &map.result, self);
        }
        self.maps = maps;
    }

    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.maps
            .iter()
            .flat_map(|m| m.data.items.iter())
            .find(|item| item.id == id)
    }

    /// Show the recording page for `id` and fetch its details.
    pub fn open_recording(&mut self, id: &str, ctx: &egui::Context) {
        let page = Page::Recording(id.to_string());
        if self.current_page() != &page {
            self.history.push(page);
        }

        let clicked = self.clicked_item.take().filter(|item| item.id == id);
        let (category, thumbnail) = match clicked.as_ref().or_else(|| self.find_item(id)) {
            Some(item) => (item.category.clone(), item.image.clone()),
            None => (String::new(), None),
        };
        if let Some(image) = &thumbnail {
            self.image_loader.request(image);
        }

        self.recording = None;
        let (tx, rx) = mpsc::channel();
        self.recording_rx = Some(rx);

        let source = Arc::clone(&self.source);
        let id = id.to_string();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let title = source.fetch_title(&id).unwrap_or_else(|e| {
                log::warn!("title for {}: {}", id, e);
                id.clone()
            });
            let transcript = source.fetch_transcript(&id).map_err(|e| {
                log::warn!("transcript for {}: {}", id, e);
                e.to_string()
            });
            let view = RecordingView {
                audio_url: source.audio_url(&id),
                id,
                title,
                category,
                thumbnail,
                transcript,
            };
            let _ = tx.send(view);
            ctx.request_repaint();
        });
    }

    pub fn check_recording(&mut self) {
        if let Some(rx) = &self.recording_rx {
            if let Ok(view) = rx.try_recv() {
                // ignore answers for a page we already left
                if self.current_page() == &Page::Recording(view.id.clone()) {
                    self.recording = Some(view);
                }
                self.recording_rx = None;
            }
        }
    }
}
