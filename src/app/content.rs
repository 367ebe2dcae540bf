//! Content-area rendering for `TalkMapApp`.
//!
//! - `draw_content`: page dispatcher (error, home, maps, recording)
//! - `draw_maps`: one painted radial map per selected topic
//! - `draw_recording`: title, category, thumbnail, audio link, transcript

use eframe::egui;
use egui::load::SizedTexture;

use super::{Page, TalkMapApp};

const THUMBNAIL_SIZE: f32 = 160.0;

impl TalkMapApp {
    /// Render the central content panel.
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if let Some(ref error) = self.error {
            ui.colored_label(egui::Color32::RED, error);
            ui.separator();
        }

        match self.current_page().clone() {
            Page::Home => self.draw_home(ui),
            Page::Maps => self.draw_maps(ui, ctx),
            Page::Recording(_) => self.draw_recording(ui),
        }
    }

    fn draw_home(&self, ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);
                ui.heading("Talk Map");
                ui.label(format!("Server: {}", self.config.server_url));
                ui.add_space(20.0);
                ui.label("Pick one or more topics in the toolbar");
            });
        });
    }

    fn draw_maps(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.maps_loading && self.maps.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        let dark_mode = self.dark_mode;
        let textures = &self.image_textures;
        let mut clicked: Option<(usize, usize)> = None;

        egui::ScrollArea::both().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (map_idx, map) in self.maps.iter_mut().enumerate() {
                    ui.push_id(("map", map_idx), |ui| {
                        ui.vertical(|ui| {
                            if let Some(index) =
                                map.painter.paint(ui, ctx, &map.result, dark_mode, textures)
                            {
                                clicked = Some((map_idx, index));
                            }
                            let missing = map.result.missing_images.len();
                            if missing > 0 {
                                ui.weak(format!("{} without image", missing));
                            }
                        });
                    });
                }
            });
        });

        if let Some((map_idx, index)) = clicked {
            self.activate_node(map_idx, index);
        }
    }

    fn draw_recording(&self, ui: &mut egui::Ui) {
        let Some(ref view) = self.recording else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        ui.heading(&view.title);
        if !view.category.is_empty() {
            ui.label(format!("Topic: {}", view.category));
        }
        ui.separator();

        ui.horizontal(|ui| {
            if let Some(tex) = view
                .thumbnail
                .as_ref()
                .and_then(|image| self.image_textures.get(image.key()))
            {
                ui.add(
                    egui::Image::from_texture(SizedTexture::from_handle(tex))
                        .fit_to_exact_size(egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE))
                        .rounding(egui::Rounding::same(8.0)),
                );
            }
            ui.vertical(|ui| {
                ui.monospace(&view.id);
                if let Some(ref url) = view.audio_url {
                    ui.hyperlink_to("Audio (mp3)", url);
                }
            });
        });

        ui.separator();

        match &view.transcript {
            Ok(text) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.label(text);
                });
            }
            Err(e) => {
                ui.colored_label(egui::Color32::from_rgb(255, 80, 80), format!("No transcript: {}", e));
            }
        }
    }
}
