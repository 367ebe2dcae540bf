//! Toolbar rendering for `TalkMapApp`.
//!
//! Draws the home and back buttons, one toggle per topic and the
//! dark-mode switch.

use eframe::egui;

use super::TalkMapApp;

impl TalkMapApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal_wrapped(|ui| {
            ui.add_space(4.0);

            if ui
                .add(egui::Button::new("\u{2302}").min_size(egui::vec2(28.0, 24.0)))
                .on_hover_text("Home")
                .clicked()
            {
                self.go_home();
            }
            if ui
                .add_enabled(
                    self.can_go_back(),
                    egui::Button::new("\u{25C0}").min_size(egui::vec2(28.0, 24.0)),
                )
                .clicked()
            {
                self.go_back();
            }

            ui.separator();

            if self.topics.is_empty() && self.topics_rx.is_some() {
                ui.spinner();
            }

            let mut toggled: Option<String> = None;
            for topic in &self.topics {
                let selected = self.selected.contains(topic);
                if ui.selectable_label(selected, topic).clicked() {
                    toggled = Some(topic.clone());
                }
            }
            if let Some(topic) = toggled {
                self.toggle_topic(&topic, ctx);
            }

            ui.separator();

            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }
        });
    }
}
