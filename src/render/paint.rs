//! egui Painter-based rendering of a topic map.
//!
//! Draws each scene node as a filled, stroked circle with its image
//! rounded to the circle, the topic label at the top and a hover ring
//! under the pointer. Clicks are resolved with [`LayoutResult::hit_test`].

use std::collections::HashMap;

use egui::load::SizedTexture;
use egui::{Color32, FontId, Pos2, Rect, Rounding, Stroke, TextureHandle, Vec2};

use crate::render::scene::{LayoutResult, SceneNode};
use crate::render::{NodeStyle, STROKE_WIDTH};

struct Theme {
    canvas_bg: Color32,
    outline: Color32,
    label: Color32,
    hover: Color32,
}

impl Theme {
    fn light() -> Self {
        Self {
            canvas_bg: Color32::from_rgb(250, 250, 252),
            outline: Color32::BLACK,
            label: Color32::BLACK,
            hover: Color32::from_rgb(0, 102, 217),
        }
    }

    fn dark() -> Self {
        Self {
            canvas_bg: Color32::from_rgb(24, 24, 30),
            outline: Color32::from_rgb(200, 200, 210),
            label: Color32::from_rgb(230, 230, 240),
            hover: Color32::from_rgb(80, 160, 255),
        }
    }
}

fn fill(style: NodeStyle) -> Color32 {
    let [r, g, b] = style.fill_rgb();
    Color32::from_rgb(r, g, b)
}

/// Canvas coordinates → screen position inside the allocated rect.
pub fn to_screen(origin: Pos2, x: f32, y: f32) -> Pos2 {
    Pos2::new(origin.x + x, origin.y + y)
}

/// Screen position → canvas coordinates.
pub fn to_canvas(origin: Pos2, pos: Pos2) -> (f32, f32) {
    (pos.x - origin.x, pos.y - origin.y)
}

fn node_rect(origin: Pos2, node: &SceneNode) -> Rect {
    Rect::from_center_size(
        to_screen(origin, node.cx, node.cy),
        Vec2::splat(node.radius * 2.0),
    )
}

/// Persistent hover state for one map.
#[derive(Default)]
pub struct MapPainter {
    hovered: Option<usize>,
}

impl MapPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Paint `result` and return the placed-node index that was clicked.
    ///
    /// `textures` is keyed by [`crate::model::ImageRef::key`]; nodes whose
    /// image has not arrived yet are drawn as plain circles.
    pub fn paint(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        result: &LayoutResult,
        dark_mode: bool,
        textures: &HashMap<String, TextureHandle>,
    ) -> Option<usize> {
        let (full_rect, response) = ui.allocate_exact_size(
            Vec2::new(result.canvas_width, result.canvas_height),
            egui::Sense::click().union(egui::Sense::hover()),
        );

        let painter = ui.painter_at(full_rect);
        let origin = full_rect.min;
        let theme = if dark_mode { Theme::dark() } else { Theme::light() };

        painter.rect_filled(full_rect, Rounding::ZERO, theme.canvas_bg);

        let pointer = response.hover_pos().map(|pos| to_canvas(origin, pos));
        self.hovered = pointer.and_then(|(x, y)| result.hit_test(x, y));

        let mut animating = false;

        for node in &result.nodes {
            let center = to_screen(origin, node.cx, node.cy);
            let hover_t = ctx.animate_value_with_time(
                ui.id().with(("map_h", node.index)),
                if self.hovered == Some(node.index) { 1.0 } else { 0.0 },
                0.15,
            );
            if hover_t > 0.001 && hover_t < 0.999 {
                animating = true;
            }

            painter.circle_filled(center, node.radius, fill(node.style));

            if let Some(tex) = textures.get(node.image.key()) {
                egui::Image::from_texture(SizedTexture::from_handle(tex))
                    .rounding(Rounding::same(node.radius))
                    .paint_at(ui, node_rect(origin, node));
            }

            painter.circle_stroke(center, node.radius, Stroke::new(STROKE_WIDTH, theme.outline));

            if hover_t > 0.01 {
                painter.circle_stroke(
                    center,
                    node.radius + 2.0 + hover_t * 2.0,
                    Stroke::new(2.0 * hover_t, theme.hover),
                );
            }
        }

        if let Some(label) = &result.label {
            painter.text(
                to_screen(origin, label.x, label.y),
                egui::Align2::CENTER_CENTER,
                &label.text,
                FontId::proportional(label.font_size),
                theme.label,
            );
        }

        // only recordings are clickable
        if let Some(index) = self.hovered {
            if result.central().map_or(true, |_| index != 0) {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
            }
        }

        if animating {
            ctx.request_repaint();
        }

        if response.clicked() {
            self.hovered
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_round_trip() {
        let origin = Pos2::new(50.0, 100.0);
        let p = to_screen(origin, 10.0, 20.0);
        assert!((p.x - 60.0).abs() < 0.01);
        assert!((p.y - 120.0).abs() < 0.01);
        assert_eq!(to_canvas(origin, p), (10.0, 20.0));
    }

    #[test]
    fn node_rect_spans_diameter() {
        let node = SceneNode {
            index: 1,
            cx: 100.0,
            cy: 80.0,
            radius: 50.0,
            style: NodeStyle::Child,
            image: crate::model::ImageRef::Url("http://x/images/a".into()),
            clip_id: "clip-map-1".into(),
        };
        let r = node_rect(Pos2::ZERO, &node);
        assert_eq!(r.min, Pos2::new(50.0, 30.0));
        assert_eq!(r.max, Pos2::new(150.0, 130.0));
    }

    #[test]
    fn fills_match_styles() {
        assert_eq!(fill(NodeStyle::Central), Color32::from_rgb(173, 216, 230));
        assert_eq!(fill(NodeStyle::Child), Color32::from_rgb(144, 238, 144));
    }
}
