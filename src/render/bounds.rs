//! Bounding box of a placed map and the translation onto the canvas.

use crate::render::layout::PlacedNode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Extent of the topic node alone.
    pub fn seeded(center_x: f32, center_y: f32, central_radius: f32) -> Self {
        Self {
            min_x: center_x - central_radius,
            max_x: center_x + central_radius,
            min_y: center_y - central_radius,
            max_y: center_y + central_radius,
        }
    }

    pub fn include(&mut self, node: &PlacedNode) {
        self.min_x = self.min_x.min(node.x - node.radius);
        self.max_x = self.max_x.max(node.x + node.radius);
        self.min_y = self.min_y.min(node.y - node.radius);
        self.max_y = self.max_y.max(node.y + node.radius);
    }

    /// Seed with the topic node's extent, then grow over every node.
    pub fn compute(
        nodes: &[PlacedNode],
        center_x: f32,
        center_y: f32,
        central_radius: f32,
    ) -> Self {
        let mut bounds = Self::seeded(center_x, center_y, central_radius);
        for node in nodes {
            bounds.include(node);
        }
        bounds
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Canvas size with `padding` on every side.
    pub fn canvas_size(&self, padding: f32) -> (f32, f32) {
        (self.width() + padding * 2.0, self.height() + padding * 2.0)
    }

    /// Translation from layout to canvas coordinates.
    pub fn origin_offset(&self, padding: f32) -> (f32, f32) {
        (padding - self.min_x, padding - self.min_y)
    }

    pub fn to_canvas(&self, x: f32, y: f32, padding: f32) -> (f32, f32) {
        let (dx, dy) = self.origin_offset(padding);
        (x + dx, y + dy)
    }

    pub fn contains_circle(&self, x: f32, y: f32, radius: f32) -> bool {
        x - radius >= self.min_x
            && x + radius <= self.max_x
            && y - radius >= self.min_y
            && y + radius <= self.max_y
    }
}
