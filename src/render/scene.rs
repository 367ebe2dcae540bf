//! Scene building: canvas-space nodes with clip masks, the topic label and
//! hit testing.
//!
//! Only nodes that carry an image are drawn. An image-less node stays in
//! `placed_nodes` (so indices never shift) but has no scene node and cannot
//! be clicked.

use sha2::{Digest, Sha256};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::model::{ImageRef, Item};
use crate::render::bounds::Bounds;
use crate::render::layout::PlacedNode;
use crate::render::NodeStyle;

/// A drawable circle with its clipped image
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Index into [`LayoutResult::placed_nodes`]; used as the click target
    pub index: usize,
    /// Centre in canvas coordinates
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub style: NodeStyle,
    pub image: ImageRef,
    /// Unique per node and per topic scene
    pub clip_id: String,
}

impl SceneNode {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Topic name at the top centre of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TopicLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Everything the renderer needs for one render cycle
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Topic node first (when there is a topic), then recordings in input order
    pub placed_nodes: Vec<PlacedNode>,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Added to layout coordinates to get canvas coordinates
    pub origin_offset_x: f32,
    pub origin_offset_y: f32,
    /// Draw order
    pub nodes: Vec<SceneNode>,
    pub label: Option<TopicLabel>,
    /// Placed nodes left out of the scene for lack of an image
    pub missing_images: Vec<usize>,
}

impl LayoutResult {
    pub fn central(&self) -> Option<&PlacedNode> {
        self.placed_nodes.first().filter(|n| n.is_central)
    }

    pub fn child_count(&self) -> usize {
        self.placed_nodes.iter().filter(|n| !n.is_central).count()
    }

    /// Canvas position of placed node `index`.
    pub fn draw_position(&self, index: usize) -> Option<(f32, f32)> {
        self.placed_nodes
            .get(index)
            .map(|n| (n.x + self.origin_offset_x, n.y + self.origin_offset_y))
    }

    /// The recording placed at `index`, as it was laid out in this map.
    pub fn item_at(&self, index: usize) -> Option<&Item> {
        self.placed_nodes.get(index).and_then(|n| n.source.as_ref())
    }

    /// Placed-node index of the top-most drawn node under a canvas point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.contains(x, y))
            .map(|node| node.index)
    }

    /// Non-fatal diagnostics for every node that was not drawn.
    pub fn missing_image_errors(&self) -> Vec<LayoutError> {
        self.missing_images
            .iter()
            .map(|&index| LayoutError::MissingImage { index })
            .collect()
    }
}

/// Turns placed nodes and their bounds into a [`LayoutResult`].
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    /// Canvas padding on every side (the topic node radius)
    padding: f32,
    label_y: f32,
    label_font_size: f32,
}

impl SceneBuilder {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            padding: config.central_radius,
            label_y: config.label_y,
            label_font_size: config.label_font_size,
        }
    }

    pub fn build(
        &self,
        placed_nodes: Vec<PlacedNode>,
        bounds: &Bounds,
        topic: Option<&str>,
    ) -> LayoutResult {
        let (canvas_width, canvas_height) = bounds.canvas_size(self.padding);
        let (origin_offset_x, origin_offset_y) = bounds.origin_offset(self.padding);
        let scope = clip_scope(topic);

        let mut nodes = Vec::with_capacity(placed_nodes.len());
        let mut missing_images = Vec::new();

        for (index, placed) in placed_nodes.iter().enumerate() {
            let Some(image) = &placed.image else {
                missing_images.push(index);
                continue;
            };
            nodes.push(SceneNode {
                index,
                cx: placed.x + origin_offset_x,
                cy: placed.y + origin_offset_y,
                radius: placed.radius,
                style: if placed.is_central {
                    NodeStyle::Central
                } else {
                    NodeStyle::Child
                },
                image: image.clone(),
                clip_id: format!("clip-{}-{}", scope, index),
            });
        }

        if !missing_images.is_empty() {
            log::warn!(
                "{}: {} of {} nodes have no image and are not drawn",
                topic.unwrap_or("<no topic>"),
                missing_images.len(),
                placed_nodes.len()
            );
        }

        let label = topic.map(|text| TopicLabel {
            text: text.to_string(),
            x: canvas_width / 2.0,
            y: self.label_y,
            font_size: self.label_font_size,
        });

        log::debug!(
            "scene {}: {} drawn nodes on {:.0}x{:.0} canvas",
            scope,
            nodes.len(),
            canvas_width,
            canvas_height
        );

        LayoutResult {
            placed_nodes,
            canvas_width,
            canvas_height,
            origin_offset_x,
            origin_offset_y,
            nodes,
            label,
            missing_images,
        }
    }
}

/// Clip ids must stay unique when several topic maps share one document:
/// a readable slug plus a digest of the full topic name.
fn clip_scope(topic: Option<&str>) -> String {
    let Some(topic) = topic else {
        return "map".to_string();
    };

    let slug: String = topic
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = if slug.is_empty() { "map" } else { slug.as_str() };

    let digest = Sha256::digest(topic.as_bytes());
    let tag: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}", slug, tag)
}
