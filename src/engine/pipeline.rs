use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::model::{CentralNode, Item};
use crate::render::bounds::Bounds;
use crate::render::layout::{place_central, place_children, RingGeometry};
use crate::render::rings::RingAllocator;
use crate::render::scene::{LayoutResult, SceneBuilder};

/// The radial layout pipeline: Rings → Positions → Bounds → Scene
///
/// One engine lays out one topic at a time. Every call starts from scratch
/// and returns a fresh [`LayoutResult`]; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct RadialEngine {
    config: LayoutConfig,
    allocator: RingAllocator,
    geometry: RingGeometry,
    scene: SceneBuilder,
}

impl RadialEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            allocator: RingAllocator::from_config(&config)?,
            geometry: RingGeometry::from_config(&config),
            scene: SceneBuilder::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out one topic and its recordings.
    ///
    /// With a topic the first placed node is the topic node; the
    /// recordings follow in input order.
    pub fn layout(&self, central: Option<&CentralNode>, items: &[Item]) -> LayoutResult {
        // Phase 1: ring sizes
        let rings = self.allocator.allocate(items.len());

        // Phase 2: positions
        let mut placed = Vec::with_capacity(items.len() + 1);
        if let Some(central) = central {
            placed.push(place_central(central, &self.geometry));
        }
        placed.extend(place_children(items, &rings, &self.geometry));

        // Phase 3: bounds, seeded with the topic node's extent
        let bounds = Bounds::compute(
            &placed,
            self.geometry.center_x,
            self.geometry.center_y,
            self.geometry.central_radius,
        );

        // Phase 4: scene
        self.scene
            .build(placed, &bounds, central.map(|c| c.label.as_str()))
    }
}

impl Default for RadialEngine {
    fn default() -> Self {
        let config = LayoutConfig::default();
        Self {
            allocator: RingAllocator::default(),
            geometry: RingGeometry::from_config(&config),
            scene: SceneBuilder::new(&config),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageRef;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::new(
                    format!("talk_{i}"),
                    Some(ImageRef::Url(format!("http://x/images/talk_{i}"))),
                    "Physics",
                )
            })
            .collect()
    }

    fn physics() -> CentralNode {
        CentralNode::new("Physics", Some(ImageRef::Url("http://x/central/Physics".into())))
    }

    fn distance_from_topic(result: &LayoutResult, index: usize) -> f32 {
        let topic = &result.placed_nodes[0];
        let node = &result.placed_nodes[index];
        ((node.x - topic.x).powi(2) + (node.y - topic.y).powi(2)).sqrt()
    }

    #[test]
    fn topic_without_recordings() {
        let engine = RadialEngine::default();
        let result = engine.layout(Some(&physics()), &[]);

        assert_eq!(result.placed_nodes.len(), 1);
        assert_eq!(result.child_count(), 0);
        // 75*2 extent + 75*2 padding
        assert_eq!(result.canvas_width, 300.0);
        assert_eq!(result.canvas_height, 300.0);
        assert_eq!(result.draw_position(0), Some((150.0, 150.0)));
        assert_eq!(result.label.as_ref().map(|l| l.text.as_str()), Some("Physics"));
    }

    #[test]
    fn ten_recordings_share_one_ring() {
        let engine = RadialEngine::default();
        let result = engine.layout(Some(&physics()), &items(10));

        assert_eq!(result.placed_nodes.len(), 11);
        assert!(result.placed_nodes[0].is_central);
        let ring1 = 75.0 + 50.0 * 2.5;
        for i in 1..=10 {
            assert!((distance_from_topic(&result, i) - ring1).abs() < 1e-2);
        }
    }

    #[test]
    fn twenty_five_recordings_use_two_rings() {
        let engine = RadialEngine::default();
        let result = engine.layout(Some(&physics()), &items(25));

        let ring1 = 75.0 + 50.0 * 2.5;
        let ring2 = 75.0 + 2.0 * 50.0 * 2.5;
        for i in 1..=12 {
            assert!((distance_from_topic(&result, i) - ring1).abs() < 1e-2);
        }
        for i in 13..=25 {
            assert!((distance_from_topic(&result, i) - ring2).abs() < 1e-2);
        }
        // the outer ring widens the canvas past the first ring's extent
        assert!(result.canvas_width > 2.0 * (ring1 + 50.0) + 150.0);
        assert!(result.canvas_width <= 2.0 * (ring2 + 50.0) + 150.0 + 1e-2);
    }

    #[test]
    fn recordings_without_topic() {
        let engine = RadialEngine::default();
        let result = engine.layout(None, &items(3));
        assert_eq!(result.placed_nodes.len(), 3);
        assert!(result.central().is_none());
        assert!(result.label.is_none());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = LayoutConfig {
            ring_spacing: -1.0,
            ..Default::default()
        };
        let err = RadialEngine::new(config).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn compact_config_shrinks_canvas() {
        let full = RadialEngine::default().layout(Some(&physics()), &items(20));
        let compact = RadialEngine::new(LayoutConfig::compact())
            .unwrap()
            .layout(Some(&physics()), &items(20));
        assert!(compact.canvas_width < full.canvas_width);
    }

    proptest! {
        #[test]
        fn layout_is_idempotent(count in 0usize..120) {
            let engine = RadialEngine::default();
            let input = items(count);
            let a = engine.layout(Some(&physics()), &input);
            let b = engine.layout(Some(&physics()), &input);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn every_node_fits_on_canvas(count in 0usize..200) {
            let result = RadialEngine::default().layout(Some(&physics()), &items(count));
            for node in &result.nodes {
                prop_assert!(node.cx - node.radius >= -1e-3);
                prop_assert!(node.cy - node.radius >= -1e-3);
                prop_assert!(node.cx + node.radius <= result.canvas_width + 1e-3);
                prop_assert!(node.cy + node.radius <= result.canvas_height + 1e-3);
            }
        }
    }
}
