use std::f32::consts::TAU;

use crate::config::LayoutConfig;
use crate::model::{CentralNode, ImageRef, Item};

/// Centre and radii shared by every ring of one map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center_x: f32,
    pub center_y: f32,
    pub central_radius: f32,
    pub child_radius: f32,
    /// Distance between rings in multiples of `child_radius`
    pub ring_spacing: f32,
}

impl RingGeometry {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            center_x: config.center_x,
            center_y: config.center_y,
            central_radius: config.central_radius,
            child_radius: config.child_radius,
            ring_spacing: config.ring_spacing,
        }
    }

    /// Distance from the centre to the nodes of ring `level` (1-based).
    pub fn ring_radius(&self, level: usize) -> f32 {
        self.central_radius + level as f32 * self.child_radius * self.ring_spacing
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

/// One positioned node, in layout (not canvas) coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub image: Option<ImageRef>,
    pub is_central: bool,
    /// The recording this node stands for; `None` for the topic node
    pub source: Option<Item>,
}

impl PlacedNode {
    pub fn item_id(&self) -> Option<&str> {
        self.source.as_ref().map(|item| item.id.as_str())
    }
}

/// Slot on a ring, before an item is attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSlot {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub level: usize,
}

/// Evenly spaced slots for every ring, innermost ring first. Each ring
/// starts at angle 0 (positive x axis).
pub fn ring_slots(ring_sizes: &[usize], geometry: &RingGeometry) -> Vec<RingSlot> {
    let total: usize = ring_sizes.iter().sum();
    let mut slots = Vec::with_capacity(total);

    for (i, &n) in ring_sizes.iter().enumerate() {
        if n == 0 {
            continue;
        }
        let level = i + 1;
        let radius = geometry.ring_radius(level);
        let step = TAU / n as f32;

        for k in 0..n {
            let angle = k as f32 * step;
            slots.push(RingSlot {
                x: geometry.center_x + radius * angle.cos(),
                y: geometry.center_y + radius * angle.sin(),
                angle,
                level,
            });
        }
    }

    slots
}

/// Topic node at the centre.
pub fn place_central(central: &CentralNode, geometry: &RingGeometry) -> PlacedNode {
    PlacedNode {
        x: geometry.center_x,
        y: geometry.center_y,
        radius: geometry.central_radius,
        image: central.image.clone(),
        is_central: true,
        source: None,
    }
}

/// Assign `items` to ring slots in input order: the k-th slot gets the k-th
/// item, and the item travels with its node.
pub fn place_children(
    items: &[Item],
    ring_sizes: &[usize],
    geometry: &RingGeometry,
) -> Vec<PlacedNode> {
    ring_slots(ring_sizes, geometry)
        .into_iter()
        .zip(items)
        .map(|(slot, item)| PlacedNode {
            x: slot.x,
            y: slot.y,
            radius: geometry.child_radius,
            image: item.image.clone(),
            is_central: false,
            source: Some(item.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rings::RingAllocator;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("talk_{i}"), None, "Physics"))
            .collect()
    }

    #[test]
    fn ring_radius_grows_by_spacing() {
        let g = RingGeometry::default();
        assert_eq!(g.ring_radius(1), 75.0 + 50.0 * 2.5);
        assert_eq!(g.ring_radius(2), 75.0 + 2.0 * 50.0 * 2.5);
    }

    #[test]
    fn first_slot_sits_on_positive_x_axis() {
        let g = RingGeometry::default();
        let slots = ring_slots(&[10], &g);
        assert_eq!(slots.len(), 10);
        assert!((slots[0].x - (g.center_x + g.ring_radius(1))).abs() < 1e-3);
        assert!((slots[0].y - g.center_y).abs() < 1e-3);
    }

    #[test]
    fn central_sits_at_center() {
        let g = RingGeometry::default();
        let node = place_central(&CentralNode::new("Physics", None), &g);
        assert!(node.is_central);
        assert_eq!((node.x, node.y, node.radius), (400.0, 300.0, 75.0));
        assert!(node.source.is_none());
    }

    #[test]
    fn children_keep_input_order() {
        let g = RingGeometry::default();
        let input = items(25);
        let rings = RingAllocator::default().allocate(input.len());
        let placed = place_children(&input, &rings, &g);

        assert_eq!(placed.len(), 25);
        for (node, item) in placed.iter().zip(&input) {
            assert_eq!(node.item_id(), Some(item.id.as_str()));
            assert_eq!(node.radius, g.child_radius);
            assert!(!node.is_central);
        }
        // 13th item starts the second ring
        let d = |n: &PlacedNode| ((n.x - g.center_x).powi(2) + (n.y - g.center_y).powi(2)).sqrt();
        assert!((d(&placed[11]) - g.ring_radius(1)).abs() < 1e-2);
        assert!((d(&placed[12]) - g.ring_radius(2)).abs() < 1e-2);
    }

    proptest! {
        #[test]
        fn rings_are_evenly_spaced(count in 1usize..400) {
            let g = RingGeometry::default();
            let rings = RingAllocator::default().allocate(count);
            let slots = ring_slots(&rings, &g);
            prop_assert_eq!(slots.len(), count);

            let mut start = 0;
            for (i, &n) in rings.iter().enumerate() {
                let ring = &slots[start..start + n];
                let step = TAU / n as f32;
                let angles: Vec<f32> = ring
                    .iter()
                    .map(|s| (s.y - g.center_y).atan2(s.x - g.center_x).rem_euclid(TAU))
                    .collect();

                for slot in ring {
                    prop_assert_eq!(slot.level, i + 1);
                    let r = ((slot.x - g.center_x).powi(2) + (slot.y - g.center_y).powi(2)).sqrt();
                    prop_assert!((r - g.ring_radius(i + 1)).abs() < 1e-2);
                }

                // first slot on the positive x axis
                prop_assert!((ring[0].y - g.center_y).abs() < 1e-2);
                prop_assert!(ring[0].x > g.center_x);

                // consecutive gaps are equal and the n gaps close the circle
                if n > 1 {
                    let mut span = 0.0;
                    for k in 0..n {
                        let gap = (angles[(k + 1) % n] - angles[k]).rem_euclid(TAU);
                        prop_assert!((gap - step).abs() < 1e-3, "gap {} vs step {}", gap, step);
                        span += gap;
                    }
                    prop_assert!((span - TAU).abs() < 1e-2);
                }
                start += n;
            }
        }
    }
}
