//! Ring allocation: how many recording nodes go on each concentric ring.
//!
//! Ring `level` (1-based) holds up to `base_capacity + level * level_growth`
//! nodes. Rings fill in order; only the last one may be partial.

use crate::config::LayoutConfig;
use crate::error::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingAllocator {
    base_capacity: usize,
    level_growth: usize,
}

impl Default for RingAllocator {
    fn default() -> Self {
        Self {
            base_capacity: 8,
            level_growth: 4,
        }
    }
}

impl RingAllocator {
    /// Both zero would give rings of capacity zero and never terminate.
    pub fn new(base_capacity: usize, level_growth: usize) -> Result<Self, LayoutError> {
        if base_capacity == 0 && level_growth == 0 {
            return Err(LayoutError::InvalidInput(
                "ring capacity is zero at every level".to_string(),
            ));
        }
        Ok(Self {
            base_capacity,
            level_growth,
        })
    }

    pub fn from_config(config: &LayoutConfig) -> Result<Self, LayoutError> {
        Self::new(config.base_capacity, config.level_growth)
    }

    /// Maximum number of nodes ring `level` can hold.
    pub fn capacity(&self, level: usize) -> usize {
        self.base_capacity
            .saturating_add(level.saturating_mul(self.level_growth))
    }

    /// Split `item_count` nodes into ring sizes, innermost first.
    pub fn allocate(&self, item_count: usize) -> Vec<usize> {
        let mut rings = Vec::new();
        let mut remaining = item_count;
        let mut level = 1;

        while remaining > 0 {
            let this_ring = remaining.min(self.capacity(level));
            rings.push(this_ring);
            remaining -= this_ring;
            level += 1;
        }

        log::debug!("allocated {} nodes into rings {:?}", item_count, rings);
        rings
    }
}
