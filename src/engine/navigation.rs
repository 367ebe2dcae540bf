//! Navigation dispatch for clicks on a topic map.
//!
//! The item id comes from the [`PlacedNode`] the click resolved to, never
//! from the node's position in the list, so a map whose topic node is
//! missing or whose nodes were skipped still opens the right recording.

use crate::error::LayoutError;
use crate::render::layout::PlacedNode;
use crate::render::scene::LayoutResult;

/// What the host should do after a node was activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Topic node (or nothing to open)
    Ignore,
    /// Open the recording with this id
    OpenItem(String),
}

/// Receives `OpenItem` intents; owns routing and history.
pub trait NavigationHost {
    fn on_item_activated(&mut self, item_id: &str);
}

/// Resolve an activation of placed node `index`.
pub fn on_activate(
    index: usize,
    placed_nodes: &[PlacedNode],
) -> Result<NavigationIntent, LayoutError> {
    let node = placed_nodes.get(index).ok_or(LayoutError::StaleReference {
        index,
        len: placed_nodes.len(),
    })?;

    if node.is_central {
        return Ok(NavigationIntent::Ignore);
    }

    Ok(match node.item_id() {
        Some(id) => NavigationIntent::OpenItem(id.to_string()),
        None => NavigationIntent::Ignore,
    })
}

/// Resolve an activation and forward `OpenItem` to the host. Stale
/// references are logged and dropped.
pub fn dispatch(
    index: usize,
    result: &LayoutResult,
    host: &mut dyn NavigationHost,
) -> NavigationIntent {
    match on_activate(index, &result.placed_nodes) {
        Ok(NavigationIntent::OpenItem(id)) => {
            log::debug!("open item {}", id);
            host.on_item_activated(&id);
            NavigationIntent::OpenItem(id)
        }
        Ok(NavigationIntent::Ignore) => NavigationIntent::Ignore,
        Err(e) => {
            log::debug!("ignoring activation: {}", e);
            NavigationIntent::Ignore
        }
    }
}

/// Hit-test a canvas point and dispatch whatever is under it.
pub fn activate_at(
    x: f32,
    y: f32,
    result: &LayoutResult,
    host: &mut dyn NavigationHost,
) -> Option<NavigationIntent> {
    let index = result.hit_test(x, y)?;
    Some(dispatch(index, result, host))
}
