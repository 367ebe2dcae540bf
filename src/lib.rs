pub mod config;
pub mod error;
pub mod model;
pub mod net;
pub mod render;
pub mod engine;

pub use config::{LayoutConfig, ViewerConfig};
pub use engine::navigation::{NavigationHost, NavigationIntent};
pub use engine::pipeline::RadialEngine;
pub use error::LayoutError;
pub use model::{CentralNode, ImageRef, Item};
pub use render::scene::LayoutResult;
