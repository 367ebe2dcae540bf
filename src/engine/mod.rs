pub mod loader;
pub mod navigation;
pub mod pipeline;
