pub mod fetch;
pub mod image;
pub mod memory;

pub use fetch::{FetchError, HttpTalkSource, TalkSource};
pub use memory::MemoryTalkSource;
