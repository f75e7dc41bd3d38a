pub mod dynamic;
pub mod hot_reload;
pub mod parser;

pub use dynamic::{DynamicConfig, ConfigSection, SharedConfig};
// pub use hot_reload::{ConfigWatcher, WatcherEvent}; // Commented - not currently used