pub mod config;
pub mod content;
pub mod error;
pub mod motion;
pub mod presets;

pub use config::{AppConfig, MotionConfig, ScrollConfig};
pub use error::{Error, Result};
pub use presets::Presets;
