//! Configuration for the globe viewer.
//!
//! Settings persist to disk as RON and can be overridden from the command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    APP_NAME, CONFIG_FILE, CameraConfig, Config, DebugConfig, GlobeConfig, MotionConfig,
    RenderConfig, StarConfig, WindowConfig,
};
pub use error::ConfigError;
