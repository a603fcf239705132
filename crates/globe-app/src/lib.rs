//! Globe viewer application: window, event handling and the animation loop.

pub mod context;
pub mod error;
pub mod frame_clock;
pub mod platform;
pub mod window;

pub use context::{GlobeContext, InputEvent};
pub use error::AppError;
pub use frame_clock::{FrameClock, MAX_FRAME_TIME};
pub use platform::{PlatformDirs, PlatformError};
pub use window::{GlobeApp, run, window_attributes_from_config};
