//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Application name used for the platform config directory.
pub const APP_NAME: &str = "globe-viewer";

/// File name of the persisted configuration.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Camera settings.
    pub camera: CameraConfig,
    /// Globe and atmosphere geometry.
    pub globe: GlobeConfig,
    /// Star field generation.
    pub stars: StarConfig,
    /// Animation and pointer response.
    pub motion: MotionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Multisample the scene target.
    pub antialias: bool,
    /// MSAA sample count used when `antialias` is set (1 or 4).
    pub msaa_samples: u32,
    /// Upper bound for the pixel scale applied to the drawing buffer.
    pub max_pixel_ratio: f64,
    /// Clear color (linear RGBA).
    pub clear_color: [f64; 4],
}

/// Perspective camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Distance from the origin along +Z.
    pub distance: f32,
}

/// Globe sphere and atmosphere shell configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Sphere radius in world units.
    pub radius: f32,
    /// Segments around the equator.
    pub width_segments: u32,
    /// Segments from pole to pole.
    pub height_segments: u32,
    /// Uniform scale of the atmosphere shell relative to the globe.
    pub atmosphere_scale: f32,
    /// Equirectangular surface texture.
    pub texture_path: PathBuf,
}

/// Star field configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    /// Number of stars.
    pub count: u32,
    /// Stars are spread over `[-half_extent, half_extent)` on x and y.
    pub half_extent: f32,
    /// Stars are spread over `(-depth, 0]` on z.
    pub depth: f32,
    /// Seed for deterministic placement.
    pub seed: u64,
    /// Star size in world units; a star at view depth `d` spans
    /// `point_size * buffer_height / 2 / d` pixels, never less than one.
    pub point_size: f32,
}

/// Animation and pointer response configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Globe spin about its vertical axis, radians per second.
    pub spin_rate: f32,
    /// Group yaw per unit of horizontal pointer offset, radians.
    pub yaw_gain: f32,
    /// Group pitch per unit of vertical pointer offset, radians.
    pub pitch_gain: f32,
    /// Seconds for a rotation change to settle.
    pub ease_duration: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file in debug builds.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "Globe".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            msaa_samples: 4,
            max_pixel_ratio: 2.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl RenderConfig {
    /// Effective sample count for the scene target.
    pub fn sample_count(&self) -> u32 {
        if self.antialias && self.msaa_samples > 1 {
            4
        } else {
            1
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            distance: 15.0,
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            width_segments: 50,
            height_segments: 50,
            atmosphere_scale: 1.2,
            texture_path: PathBuf::from("assets").join("textures").join("earth_uv_map.jpg"),
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 2500,
            half_extent: 100.0,
            depth: 500.0,
            seed: 42,
            point_size: 1.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spin_rate: 0.1,
            yaw_gain: 0.4,
            pitch_gain: 0.2,
            ease_duration: 2.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Platform config directory for the viewer, if the OS exposes one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join(APP_NAME))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
