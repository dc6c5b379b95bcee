//! Configuration system
//!
//! Settings are plain `serde` structs. Any type implementing [`Config`] can be
//! loaded from or saved to `.toml` and `.ron` files; the format is picked
//! from the file extension.

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&contents, ConfigFormat::from_path(path)?)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = self.to_string_with_format(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Parse configuration text in the given format
    fn from_str_with_format(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Serialize configuration to text in the given format
    fn to_string_with_format(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`)
    Toml,
    /// Rusty Object Notation (`.ron`)
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file path's extension
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            Ok(Self::Toml)
        } else if path.ends_with(".ron") {
            Ok(Self::Ron)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of frames the headless runner executes before shutting down
    pub frames_to_run: u32,
    /// Main viewport settings
    pub window: WindowConfig,
    /// Free-fly camera settings
    pub camera: CameraControlConfig,
    /// Logger settings
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frames_to_run: 120,
            window: WindowConfig::default(),
            camera: CameraControlConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config for EngineConfig {}

/// Main viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pilot Light".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Free-fly camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraControlConfig {
    /// Travel speed in world units per second
    pub travel_speed: f32,
    /// Scale applied to mouse drag deltas before rotating
    pub rotate_sensitivity: f32,
    /// Pixels the mouse must move before a drag counts
    pub drag_threshold: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Initial camera position
    pub start_position: [f32; 3],
    /// Initial pitch in radians
    pub start_pitch: f32,
    /// Initial yaw in radians
    pub start_yaw: f32,
}

impl CameraControlConfig {
    /// Vertical field of view in radians
    pub fn fov_radians(&self) -> f32 {
        utils::deg_to_rad(self.fov_degrees)
    }

    /// Initial camera position as a vector
    pub fn start_position(&self) -> Vec3 {
        Vec3::from(self.start_position)
    }
}

impl Default for CameraControlConfig {
    fn default() -> Self {
        Self {
            travel_speed: 8.0,
            rotate_sensitivity: 0.1,
            drag_threshold: 1.0,
            fov_degrees: 60.0,
            near: 0.01,
            far: 400.0,
            start_position: [-6.211, 3.647, 0.827],
            start_pitch: -0.244,
            start_yaw: 1.488,
        }
    }
}

/// Logger settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
