//! Viewer configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::mesh::ShapeKind;
use crate::pipeline::Orientation;
use crate::rasterizer::{Color, RenderMode, RenderOptions, HEIGHT, WIDTH};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            ConfigError::SerializeError(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Largest width or height a GPU texture upload accepts
pub const MAX_SURFACE_SIDE: usize = u16::MAX as usize;

/// Slider range in degrees plus its starting value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
    pub initial: f64,
}

impl AngleRange {
    pub fn new(min: f64, max: f64, initial: f64) -> Self {
        Self { min, max, initial }
    }

    /// The render core never validates angles; the viewer clamps here.
    pub fn clamp(&self, degrees: f64) -> f64 {
        degrees.clamp(self.min, self.max)
    }

    /// Position of `degrees` in the range, 0.0 to 1.0
    pub fn fraction(&self, degrees: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.clamp(degrees) - self.min) / span).clamp(0.0, 1.0)
    }

    /// Inverse of `fraction`, snapped to whole degrees like a slider
    pub fn from_fraction(&self, t: f64) -> f64 {
        self.clamp((self.min + t.clamp(0.0, 1.0) * (self.max - self.min)).round())
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.initial.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} range must be finite", name)));
        }
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{} range min {} exceeds max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Everything the viewer needs to start up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub width: usize,
    pub height: usize,
    pub shape: ShapeKind,
    pub mode: RenderMode,
    pub heading: AngleRange,
    pub pitch: AngleRange,
    pub stroke: Color,
    pub background: Color,
    /// Banded multi-threaded fill
    pub parallel: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            shape: ShapeKind::default(),
            mode: RenderMode::default(),
            heading: AngleRange::new(-180.0, 180.0, 0.0),
            pitch: AngleRange::new(90.0, 270.0, 180.0),
            stroke: Color::WHITE,
            background: Color::BLACK,
            parallel: false,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.width > MAX_SURFACE_SIDE || self.height > MAX_SURFACE_SIDE {
            return Err(ConfigError::Invalid(format!(
                "surface size {}x{} exceeds {} per side",
                self.width, self.height, MAX_SURFACE_SIDE
            )));
        }
        self.heading.validate("heading")?;
        self.pitch.validate("pitch")?;
        Ok(())
    }

    /// Starting angles, clamped into their ranges
    pub fn initial_orientation(&self) -> Orientation {
        Orientation::new(
            self.heading.clamp(self.heading.initial),
            self.pitch.clamp(self.pitch.initial),
        )
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            stroke: self.stroke,
            background: self.background,
            parallel: self.parallel,
        }
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ViewerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<ViewerConfig, ConfigError> {
    let config: ViewerConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &ViewerConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
