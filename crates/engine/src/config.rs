use std::fs;
use std::path::{Path, PathBuf};

use layers::{BaseStyle, HighlightStyle};
use navigation::{GestureConfig, NavigationConfig};
use serde::{Deserialize, Serialize};

/// Raster resolution plus base-map colors. Width and height apply to the
/// visual, identity and highlight rasters alike.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub style: BaseStyle,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 1024,
            style: BaseStyle::default(),
        }
    }
}

/// Engine configuration. Every section and field has a default, so an
/// empty JSON object is a complete config.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub raster: RasterConfig,
    pub highlight: HighlightStyle,
    pub navigation: NavigationConfig,
    pub gesture: GestureConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Json(e) => write!(f, "config JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(payload).map_err(ConfigError::Json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.raster.width == 0 || self.raster.height == 0 {
            return invalid("raster width and height must be nonzero");
        }
        let nav = &self.navigation;
        if !(nav.globe_radius.is_finite() && nav.globe_radius > 0.0) {
            return invalid("navigation.globe_radius must be positive");
        }
        if !(nav.min_distance.is_finite() && nav.max_distance.is_finite())
            || nav.min_distance > nav.max_distance
        {
            return invalid("navigation.min_distance must not exceed max_distance");
        }
        if !(nav.flight_duration_ms.is_finite() && nav.flight_duration_ms >= 0.0) {
            return invalid("navigation.flight_duration_ms must be non-negative");
        }
        let g = &self.gesture;
        if !(g.max_distance_px >= 0.0 && g.max_duration_ms >= 0.0 && g.device_pixel_ratio > 0.0) {
            return invalid("gesture thresholds must be non-negative");
        }
        Ok(())
    }
}
