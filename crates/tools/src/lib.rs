//! Offline front-ends for the globe engine: baking raster layers to disk and
//! answering single picks from the command line.

pub mod bake;
pub mod pick;

use std::env;
use std::path::{Path, PathBuf};

use engine::{ConfigError, EngineConfig, EngineError};
use formats::DatasetLoadError;
use layers::{RasterBuffer, RasterizeError};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "GLOBE_CONFIG";

#[derive(Debug)]
pub enum ToolError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    Json(serde_json::Error),
    Engine(EngineError),
    /// Raster bytes do not match the declared dimensions.
    BufferSize { width: u32, height: u32 },
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            ToolError::Image { path, source } => {
                write!(f, "failed to write image {}: {source}", path.display())
            }
            ToolError::Json(e) => write!(f, "JSON error: {e}"),
            ToolError::Engine(e) => write!(f, "{e}"),
            ToolError::BufferSize { width, height } => {
                write!(f, "raster bytes do not form a {width}x{height} RGBA image")
            }
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Io { source, .. } => Some(source),
            ToolError::Image { source, .. } => Some(source),
            ToolError::Json(e) => Some(e),
            ToolError::Engine(e) => Some(e),
            ToolError::BufferSize { .. } => None,
        }
    }
}

impl From<EngineError> for ToolError {
    fn from(e: EngineError) -> Self {
        ToolError::Engine(e)
    }
}

impl From<ConfigError> for ToolError {
    fn from(e: ConfigError) -> Self {
        ToolError::Engine(EngineError::Config(e))
    }
}

impl From<DatasetLoadError> for ToolError {
    fn from(e: DatasetLoadError) -> Self {
        ToolError::Engine(EngineError::Dataset(e))
    }
}

impl From<RasterizeError> for ToolError {
    fn from(e: RasterizeError) -> Self {
        ToolError::Engine(EngineError::Rasterize(e))
    }
}

/// Explicit path first, then `GLOBE_CONFIG`, then built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    if let Some(path) = explicit {
        return EngineConfig::load(path);
    }
    match env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => EngineConfig::load(path),
        _ => Ok(EngineConfig::default()),
    }
}

/// Writes a raster as an RGBA PNG.
pub fn write_png(buffer: &RasterBuffer, path: &Path) -> Result<(), ToolError> {
    let (width, height) = (buffer.width(), buffer.height());
    let img = image::RgbaImage::from_raw(width, height, buffer.as_raw().to_vec())
        .ok_or(ToolError::BufferSize { width, height })?;
    img.save(path).map_err(|e| ToolError::Image {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    pub fn sample_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/sample_countries.geojson")
    }

    /// Fresh, empty scratch directory under the system temp dir.
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("globe-tools-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }
}
