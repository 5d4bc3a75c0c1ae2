use formats::DatasetLoadError;
use layers::RasterizeError;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    Dataset(DatasetLoadError),
    Rasterize(RasterizeError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Config(e) => write!(f, "{e}"),
            EngineError::Dataset(e) => write!(f, "{e}"),
            EngineError::Rasterize(e) => write!(f, "failed to build base layers: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(e) => Some(e),
            EngineError::Dataset(e) => Some(e),
            EngineError::Rasterize(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

impl From<DatasetLoadError> for EngineError {
    fn from(e: DatasetLoadError) -> Self {
        EngineError::Dataset(e)
    }
}

impl From<RasterizeError> for EngineError {
    fn from(e: RasterizeError) -> Self {
        EngineError::Rasterize(e)
    }
}
