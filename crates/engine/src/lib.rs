pub mod config;
pub mod error;
pub mod globe;
pub mod tap;

pub use config::{ConfigError, EngineConfig, RasterConfig};
pub use error::EngineError;
pub use globe::GlobeEngine;
pub use tap::{SurfaceHit, TapOutcome};
