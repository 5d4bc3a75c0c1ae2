pub mod highlight;
pub mod identity;
pub mod query;
pub mod raster;
pub mod rasterizer;
pub mod symbology;

pub use highlight::HighlightLayer;
pub use identity::{ColorCode, FeatureIdx, IdentityIndex};
pub use query::{PickResult, PickedFeature};
pub use raster::{Blend, FillRule, Paint, RasterBuffer, Stroke};
pub use rasterizer::{BaseLayers, BuildReport, RasterizeError, Rasterizer};
pub use symbology::{BaseStyle, HighlightStyle, Rgba, RgbaParseError};
