use formats::Feature;

use crate::identity::{ColorCode, FeatureIdx};
use crate::rasterizer::BaseLayers;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedFeature<'a> {
    pub code: ColorCode,
    pub index: FeatureIdx,
    pub feature: &'a Feature,
}

/// Outcome of a surface query. Longitude and latitude are always reported,
/// even over the ocean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult<'a> {
    pub feature: Option<PickedFeature<'a>>,
    pub longitude: f64,
    pub latitude: f64,
}

impl BaseLayers {
    /// Resolves a surface UV to the country drawn there.
    ///
    /// Reads exactly one identity pixel; the visual raster is never consulted.
    pub fn pick(&self, u: f64, v: f64) -> PickResult<'_> {
        let (longitude, latitude) = self.projector.lon_lat_from_uv(u, v);
        let (x, y) = self.projector.pixel_from_uv(u, v);
        let feature = self
            .identity
            .pixel(x, y)
            .and_then(ColorCode::from_rgba)
            .and_then(|code| {
                let index = self.index.feature(code)?;
                let feature = self.feature(index)?;
                Some(PickedFeature {
                    code,
                    index,
                    feature,
                })
            });
        PickResult {
            feature,
            longitude,
            latitude,
        }
    }

    pub fn pick_lon_lat(&self, lon_deg: f64, lat_deg: f64) -> PickResult<'_> {
        let (u, v) = self.projector.uv_from_lon_lat(lon_deg, lat_deg);
        self.pick(u, v)
    }
}
