//! Builds the visual and identity rasters from a feature collection.
//!
//! Both rasters are produced by the same projector and the same sequence of
//! fill calls, so a pixel of the identity raster always names the country
//! drawn at that pixel of the visual raster. Only the paint differs: the
//! identity raster is aliased and written with replace blending so every
//! pixel holds an exact code.

use formats::{Feature, FeatureCollection, PolygonRings};
use foundation::math::{Equirectangular, WrapShift, unwrap_ring};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::identity::{ColorCode, FeatureIdx, IdentityIndex};
use crate::raster::{FillRule, Paint, RasterBuffer, Stroke};
use crate::symbology::{BaseStyle, Rgba};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterizeError {
    /// More polygonal features than 24-bit codes.
    CodeSpaceExhausted { feature: usize },
}

impl std::fmt::Display for RasterizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterizeError::CodeSpaceExhausted { feature } => write!(
                f,
                "feature {feature} needs a color code beyond the 24-bit code space"
            ),
        }
    }
}

impl std::error::Error for RasterizeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildReport {
    pub features: usize,
    pub coded: usize,
    pub skipped: usize,
}

/// The immutable output of a build.
#[derive(Debug, Clone)]
pub struct BaseLayers {
    pub visual: RasterBuffer,
    pub identity: RasterBuffer,
    pub index: IdentityIndex,
    pub features: FeatureCollection,
    pub projector: Equirectangular,
    pub report: BuildReport,
}

impl BaseLayers {
    pub fn feature(&self, idx: FeatureIdx) -> Option<&Feature> {
        self.features.get(idx.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rasterizer {
    projector: Equirectangular,
    style: BaseStyle,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, style: BaseStyle) -> Self {
        Self {
            projector: Equirectangular::new(width, height),
            style,
        }
    }

    pub fn projector(&self) -> Equirectangular {
        self.projector
    }

    pub fn build(&self, features: FeatureCollection) -> Result<BaseLayers, RasterizeError> {
        let (w, h) = (self.projector.width(), self.projector.height());
        let mut visual = RasterBuffer::new(w, h);
        let mut identity = RasterBuffer::new(w, h);
        visual.fill(self.style.ocean);
        identity.fill(Rgba::BLACK);

        let land = Paint::smooth(self.style.land_fill);
        let border = Stroke {
            color: self.style.border,
            width: self.style.border_width,
            opacity: self.style.border_opacity,
        };

        let mut index = IdentityIndex::new();
        let mut next_code = Some(ColorCode::FIRST);
        let mut report = BuildReport {
            features: features.len(),
            ..BuildReport::default()
        };

        for (i, feature) in features.features.iter().enumerate() {
            let Some(geometry) = &feature.geometry else {
                debug!(feature = i, name = feature.display_name(), "no polygonal geometry, skipped");
                report.skipped += 1;
                continue;
            };
            let code = next_code.ok_or(RasterizeError::CodeSpaceExhausted { feature: i })?;
            next_code = code.next();
            index.insert(code, FeatureIdx(i));
            report.coded += 1;

            let exact = Paint::exact(code.to_rgba());
            for polygon in geometry.polygons() {
                for shift in WrapShift::ALL {
                    let rings = project_polygon(&self.projector, polygon, shift);
                    visual.fill_polygon(&rings, land, FillRule::EvenOdd);
                    identity.fill_polygon(&rings, exact, FillRule::EvenOdd);
                    if let Some(outer) = rings.first() {
                        visual.stroke_polyline(outer, true, border);
                    }
                }
            }
        }

        info!(
            width = w,
            height = h,
            features = report.features,
            coded = report.coded,
            skipped = report.skipped,
            "built base layers"
        );

        Ok(BaseLayers {
            visual,
            identity,
            index,
            features,
            projector: self.projector,
            report,
        })
    }
}

/// Unwraps every ring across the antimeridian and projects it at `shift`.
pub(crate) fn project_polygon(
    projector: &Equirectangular,
    polygon: &PolygonRings,
    shift: WrapShift,
) -> Vec<Vec<[f64; 2]>> {
    polygon
        .iter()
        .map(|ring| {
            unwrap_ring(ring)
                .iter()
                .map(|p| projector.forward(p.lon_deg, p.lat_deg, shift))
                .collect()
        })
        .collect()
}
