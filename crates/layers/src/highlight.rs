use formats::Feature;
use foundation::math::{Equirectangular, WrapShift};

use crate::raster::{FillRule, Paint, RasterBuffer, Stroke};
use crate::rasterizer::project_polygon;
use crate::symbology::HighlightStyle;

/// Transparent overlay holding at most one selected feature.
///
/// Painted straight from geometry with the base projector, so it lines up
/// with the visual raster without reading it.
#[derive(Debug, Clone)]
pub struct HighlightLayer {
    buffer: RasterBuffer,
    projector: Equirectangular,
    style: HighlightStyle,
}

impl HighlightLayer {
    pub fn new(projector: Equirectangular, style: HighlightStyle) -> Self {
        Self {
            buffer: RasterBuffer::new(projector.width(), projector.height()),
            projector,
            style,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Replaces whatever was highlighted with `feature`.
    pub fn paint(&mut self, feature: &Feature) {
        self.clear();
        let Some(geometry) = &feature.geometry else {
            return;
        };
        let fill = Paint::smooth(self.style.fill);
        let outline = Stroke {
            color: self.style.outline,
            width: self.style.outline_width,
            opacity: 1.0,
        };
        for polygon in geometry.polygons() {
            for shift in WrapShift::ALL {
                let rings = project_polygon(&self.projector, polygon, shift);
                self.buffer.fill_polygon(&rings, fill, FillRule::EvenOdd);
                if let Some(outer) = rings.first() {
                    self.buffer.stroke_polyline(outer, true, outline);
                }
            }
        }
    }

    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    pub fn is_clear(&self) -> bool {
        self.buffer.is_transparent()
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::HighlightLayer;
    use crate::symbology::HighlightStyle;
    use formats::FeatureCollection;
    use foundation::math::Equirectangular;

    const SAMPLE: &str = include_str!("../../tools/assets/sample_countries.geojson");

    fn layer() -> HighlightLayer {
        HighlightLayer::new(Equirectangular::new(360, 180), HighlightStyle::default())
    }

    #[test]
    fn starts_clear() {
        let hl = layer();
        assert!(hl.is_clear());
        assert_eq!(hl.buffer().width(), 360);
    }

    #[test]
    fn paints_fill_and_outline() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        let mut hl = layer();
        hl.paint(&fc.features[0]);
        assert!(!hl.is_clear());
        let style = HighlightStyle::default();
        assert_eq!(hl.buffer().pixel(192, 72), Some(style.fill));
        // Hole stays transparent.
        assert_eq!(hl.buffer().pixel(195, 75).map(|p| p.a), Some(0));
        // Outline sits on the outer edge.
        let edge = hl.buffer().pixel(195, 70).expect("pixel");
        assert!(edge.a > style.fill.a);
    }

    #[test]
    fn second_paint_replaces_the_first() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        let mut hl = layer();
        hl.paint(&fc.features[0]);
        hl.paint(&fc.features[5]);
        assert_eq!(hl.buffer().pixel(192, 72).map(|p| p.a), Some(0));
        assert!(hl.buffer().pixel(85, 45).is_some_and(|p| p.a > 0));
        // Nothing painted outside Clockwise Republic's padded bounds.
        let outside = hl.buffer().count_pixels(|p| p.a > 0);
        assert!(outside <= 13 * 13, "painted {outside} pixels");
    }

    #[test]
    fn straddling_feature_wraps_around() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        let mut hl = layer();
        hl.paint(&fc.features[1]);
        assert!(hl.buffer().pixel(357, 105).is_some_and(|p| p.a > 0));
        assert!(hl.buffer().pixel(2, 105).is_some_and(|p| p.a > 0));
    }

    #[test]
    fn clear_and_geometryless_paint() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        let mut hl = layer();
        hl.paint(&fc.features[0]);
        hl.clear();
        assert!(hl.is_clear());
        hl.paint(&fc.features[0]);
        hl.paint(&fc.features[3]);
        assert!(hl.is_clear());
    }
}
