use formats::FeatureSummary;
use foundation::math::{Vec3, unit_from_lon_lat_deg, wrap_lon_deg};
use serde::Serialize;

/// What the host's ray-caster reports for a screen position on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Mesh UV, `v = 0` at the south pole. Values outside `[0, 1)` are wrapped.
    pub uv: [f64; 2],
    /// Intersection point in scene space.
    pub point: Vec3,
}

impl SurfaceHit {
    /// Hit at a geographic position on a globe of `radius`, as a UV sphere
    /// mesh would report it.
    pub fn from_lon_lat(lon_deg: f64, lat_deg: f64, radius: f64) -> Self {
        let lon = wrap_lon_deg(lon_deg);
        Self {
            uv: [(lon + 180.0) / 360.0, (lat_deg + 90.0) / 180.0],
            point: unit_from_lon_lat_deg(lon_deg, lat_deg).scale(radius),
        }
    }
}

/// Result of a selection, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TapOutcome {
    pub longitude: f64,
    pub latitude: f64,
    pub feature: Option<FeatureSummary>,
}

impl TapOutcome {
    pub fn status_line(&self) -> String {
        let coords = format!("Lat {:.4}°, Lon {:.4}°", self.latitude, self.longitude);
        match &self.feature {
            Some(f) => format!(
                "{coords} — {} ({})",
                f.name,
                f.iso3.as_deref().unwrap_or("—")
            ),
            None => coords,
        }
    }
}

impl std::fmt::Display for TapOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.status_line())
    }
}

#[cfg(test)]
mod tests {
    use super::{SurfaceHit, TapOutcome};
    use formats::FeatureSummary;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_line_with_and_without_feature() {
        let mut outcome = TapOutcome {
            longitude: 121.56449,
            latitude: 25.03391,
            feature: Some(FeatureSummary {
                code: 7,
                name: "Taiwan".to_string(),
                iso3: Some("TWN".to_string()),
                continent: None,
            }),
        };
        assert_eq!(outcome.status_line(), "Lat 25.0339°, Lon 121.5645° — Taiwan (TWN)");

        if let Some(f) = outcome.feature.as_mut() {
            f.iso3 = None;
        }
        assert_eq!(outcome.to_string(), "Lat 25.0339°, Lon 121.5645° — Taiwan (—)");

        outcome.feature = None;
        assert_eq!(outcome.status_line(), "Lat 25.0339°, Lon 121.5645°");
    }

    #[test]
    fn hit_from_lon_lat() {
        let hit = SurfaceHit::from_lon_lat(0.0, 0.0, 2.0);
        assert_eq!(hit.uv, [0.5, 0.5]);
        assert!((hit.point.x - 2.0).abs() < 1e-12);
        let east = SurfaceHit::from_lon_lat(190.0, 0.0, 2.0);
        assert!((east.uv[0] - 10.0 / 360.0).abs() < 1e-12);
    }
}
