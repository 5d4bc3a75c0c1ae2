use std::path::Path;

use engine::{EngineConfig, GlobeEngine, SurfaceHit, TapOutcome};
use foundation::math::unit_from_lon_lat_deg;
use foundation::time::Time;

use crate::{ToolError, write_png};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickTarget {
    LonLat { lon: f64, lat: f64 },
    Uv { u: f64, v: f64 },
}

impl PickTarget {
    /// The hit a ray-cast onto the globe would report for this target.
    pub fn surface_hit(self, engine: &GlobeEngine) -> SurfaceHit {
        let radius = engine.config().navigation.globe_radius;
        match self {
            PickTarget::LonLat { lon, lat } => SurfaceHit::from_lon_lat(lon, lat, radius),
            PickTarget::Uv { u, v } => {
                let (lon, lat) = engine.base().projector.lon_lat_from_uv(u, v);
                SurfaceHit {
                    uv: [u, v],
                    point: unit_from_lon_lat_deg(lon, lat).scale(radius),
                }
            }
        }
    }
}

/// Selects `target` on a freshly built engine; optionally writes the
/// resulting highlight layer as PNG.
pub fn pick(
    input: &Path,
    target: PickTarget,
    config: EngineConfig,
    highlight_out: Option<&Path>,
) -> Result<TapOutcome, ToolError> {
    let mut engine = GlobeEngine::from_geojson_path(input, config)?;
    let hit = target.surface_hit(&engine);
    let outcome = engine.select(hit, Time::default());
    if let Some(path) = highlight_out {
        write_png(engine.highlight(), path)?;
    }
    Ok(outcome)
}
