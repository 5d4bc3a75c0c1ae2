//! The globe interaction context.
//!
//! `GlobeEngine` owns every piece of mutable state: the immutable base
//! layers, the highlight overlay, the camera with its flight controller, the
//! gesture classifier, the pin and the current selection. The host feeds it
//! pointer events and frame ticks with its own timestamps and reads the
//! rasters and camera back out.

use std::path::Path;

use formats::{Feature, FeatureCollection, FeatureSummary, load_feature_collection};
use foundation::math::{lon_lat_deg_from_unit, unit_from_lon_lat_deg};
use foundation::time::Time;
use layers::{BaseLayers, FeatureIdx, HighlightLayer, RasterBuffer, Rasterizer};
use navigation::{FlightController, GestureClassifier, GestureOutcome, OrbitCamera, PinPose};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::tap::{SurfaceHit, TapOutcome};

#[derive(Debug)]
pub struct GlobeEngine {
    config: EngineConfig,
    base: BaseLayers,
    highlight: HighlightLayer,
    flight: FlightController,
    gestures: GestureClassifier,
    camera: OrbitCamera,
    pin: Option<PinPose>,
    selection: Option<FeatureIdx>,
}

impl GlobeEngine {
    /// Builds the base layers synchronously; picking is available as soon as
    /// this returns.
    pub fn new(features: FeatureCollection, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let raster = &config.raster;
        let base = Rasterizer::new(raster.width, raster.height, raster.style).build(features)?;
        let highlight = HighlightLayer::new(base.projector, config.highlight);
        let camera =
            OrbitCamera::at_distance(config.navigation.clamp_distance(config.navigation.initial_distance));

        info!(
            width = raster.width,
            height = raster.height,
            coded = base.index.len(),
            "globe engine ready"
        );

        Ok(Self {
            config,
            base,
            highlight,
            flight: FlightController::new(config.navigation),
            gestures: GestureClassifier::new(config.gesture),
            camera,
            pin: None,
            selection: None,
        })
    }

    pub fn from_geojson_path(
        path: impl AsRef<Path>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let features = load_feature_collection(path)?;
        Self::new(features, config)
    }

    /// Starts a gesture. Any flight in progress stops where it is.
    pub fn on_pointer_down(&mut self, pos: [f64; 2], now: Time) {
        self.gestures.pointer_down(pos, now);
        self.flight.cancel(&mut self.camera);
    }

    pub fn on_pointer_move(&mut self, pos: [f64; 2]) {
        self.gestures.pointer_move(pos);
    }

    /// Ends a gesture. Taps are ray-cast through `ray_cast`; a hit is
    /// selected. Drags, holds and misses return `None` without side effects.
    pub fn on_pointer_up<F>(&mut self, pos: [f64; 2], now: Time, mut ray_cast: F) -> Option<TapOutcome>
    where
        F: FnMut([f64; 2]) -> Option<SurfaceHit>,
    {
        match self.gestures.pointer_up(pos, now) {
            GestureOutcome::Tap => {}
            other => {
                debug!(?other, "not a tap");
                return None;
            }
        }
        let Some(hit) = ray_cast(pos) else {
            debug!(x = pos[0], y = pos[1], "tap missed the globe");
            return None;
        };
        Some(self.select(hit, now))
    }

    /// Resolves `hit`, updates the highlight and pin, and flies toward it.
    pub fn select(&mut self, hit: SurfaceHit, now: Time) -> TapOutcome {
        let [u, v] = hit.uv;
        let picked = self.base.pick(u, v);
        let (longitude, latitude) = (picked.longitude, picked.latitude);

        let feature = match picked.feature {
            Some(p) => {
                self.highlight.paint(p.feature);
                self.selection = Some(p.index);
                Some(FeatureSummary::from_properties(
                    p.code.get(),
                    &p.feature.properties,
                ))
            }
            None => {
                self.highlight.clear();
                self.selection = None;
                None
            }
        };

        let nav = &self.config.navigation;
        let direction = hit
            .point
            .normalize()
            .unwrap_or_else(|| unit_from_lon_lat_deg(longitude, latitude));
        self.pin = PinPose::at_direction(direction, nav.globe_radius, nav.pin_tip_offset);
        self.flight
            .start(direction, nav.flight_duration_ms, &mut self.camera, now);

        let outcome = TapOutcome {
            longitude,
            latitude,
            feature,
        };
        debug!(status = %outcome, "selected");
        outcome
    }

    /// Advances animations. Returns `true` if the camera moved.
    pub fn tick(&mut self, now: Time) -> bool {
        self.flight.tick(now, &mut self.camera)
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.gestures.set_device_pixel_ratio(ratio);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn base(&self) -> &BaseLayers {
        &self.base
    }

    pub fn visual(&self) -> &RasterBuffer {
        &self.base.visual
    }

    pub fn identity(&self) -> &RasterBuffer {
        &self.base.identity
    }

    pub fn highlight(&self) -> &RasterBuffer {
        self.highlight.buffer()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// User orbit/zoom input goes through here; it is ignored mid-flight.
    pub fn camera_mut(&mut self) -> Option<&mut OrbitCamera> {
        if self.camera.manual_control {
            Some(&mut self.camera)
        } else {
            None
        }
    }

    /// Geographic position under the camera, `(lon, lat)` in degrees.
    pub fn camera_lon_lat(&self) -> (f64, f64) {
        lon_lat_deg_from_unit(self.camera.position - self.camera.target)
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_flying()
    }

    pub fn pin(&self) -> Option<&PinPose> {
        self.pin.as_ref()
    }

    pub fn selection(&self) -> Option<&Feature> {
        self.selection.and_then(|idx| self.base.feature(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::GlobeEngine;
    use crate::config::EngineConfig;
    use crate::tap::SurfaceHit;
    use formats::FeatureCollection;
    use foundation::math::unit_from_lon_lat_deg;
    use foundation::time::Time;
    use std::cell::Cell;

    const SAMPLE: &str = include_str!("../../tools/assets/sample_countries.geojson");

    fn engine() -> GlobeEngine {
        let mut cfg = EngineConfig::default();
        cfg.raster.width = 720;
        cfg.raster.height = 360;
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        GlobeEngine::new(fc, cfg).expect("engine")
    }

    fn ms(v: f64) -> Time {
        Time::from_millis(v)
    }

    fn tap(engine: &mut GlobeEngine, at: f64, lon: f64, lat: f64) -> Option<crate::TapOutcome> {
        engine.on_pointer_down([10.0, 10.0], ms(at));
        engine.on_pointer_up([10.0, 10.0], ms(at + 80.0), |_| {
            Some(SurfaceHit::from_lon_lat(lon, lat, 2.0))
        })
    }

    #[test]
    fn tap_selects_highlights_pins_and_flies() {
        let mut e = engine();
        let outcome = tap(&mut e, 0.0, 12.0, 18.0).expect("tap");
        let feature = outcome.feature.as_ref().expect("feature");
        assert_eq!(feature.name, "Squareland");
        assert_eq!(feature.iso3.as_deref(), Some("SQL"));
        assert_eq!(outcome.status_line(), "Lat 18.0000°, Lon 12.0000° — Squareland (SQL)");

        assert_eq!(e.selection().map(|f| f.display_name()), Some("Squareland"));
        assert!(!e.highlight().is_transparent());
        let pin = e.pin().expect("pin");
        assert!((pin.position.length() - 2.01).abs() < 1e-12);

        assert!(e.is_flying());
        assert!(e.camera_mut().is_none());
        assert!(e.tick(ms(1080.0)));
        let dir = unit_from_lon_lat_deg(12.0, 18.0);
        let cam = e.camera().position;
        assert!((cam - dir.scale(6.0)).length() < 1e-9);
        let (lon, lat) = e.camera_lon_lat();
        assert!((lon - 12.0).abs() < 1e-9 && (lat - 18.0).abs() < 1e-9);
        assert!(!e.is_flying());
        assert!(e.camera_mut().is_some());
    }

    #[test]
    fn ocean_tap_clears_the_selection() {
        let mut e = engine();
        tap(&mut e, 0.0, 12.0, 18.0);
        let outcome = tap(&mut e, 200.0, -150.0, 0.0).expect("tap");
        assert!(outcome.feature.is_none());
        assert_eq!(outcome.status_line(), "Lat 0.0000°, Lon -150.0000°");
        assert!(e.selection().is_none());
        assert!(e.highlight().is_transparent());
        // The pin still marks the tapped spot.
        assert!(e.pin().is_some());
    }

    #[test]
    fn only_the_latest_selection_is_highlighted() {
        let mut e = engine();
        tap(&mut e, 0.0, 12.0, 18.0);
        tap(&mut e, 200.0, -95.0, 45.0);
        let hl = e.highlight();
        // Squareland interior (lon 12, lat 18) at 720x360.
        assert_eq!(hl.pixel(384, 144).map(|p| p.a), Some(0));
        // Clockwise Republic interior (lon -95, lat 45).
        assert!(hl.pixel(170, 90).is_some_and(|p| p.a > 0));
    }

    #[test]
    fn both_sides_of_the_dateline_select_the_same_feature() {
        let mut e = engine();
        let east = tap(&mut e, 0.0, 179.5, -15.0).expect("tap");
        let west = tap(&mut e, 200.0, -179.5, -15.0).expect("tap");
        assert_eq!(east.feature, west.feature);
        assert_eq!(east.feature.map(|f| f.name).as_deref(), Some("Dateline Isles"));
    }

    #[test]
    fn drags_and_holds_never_ray_cast() {
        let mut e = engine();
        let casts = Cell::new(0);
        let cast = |_: [f64; 2]| {
            casts.set(casts.get() + 1);
            Some(SurfaceHit::from_lon_lat(12.0, 18.0, 2.0))
        };

        e.on_pointer_down([0.0, 0.0], ms(0.0));
        e.on_pointer_move([30.0, 0.0]);
        assert!(e.on_pointer_up([30.0, 0.0], ms(50.0), cast).is_none());

        e.on_pointer_down([0.0, 0.0], ms(100.0));
        assert!(e.on_pointer_up([0.0, 0.0], ms(500.0), cast).is_none());

        assert_eq!(casts.get(), 0);
        assert!(e.selection().is_none());
        assert!(!e.is_flying());
    }

    #[test]
    fn missed_ray_cast_changes_nothing() {
        let mut e = engine();
        e.on_pointer_down([0.0, 0.0], ms(0.0));
        assert!(e.on_pointer_up([0.0, 0.0], ms(10.0), |_| None).is_none());
        assert!(e.pin().is_none());
        assert!(e.highlight().is_transparent());
    }

    #[test]
    fn pointer_down_stops_a_flight_in_place() {
        let mut e = engine();
        tap(&mut e, 0.0, 12.0, 18.0);
        e.tick(ms(500.0));
        let frozen = e.camera().position;

        e.on_pointer_down([50.0, 50.0], ms(510.0));
        assert!(!e.is_flying());
        for t in [600.0, 1200.0, 3000.0] {
            assert!(!e.tick(ms(t)));
            assert_eq!(e.camera().position, frozen);
        }
    }

    #[test]
    fn select_wraps_out_of_range_uv() {
        let mut e = engine();
        let mut hit = SurfaceHit::from_lon_lat(12.0, 18.0, 2.0);
        hit.uv[0] += 2.0;
        let outcome = e.select(hit, ms(0.0));
        assert_eq!(outcome.feature.map(|f| f.code), Some(1));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.raster.width = 0;
        let err = GlobeEngine::new(FeatureCollection::default(), cfg).unwrap_err();
        assert!(err.to_string().contains("nonzero"));
    }

    #[test]
    fn loads_from_path() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../tools/assets/sample_countries.geojson");
        let mut cfg = EngineConfig::default();
        cfg.raster.width = 360;
        cfg.raster.height = 180;
        let e = GlobeEngine::from_geojson_path(path, cfg).expect("engine");
        assert_eq!(e.base().index.len(), 4);
        assert_eq!(e.camera().distance(), 6.0);
    }
}
