use serde::{Deserialize, Serialize};

/// Globe and camera dimensions in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub globe_radius: f64,
    /// Closest the camera may orbit (distance from the globe center).
    pub min_distance: f64,
    pub max_distance: f64,
    pub initial_distance: f64,
    pub flight_duration_ms: f64,
    /// Lift of the pin tip above the surface.
    pub pin_tip_offset: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            globe_radius: 2.0,
            min_distance: 3.2,
            max_distance: 16.0,
            initial_distance: 6.0,
            flight_duration_ms: 1000.0,
            pin_tip_offset: 0.01,
        }
    }
}

impl NavigationConfig {
    /// Clamps `distance` into the allowed orbit range.
    ///
    /// Inverted bounds are tolerated: the larger value wins as the maximum.
    pub fn clamp_distance(&self, distance: f64) -> f64 {
        let lo = self.min_distance.min(self.max_distance);
        let hi = self.min_distance.max(self.max_distance);
        if distance.is_nan() {
            return lo;
        }
        distance.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationConfig;

    #[test]
    fn clamps_into_orbit_range() {
        let cfg = NavigationConfig::default();
        assert_eq!(cfg.clamp_distance(1.0), 3.2);
        assert_eq!(cfg.clamp_distance(100.0), 16.0);
        assert_eq!(cfg.clamp_distance(6.0), 6.0);
        assert_eq!(cfg.clamp_distance(f64::NAN), 3.2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: NavigationConfig =
            serde_json::from_str(r#"{ "flight_duration_ms": 500 }"#).expect("json");
        assert_eq!(cfg.flight_duration_ms, 500.0);
        assert_eq!(cfg.globe_radius, 2.0);
    }
}
