/// Geographic position in degrees, stored in GeoJSON `[lon, lat]` order.
///
/// Longitude is not range-checked: unwrapped rings legitimately carry values
/// outside `[-180, 180]`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Wraps a longitude into `[-180, 180)`.
pub fn wrap_lon_deg(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}
