//! Unit-sphere conventions shared by the globe mesh, picking and the camera.
//!
//! Viewer space is a permuted ECEF with +Y through the north pole:
//! `dir = (cos lat cos lon, sin lat, -cos lat sin lon)`, so +lon (east) maps to -Z.
//! This is the same parametrization a UV sphere mesh uses when
//! `u = (lon + 180) / 360` and `v = (lat + 90) / 180`.

use super::Vec3;

pub fn unit_from_lon_lat_deg(lon_deg: f64, lat_deg: f64) -> Vec3 {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let cos_lat = lat.cos();
    Vec3::new(cos_lat * lon.cos(), lat.sin(), -cos_lat * lon.sin())
}

/// Inverse of [`unit_from_lon_lat_deg`]. Accepts any non-zero vector.
pub fn lon_lat_deg_from_unit(u: Vec3) -> (f64, f64) {
    let Some(u) = u.normalize() else {
        return (0.0, 0.0);
    };
    let lon = (-u.z).atan2(u.x).to_degrees();
    let lat = u.y.clamp(-1.0, 1.0).asin().to_degrees();
    (lon, lat)
}
