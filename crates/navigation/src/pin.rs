use foundation::math::{Quat, Vec3};

/// Placement of the location pin: tip on the surface, shaft along the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinPose {
    pub direction: Vec3,
    pub position: Vec3,
    /// Rotates the pin's local +Y axis onto `direction`.
    pub orientation: Quat,
}

impl PinPose {
    /// `None` when `dir` has no direction.
    pub fn at_direction(dir: Vec3, globe_radius: f64, tip_offset: f64) -> Option<Self> {
        let direction = dir.normalize()?;
        Some(Self {
            direction,
            position: direction.scale(globe_radius + tip_offset),
            orientation: Quat::from_unit_vectors(Vec3::Y, direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PinPose;
    use foundation::math::{Vec3, unit_from_lon_lat_deg};

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let d = (a - b).length();
        assert!(d <= eps, "expected {a:?} ~= {b:?} (diff {d})");
    }

    #[test]
    fn sits_just_above_the_surface() {
        let dir = unit_from_lon_lat_deg(-58.4, -34.6);
        let pin = PinPose::at_direction(dir.scale(7.0), 2.0, 0.01).expect("pin");
        assert!((pin.position.length() - 2.01).abs() < 1e-12);
        assert_vec_close(pin.direction, dir, 1e-12);
    }

    #[test]
    fn shaft_points_along_the_normal() {
        for (lon, lat) in [(0.0, 0.0), (121.5, 25.0), (-170.0, -80.0), (0.0, -90.0)] {
            let dir = unit_from_lon_lat_deg(lon, lat);
            let pin = PinPose::at_direction(dir, 2.0, 0.01).expect("pin");
            assert_vec_close(pin.orientation.rotate(Vec3::Y), dir, 1e-9);
        }
    }

    #[test]
    fn zero_direction_has_no_pose() {
        assert!(PinPose::at_direction(Vec3::ZERO, 2.0, 0.01).is_none());
    }
}
