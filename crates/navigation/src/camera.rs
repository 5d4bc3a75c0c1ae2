use foundation::math::Vec3;

/// Perspective camera orbiting the globe center.
///
/// The camera always looks at [`OrbitCamera::target`]. `manual_control` mirrors
/// whether user orbit/zoom input should be applied; it is off while a flight
/// owns the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub manual_control: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::at_distance(6.0)
    }
}

impl OrbitCamera {
    /// Camera on the +Z axis looking at the origin.
    pub fn at_distance(distance: f64) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            manual_control: true,
        }
    }

    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }

    /// Unit vector from the target toward the camera.
    pub fn direction(&self) -> Option<Vec3> {
        (self.position - self.target).normalize()
    }

    /// Moves along the current view ray to `distance` from the target.
    pub fn set_distance(&mut self, distance: f64) {
        if let Some(dir) = self.direction() {
            self.position = self.target + dir.scale(distance);
        }
    }
}
