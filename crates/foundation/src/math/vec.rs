/// Above this cosine two unit vectors are treated as parallel and slerp falls
/// back to a normalized lerp (about 0.0316 rad of separation).
pub const SLERP_PARALLEL_DOT: f64 = 0.9995;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn normalize(self) -> Option<Self> {
        let l2 = self.dot(self);
        if l2 <= 1e-24 || !l2.is_finite() {
            return None;
        }
        Some(self.scale(1.0 / l2.sqrt()))
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self).scale(t)
    }

    pub fn as_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Spherical linear interpolation between two unit vectors.
    ///
    /// - Nearly parallel inputs use a normalized lerp to avoid dividing by a
    ///   vanishing `sin(omega)`.
    /// - Nearly antipodal inputs have no unique shortest arc; the path is routed
    ///   through a deterministic midpoint perpendicular to `a` (see
    ///   [`antipodal_midpoint`]), so the result stays on the sphere.
    ///
    /// The result is always re-normalized; a degenerate input returns `a`.
    pub fn slerp_unit(self, other: Self, t: f64) -> Self {
        let a = self;
        let b = other;
        let dot = a.dot(b).clamp(-1.0, 1.0);

        if dot > SLERP_PARALLEL_DOT {
            return a.lerp(b, t).normalize().unwrap_or(a);
        }

        if dot < -SLERP_PARALLEL_DOT {
            let mid = antipodal_midpoint(a);
            return if t <= 0.5 {
                a.slerp_unit(mid, t * 2.0)
            } else {
                mid.slerp_unit(b, t * 2.0 - 1.0)
            };
        }

        let omega = dot.acos();
        let sin_omega = omega.sin();
        let a_scale = ((1.0 - t) * omega).sin() / sin_omega;
        let b_scale = (t * omega).sin() / sin_omega;
        (a.scale(a_scale) + b.scale(b_scale))
            .normalize()
            .unwrap_or(a)
    }
}

/// Unit vector perpendicular to `a`, used as the halfway point of a flight
/// between antipodes. Prefers the axis orthogonal to world up so paths stay
/// level; falls back to world X when `a` is a pole.
pub fn antipodal_midpoint(a: Vec3) -> Vec3 {
    a.cross(Vec3::Y)
        .normalize()
        .or_else(|| a.cross(Vec3::X).normalize())
        .unwrap_or(Vec3::Z)
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::{Vec2, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        assert_close(a.x, b.x, eps);
        assert_close(a.y, b.y, eps);
        assert_close(a.z, b.z, eps);
    }

    #[test]
    fn vec2_add_sub() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-0.5, 4.0);
        assert_eq!(a + b, Vec2::new(0.5, 6.0));
        assert_eq!(a - b, Vec2::new(1.5, -2.0));
        assert_eq!((a - b).length_squared(), 6.25);
    }

    #[test]
    fn vec3_add_sub_dot() {
        let a = Vec3::new(1.0, 2.0, -1.0);
        let b = Vec3::new(0.5, -2.0, 3.0);
        assert_eq!(a + b, Vec3::new(1.5, 0.0, 2.0));
        assert_eq!(a - b, Vec3::new(0.5, 4.0, -4.0));
        assert_eq!(a.dot(b), -6.5);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn normalize_rejects_zero() {
        assert!(Vec3::ZERO.normalize().is_none());
        let n = Vec3::new(0.0, 3.0, 4.0).normalize().expect("unit");
        assert_close(n.length(), 1.0, 1e-12);
    }

    #[test]
    fn slerp_quarter_turn_midpoint() {
        let mid = Vec3::X.slerp_unit(Vec3::Y, 0.5);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert_vec_close(mid, Vec3::new(h, h, 0.0), 1e-12);
    }

    #[test]
    fn slerp_endpoints() {
        let a = Vec3::new(1.0, 1.0, 0.0).normalize().expect("unit");
        let b = Vec3::new(0.0, 0.2, -1.0).normalize().expect("unit");
        assert_vec_close(a.slerp_unit(b, 0.0), a, 1e-12);
        assert_vec_close(a.slerp_unit(b, 1.0), b, 1e-12);
    }

    #[test]
    fn slerp_near_parallel_stays_unit() {
        let a = Vec3::X;
        let b = Vec3::new(1.0, 0.01, 0.0).normalize().expect("unit");
        let mid = a.slerp_unit(b, 0.5);
        assert_close(mid.length(), 1.0, 1e-12);
        assert!(mid.y > 0.0 && mid.y < b.y);
    }

    #[test]
    fn slerp_antipodal_stays_on_sphere() {
        let a = Vec3::X;
        let b = -Vec3::X;
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p = a.slerp_unit(b, t);
            assert_close(p.length(), 1.0, 1e-9);
        }
        let mid = a.slerp_unit(b, 0.5);
        assert_close(mid.dot(a), 0.0, 1e-9);
        assert_vec_close(a.slerp_unit(b, 1.0), b, 1e-9);
    }
}
