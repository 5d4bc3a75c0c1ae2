//! Equirectangular (plate carrée) raster projection.
//!
//! Raster row 0 is the top of the image (geographic north). Surface UVs follow
//! the sphere mesh: `v = 0` is the south pole, `v = 1` the north pole. Mixing
//! the two conventions flips the globe north/south, so every pixel lookup goes
//! through [`Equirectangular::pixel_from_uv`].

/// Horizontal copy of the raster a shape is drawn at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WrapShift {
    West,
    Center,
    East,
}

impl WrapShift {
    /// Draw order for seamless coverage across the left/right raster edge.
    pub const ALL: [WrapShift; 3] = [WrapShift::West, WrapShift::Center, WrapShift::East];

    pub fn offset_px(self, width: f64) -> f64 {
        match self {
            WrapShift::West => -width,
            WrapShift::Center => 0.0,
            WrapShift::East => width,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Equirectangular {
    width: u32,
    height: u32,
}

impl Equirectangular {
    /// Zero dimensions are bumped to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Projects a (possibly unwrapped) lon/lat to continuous pixel coordinates.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64, shift: WrapShift) -> [f64; 2] {
        let w = self.width as f64;
        let h = self.height as f64;
        let x = ((lon_deg + 180.0) / 360.0) * w + shift.offset_px(w);
        let y = ((90.0 - lat_deg) / 180.0) * h;
        [x, y]
    }

    /// Surface UV to `(lon, lat)` in degrees. UV is wrapped into `[0, 1)` first.
    pub fn lon_lat_from_uv(&self, u: f64, v: f64) -> (f64, f64) {
        let u = wrap_unit(u);
        let v = wrap_unit(v);
        (u * 360.0 - 180.0, -90.0 + 180.0 * v)
    }

    /// Exact inverse of [`Self::lon_lat_from_uv`] for in-range inputs.
    pub fn uv_from_lon_lat(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        ((lon_deg + 180.0) / 360.0, (lat_deg + 90.0) / 180.0)
    }

    /// Pixel holding the surface point `(u, v)`, clamped to the raster.
    pub fn pixel_from_uv(&self, u: f64, v: f64) -> (u32, u32) {
        let u = wrap_unit(u);
        let v = wrap_unit(v);
        let px = (u * self.width as f64).floor();
        let py = ((1.0 - v) * self.height as f64).floor();
        (
            clamp_px(px, self.width),
            clamp_px(py, self.height),
        )
    }
}

/// Wraps any finite value into `[0, 1)`; non-finite input maps to 0.
pub fn wrap_unit(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let r = x.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if r >= 1.0 { 0.0 } else { r }
}

fn clamp_px(p: f64, extent: u32) -> u32 {
    if p.is_nan() || p < 0.0 {
        0
    } else if p >= extent as f64 {
        extent - 1
    } else {
        p as u32
    }
}
