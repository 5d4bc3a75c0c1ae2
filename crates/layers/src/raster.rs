//! Owned RGBA8 raster with a scanline polygon filler.
//!
//! Coordinates are continuous pixel space: pixel `(x, y)` covers
//! `[x, x + 1) x [y, y + 1)` and its center is `(x + 0.5, y + 0.5)`. Shapes may
//! extend past the raster; everything outside `[0, width) x [0, height)` is
//! clipped.

use crate::symbology::Rgba;

/// Vertical samples per pixel row when anti-aliasing.
const AA_SUBSAMPLES: u32 = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Blend {
    /// Straight-alpha compositing over the existing pixel.
    SourceOver,
    /// Overwrite the pixel with the paint color.
    Replace,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Paint {
    pub color: Rgba,
    pub blend: Blend,
    pub antialias: bool,
}

impl Paint {
    /// Aliased replace: every covered pixel receives exactly `color`.
    pub fn exact(color: Rgba) -> Self {
        Self {
            color,
            blend: Blend::Replace,
            antialias: false,
        }
    }

    /// Anti-aliased source-over.
    pub fn smooth(color: Rgba) -> Self {
        Self {
            color,
            blend: Blend::SourceOver,
            antialias: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    /// Multiplies the color's own alpha.
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    revision: u64,
}

impl RasterBuffer {
    /// Fully transparent raster. Zero dimensions are bumped to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bumped on every mutation; hosts re-upload the texture when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn fill(&mut self, color: Rgba) {
        let px = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.fill(Rgba::TRANSPARENT);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let i = self.offset(x, y)?;
        let p = &self.pixels[i..i + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color.to_array());
            self.revision += 1;
        }
    }

    /// Row-major RGBA8, top row first.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    pub fn is_transparent(&self) -> bool {
        self.pixels.chunks_exact(4).all(|p| p[3] == 0)
    }

    pub fn count_pixels(&self, mut pred: impl FnMut(Rgba) -> bool) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|p| pred(Rgba::new(p[0], p[1], p[2], p[3])))
            .count()
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Fills the region enclosed by `rings` under `rule`.
    ///
    /// Rings are implicitly closed. Holes are expressed as extra rings; with
    /// `EvenOdd` their orientation does not matter.
    pub fn fill_polygon(&mut self, rings: &[Vec<[f64; 2]>], paint: Paint, rule: FillRule) {
        let Some(mut scanner) = Scanner::new(rings) else {
            return;
        };
        if scanner.max_x <= 0.0 || scanner.min_x >= self.width as f64 {
            return;
        }
        let row_start = scanner.min_y.floor().max(0.0) as u32;
        let row_end = (scanner.max_y.ceil().min(self.height as f64)).max(0.0) as u32;
        if row_start >= row_end {
            return;
        }

        let mut spans = Vec::new();
        if paint.antialias {
            let mut coverage = vec![0.0f32; self.width as usize];
            let weight = 1.0 / AA_SUBSAMPLES as f32;
            for row in row_start..row_end {
                let mut touched: Option<(usize, usize)> = None;
                for s in 0..AA_SUBSAMPLES {
                    let sy = row as f64 + (s as f64 + 0.5) / AA_SUBSAMPLES as f64;
                    scanner.spans_at(sy, rule, &mut spans);
                    for &(xa, xb) in &spans {
                        let xa = xa.max(0.0);
                        let xb = xb.min(self.width as f64);
                        if xb <= xa {
                            continue;
                        }
                        let first = xa.floor() as usize;
                        let last = (xb.ceil() as usize).saturating_sub(1);
                        for (px, cov) in coverage.iter_mut().enumerate().take(last + 1).skip(first) {
                            let left = xa.max(px as f64);
                            let right = xb.min(px as f64 + 1.0);
                            if right > left {
                                *cov += (right - left) as f32 * weight;
                            }
                        }
                        touched = Some(match touched {
                            Some((lo, hi)) => (lo.min(first), hi.max(last)),
                            None => (first, last),
                        });
                    }
                }
                if let Some((lo, hi)) = touched {
                    for px in lo..=hi {
                        let cov = coverage[px].min(1.0);
                        coverage[px] = 0.0;
                        if cov > 0.0 {
                            self.blend_pixel(px as u32, row, paint, cov);
                        }
                    }
                }
            }
        } else {
            for row in row_start..row_end {
                scanner.spans_at(row as f64 + 0.5, rule, &mut spans);
                for &(xa, xb) in &spans {
                    // Pixels whose center lies in [xa, xb).
                    let first = (xa - 0.5).ceil().max(0.0);
                    let end = (xb - 0.5).ceil().min(self.width as f64);
                    if end <= first {
                        continue;
                    }
                    for px in first as u32..end as u32 {
                        self.blend_pixel(px, row, paint, 1.0);
                    }
                }
            }
        }
        self.revision += 1;
    }

    /// Strokes a polyline as the union of square-capped segment quads.
    pub fn stroke_polyline(&mut self, points: &[[f64; 2]], closed: bool, stroke: Stroke) {
        if points.len() < 2 || !(stroke.width > 0.0) {
            return;
        }
        let half = stroke.width / 2.0;
        let mut quads = Vec::with_capacity(points.len());
        let mut push_segment = |a: [f64; 2], b: [f64; 2]| {
            let dx = b[0] - a[0];
            let dy = b[1] - a[1];
            let len = (dx * dx + dy * dy).sqrt();
            if !(len > 0.0) || !len.is_finite() {
                return;
            }
            let (ux, uy) = (dx / len * half, dy / len * half);
            // Left normal; every quad winds the same way, so NonZero unions them.
            let (nx, ny) = (-uy, ux);
            let a = [a[0] - ux, a[1] - uy];
            let b = [b[0] + ux, b[1] + uy];
            quads.push(vec![
                [a[0] + nx, a[1] + ny],
                [b[0] + nx, b[1] + ny],
                [b[0] - nx, b[1] - ny],
                [a[0] - nx, a[1] - ny],
            ]);
        };
        for pair in points.windows(2) {
            push_segment(pair[0], pair[1]);
        }
        if closed && let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            push_segment(last, first);
        }
        let color = stroke.color.fade(stroke.opacity);
        self.fill_polygon(&quads, Paint::smooth(color), FillRule::NonZero);
    }

    fn blend_pixel(&mut self, x: u32, y: u32, paint: Paint, coverage: f32) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let src = paint.color;
        let dst = &mut self.pixels[i..i + 4];
        match paint.blend {
            Blend::Replace => {
                if coverage >= 0.5 {
                    dst.copy_from_slice(&src.to_array());
                }
            }
            Blend::SourceOver => {
                let sa = src.a as f32 / 255.0 * coverage;
                if sa <= 0.0 {
                    return;
                }
                let da = dst[3] as f32 / 255.0;
                let out_a = sa + da * (1.0 - sa);
                if out_a <= 0.0 {
                    return;
                }
                let mix = |s: u8, d: u8| {
                    let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
                    c.round().clamp(0.0, 255.0) as u8
                };
                dst[0] = mix(src.r, dst[0]);
                dst[1] = mix(src.g, dst[1]);
                dst[2] = mix(src.b, dst[2]);
                dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct Edge {
    x_top: f64,
    y_top: f64,
    y_bottom: f64,
    dx_dy: f64,
    winding: i32,
}

/// Active-edge scan converter. Sample rows must be queried in increasing order.
struct Scanner {
    edges: Vec<Edge>,
    next: usize,
    active: Vec<usize>,
    crossings: Vec<(f64, i32)>,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Scanner {
    fn new(rings: &[Vec<[f64; 2]>]) -> Option<Self> {
        let mut edges = Vec::new();
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for ring in rings {
            let n = ring.len();
            if n < 2 {
                continue;
            }
            for i in 0..n {
                let a = ring[i];
                let b = ring[(i + 1) % n];
                if !(a[0].is_finite() && a[1].is_finite() && b[0].is_finite() && b[1].is_finite())
                {
                    continue;
                }
                if a[1] == b[1] {
                    continue;
                }
                let (top, bottom, winding) = if a[1] < b[1] { (a, b, 1) } else { (b, a, -1) };
                min_x = min_x.min(a[0].min(b[0]));
                max_x = max_x.max(a[0].max(b[0]));
                min_y = min_y.min(top[1]);
                max_y = max_y.max(bottom[1]);
                edges.push(Edge {
                    x_top: top[0],
                    y_top: top[1],
                    y_bottom: bottom[1],
                    dx_dy: (bottom[0] - top[0]) / (bottom[1] - top[1]),
                    winding,
                });
            }
        }
        if edges.is_empty() {
            return None;
        }
        edges.sort_by(|a, b| a.y_top.total_cmp(&b.y_top));
        Some(Self {
            edges,
            next: 0,
            active: Vec::new(),
            crossings: Vec::new(),
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Interior spans `[xa, xb)` of the horizontal line `y = sy`.
    fn spans_at(&mut self, sy: f64, rule: FillRule, out: &mut Vec<(f64, f64)>) {
        out.clear();
        while self.next < self.edges.len() && self.edges[self.next].y_top <= sy {
            self.active.push(self.next);
            self.next += 1;
        }
        let edges = &self.edges;
        self.active.retain(|&i| edges[i].y_bottom > sy);

        self.crossings.clear();
        for &i in &self.active {
            let e = &edges[i];
            self.crossings
                .push((e.x_top + (sy - e.y_top) * e.dx_dy, e.winding));
        }
        self.crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        match rule {
            FillRule::EvenOdd => {
                for pair in self.crossings.chunks_exact(2) {
                    out.push((pair[0].0, pair[1].0));
                }
            }
            FillRule::NonZero => {
                let mut winding = 0;
                let mut start = 0.0;
                for &(x, w) in &self.crossings {
                    let before = winding;
                    winding += w;
                    if before == 0 && winding != 0 {
                        start = x;
                    } else if before != 0 && winding == 0 {
                        out.push((start, x));
                    }
                }
            }
        }
    }
}
