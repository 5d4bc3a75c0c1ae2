use super::GeoPoint;

/// Largest longitude step allowed between consecutive vertices.
pub const MAX_LON_STEP_DEG: f64 = 180.0;

/// Unwraps a ring's longitudes so consecutive vertices never jump more than
/// 180 degrees.
///
/// Each crossing of the antimeridian shifts every later vertex by a further
/// +/-360 degrees, so a ring straddling the dateline comes out as one
/// continuous loop (for example `179, 181, 181, 179`) instead of a band
/// spanning the whole raster width.
pub fn unwrap_ring(ring: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut out = Vec::with_capacity(ring.len());
    let mut prev: Option<f64> = None;
    let mut offset = 0.0;

    for p in ring {
        let mut lon = p.lon_deg + offset;
        if let Some(prev) = prev {
            let diff = lon - prev;
            if diff > MAX_LON_STEP_DEG {
                offset -= 360.0;
                lon = p.lon_deg + offset;
            } else if diff < -MAX_LON_STEP_DEG {
                offset += 360.0;
                lon = p.lon_deg + offset;
            }
        }
        out.push(GeoPoint::new(lon, p.lat_deg));
        prev = Some(lon);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::unwrap_ring;
    use crate::math::GeoPoint;

    fn ring(lons: &[f64]) -> Vec<GeoPoint> {
        lons.iter().map(|&lon| GeoPoint::new(lon, 0.0)).collect()
    }

    fn lons(ring: &[GeoPoint]) -> Vec<f64> {
        ring.iter().map(|p| p.lon_deg).collect()
    }

    #[test]
    fn empty_and_single_vertex_pass_through() {
        assert!(unwrap_ring(&[]).is_empty());
        let one = ring(&[-179.0]);
        assert_eq!(unwrap_ring(&one), one);
    }

    #[test]
    fn ring_without_crossing_is_unchanged() {
        let r = ring(&[10.0, 20.0, 20.0, 10.0, 10.0]);
        assert_eq!(unwrap_ring(&r), r);
    }

    #[test]
    fn dateline_square_becomes_contiguous() {
        let r = ring(&[179.0, -179.0, -179.0, 179.0, 179.0]);
        assert_eq!(lons(&unwrap_ring(&r)), vec![179.0, 181.0, 181.0, 179.0, 179.0]);
    }

    #[test]
    fn westward_crossing_goes_negative() {
        let r = ring(&[-179.0, 179.0, 170.0]);
        assert_eq!(lons(&unwrap_ring(&r)), vec![-179.0, -181.0, -190.0]);
    }

    #[test]
    fn offset_accumulates_across_crossings() {
        // Circumnavigates eastward twice.
        let r = ring(&[0.0, 120.0, -120.0, 0.0, 120.0, -120.0]);
        assert_eq!(
            lons(&unwrap_ring(&r)),
            vec![0.0, 120.0, 240.0, 360.0, 480.0, 600.0]
        );
    }

    #[test]
    fn consecutive_steps_never_exceed_half_globe() {
        let r = ring(&[170.0, -175.0, -160.0, 175.0, 150.0, -170.0]);
        let out = unwrap_ring(&r);
        for w in out.windows(2) {
            assert!((w[1].lon_deg - w[0].lon_deg).abs() <= 180.0);
        }
    }
}
