//! Spherical Mercator fitted to the canvas.
//!
//!   forward: x = cx + s·(λ − λ₀)/Y, y = cy − s·ln(tan(π/4 + φ/2))/Y
//!   inverse: λ = λ₀ + (x − cx)·Y/s, φ = 2·atan(exp(−(y − cy)·Y/s)) − π/2
//!
//! where s = min(width, height)/2 and Y = ln(tan(π/4 + φmax/2)), so the
//! configured maximum latitude lands on the edge of the minor canvas dimension.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Deserialize, Serialize};

use crate::proj::common::{clamped_radians, normalize_lon};
use crate::proj::{finite_point, CanvasPoint, CanvasSize, GeoPoint, Projection};

/// Valid maximum latitude range in degrees.
pub const MAX_LAT_RANGE_DEG: (f64, f64) = (45.0, 89.9);

/// Behaviour switches at the edges of the latitude range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MercatorOptions {
    /// Clamp input latitude to ±max latitude before projecting forward.
    /// When off, points past the range project to unbounded y.
    pub clamp_latitude: bool,
    /// Report pixels whose latitude lies beyond ±max latitude as invisible.
    pub limit_inverse_latitude: bool,
}

impl Default for MercatorOptions {
    fn default() -> Self {
        Self {
            clamp_latitude: true,
            limit_inverse_latitude: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mercator {
    lat0: f64,
    lon0: f64,
    max_lat: f64,
    options: MercatorOptions,
    // Precomputed
    max_merc_y: f64,
}

impl Mercator {
    /// Build from degrees. `max_lat_deg` is clamped to [45°, 89.9°].
    pub fn new(center_lat_deg: f64, center_lon_deg: f64, max_lat_deg: f64) -> Self {
        Self::with_options(center_lat_deg, center_lon_deg, max_lat_deg, MercatorOptions::default())
    }

    pub fn with_options(
        center_lat_deg: f64,
        center_lon_deg: f64,
        max_lat_deg: f64,
        options: MercatorOptions,
    ) -> Self {
        let (lo, hi) = MAX_LAT_RANGE_DEG;
        let max_lat = clamped_radians(max_lat_deg, lo, hi);
        Self {
            lat0: clamped_radians(center_lat_deg, -90.0, 90.0),
            lon0: center_lon_deg.to_radians(),
            max_lat,
            options,
            max_merc_y: mercator_y(max_lat),
        }
    }

    /// Center latitude. Mercator keeps the equator on the canvas midline, so
    /// this is informational only.
    pub fn center_lat(&self) -> f64 {
        self.lat0
    }

    pub fn center_lon(&self) -> f64 {
        self.lon0
    }

    /// Clamped maximum latitude in radians.
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn max_mercator_y(&self) -> f64 {
        self.max_merc_y
    }

    pub fn options(&self) -> MercatorOptions {
        self.options
    }
}

fn mercator_y(lat: f64) -> f64 {
    (FRAC_PI_4 + lat / 2.0).tan().ln()
}

impl Projection for Mercator {
    fn forward(&self, lat: f64, lon: f64, canvas: CanvasSize) -> Option<CanvasPoint> {
        let lon = normalize_lon(lon);
        let lat = if self.options.clamp_latitude {
            lat.clamp(-self.max_lat, self.max_lat)
        } else {
            lat
        };

        let scale = canvas.radius();
        let (cx, cy) = canvas.center();
        // x is not wrapped: longitudes far from the center run off the canvas
        let x = cx + scale * (lon - self.lon0) / self.max_merc_y;
        let y = cy - scale * mercator_y(lat) / self.max_merc_y;
        finite_point(x, y)
    }

    fn inverse(&self, x: f64, y: f64, canvas: CanvasSize) -> Option<GeoPoint> {
        let scale = canvas.radius();
        let (cx, cy) = canvas.center();
        let lon = normalize_lon(self.lon0 + ((x - cx) / scale) * self.max_merc_y);
        let merc_y = -((y - cy) / scale) * self.max_merc_y;
        let lat = 2.0 * merc_y.exp().atan() - FRAC_PI_2;

        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if self.options.limit_inverse_latitude && lat.abs() > self.max_lat {
            return None;
        }
        Some(GeoPoint::new(lat, lon))
    }

    fn needs_circular_clipping(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CANVAS: CanvasSize = CanvasSize {
        width: 360.0,
        height: 180.0,
    };

    #[test]
    fn test_canvas_center_is_origin() {
        let proj = Mercator::new(0.0, 0.0, 85.0);
        let g = proj.inverse(180.0, 90.0, CANVAS).unwrap();
        assert_relative_eq!(g.lat, 0.0, epsilon = 1e-12);
        assert_relative_eq!(g.lon, 0.0, epsilon = 1e-12);

        let p = proj.forward(0.0, 0.0, CANVAS).unwrap();
        assert_relative_eq!(p.x, 180.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_max_lat_clamp() {
        assert_relative_eq!(Mercator::new(0.0, 0.0, 10.0).max_lat(), 45.0_f64.to_radians());
        assert_relative_eq!(Mercator::new(0.0, 0.0, 95.0).max_lat(), 89.9_f64.to_radians());
        assert_relative_eq!(Mercator::new(0.0, 0.0, 60.0).max_lat(), 60.0_f64.to_radians());
    }

    #[test]
    fn test_max_lat_on_canvas_edge() {
        let proj = Mercator::new(0.0, 0.0, 85.0);
        let top = proj.forward(85.0_f64.to_radians(), 0.0, CANVAS).unwrap();
        assert_relative_eq!(top.y, 0.0, epsilon = 1e-9);
        let bottom = proj.forward((-85.0_f64).to_radians(), 0.0, CANVAS).unwrap();
        assert_relative_eq!(bottom.y, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_forward_clamps_latitude() {
        let proj = Mercator::new(0.0, 0.0, 60.0);
        let edge = proj.forward(60.0_f64.to_radians(), 0.0, CANVAS).unwrap();
        let beyond = proj.forward(80.0_f64.to_radians(), 0.0, CANVAS).unwrap();
        assert_relative_eq!(beyond.y, edge.y, epsilon = 1e-12);

        // The pole itself stays finite when clamped
        assert!(proj.forward(FRAC_PI_2, 0.0, CANVAS).is_some());
    }

    #[test]
    fn test_forward_without_clamp() {
        let options = MercatorOptions {
            clamp_latitude: false,
            ..MercatorOptions::default()
        };
        let proj = Mercator::with_options(0.0, 0.0, 60.0, options);
        let edge = proj.forward(60.0_f64.to_radians(), 0.0, CANVAS).unwrap();
        let beyond = proj.forward(80.0_f64.to_radians(), 0.0, CANVAS).unwrap();
        assert!(beyond.y < edge.y, "beyond {} should be above edge {}", beyond.y, edge.y);

        // South pole diverges and is culled rather than returning infinity
        assert!(proj.forward(-FRAC_PI_2, 0.0, CANVAS).is_none());
    }

    #[test]
    fn test_inverse_latitude_limit() {
        let proj = Mercator::new(0.0, 0.0, 60.0);
        // Default: above the max latitude still resolves
        assert!(proj.inverse(180.0, -50.0, CANVAS).is_some());

        let options = MercatorOptions {
            limit_inverse_latitude: true,
            ..MercatorOptions::default()
        };
        let proj = Mercator::with_options(0.0, 0.0, 60.0, options);
        assert!(proj.inverse(180.0, -50.0, CANVAS).is_none());
        assert!(proj.inverse(180.0, 10.0, CANVAS).is_some());
    }

    #[test]
    fn test_horizontal_is_not_wrapped() {
        let proj = Mercator::new(0.0, 170.0, 45.0);
        // lon -170 is 20° east of the center across the antimeridian, but x is
        // computed from the raw difference and lands far to the left.
        let p = proj.forward(0.0, (-170.0_f64).to_radians(), CANVAS).unwrap();
        assert!(p.x < 0.0, "x = {}", p.x);
    }

    #[test]
    fn test_inverse_wraps_longitude() {
        let proj = Mercator::new(0.0, 170.0, 85.0);
        let g = proj.inverse(190.0, 90.0, CANVAS).unwrap();
        assert!(g.lon > -std::f64::consts::PI && g.lon <= std::f64::consts::PI);
        assert!(g.lon < 0.0, "expected wrap past the antimeridian, got {}", g.lon);
    }

    #[test]
    fn test_roundtrip() {
        let proj = Mercator::new(20.0, -30.0, 80.0);
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (45.0, 10.0),
            (-60.0, -100.0),
            (79.0, 120.0),
            (40.7484, -73.9857),
        ];
        for &(lat_deg, lon_deg) in cases {
            let lat = lat_deg.to_radians();
            let lon = lon_deg.to_radians();
            let p = proj.forward(lat, lon, CANVAS).unwrap();
            let g = proj.inverse(p.x, p.y, CANVAS).unwrap();
            assert_relative_eq!(g.lat, lat, epsilon = 1e-9);
            assert_relative_eq!(g.lon, lon, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_no_circular_clipping() {
        assert!(!Mercator::new(0.0, 0.0, 85.0).needs_circular_clipping());
    }
}
