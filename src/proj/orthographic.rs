//! Orthographic view with a configurable field of view.
//!
//! The angular distance c from the center maps linearly onto the canvas disk:
//!   forward: ρ = R·c/edge, azimuth α = atan2(cosφ·sinΔλ, cosφ₀·sinφ − sinφ₀·cosφ·cosΔλ)
//!   inverse: c = edge·ρ/R, φ = asin(sinφ₀·cos c + cosφ₀·sin c·y/ρ)

use std::f64::consts::PI;

use crate::proj::common::{angle_from_cos, clamped_radians, cos_angular_distance, normalize_lon};
use crate::proj::{finite_point, CanvasPoint, CanvasSize, GeoPoint, Projection};

/// Valid edge angle range in degrees.
pub const EDGE_ANGLE_RANGE_DEG: (f64, f64) = (0.0, 90.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Orthographic {
    lat0: f64,
    lon0: f64,
    edge_angle: f64,
    // Precomputed
    sin_lat0: f64,
    cos_lat0: f64,
}

impl Orthographic {
    /// Build from degrees. The edge angle is clamped to [0°, 90°] and the
    /// center latitude to [−90°, 90°]; construction never fails.
    pub fn new(center_lat_deg: f64, center_lon_deg: f64, edge_angle_deg: f64) -> Self {
        let (lo, hi) = EDGE_ANGLE_RANGE_DEG;
        let lat0 = clamped_radians(center_lat_deg, -90.0, 90.0);
        Self {
            lat0,
            lon0: center_lon_deg.to_radians(),
            edge_angle: clamped_radians(edge_angle_deg, lo, hi),
            sin_lat0: lat0.sin(),
            cos_lat0: lat0.cos(),
        }
    }

    pub fn center_lat(&self) -> f64 {
        self.lat0
    }

    pub fn center_lon(&self) -> f64 {
        self.lon0
    }

    /// Clamped edge angle in radians.
    pub fn edge_angle(&self) -> f64 {
        self.edge_angle
    }
}

impl Projection for Orthographic {
    fn forward(&self, lat: f64, lon: f64, canvas: CanvasSize) -> Option<CanvasPoint> {
        if self.edge_angle <= 0.0 {
            return None;
        }
        let (cx, cy) = canvas.center();
        let dlon = lon - self.lon0;
        let c = angle_from_cos(cos_angular_distance(self.sin_lat0, self.cos_lat0, lat, dlon));
        if !(c <= self.edge_angle) {
            return None;
        }
        if c.abs() < 1e-12 {
            return Some(CanvasPoint::new(cx, cy));
        }

        let (sin_lat, cos_lat) = lat.sin_cos();
        let alpha = (cos_lat * dlon.sin())
            .atan2(self.cos_lat0 * sin_lat - self.sin_lat0 * cos_lat * dlon.cos());
        let radius = canvas.radius() * (c / self.edge_angle);
        finite_point(cx + radius * alpha.sin(), cy - radius * alpha.cos())
    }

    fn inverse(&self, x: f64, y: f64, canvas: CanvasSize) -> Option<GeoPoint> {
        if self.edge_angle <= 0.0 {
            return None;
        }
        let r = canvas.radius();
        let (cx, cy) = canvas.center();
        let xp = x - cx;
        let yp = -(y - cy);
        let rho = xp.hypot(yp);
        let c = self.edge_angle * (rho / r);
        if !(rho <= r) || c > PI {
            return None;
        }
        if rho < 1e-10 {
            return Some(GeoPoint::new(self.lat0, normalize_lon(self.lon0)));
        }

        let (sin_c, cos_c) = c.sin_cos();
        let x_norm = xp / rho;
        let y_norm = yp / rho;
        let lat = (self.sin_lat0 * cos_c + self.cos_lat0 * sin_c * y_norm)
            .clamp(-1.0, 1.0)
            .asin();
        let lon = self.lon0
            + (x_norm * sin_c).atan2(self.cos_lat0 * cos_c - self.sin_lat0 * sin_c * y_norm);
        Some(GeoPoint::new(lat, normalize_lon(lon)))
    }

    fn needs_circular_clipping(&self) -> bool {
        true
    }
}
