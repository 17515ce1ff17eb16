//! Stereographic view with a field-of-view scale.
//!
//! The radial function is the stereographic one, k = 2/(1 + cos c), but the
//! plane is scaled by s = R·π/edge instead of the sphere radius:
//!   forward: x = cx + s·(k/2)·cosφ·sinΔλ, y = cy − s·(k/2)·(cosφ₀·sinφ − sinφ₀·cosφ·cosΔλ)
//!   inverse: c = 2·atan2(ρ, s)
//!
//! Narrowing the edge angle zooms in; the edge angle itself lands at
//! ρ = s·tan(edge/2), which is generally outside the inscribed disk.

use crate::proj::common::{angle_from_cos, clamped_radians, cos_angular_distance, normalize_lon};
use crate::proj::{finite_point, CanvasPoint, CanvasSize, GeoPoint, Projection};

/// Valid edge angle range in degrees.
pub const EDGE_ANGLE_RANGE_DEG: (f64, f64) = (0.0, 150.0);

/// Points with cos c below this are on the far hemisphere.
const ANTIPODAL_COS_EPS: f64 = 1e-4;

#[derive(Clone, Debug, PartialEq)]
pub struct Stereographic {
    lat0: f64,
    lon0: f64,
    edge_angle: f64,
    // Precomputed
    sin_lat0: f64,
    cos_lat0: f64,
}

impl Stereographic {
    /// Build from degrees. The edge angle is clamped to [0°, 150°].
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

    /// Plane scale s = R·π/edge for the given canvas.
    fn scale_reference(&self, canvas: CanvasSize) -> f64 {
        canvas.radius() * (std::f64::consts::PI / self.edge_angle)
    }

    /// Canvas distance from the center at which the edge angle falls.
    pub fn edge_radius(&self, canvas: CanvasSize) -> f64 {
        if self.edge_angle <= 0.0 {
            return 0.0;
        }
        self.scale_reference(canvas) * (self.edge_angle / 2.0).tan()
    }
}

impl Projection for Stereographic {
    fn forward(&self, lat: f64, lon: f64, canvas: CanvasSize) -> Option<CanvasPoint> {
        if self.edge_angle <= 0.0 {
            return None;
        }
        let dlon = lon - self.lon0;
        let cos_c = cos_angular_distance(self.sin_lat0, self.cos_lat0, lat, dlon);
        if !(cos_c >= -ANTIPODAL_COS_EPS) {
            return None;
        }
        if angle_from_cos(cos_c) > self.edge_angle {
            return None;
        }

        let k = 2.0 / (1.0 + cos_c);
        let (sin_lat, cos_lat) = lat.sin_cos();
        let x_factor = cos_lat * dlon.sin();
        let y_factor = self.cos_lat0 * sin_lat - self.sin_lat0 * cos_lat * dlon.cos();
        let scale = self.scale_reference(canvas) * (k / 2.0);

        let (cx, cy) = canvas.center();
        finite_point(cx + scale * x_factor, cy - scale * y_factor)
    }

    fn inverse(&self, x: f64, y: f64, canvas: CanvasSize) -> Option<GeoPoint> {
        if self.edge_angle <= 0.0 {
            return None;
        }
        let (cx, cy) = canvas.center();
        let xp = x - cx;
        let yp = -(y - cy);
        let rho = xp.hypot(yp);
        if !(rho <= self.edge_radius(canvas)) {
            return None;
        }
        if rho < 1e-10 {
            return Some(GeoPoint::new(self.lat0, normalize_lon(self.lon0)));
        }

        let c = 2.0 * rho.atan2(self.scale_reference(canvas));
        let (sin_c, cos_c) = c.sin_cos();
        let lat = (cos_c * self.sin_lat0 + yp * sin_c * self.cos_lat0 / rho)
            .clamp(-1.0, 1.0)
            .asin();
        let lon = self.lon0
            + (xp * sin_c).atan2(rho * self.cos_lat0 * cos_c - yp * self.sin_lat0 * sin_c);
        Some(GeoPoint::new(lat, normalize_lon(lon)))
    }

    fn needs_circular_clipping(&self) -> bool {
        true
    }
}
