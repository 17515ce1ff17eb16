pub mod common;
pub mod factory;
pub mod mercator;
pub mod orthographic;
pub mod stereographic;

pub use factory::{create, create_from_name, AnyProjection, ProjectionCache, ProjectionKind, ProjectionParams};
pub use mercator::{Mercator, MercatorOptions};
pub use orthographic::Orthographic;
pub use stereographic::Stereographic;

use serde::{Deserialize, Serialize};

/// A geographic position in radians. `lon` is in (−π, π], `lat` in [−π/2, π/2].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians())
    }
}

/// A position on the canvas in pixels, origin top-left, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the disk inscribed in the canvas (half the minor dimension).
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }
}

/// Trait for map projections between geographic coordinates and a canvas.
///
/// Points with no image (outside the visible hemisphere or latitude range) are
/// reported as `None` instead of erroring; neither direction may panic on
/// out-of-range input.
pub trait Projection: Send + Sync {
    /// Forward: (lat_rad, lon_rad) -> canvas pixel, or `None` when not visible.
    fn forward(&self, lat: f64, lon: f64, canvas: CanvasSize) -> Option<CanvasPoint>;

    /// Inverse: canvas pixel -> (lat_rad, lon_rad), or `None` when the pixel
    /// has no geographic preimage.
    fn inverse(&self, x: f64, y: f64, canvas: CanvasSize) -> Option<GeoPoint>;

    /// Whether the valid output region is the disk inscribed in the canvas
    /// rather than the whole rectangle.
    fn needs_circular_clipping(&self) -> bool;

    /// Forward transform taking degrees.
    fn forward_deg(&self, lat_deg: f64, lon_deg: f64, canvas: CanvasSize) -> Option<CanvasPoint> {
        self.forward(lat_deg.to_radians(), lon_deg.to_radians(), canvas)
    }

    fn is_visible(&self, lat: f64, lon: f64, canvas: CanvasSize) -> bool {
        self.forward(lat, lon, canvas).is_some()
    }
}

/// Finite-checked canvas point; projections use this to keep NaN/inf out of
/// pixel coordinates.
pub(crate) fn finite_point(x: f64, y: f64) -> Option<CanvasPoint> {
    (x.is_finite() && y.is_finite()).then_some(CanvasPoint { x, y })
}
