//! Source-image addressing for the warp engine.
//!
//! The source is an equirectangular RGBA raster: columns run linearly from
//! longitude −π (left edge) to π (right edge), rows from latitude π/2 (top
//! edge) to −π/2 (bottom edge).

use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub mod nearest;

/// Opaque white, written wherever the output has no source pixel.
pub const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Number of channels in an RGBA pixel.
pub const CHANNELS: usize = 4;

/// Maps geographic coordinates onto the pixel grid of an equirectangular image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquirectGrid {
    pub width: usize,
    pub height: usize,
}

impl EquirectGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// (lat_rad, lon_rad) -> fractional (col, row), corner-based: pixel (0,0)
    /// covers [0,1)×[0,1). Columns wrap, so longitude π lands on column 0
    /// alongside −π.
    pub fn geo_to_pixel(&self, lat: f64, lon: f64) -> (f64, f64) {
        let col = ((lon + PI) / TAU).rem_euclid(1.0) * self.width as f64;
        let row = (FRAC_PI_2 - lat) / PI * self.height as f64;
        (col, row)
    }

    /// Fractional (col, row) -> (lat_rad, lon_rad).
    pub fn pixel_to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        let lon = col / self.width as f64 * TAU - PI;
        let lat = FRAC_PI_2 - row / self.height as f64 * PI;
        (lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_corners() {
        let grid = EquirectGrid::new(360, 180);
        let (col, row) = grid.geo_to_pixel(FRAC_PI_2, -PI);
        assert_relative_eq!(col, 0.0);
        assert_relative_eq!(row, 0.0);

        let (col, row) = grid.geo_to_pixel(-FRAC_PI_2, PI - 1e-9);
        assert_relative_eq!(col, 360.0, epsilon = 1e-6);
        assert_relative_eq!(row, 180.0);
    }

    #[test]
    fn test_antimeridian_wraps_to_first_column() {
        let grid = EquirectGrid::new(360, 180);
        let (col, _) = grid.geo_to_pixel(0.0, PI);
        assert_relative_eq!(col, 0.0);
        let (col, _) = grid.geo_to_pixel(0.0, -PI);
        assert_relative_eq!(col, 0.0);
    }

    #[test]
    fn test_origin_is_image_center() {
        let grid = EquirectGrid::new(800, 400);
        let (col, row) = grid.geo_to_pixel(0.0, 0.0);
        assert_relative_eq!(col, 400.0);
        assert_relative_eq!(row, 200.0);
    }

    #[test]
    fn test_one_degree_per_pixel() {
        let grid = EquirectGrid::new(360, 180);
        let (col, row) = grid.geo_to_pixel(40.5_f64.to_radians(), -73.5_f64.to_radians());
        assert_relative_eq!(col, 106.5, epsilon = 1e-9);
        assert_relative_eq!(row, 49.5, epsilon = 1e-9);

        let (lat, lon) = grid.pixel_to_geo(col, row);
        assert_relative_eq!(lat, 40.5_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(lon, (-73.5_f64).to_radians(), epsilon = 1e-12);
    }
}
