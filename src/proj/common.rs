//! Common helpers for projection math (longitude wrapping, angular distance).

use std::f64::consts::{PI, TAU};

/// Wrap a longitude in radians into (−π, π].
///
/// Non-finite input stays non-finite; callers sanitise before reaching here.
pub fn normalize_lon(lon: f64) -> f64 {
    let lon = lon % TAU;
    if lon > PI {
        lon - TAU
    } else if lon <= -PI {
        lon + TAU
    } else {
        lon
    }
}

/// Cosine of the great-circle angle between (lat0, lon0) and (lat, lon),
/// from the spherical law of cosines. Not clamped.
pub fn cos_angular_distance(sin_lat0: f64, cos_lat0: f64, lat: f64, dlon: f64) -> f64 {
    sin_lat0 * lat.sin() + cos_lat0 * lat.cos() * dlon.cos()
}

/// Great-circle angle from its cosine, tolerant of rounding just outside [−1, 1].
pub fn angle_from_cos(cos_c: f64) -> f64 {
    cos_c.clamp(-1.0, 1.0).acos()
}

/// Clamp a degree parameter into `[lo, hi]` and convert it to radians.
pub fn clamped_radians(deg: f64, lo: f64, hi: f64) -> f64 {
    deg.clamp(lo, hi).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_lon_in_range() {
        assert_relative_eq!(normalize_lon(0.0), 0.0);
        assert_relative_eq!(normalize_lon(1.0), 1.0);
        assert_relative_eq!(normalize_lon(PI), PI);
        assert_relative_eq!(normalize_lon(-PI), PI);
    }

    #[test]
    fn test_normalize_lon_wraps() {
        assert_relative_eq!(normalize_lon(3.0 * FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(normalize_lon(-3.0 * FRAC_PI_2), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(normalize_lon(5.0 * TAU + 0.25), 0.25, epsilon = 1e-9);
        assert_relative_eq!(normalize_lon(200.0_f64.to_radians()), (-160.0_f64).to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_lon_idempotent() {
        let mut x = -50.0;
        while x < 50.0 {
            let once = normalize_lon(x);
            assert!(once > -PI && once <= PI, "{x} -> {once}");
            assert_eq!(normalize_lon(once), once, "not idempotent at {x}");
            x += 0.137;
        }
    }

    #[test]
    fn test_angular_distance() {
        let lat = 30.0_f64.to_radians();
        let cos_c = cos_angular_distance(0.0, 1.0, lat, 0.0);
        assert_relative_eq!(angle_from_cos(cos_c), lat, epsilon = 1e-12);

        // Rounding past ±1 must not produce NaN
        assert_relative_eq!(angle_from_cos(1.0 + 1e-15), 0.0);
        assert_relative_eq!(angle_from_cos(-1.0 - 1e-15), PI);
    }

    #[test]
    fn test_clamped_radians() {
        assert_relative_eq!(clamped_radians(120.0, 0.0, 90.0), FRAC_PI_2);
        assert_relative_eq!(clamped_radians(-5.0, 0.0, 90.0), 0.0);
        assert_relative_eq!(clamped_radians(45.0, 0.0, 90.0), 45.0_f64.to_radians());
    }
}
