//! Nearest-neighbor RGBA sampling.

use ndarray::ArrayView3;

use super::CHANNELS;

/// Sample one pixel of an `(rows, cols, 4)` raster using nearest-neighbor.
///
/// Corner-based pixel convention: pixel (0,0) has its upper-left corner at
/// (0.0, 0.0), so `floor()` finds the containing pixel.
///
/// Returns `None` if the coordinate falls outside the raster (including NaN).
pub fn sample<T: Copy>(src: &ArrayView3<'_, T>, x: f64, y: f64) -> Option<[T; CHANNELS]> {
    let col = x.floor();
    let row = y.floor();
    // NaN fails both comparisons
    if !(col >= 0.0 && row >= 0.0) {
        return None;
    }
    let (col, row) = (col as usize, row as usize);

    let (rows, cols, _) = src.dim();
    if col >= cols || row >= rows {
        return None;
    }

    Some(std::array::from_fn(|band| src[(row, col, band)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    /// 2×2 raster whose pixel (row, col) has red = 10·row + col.
    fn checker() -> Array3<u8> {
        Array3::from_shape_fn((2, 2, 4), |(row, col, band)| match band {
            0 => (10 * row + col) as u8,
            3 => 255,
            _ => 0,
        })
    }

    #[test]
    fn test_center_of_pixel() {
        let arr = checker();
        let view = arr.view();
        assert_eq!(sample(&view, 0.5, 0.5), Some([0, 0, 0, 255]));
        assert_eq!(sample(&view, 1.5, 0.5), Some([1, 0, 0, 255]));
        assert_eq!(sample(&view, 0.5, 1.5), Some([10, 0, 0, 255]));
        assert_eq!(sample(&view, 1.5, 1.5), Some([11, 0, 0, 255]));
    }

    #[test]
    fn test_upper_left_corner() {
        let arr = checker();
        assert_eq!(sample(&arr.view(), 0.0, 0.0), Some([0, 0, 0, 255]));
        assert_eq!(sample(&arr.view(), 1.999, 1.999), Some([11, 0, 0, 255]));
    }

    #[test]
    fn test_out_of_bounds() {
        let arr = checker();
        let view = arr.view();
        assert_eq!(sample(&view, -0.1, 0.5), None);
        assert_eq!(sample(&view, 0.5, -0.1), None);
        assert_eq!(sample(&view, 2.0, 0.5), None);
        assert_eq!(sample(&view, 0.5, 2.0), None);
        assert_eq!(sample(&view, f64::NAN, 0.5), None);
        assert_eq!(sample(&view, 0.5, f64::INFINITY), None);
    }

    #[test]
    fn test_float_channels() {
        let arr = Array3::from_elem((1, 1, 4), 0.25_f32);
        assert_eq!(sample(&arr.view(), 0.5, 0.5), Some([0.25; 4]));
    }
}
