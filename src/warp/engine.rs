//! Inverse-mapping warp engine.
//!
//! For each output pixel, projects back to geographic coordinates and samples
//! the equirectangular source with nearest-neighbor. Every call recomputes the
//! whole destination; rows are independent and processed in parallel.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis};

use crate::error::WarpError;
use crate::proj::{CanvasSize, Projection};
use crate::resample::{self, EquirectGrid, CHANNELS};

/// Pixel counts from one warp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WarpStats {
    /// Pixels copied from the source.
    pub sampled: usize,
    /// Pixels set to the background (no preimage, or preimage off the source).
    pub background: usize,
}

impl WarpStats {
    fn merge(self, other: Self) -> Self {
        Self {
            sampled: self.sampled + other.sampled,
            background: self.background + other.background,
        }
    }
}

/// Reproject an equirectangular raster onto a new `(rows, cols, 4)` canvas.
///
/// # Arguments
/// * `src`: source raster, `(rows, cols, 4)`, row 0 at latitude +90°
/// * `projection`: destination projection
/// * `dst_shape`: (rows, cols) of the output canvas
/// * `background`: value for pixels with no source sample
pub fn reproject<T, P>(
    src: &ArrayView3<'_, T>,
    projection: &P,
    dst_shape: (usize, usize),
    background: [T; CHANNELS],
) -> Result<Array3<T>, WarpError>
where
    T: Copy + Send + Sync,
    P: Projection + ?Sized,
{
    let (rows, cols) = dst_shape;
    // reproject_into writes every pixel, so the fill value is never observed
    let mut dst = Array3::from_elem((rows, cols, CHANNELS), background[0]);
    reproject_into(src, &mut dst.view_mut(), projection, background)?;
    Ok(dst)
}

/// Reproject into a caller-owned `(rows, cols, 4)` buffer, overwriting every pixel.
pub fn reproject_into<T, P>(
    src: &ArrayView3<'_, T>,
    dst: &mut ArrayViewMut3<'_, T>,
    projection: &P,
    background: [T; CHANNELS],
) -> Result<WarpStats, WarpError>
where
    T: Copy + Send + Sync,
    P: Projection + ?Sized,
{
    let (src_rows, src_cols, src_bands) = src.dim();
    if src_bands != CHANNELS {
        return Err(WarpError::Shape(format!(
            "source must have {CHANNELS} channels, got {src_bands}"
        )));
    }
    let (dst_rows, dst_cols, dst_bands) = dst.dim();
    if dst_bands != CHANNELS {
        return Err(WarpError::Shape(format!(
            "destination must have {CHANNELS} channels, got {dst_bands}"
        )));
    }

    let canvas = CanvasSize::new(dst_cols, dst_rows);
    let grid = EquirectGrid::new(src_cols, src_rows);

    let stats = dst
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .map(|(row, mut line)| {
            let mut stats = WarpStats::default();
            for (col, mut pixel) in line.outer_iter_mut().enumerate() {
                let value = projection
                    .inverse(col as f64, row as f64, canvas)
                    .and_then(|geo| {
                        let (src_col, src_row) = grid.geo_to_pixel(geo.lat, geo.lon);
                        resample::nearest::sample(src, src_col, src_row)
                    });
                let value = match value {
                    Some(v) => {
                        stats.sampled += 1;
                        v
                    }
                    None => {
                        stats.background += 1;
                        background
                    }
                };
                for (out, v) in pixel.iter_mut().zip(value) {
                    *out = v;
                }
            }
            stats
        })
        .reduce(WarpStats::default, WarpStats::merge);

    tracing::debug!(
        rows = dst_rows,
        cols = dst_cols,
        sampled = stats.sampled,
        background = stats.background,
        "warp complete"
    );
    Ok(stats)
}
