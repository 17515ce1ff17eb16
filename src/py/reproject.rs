//! PyO3 binding for reproject_image.

use ndarray::Array3;
use numpy::{PyArray3, PyReadonlyArray3};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::proj::MercatorOptions;
use crate::resample::BACKGROUND;
use crate::warp::engine;

/// Reproject an equirectangular RGBA image onto a projected canvas.
///
/// Args:
///     src: Source image, uint8 array of shape (rows, cols, 4). Row 0 is
///         latitude +90°, column 0 is longitude −180°.
///     dst_shape: Output canvas shape as (rows, cols).
///     projection: "ortho", "mercator" or "stereo". Unknown names use "ortho".
///     center_lat: Center latitude in degrees.
///     center_lon: Center longitude in degrees.
///     extent: Edge angle in degrees (ortho/stereo) or max latitude (mercator).
///     limit_inverse_latitude: Mercator only; pixels beyond ±extent latitude
///         are left as background instead of sampling the polar rows.
///
/// Returns:
///     uint8 array of shape (rows, cols, 4). Pixels with no source are opaque white.
#[pyfunction]
#[pyo3(signature = (src, dst_shape, projection="ortho", center_lat=0.0, center_lon=0.0, extent=90.0, limit_inverse_latitude=false))]
#[allow(clippy::too_many_arguments)]
pub fn reproject_image<'py>(
    py: Python<'py>,
    src: PyReadonlyArray3<'py, u8>,
    dst_shape: (usize, usize),
    projection: &str,
    center_lat: f64,
    center_lon: f64,
    extent: f64,
    limit_inverse_latitude: bool,
) -> PyResult<Bound<'py, PyArray3<u8>>> {
    let mercator = MercatorOptions {
        limit_inverse_latitude,
        ..MercatorOptions::default()
    };
    let proj = super::build_projection(projection, center_lat, center_lon, extent, mercator);

    // Copy array to owned ndarray before releasing the GIL
    let src_array: Array3<u8> = src.as_array().to_owned();

    let result: Array3<u8> = py.allow_threads(move || {
        engine::reproject(&src_array.view(), &proj, dst_shape, BACKGROUND)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;

    Ok(PyArray3::from_owned_array(py, result))
}
