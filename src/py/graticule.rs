//! PyO3 bindings for graticule generation.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::ProjError;
use crate::graticule::{Graticule, GraticuleStyle, LineKind, StrokeKind};
use crate::proj::{CanvasSize, MercatorOptions};

/// Trace graticule strokes for a projected canvas.
///
/// Args:
///     width, height: Canvas size in pixels.
///     projection, center_lat, center_lon, extent: As for `reproject_image`.
///     lon_spacing, lat_spacing: Line spacing in degrees; values below 0.01 use 15.
///     offset: Shift of the parallels away from the south pole, in degrees.
///     clamp_latitude: Mercator only; clamp latitudes to ±extent so the polar
///         parallels sit on the canvas edges.
///     stroke: "solid", "dash", "dot" or "dashdot".
///     color: CSS colour string.
///     line_width: Stroke width in pixels.
///
/// Returns:
///     Dict with "dash" (on/off lengths, empty for solid), "color",
///     "line_width" and "lines": a list of (kind, value_deg, points) where kind
///     is "parallel" or "meridian" and points is a list of (x, y) with at
///     least two entries.
#[pyfunction]
#[pyo3(signature = (
    width,
    height,
    projection="ortho",
    center_lat=0.0,
    center_lon=0.0,
    extent=90.0,
    lon_spacing=15.0,
    lat_spacing=15.0,
    offset=0.0,
    clamp_latitude=true,
    stroke="solid",
    color="#ffffff",
    line_width=1.0
))]
#[allow(clippy::too_many_arguments)]
pub fn graticule_lines<'py>(
    py: Python<'py>,
    width: usize,
    height: usize,
    projection: &str,
    center_lat: f64,
    center_lon: f64,
    extent: f64,
    lon_spacing: f64,
    lat_spacing: f64,
    offset: f64,
    clamp_latitude: bool,
    stroke: &str,
    color: &str,
    line_width: f64,
) -> PyResult<Bound<'py, PyDict>> {
    let stroke: StrokeKind = stroke
        .parse()
        .map_err(|e: ProjError| PyValueError::new_err(e.to_string()))?;
    let mercator = MercatorOptions {
        clamp_latitude,
        ..MercatorOptions::default()
    };
    let proj = super::build_projection(projection, center_lat, center_lon, extent, mercator);
    let style = GraticuleStyle {
        lon_spacing_deg: lon_spacing,
        lat_spacing_deg: lat_spacing,
        offset_deg: offset,
        stroke,
        color: color.to_string(),
        line_width,
    };

    let graticule = py.allow_threads(move || {
        Graticule::generate(&proj, &style, CanvasSize::new(width, height))
    });

    let lines: Vec<(&'static str, f64, Vec<(f64, f64)>)> = graticule
        .lines
        .into_iter()
        .map(|line| {
            let kind = match line.kind {
                LineKind::Parallel => "parallel",
                LineKind::Meridian => "meridian",
            };
            let points = line.points.iter().map(|p| (p.x, p.y)).collect();
            (kind, line.value_deg, points)
        })
        .collect();

    // Style after normalization, so callers draw with what was actually used
    let out = PyDict::new(py);
    out.set_item("dash", graticule.style.stroke.dash_pattern().to_vec())?;
    out.set_item("color", graticule.style.color)?;
    out.set_item("line_width", graticule.style.line_width)?;
    out.set_item("lines", lines)?;
    Ok(out)
}

/// On/off dash lengths for a stroke kind ("solid", "dash", "dot", "dashdot").
#[pyfunction]
pub fn dash_pattern(stroke: &str) -> PyResult<Vec<f64>> {
    let kind: StrokeKind = stroke
        .parse()
        .map_err(|e: ProjError| PyValueError::new_err(e.to_string()))?;
    Ok(kind.dash_pattern().to_vec())
}
