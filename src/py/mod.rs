use pyo3::prelude::*;

use crate::proj::{create, AnyProjection, MercatorOptions, ProjectionKind, ProjectionParams};

mod graticule;
mod reproject;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reproject::reproject_image, m)?)?;
    m.add_function(wrap_pyfunction!(graticule::graticule_lines, m)?)?;
    m.add_function(wrap_pyfunction!(graticule::dash_pattern, m)?)?;
    m.add_function(wrap_pyfunction!(needs_circular_clipping, m)?)?;
    Ok(())
}

/// Build a projection from Python-side arguments. Unknown names select
/// orthographic, matching the Rust factory.
fn build_projection(
    projection: &str,
    center_lat: f64,
    center_lon: f64,
    extent: f64,
    mercator: MercatorOptions,
) -> AnyProjection {
    let params = ProjectionParams::new(
        ProjectionKind::from_name_or_default(projection),
        center_lat,
        center_lon,
        extent,
    )
    .with_mercator_options(mercator);
    create(&params)
}

/// Whether the projection's output should be masked to the inscribed disk.
#[pyfunction]
#[pyo3(signature = (projection="ortho"))]
fn needs_circular_clipping(projection: &str) -> bool {
    use crate::proj::Projection;
    build_projection(projection, 0.0, 0.0, 90.0, MercatorOptions::default()).needs_circular_clipping()
}
