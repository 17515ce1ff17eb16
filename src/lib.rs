pub mod error;
pub mod graticule;
pub mod proj;
pub mod resample;
pub mod warp;
#[cfg(feature = "python")]
mod py;

pub use error::{ProjError, WarpError};
pub use graticule::{Graticule, GraticuleStyle, LineKind, Polyline, StrokeKind};
pub use proj::{CanvasPoint, CanvasSize, GeoPoint, Projection};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn globe_warp(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
