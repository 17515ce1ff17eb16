//! Graticule generation: parallels and meridians traced through a projection.
//!
//! Each line is sampled at a fixed angular resolution and projected forward.
//! Consecutive visible samples form a stroke; an invisible sample ends it, so
//! no stroke jumps across hidden territory. A jump of more than half the
//! canvas width between consecutive samples also ends the stroke; cylindrical
//! projections wrap longitude at the canvas sides and would otherwise draw a
//! segment across the whole map. Sampling runs from −180° to 180°, so a
//! visible arc straddling the antimeridian comes out as two strokes that meet
//! at the seam.

use std::fmt;
use std::mem;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProjError;
use crate::proj::{CanvasPoint, CanvasSize, Projection};

/// Samples per line, not counting the closing sample.
pub const SEGMENTS: usize = 60;

const DEFAULT_SPACING_DEG: f64 = 15.0;
/// Finer spacing falls back to the default.
pub const MIN_SPACING_DEG: f64 = 0.01;
const DEFAULT_COLOR: &str = "#ffffff";
const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Slack when deciding whether the last meridian (180°) is included.
const MERIDIAN_END_SLACK_DEG: f64 = 1e-4;

/// Dash pattern for graticule strokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl StrokeKind {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "dash" | "dashed" => Some(Self::Dash),
            "dot" | "dotted" => Some(Self::Dot),
            "dashdot" | "dash-dot" => Some(Self::DashDot),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dash => "dash",
            Self::Dot => "dot",
            Self::DashDot => "dashdot",
        }
    }

    /// Alternating on/off lengths in pixels; empty for a solid line.
    pub fn dash_pattern(&self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dash => &[8.0, 4.0],
            Self::Dot => &[2.0, 2.0],
            Self::DashDot => &[10.0, 3.0, 2.0, 3.0],
        }
    }
}

impl FromStr for StrokeKind {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ProjError::UnknownStrokeKind(s.to_string()))
    }
}

impl fmt::Display for StrokeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spacing and appearance of the graticule, applied to every line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraticuleStyle {
    pub lon_spacing_deg: f64,
    pub lat_spacing_deg: f64,
    /// Shift of the parallels away from the south pole.
    pub offset_deg: f64,
    pub stroke: StrokeKind,
    pub color: String,
    pub line_width: f64,
}

impl Default for GraticuleStyle {
    fn default() -> Self {
        Self {
            lon_spacing_deg: DEFAULT_SPACING_DEG,
            lat_spacing_deg: DEFAULT_SPACING_DEG,
            offset_deg: 0.0,
            stroke: StrokeKind::Solid,
            color: DEFAULT_COLOR.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl GraticuleStyle {
    /// Replace unusable values with defaults: spacing below
    /// [`MIN_SPACING_DEG`] or non-finite, non-positive width, non-finite
    /// offset, empty colour.
    pub fn normalized(&self) -> Self {
        let positive_or = |v: f64, default: f64| if v.is_finite() && v > 0.0 { v } else { default };
        let spacing_or_default = |v: f64| {
            if v.is_finite() && v >= MIN_SPACING_DEG {
                v
            } else {
                DEFAULT_SPACING_DEG
            }
        };
        Self {
            lon_spacing_deg: spacing_or_default(self.lon_spacing_deg),
            lat_spacing_deg: spacing_or_default(self.lat_spacing_deg),
            offset_deg: if self.offset_deg.is_finite() { self.offset_deg } else { 0.0 },
            stroke: self.stroke,
            color: if self.color.trim().is_empty() {
                DEFAULT_COLOR.to_string()
            } else {
                self.color.clone()
            },
            line_width: positive_or(self.line_width, DEFAULT_LINE_WIDTH),
        }
    }

    /// Latitudes of the parallels in degrees: from −90 + offset up to 90.
    pub fn parallel_latitudes(&self) -> Vec<f64> {
        let style = self.normalized();
        let start = -90.0 + style.offset_deg;
        (0..)
            .map(|i| start + i as f64 * style.lat_spacing_deg)
            .take_while(|&lat| lat <= 90.0)
            .filter(|&lat| lat >= -90.0)
            .collect()
    }

    /// Longitudes of the meridians in degrees: from −180 through 180 inclusive.
    pub fn meridian_longitudes(&self) -> Vec<f64> {
        let step = self.normalized().lon_spacing_deg;
        (0..)
            .map(|i| -180.0 + i as f64 * step)
            .take_while(|&lon| lon < 180.0 + MERIDIAN_END_SLACK_DEG)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Constant latitude.
    Parallel,
    /// Constant longitude.
    Meridian,
}

/// One visible stroke of a graticule line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub kind: LineKind,
    /// The line's latitude (parallel) or longitude (meridian) in degrees.
    pub value_deg: f64,
    /// At least two points.
    pub points: Vec<CanvasPoint>,
}

/// Strokes for a full graticule, ready to draw on top of a warped image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graticule {
    pub style: GraticuleStyle,
    pub lines: Vec<Polyline>,
}

impl Graticule {
    /// Trace every parallel and meridian of `style` through `projection`.
    pub fn generate<P>(projection: &P, style: &GraticuleStyle, canvas: CanvasSize) -> Self
    where
        P: Projection + ?Sized,
    {
        let style = style.normalized();
        let mut lines = Vec::new();

        for lat_deg in style.parallel_latitudes() {
            let lat = lat_deg.to_radians();
            let samples = (0..=SEGMENTS).map(|i| {
                let frac = i as f64 / SEGMENTS as f64;
                (lat, (-180.0 + 360.0 * frac).to_radians())
            });
            lines.extend(
                trace(projection, samples, canvas)
                    .into_iter()
                    .map(|points| Polyline {
                        kind: LineKind::Parallel,
                        value_deg: lat_deg,
                        points,
                    }),
            );
        }

        for lon_deg in style.meridian_longitudes() {
            let lon = lon_deg.to_radians();
            let samples = (0..=SEGMENTS).map(|i| {
                let frac = i as f64 / SEGMENTS as f64;
                ((-90.0 + 180.0 * frac).to_radians(), lon)
            });
            lines.extend(
                trace(projection, samples, canvas)
                    .into_iter()
                    .map(|points| Polyline {
                        kind: LineKind::Meridian,
                        value_deg: lon_deg,
                        points,
                    }),
            );
        }

        tracing::debug!(strokes = lines.len(), "graticule generated");
        Self { style, lines }
    }

    pub fn parallels(&self) -> impl Iterator<Item = &Polyline> {
        self.lines.iter().filter(|l| l.kind == LineKind::Parallel)
    }

    pub fn meridians(&self) -> impl Iterator<Item = &Polyline> {
        self.lines.iter().filter(|l| l.kind == LineKind::Meridian)
    }
}

/// Project `(lat, lon)` samples in order and split them into visible runs.
fn trace<P, I>(projection: &P, samples: I, canvas: CanvasSize) -> Vec<Vec<CanvasPoint>>
where
    P: Projection + ?Sized,
    I: IntoIterator<Item = (f64, f64)>,
{
    let max_jump = canvas.width / 2.0;
    let mut strokes = Vec::new();
    let mut current: Vec<CanvasPoint> = Vec::new();
    for (lat, lon) in samples {
        match projection.forward(lat, lon, canvas) {
            Some(point) => {
                if current.last().is_some_and(|prev| (point.x - prev.x).abs() > max_jump) {
                    flush(&mut strokes, &mut current);
                }
                current.push(point);
            }
            None => flush(&mut strokes, &mut current),
        }
    }
    flush(&mut strokes, &mut current);
    strokes
}

fn flush(strokes: &mut Vec<Vec<CanvasPoint>>, current: &mut Vec<CanvasPoint>) {
    // A lone point draws nothing
    if current.len() >= 2 {
        strokes.push(mem::take(current));
    } else {
        current.clear();
    }
}
