//! Projection selection by name and parameters, with an optional bounded cache.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::ProjError;
use crate::proj::mercator::{Mercator, MercatorOptions};
use crate::proj::orthographic::Orthographic;
use crate::proj::stereographic::Stereographic;
use crate::proj::{CanvasPoint, CanvasSize, GeoPoint, Projection};

/// Fallback for a non-finite center latitude/longitude.
const DEFAULT_CENTER_DEG: f64 = 0.0;
/// Fallback for a non-finite edge angle / max latitude.
const DEFAULT_EXTENT_DEG: f64 = 90.0;

/// Default number of cached projections.
pub const DEFAULT_CACHE_CAPACITY: usize = 20;

/// The supported projection families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    #[default]
    #[serde(alias = "ortho")]
    Orthographic,
    #[serde(alias = "merc")]
    Mercator,
    #[serde(alias = "stereo")]
    Stereographic,
}

impl ProjectionKind {
    /// Parse from a name, accepting the short forms `ortho`, `merc` and `stereo`.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "orthographic" | "ortho" => Some(Self::Orthographic),
            "mercator" | "merc" => Some(Self::Mercator),
            "stereographic" | "stereo" => Some(Self::Stereographic),
            _ => None,
        }
    }

    /// Parse from a name; unknown names select orthographic.
    pub fn from_name_or_default(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            tracing::warn!(name = s, "unknown projection, using orthographic");
            Self::default()
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Orthographic => "orthographic",
            Self::Mercator => "mercator",
            Self::Stereographic => "stereographic",
        }
    }

    /// Accepted range in degrees for the kind's extent parameter.
    pub fn extent_range_deg(&self) -> (f64, f64) {
        match self {
            Self::Orthographic => crate::proj::orthographic::EDGE_ANGLE_RANGE_DEG,
            Self::Mercator => crate::proj::mercator::MAX_LAT_RANGE_DEG,
            Self::Stereographic => crate::proj::stereographic::EDGE_ANGLE_RANGE_DEG,
        }
    }

    /// Label for the extent parameter: an edge angle, or Mercator's max latitude.
    pub fn extent_label(&self) -> &'static str {
        match self {
            Self::Mercator => "Max latitude (°)",
            _ => "Edge angle (°)",
        }
    }
}

impl FromStr for ProjectionKind {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ProjError::UnknownProjection(s.to_string()))
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-facing projection parameters, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    pub kind: ProjectionKind,
    pub center_lat_deg: f64,
    pub center_lon_deg: f64,
    /// Edge angle for orthographic/stereographic, max latitude for Mercator.
    pub extent_deg: f64,
    pub mercator: MercatorOptions,
}

impl Default for ProjectionParams {
    /// Orthographic hemisphere centred on New York City.
    fn default() -> Self {
        Self {
            kind: ProjectionKind::Orthographic,
            center_lat_deg: 40.71,
            center_lon_deg: -74.01,
            extent_deg: 90.0,
            mercator: MercatorOptions::default(),
        }
    }
}

impl ProjectionParams {
    pub fn new(kind: ProjectionKind, center_lat_deg: f64, center_lon_deg: f64, extent_deg: f64) -> Self {
        Self {
            kind,
            center_lat_deg,
            center_lon_deg,
            extent_deg,
            mercator: MercatorOptions::default(),
        }
    }

    pub fn with_mercator_options(mut self, options: MercatorOptions) -> Self {
        self.mercator = options;
        self
    }

    /// Replace non-finite numbers with safe defaults so NaN never reaches the
    /// trigonometry.
    pub fn sanitized(&self) -> Self {
        let finite_or = |v: f64, default: f64| if v.is_finite() { v } else { default };
        Self {
            center_lat_deg: finite_or(self.center_lat_deg, DEFAULT_CENTER_DEG),
            center_lon_deg: finite_or(self.center_lon_deg, DEFAULT_CENTER_DEG),
            extent_deg: finite_or(self.extent_deg, DEFAULT_EXTENT_DEG),
            ..*self
        }
    }

    /// Round the numeric parameters to two decimals.
    pub fn quantized(&self) -> Self {
        Self {
            center_lat_deg: round2(self.center_lat_deg),
            center_lon_deg: round2(self.center_lon_deg),
            extent_deg: round2(self.extent_deg),
            ..*self
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One of the three concrete projections.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyProjection {
    Orthographic(Orthographic),
    Mercator(Mercator),
    Stereographic(Stereographic),
}

impl AnyProjection {
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Self::Orthographic(_) => ProjectionKind::Orthographic,
            Self::Mercator(_) => ProjectionKind::Mercator,
            Self::Stereographic(_) => ProjectionKind::Stereographic,
        }
    }

    fn as_dyn(&self) -> &dyn Projection {
        match self {
            Self::Orthographic(p) => p,
            Self::Mercator(p) => p,
            Self::Stereographic(p) => p,
        }
    }
}

impl Projection for AnyProjection {
    fn forward(&self, lat: f64, lon: f64, canvas: CanvasSize) -> Option<CanvasPoint> {
        self.as_dyn().forward(lat, lon, canvas)
    }

    fn inverse(&self, x: f64, y: f64, canvas: CanvasSize) -> Option<GeoPoint> {
        self.as_dyn().inverse(x, y, canvas)
    }

    fn needs_circular_clipping(&self) -> bool {
        self.as_dyn().needs_circular_clipping()
    }
}

/// Build a projection from parameters. Never fails: non-finite values are
/// replaced and out-of-range extents clamped by the concrete constructors.
pub fn create(params: &ProjectionParams) -> AnyProjection {
    let p = params.sanitized();
    if p != *params {
        tracing::warn!(?params, "non-finite projection parameters replaced with defaults");
    }
    match p.kind {
        ProjectionKind::Orthographic => AnyProjection::Orthographic(Orthographic::new(
            p.center_lat_deg,
            p.center_lon_deg,
            p.extent_deg,
        )),
        ProjectionKind::Mercator => AnyProjection::Mercator(Mercator::with_options(
            p.center_lat_deg,
            p.center_lon_deg,
            p.extent_deg,
            p.mercator,
        )),
        ProjectionKind::Stereographic => AnyProjection::Stereographic(Stereographic::new(
            p.center_lat_deg,
            p.center_lon_deg,
            p.extent_deg,
        )),
    }
}

/// Build a projection from a type name. Unknown names fall back to orthographic.
pub fn create_from_name(
    name: &str,
    center_lat_deg: f64,
    center_lon_deg: f64,
    extent_deg: f64,
) -> AnyProjection {
    let kind = ProjectionKind::from_name_or_default(name);
    create(&ProjectionParams::new(kind, center_lat_deg, center_lon_deg, extent_deg))
}

/// Cache key: parameters quantised to hundredths of a degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: ProjectionKind,
    center_lat: i64,
    center_lon: i64,
    extent: i64,
    mercator: MercatorOptions,
}

impl CacheKey {
    fn new(params: &ProjectionParams) -> Self {
        let hundredths = |v: f64| (v * 100.0).round() as i64;
        Self {
            kind: params.kind,
            center_lat: hundredths(params.center_lat_deg),
            center_lon: hundredths(params.center_lon_deg),
            extent: hundredths(params.extent_deg),
            mercator: params.mercator,
        }
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, Arc<AnyProjection>>,
    // Insertion order, oldest first
    order: VecDeque<CacheKey>,
}

/// Bounded cache of shared projection instances.
///
/// Instances are immutable, so a hit hands out the same `Arc`. When full, the
/// oldest inserted entry is dropped before a new one is added.
pub struct ProjectionCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ProjectionCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    /// Return the cached projection for these parameters, building it on a miss.
    pub fn get_or_create(&self, params: &ProjectionParams) -> Arc<AnyProjection> {
        let params = params.sanitized().quantized();
        let key = CacheKey::new(&params);

        let mut state = self.lock();
        if let Some(hit) = state.entries.get(&key) {
            tracing::debug!(kind = %params.kind, "projection cache hit");
            return Arc::clone(hit);
        }

        while state.entries.len() >= self.capacity {
            let Some(oldest) = state.order.pop_front() else {
                break;
            };
            state.entries.remove(&oldest);
            tracing::debug!(?oldest, "projection cache eviction");
        }

        let projection = Arc::new(create(&params));
        state.entries.insert(key, Arc::clone(&projection));
        state.order.push_back(key);
        tracing::debug!(kind = %params.kind, size = state.entries.len(), "projection cache insert");
        projection
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        // Entries are only inserted whole, so a poisoned map is still consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
