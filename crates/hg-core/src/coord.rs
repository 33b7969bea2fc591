//! Planar coordinate type.
//!
//! All geometries handled by the synthesizer share one projected coordinate
//! reference system (e.g. Gauss-Krüger zone 4 for Berlin).  No reprojection
//! happens anywhere in the workspace, so a coordinate is just an `(x, y)`
//! pair in metres.  `f64` is required: projected eastings reach into the
//! millions, where `f32` would lose sub-metre precision.

/// A point in the shared projected coordinate system.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in CRS units (metres for projected systems).
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// `true` if both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// `[x, y]`, the layout `rstar` expects.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
