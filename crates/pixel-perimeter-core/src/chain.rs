use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Integer pixel position `(x, y)`.
pub type LatticePoint = Point2<i32>;

/// Ordered, implicitly closed sequence of lattice points.
///
/// The point after the last one wraps to the first, so a chain of `n >= 2`
/// points has exactly `n` edges. Consecutive points may coincide or be
/// arbitrarily far apart; the estimator decides what each edge contributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    points: Vec<LatticePoint>,
}

impl Chain {
    pub fn new(points: Vec<LatticePoint>) -> Self {
        Self { points }
    }

    /// Build a chain from `(x, y)` tuples.
    pub fn from_xy(coords: &[(i32, i32)]) -> Self {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<LatticePoint> {
        self.points
    }

    /// Closed edge list: `(p0, p1), ..., (p[n-1], p0)`.
    ///
    /// Chains with fewer than 2 points have no edges.
    pub fn edges(&self) -> impl Iterator<Item = (LatticePoint, LatticePoint)> + '_ {
        let n = if self.points.len() < 2 {
            0
        } else {
            self.points.len()
        };
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Coordinate deltas of the closed edge list, widened so that edges
    /// spanning the whole `i32` range cannot overflow.
    pub fn deltas(&self) -> impl Iterator<Item = Vector2<i64>> + '_ {
        self.edges().map(|(a, b)| edge_delta(a, b))
    }
}

/// `b - a` in `i64`.
#[inline]
pub(crate) fn edge_delta(a: LatticePoint, b: LatticePoint) -> Vector2<i64> {
    Vector2::new(
        i64::from(b.x) - i64::from(a.x),
        i64::from(b.y) - i64::from(a.y),
    )
}

impl From<Vec<LatticePoint>> for Chain {
    fn from(points: Vec<LatticePoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<LatticePoint> for Chain {
    fn from_iter<I: IntoIterator<Item = LatticePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AsRef<[LatticePoint]> for Chain {
    fn as_ref(&self) -> &[LatticePoint] {
        &self.points
    }
}
