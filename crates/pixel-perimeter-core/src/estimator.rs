//! Vossepoel perimeter estimator.
//!
//! Each chain edge is replayed as `max(|dx|, |dy|)` unit steps along the
//! per-axis sign of the edge delta. Steps are classified into axis-aligned and
//! diagonal moves, direction changes between consecutive steps are counted as
//! corners, and the three counts are combined linearly:
//!
//! ```text
//! length = a * Ne + b * No - c * X
//! ```
//!
//! The replay is not a digital line: an edge such as `(0,0) -> (3,1)` yields
//! three identical diagonal steps. Pixel-precise tracers only emit unit
//! edges, so this never matters for their output.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::batch::{summarize, BatchSummary};
use crate::chain::edge_delta;
use crate::{Direction, LatticePoint};

/// Weights of the Vossepoel length model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VossepoelCoefficients {
    /// Weight of an axis-aligned unit step.
    pub axis: f64,
    /// Weight of a diagonal unit step.
    pub diagonal: f64,
    /// Correction subtracted per direction change.
    pub corner: f64,
}

impl VossepoelCoefficients {
    pub const VOSSEPOEL: Self = Self {
        axis: 0.980,
        diagonal: 1.406,
        corner: 0.091,
    };
}

impl Default for VossepoelCoefficients {
    fn default() -> Self {
        Self::VOSSEPOEL
    }
}

/// Unit-step decomposition of one chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounts {
    /// `Ne`: axis-aligned unit steps.
    pub axis_steps: u64,
    /// `No`: diagonal unit steps.
    pub diagonal_steps: u64,
    /// `X`: steps whose direction differs from the previous step.
    pub corners: u64,
}

impl StepCounts {
    pub fn total_steps(&self) -> u64 {
        self.axis_steps + self.diagonal_steps
    }

    pub fn weighted(&self, coeffs: &VossepoelCoefficients) -> f64 {
        coeffs.axis * self.axis_steps as f64 + coeffs.diagonal * self.diagonal_steps as f64
            - coeffs.corner * self.corners as f64
    }
}

/// Walk the closed chain edge by edge.
///
/// `visit` receives each edge as a run `(direction, steps)` of identical unit
/// steps, in chain order. Zero-length edges emit nothing and chains with
/// fewer than 2 points are not walked at all.
fn walk_runs(chain: &[LatticePoint], mut visit: impl FnMut(Direction, u64)) {
    let n = chain.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        let delta = edge_delta(chain[i], chain[(i + 1) % n]);
        let Some(dir) = Direction::from_delta(delta) else {
            continue;
        };
        visit(dir, delta.x.unsigned_abs().max(delta.y.unsigned_abs()));
    }
}

/// Count axis-aligned steps, diagonal steps and corners of a closed chain.
///
/// The first emitted step never counts as a corner, and the last step is not
/// compared against the first one. Steps inside one edge share a direction,
/// so only the first step of each edge can be a corner and the work is
/// proportional to the number of edges.
pub fn count_steps(chain: &[LatticePoint]) -> StepCounts {
    let mut counts = StepCounts::default();
    let mut prev: Option<Direction> = None;
    walk_runs(chain, |dir, steps| {
        if dir.is_axis_aligned() {
            counts.axis_steps += steps;
        } else {
            counts.diagonal_steps += steps;
        }
        if prev.is_some_and(|p| p != dir) {
            counts.corners += 1;
        }
        prev = Some(dir);
    });
    counts
}

/// Freeman chain code of the unit-step replay, one entry per step.
pub fn chain_code(chain: &[LatticePoint]) -> Vec<Direction> {
    let mut code = Vec::with_capacity(chain.len());
    walk_runs(chain, |dir, steps| {
        code.extend(std::iter::repeat_n(dir, steps as usize));
    });
    code
}

/// Vossepoel perimeter of a closed chain with the standard coefficients.
///
/// Returns `0.0` for chains with fewer than 2 points and for chains made of
/// one repeated point.
pub fn estimate_perimeter(chain: &[LatticePoint]) -> f64 {
    count_steps(chain).weighted(&VossepoelCoefficients::VOSSEPOEL)
}

/// Perimeter of one chain together with its step decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerimeterMeasurement {
    pub counts: StepCounts,
    pub perimeter: f64,
}

/// Perimeter estimator with configurable weights.
///
/// `PerimeterEstimator::default()` uses the Vossepoel coefficients and gives
/// the same numbers as [`estimate_perimeter`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerimeterEstimator {
    coeffs: VossepoelCoefficients,
}

impl PerimeterEstimator {
    pub fn new(coeffs: VossepoelCoefficients) -> Self {
        Self { coeffs }
    }

    pub fn coefficients(&self) -> &VossepoelCoefficients {
        &self.coeffs
    }

    pub fn estimate(&self, chain: &[LatticePoint]) -> f64 {
        self.measure(chain).perimeter
    }

    pub fn measure(&self, chain: &[LatticePoint]) -> PerimeterMeasurement {
        let counts = count_steps(chain);
        PerimeterMeasurement {
            counts,
            perimeter: counts.weighted(&self.coeffs),
        }
    }

    /// Estimate every chain and reduce to total and largest.
    ///
    /// Returns `None` when `chains` is empty.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, chains), fields(num_chains = chains.len()))
    )]
    pub fn reduce<C: AsRef<[LatticePoint]>>(&self, chains: &[C]) -> Option<BatchSummary> {
        let perimeters = chains
            .iter()
            .map(|c| self.estimate(c.as_ref()))
            .collect();
        summarize(perimeters)
    }

    /// Parallel variant of [`PerimeterEstimator::reduce`].
    ///
    /// Chains are evaluated on the rayon pool; the reduction still runs in
    /// input order, so ties resolve exactly as in the sequential path.
    #[cfg(feature = "rayon")]
    pub fn reduce_par<C>(&self, chains: &[C]) -> Option<BatchSummary>
    where
        C: AsRef<[LatticePoint]> + Sync,
    {
        use rayon::prelude::*;

        let perimeters = chains
            .par_iter()
            .map(|c| self.estimate(c.as_ref()))
            .collect();
        summarize(perimeters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chain;
    use approx::assert_abs_diff_eq;
    use nalgebra::Point2;

    fn codes(chain: &Chain) -> Vec<u8> {
        chain_code(chain.points()).iter().map(|d| d.code()).collect()
    }

    #[test]
    fn degenerate_chains_are_zero() {
        assert_eq!(estimate_perimeter(&[]), 0.0);
        assert_eq!(estimate_perimeter(&[Point2::new(7, -3)]), 0.0);
        assert_eq!(count_steps(&[Point2::new(7, -3)]), StepCounts::default());
    }

    #[test]
    fn repeated_points_contribute_nothing() {
        let chain = Chain::from_xy(&[(2, 2), (2, 2), (2, 2)]);
        assert_eq!(count_steps(chain.points()), StepCounts::default());
        assert_eq!(estimate_perimeter(chain.points()), 0.0);
    }

    #[test]
    fn unit_square() {
        let chain = Chain::from_xy(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        assert_eq!(codes(&chain), vec![0, 6, 4, 2]);
        assert_eq!(
            count_steps(chain.points()),
            StepCounts {
                axis_steps: 4,
                diagonal_steps: 0,
                corners: 3,
            }
        );
        assert_abs_diff_eq!(estimate_perimeter(chain.points()), 3.647, epsilon = 1e-9);
    }

    #[test]
    fn duplicate_points_do_not_break_runs() {
        // The repeated (1, 0) is skipped, so the two east steps form one run.
        let chain = Chain::from_xy(&[(0, 0), (1, 0), (1, 0), (2, 0), (2, 1), (0, 1)]);
        assert_eq!(codes(&chain), vec![0, 0, 6, 4, 4, 2]);
        let counts = count_steps(chain.points());
        assert_eq!(counts.axis_steps, 6);
        assert_eq!(counts.corners, 3);
    }

    #[test]
    fn long_edges_replay_one_direction() {
        // (0,0) -> (3,1) is three south-east steps, not a digital line.
        let chain = Chain::from_xy(&[(0, 0), (3, 1)]);
        assert_eq!(codes(&chain), vec![7, 7, 7, 3, 3, 3]);
        let counts = count_steps(chain.points());
        assert_eq!(
            counts,
            StepCounts {
                axis_steps: 0,
                diagonal_steps: 6,
                corners: 1,
            }
        );
        assert_abs_diff_eq!(
            estimate_perimeter(chain.points()),
            6.0 * 1.406 - 0.091,
            epsilon = 1e-9
        );
    }

    #[test]
    fn edges_across_the_whole_coordinate_range() {
        let chain = Chain::from_xy(&[(i32::MIN, 0), (i32::MAX, 0)]);
        let span = u64::from(u32::MAX);
        assert_eq!(
            count_steps(chain.points()),
            StepCounts {
                axis_steps: 2 * span,
                diagonal_steps: 0,
                corners: 1,
            }
        );

        let chain = Chain::from_xy(&[
            (i32::MIN, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MAX, 0),
        ]);
        let counts = count_steps(chain.points());
        // South-east along the diagonal, north up the right side, north-west home.
        assert_eq!(counts.diagonal_steps, 2 * span);
        assert_eq!(counts.axis_steps, i32::MAX as u64);
        assert_eq!(counts.corners, 2);
        assert!(estimate_perimeter(chain.points()).is_finite());
    }

    #[test]
    fn straight_edges_count_every_pixel() {
        let chain = Chain::from_xy(&[(0, 0), (4, 0), (4, 2), (0, 2)]);
        let counts = count_steps(chain.points());
        assert_eq!(counts.axis_steps, 12);
        assert_eq!(counts.corners, 3);
        assert_abs_diff_eq!(
            estimate_perimeter(chain.points()),
            12.0 * 0.980 - 3.0 * 0.091,
            epsilon = 1e-9
        );
    }

    #[test]
    fn octagon_mixes_both_step_kinds() {
        let chain = Chain::from_xy(&[
            (0, 0),
            (1, 0),
            (2, 1),
            (2, 2),
            (1, 3),
            (0, 3),
            (-1, 2),
            (-1, 1),
        ]);
        let counts = count_steps(chain.points());
        assert_eq!(counts.axis_steps, 4);
        assert_eq!(counts.diagonal_steps, 4);
        assert_eq!(counts.corners, 7);
        assert_abs_diff_eq!(
            estimate_perimeter(chain.points()),
            4.0 * 0.980 + 4.0 * 1.406 - 7.0 * 0.091,
            epsilon = 1e-9
        );
    }

    #[test]
    fn custom_coefficients() {
        let chain = Chain::from_xy(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let naive = PerimeterEstimator::new(VossepoelCoefficients {
            axis: 1.0,
            diagonal: std::f64::consts::SQRT_2,
            corner: 0.0,
        });
        assert_abs_diff_eq!(naive.estimate(chain.points()), 4.0, epsilon = 1e-12);

        let default = PerimeterEstimator::default();
        let m = default.measure(chain.points());
        assert_eq!(m.counts.corners, 3);
        assert_eq!(m.perimeter, estimate_perimeter(chain.points()));
    }

    #[test]
    fn estimator_reduce_matches_free_function() {
        let chains = vec![
            Chain::from_xy(&[(0, 0), (1, 0), (1, 1), (0, 1)]),
            Chain::from_xy(&[(0, 0), (4, 0), (4, 2), (0, 2)]),
        ];
        let summary = PerimeterEstimator::default()
            .reduce(&chains)
            .expect("non-empty batch");
        assert_eq!(summary.largest.index, 1);
        assert_eq!(summary.perimeters.len(), 2);
        assert_eq!(summary.perimeters[0], estimate_perimeter(chains[0].points()));
    }
}
