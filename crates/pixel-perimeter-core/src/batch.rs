use serde::{Deserialize, Serialize};

use crate::{estimate_perimeter, LatticePoint};

/// The chain with the greatest perimeter in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LargestChain {
    pub index: usize,
    pub perimeter: f64,
}

/// Per-chain perimeters of a non-empty batch plus their total and maximum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Perimeters in input order.
    pub perimeters: Vec<f64>,
    pub total: f64,
    /// First chain (in input order) reaching the maximum.
    pub largest: LargestChain,
}

/// Fold precomputed perimeters into a [`BatchSummary`].
///
/// Returns `None` for an empty batch. Among equal maxima the earliest index
/// wins.
pub fn summarize(perimeters: Vec<f64>) -> Option<BatchSummary> {
    let (&first, rest) = perimeters.split_first()?;
    let mut total = first;
    let mut largest = LargestChain {
        index: 0,
        perimeter: first,
    };
    for (offset, &p) in rest.iter().enumerate() {
        total += p;
        if p > largest.perimeter {
            largest = LargestChain {
                index: offset + 1,
                perimeter: p,
            };
        }
    }
    log::debug!(
        "batch of {} chains: total={:.3} largest=#{} ({:.3})",
        perimeters.len(),
        total,
        largest.index,
        largest.perimeter
    );
    Some(BatchSummary {
        perimeters,
        total,
        largest,
    })
}

/// Estimate every chain with the standard coefficients and summarize.
pub fn reduce_batch<C: AsRef<[LatticePoint]>>(chains: &[C]) -> Option<BatchSummary> {
    summarize(
        chains
            .iter()
            .map(|c| estimate_perimeter(c.as_ref()))
            .collect(),
    )
}

/// Parallel variant of [`reduce_batch`] with the same tie-break.
#[cfg(feature = "rayon")]
pub fn reduce_batch_par<C>(chains: &[C]) -> Option<BatchSummary>
where
    C: AsRef<[LatticePoint]> + Sync,
{
    use rayon::prelude::*;

    summarize(
        chains
            .par_iter()
            .map(|c| estimate_perimeter(c.as_ref()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chain;

    #[test]
    fn empty_batch_has_no_summary() {
        assert!(summarize(Vec::new()).is_none());
        assert!(reduce_batch::<Chain>(&[]).is_none());
    }

    #[test]
    fn earliest_maximum_wins() {
        let s = summarize(vec![2.0, 5.0, 5.0, 1.0]).expect("non-empty");
        assert_eq!(s.total, 13.0);
        assert_eq!(s.largest.index, 1);
        assert_eq!(s.largest.perimeter, 5.0);
        assert_eq!(s.perimeters, vec![2.0, 5.0, 5.0, 1.0]);
    }

    #[test]
    fn all_zero_batch_picks_first() {
        let s = summarize(vec![0.0, 0.0]).expect("non-empty");
        assert_eq!(s.largest.index, 0);
        assert_eq!(s.total, 0.0);
    }

    #[test]
    fn reduces_chains_in_input_order() {
        let chains = vec![
            Chain::from_xy(&[(0, 0)]),
            Chain::from_xy(&[(0, 0), (1, 0), (1, 1), (0, 1)]),
            Chain::from_xy(&[(5, 5), (6, 5), (6, 6), (5, 6)]),
        ];
        let s = reduce_batch(&chains).expect("non-empty");
        assert_eq!(s.perimeters[0], 0.0);
        assert_eq!(s.perimeters[1], s.perimeters[2]);
        assert_eq!(s.largest.index, 1);
        assert!((s.total - 2.0 * 3.647).abs() < 1e-9);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_reduction_matches_sequential() {
        let chains: Vec<Chain> = (0..64)
            .map(|i| {
                let s = i % 5 + 1;
                Chain::from_xy(&[(0, 0), (s, 0), (s, s), (0, s)])
            })
            .collect();
        assert_eq!(reduce_batch_par(&chains), reduce_batch(&chains));
    }
}
