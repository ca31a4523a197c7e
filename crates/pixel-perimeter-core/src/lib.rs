//! Vossepoel perimeter estimation for pixel-precise closed chains.
//!
//! This crate is intentionally small and purely combinatorial. It does *not*
//! depend on any image type or contour tracer; it consumes chains of integer
//! lattice points and produces lengths.
//!
//! ## Quickstart
//!
//! ```
//! use pixel_perimeter_core::{estimate_perimeter, reduce_batch, Chain};
//!
//! let square = Chain::from_xy(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
//! let p = estimate_perimeter(square.points());
//! assert!((p - 3.647).abs() < 1e-9);
//!
//! let summary = reduce_batch(&[square]).expect("one chain");
//! assert_eq!(summary.largest.index, 0);
//! ```

mod batch;
mod chain;
mod direction;
mod estimator;
mod logger;

pub use batch::{reduce_batch, summarize, BatchSummary, LargestChain};
pub use chain::{Chain, LatticePoint};
pub use direction::Direction;
pub use estimator::{
    chain_code, count_steps, estimate_perimeter, PerimeterEstimator, PerimeterMeasurement,
    StepCounts, VossepoelCoefficients,
};

#[cfg(feature = "rayon")]
pub use batch::reduce_batch_par;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
