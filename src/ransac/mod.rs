//! Generic, model-agnostic RANSAC driver.
//!
//! The engine never knows what it is fitting. It draws minimal samples,
//! delegates model construction to an [`Estimator`] and inlier tests to a
//! [`Classifier`], and keeps the candidate with the largest consensus set.
//!
//! Pipeline (per iteration)
//! - Sampling: `sample_size` distinct indices drawn uniformly without
//!   replacement from a seeded `StdRng`.
//! - Estimation: `Estimator::estimate` on the sampled data; a
//!   `RansacError::Degenerate` answer skips the iteration.
//! - Scoring: every datum is classified against the candidate; the inlier
//!   count is the score.
//! - Selection: strictly higher scores replace the best so far (earlier
//!   iterations win ties unless `tie_break_rms` is enabled).
//!
//! Stop conditions: goal inlier count, adaptive confidence bound,
//! wall-clock deadline, and the hard `max_iterations` cap.
//!
//! Notes
//! - Only configuration problems and total exhaustion are surfaced as errors.
//! - `run_parallel` spreads iterations over a rayon pool with one RNG per
//!   worker; it is reproducible for a fixed seed and worker count as long as
//!   neither the goal nor the deadline cuts the run short.

mod adaptive;
mod engine;
mod options;
mod parallel;
mod result;
mod sampling;

pub use adaptive::required_trials;
pub use engine::RansacEngine;
pub use options::RunConfig;
pub use result::{FitResult, RunStats, StopReason};
pub use sampling::IndexSampler;

use crate::error::RansacError;

/// Builds a model from a (minimal or larger) sample.
pub trait Estimator<D> {
    type Model;

    /// Smallest sample that determines a model.
    fn min_samples(&self) -> usize;

    /// Fit a model to `sample`; return `RansacError::Degenerate` if the
    /// sample cannot determine one.
    fn estimate(&self, sample: &[D]) -> Result<Self::Model, RansacError>;
}

/// Decides whether a datum agrees with a model.
pub trait Classifier<D, M> {
    /// Non-negative residual in the same units as the inlier threshold.
    fn residual(&self, model: &M, datum: &D) -> f64;

    #[inline]
    fn classify(&self, model: &M, datum: &D, threshold: f64) -> bool {
        self.residual(model, datum) < threshold
    }
}
