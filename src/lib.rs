#![doc = include_str!("../README.md")]

// Public modules (stable surface)
pub mod error;
pub mod plane;
pub mod ransac;
pub mod types;

// Supporting modules for tools and advanced users.
pub mod config;
pub mod geometry;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ConfigError, RansacError};
pub use crate::plane::{fit_plane, PlaneEstimator, PlaneModel};
pub use crate::ransac::{
    Classifier, Estimator, FitResult, RansacEngine, RunConfig, RunStats, StopReason,
};
pub use crate::types::Point3;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use plane_ransac::prelude::*;
///
/// let points = vec![
///     Point3::new(20.0, 0.0, 0.0),
///     Point3::new(10.0, -10.0, 0.0),
///     Point3::new(10.0, 10.0, 0.0),
/// ];
/// let fit = fit_plane(&points, &RunConfig { seed: Some(1), ..Default::default() }).unwrap();
/// assert_eq!(fit.score, 3);
/// ```
pub mod prelude {
    pub use crate::{fit_plane, PlaneEstimator, PlaneModel, Point3, RansacEngine, RunConfig};
}
