//! Plane model and its total-least-squares estimator.

mod estimator;
mod model;

pub use estimator::{fit_plane, PlaneEstimator};
pub use model::{PlaneModel, NORMAL_EPS};
