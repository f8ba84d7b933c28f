use super::model::PlaneModel;
use crate::error::RansacError;
use crate::geometry::{augment, collinear, null_space_direction};
use crate::ransac::{Classifier, Estimator, FitResult, RansacEngine, RunConfig};
use crate::types::Point3;

/// Total-least-squares plane estimator and algebraic-residual classifier.
///
/// `estimate` takes the right-singular vector of the smallest singular value
/// of the homogeneous matrix `[x y z 1]`, which is a unit 4-vector. With the
/// default (unnormalized) mode the classifier compares `|a·x+b·y+c·z+d|` on
/// that scale; [`PlaneEstimator::normalized`] rescales every model to a unit
/// normal so the residual becomes the Euclidean distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneEstimator {
    unit_normal: bool,
}

impl PlaneEstimator {
    pub const MIN_SAMPLES: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator whose models carry a unit normal.
    pub fn normalized() -> Self {
        Self { unit_normal: true }
    }

    pub fn is_normalized(&self) -> bool {
        self.unit_normal
    }

    /// Fit a plane to three or more points.
    pub fn estimate(&self, points: &[Point3]) -> Result<PlaneModel, RansacError> {
        if points.len() < Self::MIN_SAMPLES {
            return Err(RansacError::Degenerate);
        }
        if points.len() == Self::MIN_SAMPLES && collinear(&points[0], &points[1], &points[2]) {
            return Err(RansacError::Degenerate);
        }
        let v = null_space_direction(&augment(points)).ok_or(RansacError::Degenerate)?;
        let model = PlaneModel::from_vector(&v)?;
        Ok(if self.unit_normal {
            model.normalized()
        } else {
            model
        })
    }

    /// Inlier iff `|a·x + b·y + c·z + d| < threshold`.
    #[inline]
    pub fn classify(&self, model: &PlaneModel, point: &Point3, threshold: f64) -> bool {
        model.residual(point).abs() < threshold
    }
}

impl Estimator<Point3> for PlaneEstimator {
    type Model = PlaneModel;

    fn min_samples(&self) -> usize {
        Self::MIN_SAMPLES
    }

    fn estimate(&self, sample: &[Point3]) -> Result<PlaneModel, RansacError> {
        PlaneEstimator::estimate(self, sample)
    }
}

impl Classifier<Point3, PlaneModel> for PlaneEstimator {
    fn residual(&self, model: &PlaneModel, datum: &Point3) -> f64 {
        model.residual(datum).abs()
    }

    fn classify(&self, model: &PlaneModel, datum: &Point3, threshold: f64) -> bool {
        PlaneEstimator::classify(self, model, datum, threshold)
    }
}

/// Fit a plane to `points` with the default (unnormalized) estimator.
pub fn fit_plane(points: &[Point3], config: &RunConfig) -> Result<FitResult<PlaneModel>, RansacError> {
    let estimator = PlaneEstimator::new();
    RansacEngine::new(config.clone()).run(points, &estimator, &estimator)
}
