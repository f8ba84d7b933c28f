use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Parameters of a single RANSAC run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of points drawn per iteration (≥ the estimator's minimum).
    pub sample_size: usize,
    /// Inlier iff the classifier residual is strictly below this value.
    pub threshold: f64,
    /// Stop as soon as the best model has at least this many inliers.
    pub goal_inliers: usize,
    /// Hard cap on iterations (degenerate samples count against it).
    pub max_iterations: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Re-estimate the best model from its full inlier set before returning.
    pub refit_on_inliers: bool,
    /// Desired probability of having drawn at least one outlier-free sample.
    /// Enables adaptive termination when set.
    pub confidence: Option<f64>,
    /// Wall-clock budget in milliseconds.
    pub max_duration_ms: Option<u64>,
    /// On equal inlier counts prefer the candidate with lower inlier RMS.
    pub tie_break_rms: bool,
    /// Worker count for `RansacEngine::run_parallel`.
    pub workers: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_size: 3,
            threshold: 0.01,
            goal_inliers: usize::MAX,
            max_iterations: 1000,
            seed: None,
            refit_on_inliers: false,
            confidence: None,
            max_duration_ms: None,
            tie_break_rms: false,
            workers: 1,
        }
    }
}

impl RunConfig {
    /// Check the configuration against the data size and the estimator's
    /// minimal sample.
    pub fn validate(&self, points: usize, min_samples: usize) -> Result<(), ConfigError> {
        if self.sample_size < min_samples {
            return Err(ConfigError::SampleSizeTooSmall {
                sample_size: self.sample_size,
                minimum: min_samples,
            });
        }
        if self.sample_size > points {
            return Err(ConfigError::SampleSizeExceedsPoints {
                sample_size: self.sample_size,
                points,
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if let Some(p) = self.confidence {
            if !(p > 0.0 && p < 1.0) {
                return Err(ConfigError::InvalidConfidence { confidence: p });
            }
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_for_three_points() {
        assert!(RunConfig::default().validate(3, 3).is_ok());
    }

    #[test]
    fn rejects_sample_size_outside_range() {
        let cfg = RunConfig {
            sample_size: 2,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(10, 3),
            Err(ConfigError::SampleSizeTooSmall {
                sample_size: 2,
                minimum: 3
            })
        );
        let cfg = RunConfig {
            sample_size: 4,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(3, 3),
            Err(ConfigError::SampleSizeExceedsPoints {
                sample_size: 4,
                points: 3
            })
        );
    }

    #[test]
    fn rejects_bad_threshold_and_confidence() {
        for threshold in [-0.1, f64::NAN, f64::INFINITY] {
            let cfg = RunConfig {
                threshold,
                ..Default::default()
            };
            assert!(matches!(
                cfg.validate(5, 3),
                Err(ConfigError::InvalidThreshold { .. })
            ));
        }
        let cfg = RunConfig {
            confidence: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(5, 3),
            Err(ConfigError::InvalidConfidence { .. })
        ));
        let cfg = RunConfig {
            workers: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(5, 3), Err(ConfigError::ZeroWorkers));
        let cfg = RunConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(5, 3), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let cfg: RunConfig =
            serde_json::from_str(r#"{ "threshold": 0.5, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.threshold, 0.5);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.sample_size, 3);
        assert_eq!(cfg.goal_inliers, usize::MAX);
    }
}
