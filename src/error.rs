/// Reasons why a [`RunConfig`](crate::ransac::RunConfig) is rejected before
/// any iteration runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    SampleSizeTooSmall { sample_size: usize, minimum: usize },
    SampleSizeExceedsPoints { sample_size: usize, points: usize },
    InvalidThreshold { threshold: f64 },
    ZeroIterations,
    InvalidConfidence { confidence: f64 },
    ZeroWorkers,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::SampleSizeTooSmall {
                sample_size,
                minimum,
            } => write!(f, "sample size too small ({sample_size} < {minimum})"),
            ConfigError::SampleSizeExceedsPoints {
                sample_size,
                points,
            } => write!(
                f,
                "sample size exceeds point count ({sample_size} > {points})"
            ),
            ConfigError::InvalidThreshold { threshold } => {
                write!(f, "inlier threshold must be finite and >= 0 (got {threshold})")
            }
            ConfigError::ZeroIterations => write!(f, "max_iterations must be positive"),
            ConfigError::InvalidConfidence { confidence } => {
                write!(f, "confidence must lie in (0, 1) (got {confidence})")
            }
            ConfigError::ZeroWorkers => write!(f, "worker count must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failures surfaced by the estimators and the RANSAC driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RansacError {
    /// The sample yields an ill-conditioned model (zero normal, collinear
    /// points, non-finite coefficients). Recovered inside the loop.
    Degenerate,
    /// Configuration rejected up front.
    InvalidConfig(ConfigError),
    /// Every sampled candidate was degenerate.
    NoConsensus { iterations: usize },
}

impl std::fmt::Display for RansacError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RansacError::Degenerate => write!(f, "degenerate sample"),
            RansacError::InvalidConfig(err) => write!(f, "invalid config: {err}"),
            RansacError::NoConsensus { iterations } => write!(
                f,
                "no consensus: all {iterations} sampled candidates were degenerate"
            ),
        }
    }
}

impl std::error::Error for RansacError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RansacError::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for RansacError {
    fn from(err: ConfigError) -> Self {
        RansacError::InvalidConfig(err)
    }
}
