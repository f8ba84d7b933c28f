/// Number of trials needed so that, with probability `confidence`, at least
/// one sample of `sample_size` points is outlier-free given the observed
/// `inlier_ratio`:
///
/// `N = ln(1 − p) / ln(1 − wˢ)`
///
/// The result is clamped to `[1, max_trials]`; a zero inlier ratio keeps the
/// full budget.
pub fn required_trials(
    confidence: f64,
    inlier_ratio: f64,
    sample_size: usize,
    max_trials: usize,
) -> usize {
    if confidence <= 0.0 || inlier_ratio <= 0.0 || max_trials == 0 {
        return max_trials;
    }
    let w = inlier_ratio.min(1.0);
    let denom = (1.0 - w.powi(sample_size as i32)).max(1e-12).ln();
    if denom >= 0.0 {
        return max_trials;
    }
    let n = ((1.0 - confidence.min(1.0 - 1e-12)).ln() / denom).ceil();
    if !n.is_finite() || n >= max_trials as f64 {
        return max_trials;
    }
    (n as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_textbook_values() {
        // p = 0.99, w = 0.5, s = 3 → ln(0.01) / ln(0.875) ≈ 34.5
        assert_eq!(required_trials(0.99, 0.5, 3, 1000), 35);
    }

    #[test]
    fn all_inliers_needs_one_trial() {
        assert_eq!(required_trials(0.99, 1.0, 3, 1000), 1);
    }

    #[test]
    fn no_inliers_keeps_budget() {
        assert_eq!(required_trials(0.99, 0.0, 3, 1000), 1000);
        assert_eq!(required_trials(0.99, 0.01, 3, 1000), 1000);
    }

    #[test]
    fn more_inliers_never_needs_more_trials() {
        let mut prev = usize::MAX;
        for k in 1..=10 {
            let n = required_trials(0.95, k as f64 / 10.0, 4, 100_000);
            assert!(n <= prev);
            prev = n;
        }
    }
}
