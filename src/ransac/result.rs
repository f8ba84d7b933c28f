use serde::Serialize;

/// Best model of a run together with its consensus set.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult<M> {
    pub model: M,
    /// Indices of inlier points, ascending.
    pub inliers: Vec<usize>,
    /// Inlier count used for ranking.
    pub score: usize,
    /// RMS of the classifier residuals over the inliers.
    pub inlier_rms: f64,
    /// 1-based iteration that produced the model.
    pub iteration: usize,
}

impl<M> FitResult<M> {
    pub fn is_inlier(&self, index: usize) -> bool {
        self.inliers.binary_search(&index).is_ok()
    }

    /// Whether `self` should replace `best`. Ties keep the earlier candidate
    /// unless `tie_break_rms` lets a lower residual win.
    pub(crate) fn beats(&self, best: Option<&FitResult<M>>, tie_break_rms: bool) -> bool {
        let Some(best) = best else {
            return true;
        };
        if self.score != best.score {
            return self.score > best.score;
        }
        tie_break_rms && self.inlier_rms < best.inlier_rms
    }
}

/// Why the iteration loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    GoalReached,
    ConfidenceReached,
    IterationBudget,
    Deadline,
}

/// Bookkeeping collected while the engine runs.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub iterations: usize,
    pub degenerate_samples: usize,
    pub improvements: usize,
    /// Best score after each improvement, in the order found.
    pub score_history: Vec<usize>,
    /// Iteration bound derived from the confidence target, if enabled.
    pub trials_needed: Option<usize>,
    pub refit_applied: bool,
    pub stop_reason: StopReason,
    pub elapsed_ms: f64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            iterations: 0,
            degenerate_samples: 0,
            improvements: 0,
            score_history: Vec::new(),
            trials_needed: None,
            refit_applied: false,
            stop_reason: StopReason::IterationBudget,
            elapsed_ms: 0.0,
        }
    }
}

impl RunStats {
    pub(crate) fn record_improvement(&mut self, score: usize) {
        self.improvements += 1;
        self.score_history.push(score);
    }
}
