use super::adaptive::required_trials;
use super::options::RunConfig;
use super::result::{FitResult, RunStats, StopReason};
use super::sampling::IndexSampler;
use super::{Classifier, Estimator};

use crate::error::RansacError;
use log::{debug, trace, warn};
use std::time::{Duration, Instant};

/// RANSAC driver parameterised by a [`RunConfig`].
///
/// The engine holds no per-run state; one instance can serve any number of
/// runs and any estimator/classifier pair.
#[derive(Clone, Debug, Default)]
pub struct RansacEngine {
    config: RunConfig,
}

impl RansacEngine {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run RANSAC over `points` and return the best consensus model.
    pub fn run<D, E, C>(
        &self,
        points: &[D],
        estimator: &E,
        classifier: &C,
    ) -> Result<FitResult<E::Model>, RansacError>
    where
        D: Clone,
        E: Estimator<D>,
        C: Classifier<D, E::Model>,
    {
        self.run_with_stats(points, estimator, classifier)
            .map(|(fit, _)| fit)
    }

    /// Same as [`RansacEngine::run`], also returning the run bookkeeping.
    pub fn run_with_stats<D, E, C>(
        &self,
        points: &[D],
        estimator: &E,
        classifier: &C,
    ) -> Result<(FitResult<E::Model>, RunStats), RansacError>
    where
        D: Clone,
        E: Estimator<D>,
        C: Classifier<D, E::Model>,
    {
        let cfg = &self.config;
        cfg.validate(points.len(), estimator.min_samples())?;

        let t0 = Instant::now();
        let deadline = cfg.max_duration_ms.map(Duration::from_millis);
        let mut sampler = IndexSampler::new(cfg.seed);
        let mut scratch = Scratch::with_capacity(cfg.sample_size);
        let mut stats = RunStats::default();
        let mut best: Option<FitResult<E::Model>> = None;
        let mut trials_needed = cfg.max_iterations;

        for iteration in 1..=cfg.max_iterations {
            stats.iterations = iteration;
            match run_trial(
                points,
                estimator,
                classifier,
                &mut sampler,
                &mut scratch,
                cfg,
                iteration,
            ) {
                Err(_) => {
                    stats.degenerate_samples += 1;
                    trace!(
                        "RANSAC: iteration {iteration} degenerate sample {:?}",
                        scratch.indices
                    );
                }
                Ok(candidate) => {
                    if candidate.beats(best.as_ref(), cfg.tie_break_rms) {
                        trace!(
                            "RANSAC: iteration {iteration} improved score to {} (rms={:.3e})",
                            candidate.score,
                            candidate.inlier_rms
                        );
                        stats.record_improvement(candidate.score);
                        if let Some(p) = cfg.confidence {
                            let ratio = candidate.score as f64 / points.len() as f64;
                            trials_needed =
                                required_trials(p, ratio, cfg.sample_size, cfg.max_iterations);
                            stats.trials_needed = Some(trials_needed);
                        }
                        best = Some(candidate);
                    }
                }
            }

            if best.as_ref().is_some_and(|b| b.score >= cfg.goal_inliers) {
                stats.stop_reason = StopReason::GoalReached;
                break;
            }
            if cfg.confidence.is_some() && best.is_some() && iteration >= trials_needed {
                stats.stop_reason = StopReason::ConfidenceReached;
                break;
            }
            if deadline.is_some_and(|d| t0.elapsed() >= d) {
                stats.stop_reason = StopReason::Deadline;
                break;
            }
        }

        let Some(mut fit) = best else {
            stats.elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
            warn!(
                "RANSAC: no consensus after {} iterations (all samples degenerate)",
                stats.iterations
            );
            return Err(RansacError::NoConsensus {
                iterations: stats.iterations,
            });
        };

        if cfg.refit_on_inliers {
            fit = refit_on_inliers(points, estimator, classifier, cfg.threshold, fit, &mut stats);
        }
        stats.elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "RANSAC: score={} of {} points after {} iterations ({} degenerate, stop={:?}, {:.3} ms)",
            fit.score,
            points.len(),
            stats.iterations,
            stats.degenerate_samples,
            stats.stop_reason,
            stats.elapsed_ms
        );
        Ok((fit, stats))
    }
}

/// Reusable per-run buffers for sampled indices and data.
pub(crate) struct Scratch<D> {
    pub(crate) indices: Vec<usize>,
    sample: Vec<D>,
}

impl<D> Scratch<D> {
    pub(crate) fn with_capacity(k: usize) -> Self {
        Self {
            indices: Vec::with_capacity(k),
            sample: Vec::with_capacity(k),
        }
    }
}

/// One sample → estimate → score step. `Err(Degenerate)` if the estimator
/// rejects the sample.
pub(crate) fn run_trial<D, E, C>(
    points: &[D],
    estimator: &E,
    classifier: &C,
    sampler: &mut IndexSampler,
    scratch: &mut Scratch<D>,
    cfg: &RunConfig,
    iteration: usize,
) -> Result<FitResult<E::Model>, RansacError>
where
    D: Clone,
    E: Estimator<D>,
    C: Classifier<D, E::Model>,
{
    sampler.draw_into(points.len(), cfg.sample_size, &mut scratch.indices);
    scratch.sample.clear();
    scratch
        .sample
        .extend(scratch.indices.iter().map(|&i| points[i].clone()));
    let model = estimator.estimate(&scratch.sample)?;
    Ok(score_model(points, classifier, model, cfg.threshold, iteration))
}

/// Classify every point against `model` and collect the consensus set.
pub(crate) fn score_model<D, M, C>(
    points: &[D],
    classifier: &C,
    model: M,
    threshold: f64,
    iteration: usize,
) -> FitResult<M>
where
    C: Classifier<D, M>,
{
    let mut inliers = Vec::new();
    let mut sum_sq = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        if classifier.classify(&model, p, threshold) {
            let r = classifier.residual(&model, p);
            sum_sq += r * r;
            inliers.push(i);
        }
    }
    let inlier_rms = if inliers.is_empty() {
        f64::INFINITY
    } else {
        (sum_sq / inliers.len() as f64).sqrt()
    };
    FitResult {
        model,
        score: inliers.len(),
        inliers,
        inlier_rms,
        iteration,
    }
}

/// Re-estimate from the full inlier set; the refit is kept only if it does
/// not lose inliers.
pub(crate) fn refit_on_inliers<D, E, C>(
    points: &[D],
    estimator: &E,
    classifier: &C,
    threshold: f64,
    fit: FitResult<E::Model>,
    stats: &mut RunStats,
) -> FitResult<E::Model>
where
    D: Clone,
    E: Estimator<D>,
    C: Classifier<D, E::Model>,
{
    let sample: Vec<D> = fit.inliers.iter().map(|&i| points[i].clone()).collect();
    match estimator.estimate(&sample) {
        Ok(model) => {
            let refit = score_model(points, classifier, model, threshold, fit.iteration);
            if refit.score >= fit.score {
                debug!(
                    "RANSAC: refit on {} inliers -> score {}",
                    fit.score, refit.score
                );
                stats.refit_applied = true;
                refit
            } else {
                warn!(
                    "RANSAC: refit lowered score ({} -> {}), keeping sampled model",
                    fit.score, refit.score
                );
                fit
            }
        }
        Err(err) => {
            warn!("RANSAC: refit on {} inliers failed: {err}", fit.score);
            fit
        }
    }
}
