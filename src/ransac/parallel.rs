use super::engine::{refit_on_inliers, run_trial, RansacEngine, Scratch};
use super::result::{FitResult, RunStats, StopReason};
use super::sampling::IndexSampler;
use super::{Classifier, Estimator};

use crate::error::RansacError;
use log::{debug, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

struct SharedBest<M> {
    best: Option<FitResult<M>>,
    score_history: Vec<usize>,
}

#[derive(Default)]
struct WorkerStats {
    iterations: usize,
    degenerate_samples: usize,
    goal_reached: bool,
    deadline_hit: bool,
}

impl<M> FitResult<M> {
    /// Total order used across workers: score, then (optionally) RMS, then
    /// the lower global iteration number. Independent of arrival order.
    fn outranks(&self, best: Option<&FitResult<M>>, tie_break_rms: bool) -> bool {
        let Some(best) = best else {
            return true;
        };
        if self.score != best.score {
            return self.score > best.score;
        }
        if tie_break_rms && self.inlier_rms != best.inlier_rms {
            return self.inlier_rms < best.inlier_rms;
        }
        self.iteration < best.iteration
    }
}

impl RansacEngine {
    /// Run iterations concurrently on the rayon pool.
    ///
    /// Worker `k` owns global iterations `k+1, k+1+W, k+1+2W, …` and an RNG
    /// seeded with `seed + k`. The best result sits behind a mutex and is
    /// replaced only by a candidate that outranks it; the goal and deadline
    /// are broadcast through an atomic flag, so a worker may finish one more
    /// iteration after the stop is signalled. The confidence bound is not
    /// applied here.
    pub fn run_parallel<D, E, C>(
        &self,
        points: &[D],
        estimator: &E,
        classifier: &C,
    ) -> Result<(FitResult<E::Model>, RunStats), RansacError>
    where
        D: Clone + Sync,
        E: Estimator<D> + Sync,
        E::Model: Send,
        C: Classifier<D, E::Model> + Sync,
    {
        let cfg = self.config();
        cfg.validate(points.len(), estimator.min_samples())?;
        if cfg.confidence.is_some() {
            debug!("RANSAC(parallel): confidence bound ignored, using iteration budget");
        }

        let t0 = Instant::now();
        let deadline = cfg.max_duration_ms.map(Duration::from_millis);
        let workers = cfg.workers.min(cfg.max_iterations);
        let shared = Mutex::new(SharedBest {
            best: None,
            score_history: Vec::new(),
        });
        let stop = AtomicBool::new(false);

        let per_worker: Vec<WorkerStats> = (0..workers)
            .into_par_iter()
            .map(|worker| {
                let mut sampler = IndexSampler::for_worker(cfg.seed, worker);
                let mut scratch = Scratch::with_capacity(cfg.sample_size);
                let mut local = WorkerStats::default();
                let mut iteration = worker + 1;
                while iteration <= cfg.max_iterations && !stop.load(Ordering::Relaxed) {
                    local.iterations += 1;
                    match run_trial(
                        points,
                        estimator,
                        classifier,
                        &mut sampler,
                        &mut scratch,
                        cfg,
                        iteration,
                    ) {
                        Err(_) => local.degenerate_samples += 1,
                        Ok(candidate) => {
                            let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
                            if candidate.outranks(guard.best.as_ref(), cfg.tie_break_rms) {
                                guard.score_history.push(candidate.score);
                                guard.best = Some(candidate);
                            }
                            if guard
                                .best
                                .as_ref()
                                .is_some_and(|b| b.score >= cfg.goal_inliers)
                            {
                                local.goal_reached = true;
                                stop.store(true, Ordering::Relaxed);
                            }
                        }
                    }
                    if deadline.is_some_and(|d| t0.elapsed() >= d) {
                        local.deadline_hit = true;
                        stop.store(true, Ordering::Relaxed);
                    }
                    iteration += workers;
                }
                local
            })
            .collect();

        let SharedBest {
            best,
            score_history,
        } = shared.into_inner().unwrap_or_else(PoisonError::into_inner);

        let mut stats = RunStats {
            iterations: per_worker.iter().map(|w| w.iterations).sum(),
            degenerate_samples: per_worker.iter().map(|w| w.degenerate_samples).sum(),
            improvements: score_history.len(),
            score_history,
            ..Default::default()
        };
        stats.stop_reason = if per_worker.iter().any(|w| w.goal_reached) {
            StopReason::GoalReached
        } else if per_worker.iter().any(|w| w.deadline_hit) {
            StopReason::Deadline
        } else {
            StopReason::IterationBudget
        };

        let Some(mut fit) = best else {
            stats.elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
            warn!(
                "RANSAC(parallel): no consensus after {} iterations on {workers} workers",
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
            "RANSAC(parallel): score={} of {} points, {} iterations on {workers} workers ({:.3} ms)",
            fit.score,
            points.len(),
            stats.iterations,
            stats.elapsed_ms
        );
        Ok((fit, stats))
    }
}
