use plane_ransac::config::{load_config, FitToolConfig, OutputConfig};
use plane_ransac::io::{read_point_file, write_json_file, write_model_file};
use plane_ransac::ransac::{FitResult, RansacEngine, RunConfig, RunStats};
use plane_ransac::{PlaneEstimator, PlaneModel};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.as_slice() {
        [flag, path] if flag == "--config" => load_config(Path::new(path))?,
        [input] => plain_config(input, None),
        [input, output] => plain_config(input, Some(output)),
        _ => return Err(usage()),
    };

    let file = read_point_file(&config.input)?;
    let mut run_cfg = config.run.clone();
    if config.threshold_from_input {
        run_cfg.threshold = file.threshold;
    }
    let estimator = if config.normalize {
        PlaneEstimator::normalized()
    } else {
        PlaneEstimator::new()
    };
    let engine = RansacEngine::new(run_cfg);
    let (fit, stats) = if config.parallel {
        engine.run_parallel(&file.points, &estimator, &estimator)
    } else {
        engine.run_with_stats(&file.points, &estimator, &estimator)
    }
    .map_err(|e| format!("Plane fit failed: {e}"))?;

    println!("{}", fit.model.to_tab_separated());
    println!(
        "{}: {} of {} points are inliers ({} iterations, {:?})",
        fit.model,
        fit.score,
        file.points.len(),
        stats.iterations,
        stats.stop_reason
    );

    if let Some(path) = &config.output.model_txt {
        write_model_file(path, &fit.model)?;
        println!("Saved model to {}", path.display());
    }
    if let Some(path) = &config.output.report_json {
        let report = FitReport::new(&fit, &stats, file.points.len(), engine.config());
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

/// Positional mode: threshold from the point-file header, adaptive
/// termination at 99% confidence.
fn plain_config(input: &str, output: Option<&String>) -> FitToolConfig {
    FitToolConfig {
        input: PathBuf::from(input),
        output: OutputConfig {
            model_txt: output.map(PathBuf::from),
            report_json: None,
        },
        run: RunConfig {
            confidence: Some(0.99),
            ..Default::default()
        },
        threshold_from_input: true,
        normalize: false,
        parallel: false,
    }
}

fn usage() -> String {
    "Usage: plane_fit <points.txt> [model.txt] | plane_fit --config <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FitReport<'a> {
    point_count: usize,
    config: &'a RunConfig,
    model: PlaneModel,
    unit_normal_model: PlaneModel,
    score: usize,
    inlier_rms: f64,
    inliers: &'a [usize],
    stats: &'a RunStats,
}

impl<'a> FitReport<'a> {
    fn new(
        fit: &'a FitResult<PlaneModel>,
        stats: &'a RunStats,
        point_count: usize,
        config: &'a RunConfig,
    ) -> Self {
        Self {
            point_count,
            config,
            model: fit.model,
            unit_normal_model: fit.model.normalized(),
            score: fit.score,
            inlier_rms: fit.inlier_rms,
            inliers: &fit.inliers,
            stats,
        }
    }
}
