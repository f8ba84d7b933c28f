use crate::ransac::RunConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Tab-separated coefficients, one line.
    pub model_txt: Option<PathBuf>,
    /// Full JSON report (model, inliers, run statistics).
    pub report_json: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FitToolConfig {
    /// Point file (threshold header, count header, `x y z` rows).
    pub input: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub run: RunConfig,
    /// Use the threshold from the point-file header instead of `run.threshold`.
    #[serde(default)]
    pub threshold_from_input: bool,
    /// Rescale estimated planes to a unit normal before classification.
    #[serde(default)]
    pub normalize: bool,
    /// Spread iterations across `run.workers` rayon tasks.
    #[serde(default)]
    pub parallel: bool,
}

pub fn load_config(path: &Path) -> Result<FitToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let cfg: FitToolConfig = serde_json::from_str(r#"{ "input": "points.txt" }"#).unwrap();
        assert_eq!(cfg.input, PathBuf::from("points.txt"));
        assert!(cfg.output.model_txt.is_none());
        assert_eq!(cfg.run, RunConfig::default());
        assert!(!cfg.parallel);
    }

    #[test]
    fn nested_run_overrides() {
        let cfg: FitToolConfig = serde_json::from_str(
            r#"{
                "input": "a.txt",
                "output": { "report_json": "out/report.json" },
                "run": { "sample_size": 4, "max_iterations": 50, "seed": 3, "workers": 2 },
                "parallel": true
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.run.sample_size, 4);
        assert_eq!(cfg.run.max_iterations, 50);
        assert_eq!(cfg.run.seed, Some(3));
        assert_eq!(cfg.run.threshold, RunConfig::default().threshold);
        assert_eq!(
            cfg.output.report_json.as_deref(),
            Some(Path::new("out/report.json"))
        );
        assert!(cfg.parallel);
    }
}
