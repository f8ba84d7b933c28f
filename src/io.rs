//! Point-file and report I/O.
//!
//! - `parse_point_file` / `read_point_file`: plain-text point sets. Line 1 is
//!   the inlier threshold, line 2 the point count, then one `x y z` row per
//!   line (tab or space separated, `.` as decimal separator).
//! - `write_model_file`: one tab-separated `a b c d` line, six decimals.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::plane::PlaneModel;
use crate::types::Point3;
use log::warn;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Parsed point file.
#[derive(Clone, Debug, PartialEq)]
pub struct PointFile {
    pub threshold: f64,
    /// Count from the header; informational only.
    pub declared_count: Option<usize>,
    pub points: Vec<Point3>,
}

/// Malformed line in a point file (1-based line number).
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

pub fn parse_point_file(text: &str) -> Result<PointFile, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, raw) = lines.next().ok_or(ParseError {
        line: 1,
        message: "missing threshold header".to_string(),
    })?;
    let threshold = raw.parse::<f64>().map_err(|e| ParseError {
        line,
        message: format!("invalid threshold '{raw}': {e}"),
    })?;

    let declared_count = match lines.next() {
        Some((_, raw)) => raw.parse::<usize>().ok(),
        None => None,
    };

    let mut points = Vec::new();
    for (line, raw) in lines {
        points.push(parse_point(raw).map_err(|message| ParseError { line, message })?);
    }

    if let Some(n) = declared_count {
        if n != points.len() {
            warn!(
                "point file declares {n} points but contains {}",
                points.len()
            );
        }
    }
    Ok(PointFile {
        threshold,
        declared_count,
        points,
    })
}

fn parse_point(raw: &str) -> Result<Point3, String> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(format!("expected 3 coordinates, found {}", fields.len()));
    }
    let mut xyz = [0.0f64; 3];
    for (slot, field) in xyz.iter_mut().zip(&fields) {
        *slot = field
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{field}': {e}"))?;
    }
    Ok(Point3::new(xyz[0], xyz[1], xyz[2]))
}

pub fn read_point_file(path: &Path) -> Result<PointFile, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_point_file(&text).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Write the model as a single tab-separated line.
pub fn write_model_file(path: &Path, model: &PlaneModel) -> Result<(), String> {
    ensure_parent_dir(path)?;
    fs::write(path, model.to_tab_separated())
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
