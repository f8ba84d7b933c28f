/// A single input sample. Coordinates are read once and never mutated.
pub type Point3 = nalgebra::Point3<f64>;

/// Convert `[x, y, z]` rows into points, preserving order.
pub fn points_from_rows(rows: &[[f64; 3]]) -> Vec<Point3> {
    rows.iter().map(|r| Point3::new(r[0], r[1], r[2])).collect()
}
