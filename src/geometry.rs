//! Small linear-algebra helpers shared by the plane estimator.
//!
//! - `augment`: stack points as rows `[x y z 1]` of an n×4 matrix.
//! - `null_space_direction`: right-singular vector of the smallest singular
//!   value, i.e. the total-least-squares solution of `A·v ≈ 0`.
//! - `collinear`: cheap degeneracy test for three-point samples.

use crate::types::Point3;
use nalgebra::{DMatrix, Vector4};

/// Squared sine of the angle at `p1` below which three points count as
/// collinear. Relative to the edge lengths, so the test does not depend on
/// the scale of the coordinates.
pub const COLLINEAR_EPS: f64 = 1e-12;

/// Build the homogeneous coordinate matrix (n×4) with a trailing column of ones.
pub fn augment(points: &[Point3]) -> DMatrix<f64> {
    DMatrix::from_fn(points.len(), 4, |r, c| match c {
        3 => 1.0,
        _ => points[r][c],
    })
}

/// Right-singular vector associated with the smallest singular value.
///
/// Systems with fewer than four rows are padded with zero rows so the full
/// 4-dimensional right-singular basis is available; the padded directions
/// carry zero singular values and span the null space of the input rows.
/// Returns `None` for an empty or non-finite input or if the decomposition
/// fails to produce `Vᵀ`.
pub fn null_space_direction(m: &DMatrix<f64>) -> Option<Vector4<f64>> {
    if m.nrows() == 0 || m.ncols() != 4 || m.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let padded = if m.nrows() < 4 {
        m.clone().resize_vertically(4, 0.0)
    } else {
        m.clone()
    };
    let svd = padded.svd(false, true);
    let v_t = svd.v_t?;
    let (idx, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    let row = v_t.row(idx);
    Some(Vector4::new(row[0], row[1], row[2], row[3]))
}

/// True if `p1`, `p2`, `p3` lie (numerically) on one line.
///
/// Compares `|u×v|²` against `|u|²·|v|²` with `u = p2-p1`, `v = p3-p1`.
/// Coincident points have a zero edge and always count as collinear.
pub fn collinear(p1: &Point3, p2: &Point3, p3: &Point3) -> bool {
    let u = p2 - p1;
    let v = p3 - p1;
    u.cross(&v).norm_squared() <= COLLINEAR_EPS * u.norm_squared() * v.norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn augment_appends_ones() {
        let pts = [Point3::new(1.0, 2.0, 3.0), Point3::new(-4.0, 5.0, 6.5)];
        let m = augment(&pts);
        assert_eq!(m.shape(), (2, 4));
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 2)], 6.5);
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 1.0);
    }

    #[test]
    fn null_space_of_z_plane_is_z_axis() {
        let pts = [
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(10.0, -10.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
        ];
        let v = null_space_direction(&augment(&pts)).expect("svd");
        assert_relative_eq!(v[2].abs(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(v[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(v[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(v[3], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn null_space_rejects_empty_and_nan() {
        assert!(null_space_direction(&DMatrix::zeros(0, 4)).is_none());
        let pts = [Point3::new(f64::NAN, 0.0, 0.0)];
        assert!(null_space_direction(&augment(&pts)).is_none());
    }

    #[test]
    fn collinear_detects_lines() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 1.0, 1.0);
        assert!(collinear(&a, &b, &Point3::new(2.0, 2.0, 2.0)));
        assert!(!collinear(&a, &b, &Point3::new(1.0, 0.0, 0.0)));
        assert!(collinear(&a, &a, &b));
    }

    #[test]
    fn collinear_is_scale_invariant() {
        for scale in [1e-4, 1e-2, 1.0, 1e3] {
            let p1 = Point3::new(0.02 * scale, 0.0, 0.0);
            let p2 = Point3::new(0.01 * scale, -0.01 * scale, 0.0);
            let p3 = Point3::new(0.01 * scale, 0.01 * scale, 0.0);
            assert!(!collinear(&p1, &p2, &p3), "scale {scale}");

            let q3 = Point3::new(0.03 * scale, 0.01 * scale, 0.0);
            assert!(collinear(&p1, &p2, &q3), "scale {scale}");
        }
    }
}
