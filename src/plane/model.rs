use crate::error::RansacError;
use crate::geometry::collinear;
use crate::types::Point3;
use nalgebra::{Vector3, Vector4};
use serde::Serialize;

/// Normal magnitude below which a coefficient vector is not a plane.
pub const NORMAL_EPS: f64 = 1e-9;

/// Plane `a·x + b·y + c·z + d = 0` with a non-zero normal `(a, b, c)`.
///
/// Coefficients are not normalized unless [`PlaneModel::normalized`] is used,
/// so [`PlaneModel::residual`] is an algebraic distance proxy whose scale
/// depends on how the model was produced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaneModel {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl PlaneModel {
    /// Build a model, rejecting non-finite coefficients and near-zero normals.
    pub fn try_new(a: f64, b: f64, c: f64, d: f64) -> Result<Self, RansacError> {
        if ![a, b, c, d].iter().all(|v| v.is_finite()) {
            return Err(RansacError::Degenerate);
        }
        if (a * a + b * b + c * c).sqrt() < NORMAL_EPS {
            return Err(RansacError::Degenerate);
        }
        Ok(Self { a, b, c, d })
    }

    pub fn from_vector(v: &Vector4<f64>) -> Result<Self, RansacError> {
        Self::try_new(v[0], v[1], v[2], v[3])
    }

    /// Plane through three points; `Degenerate` if they are collinear.
    ///
    /// The returned normal has unit length, so tiny but well-shaped triangles
    /// are not rejected by the normal-magnitude guard.
    pub fn through_points(p1: &Point3, p2: &Point3, p3: &Point3) -> Result<Self, RansacError> {
        if collinear(p1, p2, p3) {
            return Err(RansacError::Degenerate);
        }
        let n = (p2 - p1).cross(&(p3 - p1)).normalize();
        let d = -n.dot(&p1.coords);
        Self::try_new(n[0], n[1], n[2], d)
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn normal(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Signed algebraic residual `a·x + b·y + c·z + d` (unnormalized).
    #[inline]
    pub fn residual(&self, p: &Point3) -> f64 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    /// Euclidean point-to-plane distance.
    pub fn distance(&self, p: &Point3) -> f64 {
        self.residual(p).abs() / self.normal().norm()
    }

    /// Rescale to a unit normal whose first non-negligible component is
    /// positive, so equal planes compare equal regardless of input scale.
    pub fn normalized(&self) -> Self {
        let norm = self.normal().norm();
        let lead = [self.a, self.b, self.c]
            .into_iter()
            .find(|v| v.abs() > NORMAL_EPS * norm)
            .unwrap_or(1.0);
        let s = lead.signum() / norm;
        Self {
            a: self.a * s,
            b: self.b * s,
            c: self.c * s,
            d: self.d * s,
        }
    }

    /// Tab-separated coefficients with six decimals, as written to output files.
    pub fn to_tab_separated(&self) -> String {
        format!(
            "{:.6}\t{:.6}\t{:.6}\t{:.6}",
            self.a, self.b, self.c, self.d
        )
    }
}

impl std::fmt::Display for PlaneModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:+.6}x {:+.6}y {:+.6}z {:+.6} = 0",
            self.a, self.b, self.c, self.d
        )
    }
}
