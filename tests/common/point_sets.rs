use plane_ransac::types::points_from_rows;
use plane_ransac::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Three points on the z = 0 plane.
pub fn triangle_on_z0() -> Vec<Point3> {
    points_from_rows(&[[20.0, 0.0, 0.0], [10.0, -10.0, 0.0], [10.0, 10.0, 0.0]])
}

/// Three points on z = 0.1·x + 1.
pub fn tilted_triangle() -> Vec<Point3> {
    points_from_rows(&[[20.0, 0.0, 3.0], [10.0, -10.0, 2.0], [10.0, 10.0, 2.0]])
}

/// Eight points on z = 0.01·x followed by two gross outliers (indices 8, 9).
pub fn shallow_plane_with_outliers() -> Vec<Point3> {
    points_from_rows(&[
        [20.0, -10.0, 0.2],
        [20.0, 0.0, 0.2],
        [20.0, 10.0, 0.2],
        [15.0, -10.0, 0.15],
        [15.0, 0.0, 0.15],
        [15.0, 10.0, 0.15],
        [10.0, -10.0, 0.1],
        [10.0, 10.0, 0.1],
        [20.0, 18.0, 1.7],
        [15.0, -15.0, 1.2],
    ])
}

/// Exactly coplanar grid on z = 0.5·x − 0.25·y + 2 (all values exact in f64).
pub fn coplanar_grid(nx: usize, ny: usize) -> Vec<Point3> {
    let mut pts = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let x = i as f64;
            let y = j as f64;
            pts.push(Point3::new(x, y, 0.5 * x - 0.25 * y + 2.0));
        }
    }
    pts
}

/// Points on one line; every 3-sample is degenerate.
pub fn collinear_points(n: usize) -> Vec<Point3> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            Point3::new(t, 2.0 * t, 3.0 * t)
        })
        .collect()
}

/// `inliers` points near z = 0.3·x − 0.2·y + 1 over [0, 10]² with uniform
/// vertical noise of ±`noise`, followed by `outliers` points uniform in
/// [0, 10]² × [−20, 20].
pub fn noisy_plane(inliers: usize, outliers: usize, noise: f64, seed: u64) -> Vec<Point3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pts = Vec::with_capacity(inliers + outliers);
    for _ in 0..inliers {
        let x: f64 = rng.random_range(0.0..10.0);
        let y: f64 = rng.random_range(0.0..10.0);
        let e: f64 = rng.random_range(-noise..noise);
        pts.push(Point3::new(x, y, 0.3 * x - 0.2 * y + 1.0 + e));
    }
    for _ in 0..outliers {
        pts.push(Point3::new(
            rng.random_range(0.0..10.0),
            rng.random_range(0.0..10.0),
            rng.random_range(-20.0..20.0),
        ));
    }
    pts
}

/// Unit normal of z = 0.3·x − 0.2·y + 1.
pub fn noisy_plane_normal() -> nalgebra::Vector3<f64> {
    nalgebra::Vector3::new(0.3, -0.2, -1.0).normalize()
}

/// Non-collinear scattered points with no exact structure.
pub fn scattered(n: usize, seed: u64) -> Vec<Point3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point3::new(
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
            )
        })
        .collect()
}
