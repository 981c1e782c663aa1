//! Curve sampling for the rendering boundary.

use crate::math::{normalize_or_zero, CubicBezier2d, ParametricCurve2d, Point2d, Vector2d};
use itertools::Itertools;

/// Samples `count` points along the curve at evenly spaced parameters
/// (`count >= 2`), for polyline drawing and the rope guide.
pub fn sample_curve(curve: &CubicBezier2d, count: usize) -> Vec<Point2d> {
    debug_assert!(count >= 2);
    let bounds = curve.bounds();
    (0..count)
        .map(|i| curve.sample(bounds.lerp(i as f64 / (count - 1) as f64)))
        .collect()
}

/// Polyline segments paired with the curvature at each segment's start
/// parameter, ready for colour mapping.
pub fn curvature_segments(curve: &CubicBezier2d, count: usize) -> Vec<(Point2d, Point2d, f64)> {
    debug_assert!(count >= 2);
    let n = (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f64 / n;
            (curve.sample(t), t)
        })
        .tuple_windows()
        .map(|((a, t), (b, _))| (a, b, curve.curvature(t)))
        .collect()
}

/// Unit tangents at every `stride`-th of `count` parametric samples.
/// Where the first derivative vanishes the direction is the zero vector
/// rather than NaN.
pub fn tangent_field(curve: &CubicBezier2d, count: usize, stride: usize) -> Vec<(Point2d, Vector2d)> {
    debug_assert!(count >= 2 && stride >= 1);
    let n = (count - 1) as f64;
    (0..count)
        .step_by(stride)
        .map(|i| {
            let t = i as f64 / n;
            (curve.sample(t), normalize_or_zero(curve.sample_dt(t)))
        })
        .collect()
}
