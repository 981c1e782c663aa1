use super::curve::ParametricCurve2d;
use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// A cubic bezier curve
#[derive(Copy, Clone, Debug)]
pub struct CubicBezier2d {
    points: [Point2d; 4],
}

/// The six intermediate points of one De Casteljau pass at a fixed `t`:
/// pairwise lerps of the control polygon (`l01`, `l12`, `l23`), lerps of
/// those (`q0`, `q1`), and the curve point `b` itself.
///
/// `b` agrees numerically with [`CubicBezier2d::sample`] at the same `t`.
#[derive(Copy, Clone, Debug)]
pub struct CasteljauConstruction {
    pub l01: Point2d,
    pub l12: Point2d,
    pub l23: Point2d,
    pub q0: Point2d,
    pub q1: Point2d,
    pub b: Point2d,
}

impl CubicBezier2d {
    pub const fn new(points: &[Point2d; 4]) -> Self {
        Self { points: *points }
    }

    /// The four control points in order.
    pub fn points(&self) -> &[Point2d; 4] {
        &self.points
    }

    /// The first control point, which the curve interpolates at `t = 0`.
    pub fn start(&self) -> Point2d {
        self.points[0]
    }

    /// The last control point, which the curve interpolates at `t = 1`.
    pub fn end(&self) -> Point2d {
        self.points[3]
    }

    /// Runs one De Casteljau pass at `t` and returns all intermediate points.
    pub fn construction(&self, t: f64) -> CasteljauConstruction {
        let [p0, p1, p2, p3] = self.points.map(|p| p.to_vec());
        let l01 = p0.lerp(p1, t);
        let l12 = p1.lerp(p2, t);
        let l23 = p2.lerp(p3, t);
        let q0 = l01.lerp(l12, t);
        let q1 = l12.lerp(l23, t);
        let b = q0.lerp(q1, t);
        CasteljauConstruction {
            l01: Point2d::from_vec(l01),
            l12: Point2d::from_vec(l12),
            l23: Point2d::from_vec(l23),
            q0: Point2d::from_vec(q0),
            q1: Point2d::from_vec(q1),
            b: Point2d::from_vec(b),
        }
    }

    /// Subdivides the curve at `t` into two cubics that share the curve
    /// point there, via the same De Casteljau pass as [`Self::construction`].
    pub fn split(&self, t: f64) -> [CubicBezier2d; 2] {
        let c = self.construction(t);
        [
            CubicBezier2d::new(&[self.points[0], c.l01, c.q0, c.b]),
            CubicBezier2d::new(&[c.b, c.q1, c.l23, self.points[3]]),
        ]
    }

    /// Curvature magnitude `|x'y'' - y'x''| / (x'^2 + y'^2)^1.5`.
    ///
    /// The denominator carries a small epsilon so the result stays finite
    /// where the first derivative vanishes. Always non-negative.
    pub fn curvature(&self, t: f64) -> f64 {
        let d = self.sample_dt(t);
        let dd = self.sample_dt2(t);
        let num = (d.x * dd.y - d.y * dd.x).abs();
        let den = d.magnitude2().powf(1.5) + 1e-6;
        num / den
    }
}

impl ParametricCurve2d for CubicBezier2d {
    fn sample(&self, t: f64) -> Point2d {
        let t1 = 1.0 - t;
        Point2d::from_vec(
            t1 * t1 * t1 * self.points[0].to_vec()
                + 3.0 * t1 * t1 * t * self.points[1].to_vec()
                + 3.0 * t1 * t * t * self.points[2].to_vec()
                + t * t * t * self.points[3].to_vec(),
        )
    }

    fn bounds(&self) -> Interval<f64> {
        Interval { min: 0.0, max: 1.0 }
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        let t1 = 1.0 - t;
        (-3.0 * t1 * t1) * self.points[0].to_vec()
            + (9.0 * t * t - 12.0 * t + 3.0) * self.points[1].to_vec()
            + (-9.0 * t * t + 6.0 * t) * self.points[2].to_vec()
            + (3.0 * t * t) * self.points[3].to_vec()
    }

    fn sample_dt2(&self, t: f64) -> Vector2d {
        let t1 = 1.0 - t;
        6.0 * t1 * (self.points[0].to_vec() - 2.0 * self.points[1].to_vec() + self.points[2].to_vec())
            + 6.0 * t * (self.points[1].to_vec() - 2.0 * self.points[2].to_vec() + self.points[3].to_vec())
    }
}
