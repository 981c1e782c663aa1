//! The simulation facade: control points, rope and frame control.

use crate::math::{CasteljauConstruction, CubicBezier2d, ParametricCurve2d, Point2d, Vector2d};
use crate::rope::Rope;
use crate::sample::sample_curve;
use crate::spring::{DynamicPoint, SimulationParams};
use cgmath::prelude::*;
use log::debug;

/// Target length of one integration substep in seconds.
const FIXED_DT: f64 = 1.0 / 120.0;

/// Upper bound on substeps per frame, capping worst-case catch-up cost.
const MAX_SUBSTEPS: usize = 5;

/// Default positions of P0, P1, P2, P3 as fractions of the world extent.
const LAYOUT: [(f64, f64); 4] = [(0.15, 0.5), (0.35, 0.2), (0.65, 0.8), (0.85, 0.5)];

/// Offset splitting a single pointer's influence between the P1 and P2
/// targets: P1 seeks `pointer - offset`, P2 seeks `pointer + offset`.
const TARGET_SPREAD: (f64, f64) = (100.0, 60.0);

/// Identifies one of the four control points at the input boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlHandle {
    P0,
    P1,
    P2,
    P3,
}

/// An interactive cubic Bézier curve whose interior control points seek
/// their targets under spring-damper dynamics, with a rope of mass points
/// relaxing towards the curve.
///
/// The caller owns the frame loop: it feeds in targets, drags and
/// parameter changes, calls [`Self::step`] once per frame with the elapsed
/// delta, and reads the control points, rope and curve samples back out
/// for rendering.
pub struct Simulation {
    /// The fixed start anchor P0.
    p0: Point2d,
    /// The fixed end anchor P3.
    p3: Point2d,
    /// The spring-driven interior control point P1.
    p1: DynamicPoint,
    /// The spring-driven interior control point P2.
    p2: DynamicPoint,
    /// The rope chain relaxing towards the curve.
    rope: Rope,
    /// Parameters shared by the control points and the rope.
    params: SimulationParams,
    /// Number of rope nodes and of curve samples.
    sample_count: usize,
    /// While set, `step` leaves all state untouched.
    paused: bool,
    /// The current frame of simulation.
    frame: usize,
    /// World extent the reset layout is derived from.
    extent: Vector2d,
}

impl Simulation {
    /// Creates a simulation in the default layout for a world of the given
    /// extent, with `sample_count` rope nodes (`sample_count >= 2`).
    pub fn new(extent: Vector2d, sample_count: usize) -> Self {
        debug_assert!(sample_count >= 2);
        let points = layout(extent);
        let p1 = DynamicPoint::new(points[1]);
        let p2 = DynamicPoint::new(points[2]);
        let params = SimulationParams::default();
        let curve = CubicBezier2d::new(&points);
        let rope = Rope::new(&curve, sample_count, params.mass);
        Self {
            p0: points[0],
            p3: points[3],
            p1,
            p2,
            rope,
            params,
            sample_count,
            paused: false,
            frame: 0,
            extent,
        }
    }

    /// Restores the default layout, zeroes velocities, syncs targets to
    /// positions and rebuilds the rope at the current sample count.
    pub fn reset(&mut self) {
        let points = layout(self.extent);
        self.p0 = points[0];
        self.p3 = points[3];
        self.p1.reset(points[1]);
        self.p2.reset(points[2]);
        let curve = self.curve();
        self.rope.rebuild(&curve, self.sample_count, self.params.mass);
        debug!("simulation reset");
    }

    /// Advances the simulation by `dt` seconds, or does nothing while
    /// paused. Returns the number of substeps integrated.
    ///
    /// The delta is split into up to [`MAX_SUBSTEPS`] equal substeps near
    /// [`FIXED_DT`] long, so large or irregular frame deltas cannot
    /// destabilise the integrators. Each substep updates P1, then P2, then
    /// the rope against the freshly updated curve.
    ///
    /// Callers are expected to clamp `dt` to at most 0.05 s.
    pub fn step(&mut self, dt: f64) -> usize {
        debug_assert!(dt.is_finite() && dt >= 0.0);
        if self.paused {
            return 0;
        }
        let steps = substep_count(dt);
        let sub = dt / steps as f64;
        for _ in 0..steps {
            self.p1.step(sub, &self.params);
            self.p2.step(sub, &self.params);
            let curve = self.curve();
            self.rope.step(&curve, sub, &self.params);
        }
        self.frame += 1;
        steps
    }

    /// The live curve built from the current control points.
    pub fn curve(&self) -> CubicBezier2d {
        CubicBezier2d::new(&[self.p0, self.p1.position(), self.p2.position(), self.p3])
    }

    /// The four control points P0..P3 in order.
    pub fn control_points(&self) -> [Point2d; 4] {
        [self.p0, self.p1.position(), self.p2.position(), self.p3]
    }

    /// The curve sampled at the current sample count, for polyline drawing.
    pub fn curve_samples(&self) -> Vec<Point2d> {
        sample_curve(&self.curve(), self.sample_count)
    }

    /// The De Casteljau construction of the live curve at `t`, for the
    /// construction overlay.
    pub fn construction(&self, t: f64) -> CasteljauConstruction {
        let curve = self.curve();
        debug_assert!(curve.bounds().contains(t), "query t out of bounds");
        curve.construction(t)
    }

    pub fn p1(&self) -> &DynamicPoint {
        &self.p1
    }

    pub fn p2(&self) -> &DynamicPoint {
        &self.p2
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn params(&self) -> SimulationParams {
        self.params
    }

    /// Replaces the shared parameters. A mass change is rebroadcast to the
    /// rope nodes without rebuilding the rope.
    pub fn set_params(&mut self, params: SimulationParams) {
        debug_assert!(params.stiffness > 0.0 && params.damping >= 0.0 && params.mass > 0.0);
        if params.mass != self.params.mass {
            self.rope.set_mass(params.mass);
        }
        self.params = params;
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Changes the rope resolution, discarding all node state and
    /// reseeding the chain from the live curve.
    pub fn set_sample_count(&mut self, count: usize) {
        debug_assert!(count >= 2);
        self.sample_count = count;
        let curve = self.curve();
        self.rope.rebuild(&curve, count, self.params.mass);
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Pauses or resumes the physics update; rendering reads are
    /// unaffected and keep serving the last state.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Drives both dynamic targets from one pointer position, splitting
    /// its influence to either side of the pointer.
    pub fn drive_targets(&mut self, pointer: Point2d) {
        let spread = Vector2d::new(TARGET_SPREAD.0, TARGET_SPREAD.1);
        self.p1.set_target(pointer - spread);
        self.p2.set_target(pointer + spread);
    }

    /// Sets the seek target of a dynamic point. The anchors P0/P3 have no
    /// target, so those handles are ignored.
    pub fn set_target(&mut self, handle: ControlHandle, target: Point2d) {
        match handle {
            ControlHandle::P1 => self.p1.set_target(target),
            ControlHandle::P2 => self.p2.set_target(target),
            ControlHandle::P0 | ControlHandle::P3 => {}
        }
    }

    /// Moves a control point directly (a drag). Dynamic points bypass the
    /// integrator: position is overwritten, velocity keeps its last value.
    pub fn drag(&mut self, handle: ControlHandle, position: Point2d) {
        match handle {
            ControlHandle::P0 => self.p0 = position,
            ControlHandle::P1 => self.p1.drag_to(position),
            ControlHandle::P2 => self.p2.drag_to(position),
            ControlHandle::P3 => self.p3 = position,
        }
    }

    /// Finds the control point within `radius` of `point`, if any,
    /// checking the anchors before the dynamic points (P0, P3, P1, P2).
    pub fn hit_test(&self, point: Point2d, radius: f64) -> Option<ControlHandle> {
        [
            (ControlHandle::P0, self.p0),
            (ControlHandle::P3, self.p3),
            (ControlHandle::P1, self.p1.position()),
            (ControlHandle::P2, self.p2.position()),
        ]
        .into_iter()
        .find(|(_, p)| (point - *p).magnitude() < radius)
        .map(|(handle, _)| handle)
    }
}

/// Number of equal substeps a frame delta is integrated over:
/// `ceil(dt / FIXED_DT)` clamped to `1..=MAX_SUBSTEPS`.
fn substep_count(dt: f64) -> usize {
    ((dt / FIXED_DT).ceil() as usize).clamp(1, MAX_SUBSTEPS)
}

fn layout(extent: Vector2d) -> [Point2d; 4] {
    LAYOUT.map(|(fx, fy)| Point2d::new(fx * extent.x, fy * extent.y))
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn sim() -> Simulation {
        Simulation::new(Vector2d::new(1000.0, 600.0), 40)
    }

    #[test]
    fn substep_count_clamps_to_five() {
        assert_eq!(substep_count(0.0), 1);
        assert_eq!(substep_count(1.0 / 120.0), 1);
        assert_eq!(substep_count(0.02), 3);
        assert_eq!(substep_count(0.2), 5);
        assert_eq!(substep_count(10.0), 5);
    }

    #[test]
    fn oversized_delta_runs_five_substeps_of_a_fifth_each() {
        let mut sim = sim();
        let target = Point2d::new(900.0, 100.0);
        sim.set_target(ControlHandle::P1, target);

        // P1's evolution only depends on its own state, so an identical
        // free-standing point stepped five times with dt/5 must match.
        let mut twin = DynamicPoint::new(sim.control_points()[1]);
        twin.set_target(target);

        let steps = sim.step(0.2);
        assert_eq!(steps, 5);
        let sub = 0.2 / steps as f64;
        let params = sim.params();
        for _ in 0..steps {
            twin.step(sub, &params);
        }
        assert_approx_eq!(sim.control_points()[1].x, twin.position().x, 1e-12);
        assert_approx_eq!(sim.control_points()[1].y, twin.position().y, 1e-12);
    }

    #[test]
    fn reset_restores_the_layout_fractions() {
        let mut sim = sim();
        sim.drag(ControlHandle::P0, Point2d::new(1.0, 2.0));
        sim.drag(ControlHandle::P1, Point2d::new(3.0, 4.0));
        sim.drive_targets(Point2d::new(500.0, 300.0));
        sim.step(1.0 / 60.0);

        sim.reset();
        let [p0, p1, p2, p3] = sim.control_points();
        assert_eq!(p0, Point2d::new(150.0, 300.0));
        assert_eq!(p1, Point2d::new(350.0, 120.0));
        assert_eq!(p2, Point2d::new(650.0, 480.0));
        assert_eq!(p3, Point2d::new(850.0, 300.0));
        assert_eq!(sim.p1().target(), p1);
        assert_eq!(sim.p1().velocity(), Vector2d::zero());
        assert_eq!(sim.rope().len(), 40);
        assert_eq!(sim.rope().nodes()[0].position, p0);
        assert_eq!(sim.rope().nodes()[39].position, p3);
    }

    #[test]
    fn pause_skips_integration() {
        let mut sim = sim();
        sim.drive_targets(Point2d::new(500.0, 300.0));
        sim.set_paused(true);
        let before = sim.control_points();
        let frame = sim.frame();
        assert_eq!(sim.step(1.0 / 60.0), 0);
        assert_eq!(sim.control_points(), before);
        assert_eq!(sim.frame(), frame);

        sim.set_paused(false);
        assert!(sim.step(1.0 / 60.0) > 0);
        assert_eq!(sim.frame(), frame + 1);
    }

    #[test]
    fn sample_count_change_rebuilds_the_rope() {
        let mut sim = sim();
        sim.step(1.0 / 60.0);
        sim.set_sample_count(12);
        assert_eq!(sim.sample_count(), 12);
        assert_eq!(sim.rope().len(), 12);
        let curve = sim.curve();
        assert_eq!(sim.rope().nodes()[0].position, curve.start());
        assert_eq!(sim.rope().nodes()[11].position, curve.end());
    }

    #[test]
    fn mass_change_rebroadcasts_without_rebuilding() {
        let mut sim = sim();
        sim.drive_targets(Point2d::new(500.0, 50.0));
        sim.step(1.0 / 60.0);
        let positions: Vec<_> = sim.rope().positions().collect();

        let mut params = sim.params();
        params.mass = 4.0;
        sim.set_params(params);
        assert!(sim.rope().nodes().iter().all(|n| n.mass == 4.0));
        assert_eq!(sim.rope().positions().collect::<Vec<_>>(), positions);
    }

    #[test]
    fn hit_test_prefers_anchors() {
        let mut sim = sim();
        // Put P1 right on top of P0: the anchor must win.
        sim.drag(ControlHandle::P1, sim.control_points()[0]);
        let p0 = sim.control_points()[0];
        assert_eq!(sim.hit_test(p0, 14.0), Some(ControlHandle::P0));
        assert_eq!(sim.hit_test(Point2d::new(-500.0, -500.0), 14.0), None);
    }
}
