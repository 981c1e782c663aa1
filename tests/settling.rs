//! Tests that drive a full simulation to rest.

use bezier_rope::cgmath::prelude::*;
use bezier_rope::math::{ParametricCurve2d, Point2d, Vector2d};
use bezier_rope::{ControlHandle, Simulation};

fn world() -> Simulation {
    Simulation::new(Vector2d::new(1200.0, 700.0), 48)
}

/// Driving the targets and stepping long enough pins both dynamic points
/// exactly onto their targets and leaves the rope resting on the curve.
#[test]
fn simulation_settles_onto_the_curve() {
    let mut sim = world();
    sim.drive_targets(Point2d::new(600.0, 350.0));

    for _ in 0..1200 {
        sim.step(1.0 / 60.0);
    }

    // Rest-snap makes the settled control points exact.
    assert_eq!(sim.p1().position(), sim.p1().target());
    assert_eq!(sim.p2().position(), sim.p2().target());
    assert_eq!(sim.p1().velocity(), Vector2d::zero());

    // Rope endpoints are hard anchors; interior nodes hover on the curve.
    let curve = sim.curve();
    let nodes = sim.rope().nodes();
    assert_eq!(nodes[0].position, curve.start());
    assert_eq!(nodes[nodes.len() - 1].position, curve.end());
    let last = (nodes.len() - 1) as f64;
    for (i, node) in nodes.iter().enumerate() {
        let guide = curve.sample(i as f64 / last);
        assert!((node.position - guide).magnitude() < 1.0);
    }
}

/// Rope endpoints follow the anchors immediately, even mid-transient.
#[test]
fn rope_endpoints_track_dragged_anchors() {
    let mut sim = world();
    sim.drive_targets(Point2d::new(200.0, 100.0));
    sim.step(1.0 / 60.0);

    sim.drag(ControlHandle::P0, Point2d::new(50.0, 650.0));
    sim.drag(ControlHandle::P3, Point2d::new(1150.0, 20.0));
    sim.step(1.0 / 60.0);

    let [p0, _, _, p3] = sim.control_points();
    assert_eq!(p0, Point2d::new(50.0, 650.0));
    assert_eq!(p3, Point2d::new(1150.0, 20.0));
    let nodes = sim.rope().nodes();
    assert_eq!(nodes[0].position, p0);
    assert_eq!(nodes[nodes.len() - 1].position, p3);
}

/// The curve samples handed to the renderer stay consistent with the
/// control points while the simulation is in motion.
#[test]
fn curve_samples_match_the_live_curve() {
    let mut sim = world();
    sim.drive_targets(Point2d::new(900.0, 600.0));
    for _ in 0..10 {
        sim.step(1.0 / 60.0);
    }

    let samples = sim.curve_samples();
    assert_eq!(samples.len(), sim.sample_count());
    let [p0, _, _, p3] = sim.control_points();
    assert_eq!(samples[0], p0);
    assert_eq!(samples[samples.len() - 1], p3);
}
