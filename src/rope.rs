//! A chain of mass points that relaxes towards the live curve each step.

use crate::math::{CubicBezier2d, ParametricCurve2d, Point2d, Vector2d};
use crate::spring::SimulationParams;
use cgmath::prelude::*;
use log::debug;

/// Guards the division by mass against pathological near-zero masses.
const MASS_EPSILON: f64 = 1e-6;

/// Speed under which an interior node's velocity is zeroed.
///
/// The position is deliberately left alone, unlike the dynamic points'
/// rest-snap: a rope node has no fixed target to pin onto.
const REST_SPEED: f64 = 0.06;

/// A single mass point of the rope.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RopeNode {
    pub position: Point2d,
    pub velocity: Vector2d,
    pub mass: f64,
}

/// An ordered chain of mass points anchored at the curve's endpoints.
pub struct Rope {
    nodes: Vec<RopeNode>,
}

impl Rope {
    /// Creates a rope of `count` nodes seeded along `curve`.
    ///
    /// `count` must be at least 2; enforcing that is the caller's contract.
    pub fn new(curve: &CubicBezier2d, count: usize, mass: f64) -> Self {
        let mut rope = Self { nodes: Vec::new() };
        rope.rebuild(curve, count, mass);
        rope
    }

    /// Discards all node state and reseeds `count` nodes along `curve`,
    /// at rest on the evenly spaced parametric samples.
    pub fn rebuild(&mut self, curve: &CubicBezier2d, count: usize, mass: f64) {
        debug_assert!(count >= 2, "a rope needs at least two nodes");
        self.nodes = (0..count)
            .map(|i| RopeNode {
                position: curve.sample(i as f64 / (count - 1) as f64),
                velocity: Vector2d::zero(),
                mass,
            })
            .collect();
        debug!("rope rebuilt with {} nodes", count);
    }

    /// Rebroadcasts a new mass to every node, leaving positions and
    /// velocities untouched.
    pub fn set_mass(&mut self, mass: f64) {
        for node in &mut self.nodes {
            node.mass = mass;
        }
    }

    /// The number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The nodes in chain order.
    pub fn nodes(&self) -> &[RopeNode] {
        &self.nodes
    }

    /// The node positions in chain order, for polyline drawing.
    pub fn positions(&self) -> impl Iterator<Item = Point2d> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    /// Advances the rope by `dt` seconds against the current `curve`.
    ///
    /// The end nodes are forced onto the curve's end control points with
    /// zeroed velocity. Interior nodes are pulled half-strength towards
    /// their guide point on the curve, quarter-strength towards each
    /// neighbour, and damped linearly.
    ///
    /// Nodes are updated in ascending index order, in place: node `i` sees
    /// its left neighbour's position from this pass and its right
    /// neighbour's from the previous one. That single-pass order is part
    /// of the contract.
    pub fn step(&mut self, curve: &CubicBezier2d, dt: f64, params: &SimulationParams) {
        let last = self.nodes.len() - 1;
        self.nodes[0].position = curve.start();
        self.nodes[0].velocity = Vector2d::zero();
        self.nodes[last].position = curve.end();
        self.nodes[last].velocity = Vector2d::zero();

        for i in 1..last {
            let left = self.nodes[i - 1].position;
            let right = self.nodes[i + 1].position;
            let node = &mut self.nodes[i];
            let guide = curve.sample(i as f64 / last as f64);

            let force = params.stiffness * 0.5 * (guide - node.position)
                + params.stiffness * 0.25 * (left - node.position)
                + params.stiffness * 0.25 * (right - node.position)
                - params.damping * node.velocity;

            let accel = force / (node.mass + MASS_EPSILON);
            node.velocity += accel * dt;
            node.position += node.velocity * dt;
            if node.velocity.magnitude() < REST_SPEED {
                node.velocity = Vector2d::zero();
            }
        }
    }
}
