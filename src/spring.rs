//! Spring-damper dynamics for the interior control points.

use crate::math::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Distance to the target under which a slow point is pinned onto it.
const REST_DISTANCE: f64 = 0.6;

/// Speed under which a near-target point is pinned onto it.
const REST_SPEED: f64 = 0.08;

/// Spring, damping and mass parameters shared by every simulated point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParams {
    /// Spring stiffness `k`; must be positive.
    pub stiffness: f64,
    /// Linear damping `d`; must be non-negative.
    pub damping: f64,
    /// Mass `m` of each simulated point; must be positive.
    pub mass: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            stiffness: 120.0,
            damping: 6.0,
            mass: 1.0,
        }
    }
}

/// A point that seeks its target under spring-damper dynamics.
#[derive(Copy, Clone, Debug)]
pub struct DynamicPoint {
    position: Point2d,
    velocity: Vector2d,
    target: Point2d,
}

impl DynamicPoint {
    /// Creates a point at rest with its target on top of it.
    pub fn new(position: Point2d) -> Self {
        Self {
            position,
            velocity: Vector2d::zero(),
            target: position,
        }
    }

    pub fn position(&self) -> Point2d {
        self.position
    }

    pub fn velocity(&self) -> Vector2d {
        self.velocity
    }

    pub fn target(&self) -> Point2d {
        self.target
    }

    /// Sets the position the point accelerates towards.
    pub fn set_target(&mut self, target: Point2d) {
        self.target = target;
    }

    /// Moves the point directly, bypassing the integrator.
    ///
    /// The target is not auto-tracked and the velocity keeps its last
    /// computed value; only [`Self::reset`] zeroes it.
    pub fn drag_to(&mut self, position: Point2d) {
        self.position = position;
    }

    /// Repositions the point, zeroes its velocity and syncs the target.
    pub fn reset(&mut self, position: Point2d) {
        self.position = position;
        self.velocity = Vector2d::zero();
        self.target = position;
    }

    /// Advances the point by `dt` seconds.
    ///
    /// Applies `a = (k/m)(target - position) - (d/m)v` and integrates with
    /// semi-implicit Euler: the velocity is updated before the position.
    /// A point within [`REST_DISTANCE`] of its target moving slower than
    /// [`REST_SPEED`] is pinned exactly onto the target, which stops
    /// sub-pixel oscillation that the damping alone never quite kills.
    pub fn step(&mut self, dt: f64, params: &SimulationParams) {
        debug_assert!(params.mass > 0.0, "mass must be positive");
        let accel = (params.stiffness / params.mass) * (self.target - self.position)
            - (params.damping / params.mass) * self.velocity;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
        if (self.position - self.target).magnitude() < REST_DISTANCE
            && self.velocity.magnitude() < REST_SPEED
        {
            self.position = self.target;
            self.velocity = Vector2d::zero();
        }
    }
}
