pub use cgmath;
pub use rope::{Rope, RopeNode};
pub use sample::{curvature_segments, sample_curve, tangent_field};
pub use simulation::{ControlHandle, Simulation};
pub use spring::{DynamicPoint, SimulationParams};
pub use util::Interval;

#[cfg(feature = "debug")]
mod debug;
pub mod math;
mod rope;
mod sample;
mod simulation;
mod spring;
mod util;
