use crate::simulation::Simulation;
use serde_json::json;

impl Simulation {
    /// Gets a JSON snapshot of the full simulation state for an external
    /// inspector: control points, parameters, rope nodes and frame index.
    pub fn debug_frame(&self) -> serde_json::Value {
        let points = self
            .control_points()
            .map(|p| json!([p.x, p.y]));
        let rope = self
            .rope()
            .nodes()
            .iter()
            .map(|node| {
                json!({
                    "position": [node.position.x, node.position.y],
                    "velocity": [node.velocity.x, node.velocity.y],
                    "mass": node.mass,
                })
            })
            .collect::<Vec<_>>();
        json!({
            "frame": self.frame(),
            "paused": self.paused(),
            "params": self.params(),
            "points": points,
            "rope": rope,
        })
    }
}
