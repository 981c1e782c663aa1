use super::Vector2d;
use cgmath::prelude::*;

/// Normalises a vector, mapping the zero vector to itself rather than
/// producing NaNs (the divisor falls back to 1 at zero length).
pub fn normalize_or_zero(v: Vector2d) -> Vector2d {
    let mag = v.magnitude();
    if mag > 0.0 {
        v / mag
    } else {
        v
    }
}
