use cgmath::{prelude::*, Vector3};

/// Pull of a galaxy's point-mass well on a star.
///
/// The star's own mass scales a unit-strength field: `a = -r * m / |r|^3`.
/// Nothing is softened, so a star sitting on `center` gets a non-finite result.
#[inline]
pub fn acceleration(position: Vector3<f32>, mass: f32, center: Vector3<f32>) -> Vector3<f32> {
    let rel_pos = position - center;
    let distance = rel_pos.magnitude();
    let distance_cubed = distance * distance * distance;
    -rel_pos * mass / distance_cubed
}
