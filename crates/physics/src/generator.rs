use crate::Galaxy;
use cgmath::Vector3;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Samples a disk galaxy of `star_count` stars around `center`.
///
/// Radii are biased towards the center and the disk thickness follows a damped
/// `sin(a)/a` profile, so it pinches at a few radii. Every star starts on a
/// circular orbit in the xy-plane; `invert_rotation` flips its direction.
pub fn generate<R: Rng + ?Sized>(
    center: Vector3<f32>,
    star_count: usize,
    invert_rotation: bool,
    color: [f32; 4],
    rng: &mut R,
) -> Galaxy {
    let unit = Uniform::new(0.0f32, 1.0);
    let angle = Uniform::new(0.0f32, TAU);
    let direction = if invert_rotation { 1.0 } else { -1.0 };

    let mut positions = Vec::with_capacity(star_count);
    let mut velocities = Vec::with_capacity(star_count);
    for _ in 0..star_count {
        let mass = (1.0 + unit.sample(rng)) / 2.0;

        let w = angle.sample(rng);
        let r = 0.01 + unit.sample(rng).powi(2);
        let a = 4.0 * PI * r;
        let h = unit.sample(rng) * (0.01 + 0.2 * a.sin() / a);
        let side = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        let pos = center + Vector3::new(r * w.cos(), r * w.sin(), h * side);

        let actual_radius = (r * r + h * h).sqrt();
        let speed = direction * (mass / actual_radius).sqrt();
        let vel = speed * Vector3::new((w - FRAC_PI_2).cos(), (w - FRAC_PI_2).sin(), 0.0);

        positions.push([pos.x, pos.y, pos.z, mass]);
        velocities.push(vel.into());
    }
    log::debug!(
        "Generated {} stars around ({}, {}, {})",
        star_count,
        center.x,
        center.y,
        center.z
    );
    // Sampled masses lie in [0.5, 1.0).
    Galaxy {
        center,
        positions,
        velocities,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    const COLOR: [f32; 4] = [1.0, 0.5, 1.0, 1.0];

    fn sample(invert_rotation: bool, seed: u64) -> Galaxy {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(
            Vector3::new(-1.0, 0.0, -0.5),
            2_000,
            invert_rotation,
            COLOR,
            &mut rng,
        )
    }

    #[test]
    fn masses_stay_in_range() {
        let galaxy = sample(false, 1);
        assert_eq!(galaxy.star_count(), 2_000);
        for star in 0..galaxy.star_count() {
            let m = galaxy.mass(star);
            assert!((0.5..=1.0).contains(&m), "mass {} out of range", m);
        }
    }

    #[test]
    fn speed_matches_distance_from_center() {
        let galaxy = sample(true, 2);
        for star in 0..galaxy.star_count() {
            let distance = (galaxy.position(star) - galaxy.center()).magnitude();
            // Circular orbit: |v|^2 = m / r
            let implied = galaxy.mass(star) / galaxy.velocity(star).magnitude2();
            assert!(
                (distance - implied).abs() <= 1e-4 * implied.max(1.0),
                "star {}: distance {} vs implied radius {}",
                star,
                distance,
                implied
            );
        }
    }

    #[test]
    fn stars_form_a_thin_disk() {
        let galaxy = sample(false, 3);
        let center = galaxy.center();
        for star in 0..galaxy.star_count() {
            let offset = galaxy.position(star) - center;
            let planar = (offset.x * offset.x + offset.y * offset.y).sqrt();
            assert!(planar >= 0.01 - 1e-5 && planar <= 1.01 + 1e-5);
            assert!(offset.z.abs() <= 0.21 + 1e-5);
            assert_eq!(galaxy.velocity(star).z, 0.0);
            // Velocity is tangential.
            let radial = Vector3::new(offset.x, offset.y, 0.0);
            assert!(radial.dot(galaxy.velocity(star)).abs() <= 1e-3);
        }
    }

    #[test]
    fn inverted_rotation_negates_velocities() {
        let clockwise = sample(false, 4);
        let counter = sample(true, 4);
        assert_eq!(clockwise.positions(), counter.positions());
        for (a, b) in clockwise.velocities().iter().zip(counter.velocities()) {
            for axis in 0..3 {
                assert_eq!(a[axis], -b[axis]);
            }
        }
    }

    #[test]
    fn zero_stars_gives_empty_galaxy() {
        let mut rng = StdRng::seed_from_u64(5);
        let galaxy = generate(Vector3::new(1.0, 0.0, 0.5), 0, true, COLOR, &mut rng);
        assert!(galaxy.is_empty());
        assert_eq!(galaxy.center(), Vector3::new(1.0, 0.0, 0.5));
    }
}
