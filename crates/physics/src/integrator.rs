use crate::{force::acceleration, Galaxy};
use cgmath::Vector3;
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

/// Advances every star of `galaxy` by `dt` with semi-implicit Euler.
///
/// Each star is pulled by its own galaxy's center and by `other`'s center, the
/// latter scaled by `cross_weight`. Velocity is updated first and the new
/// velocity moves the star. Only `galaxy` is written; masses are left alone.
pub fn integrate(galaxy: &mut Galaxy, other: &Galaxy, dt: f32, cross_weight: f32) {
    let home = galaxy.center;
    let away = other.center;
    galaxy
        .positions
        .par_iter_mut()
        .zip(galaxy.velocities.par_iter_mut())
        .for_each(|(pos, vel)| {
            let [x, y, z, mass] = *pos;
            let p = Vector3::new(x, y, z);
            let accel = acceleration(p, mass, home) + cross_weight * acceleration(p, mass, away);
            let v = Vector3::from(*vel) + accel * dt;
            let p = p + v * dt;
            *pos = [p.x, p.y, p.z, mass];
            *vel = v.into();
        });
}
