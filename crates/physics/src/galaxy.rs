use cgmath::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GalaxyError {
    #[error("{positions} position rows but {velocities} velocity rows")]
    LengthMismatch { positions: usize, velocities: usize },
    #[error("star {star} has non-positive mass {mass}")]
    NonPositiveMass { star: usize, mass: f32 },
}

/// One galaxy's stars, stored as parallel arrays so the position array can be
/// uploaded to a vertex buffer as is.
///
/// Row `i` of `positions` is `[x, y, z, mass]`, row `i` of `velocities` is
/// `[vx, vy, vz]`. The center is a static gravity well and never moves.
#[derive(Debug, Clone)]
pub struct Galaxy {
    pub(crate) center: Vector3<f32>,
    pub(crate) positions: Vec<[f32; 4]>,
    pub(crate) velocities: Vec<[f32; 3]>,
    pub(crate) color: [f32; 4],
}

impl Galaxy {
    /// Builds a galaxy from prepared star rows.
    ///
    /// Both arrays must hold the same number of stars and every mass must be positive.
    pub fn from_parts(
        center: Vector3<f32>,
        positions: Vec<[f32; 4]>,
        velocities: Vec<[f32; 3]>,
        color: [f32; 4],
    ) -> Result<Self, GalaxyError> {
        if positions.len() != velocities.len() {
            return Err(GalaxyError::LengthMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }
        if let Some((star, row)) = positions.iter().enumerate().find(|(_, p)| !(p[3] > 0.0)) {
            return Err(GalaxyError::NonPositiveMass { star, mass: row[3] });
        }
        Ok(Self {
            center,
            positions,
            velocities,
            color,
        })
    }
    pub fn center(&self) -> Vector3<f32> {
        self.center
    }
    pub fn star_count(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn color(&self) -> [f32; 4] {
        self.color
    }
    pub fn positions(&self) -> &[[f32; 4]] {
        &self.positions
    }
    pub fn velocities(&self) -> &[[f32; 3]] {
        &self.velocities
    }
    /// Position rows as raw bytes, ready for a vertex buffer with a `vec4` attribute.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
    pub fn position(&self, star: usize) -> Vector3<f32> {
        let [x, y, z, _] = self.positions[star];
        Vector3::new(x, y, z)
    }
    pub fn mass(&self, star: usize) -> f32 {
        self.positions[star][3]
    }
    pub fn velocity(&self, star: usize) -> Vector3<f32> {
        self.velocities[star].into()
    }
    /// Stars whose position or velocity is no longer finite. Such a star never recovers.
    pub fn non_finite_stars(&self) -> usize {
        self.positions
            .iter()
            .zip(&self.velocities)
            .filter(|(p, v)| !(p.iter().all(|c| c.is_finite()) && v.iter().all(|c| c.is_finite())))
            .count()
    }
}
