use cgmath::Vector3;
use std::time::Duration;
use thiserror::Error;

pub const STARS_PER_GALAXY: usize = 40_000;
pub const TICK_RATE: u32 = 120;
pub const TIME_STEP: f32 = 0.0005;
pub const STALL_THRESHOLD: Duration = Duration::from_millis(200);
pub const MAX_TICKS_PER_FRAME: u32 = 8;
pub const CROSS_WEIGHT: f32 = 2.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick rate must be positive")]
    ZeroTickRate,
    #[error("at least one tick per frame must be allowed")]
    ZeroMaxTicks,
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f32),
    #[error("cross-galaxy weight must be finite, got {0}")]
    InvalidCrossWeight(f32),
    #[error("galaxy {index} has a non-finite center {center:?}")]
    InvalidCenter { index: usize, center: [f32; 3] },
}

/// Wall-clock to tick mapping used by [`crate::Clock`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub tick_rate: u32,
    /// A gap between frames longer than this resets the epoch instead of catching up.
    pub stall_threshold: Duration,
    pub max_ticks_per_frame: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            stall_threshold: STALL_THRESHOLD,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub center: Vector3<f32>,
    pub invert_rotation: bool,
    /// RGBA, only read by the presentation layer.
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub stars_per_galaxy: usize,
    pub galaxies: [GalaxyConfig; 2],
    /// Scales the pull of the other galaxy's center relative to the home center.
    pub cross_weight: f32,
    pub time_step: f32,
    pub scheduler: SchedulerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            stars_per_galaxy: STARS_PER_GALAXY,
            galaxies: [
                GalaxyConfig {
                    center: Vector3::new(-1.0, 0.0, -0.5),
                    invert_rotation: false,
                    color: [1.0, 0.5, 1.0, 1.0],
                },
                GalaxyConfig {
                    center: Vector3::new(1.0, 0.0, 0.5),
                    invert_rotation: true,
                    color: [0.5, 1.0, 1.0, 1.0],
                },
            ],
            cross_weight: CROSS_WEIGHT,
            time_step: TIME_STEP,
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.scheduler.max_ticks_per_frame == 0 {
            return Err(ConfigError::ZeroMaxTicks);
        }
        if !self.time_step.is_finite() || self.time_step < 0.0 {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        if !self.cross_weight.is_finite() {
            return Err(ConfigError::InvalidCrossWeight(self.cross_weight));
        }
        for (index, galaxy) in self.galaxies.iter().enumerate() {
            let center: [f32; 3] = galaxy.center.into();
            if center.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::InvalidCenter { index, center });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.stars_per_galaxy, 40_000);
        assert_eq!(config.scheduler.tick_rate, 120);
        assert_eq!(config.scheduler.stall_threshold, Duration::from_millis(200));
        assert!(!config.galaxies[0].invert_rotation);
        assert!(config.galaxies[1].invert_rotation);
    }

    #[test]
    fn rejects_broken_values() {
        let mut config = SimulationConfig::default();
        config.scheduler.tick_rate = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));

        let mut config = SimulationConfig::default();
        config.scheduler.max_ticks_per_frame = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxTicks));

        let mut config = SimulationConfig::default();
        config.time_step = -0.1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeStep(-0.1)));

        let mut config = SimulationConfig::default();
        config.galaxies[1].center.y = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCenter { index: 1, .. })
        ));
    }
}
