use instant::Instant;
use rand::Rng;
use std::time::Duration;

mod clock;
mod config;
mod force;
mod galaxy;
mod generator;
mod integrator;

pub use clock::{Clock, ClockState};
pub use config::{
    ConfigError, GalaxyConfig, SchedulerConfig, SimulationConfig, CROSS_WEIGHT,
    MAX_TICKS_PER_FRAME, STALL_THRESHOLD, STARS_PER_GALAXY, TICK_RATE, TIME_STEP,
};
pub use force::acceleration;
pub use galaxy::{Galaxy, GalaxyError};
pub use generator::generate;
pub use integrator::integrate;

/// Two interacting galaxies and the clock that decides when they move.
#[derive(Debug, Clone)]
pub struct Simulation {
    galaxy_a: Galaxy,
    galaxy_b: Galaxy,
    clock: Clock,
    time_step: f32,
    cross_weight: f32,
    ticks: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct PhysicsResult {
    pub elapsed_real: Duration,
    pub elapsed_physics_ticks: u64,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }
    pub fn with_rng<R: Rng + ?Sized>(
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let [a, b] = config.galaxies.map(|g| {
            generate(
                g.center,
                config.stars_per_galaxy,
                g.invert_rotation,
                g.color,
                &mut *rng,
            )
        });
        Self::from_galaxies(config, a, b)
    }
    /// Uses prepared galaxies instead of generating them. `config.galaxies` is ignored.
    pub fn from_galaxies(
        config: &SimulationConfig,
        galaxy_a: Galaxy,
        galaxy_b: Galaxy,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            galaxy_a,
            galaxy_b,
            clock: Clock::new(config.scheduler),
            time_step: config.time_step,
            cross_weight: config.cross_weight,
            ticks: 0,
        })
    }
    pub fn galaxies(&self) -> [&Galaxy; 2] {
        [&self.galaxy_a, &self.galaxy_b]
    }
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
    /// Ticks run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
    /// Simulated time, in simulation units.
    pub fn simulated_time(&self) -> f64 {
        self.ticks as f64 * f64::from(self.time_step)
    }

    /// Runs one tick: galaxy A against B, then galaxy B against A.
    pub fn tick(&mut self) {
        integrate(
            &mut self.galaxy_a,
            &self.galaxy_b,
            self.time_step,
            self.cross_weight,
        );
        integrate(
            &mut self.galaxy_b,
            &self.galaxy_a,
            self.time_step,
            self.cross_weight,
        );
        self.ticks += 1;
    }

    /// Runs the ticks that are due at wall time `now` (seconds, monotonic).
    pub fn advance_to(&mut self, now: f64) -> PhysicsResult {
        let before = Instant::now();
        let due = self.clock.advance(now);
        for _ in 0..due {
            self.tick();
        }
        PhysicsResult {
            elapsed_real: Instant::now() - before,
            elapsed_physics_ticks: u64::from(due),
        }
    }
}
