mod present;
mod run;

pub use crate::{
    present::{Presenter, StagingBuffers},
    run::{run, Stats},
};

use anyhow::{ensure, Context};
use clap::Parser;
use physics::{Simulation, SimulationConfig};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

/// Two galaxies colliding under simplified gravity, driven by a headless frame loop.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Stars in each galaxy
    #[arg(long, default_value_t = physics::STARS_PER_GALAXY)]
    pub stars: usize,
    /// Stop after this many seconds of wall time; runs until interrupted otherwise
    #[arg(long)]
    pub seconds: Option<f64>,
    /// Seed for reproducible galaxies
    #[arg(long)]
    pub seed: Option<u64>,
    /// Presentation refresh rate in Hz
    #[arg(long, default_value_t = 60.0)]
    pub frame_rate: f64,
    /// Simulation ticks per second of wall time
    #[arg(long, default_value_t = physics::TICK_RATE)]
    pub tick_rate: u32,
    /// Ticks allowed per frame before the simulation visibly slows down
    #[arg(long, default_value_t = physics::MAX_TICKS_PER_FRAME)]
    pub max_ticks: u32,
    /// Weight of the other galaxy's pull relative to the home galaxy's
    #[arg(long, default_value_t = physics::CROSS_WEIGHT)]
    pub cross_weight: f32,
}

impl Args {
    pub fn simulation_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig {
            stars_per_galaxy: self.stars,
            cross_weight: self.cross_weight,
            ..SimulationConfig::default()
        };
        config.scheduler.tick_rate = self.tick_rate;
        config.scheduler.max_ticks_per_frame = self.max_ticks;
        config
    }
    pub fn frame_time(&self) -> anyhow::Result<Duration> {
        ensure!(
            self.frame_rate.is_finite() && self.frame_rate > 0.0,
            "frame rate must be positive, got {}",
            self.frame_rate
        );
        Ok(Duration::from_secs_f64(1.0 / self.frame_rate))
    }
    pub fn run_for(&self) -> anyhow::Result<Option<Duration>> {
        self.seconds
            .map(|s| {
                Duration::try_from_secs_f64(s)
                    .context("run length must be a non-negative number of seconds")
            })
            .transpose()
    }
}

pub fn start(args: Args) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Setting up");
    let config = args.simulation_config();
    let frame_time = args.frame_time()?;
    let run_for = args.run_for()?;
    let mut simulation = match args.seed {
        Some(seed) => Simulation::with_rng(&config, &mut StdRng::seed_from_u64(seed)),
        None => Simulation::new(&config),
    }
    .context("invalid simulation configuration")?;
    log::info!(
        "{} stars per galaxy, {} ticks/s of {} time units, at most {} ticks per frame",
        config.stars_per_galaxy,
        config.scheduler.tick_rate,
        config.time_step,
        config.scheduler.max_ticks_per_frame
    );

    let mut presenter = StagingBuffers::new();
    log::info!("Starting frame loop");
    let stats = run(&mut simulation, &mut presenter, frame_time, run_for);
    log::info!(
        "Finished after {} frames and {} ticks, {:.3} time units simulated, {} ticks dropped",
        stats.frame_number,
        stats.tick_number,
        simulation.simulated_time(),
        simulation.clock().dropped_ticks()
    );
    Ok(())
}
