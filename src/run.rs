use crate::Presenter;
use instant::Instant;
use physics::{PhysicsResult, Simulation};
use std::{collections::VecDeque, thread, time::Duration};

pub struct Stats {
    pub frame_number: u64,
    pub tick_number: u64,
    instant_start: Instant,
    pub time_spent_in_physics: Duration,
    pub time_spent_presenting: Duration,
    frame_times: VecDeque<Duration>,
}

impl Stats {
    fn new() -> Self {
        Self {
            frame_number: 0,
            tick_number: 0,
            instant_start: Instant::now(),
            time_spent_in_physics: Duration::ZERO,
            time_spent_presenting: Duration::ZERO,
            frame_times: VecDeque::new(),
        }
    }
    fn report(
        &mut self,
        PhysicsResult {
            elapsed_real,
            elapsed_physics_ticks,
        }: PhysicsResult,
    ) {
        self.time_spent_in_physics += elapsed_real;
        self.tick_number += elapsed_physics_ticks;
    }
    /// Mean time between the last (up to) 100 frames.
    pub fn recent_avg_frame_time(&self) -> Duration {
        match self.frame_times.len() {
            0 => Duration::ZERO,
            n => self.frame_times.iter().sum::<Duration>() / n as u32,
        }
    }
}

/// Drives the simulation once per frame at `frame_time` intervals and hands
/// the result to `presenter`. Runs forever unless `run_for` is given.
pub fn run(
    simulation: &mut Simulation,
    presenter: &mut impl Presenter,
    frame_time: Duration,
    run_for: Option<Duration>,
) -> Stats {
    let mut stats = Stats::new();
    let start = stats.instant_start;
    let mut last_frame = start;

    loop {
        let now = Instant::now();
        if run_for.map_or(false, |limit| now.duration_since(start) >= limit) {
            break;
        }
        if stats.frame_number > 0 && now < last_frame + frame_time {
            thread::sleep(last_frame + frame_time - now);
            continue;
        }
        if stats.frame_number > 0 {
            stats.frame_times.push_back(now.duration_since(last_frame));
            while stats.frame_times.len() > 100 {
                stats.frame_times.pop_front();
            }
        }
        last_frame = now;

        let result = simulation.advance_to(now.duration_since(start).as_secs_f64());
        stats.report(result);

        let instant_pre_present = Instant::now();
        presenter.present(simulation.galaxies());
        stats.time_spent_presenting += Instant::now().duration_since(instant_pre_present);
        stats.frame_number += 1;
        if stats.frame_number.is_power_of_two() || stats.frame_number % 1024 == 0 {
            log::info!(
                "Elapsed {}s total, {}s physics ({} ticks), {}s presenting ({} frames, {:.1}ms avg)",
                Instant::now().duration_since(start).as_secs(),
                stats.time_spent_in_physics.as_secs(),
                stats.tick_number,
                stats.time_spent_presenting.as_secs(),
                stats.frame_number,
                stats.recent_avg_frame_time().as_secs_f64() * 1000.0,
            );
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::{Galaxy, SimulationConfig};
    use rand::{rngs::StdRng, SeedableRng};

    #[derive(Default)]
    struct Counting {
        frames: u64,
        stars: usize,
    }

    impl Presenter for Counting {
        fn present(&mut self, galaxies: [&Galaxy; 2]) {
            self.frames += 1;
            self.stars = galaxies.iter().map(|g| g.star_count()).sum();
        }
    }

    #[test]
    fn runs_frames_until_time_is_up() {
        let config = SimulationConfig {
            stars_per_galaxy: 16,
            ..SimulationConfig::default()
        };
        let mut simulation =
            Simulation::with_rng(&config, &mut StdRng::seed_from_u64(21)).unwrap();
        let mut presenter = Counting::default();
        let stats = run(
            &mut simulation,
            &mut presenter,
            Duration::from_millis(10),
            Some(Duration::from_millis(100)),
        );

        assert!(stats.frame_number >= 1);
        assert_eq!(presenter.frames, stats.frame_number);
        assert_eq!(presenter.stars, 32);
        assert_eq!(stats.tick_number, simulation.ticks());
        assert!(stats.tick_number >= 1);
    }

    #[test]
    fn zero_run_length_presents_nothing() {
        let config = SimulationConfig {
            stars_per_galaxy: 4,
            ..SimulationConfig::default()
        };
        let mut simulation =
            Simulation::with_rng(&config, &mut StdRng::seed_from_u64(22)).unwrap();
        let mut presenter = Counting::default();
        let stats = run(
            &mut simulation,
            &mut presenter,
            Duration::from_millis(10),
            Some(Duration::ZERO),
        );
        assert_eq!(stats.frame_number, 0);
        assert_eq!(presenter.frames, 0);
        assert_eq!(stats.recent_avg_frame_time(), Duration::ZERO);
    }
}
