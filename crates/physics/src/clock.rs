use crate::SchedulerConfig;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ClockState {
    Uninitialized,
    Running {
        /// Wall time, in seconds, that virtual time is measured from.
        epoch: f64,
        /// Wall time of the previous `advance` call.
        last_frame: f64,
        /// Index of the last tick accounted for, -1 before the epoch's first tick.
        last_tick: i64,
    },
}

/// Maps wall-clock frame times onto a fixed tick rate.
///
/// Long gaps between frames reset the epoch rather than being caught up, and
/// at most `max_ticks_per_frame` ticks are handed out per frame. Ticks beyond
/// that cap are dropped for good.
#[derive(Debug, Clone)]
pub struct Clock {
    config: SchedulerConfig,
    state: ClockState,
    dropped_ticks: u64,
    resets: u64,
}

impl Clock {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_state(config, ClockState::Uninitialized)
    }
    pub fn with_state(config: SchedulerConfig, state: ClockState) -> Self {
        Self {
            config,
            state,
            dropped_ticks: 0,
            resets: 0,
        }
    }
    pub fn state(&self) -> ClockState {
        self.state
    }
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
    /// Ticks that were due but skipped by the per-frame cap.
    pub fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }
    /// Epoch (re)initializations, including the first one.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Records a frame at wall time `now` (seconds) and returns how many ticks to run.
    ///
    /// The call that (re)establishes the epoch also accounts for the epoch's
    /// tick 0, so it returns 1.
    pub fn advance(&mut self, now: f64) -> u32 {
        let stall = self.config.stall_threshold.as_secs_f64();
        let (epoch, last_tick) = match self.state {
            ClockState::Running {
                epoch,
                last_frame,
                last_tick,
            } if now - last_frame <= stall => (epoch, last_tick),
            ClockState::Running { last_frame, .. } => {
                log::info!(
                    "{:.0}ms since the previous frame, restarting simulation clock",
                    (now - last_frame) * 1000.0
                );
                self.resets += 1;
                (now, -1)
            }
            ClockState::Uninitialized => {
                self.resets += 1;
                (now, -1)
            }
        };

        let target_tick = ((now - epoch) * f64::from(self.config.tick_rate)).floor() as i64;
        let due = (target_tick - last_tick).max(0) as u64;
        let cap = u64::from(self.config.max_ticks_per_frame);
        if due > cap {
            log::debug!("Simulation behind, dropping {} ticks", due - cap);
            self.dropped_ticks += due - cap;
        }
        self.state = ClockState::Running {
            epoch,
            last_frame: now,
            last_tick: target_tick,
        };
        due.min(cap) as u32
    }
}
