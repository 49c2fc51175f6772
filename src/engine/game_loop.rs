/// Fixed-timestep game loop timing
///
/// Character ticks always run with `FIXED_TIMESTEP`, so timers, jump arcs and
/// knockdown arcs are reproducible regardless of frame rate. Rendering runs
/// once per frame with whatever time is left over.
use std::time::{Duration, Instant};

/// Simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Upper bound on ticks per frame so a stall doesn't snowball
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Accumulates real frame time and hands out whole fixed ticks
#[derive(Debug)]
pub struct GameLoop {
    accumulator: f32,
    last_frame: Instant,
    paused: bool,
    frame_count: u64,
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_frame: Instant::now(),
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Measure the frame from the wall clock and return how many ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Feed an explicit frame duration; returns how many ticks to run
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.frame_count += 1;

        if self.paused {
            return 0;
        }

        self.accumulator += elapsed.as_secs_f32();

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP;
            ticks += 1;
        }

        // Drop the backlog we refused to simulate
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP);
        }

        self.tick_count += ticks as u64;
        ticks
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            log::info!("Game paused");
        } else {
            // No burst of catch-up ticks after a pause
            self.accumulator = 0.0;
            self.last_frame = Instant::now();
            log::info!("Game resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
