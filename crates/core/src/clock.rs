//! Simulated time. Every timer in the core reads this clock instead of the wall clock,
//! so frame-counted and second-based durations stay consistent and testable.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimClock {
    tick: u64,
    tick_rate: u32,
}

impl SimClock {
    pub fn new(tick_rate: u32) -> Self {
        assert!(tick_rate > 0, "tick rate must be positive");
        Self { tick: 0, tick_rate }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.tick as f32 / self.tick_rate as f32
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.tick * 1000 / u64::from(self.tick_rate)
    }
}
