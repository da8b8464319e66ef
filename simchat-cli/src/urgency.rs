//! Cosmetic spots-remaining countdown shown with the payment prompt. Purely
//! simulated (and labeled as such on the surface): starts near a small cap,
//! drops by one per interval, never goes below the floor.

use std::time::{Duration, Instant};

use rand::Rng;

pub struct UrgencyCounter {
    started: Instant,
    initial: u64,
    floor: u64,
    interval: Duration,
}

impl UrgencyCounter {
    /// Starts a counter at 6–9 spots, decaying every 8 seconds down to 2.
    pub fn new() -> Self {
        let initial = rand::thread_rng().gen_range(6..=9);
        Self::with_pacing(initial, 2, Duration::from_secs(8))
    }

    pub fn with_pacing(initial: u64, floor: u64, interval: Duration) -> Self {
        Self {
            started: Instant::now(),
            initial,
            floor,
            interval,
        }
    }

    /// Spots left right now.
    pub fn remaining(&self) -> u64 {
        let ticks = self.started.elapsed().as_millis() / self.interval.as_millis().max(1);
        self.initial.saturating_sub(ticks as u64).max(self.floor)
    }
}

impl Default for UrgencyCounter {
    fn default() -> Self {
        Self::new()
    }
}
