//! Rolling one-second event rate meter
//!
//! Used for the render loop's frame rate and for the sampling throughput.
//! The published rate is always the previous completed window's count, so it
//! lags by up to one window.

use crate::constants::RATE_WINDOW_MS;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateCounter {
    window_start: f64,
    count_in_window: u32,
    last_completed_rate: u32,
}

impl RateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the window if `time` is at least one window past its start
    pub fn update(&mut self, time: f64) {
        if time >= self.window_start + RATE_WINDOW_MS {
            self.last_completed_rate = self.count_in_window;
            self.count_in_window = 0;
            self.window_start = time;
        }
    }

    /// Count one event in the current window without checking its boundary
    pub fn count(&mut self) {
        self.count_in_window += 1;
    }

    pub fn update_and_count(&mut self, time: f64) {
        self.update(time);
        self.count();
    }

    /// Rate of the last completed window
    pub fn get(&self) -> u32 {
        self.last_completed_rate
    }
}
