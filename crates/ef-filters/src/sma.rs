//! Simple moving average.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_PERIOD;

/// Simple moving average over a bounded window of raw inputs.
///
/// The buffer holds the most recent `window` raw inputs; once full, the
/// oldest entry is dropped before a new one is appended. The output is the
/// arithmetic mean of the *current* buffer contents, so during warm-up the
/// divisor is the number of samples seen so far, not the configured window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleMovingAverage {
    window: usize,
    history: VecDeque<f64>,
}

impl SimpleMovingAverage {
    /// Create a moving average with the given window size (minimum 1).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            history: VecDeque::with_capacity(window),
        }
    }

    /// Configured window size.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of samples currently buffered.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True until the first sample arrives.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Record a raw input and return the mean of the buffered samples.
    pub fn observe(&mut self, input: f64) -> f64 {
        if self.history.len() >= self.window {
            self.history.pop_front();
        }
        self.history.push_back(input);
        let sum: f64 = self.history.iter().sum();
        sum / self.history.len() as f64
    }
}

impl Default for SimpleMovingAverage {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warm_up_divides_by_current_length() {
        let mut sma = SimpleMovingAverage::new(10);
        assert_eq!(sma.observe(4.0), 4.0);
        assert_eq!(sma.observe(8.0), 6.0);
        assert_eq!(sma.observe(0.0), 4.0);
        assert_eq!(sma.len(), 3);
    }

    #[test]
    fn full_window_drops_oldest() {
        let mut sma = SimpleMovingAverage::new(3);
        sma.observe(1.0);
        sma.observe(2.0);
        sma.observe(3.0);
        // Window full: the 1.0 falls out
        assert_eq!(sma.observe(4.0), 3.0);
        assert_eq!(sma.len(), 3);
    }

    #[test]
    fn reference_sequence() {
        // Acceptance sequence: ten readings, window 10
        let readings = [
            12.44, 17.1, 11.15, 12.38, 13.22, 16.87, 16.14, 14.22, 13.08, 10.27,
        ];
        let mut sma = SimpleMovingAverage::new(10);
        let mut last = 0.0;
        for reading in readings {
            last = sma.observe(reading);
        }
        assert_eq!(ef_core::round_half_up(last, 3), 13.687);
    }

    #[test]
    fn zero_window_clamps_to_one() {
        let mut sma = SimpleMovingAverage::new(0);
        assert_eq!(sma.observe(5.0), 5.0);
        assert_eq!(sma.observe(9.0), 9.0);
        assert_eq!(sma.len(), 1);
    }
}
