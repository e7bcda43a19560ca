//! Timer oscillator block state.

use serde::{Deserialize, Serialize};

/// On/off oscillator driven by the evaluation tick.
///
/// The timer ignores any wired inputs entirely: each diagram pass advances
/// its counter exactly once, regardless of dependency state. The counter
/// stays in `[0, seconds_on + seconds_off)`; output is 1 during the on-phase
/// and 0 during the off-phase, so a full cycle is exactly
/// `seconds_on + seconds_off` ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    seconds_on: u64,
    seconds_off: u64,
    counter: u64,
}

impl Timer {
    /// Create a timer with the given on/off phase lengths in ticks.
    pub fn new(seconds_on: u64, seconds_off: u64) -> Self {
        Self {
            seconds_on,
            seconds_off,
            counter: 0,
        }
    }

    /// Full cycle length in ticks (at least 1, so the counter always wraps).
    pub fn period(&self) -> u64 {
        (self.seconds_on + self.seconds_off).max(1)
    }

    /// Advance one tick and return the phase output: 1 on, 0 off.
    pub fn tick(&mut self) -> f64 {
        let output = if self.counter < self.seconds_on { 1.0 } else { 0.0 };
        self.counter += 1;
        if self.counter >= self.period() {
            self.counter = 0;
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_on_five_off_cycle() {
        let mut timer = Timer::new(5, 5);
        let outputs: Vec<f64> = (0..20).map(|_| timer.tick()).collect();
        let expected: Vec<f64> = [1.0; 5]
            .into_iter()
            .chain([0.0; 5])
            .chain([1.0; 5])
            .chain([0.0; 5])
            .collect();
        assert_eq!(outputs, expected);
    }

    #[test]
    fn asymmetric_phases() {
        let mut timer = Timer::new(2, 3);
        let outputs: Vec<f64> = (0..10).map(|_| timer.tick()).collect();
        assert_eq!(
            outputs,
            vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn zero_on_phase_is_always_off() {
        let mut timer = Timer::new(0, 3);
        assert_eq!(timer.tick(), 0.0);
        assert_eq!(timer.tick(), 0.0);
    }

    #[test]
    fn degenerate_timer_does_not_hang() {
        // on = off = 0: period clamps to 1 and the counter still wraps
        let mut timer = Timer::new(0, 0);
        for _ in 0..3 {
            assert_eq!(timer.tick(), 0.0);
        }
    }
}
