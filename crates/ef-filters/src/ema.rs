//! Exponential moving average.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_PERIOD;

/// Exponential moving average with a single scalar accumulator.
///
/// `alpha = 2 / (period + 1)`. The accumulator is seeded by the first
/// observed input; every later defined input folds in as
/// `input * alpha + accumulator * (1 - alpha)`. An undefined input leaves
/// the accumulator (and the output) unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExponentialMovingAverage {
    period: f64,
    accumulator: Option<f64>,
}

impl ExponentialMovingAverage {
    /// Create an EMA with the given period (minimum 1).
    pub fn new(period: f64) -> Self {
        Self {
            period: period.max(1.0),
            accumulator: None,
        }
    }

    /// Smoothing factor derived from the period.
    pub fn alpha(&self) -> f64 {
        2.0 / (self.period + 1.0)
    }

    /// Current accumulator value, if seeded.
    pub fn current(&self) -> Option<f64> {
        self.accumulator
    }

    /// Fold in a new observation and return the updated average.
    ///
    /// `None` inputs pass the accumulator through unchanged; before the
    /// first defined input the output is `None`.
    pub fn observe(&mut self, input: Option<f64>) -> Option<f64> {
        match (input, self.accumulator) {
            (Some(x), Some(acc)) => {
                let alpha = self.alpha();
                let next = x * alpha + acc * (1.0 - alpha);
                self.accumulator = Some(next);
                Some(next)
            }
            (Some(x), None) => {
                self.accumulator = Some(x);
                Some(x)
            }
            (None, held) => held,
        }
    }
}

impl Default for ExponentialMovingAverage {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD as f64)
    }
}
