//! ef-filters: the filter library for edgeflow diagrams.
//!
//! Filters are the computation behaviors a derived block can carry:
//! - **Stateless operators**: boolean, arithmetic and comparison operators
//!   that are pure functions of the ordered defined-input list
//! - **Stateful filters**: moving averages that smooth a signal across ticks
//! - **Timer**: an on/off oscillator driven by the tick itself
//! - **Image ops**: Gaussian blur and brightness over opaque image payloads
//!
//! Stateful filter instances belong to exactly one block for its lifetime;
//! they are never shared between blocks or diagrams.

pub mod ema;
pub mod error;
pub mod image_ops;
pub mod operator;
pub mod sma;
pub mod timer;

pub use ema::ExponentialMovingAverage;
pub use error::{FilterError, FilterResult};
pub use image_ops::{blur, brighten, brightness_factor};
pub use operator::Operator;
pub use sma::SimpleMovingAverage;
pub use timer::Timer;

/// Default window/period for the moving-average filters.
pub const DEFAULT_PERIOD: usize = 10;
