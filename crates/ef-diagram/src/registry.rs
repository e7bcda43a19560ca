//! Block registry: type-tag dispatch to runtime behaviors.
//!
//! The registry resolves each block's type tag exactly once, at diagram
//! construction, into a closed `Behavior` variant. Evaluation then matches
//! on the variant instead of re-branching on strings every tick.

use ef_core::{Param, Value, read_param, read_param_obj};
use ef_filters::{
    DEFAULT_PERIOD, ExponentialMovingAverage, Operator, SimpleMovingAverage, Timer, image_ops,
};
use tracing::{debug, warn};

/// Runtime behavior of a block, resolved from its type tag.
///
/// Stateful variants own their cross-tick history; one instance belongs to
/// exactly one block for that block's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Stateless operator over the defined inputs.
    Operator(Operator),
    SimpleMovingAverage(SimpleMovingAverage),
    ExponentialMovingAverage(ExponentialMovingAverage),
    Timer(Timer),
    Blur,
    Brightness,
}

impl Behavior {
    /// Resolve the behavior for a type tag.
    ///
    /// Unrecognized tags degrade to the generic pass-through operator;
    /// leaf blocks (sensors, user entries) land there too, harmlessly,
    /// since their update path never calls `compute`.
    pub fn resolve(tag: &str, params: &[Param]) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "timer" => {
                let seconds_on = read_param(params, "seconds_on", 0.0).max(0.0) as u64;
                let seconds_off = read_param(params, "seconds_off", 0.0).max(0.0) as u64;
                Self::Timer(Timer::new(seconds_on, seconds_off))
            }
            "simple moving average" => {
                let window = read_param(params, "period", DEFAULT_PERIOD as f64).max(1.0) as usize;
                Self::SimpleMovingAverage(SimpleMovingAverage::new(window))
            }
            "exponential moving average" => {
                let period = read_param(params, "period", DEFAULT_PERIOD as f64);
                Self::ExponentialMovingAverage(ExponentialMovingAverage::new(period))
            }
            "blur" => Self::Blur,
            "brightness" => Self::Brightness,
            other => match Operator::from_tag(other) {
                Some(op) => Self::Operator(op),
                None => {
                    debug!(tag = other, "unrecognized block type, using pass-through");
                    Self::Operator(Operator::PassThrough)
                }
            },
        }
    }

    /// True for the timer, which advances on every pass regardless of its
    /// dependency state.
    pub fn is_timer(&self) -> bool {
        matches!(self, Self::Timer(_))
    }

    /// Compute a raw (pre-rounding) output from the defined input values.
    ///
    /// `None` means the block holds no value this tick; per-tick failures
    /// (missing operands, undecodable image, absent parameter) degrade
    /// rather than raise.
    pub fn compute(&mut self, inputs: &[Value], params: &[Param]) -> Option<Value> {
        match self {
            // Pass-through echoes whatever arrives first, image payloads
            // included; only the real operators project to numbers.
            Self::Operator(Operator::PassThrough) => inputs.first().cloned(),
            Self::Operator(op) => {
                let numbers: Vec<f64> = inputs.iter().filter_map(Value::as_number).collect();
                op.apply(&numbers).map(Value::Number)
            }
            Self::SimpleMovingAverage(sma) => {
                let input = inputs.first()?.as_number()?;
                Some(Value::Number(sma.observe(input)))
            }
            Self::ExponentialMovingAverage(ema) => {
                let input = inputs.first().and_then(Value::as_number);
                ema.observe(input).map(Value::Number)
            }
            Self::Timer(timer) => Some(Value::Number(timer.tick())),
            Self::Blur => {
                let payload = inputs.first()?.as_image()?;
                let radius = read_param(params, "blur_amount", 0.0);
                match image_ops::blur(payload, radius) {
                    Ok(blurred) => Some(Value::Image(blurred)),
                    Err(err) => {
                        warn!(error = %err, "blur failed, block goes null this tick");
                        None
                    }
                }
            }
            Self::Brightness => {
                let payload = inputs.first()?.as_image()?;
                let setting = read_param_obj(params, "brightness_adjustment")?;
                let (min, max) = (setting.min?, setting.max?);
                let factor = image_ops::brightness_factor(setting.value, min, max);
                match image_ops::brighten(payload, factor) {
                    Ok(brightened) => Some(Value::Image(brightened)),
                    Err(err) => {
                        warn!(error = %err, "brightness failed, block goes null this tick");
                        None
                    }
                }
            }
        }
    }
}
