//! Stateless operators.
//!
//! An operator is a pure function of the ordered list of defined inputs:
//! no history, no side effects. Boolean and comparison operators emit 0/1;
//! truthiness of a numeric input is "not equal to zero".

use serde::{Deserialize, Serialize};

/// Divisors at or below this magnitude make a division undefined rather than
/// letting infinities or NaN propagate through the diagram.
pub const MIN_DIVISOR: f64 = 1e-8;

/// Stateless operator kinds.
///
/// `PassThrough` echoes its first input; the registry resolves unrecognized
/// type tags to it so an unknown block degrades instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    And,
    Or,
    Xor,
    Nand,
    Not,
    Plus,
    Minus,
    Times,
    DividedBy,
    AbsoluteValue,
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    PassThrough,
}

impl Operator {
    /// Resolve an operator from its type tag. Returns `None` for tags that
    /// are not operators (stateful filters, device types, typos).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "and" => Self::And,
            "or" => Self::Or,
            "xor" => Self::Xor,
            "nand" => Self::Nand,
            "not" => Self::Not,
            "plus" => Self::Plus,
            "minus" => Self::Minus,
            "times" => Self::Times,
            "divided by" => Self::DividedBy,
            "absolute value" => Self::AbsoluteValue,
            "equals" => Self::Equals,
            "not equals" => Self::NotEquals,
            "less than" => Self::LessThan,
            "greater than" => Self::GreaterThan,
            _ => return None,
        })
    }

    /// Apply the operator to the defined inputs.
    ///
    /// Returns `None` when an operand is missing or a division is undefined;
    /// the owning block goes null for the tick rather than erroring.
    pub fn apply(&self, inputs: &[f64]) -> Option<f64> {
        let a = *inputs.first()?;
        let result = match self {
            Self::And => bool_to_num(truthy(a) && truthy(*inputs.get(1)?)),
            Self::Or => bool_to_num(truthy(a) || truthy(*inputs.get(1)?)),
            Self::Xor => bool_to_num((a > 0.0) != (*inputs.get(1)? > 0.0)),
            Self::Nand => bool_to_num(!(truthy(a) && truthy(*inputs.get(1)?))),
            Self::Not => bool_to_num(!truthy(a)),
            Self::Plus => a + *inputs.get(1)?,
            Self::Minus => a - *inputs.get(1)?,
            Self::Times => a * *inputs.get(1)?,
            Self::DividedBy => {
                let b = *inputs.get(1)?;
                if b.abs() <= MIN_DIVISOR {
                    return None;
                }
                a / b
            }
            Self::AbsoluteValue => a.abs(),
            Self::Equals => bool_to_num(a == *inputs.get(1)?),
            Self::NotEquals => bool_to_num(a != *inputs.get(1)?),
            Self::LessThan => bool_to_num(a < *inputs.get(1)?),
            Self::GreaterThan => bool_to_num(a > *inputs.get(1)?),
            Self::PassThrough => a,
        };
        Some(result)
    }
}

fn truthy(n: f64) -> bool {
    n != 0.0
}

fn bool_to_num(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
