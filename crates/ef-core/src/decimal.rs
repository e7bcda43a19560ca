//! Precision inference and exact decimal rounding.
//!
//! Numeric blocks carry a decimal-place count alongside their value so that
//! derived outputs are formatted to the precision of their inputs. Rounding
//! works on the decimal digit string, not on the binary float, so values
//! sitting on a rounding boundary (e.g. `2.675` at two places) round the way
//! a human doing decimal arithmetic expects.

use crate::error::{CoreError, CoreResult};

/// Decimal places for a derived block: the maximum over its defined sources,
/// or 0 when none are defined.
pub fn infer_places<I>(source_places: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    source_places.into_iter().max().unwrap_or(0)
}

/// Round `value` to `places` decimal places, halves away from zero.
///
/// The rounding decision is made on the shortest decimal representation of
/// the float (the same digits `{}` formatting prints), so the result matches
/// exact decimal arithmetic rather than the binary approximation. Non-finite
/// values pass through unchanged.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let places = places as usize;
    if frac_part.len() <= places {
        return value;
    }

    // Digits of the truncated value, most significant first.
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes()[places] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let int_len = digits.len() - places;
    let mut text = String::with_capacity(digits.len() + 1);
    for (i, digit) in digits.iter().enumerate() {
        if i == int_len {
            text.push('.');
        }
        text.push((b'0' + digit) as char);
    }
    let rounded: f64 = text.parse().expect("digit string is a valid decimal");
    if value.is_sign_negative() { -rounded } else { rounded }
}

/// Count the decimal places implied by the textual form of a number.
///
/// Plain decimals count digits after the point; scientific notation combines
/// the fraction length with the exponent and takes the magnitude, matching
/// how injected sensor literals declare their precision.
///
/// Examples: `"1e-11"` is 11, `"12341.9201"` is 4, `".000"` is 3.
pub fn decimal_places_of_literal(literal: &str) -> CoreResult<u32> {
    let invalid = || CoreError::InvalidLiteral {
        literal: literal.to_string(),
    };

    let text = literal.trim();
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().map_err(|_| invalid())?),
        None => (text, 0),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    let all_digits =
        |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }
    Ok((exponent - frac_part.len() as i64).unsigned_abs() as u32)
}

/// Fixed-point rendering of a numeric value at the given precision.
pub fn format_places(value: f64, places: u32) -> String {
    format!("{:.*}", places as usize, value)
}
