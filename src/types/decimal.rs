//! # Decimal Helpers
//!
//! Precision/scale arithmetic for the fixed-point decimal representation
//! (`digits: i128` scaled by `10^scale`). Display-length computation here
//! matches the wire metadata produced for new-format decimal columns, so
//! it is part of the schema-description compatibility contract.

use std::cmp::Ordering;

/// Hard upper bound on declared decimal precision.
pub const DECIMAL_MAX_PRECISION: u32 = 65;

/// Hard upper bound on declared decimal scale.
pub const DECIMAL_MAX_SCALE: u32 = 30;

/// Display length for a DECIMAL(precision, scale) column: one extra
/// character for the decimal point when scale > 0, one for the sign when
/// the column is signed and has any digits at all. Precision is capped at
/// [`DECIMAL_MAX_PRECISION`] first.
pub fn precision_to_length(precision: u32, scale: u32, unsigned: bool) -> u32 {
    let precision = precision.min(DECIMAL_MAX_PRECISION);
    precision
        + u32::from(scale > 0)
        + u32::from(!unsigned && precision != 0)
}

/// Number of significant decimal digits in `digits`.
pub fn digit_count(digits: i128) -> u32 {
    let mut n = digits.unsigned_abs();
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Rescales `digits` from `from_scale` to `to_scale`, rounding half away
/// from zero when the scale shrinks. Saturates instead of overflowing.
pub fn rescale(digits: i128, from_scale: i16, to_scale: i16) -> i128 {
    match to_scale.cmp(&from_scale) {
        Ordering::Equal => digits,
        Ordering::Greater => {
            let mut out = digits;
            for _ in 0..(to_scale - from_scale) {
                out = match out.checked_mul(10) {
                    Some(v) => v,
                    None => return if digits < 0 { i128::MIN } else { i128::MAX },
                };
            }
            out
        }
        Ordering::Less => {
            let mut out = digits;
            for _ in 0..(from_scale - to_scale - 1) {
                out /= 10;
            }
            if out >= 0 {
                (out + 5) / 10
            } else {
                (out - 5) / 10
            }
        }
    }
}

/// Compares two scaled decimals without materializing a common scale
/// larger than necessary.
pub fn compare(a_digits: i128, a_scale: i16, b_digits: i128, b_scale: i16) -> Ordering {
    let scale = a_scale.max(b_scale);
    rescale(a_digits, a_scale, scale).cmp(&rescale(b_digits, b_scale, scale))
}

/// Renders a scaled decimal as a plain SQL literal (`-123.45`).
pub fn to_string(digits: i128, scale: i16) -> String {
    if scale <= 0 {
        return rescale(digits, scale, 0).to_string();
    }
    let negative = digits < 0;
    let abs = digits.unsigned_abs().to_string();
    let scale = scale as usize;
    let (int_part, frac_part) = if abs.len() > scale {
        let split = abs.len() - scale;
        (abs[..split].to_string(), abs[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", abs, width = scale))
    };
    if negative {
        format!("-{}.{}", int_part, frac_part)
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Truncates a scaled decimal to an integer, rounding half away from zero.
pub fn to_int(digits: i128, scale: i16) -> i64 {
    rescale(digits, scale, 0).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Converts a scaled decimal to a float.
pub fn to_real(digits: i128, scale: i16) -> f64 {
    digits as f64 / 10f64.powi(scale as i32)
}
