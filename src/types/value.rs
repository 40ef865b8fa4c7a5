//! # Runtime Value Representation
//!
//! This module provides `Value<'a>`, the runtime representation for SQL
//! values flowing through comparison, caching and field-save paths. Text
//! and byte payloads use `Cow` so values can borrow from their source
//! buffer and only own data when a conversion produced it.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Description |
//! |---------|-----------|-------------|
//! | Null | - | SQL NULL |
//! | Int | i64 | 64-bit signed integer |
//! | Float | f64 | 64-bit floating point |
//! | Decimal | {i128, i16} | Fixed-point digits plus scale |
//! | Text | Cow<str> | UTF-8 string |
//! | Bytes | Cow<[u8]> | Binary data |
//! | Temporal | {i64} | Microseconds on the packed temporal axis |
//!
//! ## Coercion Semantics
//!
//! The `as_*` accessors perform lossy-but-deterministic coercion in the
//! direction a save or comparison strategy needs: floats round half away
//! from zero toward integers, decimals rescale, text parses. A coercion
//! that has no defined result (binary blob to integer, temporal to
//! decimal) is an error the caller maps to its own status code.

use super::decimal;
use super::temporal;
use eyre::{bail, Result};
use std::borrow::Cow;

/// Runtime value for one evaluated SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    Int(i64),
    Float(f64),
    Decimal { digits: i128, scale: i16 },
    Text(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    Temporal { micros: i64 },
}

impl<'a> Value<'a> {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerces to a signed integer, rounding where the representation
    /// requires it.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Float(f) => Ok(f.round() as i64),
            Value::Decimal { digits, scale } => Ok(decimal::to_int(*digits, *scale)),
            Value::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Ok(i);
                }
                match trimmed.parse::<f64>() {
                    Ok(f) => Ok(f.round() as i64),
                    Err(e) => bail!("cannot coerce text '{}' to integer: {}", s, e),
                }
            }
            Value::Null => bail!("cannot coerce NULL to integer"),
            Value::Bytes(_) => bail!("cannot coerce binary data to integer"),
            Value::Temporal { .. } => bail!("cannot coerce temporal value to integer"),
        }
    }

    /// Coerces to a double-precision float.
    pub fn as_real(&self) -> Result<f64> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            Value::Decimal { digits, scale } => Ok(decimal::to_real(*digits, *scale)),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| eyre::eyre!("cannot coerce text '{}' to real: {}", s, e)),
            Value::Null => bail!("cannot coerce NULL to real"),
            Value::Bytes(_) => bail!("cannot coerce binary data to real"),
            Value::Temporal { .. } => bail!("cannot coerce temporal value to real"),
        }
    }

    /// Coerces to scaled-decimal form. Floats pick up six fractional
    /// digits, which is the round-trip precision the save path needs.
    pub fn as_decimal(&self) -> Result<(i128, i16)> {
        match self {
            Value::Int(i) => Ok((*i as i128, 0)),
            Value::Decimal { digits, scale } => Ok((*digits, *scale)),
            Value::Float(f) => Ok(((f * 1_000_000.0).round() as i128, 6)),
            Value::Text(_) => {
                let real = self.as_real()?;
                Ok(((real * 1_000_000.0).round() as i128, 6))
            }
            Value::Null => bail!("cannot coerce NULL to decimal"),
            Value::Bytes(_) => bail!("cannot coerce binary data to decimal"),
            Value::Temporal { .. } => bail!("cannot coerce temporal value to decimal"),
        }
    }

    /// Packed temporal microseconds, when the value is on that axis.
    pub fn as_temporal(&self) -> Result<i64> {
        match self {
            Value::Temporal { micros } => Ok(*micros),
            _ => bail!("value is not temporal"),
        }
    }

    /// Renders the value as display text. Bytes render as-is when valid
    /// UTF-8 and as hex otherwise; temporal values render fractional
    /// digits only when present.
    pub fn render_text(&self) -> Result<String> {
        match self {
            Value::Null => bail!("cannot render NULL as text"),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::Decimal { digits, scale } => Ok(decimal::to_string(*digits, *scale)),
            Value::Text(s) => Ok(s.to_string()),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => Ok(s.to_string()),
                Err(_) => Ok(b.iter().map(|x| format!("{:02X}", x)).collect()),
            },
            Value::Temporal { micros } => {
                let dec = if micros % temporal::MICROS_PER_SEC != 0 { 6 } else { 0 };
                Ok(temporal::format_datetime(*micros, dec))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_coercions() {
        assert_eq!(Value::Int(42).as_int().unwrap(), 42);
        assert_eq!(Value::Float(41.5).as_int().unwrap(), 42);
        assert_eq!(
            Value::Decimal { digits: 12345, scale: 2 }.as_int().unwrap(),
            123
        );
        assert_eq!(Value::Text(Cow::Borrowed(" 17 ")).as_int().unwrap(), 17);
    }

    #[test]
    fn null_does_not_coerce() {
        assert!(Value::Null.as_int().is_err());
        assert!(Value::Null.as_real().is_err());
        assert!(Value::Null.as_decimal().is_err());
    }

    #[test]
    fn text_parses_scientific_notation_to_int() {
        assert_eq!(Value::Text(Cow::Borrowed("1e3")).as_int().unwrap(), 1000);
    }

    #[test]
    fn decimal_coercion_from_float_keeps_six_digits() {
        let (digits, scale) = Value::Float(1.25).as_decimal().unwrap();
        assert_eq!((digits, scale), (1_250_000, 6));
    }

    #[test]
    fn renders_each_shape() {
        assert_eq!(Value::Int(-3).render_text().unwrap(), "-3");
        assert_eq!(
            Value::Decimal { digits: -5, scale: 3 }.render_text().unwrap(),
            "-0.005"
        );
        assert_eq!(
            Value::Bytes(Cow::Borrowed(&[0xDE, 0xAD][..]))
                .render_text()
                .unwrap(),
            "DEAD"
        );
    }
}
