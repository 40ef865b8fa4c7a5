//! # Heap-Owned Values
//!
//! `OwnedValue` is the owning counterpart of [`super::Value`]: the shape a
//! field slot or a literal holds on to across statement boundaries. It
//! converts to a borrowing `Value` for evaluation without copying the
//! text/byte payloads.

use super::Value;
use std::borrow::Cow;

/// Heap-owned SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    Null,
    Int(i64),
    Float(f64),
    Decimal { digits: i128, scale: i16 },
    Text(String),
    Bytes(Vec<u8>),
    Temporal { micros: i64 },
}

impl OwnedValue {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, OwnedValue::Null)
    }

    /// Borrows this value as a runtime [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            OwnedValue::Null => Value::Null,
            OwnedValue::Int(i) => Value::Int(*i),
            OwnedValue::Float(f) => Value::Float(*f),
            OwnedValue::Decimal { digits, scale } => Value::Decimal {
                digits: *digits,
                scale: *scale,
            },
            OwnedValue::Text(s) => Value::Text(Cow::Borrowed(s)),
            OwnedValue::Bytes(b) => Value::Bytes(Cow::Borrowed(b)),
            OwnedValue::Temporal { micros } => Value::Temporal { micros: *micros },
        }
    }
}

impl From<&Value<'_>> for OwnedValue {
    fn from(value: &Value<'_>) -> Self {
        match value {
            Value::Null => OwnedValue::Null,
            Value::Int(i) => OwnedValue::Int(*i),
            Value::Float(f) => OwnedValue::Float(*f),
            Value::Decimal { digits, scale } => OwnedValue::Decimal {
                digits: *digits,
                scale: *scale,
            },
            Value::Text(s) => OwnedValue::Text(s.to_string()),
            Value::Bytes(b) => OwnedValue::Bytes(b.to_vec()),
            Value::Temporal { micros } => OwnedValue::Temporal { micros: *micros },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_value() {
        let owned = OwnedValue::Text("abc".to_string());
        let value = owned.as_value();
        assert_eq!(OwnedValue::from(&value), owned);
    }

    #[test]
    fn as_value_borrows_text() {
        let owned = OwnedValue::Text("abc".to_string());
        match owned.as_value() {
            Value::Text(Cow::Borrowed(s)) => assert_eq!(s, "abc"),
            other => panic!("expected borrowed text, got {:?}", other),
        }
    }
}
