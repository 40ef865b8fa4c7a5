//! # Field Save Targets
//!
//! `FieldSlot` is the minimal store target a save strategy writes into: a
//! heap-owned value constrained by its column's declared shape. The slot
//! applies the column-side coercions (integer range clamping, float
//! narrowing, decimal rescale, text truncation) and reports what it had
//! to do through `SaveStatus`.
//!
//! ## Lossy-Conversion Rule
//!
//! NULL stored into a non-nullable column is the one conversion the
//! caller can veto: with `no_conversions` the store is refused; without
//! it the column's implicit default (zero / empty) is stored and the
//! loss is reported as truncation.

use crate::schema::Column;
use crate::types::{decimal, temporal, OwnedValue, TypeCode};

/// Outcome of saving a value into a field slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Stored exactly.
    Ok,
    /// Stored, but the value was clamped, narrowed or cut.
    Truncated,
    /// Not stored; no acceptable conversion exists.
    NoConversion,
}

/// A writable slot shaped by one column definition.
#[derive(Debug)]
pub struct FieldSlot<'a> {
    column: &'a Column,
    value: OwnedValue,
}

impl<'a> FieldSlot<'a> {
    pub fn new(column: &'a Column) -> Self {
        Self {
            column,
            value: OwnedValue::Null,
        }
    }

    pub fn column(&self) -> &Column {
        self.column
    }

    /// The currently stored value.
    pub fn value(&self) -> &OwnedValue {
        &self.value
    }

    /// Stores NULL, or the implicit default when the column forbids NULL
    /// and the caller allows the substitution.
    pub fn store_null(&mut self, no_conversions: bool) -> SaveStatus {
        if self.column.nullable() {
            self.value = OwnedValue::Null;
            return SaveStatus::Ok;
        }
        if no_conversions {
            return SaveStatus::NoConversion;
        }
        self.value = self.implicit_default();
        SaveStatus::Truncated
    }

    /// Stores an integer, clamping to the column's declared width.
    /// String-family columns store the rendered form instead.
    pub fn store_int(&mut self, value: i64) -> SaveStatus {
        if self.is_string_family() {
            return self.store_text(&value.to_string());
        }
        let (clamped, status) = match self.column.real_type() {
            TypeCode::Tiny => self.clamp_int(value, -128, 127, 255),
            TypeCode::Short => self.clamp_int(value, -32_768, 32_767, 65_535),
            TypeCode::Int24 => self.clamp_int(value, -8_388_608, 8_388_607, 16_777_215),
            TypeCode::Long => self.clamp_int(value, i32::MIN as i64, i32::MAX as i64, u32::MAX as i64),
            TypeCode::Year => clamp_year(value),
            TypeCode::Bit => self.mask_bits(value),
            _ => {
                if self.column.unsigned() && value < 0 {
                    (0, SaveStatus::Truncated)
                } else {
                    (value, SaveStatus::Ok)
                }
            }
        };
        self.value = OwnedValue::Int(clamped);
        status
    }

    /// Stores a float; float-width columns narrow to f32 precision.
    pub fn store_real(&mut self, value: f64) -> SaveStatus {
        if self.is_string_family() {
            return self.store_text(&value.to_string());
        }
        let stored = if self.column.real_type() == TypeCode::Float {
            value as f32 as f64
        } else {
            value
        };
        self.value = OwnedValue::Float(stored);
        if stored == value {
            SaveStatus::Ok
        } else {
            SaveStatus::Truncated
        }
    }

    /// Stores a decimal rescaled to the column's declared scale.
    pub fn store_decimal(&mut self, digits: i128, scale: i16) -> SaveStatus {
        if self.is_string_family() {
            return self.store_text(&decimal::to_string(digits, scale));
        }
        let target_scale = self.column.decimals() as i16;
        let rescaled = decimal::rescale(digits, scale, target_scale);
        self.value = OwnedValue::Decimal {
            digits: rescaled,
            scale: target_scale,
        };
        if decimal::rescale(rescaled, target_scale, scale) == digits {
            SaveStatus::Ok
        } else {
            SaveStatus::Truncated
        }
    }

    /// Stores text, cut at the column's declared octet length (on a
    /// character boundary).
    pub fn store_text(&mut self, text: &str) -> SaveStatus {
        let capacity = self.column.field_length();
        if capacity == 0 || text.len() as u32 <= capacity {
            self.value = OwnedValue::Text(text.to_string());
            return SaveStatus::Ok;
        }
        let mut cut = capacity as usize;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        self.value = OwnedValue::Text(text[..cut].to_string());
        SaveStatus::Truncated
    }

    /// Stores a packed temporal value.
    pub fn store_temporal(&mut self, micros: i64) -> SaveStatus {
        if self.is_string_family() {
            return self.store_text(&temporal::format_datetime(micros, self.column.decimals()));
        }
        self.value = OwnedValue::Temporal { micros };
        SaveStatus::Ok
    }

    fn is_string_family(&self) -> bool {
        let code = self.column.real_type();
        code.is_blob()
            || matches!(
                code,
                TypeCode::Varchar | TypeCode::VarString | TypeCode::String | TypeCode::Geometry
            )
    }

    fn clamp_int(&self, value: i64, min: i64, max: i64, unsigned_max: i64) -> (i64, SaveStatus) {
        let (lo, hi) = if self.column.unsigned() {
            (0, unsigned_max)
        } else {
            (min, max)
        };
        let clamped = value.clamp(lo, hi);
        if clamped == value {
            (value, SaveStatus::Ok)
        } else {
            (clamped, SaveStatus::Truncated)
        }
    }

    fn mask_bits(&self, value: i64) -> (i64, SaveStatus) {
        let bits = self.column.field_length().min(63);
        if bits == 0 || bits >= 63 {
            return (value, SaveStatus::Ok);
        }
        let mask = (1i64 << bits) - 1;
        let masked = value & mask;
        if masked == value {
            (value, SaveStatus::Ok)
        } else {
            (masked, SaveStatus::Truncated)
        }
    }

    fn implicit_default(&self) -> OwnedValue {
        match self.column.real_type() {
            TypeCode::Varchar
            | TypeCode::VarString
            | TypeCode::String
            | TypeCode::Enum
            | TypeCode::Set
            | TypeCode::TinyBlob
            | TypeCode::Blob
            | TypeCode::MediumBlob
            | TypeCode::LongBlob => OwnedValue::Text(String::new()),
            TypeCode::Float | TypeCode::Double => OwnedValue::Float(0.0),
            TypeCode::Decimal | TypeCode::NewDecimal => OwnedValue::Decimal {
                digits: 0,
                scale: self.column.decimals() as i16,
            },
            code if code.is_temporal() => OwnedValue::Temporal { micros: 0 },
            _ => OwnedValue::Int(0),
        }
    }
}

fn clamp_year(value: i64) -> (i64, SaveStatus) {
    if value == 0 || (1901..=2155).contains(&value) {
        (value, SaveStatus::Ok)
    } else {
        (0, SaveStatus::Truncated)
    }
}
