//! # Wire Type Codes
//!
//! This module provides the `TypeCode` enum: the stable single-byte type
//! discriminants shared with the wire protocol and the storage layer.
//!
//! ## Design Principles
//!
//! 1. **Wire-stable**: Discriminant values are a compatibility contract
//!    with the schema-description protocol and must never be renumbered
//! 2. **Storage-efficient**: `#[repr(u8)]` for single-byte encoding
//! 3. **Two roles, one domain**: The same codes serve as the declared
//!    ("field") type of a column and as its finer storage ("real") type;
//!    the registry lookups differ in mapping, not in domain
//!
//! ## Code Ranges
//!
//! | Range | Types |
//! |-------|-------|
//! | 0-16 | Classic numeric, temporal and varchar codes |
//! | 17-19 | Fractional-seconds temporal variants |
//! | 246-255 | New decimal, enum/set, blob family, string, geometry |
//!
//! Legacy codes (`Decimal`, `Timestamp`, `Date`, `Time`, `DateTime`) remain
//! decodable because old peers still emit them; the declared-type registry
//! maps them to their modern representatives.

use eyre::Result;

/// Single-byte type code shared with the wire/storage layer.
///
/// Uses `#[repr(u8)]` so the discriminant is exactly the protocol byte.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Decimal = 0,
    Tiny = 1,
    Short = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    Null = 6,
    Timestamp = 7,
    LongLong = 8,
    Int24 = 9,
    Date = 10,
    Time = 11,
    DateTime = 12,
    Year = 13,
    NewDate = 14,
    Varchar = 15,
    Bit = 16,
    Timestamp2 = 17,
    DateTime2 = 18,
    Time2 = 19,
    /// Internal-only: row values never travel as column types; the code
    /// sits in the protocol's reserved range.
    Row = 200,
    NewDecimal = 246,
    Enum = 247,
    Set = 248,
    TinyBlob = 249,
    MediumBlob = 250,
    LongBlob = 251,
    Blob = 252,
    VarString = 253,
    String = 254,
    Geometry = 255,
}

impl TypeCode {
    /// Returns true for the blob family (any length-prefix width).
    pub fn is_blob(&self) -> bool {
        matches!(
            self,
            TypeCode::TinyBlob | TypeCode::Blob | TypeCode::MediumBlob | TypeCode::LongBlob
        )
    }

    /// Returns true for date/time codes, legacy and fractional alike.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            TypeCode::Timestamp
                | TypeCode::Timestamp2
                | TypeCode::Date
                | TypeCode::NewDate
                | TypeCode::Time
                | TypeCode::Time2
                | TypeCode::DateTime
                | TypeCode::DateTime2
        )
    }
}

impl TryFrom<u8> for TypeCode {
    type Error = eyre::Report;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(TypeCode::Decimal),
            1 => Ok(TypeCode::Tiny),
            2 => Ok(TypeCode::Short),
            3 => Ok(TypeCode::Long),
            4 => Ok(TypeCode::Float),
            5 => Ok(TypeCode::Double),
            6 => Ok(TypeCode::Null),
            7 => Ok(TypeCode::Timestamp),
            8 => Ok(TypeCode::LongLong),
            9 => Ok(TypeCode::Int24),
            10 => Ok(TypeCode::Date),
            11 => Ok(TypeCode::Time),
            12 => Ok(TypeCode::DateTime),
            13 => Ok(TypeCode::Year),
            14 => Ok(TypeCode::NewDate),
            15 => Ok(TypeCode::Varchar),
            16 => Ok(TypeCode::Bit),
            17 => Ok(TypeCode::Timestamp2),
            18 => Ok(TypeCode::DateTime2),
            19 => Ok(TypeCode::Time2),
            200 => Ok(TypeCode::Row),
            246 => Ok(TypeCode::NewDecimal),
            247 => Ok(TypeCode::Enum),
            248 => Ok(TypeCode::Set),
            249 => Ok(TypeCode::TinyBlob),
            250 => Ok(TypeCode::MediumBlob),
            251 => Ok(TypeCode::LongBlob),
            252 => Ok(TypeCode::Blob),
            253 => Ok(TypeCode::VarString),
            254 => Ok(TypeCode::String),
            255 => Ok(TypeCode::Geometry),
            _ => eyre::bail!("invalid type code discriminant: {}", value),
        }
    }
}
