//! # Handler Registry
//!
//! The process-wide lookup surface over the type-handler singletons. Two
//! total functions map the two type-code roles onto handlers:
//!
//! - **Declared (field) lookup**: what a column reports to the wire
//!   layer. Legacy temporal codes resolve to their fractional-variant
//!   representatives, enum/set/var-string collapse into their declared
//!   string shapes.
//! - **Storage (real) lookup**: the finer discriminator. Enum, set and
//!   the legacy temporal codes keep their own handlers here.
//!
//! Both are total over the defined code domain; the only `None` outcome
//! is a feature compiled out of this build (geometry). Callers must treat
//! that as a hard "unsupported type" — substituting a different handler
//! is never correct.
//!
//! A third lookup returns the canonical representative of a comparison
//! category, for contexts that know only the semantic category of an
//! expression. The string representative is deliberately the long-blob
//! handler: a string result of unknown length gets worst-case sizing,
//! unlike the length-driven pick of [`string_type_handler`].

use super::numeric;
use super::row;
use super::string;
use super::temporal;
use super::TypeHandler;
use crate::charset::{Charset, CONVERT_IF_BIGGER_TO_BLOB};
use crate::types::{CmpCategory, TypeCode};

/// Handler for a declared (wire-visible) type code. `None` only for
/// codes whose support is compiled out.
pub fn by_field_type(code: TypeCode) -> Option<&'static dyn TypeHandler> {
    match code {
        TypeCode::Decimal => Some(&numeric::OLD_DECIMAL),
        TypeCode::NewDecimal => Some(&numeric::NEW_DECIMAL),
        TypeCode::Tiny => Some(&numeric::TINY),
        TypeCode::Short => Some(&numeric::SHORT),
        TypeCode::Long => Some(&numeric::LONG),
        TypeCode::LongLong => Some(&numeric::LONGLONG),
        TypeCode::Int24 => Some(&numeric::INT24),
        TypeCode::Year => Some(&numeric::YEAR),
        TypeCode::Bit => Some(&numeric::BIT),
        TypeCode::Float => Some(&numeric::FLOAT),
        TypeCode::Double => Some(&numeric::DOUBLE),
        TypeCode::Null => Some(&string::NULL),
        TypeCode::Varchar => Some(&string::VARCHAR),
        TypeCode::TinyBlob => Some(&string::TINY_BLOB),
        TypeCode::MediumBlob => Some(&string::MEDIUM_BLOB),
        TypeCode::LongBlob => Some(&string::LONG_BLOB),
        TypeCode::Blob => Some(&string::BLOB),
        // The declared type of a var-string column is varchar.
        TypeCode::VarString => Some(&string::VARCHAR),
        // Enum and set columns declare themselves as fixed-length char.
        TypeCode::String | TypeCode::Enum | TypeCode::Set => Some(&string::STRING),
        #[cfg(feature = "geometry")]
        TypeCode::Geometry => Some(&string::GEOMETRY),
        #[cfg(not(feature = "geometry"))]
        TypeCode::Geometry => None,
        // Legacy temporal codes resolve to their fractional successors.
        TypeCode::Timestamp | TypeCode::Timestamp2 => Some(&temporal::TIMESTAMP2),
        TypeCode::Date | TypeCode::NewDate => Some(&temporal::NEWDATE),
        TypeCode::Time | TypeCode::Time2 => Some(&temporal::TIME2),
        TypeCode::DateTime | TypeCode::DateTime2 => Some(&temporal::DATETIME2),
        TypeCode::Row => Some(&row::ROW),
    }
}

/// Handler for a storage-level type code. `None` only for codes whose
/// support is compiled out.
pub fn by_real_type(code: TypeCode) -> Option<&'static dyn TypeHandler> {
    match code {
        TypeCode::Decimal => Some(&numeric::OLD_DECIMAL),
        TypeCode::NewDecimal => Some(&numeric::NEW_DECIMAL),
        TypeCode::Tiny => Some(&numeric::TINY),
        TypeCode::Short => Some(&numeric::SHORT),
        TypeCode::Long => Some(&numeric::LONG),
        TypeCode::LongLong => Some(&numeric::LONGLONG),
        TypeCode::Int24 => Some(&numeric::INT24),
        TypeCode::Year => Some(&numeric::YEAR),
        TypeCode::Bit => Some(&numeric::BIT),
        TypeCode::Float => Some(&numeric::FLOAT),
        TypeCode::Double => Some(&numeric::DOUBLE),
        TypeCode::Null => Some(&string::NULL),
        TypeCode::Varchar => Some(&string::VARCHAR),
        TypeCode::TinyBlob => Some(&string::TINY_BLOB),
        TypeCode::MediumBlob => Some(&string::MEDIUM_BLOB),
        TypeCode::LongBlob => Some(&string::LONG_BLOB),
        TypeCode::Blob => Some(&string::BLOB),
        // Var-string stores with fixed-char layout.
        TypeCode::VarString => Some(&string::STRING),
        TypeCode::String => Some(&string::STRING),
        TypeCode::Enum => Some(&string::ENUM),
        TypeCode::Set => Some(&string::SET),
        #[cfg(feature = "geometry")]
        TypeCode::Geometry => Some(&string::GEOMETRY),
        #[cfg(not(feature = "geometry"))]
        TypeCode::Geometry => None,
        TypeCode::Timestamp => Some(&temporal::TIMESTAMP),
        TypeCode::Timestamp2 => Some(&temporal::TIMESTAMP2),
        TypeCode::Date => Some(&temporal::DATE),
        TypeCode::NewDate => Some(&temporal::NEWDATE),
        TypeCode::Time => Some(&temporal::TIME),
        TypeCode::Time2 => Some(&temporal::TIME2),
        TypeCode::DateTime => Some(&temporal::DATETIME),
        TypeCode::DateTime2 => Some(&temporal::DATETIME2),
        TypeCode::Row => Some(&row::ROW),
    }
}

/// Canonical representative handler for a comparison category. Used when
/// only the semantic category of an expression is known.
pub fn by_cmp_category(category: CmpCategory) -> &'static dyn TypeHandler {
    match category {
        CmpCategory::Integer => &numeric::LONGLONG,
        CmpCategory::Real => &numeric::DOUBLE,
        CmpCategory::Decimal => &numeric::NEW_DECIMAL,
        // Worst-case sizing: an unknown-length string result may not fit
        // anything smaller.
        CmpCategory::Str => &string::LONG_BLOB,
        CmpCategory::Temporal => &temporal::DATETIME,
        CmpCategory::Row => &row::ROW,
    }
}

/// String handler for materializing a string result of a known octet
/// length with no originating column.
pub fn string_type_handler(max_octet_length: u32) -> &'static dyn TypeHandler {
    if max_octet_length >= 16_777_216 {
        &string::LONG_BLOB
    } else if max_octet_length >= 65_536 {
        &string::MEDIUM_BLOB
    } else {
        &string::VARCHAR
    }
}

/// Like [`string_type_handler`], but prefers an inline varchar while the
/// value fits one, and plain blob (not varchar) as the smallest
/// out-of-line tier.
pub fn adjusted_to_max_octet_length(
    max_octet_length: u32,
    cs: &Charset,
) -> &'static dyn TypeHandler {
    if cs.char_capacity(max_octet_length) <= CONVERT_IF_BIGGER_TO_BLOB {
        return &string::VARCHAR;
    }
    if max_octet_length >= 16_777_216 {
        &string::LONG_BLOB
    } else if max_octet_length >= 65_536 {
        &string::MEDIUM_BLOB
    } else {
        &string::BLOB
    }
}
