//! # Numeric Type Handlers
//!
//! Integer widths, floats and the two decimal generations. Integer
//! conversion shapes use the fixed display lengths of their width; the
//! sign is copied from the target because the description protocol never
//! carries it. The legacy decimal format cannot be reconstructed at all
//! and reports a diagnostic instead.

use super::conversion::{bit_max_length, decimal_display_length, ConversionField};
use super::TypeHandler;
use crate::schema::Column;
use crate::types::{CmpCategory, TypeCode};
use bumpalo::Bump;

pub(crate) static TINY: TinyHandler = TinyHandler;
pub(crate) static SHORT: ShortHandler = ShortHandler;
pub(crate) static INT24: Int24Handler = Int24Handler;
pub(crate) static LONG: LongHandler = LongHandler;
pub(crate) static LONGLONG: LongLongHandler = LongLongHandler;
pub(crate) static YEAR: YearHandler = YearHandler;
pub(crate) static BIT: BitHandler = BitHandler;
pub(crate) static FLOAT: FloatHandler = FloatHandler;
pub(crate) static DOUBLE: DoubleHandler = DoubleHandler;
pub(crate) static OLD_DECIMAL: OldDecimalHandler = OldDecimalHandler;
pub(crate) static NEW_DECIMAL: NewDecimalHandler = NewDecimalHandler;

#[derive(Debug)]
pub struct TinyHandler;

#[derive(Debug)]
pub struct ShortHandler;

#[derive(Debug)]
pub struct Int24Handler;

#[derive(Debug)]
pub struct LongHandler;

#[derive(Debug)]
pub struct LongLongHandler;

#[derive(Debug)]
pub struct YearHandler;

#[derive(Debug)]
pub struct BitHandler;

#[derive(Debug)]
pub struct FloatHandler;

#[derive(Debug)]
pub struct DoubleHandler;

#[derive(Debug)]
pub struct OldDecimalHandler;

#[derive(Debug)]
pub struct NewDecimalHandler;

macro_rules! integer_handler {
    ($struct_name:ident, $code:ident, $name:literal, $display_len:literal) => {
        impl TypeHandler for $struct_name {
            fn real_type(&self) -> TypeCode {
                TypeCode::$code
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn cmp_category(&self) -> CmpCategory {
                CmpCategory::Integer
            }

            fn make_conversion_field<'a>(
                &self,
                arena: &'a Bump,
                _metadata: u16,
                target: &'a Column,
            ) -> Option<&'a ConversionField<'a>> {
                // Sign is assumed equal on both sides; the describer
                // does not transmit it.
                Some(ConversionField::numeric(
                    arena,
                    TypeCode::$code,
                    $display_len,
                    target.unsigned(),
                ))
            }
        }
    };
}

integer_handler!(TinyHandler, Tiny, "tinyint", 4);
integer_handler!(ShortHandler, Short, "smallint", 6);
integer_handler!(Int24Handler, Int24, "mediumint", 9);
integer_handler!(LongHandler, Long, "int", 11);
integer_handler!(LongLongHandler, LongLong, "bigint", 20);

impl TypeHandler for YearHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Year
    }

    fn name(&self) -> &'static str {
        "year"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Integer
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::numeric(arena, TypeCode::Year, 4, true))
    }
}

impl TypeHandler for BitHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Bit
    }

    fn name(&self) -> &'static str {
        "bit"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Integer
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::bits(arena, bit_max_length(metadata)))
    }
}

impl TypeHandler for FloatHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Float
    }

    fn name(&self) -> &'static str {
        "float"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Real
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::numeric(arena, TypeCode::Float, 12, false))
    }
}

impl TypeHandler for DoubleHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Double
    }

    fn name(&self) -> &'static str {
        "double"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Real
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::numeric(arena, TypeCode::Double, 22, false))
    }
}

impl TypeHandler for OldDecimalHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Decimal
    }

    fn name(&self) -> &'static str {
        "old_decimal"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Decimal
    }

    fn make_conversion_field<'a>(
        &self,
        _arena: &'a Bump,
        _metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        log::error!(
            "received an old-format decimal column description while checking row-image \
             compatibility; the peer column cannot be reconstructed. Alter column {} \
             to the new decimal storage format.",
            target.qualified_name()
        );
        None
    }
}

impl TypeHandler for NewDecimalHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::NewDecimal
    }

    fn name(&self) -> &'static str {
        "decimal"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Decimal
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        let precision = (metadata >> 8) as u32;
        let scale = (metadata & 0xff) as u32;
        Some(ConversionField::decimal(
            arena,
            decimal_display_length(precision, scale),
            scale as u8,
        ))
    }
}
