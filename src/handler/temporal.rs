//! # Temporal Type Handlers
//!
//! Date/time handlers in both generations: the legacy fixed-width codes
//! and the fractional-seconds variants. For the legacy codes the peer's
//! metadata carries nothing, so fractional digits come from the target
//! column; the fractional variants carry their precision in the metadata
//! byte itself. Time-of-day handlers override the save path to drop the
//! day part.

use super::conversion::ConversionField;
use super::TypeHandler;
use crate::expr::Expr;
use crate::schema::Column;
use crate::store::{FieldSlot, SaveStatus};
use crate::types::{temporal, CmpCategory, TypeCode};
use bumpalo::Bump;

pub(crate) static TIME: TimeHandler = TimeHandler;
pub(crate) static TIME2: Time2Handler = Time2Handler;
pub(crate) static DATE: DateHandler = DateHandler;
pub(crate) static NEWDATE: NewDateHandler = NewDateHandler;
pub(crate) static DATETIME: DateTimeHandler = DateTimeHandler;
pub(crate) static DATETIME2: DateTime2Handler = DateTime2Handler;
pub(crate) static TIMESTAMP: TimestampHandler = TimestampHandler;
pub(crate) static TIMESTAMP2: Timestamp2Handler = Timestamp2Handler;

#[derive(Debug)]
pub struct TimeHandler;

#[derive(Debug)]
pub struct Time2Handler;

#[derive(Debug)]
pub struct DateHandler;

#[derive(Debug)]
pub struct NewDateHandler;

#[derive(Debug)]
pub struct DateTimeHandler;

#[derive(Debug)]
pub struct DateTime2Handler;

#[derive(Debug)]
pub struct TimestampHandler;

#[derive(Debug)]
pub struct Timestamp2Handler;

/// Save override shared by the time-of-day handlers: only the intra-day
/// part of the value reaches the slot.
fn save_time_of_day(
    expr: &dyn Expr,
    slot: &mut FieldSlot<'_>,
    no_conversions: bool,
) -> SaveStatus {
    let value = expr.eval();
    if value.is_null() {
        return slot.store_null(no_conversions);
    }
    match value.as_temporal() {
        Ok(micros) => slot.store_temporal(temporal::time_of_day(micros)),
        Err(_) => SaveStatus::NoConversion,
    }
}

/// Legacy codes describe no fractional precision of their own; the shape
/// is rebuilt from the target's declared digits.
macro_rules! legacy_temporal_handler {
    ($struct_name:ident, $code:ident, $name:literal) => {
        impl TypeHandler for $struct_name {
            fn real_type(&self) -> TypeCode {
                TypeCode::$code
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn cmp_category(&self) -> CmpCategory {
                CmpCategory::Temporal
            }

            fn make_conversion_field<'a>(
                &self,
                arena: &'a Bump,
                _metadata: u16,
                target: &'a Column,
            ) -> Option<&'a ConversionField<'a>> {
                Some(ConversionField::temporal(
                    arena,
                    TypeCode::$code,
                    target.decimals(),
                ))
            }
        }
    };
}

/// Fractional variants carry their precision in the metadata byte.
macro_rules! fractional_temporal_handler {
    ($struct_name:ident, $code:ident, $name:literal) => {
        impl TypeHandler for $struct_name {
            fn real_type(&self) -> TypeCode {
                TypeCode::$code
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn cmp_category(&self) -> CmpCategory {
                CmpCategory::Temporal
            }

            fn make_conversion_field<'a>(
                &self,
                arena: &'a Bump,
                metadata: u16,
                _target: &'a Column,
            ) -> Option<&'a ConversionField<'a>> {
                Some(ConversionField::temporal(
                    arena,
                    TypeCode::$code,
                    metadata as u8,
                ))
            }
        }
    };
}

legacy_temporal_handler!(TimestampHandler, Timestamp, "timestamp");
fractional_temporal_handler!(Timestamp2Handler, Timestamp2, "timestamp");
legacy_temporal_handler!(DateTimeHandler, DateTime, "datetime");
fractional_temporal_handler!(DateTime2Handler, DateTime2, "datetime");

impl TypeHandler for DateHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Date
    }

    fn name(&self) -> &'static str {
        "date"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Temporal
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::temporal(arena, TypeCode::Date, 0))
    }
}

impl TypeHandler for NewDateHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::NewDate
    }

    fn name(&self) -> &'static str {
        "date"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Temporal
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::temporal(arena, TypeCode::NewDate, 0))
    }
}

impl TypeHandler for TimeHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Time
    }

    fn name(&self) -> &'static str {
        "time"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Temporal
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::temporal(
            arena,
            TypeCode::Time,
            target.decimals(),
        ))
    }

    fn save_in_field(
        &self,
        expr: &dyn Expr,
        slot: &mut FieldSlot<'_>,
        no_conversions: bool,
    ) -> SaveStatus {
        save_time_of_day(expr, slot, no_conversions)
    }
}

impl TypeHandler for Time2Handler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Time2
    }

    fn name(&self) -> &'static str {
        "time"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Temporal
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::temporal(
            arena,
            TypeCode::Time2,
            metadata as u8,
        ))
    }

    fn save_in_field(
        &self,
        expr: &dyn Expr,
        slot: &mut FieldSlot<'_>,
        no_conversions: bool,
    ) -> SaveStatus {
        save_time_of_day(expr, slot, no_conversions)
    }
}
