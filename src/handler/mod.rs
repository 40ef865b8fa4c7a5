//! # Type Handlers
//!
//! The behavioral core of the type system: one immutable singleton
//! handler per concrete SQL type, dispatched through the `TypeHandler`
//! trait. A handler decides how its type builds conversion-field shapes,
//! saves evaluated values into fields, compares, caches, resolves MIN/MAX
//! result types, and hex-formats.
//!
//! ## Module Structure
//!
//! - `registry`: The process-wide lookup functions (by declared code, by
//!   storage code, by comparison category, by string length)
//! - `conversion`: Conversion-field descriptors and metadata decode
//! - `numeric`: Integer, float and decimal handlers
//! - `temporal`: Date/time handlers, legacy and fractional
//! - `string`: Char/varchar, blob family, enum/set, null, geometry
//! - `row`: The structural row handler
//!
//! ## Dispatch Model
//!
//! Handlers are stateless unit structs behind `&'static dyn TypeHandler`.
//! Most capability methods are category-generic and live here as default
//! trait methods that switch on [`CmpCategory`]; concrete handlers
//! override only where their type genuinely diverges (conversion-field
//! decode always, the time-of-day save path, declared-type reporting for
//! enum/set). Adding a type means adding one unit struct, its singleton,
//! and its registry arms.
//!
//! ## Concurrency
//!
//! Singletons are constructed before any query runs and never mutated;
//! every method takes `&self` and may be called from any number of
//! sessions concurrently without locking.

use crate::aggregate::HybridTypeBinding;
use crate::cache::ValueCache;
use crate::compare::Comparator;
use crate::expr::Expr;
use crate::schema::Column;
use crate::store::{FieldSlot, SaveStatus};
use crate::types::{CmpCategory, TypeCode};
use bumpalo::Bump;
use std::fmt;

pub mod conversion;
pub mod registry;

mod numeric;
mod row;
mod string;
mod temporal;

pub use conversion::ConversionField;

/// Behavioral contract of one SQL type.
///
/// Implementations are stateless singletons; identity questions go
/// through [`TypeHandler::real_type`], never pointer comparison.
pub trait TypeHandler: fmt::Debug + Send + Sync {
    /// Storage-level type code this handler represents.
    fn real_type(&self) -> TypeCode;

    /// Declared type code this handler reports to the wire layer.
    fn field_type(&self) -> TypeCode {
        self.real_type()
    }

    /// Lower-case SQL name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Semantic category; fixed at construction, drives every default
    /// dispatch below.
    fn cmp_category(&self) -> CmpCategory;

    /// Builds a throwaway conversion-field shape from packed metadata,
    /// for a compatibility check against `target`. `None` means the
    /// described column cannot be reconstructed (the caller decides
    /// whether the enclosing operation can proceed).
    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>>;

    /// Saves an evaluated expression value into a field slot. The
    /// conversion path follows this handler's category because the
    /// value's runtime representation, not the slot's declared type,
    /// decides which coercion is numerically correct.
    fn save_in_field(
        &self,
        expr: &dyn Expr,
        slot: &mut FieldSlot<'_>,
        no_conversions: bool,
    ) -> SaveStatus {
        let value = expr.eval();
        if value.is_null() {
            return slot.store_null(no_conversions);
        }
        match self.cmp_category() {
            CmpCategory::Integer => match value.as_int() {
                Ok(v) => slot.store_int(v),
                Err(_) => SaveStatus::NoConversion,
            },
            CmpCategory::Real => match value.as_real() {
                Ok(v) => slot.store_real(v),
                Err(_) => SaveStatus::NoConversion,
            },
            CmpCategory::Decimal => match value.as_decimal() {
                Ok((digits, scale)) => slot.store_decimal(digits, scale),
                Err(_) => SaveStatus::NoConversion,
            },
            CmpCategory::Str => match value.render_text() {
                Ok(text) => slot.store_text(&text),
                Err(_) => SaveStatus::NoConversion,
            },
            CmpCategory::Temporal => match value.as_temporal() {
                Ok(micros) => slot.store_temporal(micros),
                Err(_) => SaveStatus::NoConversion,
            },
            CmpCategory::Row => unreachable!("row values are never stored in a field"),
        }
    }

    /// Installs this handler's comparison strategy into a comparator
    /// being bound for an operand pair. Returns false when setup fails
    /// (row arity mismatch); scalar strategies always succeed.
    fn set_comparator(&self, cmp: &mut Comparator, left: &dyn Expr, right: &dyn Expr) -> bool {
        match self.cmp_category() {
            CmpCategory::Integer => cmp.install_int(),
            CmpCategory::Real => cmp.install_real(),
            CmpCategory::Decimal => cmp.install_decimal(),
            CmpCategory::Str => cmp.install_str(left.collation()),
            CmpCategory::Temporal => cmp.install_temporal(),
            CmpCategory::Row => cmp.install_row(left, right),
        }
    }

    /// Builds the value cache for an expression of this type. Integer and
    /// temporal caches remember the concrete declared type so the cached
    /// value re-materializes exactly; string caches keep the originating
    /// collation; row caches recurse per element.
    fn make_cache(&self, expr: &dyn Expr) -> ValueCache {
        match self.cmp_category() {
            CmpCategory::Integer => ValueCache::int(expr.type_code()),
            CmpCategory::Real => ValueCache::real(),
            CmpCategory::Decimal => ValueCache::decimal(),
            CmpCategory::Str => ValueCache::str(expr.collation()),
            CmpCategory::Temporal => ValueCache::temporal(expr.type_code()),
            CmpCategory::Row => ValueCache::row(
                expr.row_elements()
                    .iter()
                    .map(|element| Box::new(element.handler().make_cache(element.as_ref())))
                    .collect(),
            ),
        }
    }

    /// Fixes the result type of a MIN/MAX-style aggregate over `arg`.
    /// The result is always nullable: an empty group yields NULL no
    /// matter what the argument declares.
    fn fix_hybrid_aggregate(&self, agg: &mut HybridTypeBinding, arg: &dyn Expr) {
        agg.copy_attributes(arg);
        agg.force_nullable();
        match self.cmp_category() {
            CmpCategory::Integer => {
                agg.adopt_numeric(arg, registry::by_cmp_category(CmpCategory::Integer));
            }
            CmpCategory::Decimal => {
                agg.adopt_numeric(arg, registry::by_cmp_category(CmpCategory::Decimal));
            }
            CmpCategory::Real => {
                agg.adopt_numeric(arg, registry::by_cmp_category(CmpCategory::Real));
                agg.set_max_length(crate::aggregate::float_display_length(agg.decimals()));
            }
            CmpCategory::Str => {
                if arg.source_column().is_some() {
                    // Columns keep their declared type; enum/set columns
                    // declare as fixed-length char and convert that way.
                    agg.set_handler_by_field_type(arg.type_code());
                } else {
                    agg.set_handler(registry::adjusted_to_max_octet_length(
                        agg.max_length(),
                        agg.collation(),
                    ));
                }
            }
            CmpCategory::Temporal => {
                agg.set_handler(arg.handler());
            }
            CmpCategory::Row => unreachable!("row values cannot feed a MIN/MAX aggregate"),
        }
    }

    /// Hex rendering of an evaluated value: integers format their bits,
    /// real and decimal values round first, strings and temporals encode
    /// their rendered bytes. `None` for NULL.
    fn hex_text(&self, expr: &dyn Expr) -> Option<String> {
        let value = expr.eval();
        if value.is_null() {
            return None;
        }
        match self.cmp_category() {
            CmpCategory::Integer => value.as_int().ok().map(|v| format!("{:X}", v as u64)),
            CmpCategory::Real | CmpCategory::Decimal => value
                .as_real()
                .ok()
                .map(|v| format!("{:X}", v.round() as i64 as u64)),
            CmpCategory::Str | CmpCategory::Temporal => value.render_text().ok().map(|text| {
                text.bytes().map(|b| format!("{:02X}", b)).collect()
            }),
            CmpCategory::Row => unreachable!("row values have no hex rendering"),
        }
    }
}
