//! # Row Handler
//!
//! The structural handler for row values (tuple-valued expressions, as
//! produced by row comparisons and subquery rows). Rows never appear as
//! stored columns, so the conversion-field path is unreachable; every
//! other capability dispatches through the `Row` category defaults,
//! which recurse element-wise.

use super::conversion::ConversionField;
use super::TypeHandler;
use crate::schema::Column;
use crate::types::{CmpCategory, TypeCode};
use bumpalo::Bump;

pub(crate) static ROW: RowHandler = RowHandler;

#[derive(Debug)]
pub struct RowHandler;

impl TypeHandler for RowHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Row
    }

    fn name(&self) -> &'static str {
        "row"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Row
    }

    fn make_conversion_field<'a>(
        &self,
        _arena: &'a Bump,
        _metadata: u16,
        _target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        unreachable!("row values never appear in a column description")
    }
}
