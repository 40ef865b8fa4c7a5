//! # Typed Expression Collaborators
//!
//! The type dispatch layer never evaluates SQL itself; it inspects
//! already-bound expressions through the `Expr` trait: declared type,
//! standard attributes (length, decimals, collation), the evaluated
//! value, and — the one capability question that changes typing rules —
//! whether the expression is a direct reference to a stored column.
//!
//! Two lightweight implementations live here: `ColumnExpr` for direct
//! column references and `LiteralExpr` for computed/constant values. An
//! executor with its own expression tree implements `Expr` on its nodes
//! instead.

use crate::charset::{self, Charset};
use crate::handler::{registry, TypeHandler};
use crate::schema::Column;
use crate::types::{decimal, temporal, OwnedValue, TypeCode, Value};
use std::sync::Arc;

/// Read-only view of a bound, typed expression.
pub trait Expr {
    /// Declared type code of the expression result.
    fn type_code(&self) -> TypeCode;

    /// Handler for the declared type. A code can only be missing from the
    /// registry when its feature is compiled out, and such expressions
    /// cannot have been bound, so this lookup is infallible here.
    fn handler(&self) -> &'static dyn TypeHandler {
        registry::by_field_type(self.type_code())
            .expect("bound expression has a compiled-out type")
    }

    /// Maximum result length in octets.
    fn max_length(&self) -> u32;

    /// Fractional digits of the result.
    fn decimals(&self) -> u8;

    fn unsigned(&self) -> bool {
        false
    }

    /// Result collation.
    fn collation(&self) -> &'static Charset;

    /// The stored column this expression directly references, if any.
    /// This is a capability question, not a type question: a computed
    /// expression over a column still answers `None`.
    fn source_column(&self) -> Option<&Column>;

    /// Evaluates the expression.
    fn eval(&self) -> Value<'_>;

    /// Element expressions of a row value; empty for scalars.
    fn row_elements(&self) -> &[Box<dyn Expr>] {
        &[]
    }
}

/// Direct reference to a stored column, carrying the current row's value.
pub struct ColumnExpr {
    column: Arc<Column>,
    value: OwnedValue,
}

impl ColumnExpr {
    pub fn new(column: Arc<Column>, value: OwnedValue) -> Self {
        Self { column, value }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }
}

impl Expr for ColumnExpr {
    fn type_code(&self) -> TypeCode {
        self.column.field_type()
    }

    fn max_length(&self) -> u32 {
        self.column.field_length()
    }

    fn decimals(&self) -> u8 {
        self.column.decimals()
    }

    fn unsigned(&self) -> bool {
        self.column.unsigned()
    }

    fn collation(&self) -> &'static Charset {
        self.column.charset()
    }

    fn source_column(&self) -> Option<&Column> {
        Some(&self.column)
    }

    fn eval(&self) -> Value<'_> {
        self.value.as_value()
    }
}

/// Constant or computed value with explicit type attributes.
pub struct LiteralExpr {
    type_code: TypeCode,
    value: OwnedValue,
    max_length: u32,
    decimals: u8,
    unsigned: bool,
    collation: &'static Charset,
}

impl LiteralExpr {
    pub fn int(value: i64) -> Self {
        Self {
            type_code: TypeCode::LongLong,
            max_length: 20,
            decimals: 0,
            unsigned: false,
            collation: &charset::BINARY,
            value: OwnedValue::Int(value),
        }
    }

    pub fn real(value: f64) -> Self {
        Self {
            type_code: TypeCode::Double,
            max_length: 22,
            decimals: crate::aggregate::NOT_FIXED_DEC,
            unsigned: false,
            collation: &charset::BINARY,
            value: OwnedValue::Float(value),
        }
    }

    pub fn decimal(digits: i128, scale: i16) -> Self {
        let scale_u = scale.max(0) as u32;
        Self {
            type_code: TypeCode::NewDecimal,
            max_length: decimal::precision_to_length(
                decimal::digit_count(digits).max(scale_u),
                scale_u,
                false,
            ),
            decimals: scale_u as u8,
            unsigned: false,
            collation: &charset::BINARY,
            value: OwnedValue::Decimal { digits, scale },
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            type_code: TypeCode::Varchar,
            max_length: value.len() as u32,
            decimals: 0,
            unsigned: false,
            collation: &charset::UTF8MB4,
            value: OwnedValue::Text(value),
        }
    }

    pub fn temporal(type_code: TypeCode, micros: i64) -> Self {
        Self {
            type_code,
            max_length: temporal::fractional_width(temporal::DATETIME_WIDTH, 0),
            decimals: 0,
            unsigned: false,
            collation: &charset::BINARY,
            value: OwnedValue::Temporal { micros },
        }
    }

    pub fn null() -> Self {
        Self {
            type_code: TypeCode::Null,
            max_length: 0,
            decimals: 0,
            unsigned: false,
            collation: &charset::BINARY,
            value: OwnedValue::Null,
        }
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_collation(mut self, collation: &'static Charset) -> Self {
        self.collation = collation;
        self
    }
}

impl Expr for LiteralExpr {
    fn type_code(&self) -> TypeCode {
        self.type_code
    }

    fn max_length(&self) -> u32 {
        self.max_length
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn unsigned(&self) -> bool {
        self.unsigned
    }

    fn collation(&self) -> &'static Charset {
        self.collation
    }

    fn source_column(&self) -> Option<&Column> {
        None
    }

    fn eval(&self) -> Value<'_> {
        self.value.as_value()
    }
}

/// Tuple-valued expression; its handler is the structural row handler.
pub struct RowExpr {
    elements: Vec<Box<dyn Expr>>,
}

impl RowExpr {
    pub fn new(elements: Vec<Box<dyn Expr>>) -> Self {
        Self { elements }
    }

    pub fn arity(&self) -> usize {
        self.elements.len()
    }
}

impl Expr for RowExpr {
    fn type_code(&self) -> TypeCode {
        TypeCode::Row
    }

    fn max_length(&self) -> u32 {
        0
    }

    fn decimals(&self) -> u8 {
        0
    }

    fn collation(&self) -> &'static Charset {
        &charset::BINARY
    }

    fn source_column(&self) -> Option<&Column> {
        None
    }

    fn eval(&self) -> Value<'_> {
        // Rows have no scalar value; consumers recurse into elements.
        Value::Null
    }

    fn row_elements(&self) -> &[Box<dyn Expr>] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CmpCategory;

    #[test]
    fn column_expr_reports_declared_type() {
        let column = Arc::new(
            Column::new("flags", TypeCode::Enum).with_charset(&charset::UTF8MB4),
        );
        let expr = ColumnExpr::new(column, OwnedValue::Text("on".into()));
        assert_eq!(expr.type_code(), TypeCode::String);
        assert!(expr.source_column().is_some());
        assert_eq!(expr.handler().cmp_category(), CmpCategory::Str);
    }

    #[test]
    fn literal_expr_has_no_source_column() {
        let expr = LiteralExpr::int(7);
        assert!(expr.source_column().is_none());
        assert_eq!(expr.handler().real_type(), TypeCode::LongLong);
    }

    #[test]
    fn row_expr_uses_row_handler() {
        let row = RowExpr::new(vec![
            Box::new(LiteralExpr::int(1)) as Box<dyn Expr>,
            Box::new(LiteralExpr::text("a")),
        ]);
        assert_eq!(row.arity(), 2);
        assert_eq!(row.handler().cmp_category(), CmpCategory::Row);
    }
}
