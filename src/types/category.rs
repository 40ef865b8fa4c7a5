//! # Comparison Categories
//!
//! This module provides `CmpCategory`, the semantic grouping that drives
//! comparator selection, value caching, field-save strategy, and MIN/MAX
//! aggregate typing. Every type handler carries exactly one category,
//! fixed at construction.
//!
//! ## Category Membership
//!
//! | Category | Types |
//! |----------|-------|
//! | Integer | tiny, short, int24, long, longlong, year, bit |
//! | Real | float, double |
//! | Decimal | old and new decimal |
//! | Str | char/varchar, blob family, enum, set, null, geometry |
//! | Temporal | time, date, datetime, timestamp (legacy and fractional) |
//! | Row | row values |
//!
//! ## Pairing Rule
//!
//! When two operands of different categories meet in a comparison, the
//! shared category is chosen by a fixed precedence:
//!
//! 1. equal categories compare as that category
//! 2. either side `Row` → `Row`
//! 3. either side `Temporal` → `Temporal`
//! 4. both sides in {`Integer`, `Decimal`} → `Decimal`
//! 5. anything else → `Real`
//!
//! `Str` never wins a mixed pairing: string-vs-number compares numerically
//! and string-vs-temporal compares on the temporal axis.

/// Semantic comparison category of a SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpCategory {
    Integer,
    Real,
    Decimal,
    Str,
    Temporal,
    Row,
}

impl CmpCategory {
    /// Combines two operand categories into the shared comparison category
    /// per the documented precedence table.
    pub fn combine(a: CmpCategory, b: CmpCategory) -> CmpCategory {
        if a == b {
            return a;
        }
        if a == CmpCategory::Row || b == CmpCategory::Row {
            return CmpCategory::Row;
        }
        if a == CmpCategory::Temporal || b == CmpCategory::Temporal {
            return CmpCategory::Temporal;
        }
        let decimalish = |c: CmpCategory| c == CmpCategory::Integer || c == CmpCategory::Decimal;
        if decimalish(a) && decimalish(b) {
            return CmpCategory::Decimal;
        }
        CmpCategory::Real
    }
}
