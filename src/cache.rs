//! # Value Caches
//!
//! A value cache materializes one evaluated expression result so it can
//! be re-read (and re-compared) without re-evaluating the expression.
//! The representation is picked purely from the expression's comparison
//! category; integer and temporal caches additionally remember the
//! concrete declared type so the cached value re-materializes exactly,
//! and string caches keep the originating expression's collation for
//! collation-correct re-comparison.
//!
//! Caches are owned, bind-scoped objects: one expression node owns its
//! cache for the lifetime of the bind, nothing is shared across
//! sessions.

use crate::charset::Charset;
use crate::expr::Expr;
use crate::types::{TypeCode, Value};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Category-shaped storage for one cached value. Row sub-caches are
/// boxed because the type recurses into itself.
#[derive(Debug)]
pub enum CacheRepr {
    Int { field_type: TypeCode, value: i64 },
    Real { value: f64 },
    Decimal { digits: i128, scale: i16 },
    Str { collation: &'static Charset, value: String },
    Temporal { field_type: TypeCode, value: i64 },
    Row { elements: SmallVec<[Box<ValueCache>; 4]> },
}

/// One expression's materialized value.
#[derive(Debug)]
pub struct ValueCache {
    repr: CacheRepr,
    has_value: bool,
    is_null: bool,
}

impl ValueCache {
    fn with_repr(repr: CacheRepr) -> Self {
        Self {
            repr,
            has_value: false,
            is_null: false,
        }
    }

    pub(crate) fn int(field_type: TypeCode) -> Self {
        Self::with_repr(CacheRepr::Int {
            field_type,
            value: 0,
        })
    }

    pub(crate) fn real() -> Self {
        Self::with_repr(CacheRepr::Real { value: 0.0 })
    }

    pub(crate) fn decimal() -> Self {
        Self::with_repr(CacheRepr::Decimal {
            digits: 0,
            scale: 0,
        })
    }

    pub(crate) fn str(collation: &'static Charset) -> Self {
        Self::with_repr(CacheRepr::Str {
            collation,
            value: String::new(),
        })
    }

    pub(crate) fn temporal(field_type: TypeCode) -> Self {
        Self::with_repr(CacheRepr::Temporal {
            field_type,
            value: 0,
        })
    }

    pub(crate) fn row(elements: SmallVec<[Box<ValueCache>; 4]>) -> Self {
        Self::with_repr(CacheRepr::Row { elements })
    }

    /// True once a value (possibly NULL) has been stored.
    pub fn has_value(&self) -> bool {
        self.has_value
    }

    /// True when the cached value is NULL.
    pub fn is_null(&self) -> bool {
        self.has_value && self.is_null
    }

    /// Declared type remembered for exact re-materialization, where the
    /// representation keeps one.
    pub fn field_type(&self) -> Option<TypeCode> {
        match &self.repr {
            CacheRepr::Int { field_type, .. } | CacheRepr::Temporal { field_type, .. } => {
                Some(*field_type)
            }
            _ => None,
        }
    }

    /// Collation a string cache re-compares under.
    pub fn collation(&self) -> Option<&'static Charset> {
        match &self.repr {
            CacheRepr::Str { collation, .. } => Some(collation),
            _ => None,
        }
    }

    /// Sub-caches of a row cache.
    pub fn elements(&self) -> Option<&[Box<ValueCache>]> {
        match &self.repr {
            CacheRepr::Row { elements } => Some(elements),
            _ => None,
        }
    }

    /// Stores one evaluated value. NULL caches as an explicit NULL; a
    /// value that cannot coerce into this representation also caches as
    /// NULL, matching SQL's unknown-result semantics.
    pub fn store(&mut self, value: &Value<'_>) {
        self.has_value = true;
        self.is_null = value.is_null();
        if self.is_null {
            return;
        }
        match &mut self.repr {
            CacheRepr::Int { value: slot, .. } => match value.as_int() {
                Ok(v) => *slot = v,
                Err(_) => self.is_null = true,
            },
            CacheRepr::Real { value: slot } => match value.as_real() {
                Ok(v) => *slot = v,
                Err(_) => self.is_null = true,
            },
            CacheRepr::Decimal { digits, scale } => match value.as_decimal() {
                Ok((d, s)) => {
                    *digits = d;
                    *scale = s;
                }
                Err(_) => self.is_null = true,
            },
            CacheRepr::Str { value: slot, .. } => match value.render_text() {
                Ok(text) => *slot = text,
                Err(_) => self.is_null = true,
            },
            CacheRepr::Temporal { value: slot, .. } => match value.as_temporal() {
                Ok(v) => *slot = v,
                Err(_) => self.is_null = true,
            },
            CacheRepr::Row { .. } => {
                // Rows cache element-wise through store_from.
                self.is_null = true;
            }
        }
    }

    /// Evaluates `expr` and stores the result; row caches recurse into
    /// the expression's elements.
    pub fn store_from(&mut self, expr: &dyn Expr) {
        if let CacheRepr::Row { elements } = &mut self.repr {
            for (cache, element) in elements.iter_mut().zip(expr.row_elements()) {
                cache.store_from(element.as_ref());
            }
            self.has_value = true;
            self.is_null = false;
            return;
        }
        self.store(&expr.eval());
    }

    /// The cached value; `None` until something was stored.
    pub fn cached_value(&self) -> Option<Value<'_>> {
        if !self.has_value {
            return None;
        }
        if self.is_null {
            return Some(Value::Null);
        }
        match &self.repr {
            CacheRepr::Int { value, .. } => Some(Value::Int(*value)),
            CacheRepr::Real { value } => Some(Value::Float(*value)),
            CacheRepr::Decimal { digits, scale } => Some(Value::Decimal {
                digits: *digits,
                scale: *scale,
            }),
            CacheRepr::Str { value, .. } => Some(Value::Text(Cow::Borrowed(value))),
            CacheRepr::Temporal { value, .. } => Some(Value::Temporal { micros: *value }),
            CacheRepr::Row { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::UTF8MB4;
    use crate::expr::{Expr, LiteralExpr, RowExpr};

    #[test]
    fn int_cache_remembers_field_type() {
        let cache = ValueCache::int(TypeCode::Short);
        assert_eq!(cache.field_type(), Some(TypeCode::Short));
        assert!(!cache.has_value());
    }

    #[test]
    fn store_and_read_back() {
        let mut cache = ValueCache::int(TypeCode::LongLong);
        cache.store(&Value::Int(99));
        assert_eq!(cache.cached_value(), Some(Value::Int(99)));
    }

    #[test]
    fn null_caches_as_explicit_null() {
        let mut cache = ValueCache::real();
        cache.store(&Value::Null);
        assert!(cache.has_value());
        assert!(cache.is_null());
        assert_eq!(cache.cached_value(), Some(Value::Null));
    }

    #[test]
    fn str_cache_keeps_collation() {
        let cache = ValueCache::str(&UTF8MB4);
        assert_eq!(cache.collation().unwrap().id(), UTF8MB4.id());
    }

    #[test]
    fn row_cache_recurses_per_element() {
        let row = RowExpr::new(vec![
            Box::new(LiteralExpr::int(1)) as Box<dyn Expr>,
            Box::new(LiteralExpr::text("x")),
        ]);
        let mut cache = row.handler().make_cache(&row);
        cache.store_from(&row);
        let elements = cache.elements().unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].cached_value(), Some(Value::Int(1)));
        assert_eq!(
            elements[1].cached_value(),
            Some(Value::Text(Cow::Borrowed("x")))
        );
    }
}
