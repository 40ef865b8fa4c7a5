//! # Hybrid Aggregate Typing
//!
//! MIN/MAX-style aggregates take their result type from their single
//! argument, but not uniformly: numeric arguments keep a column's exact
//! declared type while computed expressions widen to the category
//! canonical; string columns keep their type except enum/set (which
//! become fixed-length char), string expressions pick a varchar/blob tier
//! by length; temporal arguments always keep their exact type. Whatever
//! the argument, the result is nullable, because MIN/MAX over an empty
//! group is NULL.
//!
//! The binding is resolved once when the aggregate is bound and is
//! immutable afterward; re-resolving is idempotent.

use crate::charset::{self, Charset};
use crate::expr::Expr;
use crate::handler::{registry, TypeHandler};
use crate::types::{CmpCategory, TypeCode};

/// Fractional-digit marker for "not a fixed number of decimals"
/// (free-form floats).
pub const NOT_FIXED_DEC: u8 = 31;

/// Display length of a double with the given fractional digits.
pub(crate) fn float_display_length(decimals: u8) -> u32 {
    if decimals >= NOT_FIXED_DEC {
        23
    } else {
        17 + decimals as u32
    }
}

/// Resolved result type of a MIN/MAX-style aggregate.
pub struct HybridTypeBinding {
    handler: &'static dyn TypeHandler,
    max_length: u32,
    decimals: u8,
    unsigned: bool,
    collation: &'static Charset,
    nullable: bool,
}

impl HybridTypeBinding {
    /// A fresh, unresolved binding. The placeholder handler is the real
    /// canonical; resolution replaces it.
    pub fn new() -> Self {
        Self {
            handler: registry::by_cmp_category(CmpCategory::Real),
            max_length: 0,
            decimals: 0,
            unsigned: false,
            collation: &charset::BINARY,
            nullable: false,
        }
    }

    /// Resolves the binding from the aggregate's argument. Dispatches
    /// through the argument's handler so each category applies its own
    /// rule.
    pub fn resolve(&mut self, arg: &dyn Expr) {
        arg.handler().fix_hybrid_aggregate(self, arg);
    }

    pub fn handler(&self) -> &'static dyn TypeHandler {
        self.handler
    }

    /// Declared type code of the aggregate result.
    pub fn type_code(&self) -> TypeCode {
        self.handler.real_type()
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn unsigned(&self) -> bool {
        self.unsigned
    }

    pub fn collation(&self) -> &'static Charset {
        self.collation
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Copies the argument's standard attributes.
    pub(crate) fn copy_attributes(&mut self, arg: &dyn Expr) {
        self.max_length = arg.max_length();
        self.decimals = arg.decimals();
        self.unsigned = arg.unsigned();
        self.collation = arg.collation();
    }

    /// An aggregate result can be NULL no matter what its argument
    /// declares; nothing ever clears this again.
    pub(crate) fn force_nullable(&mut self) {
        self.nullable = true;
    }

    /// Numeric rule: a direct column reference keeps its exact declared
    /// type, a computed expression widens to the category canonical.
    pub(crate) fn adopt_numeric(&mut self, arg: &dyn Expr, canonical: &'static dyn TypeHandler) {
        if arg.source_column().is_some() {
            self.set_handler_by_field_type(arg.type_code());
        } else {
            self.set_handler(canonical);
        }
    }

    pub(crate) fn set_handler(&mut self, handler: &'static dyn TypeHandler) {
        self.handler = handler;
    }

    /// Adopts the handler for a declared type code. Only reachable for
    /// codes the argument was successfully bound with, so the lookup
    /// cannot miss.
    pub(crate) fn set_handler_by_field_type(&mut self, code: TypeCode) {
        self.handler = registry::by_field_type(code)
            .expect("bound aggregate argument has a compiled-out type");
    }

    pub(crate) fn set_max_length(&mut self, max_length: u32) {
        self.max_length = max_length;
    }
}

impl Default for HybridTypeBinding {
    fn default() -> Self {
        Self::new()
    }
}
