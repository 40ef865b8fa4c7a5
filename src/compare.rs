//! # Comparator Binding
//!
//! A `Comparator` is bound once per expression node: the two operand
//! categories combine through the fixed precedence rule, the resulting
//! category's representative handler installs the compare strategy, and
//! the strategy never changes afterward. Row operands install a
//! structural comparator that recurses element-wise and refuses to bind
//! when arities differ.
//!
//! Comparison follows SQL three-valued logic: any NULL operand (or a
//! value that cannot reach the comparison axis) yields unknown, `None`.

use crate::charset::Charset;
use crate::expr::Expr;
use crate::handler::registry;
use crate::types::{decimal, CmpCategory, Value};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Installed comparison strategy.
#[derive(Debug)]
pub enum CompareKind {
    Int,
    Real,
    Decimal,
    Str { collation: &'static Charset },
    Temporal,
    Row,
}

/// Per-expression-node comparison binder.
///
/// Row children are boxed: the type recurses into itself, so the
/// elements need indirection.
#[derive(Debug, Default)]
pub struct Comparator {
    kind: Option<CompareKind>,
    children: SmallVec<[Box<Comparator>; 4]>,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds this comparator for an operand pair. Returns false when the
    /// shared strategy cannot be set up (row arity mismatch); the caller
    /// must fail the enclosing bind.
    pub fn bind(&mut self, left: &dyn Expr, right: &dyn Expr) -> bool {
        let category = CmpCategory::combine(
            left.handler().cmp_category(),
            right.handler().cmp_category(),
        );
        registry::by_cmp_category(category).set_comparator(self, left, right)
    }

    /// The installed strategy, once bound.
    pub fn kind(&self) -> Option<&CompareKind> {
        self.kind.as_ref()
    }

    pub(crate) fn install_int(&mut self) -> bool {
        self.kind = Some(CompareKind::Int);
        true
    }

    pub(crate) fn install_real(&mut self) -> bool {
        self.kind = Some(CompareKind::Real);
        true
    }

    pub(crate) fn install_decimal(&mut self) -> bool {
        self.kind = Some(CompareKind::Decimal);
        true
    }

    pub(crate) fn install_str(&mut self, collation: &'static Charset) -> bool {
        self.kind = Some(CompareKind::Str { collation });
        true
    }

    pub(crate) fn install_temporal(&mut self) -> bool {
        self.kind = Some(CompareKind::Temporal);
        true
    }

    /// Structural setup: both operands must be rows of equal, non-zero
    /// arity, and every element pair must itself bind.
    pub(crate) fn install_row(&mut self, left: &dyn Expr, right: &dyn Expr) -> bool {
        let left_elements = left.row_elements();
        let right_elements = right.row_elements();
        if left_elements.is_empty() || left_elements.len() != right_elements.len() {
            return false;
        }
        let mut children: SmallVec<[Box<Comparator>; 4]> =
            SmallVec::with_capacity(left_elements.len());
        for (l, r) in left_elements.iter().zip(right_elements) {
            let mut child = Comparator::new();
            if !child.bind(l.as_ref(), r.as_ref()) {
                return false;
            }
            children.push(Box::new(child));
        }
        self.children = children;
        self.kind = Some(CompareKind::Row);
        true
    }

    /// Compares the two operands under the installed strategy. `None` is
    /// SQL unknown.
    pub fn compare(&self, left: &dyn Expr, right: &dyn Expr) -> Option<Ordering> {
        match self.kind.as_ref()? {
            CompareKind::Int => compare_scalar(left, right, |v| v.as_int().ok(), i64::cmp),
            CompareKind::Real => {
                compare_scalar(left, right, |v| v.as_real().ok(), |a, b| cmp_real(*a, *b))
            }
            CompareKind::Decimal => compare_scalar(
                left,
                right,
                |v| v.as_decimal().ok(),
                |a, b| decimal::compare(a.0, a.1, b.0, b.1),
            ),
            CompareKind::Str { collation } => compare_scalar(
                left,
                right,
                |v| v.render_text().ok(),
                |a, b| cmp_text(a, b, collation),
            ),
            CompareKind::Temporal => {
                compare_scalar(left, right, |v| v.as_temporal().ok(), i64::cmp)
            }
            CompareKind::Row => {
                let left_elements = left.row_elements();
                let right_elements = right.row_elements();
                for ((l, r), child) in left_elements
                    .iter()
                    .zip(right_elements)
                    .zip(&self.children)
                {
                    match child.compare(l.as_ref(), r.as_ref())? {
                        Ordering::Equal => continue,
                        decided => return Some(decided),
                    }
                }
                Some(Ordering::Equal)
            }
        }
    }
}

fn compare_scalar<T>(
    left: &dyn Expr,
    right: &dyn Expr,
    coerce: impl Fn(&Value<'_>) -> Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Option<Ordering> {
    let lv = left.eval();
    let rv = right.eval();
    if lv.is_null() || rv.is_null() {
        return None;
    }
    let l = coerce(&lv)?;
    let r = coerce(&rv)?;
    Some(cmp(&l, &r))
}

/// Floats compare with NaN ordered after every number.
fn cmp_real(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

fn cmp_text(a: &str, b: &str, collation: &Charset) -> Ordering {
    if collation.is_binary() {
        a.as_bytes().cmp(b.as_bytes())
    } else {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}
