//! # reltype - Runtime Type Dispatch for a SQL Engine
//!
//! reltype is the type-handler subsystem of a relational engine: a
//! process-wide registry of immutable singleton handlers, one per
//! concrete SQL type, that decide how each type builds storage shapes,
//! saves values, compares, caches evaluated results, formats, and
//! resolves MIN/MAX aggregate result types.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │     Executor / Binder (external)          │
//! ├───────────────────────────────────────────┤
//! │  Registry lookups (field / real / category)│
//! ├───────────────────────────────────────────┤
//! │  TypeHandler singletons (capability trait)│
//! ├───────────┬───────────┬───────────────────┤
//! │ Conversion│ Comparator│ Cache / Aggregate │
//! │  fields   │  binding  │     binding       │
//! ├───────────┴───────────┴───────────────────┤
//! │  Types, charsets, schema collaborators    │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: Wire type codes, comparison categories, runtime values
//! - [`charset`]: Character set descriptors
//! - [`schema`]: Column and enum/set value-list collaborators
//! - [`handler`]: The handler trait, singletons and registry lookups
//! - [`expr`]: The typed-expression collaborator interface
//! - [`store`]: Field save targets and statuses
//! - [`cache`]: Per-expression value caches
//! - [`compare`]: Comparator binding and three-valued comparison
//! - [`aggregate`]: MIN/MAX hybrid result typing
//!
//! ## Concurrency Model
//!
//! Handler singletons are immutable `'static` values, consulted without
//! locking from any number of sessions. Everything else (conversion
//! fields, caches, comparators, aggregate bindings) is owned by one bind
//! operation and never shared.
//!
//! ## Quick Start
//!
//! ```ignore
//! use reltype::handler::registry;
//! use reltype::types::TypeCode;
//!
//! let handler = registry::by_field_type(TypeCode::NewDecimal)
//!     .expect("decimal support is always compiled in");
//! assert_eq!(handler.name(), "decimal");
//! ```

pub mod aggregate;
pub mod cache;
pub mod charset;
pub mod compare;
pub mod expr;
pub mod handler;
pub mod schema;
pub mod store;
pub mod types;

pub use aggregate::HybridTypeBinding;
pub use cache::ValueCache;
pub use compare::Comparator;
pub use expr::{ColumnExpr, Expr, LiteralExpr, RowExpr};
pub use handler::{ConversionField, TypeHandler};
pub use schema::{Column, TypeLib};
pub use store::{FieldSlot, SaveStatus};
pub use types::{CmpCategory, OwnedValue, TypeCode, Value};
