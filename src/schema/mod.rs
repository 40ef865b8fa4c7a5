//! # Schema Collaborators
//!
//! The schema-side objects the type dispatch layer consumes: column
//! descriptors and enum/set value lists. These carry the declared shape of
//! locally-defined tables; the handler layer only ever reads them.
//!
//! ## Module Structure
//!
//! - `column`: `Column` descriptor with type metadata
//! - `typelib`: Shared enum/set value lists

mod column;
mod typelib;

#[cfg(feature = "geometry")]
pub use column::GeomType;
pub use column::Column;
pub use typelib::TypeLib;
