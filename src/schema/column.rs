//! # Column Definitions
//!
//! `Column` describes one locally-defined table column: the storage-level
//! type code plus the metadata the type dispatch layer inspects (length,
//! decimals, signedness, charset, enum/set value list). It is the target
//! a described peer column is checked against during row-image
//! application, and the originating column a direct column reference
//! exposes to aggregate typing.

use crate::charset::{self, Charset};
use crate::types::TypeCode;
use std::sync::Arc;

use super::TypeLib;

/// Geometry value subtype, recorded per geometry column.
#[cfg(feature = "geometry")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomType {
    Geometry,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// Locally-defined column descriptor.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    table: String,
    schema: String,
    real_type: TypeCode,
    nullable: bool,
    unsigned: bool,
    field_length: u32,
    decimals: u8,
    charset: &'static Charset,
    typelib: Option<Arc<TypeLib>>,
    #[cfg(feature = "geometry")]
    geom_type: Option<GeomType>,
    #[cfg(feature = "geometry")]
    srid: u32,
}

impl Column {
    /// Creates a column with the given storage-level type. Everything else
    /// starts at the neutral defaults and is set builder-style.
    pub fn new(name: impl Into<String>, real_type: TypeCode) -> Self {
        Self {
            name: name.into(),
            table: String::new(),
            schema: String::new(),
            real_type,
            nullable: true,
            unsigned: false,
            field_length: 0,
            decimals: 0,
            charset: &charset::BINARY,
            typelib: None,
            #[cfg(feature = "geometry")]
            geom_type: None,
            #[cfg(feature = "geometry")]
            srid: 0,
        }
    }

    pub fn with_table(mut self, schema: impl Into<String>, table: impl Into<String>) -> Self {
        self.schema = schema.into();
        self.table = table.into();
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    pub fn with_field_length(mut self, field_length: u32) -> Self {
        self.field_length = field_length;
        self
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_charset(mut self, charset: &'static Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_typelib(mut self, typelib: Arc<TypeLib>) -> Self {
        self.typelib = Some(typelib);
        self
    }

    #[cfg(feature = "geometry")]
    pub fn with_geometry(mut self, geom_type: GeomType, srid: u32) -> Self {
        self.geom_type = Some(geom_type);
        self.srid = srid;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// `schema.table.column`, for diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.schema, self.table, self.name)
    }

    /// Storage-level type code.
    pub fn real_type(&self) -> TypeCode {
        self.real_type
    }

    /// Declared type code: what this column reports to the wire layer.
    /// Enum and set columns declare themselves as fixed-length strings;
    /// the legacy var-string code declares as varchar.
    pub fn field_type(&self) -> TypeCode {
        match self.real_type {
            TypeCode::Enum | TypeCode::Set => TypeCode::String,
            TypeCode::VarString => TypeCode::Varchar,
            other => other,
        }
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn unsigned(&self) -> bool {
        self.unsigned
    }

    /// Declared byte length of the column.
    pub fn field_length(&self) -> u32 {
        self.field_length
    }

    /// Declared fractional digits (decimal scale or fractional seconds).
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn charset(&self) -> &'static Charset {
        self.charset
    }

    pub fn typelib(&self) -> Option<&TypeLib> {
        self.typelib.as_deref()
    }

    #[cfg(feature = "geometry")]
    pub fn geom_type(&self) -> Option<GeomType> {
        self.geom_type
    }

    #[cfg(feature = "geometry")]
    pub fn srid(&self) -> u32 {
        self.srid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::UTF8MB4;

    #[test]
    fn builder_sets_metadata() {
        let col = Column::new("price", TypeCode::NewDecimal)
            .with_table("shop", "orders")
            .with_field_length(12)
            .with_decimals(2)
            .with_nullable(false);
        assert_eq!(col.real_type(), TypeCode::NewDecimal);
        assert_eq!(col.qualified_name(), "shop.orders.price");
        assert_eq!(col.field_length(), 12);
        assert_eq!(col.decimals(), 2);
        assert!(!col.nullable());
    }

    #[test]
    fn enum_and_set_declare_as_string() {
        assert_eq!(
            Column::new("c", TypeCode::Enum).field_type(),
            TypeCode::String
        );
        assert_eq!(
            Column::new("c", TypeCode::Set).field_type(),
            TypeCode::String
        );
        assert_eq!(
            Column::new("c", TypeCode::VarString).field_type(),
            TypeCode::Varchar
        );
        assert_eq!(
            Column::new("c", TypeCode::Long).field_type(),
            TypeCode::Long
        );
    }

    #[test]
    fn typelib_is_shared() {
        let lib = Arc::new(TypeLib::new(["on", "off"]));
        let a = Column::new("a", TypeCode::Enum).with_typelib(lib.clone());
        let b = Column::new("b", TypeCode::Enum).with_typelib(lib);
        assert_eq!(a.typelib().unwrap().len(), b.typelib().unwrap().len());
    }

    #[test]
    fn charset_defaults_to_binary() {
        let col = Column::new("c", TypeCode::Varchar);
        assert!(col.charset().is_binary());
        let col = col.with_charset(&UTF8MB4);
        assert_eq!(col.charset().mbmaxlen(), 4);
    }
}
