//! # String-Category Type Handlers
//!
//! Fixed and variable-length characters, the four blob widths, enum/set,
//! the NULL type, and (when compiled in) geometry. Enum and set are the
//! point where the declared and storage type spaces diverge: both declare
//! themselves as fixed-length char while storing ordinals or bitmaps, so
//! their handlers report a different `field_type` than `real_type`.

use super::conversion::{unpack_char_length, ConversionField};
use super::TypeHandler;
use crate::schema::Column;
use crate::types::{CmpCategory, TypeCode};
use bumpalo::Bump;

pub(crate) static STRING: StringHandler = StringHandler;
pub(crate) static VARCHAR: VarcharHandler = VarcharHandler;
pub(crate) static TINY_BLOB: TinyBlobHandler = TinyBlobHandler;
pub(crate) static BLOB: BlobHandler = BlobHandler;
pub(crate) static MEDIUM_BLOB: MediumBlobHandler = MediumBlobHandler;
pub(crate) static LONG_BLOB: LongBlobHandler = LongBlobHandler;
pub(crate) static ENUM: EnumHandler = EnumHandler;
pub(crate) static SET: SetHandler = SetHandler;
pub(crate) static NULL: NullHandler = NullHandler;
#[cfg(feature = "geometry")]
pub(crate) static GEOMETRY: GeometryHandler = GeometryHandler;

#[derive(Debug)]
pub struct StringHandler;

#[derive(Debug)]
pub struct VarcharHandler;

#[derive(Debug)]
pub struct TinyBlobHandler;

#[derive(Debug)]
pub struct BlobHandler;

#[derive(Debug)]
pub struct MediumBlobHandler;

#[derive(Debug)]
pub struct LongBlobHandler;

#[derive(Debug)]
pub struct EnumHandler;

#[derive(Debug)]
pub struct SetHandler;

#[derive(Debug)]
pub struct NullHandler;

#[cfg(feature = "geometry")]
#[derive(Debug)]
pub struct GeometryHandler;

impl TypeHandler for StringHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::String
    }

    fn name(&self) -> &'static str {
        "char"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Str
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::char_field(
            arena,
            unpack_char_length(metadata),
            target.charset(),
        ))
    }
}

impl TypeHandler for VarcharHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Varchar
    }

    fn name(&self) -> &'static str {
        "varchar"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Str
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::varchar(
            arena,
            metadata as u32,
            target.charset(),
        ))
    }
}

macro_rules! blob_handler {
    ($struct_name:ident, $code:ident, $name:literal, $pack_width:literal) => {
        impl TypeHandler for $struct_name {
            fn real_type(&self) -> TypeCode {
                TypeCode::$code
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn cmp_category(&self) -> CmpCategory {
                CmpCategory::Str
            }

            fn make_conversion_field<'a>(
                &self,
                arena: &'a Bump,
                _metadata: u16,
                target: &'a Column,
            ) -> Option<&'a ConversionField<'a>> {
                Some(ConversionField::blob(
                    arena,
                    TypeCode::$code,
                    $pack_width,
                    target.charset(),
                ))
            }
        }
    };
}

blob_handler!(TinyBlobHandler, TinyBlob, "tinyblob", 1);
blob_handler!(BlobHandler, Blob, "blob", 2);
blob_handler!(MediumBlobHandler, MediumBlob, "mediumblob", 3);
blob_handler!(LongBlobHandler, LongBlob, "longblob", 4);

impl TypeHandler for EnumHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Enum
    }

    fn field_type(&self) -> TypeCode {
        TypeCode::String
    }

    fn name(&self) -> &'static str {
        "enum"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Str
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        debug_assert_eq!(target.real_type(), TypeCode::Enum);
        Some(ConversionField::enumeration(
            arena,
            TypeCode::Enum,
            target.field_length(),
            (metadata & 0xff) as u8,
            target.typelib(),
            target.charset(),
        ))
    }
}

impl TypeHandler for SetHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Set
    }

    fn field_type(&self) -> TypeCode {
        TypeCode::String
    }

    fn name(&self) -> &'static str {
        "set"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Str
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        debug_assert_eq!(target.real_type(), TypeCode::Set);
        Some(ConversionField::enumeration(
            arena,
            TypeCode::Set,
            target.field_length(),
            (metadata & 0xff) as u8,
            target.typelib(),
            target.charset(),
        ))
    }
}

impl TypeHandler for NullHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Null
    }

    fn name(&self) -> &'static str {
        "null"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Str
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        Some(ConversionField::zero_width(arena, target.charset()))
    }
}

#[cfg(feature = "geometry")]
impl TypeHandler for GeometryHandler {
    fn real_type(&self) -> TypeCode {
        TypeCode::Geometry
    }

    fn name(&self) -> &'static str {
        "geometry"
    }

    fn cmp_category(&self) -> CmpCategory {
        CmpCategory::Str
    }

    fn make_conversion_field<'a>(
        &self,
        arena: &'a Bump,
        _metadata: u16,
        target: &'a Column,
    ) -> Option<&'a ConversionField<'a>> {
        debug_assert_eq!(target.real_type(), TypeCode::Geometry);
        Some(ConversionField::geometry(arena, target))
    }
}
