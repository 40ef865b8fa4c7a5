//! # Conversion Field Descriptors
//!
//! When externally-described row data is applied against a locally-defined
//! table (a peer's row image carrying its own schema description), each
//! described column is reconstructed as a throwaway `ConversionField`: the
//! minimal shape needed to test storage compatibility against the local
//! target column. The descriptor lives in the caller's arena for exactly
//! one compatibility check and is never used to hold data.
//!
//! ## Metadata Decode
//!
//! The packed metadata value is one or two bytes, laid out per type by the
//! schema-description protocol; the decode rules in the per-handler
//! `make_conversion_field` implementations are a wire-compatibility
//! contract and must not be altered. The helpers here hold the layouts
//! shared by more than one handler.
//!
//! ## Allocation Discipline
//!
//! `ConversionField` is plain data: it borrows the target's value list and
//! charset instead of owning anything, so arena allocation never leaks a
//! destructor. Nothing outside the enclosing compatibility check may
//! retain one.

use crate::charset::Charset;
use crate::schema::Column;
#[cfg(feature = "geometry")]
use crate::schema::GeomType;
use crate::schema::TypeLib;
use crate::types::{decimal, temporal, TypeCode};
use bumpalo::Bump;

/// Ephemeral field shape reconstructed from packed type metadata.
#[derive(Debug)]
pub struct ConversionField<'a> {
    real_type: TypeCode,
    max_length: u32,
    decimals: u8,
    unsigned: bool,
    nullable: bool,
    charset: &'static Charset,
    pack_width: u8,
    typelib: Option<&'a TypeLib>,
    name: &'static str,
    #[cfg(feature = "geometry")]
    geom_type: Option<GeomType>,
    #[cfg(feature = "geometry")]
    srid: u32,
}

impl<'a> ConversionField<'a> {
    fn base(real_type: TypeCode, max_length: u32, charset: &'static Charset) -> Self {
        Self {
            real_type,
            max_length,
            decimals: 0,
            unsigned: false,
            // Placeholder fields always get a null slot: the peer's
            // nullability is unknown and irrelevant to shape checks.
            nullable: true,
            charset,
            pack_width: 0,
            typelib: None,
            name: "",
            #[cfg(feature = "geometry")]
            geom_type: None,
            #[cfg(feature = "geometry")]
            srid: 0,
        }
    }

    /// Fixed-width numeric shape; sign is taken from the target because
    /// the description protocol does not carry it.
    pub(crate) fn numeric(
        arena: &'a Bump,
        real_type: TypeCode,
        max_length: u32,
        unsigned: bool,
    ) -> &'a ConversionField<'a> {
        let mut field = Self::base(real_type, max_length, &crate::charset::BINARY);
        field.unsigned = unsigned;
        arena.alloc(field)
    }

    /// New-format decimal shape.
    pub(crate) fn decimal(arena: &'a Bump, max_length: u32, decimals: u8) -> &'a ConversionField<'a> {
        let mut field = Self::base(TypeCode::NewDecimal, max_length, &crate::charset::BINARY);
        field.decimals = decimals;
        arena.alloc(field)
    }

    /// Temporal shape with `dec` fractional-second digits; display width
    /// follows from the type code.
    pub(crate) fn temporal(arena: &'a Bump, real_type: TypeCode, dec: u8) -> &'a ConversionField<'a> {
        let max_length = match real_type {
            TypeCode::Date | TypeCode::NewDate => temporal::DATE_WIDTH,
            TypeCode::Time | TypeCode::Time2 => temporal::fractional_width(temporal::TIME_WIDTH, dec),
            _ => temporal::fractional_width(temporal::DATETIME_WIDTH, dec),
        };
        let mut field = Self::base(real_type, max_length, &crate::charset::BINARY);
        field.decimals = dec;
        arena.alloc(field)
    }

    /// Zero-width placeholder for the NULL type.
    pub(crate) fn zero_width(arena: &'a Bump, charset: &'static Charset) -> &'a ConversionField<'a> {
        arena.alloc(Self::base(TypeCode::Null, 0, charset))
    }

    /// Fixed-length character shape.
    pub(crate) fn char_field(
        arena: &'a Bump,
        max_length: u32,
        charset: &'static Charset,
    ) -> &'a ConversionField<'a> {
        arena.alloc(Self::base(TypeCode::String, max_length, charset))
    }

    /// Variable-length string shape; the length prefix narrows to one byte
    /// below 256.
    pub(crate) fn varchar(
        arena: &'a Bump,
        length: u32,
        charset: &'static Charset,
    ) -> &'a ConversionField<'a> {
        let mut field = Self::base(TypeCode::Varchar, length, charset);
        field.pack_width = varchar_pack_width(length);
        arena.alloc(field)
    }

    /// Blob shape with the family's length-prefix width.
    pub(crate) fn blob(
        arena: &'a Bump,
        real_type: TypeCode,
        pack_width: u8,
        charset: &'static Charset,
    ) -> &'a ConversionField<'a> {
        let max_length = blob_capacity(pack_width);
        let mut field = Self::base(real_type, max_length, charset);
        field.pack_width = pack_width;
        arena.alloc(field)
    }

    /// Enum or set shape referencing the target's value list.
    pub(crate) fn enumeration(
        arena: &'a Bump,
        real_type: TypeCode,
        field_length: u32,
        pack_width: u8,
        typelib: Option<&'a TypeLib>,
        charset: &'static Charset,
    ) -> &'a ConversionField<'a> {
        let mut field = Self::base(real_type, field_length, charset);
        field.pack_width = pack_width;
        field.typelib = typelib;
        arena.alloc(field)
    }

    /// Bit-field shape; length is in bits.
    pub(crate) fn bits(arena: &'a Bump, max_length: u32) -> &'a ConversionField<'a> {
        arena.alloc(Self::base(TypeCode::Bit, max_length, &crate::charset::BINARY))
    }

    /// Geometry shape copying subtype and spatial reference from the
    /// target column.
    #[cfg(feature = "geometry")]
    pub(crate) fn geometry(arena: &'a Bump, target: &'a Column) -> &'a ConversionField<'a> {
        let mut field = Self::base(
            TypeCode::Geometry,
            blob_capacity(4),
            target.charset(),
        );
        field.pack_width = 4;
        field.geom_type = target.geom_type();
        field.srid = target.srid();
        arena.alloc(field)
    }

    pub fn real_type(&self) -> TypeCode {
        self.real_type
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

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn charset(&self) -> &'static Charset {
        self.charset
    }

    /// Length-prefix width for blob-family shapes, storage width for
    /// enum/set shapes, zero elsewhere.
    pub fn pack_width(&self) -> u8 {
        self.pack_width
    }

    pub fn typelib(&self) -> Option<&TypeLib> {
        self.typelib
    }

    /// Placeholder fields carry no name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[cfg(feature = "geometry")]
    pub fn geom_type(&self) -> Option<GeomType> {
        self.geom_type
    }

    #[cfg(feature = "geometry")]
    pub fn srid(&self) -> u32 {
        self.srid
    }

    /// Shape compatibility against the local target column: same storage
    /// type, matching fractional digits, and the target wide enough to
    /// hold what the peer describes. A target with no declared length is
    /// unbounded.
    pub fn compatible_with(&self, target: &Column) -> bool {
        if self.real_type != target.real_type() {
            return false;
        }
        if self.decimals != target.decimals() {
            return false;
        }
        let target_capacity = if target.field_length() == 0 {
            u32::MAX
        } else {
            target.field_length()
        };
        self.max_length <= target_capacity
    }
}

/// Reconstructs the declared length of a fixed-length char column from its
/// packed metadata: the two spare length bits ride in the upper nibble,
/// inverted, above the low byte.
pub(crate) fn unpack_char_length(metadata: u16) -> u32 {
    let metadata = metadata as u32;
    (((metadata >> 4) & 0x300) ^ 0x300) + (metadata & 0xff)
}

/// Decodes bit-column metadata: whole bytes in the high byte, spare bits
/// (0-7) in the low byte. More than 7 spare bits cannot be produced by a
/// correct describer.
pub(crate) fn bit_max_length(metadata: u16) -> u32 {
    let spare_bits = (metadata & 0xff) as u32;
    assert!(
        spare_bits <= 7,
        "bit column metadata claims {} spare bits",
        spare_bits
    );
    8 * ((metadata >> 8) as u32) + spare_bits
}

/// Length-prefix width for a varchar of the given declared length.
pub(crate) fn varchar_pack_width(length: u32) -> u8 {
    if length < 256 {
        1
    } else {
        2
    }
}

/// Storable payload bound implied by a length-prefix width.
fn blob_capacity(pack_width: u8) -> u32 {
    match pack_width {
        1 => 0xff,
        2 => 0xffff,
        3 => 0xff_ffff,
        _ => u32::MAX,
    }
}

/// Display length for a described decimal column.
pub(crate) fn decimal_display_length(precision: u32, scale: u32) -> u32 {
    decimal::precision_to_length(precision, scale, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_length_unpacks_spread_bits() {
        // CHAR(255): type byte 0xFE, length bits 9..8 zero, low byte 0xFF.
        assert_eq!(unpack_char_length(0xFEFF), 255);
        // CHAR(300): length bit 8 folds into the type byte's upper nibble.
        assert_eq!(unpack_char_length(0xEE2C), 300);
    }

    #[test]
    fn bit_length_combines_bytes_and_bits() {
        assert_eq!(bit_max_length(0x0203), 19);
        assert_eq!(bit_max_length(0x0100), 8);
        assert_eq!(bit_max_length(0x0007), 7);
    }

    #[test]
    #[should_panic(expected = "spare bits")]
    fn bit_length_rejects_more_than_seven_spare_bits() {
        bit_max_length(0x0108);
    }

    #[test]
    fn varchar_prefix_narrows_below_256() {
        assert_eq!(varchar_pack_width(255), 1);
        assert_eq!(varchar_pack_width(256), 2);
    }
}
