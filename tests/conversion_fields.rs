//! # Conversion Field Integration Tests
//!
//! Drives the conversion-field factory the way a row-image applier would:
//! decode a peer's packed column metadata against a local target column
//! and check the reconstructed shape. The decode layouts are a wire
//! contract, so each type's golden is pinned here.

use bumpalo::Bump;
use log::{LevelFilter, Metadata, Record};
use reltype::charset::{BINARY, LATIN1, UTF8MB4};
use reltype::handler::registry;
use reltype::schema::{Column, TypeLib};
use reltype::types::TypeCode;
use reltype::ConversionField;
use std::sync::{Arc, Mutex, Once};

struct CaptureLogger {
    records: Mutex<Vec<String>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

fn install_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Error);
    });
}

fn decode<'a>(
    arena: &'a Bump,
    code: TypeCode,
    metadata: u16,
    target: &'a Column,
) -> Option<&'a ConversionField<'a>> {
    registry::by_real_type(code)
        .unwrap_or_else(|| panic!("no storage handler for {:?}", code))
        .make_conversion_field(arena, metadata, target)
}

#[test]
fn integer_shapes_use_fixed_display_lengths() {
    let arena = Bump::new();
    let signed = Column::new("n", TypeCode::Long);
    let unsigned = Column::new("n", TypeCode::Long).with_unsigned();
    for (code, length) in [
        (TypeCode::Tiny, 4),
        (TypeCode::Short, 6),
        (TypeCode::Int24, 9),
        (TypeCode::Long, 11),
        (TypeCode::LongLong, 20),
    ] {
        let field = decode(&arena, code, 0, &signed).unwrap();
        assert_eq!(field.real_type(), code);
        assert_eq!(field.max_length(), length);
        assert!(!field.unsigned());

        // Sign rides on the target; the description carries none.
        let field = decode(&arena, code, 0, &unsigned).unwrap();
        assert!(field.unsigned());
    }
}

#[test]
fn float_shapes_are_signed_with_fixed_lengths() {
    let arena = Bump::new();
    let target = Column::new("f", TypeCode::Double).with_unsigned();
    let float = decode(&arena, TypeCode::Float, 0, &target).unwrap();
    assert_eq!(float.max_length(), 12);
    assert!(!float.unsigned());
    let double = decode(&arena, TypeCode::Double, 0, &target).unwrap();
    assert_eq!(double.max_length(), 22);
    assert!(!double.unsigned());
}

#[test]
fn decimal_metadata_packs_precision_and_scale() {
    let arena = Bump::new();
    let target = Column::new("price", TypeCode::NewDecimal);
    // precision 10 in the high byte, scale 2 in the low byte
    let field = decode(&arena, TypeCode::NewDecimal, (10 << 8) | 2, &target).unwrap();
    assert_eq!(field.real_type(), TypeCode::NewDecimal);
    assert_eq!(field.decimals(), 2);
    // 10 digits + decimal point + sign
    assert_eq!(field.max_length(), 12);

    let no_fraction = decode(&arena, TypeCode::NewDecimal, 5 << 8, &target).unwrap();
    assert_eq!(no_fraction.decimals(), 0);
    assert_eq!(no_fraction.max_length(), 6);
}

#[test]
fn old_decimal_reports_one_diagnostic_and_no_field() {
    install_logger();
    LOGGER.records.lock().unwrap().clear();

    let arena = Bump::new();
    let target = Column::new("amount", TypeCode::Decimal).with_table("shop", "orders");
    let field = decode(&arena, TypeCode::Decimal, 0, &target);
    assert!(field.is_none());

    let records = LOGGER.records.lock().unwrap();
    assert_eq!(records.len(), 1, "expected exactly one diagnostic");
    assert!(
        records[0].contains("shop.orders.amount"),
        "diagnostic must name the column: {}",
        records[0]
    );
}

#[test]
fn year_and_null_shapes() {
    let arena = Bump::new();
    let target = Column::new("y", TypeCode::Year).with_charset(&LATIN1);
    let year = decode(&arena, TypeCode::Year, 0, &target).unwrap();
    assert_eq!(year.max_length(), 4);

    let null = decode(&arena, TypeCode::Null, 0, &target).unwrap();
    assert_eq!(null.max_length(), 0);
    assert_eq!(null.charset().id(), LATIN1.id());
}

#[test]
fn legacy_temporal_shapes_take_digits_from_target() {
    let arena = Bump::new();
    let plain = Column::new("t", TypeCode::DateTime);
    let fractional = Column::new("t", TypeCode::DateTime).with_decimals(3);

    for code in [TypeCode::Timestamp, TypeCode::DateTime] {
        let field = decode(&arena, code, 0, &plain).unwrap();
        assert_eq!(field.decimals(), 0);
        assert_eq!(field.max_length(), 19);

        let field = decode(&arena, code, 0, &fractional).unwrap();
        assert_eq!(field.decimals(), 3);
        assert_eq!(field.max_length(), 23);
    }

    let time = decode(&arena, TypeCode::Time, 0, &fractional).unwrap();
    assert_eq!(time.max_length(), 14);
}

#[test]
fn fractional_temporal_shapes_take_digits_from_metadata() {
    let arena = Bump::new();
    // Target digits must not leak into the shape.
    let target = Column::new("t", TypeCode::DateTime2).with_decimals(6);

    let field = decode(&arena, TypeCode::Timestamp2, 2, &target).unwrap();
    assert_eq!(field.decimals(), 2);
    assert_eq!(field.max_length(), 22);

    let field = decode(&arena, TypeCode::DateTime2, 0, &target).unwrap();
    assert_eq!(field.decimals(), 0);
    assert_eq!(field.max_length(), 19);

    let field = decode(&arena, TypeCode::Time2, 6, &target).unwrap();
    assert_eq!(field.decimals(), 6);
    assert_eq!(field.max_length(), 17);
}

#[test]
fn date_shapes_are_fixed_width() {
    let arena = Bump::new();
    let target = Column::new("d", TypeCode::NewDate);
    for code in [TypeCode::Date, TypeCode::NewDate] {
        let field = decode(&arena, code, 0, &target).unwrap();
        assert_eq!(field.max_length(), 10);
        assert_eq!(field.decimals(), 0);
    }
}

#[test]
fn bit_metadata_combines_bytes_and_spare_bits() {
    let arena = Bump::new();
    let target = Column::new("b", TypeCode::Bit);
    let field = decode(&arena, TypeCode::Bit, 0x0203, &target).unwrap();
    assert_eq!(field.max_length(), 19);
    let field = decode(&arena, TypeCode::Bit, 0x0400, &target).unwrap();
    assert_eq!(field.max_length(), 32);
}

#[test]
#[should_panic(expected = "spare bits")]
fn bit_metadata_with_excess_spare_bits_is_fatal() {
    let arena = Bump::new();
    let target = Column::new("b", TypeCode::Bit);
    decode(&arena, TypeCode::Bit, 0x0009, &target);
}

#[test]
fn char_metadata_unpacks_folded_length_bits() {
    let arena = Bump::new();
    let target = Column::new("c", TypeCode::String).with_charset(&UTF8MB4);
    // CHAR(255): no folded high bits.
    let field = decode(&arena, TypeCode::String, 0xFEFF, &target).unwrap();
    assert_eq!(field.real_type(), TypeCode::String);
    assert_eq!(field.max_length(), 255);
    assert_eq!(field.charset().id(), UTF8MB4.id());
    // CHAR(300) in a 1-byte charset: bit 8 of the length folds, inverted,
    // into the type nibble.
    let field = decode(&arena, TypeCode::String, 0xEE2C, &target).unwrap();
    assert_eq!(field.max_length(), 300);
}

#[test]
fn varchar_metadata_is_the_declared_length() {
    let arena = Bump::new();
    let target = Column::new("v", TypeCode::Varchar).with_charset(&UTF8MB4);
    let short = decode(&arena, TypeCode::Varchar, 100, &target).unwrap();
    assert_eq!(short.max_length(), 100);
    assert_eq!(short.pack_width(), 1);
    let long = decode(&arena, TypeCode::Varchar, 300, &target).unwrap();
    assert_eq!(long.max_length(), 300);
    assert_eq!(long.pack_width(), 2);
}

#[test]
fn blob_family_pack_widths() {
    let arena = Bump::new();
    let target = Column::new("b", TypeCode::Blob).with_charset(&BINARY);
    for (code, width) in [
        (TypeCode::TinyBlob, 1),
        (TypeCode::Blob, 2),
        (TypeCode::MediumBlob, 3),
        (TypeCode::LongBlob, 4),
    ] {
        let field = decode(&arena, code, 0, &target).unwrap();
        assert_eq!(field.real_type(), code);
        assert_eq!(field.pack_width(), width, "{:?}", code);
    }
}

#[test]
fn enum_and_set_reference_the_target_value_list() {
    let arena = Bump::new();
    let lib = Arc::new(TypeLib::new(["red", "green", "blue"]));
    for code in [TypeCode::Enum, TypeCode::Set] {
        let target = Column::new("color", code)
            .with_typelib(lib.clone())
            .with_charset(&UTF8MB4)
            .with_field_length(5);
        let field = decode(&arena, code, 2, &target).unwrap();
        assert_eq!(field.real_type(), code);
        assert_eq!(field.pack_width(), 2);
        assert_eq!(field.max_length(), 5);
        assert_eq!(field.typelib().unwrap().ordinal("GREEN"), Some(2));
        assert_eq!(field.charset().id(), UTF8MB4.id());
    }
}

#[cfg(feature = "geometry")]
#[test]
fn geometry_copies_subtype_and_srid_from_target() {
    use reltype::schema::GeomType;

    let arena = Bump::new();
    let target =
        Column::new("pos", TypeCode::Geometry).with_geometry(GeomType::Point, 4326);
    let field = decode(&arena, TypeCode::Geometry, 0, &target).unwrap();
    assert_eq!(field.real_type(), TypeCode::Geometry);
    assert_eq!(field.pack_width(), 4);
    assert_eq!(field.geom_type(), Some(GeomType::Point));
    assert_eq!(field.srid(), 4326);
}

/// Placeholder fields are anonymous, nullable and shape-only.
#[test]
fn conversion_fields_are_throwaway_placeholders() {
    let arena = Bump::new();
    let target = Column::new("n", TypeCode::Long).with_nullable(false);
    let field = decode(&arena, TypeCode::Long, 0, &target).unwrap();
    assert_eq!(field.name(), "");
    assert!(field.nullable());
}

/// The end-to-end compatibility question the factory exists to answer.
#[test]
fn compatibility_check_against_local_column() {
    let arena = Bump::new();
    let target = Column::new("v", TypeCode::Varchar)
        .with_charset(&UTF8MB4)
        .with_field_length(200);

    // Peer declares a shorter varchar: fits.
    let field = decode(&arena, TypeCode::Varchar, 100, &target).unwrap();
    assert!(field.compatible_with(&target));

    // Peer declares a longer varchar: does not fit.
    let field = decode(&arena, TypeCode::Varchar, 400, &target).unwrap();
    assert!(!field.compatible_with(&target));

    // Different storage type never matches.
    let field = decode(&arena, TypeCode::Long, 0, &target).unwrap();
    assert!(!field.compatible_with(&target));

    // Fractional digits must agree.
    let dt = Column::new("t", TypeCode::DateTime2)
        .with_decimals(3)
        .with_field_length(23);
    let field = decode(&arena, TypeCode::DateTime2, 3, &dt).unwrap();
    assert!(field.compatible_with(&dt));
    let field = decode(&arena, TypeCode::DateTime2, 6, &dt).unwrap();
    assert!(!field.compatible_with(&dt));
}
