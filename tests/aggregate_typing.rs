//! # Hybrid Aggregate Typing Integration Tests
//!
//! Resolves MIN/MAX-style result types end to end: column references
//! against computed expressions, across every comparison category, with
//! the unconditional-nullability rule checked for both.

use reltype::charset::{BINARY, UTF8MB4};
use reltype::expr::{ColumnExpr, LiteralExpr};
use reltype::schema::{Column, TypeLib};
use reltype::types::{OwnedValue, TypeCode};
use reltype::HybridTypeBinding;
use std::sync::Arc;

fn column_arg(column: Column, value: OwnedValue) -> ColumnExpr {
    ColumnExpr::new(Arc::new(column), value)
}

fn resolved(arg: &dyn reltype::Expr) -> HybridTypeBinding {
    let mut binding = HybridTypeBinding::new();
    binding.resolve(arg);
    binding
}

#[test]
fn numeric_columns_keep_their_declared_type() {
    for code in [
        TypeCode::Tiny,
        TypeCode::Short,
        TypeCode::Long,
        TypeCode::Float,
        TypeCode::NewDecimal,
    ] {
        let arg = column_arg(
            Column::new("n", code).with_nullable(false),
            OwnedValue::Int(1),
        );
        let binding = resolved(&arg);
        assert_eq!(binding.type_code(), code, "column of {:?}", code);
    }
}

#[test]
fn numeric_expressions_widen_to_category_canonicals() {
    assert_eq!(
        resolved(&LiteralExpr::int(1)).type_code(),
        TypeCode::LongLong
    );
    assert_eq!(
        resolved(&LiteralExpr::real(1.0)).type_code(),
        TypeCode::Double
    );
    assert_eq!(
        resolved(&LiteralExpr::decimal(100, 2)).type_code(),
        TypeCode::NewDecimal
    );
}

/// An aggregate over an empty group is NULL, so the result is nullable no
/// matter what the argument declares, and stays so on re-resolution.
#[test]
fn result_is_always_nullable_and_idempotently_so() {
    let not_null = column_arg(
        Column::new("n", TypeCode::Long).with_nullable(false),
        OwnedValue::Int(1),
    );
    let mut binding = HybridTypeBinding::new();
    binding.resolve(&not_null);
    assert!(binding.nullable());
    let first_type = binding.type_code();
    binding.resolve(&not_null);
    assert!(binding.nullable());
    assert_eq!(binding.type_code(), first_type);

    let nullable = column_arg(Column::new("n", TypeCode::Long), OwnedValue::Int(1));
    assert!(resolved(&nullable).nullable());
    assert!(resolved(&LiteralExpr::int(1)).nullable());
}

#[test]
fn real_results_use_the_float_display_length() {
    // A double literal has free-form decimals: fixed 23-char display.
    let binding = resolved(&LiteralExpr::real(2.5));
    assert_eq!(binding.max_length(), 23);

    // A float column with declared decimals gets 17 + decimals.
    let arg = column_arg(
        Column::new("f", TypeCode::Float).with_decimals(2),
        OwnedValue::Float(0.0),
    );
    let binding = resolved(&arg);
    assert_eq!(binding.type_code(), TypeCode::Float);
    assert_eq!(binding.max_length(), 19);
}

#[test]
fn enum_and_set_columns_become_fixed_char() {
    let lib = Arc::new(TypeLib::new(["a", "b"]));
    for code in [TypeCode::Enum, TypeCode::Set] {
        let arg = column_arg(
            Column::new("c", code)
                .with_typelib(lib.clone())
                .with_charset(&UTF8MB4)
                .with_field_length(4),
            OwnedValue::Text("a".into()),
        );
        let binding = resolved(&arg);
        assert_eq!(binding.type_code(), TypeCode::String, "column of {:?}", code);
        assert_eq!(binding.collation().id(), UTF8MB4.id());
    }
}

#[test]
fn string_columns_keep_their_declared_type() {
    let arg = column_arg(
        Column::new("v", TypeCode::Varchar)
            .with_charset(&UTF8MB4)
            .with_field_length(40),
        OwnedValue::Text("x".into()),
    );
    let binding = resolved(&arg);
    assert_eq!(binding.type_code(), TypeCode::Varchar);
    assert_eq!(binding.max_length(), 40);
}

#[test]
fn string_expressions_tier_by_length_and_charset() {
    // Fits inline in a 4-byte charset: 2048 octets is 512 chars.
    let inline = LiteralExpr::text("x")
        .with_max_length(2048)
        .with_collation(&UTF8MB4);
    assert_eq!(resolved(&inline).type_code(), TypeCode::Varchar);

    // Same octet count in a 1-byte charset is 2048 chars: goes out of
    // line, to the smallest blob tier.
    let blob = LiteralExpr::text("x")
        .with_max_length(2048)
        .with_collation(&BINARY);
    assert_eq!(resolved(&blob).type_code(), TypeCode::Blob);

    let medium = LiteralExpr::text("x")
        .with_max_length(70_000)
        .with_collation(&BINARY);
    assert_eq!(resolved(&medium).type_code(), TypeCode::MediumBlob);

    let long = LiteralExpr::text("x")
        .with_max_length(20_000_000)
        .with_collation(&BINARY);
    assert_eq!(resolved(&long).type_code(), TypeCode::LongBlob);
}

#[test]
fn temporal_arguments_keep_their_exact_type() {
    for code in [TypeCode::NewDate, TypeCode::Time2, TypeCode::DateTime2] {
        let arg = column_arg(Column::new("t", code), OwnedValue::Temporal { micros: 0 });
        assert_eq!(resolved(&arg).type_code(), code, "column of {:?}", code);
    }
    let expr = LiteralExpr::temporal(TypeCode::Timestamp2, 0);
    assert_eq!(resolved(&expr).type_code(), TypeCode::Timestamp2);
}

#[test]
fn attributes_are_copied_from_the_argument() {
    let arg = column_arg(
        Column::new("d", TypeCode::NewDecimal)
            .with_field_length(12)
            .with_decimals(4)
            .with_unsigned(),
        OwnedValue::Decimal { digits: 0, scale: 4 },
    );
    let binding = resolved(&arg);
    assert_eq!(binding.max_length(), 12);
    assert_eq!(binding.decimals(), 4);
    assert!(binding.unsigned());
}
