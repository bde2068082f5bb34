//! End-to-end normalization scenarios per dataset kind.

use std::collections::BTreeMap;

use mrdc_clean::normalize_table;
use mrdc_model::{CellValue, DatasetKind, RawTable, RejectionReason, Row, StructuralError};

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn table(source: &str, columns: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
    let mut raw = RawTable::new(source, columns.iter().map(|c| (*c).to_string()).collect());
    for (idx, cells) in rows.into_iter().enumerate() {
        let mut row = Row::new(idx as u64);
        for (name, cell) in columns.iter().zip(cells) {
            row.cells.insert((*name).to_string(), cell);
        }
        raw.push_row(row);
    }
    raw
}

const PRODUCT_COLUMNS: [&str; 9] = [
    "Unnamed: 0",
    "product_name",
    "category",
    "EAN",
    "uuid",
    "product_code",
    "weight",
    "product_price",
    "date_added",
];

fn product_row(name: &str, weight: &str, price: CellValue) -> Vec<CellValue> {
    vec![
        CellValue::Int(0),
        text(name),
        text("homeware"),
        text("0187908577"),
        text("8a9d-3f3a"),
        text("R7-3126933h"),
        text(weight),
        price,
        text("2021-05-14"),
    ]
}

#[test]
fn product_scenario_counts_and_weight_rescaling() {
    // Four rows: one missing price, one in grams, one duplicate pair.
    let raw = table(
        "products.csv",
        &PRODUCT_COLUMNS,
        vec![
            product_row("kettle", "1kg", text("£12.50")),
            product_row("scales", "100g", text("£9.99")),
            product_row("mug", "0.3kg", CellValue::Missing),
            product_row("towel", "2oz", text("£4.00")),
            product_row("towel", "2oz", text("£4.00")),
        ],
    );
    let output = normalize_table(DatasetKind::Products, &raw).unwrap();

    // 5 in - 1 missing price - 1 duplicate.
    assert_eq!(output.table.height(), 3);
    assert_eq!(output.report.rows_in, 5);
    assert_eq!(
        output.report.dropped.get(&RejectionReason::MissingRequired),
        Some(&1)
    );
    assert_eq!(
        output.report.dropped.get(&RejectionReason::Duplicate),
        Some(&1)
    );

    // Housekeeping index column is gone, headers canonical.
    assert!(!output.table.columns.iter().any(|c| c == "unnamed:_0"));
    assert!(output.table.columns.iter().any(|c| c == "ean"));

    let weights: Vec<f64> = output
        .table
        .rows
        .iter()
        .map(|row| match row.cell("weight") {
            CellValue::Float(value) => *value,
            other => panic!("weight not coerced: {other:?}"),
        })
        .collect();
    assert_eq!(weights[0], 1.0);
    assert!((weights[1] - 0.1).abs() < 1e-12);
    assert!((weights[2] - 0.056_699).abs() < 1e-9);

    assert_eq!(output.table.rows[0].cell("product_price"), &CellValue::Float(12.5));

    // Dense zero-based ids in surviving order.
    let ids: Vec<u64> = output.table.rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn missing_required_column_is_structural() {
    let raw = table(
        "products.csv",
        &["product_name", "category"],
        vec![vec![text("kettle"), text("homeware")]],
    );
    let error = normalize_table(DatasetKind::Products, &raw).unwrap_err();
    assert!(matches!(
        error,
        StructuralError::MissingColumn { ref column, .. } if column == "ean"
            || column == "uuid"
            || column == "product_code"
            || column == "weight"
            || column == "product_price"
            || column == "date_added"
    ));
}

#[test]
fn schema_without_columns_is_structural() {
    let raw = RawTable::new("headerless.csv", Vec::new());
    let error = normalize_table(DatasetKind::Products, &raw).unwrap_err();
    assert!(matches!(error, StructuralError::EmptySchema { ref source_name } if source_name == "headerless.csv"));
    assert!(error.to_string().contains("headerless.csv"));
}

#[test]
fn calendar_composite_assembly_and_invalid_month() {
    let columns = ["year", "month", "day", "timestamp", "time_period", "date_uuid"];
    let raw = table(
        "date_details.json",
        &columns,
        vec![
            vec![
                text("2021"),
                text("07"),
                text("15"),
                text("09:30:00"),
                text("MORNING"),
                text("aaa-111"),
            ],
            vec![
                text("2021"),
                text("13"),
                text("01"),
                text("10:00:00"),
                text("evening"),
                text("bbb-222"),
            ],
        ],
    );
    let output = normalize_table(DatasetKind::DateTimes, &raw).unwrap();

    assert_eq!(output.table.height(), 1);
    assert_eq!(
        output.report.dropped.get(&RejectionReason::InvalidDate),
        Some(&1)
    );

    // Source columns replaced by the assembled datetime.
    for gone in ["year", "month", "day", "timestamp"] {
        assert!(!output.table.columns.iter().any(|c| c == gone), "{gone} kept");
    }
    assert!(output.table.columns.iter().any(|c| c == "datetime"));

    let row = &output.table.rows[0];
    let expected = chrono::NaiveDate::from_ymd_opt(2021, 7, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    assert_eq!(row.cell("datetime"), &CellValue::DateTime(expected));
    assert_eq!(row.cell("time_period"), &text("Morning"));
}

#[test]
fn user_rows_need_both_dates() {
    let columns = [
        "index",
        "first_name",
        "last_name",
        "date_of_birth",
        "company",
        "email_address",
        "address",
        "country",
        "country_code",
        "phone_number",
        "join_date",
        "user_uuid",
    ];
    let user = |dob: &str, join: &str| {
        vec![
            CellValue::Int(0),
            text("Ada"),
            text("Lovelace"),
            text(dob),
            text("Analytical"),
            text("ada@example.com"),
            text("12 Engine St"),
            text("United Kingdom"),
            text("GB"),
            text("0123 456"),
            text(join),
            text("uuid-1"),
        ]
    };
    let raw = table(
        "legacy_users",
        &columns,
        vec![
            user("1815-12-10", "2020-01-05"),
            user("not a date", "2020-01-05"),
            user("1815-12-10", "never"),
        ],
    );
    let output = normalize_table(DatasetKind::Users, &raw).unwrap();
    assert_eq!(output.table.height(), 1);
    assert_eq!(
        output.report.dropped.get(&RejectionReason::InvalidDate),
        Some(&2)
    );
    assert!(!output.table.columns.iter().any(|c| c == "index"));
}

#[test]
fn stores_degrade_staff_numbers_but_drop_bad_coordinates() {
    let columns = [
        "store_code",
        "address",
        "store_type",
        "latitude",
        "longitude",
        "locality",
        "country_code",
        "opening_date",
        "staff_numbers",
    ];
    let store = |lat: &str, staff: &str| {
        vec![
            text("BL-123"),
            text("1 High St"),
            text("Local"),
            text(lat),
            text("-1.5"),
            text("Leeds"),
            text("GB"),
            text("2012-03-01"),
            text(staff),
        ]
    };
    let raw = table(
        "store_details",
        &columns,
        vec![store("53.8", "30"), store("53.8", "3x"), store("north", "30")],
    );
    let output = normalize_table(DatasetKind::Stores, &raw).unwrap();

    // Bad latitude drops the row; bad staff count only degrades.
    assert_eq!(output.table.height(), 2);
    assert_eq!(
        output.report.dropped.get(&RejectionReason::CoercionFailed),
        Some(&1)
    );
    assert_eq!(output.table.rows[0].cell("staff_numbers"), &CellValue::Int(30));
    assert!(output.table.rows[1].cell("staff_numbers").is_missing());
}

#[test]
fn orders_pass_through_prunes_and_dedupes_only() {
    let columns = ["level_0", "first_name", "last_name", "1", "card_number", "quantity"];
    let order = |card: &str, qty: i64| {
        vec![
            CellValue::Int(0),
            text("Ada"),
            text("Lovelace"),
            CellValue::Missing,
            text(card),
            CellValue::Int(qty),
        ]
    };
    let raw = table(
        "orders_table",
        &columns,
        vec![order("4929", 2), order("4929", 2), order("4930", 1)],
    );
    let output = normalize_table(DatasetKind::Orders, &raw).unwrap();

    assert_eq!(output.table.height(), 2);
    for gone in ["first_name", "last_name", "1"] {
        assert!(!output.table.columns.iter().any(|c| c == gone));
    }
    // No coercion: quantity stays an integer cell, card stays text.
    assert_eq!(output.table.rows[0].cell("quantity"), &CellValue::Int(2));
    assert_eq!(output.table.rows[0].cell("card_number"), &text("4929"));
}

#[test]
fn empty_rows_are_dropped_before_anything_else() {
    let columns = ["card_number", "expiry_date", "card_provider", "date_payment_confirmed"];
    let raw = table(
        "card_details.pdf",
        &columns,
        vec![
            vec![
                CellValue::Missing,
                text("  "),
                CellValue::Missing,
                CellValue::Missing,
            ],
            vec![
                CellValue::Int(4929_1234),
                text("09/26"),
                text("VISA"),
                text("2022-01-02"),
            ],
        ],
    );
    let output = normalize_table(DatasetKind::Cards, &raw).unwrap();
    assert_eq!(output.report.rows_empty, 1);
    assert_eq!(output.table.height(), 1);
    // Numeric-looking card number is stringified.
    assert_eq!(output.table.rows[0].cell("card_number"), &text("49291234"));
}

#[test]
fn normalization_is_idempotent() {
    let raw = table(
        "products.csv",
        &PRODUCT_COLUMNS,
        vec![
            product_row("kettle", "1kg", text("£12.50")),
            product_row("scales", "100g", text("£9.99")),
        ],
    );
    let first = normalize_table(DatasetKind::Products, &raw).unwrap();

    let mut again = RawTable::new("round-two", first.table.columns.clone());
    for row in &first.table.rows {
        again.push_row(row.clone());
    }
    let second = normalize_table(DatasetKind::Products, &again).unwrap();

    assert_eq!(second.table.columns, first.table.columns);
    assert_eq!(second.table.rows, first.table.rows);
    assert_eq!(second.report.dropped, BTreeMap::new());
}

#[test]
fn calendar_normalization_is_idempotent() {
    let columns = ["year", "month", "day", "timestamp", "time_period", "date_uuid"];
    let raw = table(
        "date_details.json",
        &columns,
        vec![vec![
            text("2021"),
            text("07"),
            text("15"),
            text("09:30:00"),
            text("Morning"),
            text("aaa-111"),
        ]],
    );
    let first = normalize_table(DatasetKind::DateTimes, &raw).unwrap();

    let mut again = RawTable::new("round-two", first.table.columns.clone());
    for row in &first.table.rows {
        again.push_row(row.clone());
    }
    let second = normalize_table(DatasetKind::DateTimes, &again).unwrap();
    assert_eq!(second.table.rows, first.table.rows);
}
