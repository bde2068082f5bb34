//! Property tests for the value coercers.

use mrdc_clean::coerce::{parse_currency, parse_number, parse_weight_kg, trim_text};
use mrdc_model::CellValue;
use proptest::prelude::*;

fn text(value: String) -> CellValue {
    CellValue::Text(value)
}

proptest! {
    #[test]
    fn gram_suffix_divides_by_thousand(value in 0.0f64..100_000.0) {
        let cell = text(format!("{value}g"));
        let Some(CellValue::Float(kg)) = parse_weight_kg(&cell) else {
            return Err(TestCaseError::fail("grams failed to coerce"));
        };
        prop_assert!((kg - value / 1000.0).abs() <= value.abs() * 1e-12 + 1e-12);
    }

    #[test]
    fn kg_suffix_is_identity(value in 0.0f64..10_000.0) {
        let cell = text(format!("{value}kg"));
        prop_assert_eq!(parse_weight_kg(&cell), Some(CellValue::Float(value)));
    }

    #[test]
    fn unitless_numeric_weight_is_kept_as_kilograms(value in -1.0e9f64..1.0e9) {
        prop_assert_eq!(
            parse_weight_kg(&CellValue::Float(value)),
            Some(CellValue::Float(value))
        );
    }

    #[test]
    fn currency_strip_round_trips(value in 0.0f64..1.0e6) {
        let cell = text(format!("£{value}"));
        let Some(CellValue::Float(parsed)) = parse_currency(&cell) else {
            return Err(TestCaseError::fail("currency failed to coerce"));
        };
        prop_assert!((parsed - value).abs() <= value.abs() * 1e-12 + 1e-12);
    }

    #[test]
    fn trim_is_idempotent(value in "\\PC{0,40}") {
        let once = trim_text(&text(value));
        if let Some(cell) = &once {
            prop_assert_eq!(trim_text(cell), once.clone());
        }
    }

    #[test]
    fn number_parse_accepts_display_format(value in -1.0e12f64..1.0e12) {
        let cell = text(value.to_string());
        let Some(CellValue::Float(parsed)) = parse_number(&cell) else {
            return Err(TestCaseError::fail("number failed to coerce"));
        };
        prop_assert!((parsed - value).abs() <= value.abs() * 1e-12);
    }
}
