//! Row validation.
//!
//! Decides, per row, whether the coerced cells satisfy the dataset
//! contract. The raw (pre-coercion) row is consulted only to tell a
//! value that was never there apart from one that was present but
//! failed its coercer.

use mrdc_model::{CellValue, CoercionRule, DatasetProfile, RejectionReason, Row};

/// Accept or reject a coerced row against its profile.
///
/// Rejects when any required column is absent or blank, or when a
/// required/critical column's coercion failed on a value that was
/// present in the raw row. Non-critical coercion failures have
/// already been degraded to [`CellValue::Missing`] by the engine and
/// pass through here.
pub fn validate_row(
    raw: &Row,
    coerced: &Row,
    profile: &DatasetProfile,
) -> Result<(), RejectionReason> {
    for spec in profile.columns {
        if !spec.required && !spec.critical {
            continue;
        }
        if !coerced.cell(spec.name).is_missing() {
            continue;
        }
        let raw_present = !raw_is_blank(raw.cell(spec.name));
        let reason = if raw_present {
            match spec.rule {
                CoercionRule::Date => RejectionReason::InvalidDate,
                _ => RejectionReason::CoercionFailed,
            }
        } else if profile.composite.is_some_and(|c| c.target == spec.name) {
            // The composite column never exists in the raw row; a
            // missing result means assembly failed.
            RejectionReason::InvalidDate
        } else {
            RejectionReason::MissingRequired
        };
        return Err(reason);
    }
    Ok(())
}

fn raw_is_blank(cell: &CellValue) -> bool {
    match cell {
        CellValue::Missing => true,
        CellValue::Text(value) => value.trim().is_empty(),
        _ => false,
    }
}
