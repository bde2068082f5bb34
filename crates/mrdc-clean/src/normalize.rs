//! The profile-driven normalization engine.
//!
//! One generic pipeline, six configurations. Step order is fixed and
//! load-bearing: header canonicalization must precede anything that
//! addresses a column by canonical name, coercion must precede
//! validation, validation must precede dedup so rejected rows cannot
//! shield a surviving duplicate.
//!
//! 1. drop rows that are empty across all columns
//! 2. canonicalize column names (trim, lowercase, spaces to `_`)
//! 3. drop known-redundant columns when present
//! 4. structural check: required source columns must exist
//! 5. per-cell coercion (+ composite date-time assembly)
//! 6. row validation
//! 7. exact-duplicate drop
//! 8. dense zero-based row id resequencing

use std::collections::BTreeMap;

use tracing::{debug, info};

use mrdc_model::{
    CellValue, CoercionRule, DatasetKind, DatasetProfile, NormalizedTable, RawTable,
    RejectionReason, Row, StructuralError,
};

use crate::coerce;
use crate::dedupe::dedupe_rows;
use crate::validate::validate_row;

/// Shape accounting for one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows that were blank across every column.
    pub rows_empty: usize,
    pub dropped: BTreeMap<RejectionReason, usize>,
}

impl NormalizeReport {
    pub fn dropped_total(&self) -> usize {
        self.rows_empty + self.dropped.values().sum::<usize>()
    }

    fn record_drop(&mut self, reason: RejectionReason) {
        *self.dropped.entry(reason).or_insert(0) += 1;
    }
}

/// A normalized table together with its run report.
#[derive(Debug, Clone)]
pub struct NormalizedOutput {
    pub table: NormalizedTable,
    pub report: NormalizeReport,
}

/// Canonical form of a source column name: trimmed, lowercased,
/// spaces replaced with underscores.
pub fn canonical_column(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalize a raw table for a dataset kind.
///
/// Ordinary malformed data never errors: bad cells degrade or drop
/// their row. The only failure that crosses this boundary is
/// structural, a column the contract requires being entirely absent
/// from the source schema.
pub fn normalize_table(
    kind: DatasetKind,
    raw: &RawTable,
) -> Result<NormalizedOutput, StructuralError> {
    let profile = DatasetProfile::for_kind(kind);
    let mut report = NormalizeReport {
        rows_in: raw.height(),
        ..NormalizeReport::default()
    };

    if raw.columns.is_empty() {
        return Err(StructuralError::EmptySchema {
            source_name: raw.source.clone(),
        });
    }

    // Steps 2-3 on the schema.
    let mut columns: Vec<String> = raw
        .columns
        .iter()
        .map(|name| canonical_column(name))
        .filter(|name| !profile.drop_columns.contains(&name.as_str()))
        .collect();
    columns.dedup();

    // Step 4: composite sources are only demanded when the target is
    // not already present, so normalizing an already-normalized table
    // stays structurally valid.
    let target_present = profile
        .composite
        .is_some_and(|c| columns.iter().any(|name| name == c.target));
    for required in profile.required_source_columns() {
        let satisfied_by_target = target_present
            && profile
                .composite
                .is_some_and(|c| [c.year, c.month, c.day, c.time].contains(&required));
        if satisfied_by_target {
            continue;
        }
        if !columns.iter().any(|name| name == required) {
            return Err(StructuralError::MissingColumn {
                kind: kind.to_string(),
                column: required.to_string(),
            });
        }
    }

    // Composite assembly consumes its source columns.
    if let Some(composite) = profile.composite
        && !target_present
    {
        columns.retain(|name| {
            ![composite.year, composite.month, composite.day, composite.time]
                .contains(&name.as_str())
        });
        columns.push(composite.target.to_string());
    }

    let mut survivors: Vec<Row> = Vec::with_capacity(raw.height());
    for source_row in &raw.rows {
        // Step 1.
        if source_row.is_empty() {
            report.rows_empty += 1;
            continue;
        }
        let canonical = canonicalize_row(source_row, profile);
        // Step 5.
        let coerced = coerce_row(&canonical, profile, &columns);
        // Step 6.
        if !profile.pass_through {
            if let Err(reason) = validate_row(&canonical, &coerced, profile) {
                debug!(row = source_row.id, reason = reason.as_str(), "row dropped");
                report.record_drop(reason);
                continue;
            }
        }
        survivors.push(coerced);
    }

    // Step 7.
    let (mut rows, duplicates) = dedupe_rows(survivors);
    if duplicates > 0 {
        report.dropped.insert(RejectionReason::Duplicate, duplicates);
    }

    // Step 8.
    for (idx, row) in rows.iter_mut().enumerate() {
        row.id = idx as u64;
    }

    report.rows_out = rows.len();
    info!(
        kind = %kind,
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        dropped = report.dropped_total(),
        "dataset normalized"
    );

    let mut table = NormalizedTable::new(columns);
    table.rows = rows;
    Ok(NormalizedOutput { table, report })
}

/// Rebuild a row under canonical column names, minus dropped columns.
fn canonicalize_row(row: &Row, profile: &DatasetProfile) -> Row {
    let mut canonical = Row::new(row.id);
    for (name, cell) in &row.cells {
        let name = canonical_column(name);
        if profile.drop_columns.contains(&name.as_str()) {
            continue;
        }
        canonical.cells.insert(name, cell.clone());
    }
    canonical
}

/// Apply coercers per the profile, producing a fresh row.
///
/// Cells without a spec pass through untouched; a failed coercion
/// leaves `Missing` for the validator to judge.
fn coerce_row(row: &Row, profile: &DatasetProfile, columns: &[String]) -> Row {
    let mut coerced = Row::new(row.id);
    if profile.pass_through {
        for name in columns {
            coerced.cells.insert(name.clone(), row.cell(name).clone());
        }
        return coerced;
    }
    for name in columns {
        let cell = if let Some(composite) = profile.composite.filter(|c| c.target == *name) {
            if row.cells.contains_key(composite.target) {
                // Already assembled on a previous run.
                coerce::parse_date(row.cell(composite.target))
            } else {
                coerce::parse_composite_datetime(
                    row.cell(composite.year),
                    row.cell(composite.month),
                    row.cell(composite.day),
                    row.cell(composite.time),
                )
            }
        } else {
            match profile.spec(name) {
                Some(spec) => apply_rule(spec.rule, row.cell(name)),
                None => Some(row.cell(name).clone()),
            }
        };
        coerced
            .cells
            .insert(name.clone(), cell.unwrap_or(CellValue::Missing));
    }
    coerced
}

fn apply_rule(rule: CoercionRule, cell: &CellValue) -> Option<CellValue> {
    match rule {
        CoercionRule::Trim => coerce::trim_text(cell),
        CoercionRule::Capitalize => coerce::capitalize(cell),
        CoercionRule::Date => coerce::parse_date(cell),
        CoercionRule::Numeric => coerce::parse_number(cell),
        CoercionRule::Integer => coerce::parse_integer(cell),
        CoercionRule::Weight => coerce::parse_weight_kg(cell),
        CoercionRule::Currency => coerce::parse_currency(cell),
    }
}
