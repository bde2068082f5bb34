//! Exact-duplicate removal.
//!
//! Two rows are duplicates only when every cell is equal; rows
//! differing in a single cell are both kept. First occurrence wins
//! and source order is preserved.

use std::collections::BTreeSet;

use mrdc_model::{CellValue, Row};

/// Drop exact duplicates from `rows`, returning the survivors and
/// the number of rows removed.
pub fn dedupe_rows(rows: Vec<Row>) -> (Vec<Row>, usize) {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut kept = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;
    for row in rows {
        if seen.insert(row_key(&row)) {
            kept.push(row);
        } else {
            dropped += 1;
        }
    }
    (kept, dropped)
}

/// Composite key over all cells. Every variable-length segment is
/// length-prefixed, so cell content can never collide with the
/// separators. Floats key on their bit pattern so equal values
/// compare equal without formatting round-trips.
fn row_key(row: &Row) -> String {
    let mut key = String::new();
    let mut push_segment = |key: &mut String, segment: &str| {
        key.push_str(&segment.len().to_string());
        key.push(':');
        key.push_str(segment);
    };
    for (name, cell) in &row.cells {
        push_segment(&mut key, name);
        key.push('=');
        match cell {
            CellValue::Text(value) => {
                key.push('t');
                push_segment(&mut key, value);
            }
            CellValue::Float(value) => {
                key.push('f');
                key.push_str(&value.to_bits().to_string());
            }
            CellValue::Int(value) => {
                key.push('i');
                key.push_str(&value.to_string());
            }
            CellValue::Date(value) => {
                key.push('d');
                key.push_str(&value.to_string());
            }
            CellValue::DateTime(value) => {
                key.push('s');
                key.push_str(&value.to_string());
            }
            CellValue::Missing => key.push('m'),
        }
        key.push('|');
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, name: &str, qty: i64) -> Row {
        let mut row = Row::new(id);
        row.cells
            .insert("name".to_string(), CellValue::Text(name.to_string()));
        row.cells.insert("qty".to_string(), CellValue::Int(qty));
        row
    }

    #[test]
    fn identical_rows_collapse_to_first() {
        let (kept, dropped) = dedupe_rows(vec![row(0, "a", 1), row(1, "a", 1), row(2, "b", 1)]);
        assert_eq!(dropped, 1);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].id, 0);
        assert_eq!(kept[1].id, 2);
    }

    #[test]
    fn rows_differing_in_one_cell_are_kept() {
        let (kept, dropped) = dedupe_rows(vec![row(0, "a", 1), row(1, "a", 2)]);
        assert_eq!(dropped, 0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn separator_characters_in_text_do_not_collide() {
        // The raw concatenation of these two rows is identical; only
        // the cell boundaries differ.
        let mut first = Row::new(0);
        first
            .cells
            .insert("a".to_string(), CellValue::Text("1|b=t2".to_string()));
        first
            .cells
            .insert("b".to_string(), CellValue::Text("x".to_string()));
        let mut second = Row::new(1);
        second
            .cells
            .insert("a".to_string(), CellValue::Text("1".to_string()));
        second
            .cells
            .insert("b".to_string(), CellValue::Text("2|b=tx".to_string()));

        let (kept, dropped) = dedupe_rows(vec![first, second]);
        assert_eq!(dropped, 0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn row_id_does_not_affect_equality() {
        let (kept, dropped) = dedupe_rows(vec![row(7, "a", 1), row(9, "a", 1)]);
        assert_eq!(dropped, 1);
        assert_eq!(kept.len(), 1);
    }
}
