use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

use mrdc_cli::pipeline::DatasetOutcome;
use mrdc_model::RejectionReason;

pub fn print_summary(outcome: &DatasetOutcome) {
    println!("Dataset: {}", outcome.kind);
    println!(
        "Target: {}{}",
        outcome.target_table,
        if outcome.loaded { "" } else { " (dry run)" }
    );

    let report = &outcome.report;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Empty"),
        header_cell("Missing required"),
        header_cell("Bad value"),
        header_cell("Bad date"),
        header_cell("Duplicates"),
        header_cell("Time (ms)"),
    ]);
    apply_table_style(&mut table);
    for idx in 0..8 {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    let dropped = |reason: RejectionReason| report.dropped.get(&reason).copied().unwrap_or(0);
    table.add_row(vec![
        Cell::new(report.rows_in),
        Cell::new(report.rows_out).fg(Color::Green),
        count_cell(report.rows_empty),
        count_cell(dropped(RejectionReason::MissingRequired)),
        count_cell(dropped(RejectionReason::CoercionFailed)),
        count_cell(dropped(RejectionReason::InvalidDate)),
        count_cell(dropped(RejectionReason::Duplicate)),
        Cell::new(outcome.elapsed_ms),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}
