//! Human-readable summaries for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::types::{CheckResult, ConvertResult};

pub fn print_convert_summary(result: &ConvertResult) {
    if result.dry_run {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec!["Category", "Instrument", "Table", "Fields", "Lines"]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for instrument in &result.instruments {
        table.add_row(vec![
            Cell::new(&instrument.category_id),
            Cell::new(&instrument.title),
            Cell::new(&instrument.table_name),
            Cell::new(instrument.field_count),
            Cell::new(instrument.line_count),
        ]);
    }
    println!("{table}");
    if !result.skipped.is_empty() {
        println!(
            "Skipped {} field group(s) without a usable category record",
            result.skipped.len()
        );
    }
}

pub fn print_check_summary(result: &CheckResult) {
    println!(
        "Indexed schema files: {} ({} missing)",
        result.indexed,
        result.missing.len()
    );
    for path in &result.missing {
        println!("missing: {}", path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
