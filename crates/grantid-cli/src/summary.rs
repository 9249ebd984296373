use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::ConvertResult;

pub fn print_summary(result: &ConvertResult) {
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Grants"),
        header_cell("Skipped"),
        header_cell("Field warnings"),
    ]);
    apply_counts_table_style(&mut table);
    table.add_row(vec![
        Cell::new(result.records_read),
        Cell::new(result.grants)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        count_cell(result.report.skipped.len(), Color::Red),
        count_cell(result.report.field_warnings.len(), Color::Yellow),
    ]);
    println!("{table}");

    print_skipped_table(result);
    print_warning_table(result);
}

fn print_skipped_table(result: &ConvertResult) {
    if result.report.skipped.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Id"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    for skipped in &result.report.skipped {
        table.add_row(vec![
            Cell::new(skipped.record_number),
            dim_cell(&skipped.record_id),
            Cell::new(&skipped.reason).fg(Color::Red),
        ]);
    }
    println!();
    println!("Skipped records:");
    println!("{table}");
}

fn print_warning_table(result: &ConvertResult) {
    if result.report.field_warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for warning in &result.report.field_warnings {
        table.add_row(vec![
            Cell::new(warning.record_number),
            Cell::new(&warning.field),
            Cell::new(&warning.message).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Field warnings:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_counts_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
    for index in 0..4 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
