use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::SummaryReport;

pub fn print_summary(report: &SummaryReport) {
    let ingest = &report.ingest;
    println!(
        "Codes: {} from {} lines ({} discarded)",
        ingest.codes, ingest.cells, ingest.discarded
    );
    println!("Nodes: {}", ingest.nodes);
    if report.levels.is_empty() {
        println!("Tree is empty.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Nodes"),
        header_cell("Leaves"),
        header_cell("Checked"),
        header_cell("Partial"),
        header_cell("Annotated"),
    ]);
    apply_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_nodes = 0usize;
    let mut total_leaves = 0usize;
    for level in &report.levels {
        total_nodes += level.nodes;
        total_leaves += level.leaves;
        table.add_row(vec![
            Cell::new(level.depth)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(level.nodes),
            Cell::new(level.leaves),
            count_cell(level.checked, Color::Green),
            count_cell(level.indeterminate, Color::Yellow),
            count_cell(level.annotated, Color::Magenta),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_nodes).add_attribute(Attribute::Bold),
        Cell::new(total_leaves).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
