use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bnf_model::{Measures, SummaryGrid, SummaryRow};
use bnf_output::{format_count, format_gbp, format_quantity};

use crate::types::AggregateResult;

/// Excluded records listed individually before the rest are counted.
const MAX_LISTED_EXCLUSIONS: usize = 10;

pub fn print_summary(result: &AggregateResult) {
    if result.show_table {
        println!("Prescribing: {}", result.prescribing.display());
        println!("Codelist: {}", result.codelist_label);
        println!(
            "Records: {} read, {} aggregated, {} outside allow-list",
            format_count(count(result.record_count)),
            format_count(count(result.outcome.aggregated_records)),
            format_count(count(result.outcome.outside_allow_list)),
        );
        println!(
            "Cost override: {}",
            if result.options.cost_override.enabled {
                "on"
            } else {
                "off"
            }
        );
        print_grid(&result.outcome.grid);
    }
    if let Some((path, format)) = &result.output {
        eprintln!("Output: {} ({format})", path.display());
    }
    print_exclusions(result);
}

fn count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn print_grid(grid: &SummaryGrid) {
    if grid.is_empty() {
        println!("No matching providers or categories.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Provider"),
        header_cell("Category"),
        header_cell("Items"),
        header_cell("Quantity x Items"),
        header_cell("Estimated Cost"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in grid {
        table.add_row(row_cells(row));
    }
    let totals = grid.totals();
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} categories", grid.categories.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    match totals {
        Some(totals) => total_row.extend(
            measure_cells(&totals)
                .into_iter()
                .map(|cell| cell.add_attribute(Attribute::Bold)),
        ),
        None => total_row.extend((0..3).map(|_| Cell::new("overflow").fg(Color::Red))),
    }
    table.add_row(total_row);
    println!("{table}");
}

fn row_cells(row: &SummaryRow) -> Vec<Cell> {
    let measures = row.measures();
    let mut cells = vec![Cell::new(&row.provider_code), Cell::new(&row.category)];
    if measures.is_zero() {
        cells.extend(
            measure_cells(&measures)
                .into_iter()
                .map(|cell| cell.add_attribute(Attribute::Dim)),
        );
    } else {
        cells.extend(measure_cells(&measures));
    }
    cells
}

fn measure_cells(measures: &Measures) -> Vec<Cell> {
    vec![
        Cell::new(format_count(measures.items)),
        Cell::new(format_quantity(measures.quantity_x_items)),
        Cell::new(format_gbp(measures.estimated_cost)),
    ]
}

fn print_exclusions(result: &AggregateResult) {
    let excluded = &result.outcome.excluded;
    if excluded.is_empty() {
        return;
    }
    eprintln!("Excluded {} record(s) with negative measures:", excluded.len());
    for record in excluded.iter().take(MAX_LISTED_EXCLUSIONS) {
        eprintln!("- {record}");
    }
    if excluded.len() > MAX_LISTED_EXCLUSIONS {
        eprintln!("- ... and {} more", excluded.len() - MAX_LISTED_EXCLUSIONS);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
