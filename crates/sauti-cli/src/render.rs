//! Terminal and CSV output.

use std::io::Write;
use std::time::Duration;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use sauti_model::{Dimension, FilterState, RowRecord, Superlist, country_label};
use sauti_session::BusyReason;

/// Column used for rows that are not JSON objects.
pub const VALUE_COLUMN: &str = "value";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

/// Union of row object keys, in first-seen order.
#[must_use]
pub fn row_columns(rows: &[RowRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    };
    for row in rows {
        match row.as_value() {
            Value::Object(map) => map.keys().for_each(|key| push(key.as_str())),
            _ => push(VALUE_COLUMN),
        }
    }
    columns
}

/// Text for one cell. Missing and null values are blank.
#[must_use]
pub fn cell_text(row: &RowRecord, column: &str) -> String {
    let value = match row.as_value() {
        Value::Object(map) => map.get(column),
        other if column == VALUE_COLUMN => Some(other),
        _ => None,
    };
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// The cached row page as a table.
#[must_use]
pub fn rows_table(rows: &[RowRecord]) -> Table {
    let columns = row_columns(rows);
    let mut table = Table::new();
    table.set_header(columns.iter().map(|c| header_cell(c)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(columns.iter().map(|c| cell_text(row, c)).collect::<Vec<_>>());
    }
    table
}

/// Current selections, one line per dimension.
#[must_use]
pub fn filters_table(filters: &FilterState) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter"), header_cell("Selected")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Currency"), Cell::new(filters.currency())]);
    for dimension in Dimension::ALL {
        let values = filters.values(dimension);
        let cell = if values.is_empty() {
            dim_cell("-")
        } else if dimension == Dimension::Countries {
            Cell::new(
                values
                    .iter()
                    .map(|code| country_label(code))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        } else {
            Cell::new(values.join(", "))
        };
        table.add_row(vec![Cell::new(dimension.label()), cell]);
    }
    let range = filters.date_range().map_or_else(
        || dim_cell("-"),
        |range| {
            let (start, end) = range.wire_bounds();
            Cell::new(format!("{start} to {end}"))
        },
    );
    table.add_row(vec![Cell::new("Dates"), range]);
    table
}

/// Available options for one dimension.
#[must_use]
pub fn options_table(options: &Superlist, dimension: Dimension) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell(dimension.label())]);
    apply_table_style(&mut table);
    for (code, label) in options.labelled_options(dimension) {
        table.add_row(vec![code, label]);
    }
    table
}

/// Write the row page as CSV with a header row.
pub fn write_page_csv<W: Write>(rows: &[RowRecord], writer: W) -> csv::Result<()> {
    let columns = row_columns(rows);
    let mut wtr = csv::Writer::from_writer(writer);
    if columns.is_empty() {
        return wtr.flush().map_err(csv::Error::from);
    }
    wtr.write_record(&columns)?;
    for row in rows {
        wtr.write_record(columns.iter().map(|c| cell_text(row, c)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Spinner shown while an operation is in flight. Hidden when stderr is not a terminal.
#[must_use]
pub fn spinner(reason: BusyReason) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(reason.label());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
