use prettytable::{format, Cell, Row, Table};

use super::Report;

pub const HEADERS: [&str; 3] = ["Task", "Description", "Duration (hours)"];

/// Lays a report out as a table: one line per record and a last line with the day's total.
pub fn report_table(report: &Report) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new(HEADERS[0]).style_spec("b"),
        Cell::new(HEADERS[1]).style_spec("b"),
        Cell::new(HEADERS[2]).style_spec("br"),
    ]));

    for row in &report.rows {
        table.add_row(Row::new(vec![
            Cell::new(&row.task),
            Cell::new(&row.description),
            Cell::new(&row.hours()).style_spec("r"),
        ]));
    }

    table.add_row(Row::new(vec![
        Cell::new(""),
        Cell::new(""),
        Cell::new(&report.total_hours()).style_spec("bFgr"),
    ]));
    table
}
