//! Plain-text and JSON rendering of report views.

use std::io::{self, Write};

use crate::domain::{ActivityRecord, Report};

const HEADERS: [&str; 9] = [
    "ID",
    "User ID",
    "Username",
    "Date",
    "Distance",
    "Electricity",
    "Waste",
    "Meals",
    "Total Emissions",
];

const COLUMN_GAP: &str = "  ";

fn cells(record: &ActivityRecord) -> [String; 9] {
    [
        record.id.to_string(),
        record.user_id.to_string(),
        record.username.to_string(),
        record.date.format("%Y-%m-%d").to_string(),
        format!("{:.1}", record.annual.distance),
        format!("{:.1}", record.annual.electricity),
        format!("{:.1}", record.annual.waste),
        record.annual.meals.to_string(),
        format!("{:.2}", record.total_emissions),
    ]
}

fn write_row<W, S>(out: &mut W, row: &[S], widths: &[usize]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(out, "{}", line.trim_end())
}

/// Write the report title followed by an aligned table of its rows.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_table<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", report.title())?;
    if report.records.is_empty() {
        return writeln!(out, "No activity recorded yet.");
    }

    let rows: Vec<[String; 9]> = report.records.iter().map(cells).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

/// Write the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns the serializer error, which wraps any failure from `out`.
pub fn write_json<W: Write>(report: &Report, out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out).map_err(serde_json::Error::io)
}
