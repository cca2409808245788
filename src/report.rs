//! Plain-text table rendering of shared files.

use std::io::{self, Write};

use crate::enumerator::Listing;
use crate::models::SharedFileRecord;

const HEADERS: [&str; 5] = ["Name", "Type", "ID", "Shared By", "Last Modified"];

const COLUMN_SEPARATOR: &str = " | ";

fn cells(record: &SharedFileRecord) -> [&str; 5] {
    [
        record.name.as_str(),
        record.mime_type.as_str(),
        record.id.as_str(),
        record.shared_by.as_str(),
        record.modified_time.as_str(),
    ]
}

fn write_row(out: &mut impl Write, row: &[&str; 5], widths: &[usize; 5]) -> io::Result<()> {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    writeln!(out, "{}", line.trim_end())
}

/// Write `records` as an aligned table, or a notice when there are none.
pub fn render_report(records: &[SharedFileRecord], out: &mut impl Write) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "No shared files found.")?;
        return Ok(());
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for record in records {
        for (width, cell) in widths.iter_mut().zip(cells(record)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "Shared files found:")?;
    write_row(out, &HEADERS, &widths)?;
    let total = widths.iter().sum::<usize>() + COLUMN_SEPARATOR.len() * (widths.len() - 1);
    writeln!(out, "{}", "-".repeat(total))?;
    for record in records {
        write_row(out, &cells(record), &widths)?;
    }
    writeln!(out, "{} file(s)", records.len())?;

    Ok(())
}

/// Write the outcome of a run: the error that cut it short, if any,
/// then the report of whatever was collected.
pub fn print_listing(listing: &Listing, out: &mut impl Write) -> io::Result<()> {
    if let Some(e) = &listing.error {
        writeln!(out, "An error occurred: {}", e)?;
    }
    writeln!(out)?;
    render_report(&listing.records, out)
}
