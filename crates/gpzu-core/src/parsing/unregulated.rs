use tracing::debug;

use crate::extraction::table::{find_table, EnumerationHeader, Table};

const UNREGULATED_TABLE_MARKER: &str = "Причины отнесения";

/// A table with fewer data rows under its enumeration row is a blank form.
const MIN_DATA_ROWS: usize = 3;

/// Whether the plan lists capital construction objects exempt from the
/// zoning regulations.
///
/// The table is recognized by its first column header. When the table found
/// does not carry a valid enumeration row, the extractor most likely split
/// it, and the table right after it is checked instead.
pub fn has_unregulated_objects(tables: &[Table]) -> bool {
    let Some((position, table)) = find_table(tables, UNREGULATED_TABLE_MARKER) else {
        return false;
    };

    if let Some(has_data) = check_table(table) {
        return has_data;
    }

    debug!(position, "exemption table malformed, trying the next one");
    tables
        .get(position + 1)
        .and_then(check_table)
        .unwrap_or(false)
}

/// `None` when the table does not have the expected shape.
fn check_table(table: &Table) -> Option<bool> {
    match table.enumeration_header() {
        EnumerationHeader::Found(header) => {
            Some(table.height() - header - 1 >= MIN_DATA_ROWS)
        }
        EnumerationHeader::WrongShape | EnumerationHeader::Missing => None,
    }
}
