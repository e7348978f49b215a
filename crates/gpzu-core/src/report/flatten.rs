//! Flat, spreadsheet-shaped view of a parse result.
//!
//! Columns are `"<group> / <field>"`. A map directly under a field becomes
//! one column per key. List-valued columns of equal length expand together,
//! one row per position; lists of different lengths cross with each other.
//! An empty list counts as a single null. Maps produced by a list become
//! `"<column> / <key>"` columns.

use super::{ParseResult, Value};

const SEPARATOR: &str = " / ";

/// Rows of scalar cells under named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl FlatTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Tab-separated rendering with a header line.
    pub fn to_tsv(&self) -> String {
        let mut out = self.columns.join("\t");
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|v| v.display_text().replace(['\t', '\n'], " "))
                .collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }
}

pub fn flatten(result: &ParseResult) -> FlatTable {
    let mut columns = Vec::new();
    let mut row = Vec::new();
    for group in &result.groups {
        for (label, value) in &group.fields {
            push_normalized(
                &mut columns,
                &mut row,
                format!("{}{SEPARATOR}{}", group.title, label),
                value,
            );
        }
    }

    let mut table = FlatTable {
        columns,
        rows: vec![row],
    };

    loop {
        if let Some(col) = first_column_with(&table, |v| matches!(v, Value::List(_))) {
            explode(&mut table, col);
        } else if let Some(col) = first_column_with(&table, |v| matches!(v, Value::Map(_))) {
            expand(&mut table, col);
        } else {
            break;
        }
    }

    table
}

/// Expand nested maps into prefixed columns; anything else is one column.
fn push_normalized(columns: &mut Vec<String>, row: &mut Vec<Value>, name: String, value: &Value) {
    match value {
        Value::Map(entries) => {
            for (key, inner) in entries {
                push_normalized(columns, row, format!("{name}{SEPARATOR}{key}"), inner);
            }
        }
        _ => {
            columns.push(name);
            row.push(value.clone());
        }
    }
}

fn first_column_with(table: &FlatTable, pred: impl Fn(&Value) -> bool) -> Option<usize> {
    (0..table.columns.len()).find(|&c| table.rows.iter().any(|r| pred(&r[c])))
}

/// Expand the list in column `col` together with every other list of the
/// same length in the row: item `i` of each goes to the `i`-th new row.
fn explode(table: &mut FlatTable, col: usize) {
    let rows = std::mem::take(&mut table.rows);
    for row in rows {
        let Some(len) = row[col].as_list().map(<[Value]>::len) else {
            table.rows.push(row);
            continue;
        };
        let zipped: Vec<usize> = (0..row.len())
            .filter(|&c| row[c].as_list().is_some_and(|l| l.len() == len))
            .collect();

        if len == 0 {
            let mut row = row;
            for &c in &zipped {
                row[c] = Value::Null;
            }
            table.rows.push(row);
            continue;
        }

        for i in 0..len {
            let mut new_row = row.clone();
            for &c in &zipped {
                if let Value::List(items) = &row[c] {
                    new_row[c] = items[i].clone();
                }
            }
            table.rows.push(new_row);
        }
    }
}

/// Replace map column `col` by one column per key, in first-seen order.
/// Rows without a map there get nulls.
fn expand(table: &mut FlatTable, col: usize) {
    let mut keys: Vec<String> = Vec::new();
    for row in &table.rows {
        if let Value::Map(entries) = &row[col] {
            for (key, _) in entries {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
    }

    let name = table.columns.remove(col);
    for (i, key) in keys.iter().enumerate() {
        table
            .columns
            .insert(col + i, format!("{name}{SEPARATOR}{key}"));
    }

    for row in &mut table.rows {
        let cell = row.remove(col);
        for (i, key) in keys.iter().enumerate() {
            row.insert(col + i, cell.get(key).cloned().unwrap_or(Value::Null));
        }
    }
}
