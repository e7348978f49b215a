use serde::{Deserialize, Serialize};

/// A single cell of an extracted table.
///
/// Serialized untagged: text as a JSON string, numbers as JSON numbers and
/// empty cells as `null`, which keeps cache records readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Build a text cell, mapping blank text to `Cell::Empty`.
    pub fn text(s: impl Into<String>) -> Cell {
        let s = s.into();
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
        }
    }

    /// Textual rendering of the cell. Empty cells render as `""`, integral
    /// numbers without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.is_nan() => String::new(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// A raw table as produced by the table extraction service.
///
/// `columns` holds the header row (the first row the extractor saw);
/// `rows[r][c]` is the data cell at row `r`, column `c`. Tables built with
/// [`Table::new`] or deserialized are padded to a common width; tables built
/// from the fields directly may be ragged, so readers go through
/// [`Table::cell`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTable")]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Wire form of [`Table`], padded on the way in.
#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Cell>>,
}

impl From<RawTable> for Table {
    fn from(raw: RawTable) -> Self {
        Table::new(raw.columns, raw.rows)
    }
}

/// Outcome of looking for the `1 … 8` enumeration row that numbers the
/// columns of the construction-limits and exemption tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationHeader {
    /// Row index of the enumeration row.
    Found(usize),
    /// The first row starting with "1" does not end with "8": a table of a
    /// different shape.
    WrongShape,
    Missing,
}

impl Table {
    /// Build a table, padding the header and the rows to a common width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Table {
        let width = rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(columns.len()))
            .max()
            .unwrap_or(0);

        let mut columns = columns;
        columns.resize(width, String::new());
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, Cell::Empty);
                r
            })
            .collect();

        Table { columns, rows }
    }

    /// Build a table from raw rows, using the first row as the header.
    pub fn from_grid(mut grid: Vec<Vec<Cell>>) -> Table {
        if grid.is_empty() {
            return Table::default();
        }
        let header = grid.remove(0).iter().map(Cell::as_text).collect();
        Table::new(header, grid)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Whether the first column header starts with `marker`.
    pub fn header_starts_with(&self, marker: &str) -> bool {
        self.columns
            .first()
            .is_some_and(|c| c.trim_start().starts_with(marker))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy of the table without the columns whose data cells are all empty.
    /// Header text does not count as data.
    pub fn without_empty_columns(&self) -> Table {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.width()))
            .max()
            .unwrap_or(0);
        let keep: Vec<usize> = (0..width)
            .filter(|&c| (0..self.height()).any(|r| !self.cell(r, c).is_empty()))
            .collect();

        Table::new(
            keep.iter()
                .map(|&c| self.columns.get(c).cloned().unwrap_or_default())
                .collect(),
            (0..self.height())
                .map(|r| keep.iter().map(|&c| self.cell(r, c).clone()).collect())
                .collect(),
        )
    }

    /// Locate the enumeration row: the first row whose first cell starts
    /// with "1" decides, valid only when its last cell ends with "8".
    pub fn enumeration_header(&self) -> EnumerationHeader {
        for (i, row) in self.rows.iter().enumerate() {
            let first = row.first().map(Cell::as_text).unwrap_or_default();
            if !first.trim_start().starts_with('1') {
                continue;
            }
            let last = row.last().map(Cell::as_text).unwrap_or_default();
            return if last.trim_end().ends_with('8') {
                EnumerationHeader::Found(i)
            } else {
                EnumerationHeader::WrongShape
            };
        }
        EnumerationHeader::Missing
    }
}

/// Find the first table whose first column header starts with `marker`.
pub fn find_table<'a>(tables: &'a [Table], marker: &str) -> Option<(usize, &'a Table)> {
    tables
        .iter()
        .enumerate()
        .find(|(_, t)| t.header_starts_with(marker))
}
