//! Construction-limits table: locate it, validate its shape and split it
//! into subzones.
//!
//! Index arithmetic on the located table (after empty columns are dropped):
//! the enumeration row `1_2_3 … 8` names the columns; it and the two header
//! rows under it are dropped, the rest are data rows. Within a subzone group
//! row 0 is the marker row (real zones only), so the first data row is row 1.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::extraction::table::{find_table, Cell, EnumerationHeader, Table};
use crate::model::{Subzone, IMPLICIT_SUBZONE, NO_VALUE};

const LIMITS_TABLE_MARKER: &str = "Предельные (минимальные";

/// First-column names of the two known table layouts.
const COLUMN_SIGNATURES: &[&str] = &["1_2_3", "1_2_3_4"];

/// Header rows below the enumeration row.
const HEADER_TAIL_ROWS: usize = 2;

/// `№` as rendered by the text layer of the tables.
const ZONE_MARKER: &str = "No";

const PURPOSE_PHRASE: &str = "Назначение объекта";
const HEIGHT_PHRASE: &str = "Предельная высота";
const FLOORS_PHRASE: &str = "Предельное количество этажей";
const FLOORS_SPLIT: &str = "Предельное";
const FLOOR_AREA_PHRASE: &str = "Суммарная поэтажная площадь объекта";
const GROUND_AREA_PHRASE: &str = "Наземная площадь";
const TOTAL_AREA_PHRASE: &str = "Общая площадь";

const HEIGHT_COLUMN: &str = "5";
const DEV_PERCENT_COLUMN: &str = "6";
const AREAS_COLUMN: &str = "8";

static ZONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"No (\d+)").expect("valid zone number regex"));
static ZONE_AREA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\.\d+ ?\w+\)").expect("valid zone area regex"));
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid integer regex"));
static SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[А-Я][^А-Я]+").expect("valid sentence regex"));
static AREA_FIGURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+,?\d*").expect("valid area figure regex"));

/// Rows of one subzone within the data table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ZoneGroup {
    /// 1-based ordinal of the marker row; `None` for the implicit zone.
    ordinal: Option<usize>,
    rows: Vec<usize>,
}

/// Extract the subzones of the construction-limits table. Any shape
/// mismatch yields no subzones.
pub fn extract_subzones(tables: &[Table]) -> Vec<Subzone> {
    let Some((_, table)) = find_table(tables, LIMITS_TABLE_MARKER) else {
        return Vec::new();
    };
    let Some(data) = limits_data(table) else {
        return Vec::new();
    };

    let mut subzones: Vec<Subzone> = Vec::new();
    for group in group_zones(&data) {
        let subzone = read_subzone(&data, &group);
        match subzones.iter_mut().find(|s| s.index == subzone.index) {
            Some(existing) => *existing = subzone,
            None => subzones.push(subzone),
        }
    }
    subzones
}

/// Validate the table and return its data rows under the enumeration
/// column names.
fn limits_data(table: &Table) -> Option<Table> {
    let table = table.without_empty_columns();

    let header = match table.enumeration_header() {
        EnumerationHeader::Found(i) => i,
        EnumerationHeader::WrongShape => {
            debug!("limits table enumeration row does not end with 8");
            return None;
        }
        EnumerationHeader::Missing => {
            debug!("limits table has no enumeration row");
            return None;
        }
    };

    let columns: Vec<String> = table.rows[header]
        .iter()
        .map(|c| c.as_text().replace(' ', "_"))
        .collect();
    let rows = table
        .rows
        .iter()
        .skip(header + 1 + HEADER_TAIL_ROWS)
        .cloned()
        .collect();
    let data = Table::new(columns, rows);

    let first = data.columns.first().map(String::as_str).unwrap_or_default();
    if !COLUMN_SIGNATURES.contains(&first) {
        debug!(column = first, "unrecognized shape for limits table");
        return None;
    }

    Some(data)
}

/// A marker row opens a subzone: "No" in the first cell, nothing else.
fn is_marker_row(row: &[Cell]) -> bool {
    row.first()
        .is_some_and(|c| c.as_text().contains(ZONE_MARKER))
        && row.iter().skip(1).all(Cell::is_empty)
}

/// Split data rows into subzones. Rows before the first marker belong to no
/// zone; without markers the whole table is the implicit zone.
fn group_zones(data: &Table) -> Vec<ZoneGroup> {
    let mut groups: Vec<ZoneGroup> = Vec::new();

    for (i, row) in data.rows.iter().enumerate() {
        if is_marker_row(row) {
            groups.push(ZoneGroup {
                ordinal: Some(groups.len() + 1),
                rows: vec![i],
            });
        } else if let Some(group) = groups.last_mut() {
            group.rows.push(i);
        }
    }

    if groups.is_empty() {
        groups.push(ZoneGroup {
            ordinal: None,
            rows: (0..data.height()).collect(),
        });
    }
    groups
}

fn read_subzone(data: &Table, group: &ZoneGroup) -> Subzone {
    let mut subzone = match group.ordinal {
        Some(ordinal) => {
            let title = data.cell(group.rows[0], 0).as_text();
            let index = ZONE_NUMBER_RE
                .captures(&title)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| ordinal.to_string());
            let mut subzone = Subzone::empty(index);
            if let Some(m) = ZONE_AREA_RE.find(&title) {
                subzone.area = m.as_str().to_string();
            }
            if let Some(description) = zone_description(&title) {
                subzone.description = description;
            }
            subzone
        }
        None => Subzone::empty(IMPLICIT_SUBZONE),
    };

    let (height, floors) = height_and_floors(&column_text(data, group, HEIGHT_COLUMN, ""));
    subzone.max_height = height;
    subzone.max_floors = floors;

    if let Some(percent) = after_last_dash(&column_text(data, group, DEV_PERCENT_COLUMN, "")) {
        subzone.max_dev_percent = percent;
    }

    let density_row = if subzone.is_implicit() { 0 } else { 1 };
    let density_cell = match (group.rows.get(density_row), data.width().checked_sub(2)) {
        (Some(&row), Some(col)) => data.cell(row, col).as_text(),
        _ => String::new(),
    };
    if let Some(density) = after_last_dash(&density_cell) {
        subzone.max_density = density;
    }

    let areas = column_text(data, group, AREAS_COLUMN, " ");
    for sentence in SENTENCE_RE.find_iter(&areas).map(|m| m.as_str()) {
        if sentence.starts_with(FLOOR_AREA_PHRASE) {
            if let Some(m) = AREA_FIGURE_RE.find(sentence) {
                subzone.area_by_floor.set("total", m.as_str());
            }
        }
        if sentence.contains(GROUND_AREA_PHRASE) || sentence.contains(TOTAL_AREA_PHRASE) {
            if let Some(m) = AREA_FIGURE_RE.find(sentence) {
                subzone.area_total.set("total", m.as_str());
            }
        }
    }

    subzone
}

/// Text after the first " - " of a title naming the object purpose.
fn zone_description(title: &str) -> Option<String> {
    if !title.contains(PURPOSE_PHRASE) {
        return None;
    }
    title
        .split_once(" - ")
        .map(|(_, description)| description.trim().to_string())
}

/// Non-empty cells of the named column across the group, joined by `sep`.
fn column_text(data: &Table, group: &ZoneGroup, column: &str, sep: &str) -> String {
    let Some(col) = data.column_index(column) else {
        return String::new();
    };
    group
        .rows
        .iter()
        .map(|&r| data.cell(r, col))
        .filter(|c| !c.is_empty())
        .map(Cell::as_text)
        .collect::<Vec<_>>()
        .join(sep)
}

fn after_last_dash(s: &str) -> Option<String> {
    s.rsplit_once(" - ").map(|(_, value)| value.trim().to_string())
}

/// Maximum height and floor count from the concatenated column "5".
fn height_and_floors(text: &str) -> (String, String) {
    let numbers: Vec<&str> = INTEGER_RE.find_iter(text).map(|m| m.as_str()).collect();
    let has_height = text.contains(HEIGHT_PHRASE);
    let has_floors = text.contains(FLOORS_PHRASE);

    match numbers.as_slice() {
        [height, floors] => (height.to_string(), floors.to_string()),
        [height] if has_height => (height.to_string(), NO_VALUE.into()),
        [floors] if has_floors => (NO_VALUE.into(), floors.to_string()),
        _ if has_height && has_floors => {
            split_height_and_floors(text).unwrap_or_else(|| (NO_VALUE.into(), NO_VALUE.into()))
        }
        _ => (NO_VALUE.into(), NO_VALUE.into()),
    }
}

/// Last resort: cut the text where the floor-count phrase begins and read
/// the value after the last " - " of each part.
fn split_height_and_floors(text: &str) -> Option<(String, String)> {
    let (height_part, floors_part) = text.split_once(FLOORS_SPLIT)?;
    Some((after_last_dash(height_part)?, after_last_dash(floors_part)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|s| Cell::text(*s)).collect()
    }

    fn limits_table(data: Vec<Vec<Cell>>) -> Table {
        let mut rows = vec![
            row(&["Длина, ширина, площадь", "Мин. площадь", "Высота", "Процент", "Иные", "Площади"]),
            row(&["1 2 3", "4", "5", "6", "7", "8"]),
            row(&["м", "кв.м", "м", "%", "", ""]),
            row(&["", "", "", "", "", ""]),
        ];
        rows.extend(data);
        Table::new(
            vec!["Предельные (минимальные) и (или) максимальные размеры".into()],
            rows,
        )
    }

    fn two_zone_table() -> Table {
        limits_table(vec![
            row(&["Подзона No 1 (0.25 га). Назначение объекта - Жилой дом", "", "", "", "", ""]),
            row(&["-", "-", "Предельная высота - 75 м", "Процент застройки - 60", "Плотность - 25", "Суммарная поэтажная площадь объекта - 12500 кв.м"]),
            row(&["", "", "Предельное количество этажей - 20", "", "", "Общая площадь - 15000 кв.м"]),
            row(&["", "", "", "", "", "в том числе"]),
            row(&["Подзона No 2 (0.10 га)", "", "", "", "", ""]),
            row(&["-", "-", "Предельная высота - 30 м", "Процент застройки - 40", "Плотность - 10", "-"]),
            row(&["", "", "", "", "", ""]),
            row(&["", "", "", "", "", "x"]),
        ])
    }

    #[test]
    fn test_two_marker_rows_give_two_subzones() {
        let subzones = extract_subzones(&[two_zone_table()]);
        assert_eq!(subzones.len(), 2);

        let first = &subzones[0];
        assert_eq!(first.index, "1");
        assert_eq!(first.area, "(0.25 га)");
        assert_eq!(first.description, "Жилой дом");
        assert_eq!(first.max_height, "75");
        assert_eq!(first.max_floors, "20");
        assert_eq!(first.max_dev_percent, "60");
        assert_eq!(first.max_density, "25");
        assert_eq!(first.area_by_floor.get("total"), Some("12500"));
        assert_eq!(first.area_total.get("total"), Some("15000"));
        assert_eq!(first.area_total.get("living"), None);

        let second = &subzones[1];
        assert_eq!(second.index, "2");
        assert_eq!(second.description, "-");
        assert_eq!(second.max_height, "30");
        assert_eq!(second.max_floors, "-");
        assert_eq!(second.max_dev_percent, "40");
        assert_eq!(second.area_by_floor.get("total"), None);
    }

    #[test]
    fn test_forward_fill_groups() {
        let data = limits_data(&two_zone_table()).unwrap();
        let groups = group_zones(&data);
        assert_eq!(
            groups,
            vec![
                ZoneGroup { ordinal: Some(1), rows: vec![0, 1, 2, 3] },
                ZoneGroup { ordinal: Some(2), rows: vec![4, 5, 6, 7] },
            ]
        );
    }

    #[test]
    fn test_no_marker_rows_give_implicit_subzone() {
        let table = limits_table(vec![
            row(&["-", "-", "Предельная высота - 45 м", "Процент - 50", "Плотность - 20", "Наземная площадь - 900 кв.м"]),
            row(&["", "", "", "", "", ""]),
            row(&["", "", "", "", "", "x"]),
        ]);
        let subzones = extract_subzones(&[table]);
        assert_eq!(subzones.len(), 1);
        let zone = &subzones[0];
        assert!(zone.is_implicit());
        assert_eq!(zone.area, "-");
        assert_eq!(zone.description, "-");
        assert_eq!(zone.max_height, "45");
        assert_eq!(zone.max_density, "20");
        assert_eq!(zone.area_total.get("total"), Some("900"));
    }

    #[test]
    fn test_rows_before_first_marker_are_ignored() {
        let table = limits_table(vec![
            row(&["-", "-", "Предельная высота - 99 м", "", "", ""]),
            row(&["Подзона No 3", "", "", "", "", ""]),
            row(&["-", "-", "Предельная высота - 12 м", "", "", ""]),
        ]);
        let subzones = extract_subzones(&[table]);
        assert_eq!(subzones.len(), 1);
        assert_eq!(subzones[0].index, "3");
        assert_eq!(subzones[0].max_height, "12");
    }

    #[test]
    fn test_no_tables() {
        assert!(extract_subzones(&[]).is_empty());
    }

    #[test]
    fn test_other_tables_ignored() {
        let other = Table::new(vec!["Причины отнесения".into()], vec![row(&["1 2 3"])]);
        assert!(extract_subzones(&[other]).is_empty());
    }

    #[test]
    fn test_wrong_shape_aborts() {
        let table = Table::new(
            vec!["Предельные (минимальные)".into()],
            vec![row(&["1 2 3", "4", "5", "6"]), row(&["a", "b", "c", "d"])],
        );
        assert!(extract_subzones(&[table]).is_empty());
    }

    #[test]
    fn test_unrecognized_first_column_aborts() {
        let table = Table::new(
            vec!["Предельные (минимальные)".into()],
            vec![
                row(&["1", "2", "3", "8"]),
                row(&["", "", "", ""]),
                row(&["", "", "", ""]),
                row(&["Подзона No 1", "", "", ""]),
            ],
        );
        assert!(extract_subzones(&[table]).is_empty());
    }

    #[test]
    fn test_height_and_floors_branches() {
        assert_eq!(
            height_and_floors("Предельная высота - 75 м"),
            ("75".to_string(), "-".to_string())
        );
        assert_eq!(
            height_and_floors("Предельное количество этажей - 9"),
            ("-".to_string(), "9".to_string())
        );
        assert_eq!(
            height_and_floors("Предельная высота - 75 м, отметка 120 Предельное количество этажей - 20"),
            ("75 м, отметка 120".to_string(), "20".to_string())
        );
        assert_eq!(height_and_floors("не установлены"), ("-".to_string(), "-".to_string()));
        assert_eq!(height_and_floors("до 3 этажей"), ("-".to_string(), "-".to_string()));
    }

    #[test]
    fn test_zone_without_number_uses_ordinal() {
        let table = limits_table(vec![row(&["Подзона No А", "", "", "", "", ""])]);
        let subzones = extract_subzones(&[table]);
        assert_eq!(subzones[0].index, "1");
    }

    #[test]
    fn test_ragged_rows_read_as_empty() {
        let mut table = two_zone_table();
        // Some extractors drop trailing empty cells
        for r in &mut table.rows {
            while r.last().is_some_and(Cell::is_empty) {
                r.pop();
            }
        }
        let subzones = extract_subzones(&[table]);
        assert_eq!(subzones.len(), 2);
        assert_eq!(subzones[0].max_height, "75");
        assert_eq!(subzones[1].max_height, "30");
    }
}
