//! Integration tests for the Parser end-to-end pipeline.
//!
//! Uses mock extractors that return pre-built page texts and tables without
//! invoking pdftotext or tabula, so these tests run without either tool.

use chrono::NaiveDate;
use gpzu_core::cache::{RawArtifacts, RawCache};
use gpzu_core::error::GpzuError;
use gpzu_core::extraction::table::{Cell, Table};
use gpzu_core::extraction::{PdfExtractor, TableExtractor};
use gpzu_core::lexical::SuffixAnalyzer;
use gpzu_core::report::labels::*;
use gpzu_core::report::{flatten, ParseResult, Value};
use gpzu_core::rules::builtin::rule_book;
use gpzu_core::Parser;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

struct MockText {
    pages: Vec<String>,
    calls: AtomicUsize,
}

impl MockText {
    fn new(pages: &[&str]) -> Self {
        MockText {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl PdfExtractor for MockText {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, GpzuError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct MockTables {
    tables: Vec<Table>,
}

impl TableExtractor for MockTables {
    fn extract_tables(&self, _pdf_bytes: &[u8]) -> Result<Vec<Table>, GpzuError> {
        Ok(self.tables.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingTables;

impl TableExtractor for FailingTables {
    fn extract_tables(&self, _pdf_bytes: &[u8]) -> Result<Vec<Table>, GpzuError> {
        Err(GpzuError::ToolFailed {
            tool: "java",
            code: 1,
            stderr: "Unable to access jarfile".into(),
        })
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

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

fn single_zone_table() -> Table {
    limits_table(vec![
        row(&["-", "-", "Предельная высота - 75 м", "Процент застройки - 60", "Плотность - 25", "Суммарная поэтажная площадь объекта - 12500 кв.м"]),
        row(&["", "", "Предельное количество этажей - 20", "", "", ""]),
        row(&["", "", "", "", "", "x"]),
    ])
}

fn two_zone_table() -> Table {
    limits_table(vec![
        row(&["Подзона No 1 (0.25 га). Назначение объекта - Жилой дом", "", "", "", "", ""]),
        row(&["-", "-", "Предельная высота - 75 м", "Процент застройки - 60", "Плотность - 25", "Суммарная поэтажная площадь объекта - 12500 кв.м"]),
        row(&["", "", "", "", "", ""]),
        row(&["Подзона No 2 (0.10 га)", "", "", "", "", ""]),
        row(&["-", "-", "Предельная высота - 30 м", "Процент застройки - 40", "Плотность - 10", "Суммарная поэтажная площадь объекта - 500 кв.м"]),
        row(&["", "", "", "", "", ""]),
    ])
}

fn exemption_table(data_rows: usize) -> Table {
    let mut rows = vec![row(&["Назначение", "Площадь"]), row(&["1 2 3", "8"])];
    for i in 0..data_rows {
        rows.push(row(&[&format!("объект {i}"), "100"]));
    }
    Table::new(vec!["Причины отнесения земельного участка".into()], rows)
}

const RU_TITLE_PAGE: &str = "ГРАДОСТРОИТЕЛЬНЫЙ ПЛАН ЗЕМЕЛЬНОГО УЧАСТКА
№ RU77105000-047176
Градостроительный план земельного участка подготовлен на основании
обращения Акционерного общества \"Мосинжпроект\" от 12.03.2021
Местонахождение земельного участка
г. Москва, муниципальное образование Арбат
Описание границ земельного участка:
согласно чертежу
Кадастровый номер земельного участка
77:05:0001001:12
Площадь земельного участка
0.25 га
Информация о расположенных в границах земельного участка объектах капитального строительства
Объекты отсутствуют
Информация о границах зоны планируемого размещения объекта капитального строительства
Реквизиты проекта планировки территории и (или) проекта межевания территории
в случае, если земельный участок расположен
в границах территории, в отношении которой утверждены
Проект планировки территории утвержден постановлением № 123-ПП от 01.02.2019
Градостроительный план подготовлен
Москомархитектура";

const RU_ZONING_PAGE: &str = "2. Информация о градостроительном регламенте
основные виды разрешенного использования земельного участка:
Многоэтажная жилая застройка (высотная застройка) (2.6)
условно разрешенные виды использования земельного участка:
не установлены";

const RU_SIGNATURE_PAGE: &str = "Градостроительный план подготовлен
Дата выдачи 01.03.2020
Подпись";

const RF_TITLE_PAGE: &str = "ГРАДОСТРОИТЕЛЬНЫЙ ПЛАН ЗЕМЕЛЬНОГО УЧАСТКА
№ РФ-77-4-53-3-72-2021-1234
Градостроительный план земельного участка подготовлен на основании обращения правообладателя
(реквизиты заявления)
от 10.02.2021
Иванов Иван Иванович
Местонахождение земельного участка
г. Москва, муниципальное образование Хамовники
Описание границ земельного участка (образуемого земельного участка):
согласно чертежу
Кадастровый номер земельного участка (при наличии) или в случае, предусмотренном
частью 1.1 статьи 57.3
Градостроительного кодекса
Российской Федерации
77:01:0005012:34
Площадь земельного участка
1200 кв.м
Информация о расположенных в границах земельного участка объектах капитального строительства
Объекты отсутствуют";

const RF_SIGNATURE_PAGE: &str = "Градостроительный план подготовлен
Дата выдачи 15.03.2021";

fn pdf_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn parse_with(
    text: &dyn PdfExtractor,
    tables: &dyn TableExtractor,
    cache: Option<&RawCache>,
    path: &std::path::Path,
) -> Result<ParseResult, GpzuError> {
    let analyzer = SuffixAnalyzer::new();
    let mut parser = Parser::new(text, tables, &analyzer, rule_book().unwrap()).with_today(date(2022, 6, 1));
    if let Some(cache) = cache {
        parser = parser.with_cache(cache);
    }
    parser.parse_file(path)
}

// ---------------------------------------------------------------------------
// RU plan with an undivided parcel
// ---------------------------------------------------------------------------
#[test]
fn ru_plan_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = pdf_file(&dir, "RU77105000-047176.pdf", b"%PDF-1.4 ru");
    let text = MockText::new(&[RU_TITLE_PAGE, RU_ZONING_PAGE, RU_SIGNATURE_PAGE]);
    let tables = MockTables {
        tables: vec![single_zone_table(), exemption_table(0)],
    };

    let result = parse_with(&text, &tables, None, &path).unwrap();

    assert_eq!(result.groups.len(), 8);
    assert_eq!(
        result.get(GROUP_PARTICULARS, DOCUMENT_NUMBER),
        Some(&Value::text("RU77105000-047176"))
    );
    assert_eq!(
        result.get(GROUP_PARTICULARS, RECORD_ID),
        Some(&Value::text("RU77105000-047176"))
    );
    assert_eq!(result.get(GROUP_PARTICULARS, ISSUE_DATE), Some(&Value::text("01.03.2020")));
    assert_eq!(result.get(GROUP_PARTICULARS, EXPIRY_DATE), Some(&Value::text("01.03.2023")));
    assert_eq!(result.get(GROUP_PARTICULARS, STATUS), Some(&Value::text("Действует")));
    assert_eq!(
        result.get(GROUP_PARTICULARS, RIGHTSHOLDER),
        Some(&Value::text("акционерное общество \"Мосинжпроект\""))
    );
    assert_eq!(
        result.get(GROUP_PARTICULARS, RIGHTSHOLDER_TYPE),
        Some(&Value::text(LEGAL_ENTITY))
    );

    assert_eq!(result.get(GROUP_LOCATION, SETTLEMENT), Some(&Value::text("Арбат")));
    assert_eq!(
        result.get(GROUP_LOCATION, CAD_NUMBER),
        Some(&Value::text("77:05:0001001:12"))
    );
    assert_eq!(result.get(GROUP_LOCATION, PPT_STATUS), Some(&Value::text(STATUS_APPROVED)));
    assert_eq!(
        result.get(GROUP_LOCATION, PPT_DETAILS),
        Some(&Value::text("№ 123-ПП от 01.02.2019"))
    );

    assert_eq!(
        result.get(GROUP_USEKINDS, USEKIND_GROUP),
        Some(&Value::text(USEKIND_RESIDENTIAL))
    );
    assert_eq!(result.get(GROUP_USEKINDS, USEKIND_CODES), Some(&Value::text("2.6")));

    assert_eq!(
        result.get(GROUP_TERRITORY, PARCEL_AREA),
        Some(&Value::Number(dec!(2500)))
    );
    assert_eq!(result.get(GROUP_TERRITORY, SUBZONE_NUMBERS), Some(&Value::text(ABSENT)));

    assert_eq!(
        result.get(GROUP_LIMITS, MAX_HEIGHT),
        Some(&Value::List(vec![Value::text("75")]))
    );
    assert_eq!(
        result.get(GROUP_LIMITS, MAX_FLOORS),
        Some(&Value::List(vec![Value::text("20")]))
    );
    // A blank exemption table reports nothing rather than absence
    assert_eq!(result.get(GROUP_NEW_OBJECTS, UNREGULATED_OBJECTS), Some(&Value::Null));
    let sums = result.get(GROUP_NEW_OBJECTS, FLOOR_AREAS_SUM).unwrap();
    assert_eq!(sums.get("Всего"), Some(&Value::Number(dec!(12500))));
}

// ---------------------------------------------------------------------------
// RF plan: different header layout, individual rightsholder
// ---------------------------------------------------------------------------
#[test]
fn rf_plan_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = pdf_file(&dir, "РФ-77-4-53-3-72-2021-1234.pdf", b"%PDF-1.4 rf");
    let text = MockText::new(&[RF_TITLE_PAGE, RF_SIGNATURE_PAGE]);
    let tables = MockTables {
        tables: vec![two_zone_table(), exemption_table(4)],
    };

    let result = parse_with(&text, &tables, None, &path).unwrap();

    assert_eq!(
        result.get(GROUP_PARTICULARS, RIGHTSHOLDER_TYPE),
        Some(&Value::text(INDIVIDUAL))
    );
    assert_eq!(
        result.get(GROUP_LOCATION, CAD_NUMBER),
        Some(&Value::text("77:01:0005012:34"))
    );
    assert_eq!(result.get(GROUP_LOCATION, SETTLEMENT), Some(&Value::text("Хамовники")));
    assert_eq!(
        result.get(GROUP_TERRITORY, PARCEL_AREA),
        Some(&Value::Number(dec!(1200)))
    );
    assert_eq!(
        result.get(GROUP_PARTICULARS, RECORD_ID),
        Some(&Value::List(vec![
            Value::text("РФ-77-4-53-3-72-2021-1234№1"),
            Value::text("РФ-77-4-53-3-72-2021-1234№2"),
        ]))
    );
    assert_eq!(
        result.get(GROUP_TERRITORY, SUBZONE_AREAS),
        Some(&Value::List(vec![
            Value::Number(dec!(2500)),
            Value::Number(dec!(1000))
        ]))
    );
    assert_eq!(
        result.get(GROUP_NEW_OBJECTS, OBJECT_PURPOSE),
        Some(&Value::List(vec![
            Value::text(PURPOSE_RESIDENTIAL),
            Value::text(PURPOSE_NON_RESIDENTIAL)
        ]))
    );
    assert_eq!(
        result.get(GROUP_NEW_OBJECTS, UNREGULATED_OBJECTS),
        Some(&Value::text(PRESENT))
    );
    let sums = result.get(GROUP_NEW_OBJECTS, FLOOR_AREAS_SUM).unwrap();
    assert_eq!(sums.get("Всего"), Some(&Value::Number(dec!(13000))));

    // Issued 15.03.2021, valid until 15.03.2024
    assert_eq!(result.get(GROUP_PARTICULARS, STATUS), Some(&Value::text("Действует")));
}

// ---------------------------------------------------------------------------
// Cache: a record under the file name wins over fresh extraction
// ---------------------------------------------------------------------------
#[test]
fn cached_artifacts_win_for_same_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let cache = RawCache::new(dir.path().join("cache"));
    let tables = MockTables {
        tables: vec![single_zone_table()],
    };

    let path = pdf_file(&dir, "RU77105000-047176.pdf", b"first bytes");
    let first_text = MockText::new(&[RU_TITLE_PAGE, RU_SIGNATURE_PAGE]);
    let first = parse_with(&first_text, &tables, Some(&cache), &path).unwrap();
    assert_eq!(first_text.calls.load(Ordering::SeqCst), 1);
    assert!(cache.contains("RU77105000-047176"));

    // Same name, different bytes and different extractor output
    std::fs::write(&path, b"second bytes").unwrap();
    let second_text = MockText::new(&["№ RU00000000-000000"]);
    let second = parse_with(&second_text, &tables, Some(&cache), &path).unwrap();

    assert_eq!(second_text.calls.load(Ordering::SeqCst), 0);
    assert_eq!(first, second);
}

#[test]
fn failed_extraction_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let cache = RawCache::new(dir.path().join("cache"));
    let path = pdf_file(&dir, "RU77105000-047176.pdf", b"%PDF");
    let text = MockText::new(&[RU_TITLE_PAGE, RU_SIGNATURE_PAGE]);

    let result = parse_with(&text, &FailingTables, Some(&cache), &path).unwrap();

    // Text alone still yields a result, without subzones
    assert_eq!(
        result.get(GROUP_PARTICULARS, DOCUMENT_NUMBER),
        Some(&Value::text("RU77105000-047176"))
    );
    assert_eq!(result.get(GROUP_LIMITS, MAX_HEIGHT), Some(&Value::Null));
    assert!(!cache.contains("RU77105000-047176"));
}

#[test]
fn preloaded_cache_record_skips_extractors() {
    let dir = tempfile::tempdir().unwrap();
    let cache = RawCache::new(dir.path().join("cache"));
    cache
        .store(
            "RU77105000-047176",
            &RawArtifacts {
                pages: vec![RU_TITLE_PAGE.into(), RU_SIGNATURE_PAGE.into()],
                tables: vec![],
            },
        )
        .unwrap();

    // The file itself need not exist
    let path = dir.path().join("RU77105000-047176.pdf");
    let text = MockText::new(&[]);
    let result = parse_with(&text, &FailingTables, Some(&cache), &path).unwrap();

    assert_eq!(text.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        result.get(GROUP_LOCATION, CAD_NUMBER),
        Some(&Value::text("77:05:0001001:12"))
    );
}

#[test]
fn ragged_cached_tables_degrade_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("cache");
    std::fs::create_dir_all(&cache_dir).unwrap();
    let record = serde_json::json!({
        "pages": [RU_TITLE_PAGE, RU_SIGNATURE_PAGE],
        "tables": [{
            "columns": ["Предельные (минимальные) и (или) максимальные размеры", "", ""],
            "rows": [["1 2 3", "4", "8"], ["a"]]
        }]
    });
    std::fs::write(cache_dir.join("RU77105000-047176.json"), record.to_string()).unwrap();

    let cache = RawCache::new(&cache_dir);
    let path = dir.path().join("RU77105000-047176.pdf");
    let result = parse_with(&MockText::new(&[]), &FailingTables, Some(&cache), &path).unwrap();

    assert_eq!(
        result.get(GROUP_PARTICULARS, DOCUMENT_NUMBER),
        Some(&Value::text("RU77105000-047176"))
    );
    assert_eq!(
        result.get(GROUP_LIMITS, MAX_HEIGHT),
        Some(&Value::List(vec![Value::text("-")]))
    );
}

// ---------------------------------------------------------------------------
// Failure kinds
// ---------------------------------------------------------------------------
#[test]
fn unknown_dialect_is_unparseable() {
    let dir = tempfile::tempdir().unwrap();
    let path = pdf_file(&dir, "77-000123.pdf", b"%PDF");
    let text = MockText::new(&["title\n№ 77-000123\nПлощадь земельного участка\n100"]);
    let tables = MockTables { tables: vec![] };

    let err = parse_with(&text, &tables, None, &path).unwrap_err();
    match err {
        GpzuError::ContentUnparseable { source_id, reason } => {
            assert_eq!(source_id, "77-000123");
            assert!(reason.contains("77-000123"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_number_is_unparseable() {
    let dir = tempfile::tempdir().unwrap();
    let path = pdf_file(&dir, "scan.pdf", b"%PDF");
    let text = MockText::new(&["some text without a number"]);
    let tables = MockTables { tables: vec![] };

    let err = parse_with(&text, &tables, None, &path).unwrap_err();
    assert!(matches!(err, GpzuError::ContentUnparseable { .. }));
}

#[test]
fn blank_document_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = pdf_file(&dir, "blank.pdf", b"%PDF");
    let text = MockText::new(&["", "  \n"]);
    let tables = MockTables { tables: vec![] };

    let err = parse_with(&text, &tables, None, &path).unwrap_err();
    assert!(matches!(err, GpzuError::SourceUnreadable(id) if id == "blank"));
}

#[test]
fn missing_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.pdf");
    let text = MockText::new(&[RU_TITLE_PAGE]);
    let tables = MockTables { tables: vec![] };

    let err = parse_with(&text, &tables, None, &path).unwrap_err();
    assert!(matches!(err, GpzuError::SourceUnreadable(_)));
    assert_eq!(text.calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Result persistence and flattening
// ---------------------------------------------------------------------------
#[test]
fn result_survives_json_and_flattens() {
    let dir = tempfile::tempdir().unwrap();
    let path = pdf_file(&dir, "RU77105000-047176.pdf", b"%PDF");
    let text = MockText::new(&[RU_TITLE_PAGE, RU_ZONING_PAGE, RU_SIGNATURE_PAGE]);
    let tables = MockTables {
        tables: vec![single_zone_table()],
    };
    let result = parse_with(&text, &tables, None, &path).unwrap();

    let json = serde_json::to_string_pretty(&result).unwrap();
    assert!(json.find(GROUP_PARTICULARS).unwrap() < json.find(GROUP_HERITAGE).unwrap());
    let restored: ParseResult = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, result);

    let flat = flatten(&result);
    assert_eq!(flat.rows.len(), 1);

    let height = flat
        .column_index(&format!("{GROUP_LIMITS} / {MAX_HEIGHT}"))
        .unwrap();
    assert_eq!(flat.rows[0][height], Value::text("75"));

    let floor_total = flat
        .column_index(&format!("{GROUP_NEW_OBJECTS} / {FLOOR_AREAS} / Всего"))
        .unwrap();
    assert_eq!(flat.rows[0][floor_total], Value::text("12500"));

    let tsv = flat.to_tsv();
    assert_eq!(tsv.lines().count(), 2);
}
