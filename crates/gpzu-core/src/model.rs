use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

use crate::cache::RawArtifacts;
use crate::error::GpzuError;
use crate::extraction::table::Table;
use crate::report::ParseResult;
use crate::rules::schema::HeaderRules;

/// Index of the single subzone covering an undivided parcel.
pub const IMPLICIT_SUBZONE: &str = "-1";

/// Placeholder for a subzone attribute the table did not yield.
pub const NO_VALUE: &str = "-";

/// Legal status of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    Active,
    Expired,
    /// Single-page stub of a plan held by the classified records office.
    Secret,
}

impl PlanStatus {
    pub fn label(self) -> &'static str {
        match self {
            PlanStatus::Active => "Действует",
            PlanStatus::Expired => "Срок действия истек",
            PlanStatus::Secret => "Секретно",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const FLOOR_AREA_KEYS: &[&str] = &["total", "living", "nonliving", "livingspace", "builtin"];
pub const TOTAL_AREA_KEYS: &[&str] = &[
    "total",
    "living",
    "nonliving",
    "livingspace",
    "builtin",
    "underground",
];

/// Area figures of one subzone over a fixed key set. Unset figures count
/// as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaBreakdown {
    keys: &'static [&'static str],
    values: Vec<Option<String>>,
}

impl AreaBreakdown {
    pub fn new(keys: &'static [&'static str]) -> Self {
        AreaBreakdown {
            keys,
            values: vec![None; keys.len()],
        }
    }

    /// Floor-area breakdown (`total`, `living`, `nonliving`, `livingspace`, `builtin`).
    pub fn by_floor() -> Self {
        Self::new(FLOOR_AREA_KEYS)
    }

    /// Total-area breakdown: the floor-area keys plus `underground`.
    pub fn total() -> Self {
        Self::new(TOTAL_AREA_KEYS)
    }

    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    /// Set a figure; unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        if let Some(i) = self.keys.iter().position(|k| *k == key) {
            self.values[i] = Some(value.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let i = self.keys.iter().position(|k| *k == key)?;
        self.values[i].as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.keys
            .iter()
            .copied()
            .zip(self.values.iter().map(|v| v.as_deref()))
    }
}

/// Construction limits of one regulatory sub-area of the parcel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subzone {
    /// Zone number from the table, or [`IMPLICIT_SUBZONE`].
    pub index: String,
    pub area: String,
    pub description: String,
    pub max_height: String,
    pub max_floors: String,
    pub max_dev_percent: String,
    pub max_density: String,
    pub area_by_floor: AreaBreakdown,
    pub area_total: AreaBreakdown,
}

impl Subzone {
    /// A subzone with every attribute unset.
    pub fn empty(index: impl Into<String>) -> Self {
        Subzone {
            index: index.into(),
            area: NO_VALUE.into(),
            description: NO_VALUE.into(),
            max_height: NO_VALUE.into(),
            max_floors: NO_VALUE.into(),
            max_dev_percent: NO_VALUE.into(),
            max_density: NO_VALUE.into(),
            area_by_floor: AreaBreakdown::by_floor(),
            area_total: AreaBreakdown::total(),
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.index == IMPLICIT_SUBZONE
    }
}

/// Everything the extraction stages derive before postprocessing.
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    /// Registration number from page 1, `""` when absent.
    pub number: String,
    /// Header-anchored text spans by field name; `None` when the marker
    /// was not found.
    pub spans: BTreeMap<String, Option<String>>,
    pub issued: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub status: Option<PlanStatus>,
    pub subzones: Vec<Subzone>,
    pub has_unregulated_objects: bool,
}

impl RawFields {
    pub fn span(&self, name: &str) -> Option<&str> {
        self.spans.get(name).and_then(|v| v.as_deref())
    }
}

/// Working state of one source document.
#[derive(Debug, Clone)]
pub struct Document {
    pub source_id: String,
    /// Page texts, page 1 first.
    pub pages: Vec<String>,
    pub tables: Vec<Table>,
    /// Header rules of the detected dialect; `None` for an unknown dialect.
    pub rules: Option<HeaderRules>,
    pub fields: RawFields,
    pub result: Option<ParseResult>,
}

impl Document {
    pub fn new(source_id: impl Into<String>, artifacts: RawArtifacts) -> Self {
        Document {
            source_id: source_id.into(),
            pages: artifacts.pages,
            tables: artifacts.tables,
            rules: None,
            fields: RawFields::default(),
            result: None,
        }
    }

    /// Name of the detected dialect, `None` when unknown.
    pub fn dialect(&self) -> Option<&str> {
        self.rules.as_ref().map(|r| r.dialect.as_str())
    }

    /// All lines of all pages, in page order.
    pub fn lines(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.split('\n')).collect()
    }

    /// Whether extraction produced nothing at all to work with.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty()) && self.tables.is_empty()
    }

    /// The parse result, once [`crate::Parser::parse`] has run.
    pub fn result(&self) -> Result<&ParseResult, GpzuError> {
        self.result
            .as_ref()
            .ok_or_else(|| GpzuError::ResultUnavailable(self.source_id.clone()))
    }
}
