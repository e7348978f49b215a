//! Cleanup and classification of individual raw fields.

use regex::Regex;
use std::sync::LazyLock;

use crate::lexical::{normalize_phrase, MorphAnalyzer};
use crate::parsing::values::parse_integer;
use crate::report::labels;

/// Name fragments only organizations carry.
const ORGANIZATION_MARKERS: &[&str] = &[
    "обществ",
    "товариществ",
    "акционер",
    "партнерст",
    "предприят",
    "некоммерческ",
    "департамент",
    "управление",
    "отдел",
];
const SOLE_PROPRIETOR_MARKER: &str = "индивидуальн";

/// Personal names are short: surname, given name and patronymic.
const MAX_PERSON_NAME_TOKENS: usize = 3;

const PPT_ANCHOR: &str = "планировк";
const PMT_ANCHOR: &str = "межеван";
const NOT_APPROVED_MARKER: &str = "не утвержд";

const NOT_APPLICABLE_MARKERS: &[&str] = &["не распространяется", "не устанавливается"];
/// Code outside the 2.x family that still denotes housing.
const RESIDENTIAL_EXTRA_CODE: &str = "13.2";

static DATED_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"от \d{2}\.\d{2}.\d{4}").expect("valid dated suffix regex"));
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"№ ?\d+[-а-яА-Я]* *от *\d{2}\.\d{2}.\d{4}").expect("valid citation regex")
});
static SETTLEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"муниципальное образование\s([а-яА-Я]+)").expect("valid settlement regex")
});
static USEKIND_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9.]+)\)").expect("valid use-kind code regex"));
static RESIDENTIAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^2[\d.]+").expect("valid residential code regex"));
static RESIDENTIAL_PURPOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Жил(ая|ое|ой)").expect("valid purpose regex"));

/// Rightsholder in its dictionary form: the dialect's lead-in phrase and
/// any dated reference removed.
pub fn normalize_rightsholder(
    raw: &str,
    prefix: Option<&str>,
    analyzer: &dyn MorphAnalyzer,
) -> String {
    let stripped = match prefix {
        Some(prefix) if !prefix.is_empty() => raw.replace(prefix, ""),
        _ => raw.to_string(),
    };
    let undated = DATED_SUFFIX_RE.replace_all(&stripped, "");
    normalize_phrase(undated.trim(), analyzer)
}

/// Legal entity or individual, judged on the raw rightsholder text.
pub fn rightsholder_type(raw: &str) -> Option<&'static str> {
    if raw.is_empty() {
        return None;
    }

    let lower = raw.to_lowercase();
    if ORGANIZATION_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(labels::LEGAL_ENTITY);
    }
    if lower.contains(SOLE_PROPRIETOR_MARKER) {
        return Some(labels::INDIVIDUAL);
    }
    if raw.contains('"') {
        return Some(labels::LEGAL_ENTITY);
    }

    let tokens: Vec<&str> = raw.split(' ').collect();
    let capitalized = |t: &&str| t.to_lowercase() != **t;
    if tokens.len() <= MAX_PERSON_NAME_TOKENS && tokens.iter().take(2).all(capitalized) {
        return Some(labels::INDIVIDUAL);
    }

    Some(labels::LEGAL_ENTITY)
}

/// Approval status and document citations of a planning or surveying
/// project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectApproval {
    pub status: Option<&'static str>,
    pub details: String,
}

impl ProjectApproval {
    fn unknown() -> Self {
        ProjectApproval {
            status: None,
            details: crate::model::NO_VALUE.into(),
        }
    }

    fn from_description(description: &str) -> Self {
        if description.contains(NOT_APPROVED_MARKER) {
            return ProjectApproval {
                status: Some(labels::STATUS_NOT_APPROVED),
                details: crate::model::NO_VALUE.into(),
            };
        }

        let citations: Vec<&str> = CITATION_RE
            .find_iter(description)
            .map(|m| m.as_str())
            .collect();
        ProjectApproval {
            status: Some(labels::STATUS_APPROVED),
            details: if citations.is_empty() {
                crate::model::NO_VALUE.into()
            } else {
                citations.join("; ")
            },
        }
    }
}

/// Split the combined planning/surveying text at its anchors and read the
/// approval of each project.
///
/// The text is cut where the later anchor begins. With one anchor missing
/// the other project's description is the text before the found anchor;
/// with both missing each project reads the whole text.
pub fn planning_projects(text: Option<&str>) -> (ProjectApproval, ProjectApproval) {
    let Some(text) = text else {
        return (ProjectApproval::unknown(), ProjectApproval::unknown());
    };

    let ppt = text.find(PPT_ANCHOR);
    let pmt = text.find(PMT_ANCHOR);
    let (ppt_desc, pmt_desc) = match (ppt, pmt) {
        (Some(p), Some(m)) if p < m => (&text[..m], &text[m..]),
        (Some(p), _) => (&text[p..], &text[..p]),
        (None, Some(m)) => (&text[..m], &text[m..]),
        (None, None) => (text, text),
    };

    (
        ProjectApproval::from_description(ppt_desc),
        ProjectApproval::from_description(pmt_desc),
    )
}

/// Settlement named after "муниципальное образование" in the location text.
pub fn settlement(location: &str) -> Option<String> {
    SETTLEMENT_RE
        .captures(location)
        .map(|c| c[1].to_string())
}

/// Use-kind group and `"; "`-joined codes of the permitted use kinds.
pub fn usekinds(text: &str) -> (&'static str, String) {
    let codes: Vec<&str> = USEKIND_CODE_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();

    if codes.is_empty() && NOT_APPLICABLE_MARKERS.iter().any(|m| text.contains(m)) {
        return (labels::USEKIND_NON_RESIDENTIAL, text.trim().to_string());
    }

    let residential = codes.iter().filter(|c| is_residential_code(c)).count();
    let non_residential = codes.len() - residential;
    let group = match (residential > 0, non_residential > 0) {
        (true, true) => labels::USEKIND_MIXED,
        (true, false) => labels::USEKIND_RESIDENTIAL,
        (false, true) => labels::USEKIND_NON_RESIDENTIAL,
        (false, false) => crate::model::NO_VALUE,
    };

    (group, codes.join("; "))
}

fn is_residential_code(code: &str) -> bool {
    RESIDENTIAL_CODE_RE.is_match(code) || code == RESIDENTIAL_EXTRA_CODE
}

/// Purpose of the object planned in a subzone.
pub fn object_purpose(description: &str) -> &'static str {
    if RESIDENTIAL_PURPOSE_RE.is_match(description) {
        labels::PURPOSE_RESIDENTIAL
    } else {
        labels::PURPOSE_NON_RESIDENTIAL
    }
}

/// Integer sum of area figures; unparsable figures count as zero.
pub fn sum_figures<'a>(figures: impl IntoIterator<Item = Option<&'a str>>) -> i64 {
    figures
        .into_iter()
        .map(|f| f.and_then(parse_integer).unwrap_or(0))
        .sum()
}
