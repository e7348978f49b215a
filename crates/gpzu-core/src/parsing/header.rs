use std::collections::BTreeMap;

use crate::rules::schema::{FieldRule, HeaderRules};

/// Glyph opening the registration number line on page 1.
const NUMBER_GLYPH: &str = "№";

/// Header markers are never searched for in the first lines (title block).
const SCAN_START: usize = 2;

/// Extract the registration number: the first page-1 line starting with
/// `№`, without the glyph. Empty when there is no such line.
pub fn extract_number(pages: &[String]) -> String {
    pages
        .first()
        .and_then(|page| page.split('\n').find(|l| l.starts_with(NUMBER_GLYPH)))
        .map(|line| line.replace(NUMBER_GLYPH, "").trim().to_string())
        .unwrap_or_default()
}

/// Locate one field value in the line sequence.
///
/// The value starts `rule.offset` lines below the first line (from line
/// [`SCAN_START`]) starting with `rule.start`. A single-line value is that
/// line alone; otherwise lines are joined with spaces up to, not including,
/// the first line starting with `rule.stop`.
pub fn extract_span(lines: &[&str], rule: &FieldRule) -> Option<String> {
    let header = lines
        .iter()
        .enumerate()
        .skip(SCAN_START)
        .find(|(_, l)| l.starts_with(&rule.start))
        .map(|(i, _)| i)?;
    let begin = header + rule.offset;

    if rule.is_single_line() {
        return lines.get(begin).map(|l| l.to_string());
    }

    let value: Vec<&str> = lines
        .iter()
        .skip(begin)
        .take_while(|l| !l.starts_with(&rule.stop))
        .copied()
        .collect();

    Some(value.join(" "))
}

/// Run every field rule of `rules` over `lines`.
pub fn extract_spans(lines: &[&str], rules: &HeaderRules) -> BTreeMap<String, Option<String>> {
    rules
        .fields
        .iter()
        .map(|rule| (rule.name.clone(), extract_span(lines, rule)))
        .collect()
}
