use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// Square metres per hectare.
const SQM_PER_HECTARE: i64 = 10_000;

/// Abbreviation marking a figure in hectares.
const HECTARE_MARKER: &str = "га";

static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("valid number regex"));

/// Parse an area figure into square metres.
///
/// Handles formats like:
/// - "500" -> 500
/// - "1.5 га" -> 15000 (hectares, converted)
/// - "(0,25 га)" -> 2500 (decimal comma)
/// - "нет данных" -> None
pub fn parse_area_sqm(s: &str) -> Option<Decimal> {
    let number = LEADING_NUMBER_RE.find(s)?.as_str();
    let value = parse_decimal(number)?;
    if s.contains(HECTARE_MARKER) {
        Some((value * Decimal::from(SQM_PER_HECTARE)).normalize())
    } else {
        Some(value.normalize())
    }
}

/// Parse a decimal value, accepting a decimal comma.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Integer reading of a figure for summation: surrounding whitespace is
/// allowed, anything else makes it unusable.
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}
