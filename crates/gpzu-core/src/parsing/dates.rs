use chrono::{Duration, Months, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::model::PlanStatus;

const ISSUE_DATE_MARKER: &str = "Дата выдачи";
const PREPARED_MARKER: &str = "Градостроительный план подготовлен";
const CLASSIFIED_MARKER: &str = "Первом отделе";

/// Plans are valid for three years from issuance.
const VALIDITY_MONTHS: u32 = 36;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{4}").expect("valid date regex"));

/// Extract the issuance date from the page carrying both the issuance
/// date line and the "plan prepared" line.
pub fn extract_issue_date(pages: &[String]) -> Option<NaiveDate> {
    let page = pages.iter().find(|p| {
        p.contains(&format!("{ISSUE_DATE_MARKER} ")) && p.contains(PREPARED_MARKER)
    })?;
    let line = page.split('\n').find(|l| l.starts_with(ISSUE_DATE_MARKER))?;
    let found = DATE_RE.find(line)?.as_str();
    parse_date(found)
}

/// Parse a zero-padded `DD.MM.YYYY` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d.%m.%Y").ok()
}

/// Expiry date: three years after issuance, extended once by a year when it
/// falls into one of the two moratorium windows.
pub fn expiry_date(issued: NaiveDate) -> Option<NaiveDate> {
    let expiry = issued.checked_add_months(Months::new(VALIDITY_MONTHS))?;
    if in_extension_window(expiry) {
        expiry.checked_add_signed(Duration::days(365))
    } else {
        Some(expiry)
    }
}

fn in_extension_window(date: NaiveDate) -> bool {
    let windows = [((2020, 4, 6), (2021, 1, 1)), ((2022, 4, 13), (2023, 1, 1))];
    windows.iter().any(|&((y1, m1, d1), (y2, m2, d2))| {
        match (
            NaiveDate::from_ymd_opt(y1, m1, d1),
            NaiveDate::from_ymd_opt(y2, m2, d2),
        ) {
            (Some(from), Some(to)) => from <= date && date <= to,
            _ => false,
        }
    })
}

/// Legal status of the plan on `today`.
///
/// A one-page document mentioning the classified records office is a
/// secret plan regardless of dates.
pub fn plan_status(
    pages: &[String],
    expires: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<PlanStatus> {
    if pages.len() == 1 && pages[0].contains(CLASSIFIED_MARKER) {
        return Some(PlanStatus::Secret);
    }

    let expires = expires?;
    if expires >= today {
        Some(PlanStatus::Active)
    } else {
        Some(PlanStatus::Expired)
    }
}

/// Render a date the way the plans print them.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
