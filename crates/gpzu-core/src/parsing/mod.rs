pub mod dates;
pub mod header;
pub mod limits;
pub mod unregulated;
pub mod values;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::model::{Document, RawFields};
use crate::rules::detect_dialect;
use crate::rules::schema::HeaderRules;

/// Run every extraction stage over a loaded document, filling its dialect
/// and raw fields.
///
/// An unknown dialect leaves every span unset; dates and tables are still
/// read since they do not depend on the header layout.
pub fn extract_fields(doc: &mut Document, book: &[HeaderRules], today: NaiveDate) {
    let number = header::extract_number(&doc.pages);
    doc.rules = detect_dialect(&number, book).cloned();

    let spans = match &doc.rules {
        Some(rules) => header::extract_spans(&doc.lines(), rules),
        None => {
            debug!(source = %doc.source_id, number = %number, "no header rules for this number");
            BTreeMap::new()
        }
    };

    let issued = dates::extract_issue_date(&doc.pages);
    let expires = issued.and_then(dates::expiry_date);
    let status = dates::plan_status(&doc.pages, expires, today);

    let subzones = limits::extract_subzones(&doc.tables);
    let has_unregulated_objects = unregulated::has_unregulated_objects(&doc.tables);

    info!(
        source = %doc.source_id,
        dialect = doc.dialect().unwrap_or("unknown"),
        spans = spans.values().filter(|v| v.is_some()).count(),
        subzones = subzones.len(),
        "extracted raw fields"
    );

    doc.fields = RawFields {
        number,
        spans,
        issued,
        expires,
        status,
        subzones,
        has_unregulated_objects,
    };
}
