//! Map raw fields into the fixed result schema.

pub mod fields;

use crate::lexical::MorphAnalyzer;
use crate::model::{AreaBreakdown, Document, RawFields, Subzone, NO_VALUE};
use crate::parsing::dates::format_date;
use crate::parsing::values::parse_area_sqm;
use crate::report::labels::{self, *};
use crate::report::{Group, ParseResult, Value};

/// Build the result of a document whose raw fields are extracted.
pub fn build_result(doc: &Document, analyzer: &dyn MorphAnalyzer) -> ParseResult {
    let raw = &doc.fields;
    let prefix = doc
        .rules
        .as_ref()
        .and_then(|r| r.rightsholder_prefix.as_deref());

    ParseResult {
        groups: vec![
            particulars(raw, prefix, analyzer),
            location(raw),
            permitted_use(raw),
            territory(raw),
            limits(&raw.subzones),
            new_objects(raw),
            placeholder(GROUP_EXISTING_OBJECTS, EXISTING_OBJECTS_FIELDS),
            placeholder(GROUP_HERITAGE, HERITAGE_FIELDS),
        ],
    }
}

fn particulars(raw: &RawFields, prefix: Option<&str>, analyzer: &dyn MorphAnalyzer) -> Group {
    let rightsholder = raw.span("rightsholder");

    Group::new(GROUP_PARTICULARS)
        .field(RECORD_ID, record_id(&raw.number, &raw.subzones))
        .field(DOCUMENT_NUMBER, raw.number.as_str())
        .field(ISSUE_DATE, Value::from(raw.issued.map(format_date)))
        .field(STATUS, text_or_null(raw.status.map(|s| s.label())))
        .field(EXPIRY_DATE, Value::from(raw.expires.map(format_date)))
        .field(
            RIGHTSHOLDER,
            Value::from(rightsholder.map(|r| fields::normalize_rightsholder(r, prefix, analyzer))),
        )
        .field(
            RIGHTSHOLDER_TYPE,
            text_or_null(rightsholder.and_then(fields::rightsholder_type)),
        )
}

/// The bare number for an undivided parcel, one id per subzone otherwise.
fn record_id(number: &str, subzones: &[Subzone]) -> Value {
    match subzones {
        [] => Value::Null,
        [only] if only.is_implicit() => Value::text(number),
        _ => Value::List(
            subzones
                .iter()
                .map(|s| Value::Text(format!("{number}№{}", s.index)))
                .collect(),
        ),
    }
}

fn location(raw: &RawFields) -> Group {
    let cad_number = raw
        .span("cad_number")
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let (ppt, pmt) = fields::planning_projects(raw.span("ppt_pmt"));

    Group::new(GROUP_LOCATION)
        .field(ADMIN_DISTRICT, Value::Null)
        .field(
            SETTLEMENT,
            Value::from(raw.span("location").and_then(fields::settlement)),
        )
        .field(BUILDING_ADDRESS, Value::Null)
        .field(CAD_NUMBER, text_or_null(cad_number))
        .field(PPT_STATUS, text_or_null(ppt.status))
        .field(PPT_DETAILS, ppt.details.as_str())
        .field(PMT_STATUS, text_or_null(pmt.status))
        .field(PMT_DETAILS, pmt.details.as_str())
}

fn permitted_use(raw: &RawFields) -> Group {
    let (group, codes) = match raw.span("usekinds").map(fields::usekinds) {
        Some((group, codes)) => (Value::text(group), Value::Text(codes)),
        None => (Value::Null, Value::Null),
    };

    Group::new(GROUP_USEKINDS)
        .field(USEKIND_GROUP, group)
        .field(USEKIND_CODES, codes)
}

fn territory(raw: &RawFields) -> Group {
    let area = raw.span("area").and_then(parse_area_sqm);
    let subzones = &raw.subzones;

    let numbers = match subzones.len() {
        0 => Value::Null,
        1 => Value::text(ABSENT),
        _ => Value::List(
            subzones
                .iter()
                .map(|s| Value::Text(format!("№ {}", s.index)))
                .collect(),
        ),
    };

    let areas = if subzones.len() > 1 {
        Value::List(
            subzones
                .iter()
                .map(|s| subzone_area(&s.area).map_or(Value::Null, Value::Number))
                .collect(),
        )
    } else {
        Value::Null
    };

    Group::new(GROUP_TERRITORY)
        .field(PARCEL_AREA, area.map_or(Value::Null, Value::Number))
        .field(SUBZONE_NUMBERS, numbers)
        .field(SUBZONE_AREAS, areas)
}

fn subzone_area(area: &str) -> Option<rust_decimal::Decimal> {
    if area == NO_VALUE {
        return None;
    }
    parse_area_sqm(area)
}

fn limits(subzones: &[Subzone]) -> Group {
    Group::new(GROUP_LIMITS)
        .field(MAX_HEIGHT, per_subzone(subzones, |s| Value::text(s.max_height.as_str())))
        .field(MAX_FLOORS, per_subzone(subzones, |s| Value::text(s.max_floors.as_str())))
        .field(
            MAX_DEV_PERCENT,
            per_subzone(subzones, |s| Value::text(s.max_dev_percent.as_str())),
        )
        .field(MAX_DENSITY, per_subzone(subzones, |s| Value::text(s.max_density.as_str())))
}

/// One value per subzone; null without subzones.
fn per_subzone(subzones: &[Subzone], f: impl Fn(&Subzone) -> Value) -> Value {
    if subzones.is_empty() {
        Value::Null
    } else {
        Value::List(subzones.iter().map(f).collect())
    }
}

fn new_objects(raw: &RawFields) -> Group {
    let subzones = &raw.subzones;
    // Only presence is reported; absence stays unknown.
    let unregulated = if raw.has_unregulated_objects {
        Value::text(PRESENT)
    } else {
        Value::Null
    };

    Group::new(GROUP_NEW_OBJECTS)
        .field(
            OBJECT_PURPOSE,
            per_subzone(subzones, |s| Value::text(fields::object_purpose(&s.description))),
        )
        .field(
            OBJECT_DESCRIPTION,
            per_subzone(subzones, |s| Value::text(s.description.as_str())),
        )
        .field(UNREGULATED_OBJECTS, unregulated)
        .field(FLOOR_AREAS, per_subzone(subzones, |s| breakdown_map(&s.area_by_floor)))
        .field(TOTAL_AREAS, per_subzone(subzones, |s| breakdown_map(&s.area_total)))
        .field(
            FLOOR_AREAS_SUM,
            breakdown_sums(subzones, |s| &s.area_by_floor),
        )
        .field(TOTAL_AREAS_SUM, breakdown_sums(subzones, |s| &s.area_total))
}

/// Breakdown under its labels; unset figures read as 0.
fn breakdown_map(breakdown: &AreaBreakdown) -> Value {
    Value::Map(
        breakdown
            .iter()
            .map(|(key, figure)| {
                let value = match figure {
                    Some(f) => Value::text(f),
                    None => Value::Number(0.into()),
                };
                (breakdown_label(key), value)
            })
            .collect(),
    )
}

/// Per-label integer sums across subzones; empty without subzones.
fn breakdown_sums(subzones: &[Subzone], pick: fn(&Subzone) -> &AreaBreakdown) -> Value {
    let Some(first) = subzones.first() else {
        return Value::Map(Vec::new());
    };

    Value::Map(
        pick(first)
            .keys()
            .iter()
            .map(|key| {
                let sum = fields::sum_figures(subzones.iter().map(|s| pick(s).get(key)));
                (breakdown_label(key), Value::Number(sum.into()))
            })
            .collect(),
    )
}

fn breakdown_label(key: &str) -> String {
    labels::area_label(key).unwrap_or(key).to_string()
}

fn placeholder(title: &str, field_labels: &[&str]) -> Group {
    field_labels
        .iter()
        .fold(Group::new(title), |group, label| group.field(*label, Value::Null))
}

fn text_or_null(value: Option<&str>) -> Value {
    value.map_or(Value::Null, Value::text)
}
