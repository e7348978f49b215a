use gpzu_core::report::{ParseResult, Value};

pub fn print(result: &ParseResult) {
    print!("{}", format_result(result));
}

/// Grouped listing: one section per group, one line per field, list items
/// and map entries indented under their field.
pub fn format_result(result: &ParseResult) -> String {
    let mut out = String::new();

    for group in &result.groups {
        out.push_str(&format!("=== {} ===\n\n", group.title));
        for (label, value) in &group.fields {
            format_field(&mut out, label, value, 1);
        }
        out.push('\n');
    }

    out
}

fn format_field(out: &mut String, label: &str, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::List(items) => {
            out.push_str(&format!("{indent}{label}:\n"));
            if items.is_empty() {
                out.push_str(&format!("{indent}  -\n"));
            }
            for (i, item) in items.iter().enumerate() {
                format_field(out, &format!("[{}]", i + 1), item, depth + 1);
            }
        }
        Value::Map(entries) => {
            out.push_str(&format!("{indent}{label}:\n"));
            for (key, inner) in entries {
                format_field(out, key, inner, depth + 1);
            }
        }
        scalar => {
            let text = match scalar {
                Value::Null => "-".to_string(),
                other => other.display_text(),
            };
            out.push_str(&format!("{indent}{label}: {text}\n"));
        }
    }
}
