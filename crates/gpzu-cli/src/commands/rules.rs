use gpzu_core::error::GpzuError;
use gpzu_core::rules::builtin;
use gpzu_core::rules::schema::HeaderRules;
use std::path::Path;

/// Rule book from `path`, or the built-in one.
pub fn rule_book(path: Option<&Path>) -> Result<Vec<HeaderRules>, GpzuError> {
    match path {
        Some(path) => gpzu_core::rules::load_rule_book(path),
        None => builtin::rule_book(),
    }
}

pub fn list(path: Option<&Path>) -> Result<(), GpzuError> {
    let book = rule_book(path)?;
    println!("Header rules, in detection order:\n");
    for rules in &book {
        println!(
            "  {:<6} numbers starting with \"{}\", {} fields",
            rules.dialect,
            rules.number_prefix,
            rules.fields.len()
        );
        if let Some(ref desc) = rules.description {
            println!("         {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(path: Option<&Path>, dialect: &str) -> Result<(), GpzuError> {
    let book = rule_book(path)?;
    let rules = book
        .iter()
        .find(|r| r.dialect.eq_ignore_ascii_case(dialect))
        .ok_or_else(|| {
            let known: Vec<&str> = book.iter().map(|r| r.dialect.as_str()).collect();
            GpzuError::RuleSetInvalid(format!(
                "unknown dialect '{}'. Available: {}",
                dialect,
                known.join(", ")
            ))
        })?;

    println!("{} (numbers starting with \"{}\")\n", rules.dialect, rules.number_prefix);
    if let Some(ref prefix) = rules.rightsholder_prefix {
        println!("Rightsholder lead-in removed: \"{}\"\n", prefix);
    }

    let max_name = rules.fields.iter().map(|f| f.name.len()).max().unwrap_or(10);
    for field in &rules.fields {
        let extent = if field.is_single_line() {
            "one line".to_string()
        } else {
            format!("up to \"{}\"", field.stop)
        };
        println!(
            "  {:<width$}  +{} after \"{}\", {}",
            field.name,
            field.offset,
            field.start,
            extent,
            width = max_name
        );
    }
    println!();

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), GpzuError> {
    let rules = gpzu_core::rules::load_rules(file)?;
    println!(
        "Valid: dialect {} with {} fields",
        rules.dialect,
        rules.fields.len()
    );
    Ok(())
}
