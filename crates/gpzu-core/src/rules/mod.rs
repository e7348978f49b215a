pub mod builtin;
pub mod schema;

use crate::error::GpzuError;
use schema::HeaderRules;
use std::collections::HashSet;
use std::path::Path;

/// Load a header rule set from a JSON file.
pub fn load_rules(path: &Path) -> Result<HeaderRules, GpzuError> {
    let content = std::fs::read_to_string(path).map_err(|e| GpzuError::RuleSetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_rules(&content, path)
}

/// Parse a header rule set from a JSON string.
pub fn parse_rules(json: &str, source: &Path) -> Result<HeaderRules, GpzuError> {
    let rules: HeaderRules = serde_json::from_str(json).map_err(|e| GpzuError::RuleSetLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Parse a header rule set from a JSON string (no file path context).
pub fn parse_rules_str(json: &str) -> Result<HeaderRules, GpzuError> {
    let rules: HeaderRules = serde_json::from_str(json).map_err(GpzuError::Json)?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Validate that a rule set is well-formed.
pub fn validate_rules(rules: &HeaderRules) -> Result<(), GpzuError> {
    if rules.dialect.trim().is_empty() {
        return Err(GpzuError::RuleSetInvalid(
            "dialect name must not be empty".into(),
        ));
    }

    if rules.number_prefix.is_empty() {
        return Err(GpzuError::RuleSetInvalid(format!(
            "dialect '{}' has an empty number_prefix",
            rules.dialect
        )));
    }

    if rules.fields.is_empty() {
        return Err(GpzuError::RuleSetInvalid("fields must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for field in &rules.fields {
        if field.name.is_empty() {
            return Err(GpzuError::RuleSetInvalid(
                "field name must not be empty".into(),
            ));
        }

        if !seen.insert(field.name.as_str()) {
            return Err(GpzuError::RuleSetInvalid(format!(
                "field '{}' is defined twice",
                field.name
            )));
        }

        if field.start.is_empty() || field.stop.is_empty() {
            return Err(GpzuError::RuleSetInvalid(format!(
                "field '{}' needs both start and stop markers",
                field.name
            )));
        }

        if field.offset == 0 {
            return Err(GpzuError::RuleSetInvalid(format!(
                "field '{}' has offset 0 (the value cannot be the header line itself)",
                field.name
            )));
        }

        if let Some(length) = field.length {
            if length != 1 {
                return Err(GpzuError::RuleSetInvalid(format!(
                    "field '{}' has length {} (expected 1 or no length)",
                    field.name, length
                )));
            }
        }
    }

    Ok(())
}

/// Load a rule book from a rule file or from every `.json` file of a
/// directory, in file name order. Dialect names must be unique.
pub fn load_rule_book(path: &Path) -> Result<Vec<HeaderRules>, GpzuError> {
    let book = if path.is_dir() {
        let mut files: Vec<_> = std::fs::read_dir(path)
            .map_err(|e| GpzuError::RuleSetLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files
            .iter()
            .map(|f| load_rules(f))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        vec![load_rules(path)?]
    };

    if book.is_empty() {
        return Err(GpzuError::RuleSetLoad {
            path: path.to_path_buf(),
            reason: "no rule files found".into(),
        });
    }

    let mut dialects = HashSet::new();
    for rules in &book {
        if !dialects.insert(rules.dialect.as_str()) {
            return Err(GpzuError::RuleSetInvalid(format!(
                "dialect '{}' is defined twice",
                rules.dialect
            )));
        }
    }

    Ok(book)
}

/// Pick the rule set whose number prefix matches the registration number.
pub fn detect_dialect<'a>(number: &str, book: &'a [HeaderRules]) -> Option<&'a HeaderRules> {
    book.iter().find(|r| number.starts_with(&r.number_prefix))
}
