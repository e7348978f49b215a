use crate::error::GpzuError;
use crate::rules::parse_rules_str;
use crate::rules::schema::HeaderRules;

const HEADERS_RU_JSON: &str = include_str!("../../../../rules/headers-ru.json");
const HEADERS_RF_JSON: &str = include_str!("../../../../rules/headers-rf.json");

/// Built-in dialects, in detection order.
pub const PRESETS: &[&str] = &["RU", "RF"];

/// Load a built-in rule set by dialect name (case-insensitive).
pub fn load_preset(name: &str) -> Result<HeaderRules, GpzuError> {
    match name.to_uppercase().as_str() {
        "RU" => parse_rules_str(HEADERS_RU_JSON),
        "RF" | "РФ" => parse_rules_str(HEADERS_RF_JSON),
        _ => Err(GpzuError::RuleSetInvalid(format!(
            "unknown dialect '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// All built-in rule sets, in detection order.
pub fn rule_book() -> Result<Vec<HeaderRules>, GpzuError> {
    PRESETS.iter().map(|name| load_preset(name)).collect()
}
