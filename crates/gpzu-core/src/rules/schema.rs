use serde::{Deserialize, Serialize};

/// Header rules for one layout dialect of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRules {
    /// Short dialect name, e.g. "RU".
    pub dialect: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Registration numbers starting with this prefix use these rules.
    pub number_prefix: String,
    /// Phrase removed from the rightsholder text before normalization.
    #[serde(default)]
    pub rightsholder_prefix: Option<String>,
    /// Extractable fields. Order is documentation only; every field is
    /// located independently.
    pub fields: Vec<FieldRule>,
}

/// Where one field's value sits relative to its header lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    /// Prefix of the header line the value follows.
    pub start: String,
    /// Prefix of the next header line; reading stops before it.
    pub stop: String,
    /// Distance in lines from the start header to the first value line.
    pub offset: usize,
    /// `Some(1)` for a single-line value, `None` to read up to `stop`.
    #[serde(default)]
    pub length: Option<usize>,
}

impl FieldRule {
    pub fn is_single_line(&self) -> bool {
        self.length == Some(1)
    }
}
