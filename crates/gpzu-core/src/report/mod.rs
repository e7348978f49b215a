//! The parse result: fixed, ordered groups of labelled values.

pub mod flatten;
pub mod labels;
pub mod value;

pub use flatten::{flatten, FlatTable};
pub use value::Value;

use serde::de::Error;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One top-level group of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub title: String,
    pub fields: Vec<(String, Value)>,
}

impl Group {
    pub fn new(title: impl Into<String>) -> Self {
        Group {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    pub fn field(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.fields.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }
}

/// Structured facts of one plan.
///
/// Serializes as a JSON object of group objects, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub groups: Vec<Group>,
}

impl ParseResult {
    pub fn group(&self, title: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.title == title)
    }

    /// Value of `field` in group `group`.
    pub fn get(&self, group: &str, field: &str) -> Option<&Value> {
        self.group(group)?.get(field)
    }
}

impl Serialize for ParseResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.title, &Value::Map(group.fields.clone()))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParseResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Map(groups) = Value::deserialize(deserializer)? else {
            return Err(D::Error::custom("parse result must be an object of groups"));
        };

        let groups = groups
            .into_iter()
            .map(|(title, fields)| match fields {
                Value::Map(fields) => Ok(Group { title, fields }),
                _ => Err(D::Error::custom(format!("group '{title}' must be an object"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ParseResult { groups })
    }
}
