//! Metadata records loaded from YAML files.
//!
//! Each YAML file matched by the record pattern becomes one [`Record`]: a
//! mapping from field name to a [`FieldValue`]. Records are created once per
//! discovery pass and never mutated afterwards; sorting and grouping only
//! reorder or copy them.
//!
//! # Synthesized Fields
//!
//! Every record carries three fields that are not present in its source file:
//!
//! | Field | Value |
//! |-------|-------|
//! | `filename` | File name without extension (`items/rust.yaml` → `rust`) |
//! | `parentname` | Base name of the containing directory (`items`) |
//! | `fullpath` | The path as matched by the glob pattern |
//!
//! Synthesized fields always overwrite same-named fields from the source.
//!
//! # Submodules
//!
//! - [`loader`] - Glob discovery and YAML parsing
//! - [`group`] - Partitioning records into buckets by a field
//! - [`sort`] - Ordering records by a field and direction token

pub mod group;
pub mod loader;
pub mod sort;

pub use group::GroupIndex;
pub use loader::{LoadedRecords, RecordLoader};
pub use sort::{SortKey, sort_records};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Names of the fields synthesized for every record, in display order.
pub const SYNTHESIZED_FIELDS: &[&str] = &["filename", "parentname", "fullpath"];

/// Field that removes a record from every downstream stage when set to `true`.
pub const IGNORE_FIELD: &str = "ignore";

/// A dynamically-typed value read from a record file.
///
/// YAML scalars, sequences and mappings map onto the variants one-to-one.
/// A field that does not exist at all is represented by `None` from
/// [`Record::get`], never by a variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<FieldValue>),
    Mapping(BTreeMap<String, FieldValue>),
    Null,
}

impl FieldValue {
    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value switches a feature on. Only the boolean `true` does.
    pub fn is_truthy(&self) -> bool {
        matches!(self, FieldValue::Boolean(true))
    }

    /// Coerce a scalar into the text used for a grouping key.
    ///
    /// Strings and integers are supported; every other variant yields `None`
    /// so the record stays out of the group index.
    pub fn to_group_key(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }
}

impl From<serde_yaml::Value> for FieldValue {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => FieldValue::Null,
            serde_yaml::Value::Bool(b) => FieldValue::Boolean(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => FieldValue::String(s),
            serde_yaml::Value::Sequence(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from).collect())
            }
            serde_yaml::Value::Mapping(mapping) => FieldValue::Mapping(
                mapping
                    .into_iter()
                    .filter_map(|(key, value)| {
                        yaml_key_to_string(&key).map(|key| (key, FieldValue::from(value)))
                    })
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => FieldValue::from(tagged.value),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::List(items) => write!(f, "[{} items]", items.len()),
            FieldValue::Mapping(map) => write!(f, "{{{} fields}}", map.len()),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

/// Render a YAML mapping key as a field name. Only scalar keys are kept.
pub(crate) fn yaml_key_to_string(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(&tagged.value),
        _ => None,
    }
}

/// One normalized metadata entry plus its synthesized provenance fields.
///
/// Serializes as a flat map so templates access fields directly
/// (`{{ item.name }}`, `{{ item.filename }}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create a record from already-normalized fields.
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            fields,
        }
    }

    /// Look up a field. `None` means the field is absent.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Iterate over all fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the record asks to be skipped.
    pub fn is_ignored(&self) -> bool {
        self.get(IGNORE_FIELD).is_some_and(FieldValue::is_truthy)
    }

    pub(crate) fn insert(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }

    /// Add every name in `fields` this record lacks, as [`FieldValue::Null`].
    pub fn fill_missing<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        for field in fields {
            if !self.fields.contains_key(field) {
                self.fields.insert(field.to_string(), FieldValue::Null);
            }
        }
    }
}

/// Every field name used by at least one of `records`.
pub fn field_union<'a>(records: impl IntoIterator<Item = &'a Record>) -> BTreeSet<&'a str> {
    records.into_iter().flat_map(|record| record.fields.keys().map(String::as_str)).collect()
}

/// Builder-style constructor used by tests and fixtures.
impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// An ordered collection of records. Order is discovery order until sorted.
pub type RecordSet = Vec<Record>;
