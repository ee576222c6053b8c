//! Partition records into named buckets.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Record, RecordSet};

/// Records bucketed by the stringified value of a field.
///
/// Buckets iterate in lexicographic key order and keep discovery order
/// inside each bucket. A record lands in a bucket only when its group field
/// is a non-empty string or an integer; anything else (absent, empty, boolean,
/// float, list, mapping, null) leaves it out of every bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupIndex {
    buckets: BTreeMap<String, RecordSet>,
}

impl GroupIndex {
    /// Build an index over `records` keyed by `field`.
    pub fn from_records<'a>(field: &str, records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut index = Self::default();
        for record in records {
            index.insert(field, record);
        }
        index
    }

    /// Add `record` to the bucket for its `field` value, if it has a usable one.
    pub fn insert(&mut self, field: &str, record: &Record) {
        let Some(key) = record.get(field).and_then(|value| value.to_group_key()) else {
            return;
        };
        if key.is_empty() {
            return;
        }
        self.buckets.entry(key).or_default().push(record.clone());
    }

    pub fn get(&self, key: &str) -> Option<&RecordSet> {
        self.buckets.get(key)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordSet)> {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every bucketed record, bucket by bucket.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.iter().flat_map(|(_, set)| set.iter())
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.buckets.values_mut().flatten()
    }
}
