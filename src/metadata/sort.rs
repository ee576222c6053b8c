//! Order records by a field.
//!
//! The direction token is the field name, optionally prefixed with `!`:
//!
//! | Token | Order |
//! |-------|-------|
//! | `year` | descending |
//! | `!year` | ascending |
//!
//! Descending is the default on purpose; existing templates rely on
//! `--sort-by year` putting the newest entries first.
//!
//! Only string values take part in the comparison. Records whose field is
//! absent or not a string compare as not-less-than everything, so they end
//! up after all string-valued records whichever direction is used. The sort
//! is stable.
//!
//! Sorting applies to the flat record list only. Group buckets keep their
//! discovery order.

use std::cmp::Ordering;

use super::{Record, RecordSet};

/// A parsed sort token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    /// Parse a token such as `year` or `!year`. Returns `None` for an empty field.
    pub fn parse(token: &str) -> Option<Self> {
        let (field, descending) = match token.strip_prefix('!') {
            Some(field) => (field, false),
            None => (token, true),
        };

        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            descending,
        })
    }
}

/// Sort `records` in place by `key`.
pub fn sort_records(records: &mut RecordSet, key: &SortKey) {
    tracing::debug!(
        "Sorting {} record(s) by '{}' ({})",
        records.len(),
        key.field,
        if key.descending {
            "descending"
        } else {
            "ascending"
        }
    );
    records.sort_by(|left, right| compare(left, right, key));
}

fn compare(left: &Record, right: &Record, key: &SortKey) -> Ordering {
    let left = left.get(&key.field).and_then(|v| v.as_str());
    let right = right.get(&key.field).and_then(|v| v.as_str());

    match (left, right) {
        (Some(l), Some(r)) => {
            if key.descending {
                r.cmp(l)
            } else {
                l.cmp(r)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
