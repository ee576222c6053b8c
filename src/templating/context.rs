//! The frozen inputs of one render pass.

use tera::Context as TeraContext;

use crate::metadata::{GroupIndex, LoadedRecords, RecordSet, field_union};

/// Data bound into the template.
///
/// Templates see a flat list as `items` and a grouped index as `groups`
/// (group key → list of records, keys in lexicographic order).
#[derive(Debug, Clone, PartialEq)]
pub enum RenderData {
    Flat(RecordSet),
    Grouped(GroupIndex),
}

impl RenderData {
    /// Pad every record with the union of all field names. Added fields are null.
    fn with_uniform_fields(mut self) -> Self {
        match &mut self {
            RenderData::Flat(records) => {
                let fields: Vec<String> =
                    field_union(records.iter()).into_iter().map(str::to_string).collect();
                for record in records.iter_mut() {
                    record.fill_missing(fields.iter().map(String::as_str));
                }
            }
            RenderData::Grouped(groups) => {
                let fields: Vec<String> =
                    field_union(groups.records()).into_iter().map(str::to_string).collect();
                for record in groups.records_mut() {
                    record.fill_missing(fields.iter().map(String::as_str));
                }
            }
        }
        self
    }

    /// Context variable name the data is bound to.
    pub fn variable_name(&self) -> &'static str {
        match self {
            RenderData::Flat(_) => "items",
            RenderData::Grouped(_) => "groups",
        }
    }
}

/// Counters exposed to templates through `item_count` and `group_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounters {
    pub group_count: usize,
    pub item_count: usize,
}

/// Template source, bound data and counters for one render.
///
/// Built once before rendering and never modified while the render runs.
/// Records are padded on construction so they all expose the same fields.
#[derive(Debug, Clone)]
pub struct RenderContext {
    source: String,
    data: RenderData,
    counters: RenderCounters,
}

impl RenderContext {
    pub fn new(source: impl Into<String>, data: RenderData, counters: RenderCounters) -> Self {
        Self {
            source: source.into(),
            data: data.with_uniform_fields(),
            counters,
        }
    }

    /// Bind a loaded record pass: the group index when grouping was requested,
    /// the flat list otherwise. Counters are taken from the full load.
    pub fn from_loaded(source: impl Into<String>, loaded: LoadedRecords) -> Self {
        let counters = RenderCounters {
            group_count: loaded.group_count(),
            item_count: loaded.item_count(),
        };
        let data = match loaded.groups {
            Some(groups) => RenderData::Grouped(groups),
            None => RenderData::Flat(loaded.records),
        };
        Self::new(source, data, counters)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn data(&self) -> &RenderData {
        &self.data
    }

    pub fn counters(&self) -> RenderCounters {
        self.counters
    }

    /// The Tera context holding the bound data.
    pub fn to_tera_context(&self) -> TeraContext {
        let mut context = TeraContext::new();
        match &self.data {
            RenderData::Flat(records) => context.insert(self.data.variable_name(), records),
            RenderData::Grouped(groups) => context.insert(self.data.variable_name(), groups),
        }
        context
    }
}
