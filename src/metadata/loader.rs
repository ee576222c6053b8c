//! Discover and parse record files.
//!
//! [`RecordLoader`] expands a glob pattern, parses every matching file as a
//! YAML mapping, drops records marked `ignore: true`, attaches the
//! synthesized provenance fields and optionally builds a [`GroupIndex`].
//!
//! Only an invalid pattern is fatal. A file that cannot be read or is not a
//! YAML mapping produces one warning naming the file and is skipped.

use std::path::Path;
use tracing::{debug, warn};

use super::{FieldValue, GroupIndex, Record, RecordSet};
use crate::core::ReadmeError;
use crate::pattern::PatternMatcher;

/// Records produced by one discovery pass.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    /// Every accepted record in discovery order.
    pub records: RecordSet,
    /// Records bucketed by the group-by field, when one was requested.
    pub groups: Option<GroupIndex>,
}

impl LoadedRecords {
    /// Number of accepted records.
    pub fn item_count(&self) -> usize {
        self.records.len()
    }

    /// Number of group buckets; zero when no grouping was requested.
    pub fn group_count(&self) -> usize {
        self.groups.as_ref().map_or(0, GroupIndex::len)
    }
}

/// Loads YAML records matched by a glob pattern.
///
/// # Examples
///
/// ```rust,no_run
/// use yaml_readme::metadata::RecordLoader;
///
/// # fn example() -> anyhow::Result<()> {
/// let loaded = RecordLoader::new("items/*.yaml").with_group_by("year").load()?;
/// println!("{} records in {} groups", loaded.item_count(), loaded.group_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecordLoader {
    pattern: String,
    group_by: Option<String>,
}

impl RecordLoader {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            group_by: None,
        }
    }

    /// Also bucket records by `field`. An empty field name disables grouping.
    pub fn with_group_by(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.group_by = if field.is_empty() {
            None
        } else {
            Some(field)
        };
        self
    }

    /// Run the discovery pass.
    ///
    /// # Errors
    ///
    /// Returns [`ReadmeError::InvalidPattern`] if the glob pattern does not
    /// compile. Matching zero files is not an error.
    pub fn load(&self) -> Result<LoadedRecords, ReadmeError> {
        let matcher = PatternMatcher::new(&self.pattern)?;
        let mut loaded = LoadedRecords {
            records: Vec::new(),
            groups: self.group_by.as_ref().map(|_| GroupIndex::default()),
        };

        for path in matcher.find_matches() {
            let Some(record) = parse_record_file(&path) else {
                continue;
            };

            if record.is_ignored() {
                debug!("Skipping ignored record {}", path.display());
                continue;
            }

            if let (Some(field), Some(groups)) = (&self.group_by, loaded.groups.as_mut()) {
                groups.insert(field, &record);
            }
            loaded.records.push(record);
        }

        debug!(
            "Loaded {} record(s), {} group(s) from '{}'",
            loaded.item_count(),
            loaded.group_count(),
            self.pattern
        );
        Ok(loaded)
    }
}

/// Read and parse one record file, logging and returning `None` on failure.
fn parse_record_file(path: &Path) -> Option<Record> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read file [{}], error: {}", path.display(), e);
            return None;
        }
    };

    let mut record = match parse_record(&content) {
        Ok(record) => record,
        Err(reason) => {
            warn!("failed to parse file [{}] as a YAML, error: {}", path.display(), reason);
            return None;
        }
    };

    for (field, value) in provenance_fields(path) {
        record.insert(field, value);
    }
    Some(record)
}

/// Parse YAML text into a record. An empty document is an empty record.
pub(crate) fn parse_record(content: &str) -> Result<Record, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

    match FieldValue::from(value) {
        FieldValue::Mapping(fields) => Ok(Record::new(fields)),
        FieldValue::Null => Ok(Record::default()),
        other => Err(format!("expected a mapping at the top level, found {other}")),
    }
}

/// The synthesized `filename`, `parentname` and `fullpath` fields for `path`.
fn provenance_fields(path: &Path) -> [(&'static str, FieldValue); 3] {
    let filename = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let parentname = path
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string());

    [
        ("filename", FieldValue::String(filename)),
        ("parentname", FieldValue::String(parentname)),
        ("fullpath", FieldValue::String(path.display().to_string())),
    ]
}
