//! Test fixtures for creating record files and templates on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::DEFAULT_TEMPLATE;

/// Sample record file contents.
#[derive(Clone, Debug)]
pub struct RecordFixture {
    pub name: String,
    pub content: String,
}

impl RecordFixture {
    /// A record with a name and a string year.
    pub fn named(name: &str, year: &str) -> Self {
        Self {
            name: format!("{name}.yaml"),
            content: format!("name: {name}\nyear: \"{year}\"\n"),
        }
    }

    /// A record marked `ignore: true`.
    pub fn ignored(name: &str) -> Self {
        Self {
            name: format!("{name}.yaml"),
            content: format!("name: {name}\nignore: true\n"),
        }
    }

    /// A file that is not valid YAML.
    pub fn malformed(name: &str) -> Self {
        Self {
            name: format!("{name}.yaml"),
            content: "name: [unclosed\n".to_string(),
        }
    }
}

/// A temporary project with an `items/` directory and a template.
pub struct ReadmeProject {
    dir: TempDir,
}

impl ReadmeProject {
    pub fn new() -> Result<Self> {
        // Initialize test logging if RUST_LOG is set
        super::init_test_logging(None);

        let dir = TempDir::new().context("Failed to create temp directory")?;
        fs::create_dir_all(dir.path().join("items")).context("Failed to create items directory")?;
        Ok(Self {
            dir,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Glob pattern matching every record written with [`write_record`](Self::write_record).
    pub fn pattern(&self) -> String {
        format!("{}/items/*.yaml", self.path().display())
    }

    /// Path of the default template file.
    pub fn template_path(&self) -> PathBuf {
        self.path().join(DEFAULT_TEMPLATE)
    }

    /// Write a record file into `items/`.
    pub fn write_record(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.write_file(&format!("items/{name}"), content)
    }

    pub fn write_fixture(&self, fixture: &RecordFixture) -> Result<PathBuf> {
        self.write_record(&fixture.name, &fixture.content)
    }

    /// Write the default template file.
    pub fn write_template(&self, content: &str) -> Result<PathBuf> {
        let path = self.template_path();
        fs::write(&path, content)
            .with_context(|| format!("Failed to write template {}", path.display()))?;
        Ok(path)
    }

    /// Write any file relative to the project root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file {}", path.display()))?;
        Ok(path)
    }
}
