//! Fixture JSON loading for test suites

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::error::{HarnessError, HarnessResult};

/// A directory of canned response bodies.
#[derive(Debug, Clone)]
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    /// Wrap a fixture directory. Suites typically pass
    /// `concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures")`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a fixture by name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Load a fixture as a string.
    pub fn load(&self, name: &str) -> HarnessResult<String> {
        let path = self.path(name);
        read(&path).ok_or_else(|| HarnessError::FixtureNotFound(path.display().to_string()))
    }

    /// Load a fixture, falling back to the provided content when the file
    /// is missing or unreadable.
    pub fn load_or(&self, name: &str, fallback: &str) -> String {
        match read(&self.path(name)) {
            Some(content) => content,
            None => {
                warn!("Using fallback content for fixture {}", name);
                fallback.to_string()
            }
        }
    }

    /// Load and parse a fixture as JSON.
    pub fn load_json(&self, name: &str) -> HarnessResult<Value> {
        Ok(serde_json::from_str(&self.load(name)?)?)
    }
}

fn read(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}
