//! Historical organizer reference set
//!
//! Read-only during a scoring pass. Callers that refresh it do so between
//! batches by swapping in a new `Arc<OrganizerRegistry>`.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Organizer names seen on previously assessed venues
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct OrganizerRegistry {
    names: HashSet<String>,
}

impl From<Vec<String>> for OrganizerRegistry {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl OrganizerRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| normalize_name(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    /// Load a JSON array of organizer names
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let registry: OrganizerRegistry = serde_json::from_str(&content)?;
        Ok(registry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
