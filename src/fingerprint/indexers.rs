//! Known abstracting & indexing services
//!
//! Claimed indexers are checked against a tiered allowlist. A claim naming a
//! service outside the list cannot be verified and trips the indexing rule.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Major curated indexes
const TIER1: &[&str] = &[
    "Scopus",
    "Web of Science",
    "IEEE Xplore",
    "ACM Digital Library",
    "PubMed",
    "MEDLINE",
    "MathSciNet",
    "Chemical Abstracts",
];

/// Discovery engines and subject repositories
const TIER2: &[&str] = &[
    "Google Scholar",
    "DBLP",
    "Semantic Scholar",
    "CiteSeerX",
    "arXiv",
    "SSRN",
    "RePEc",
];

/// Registries and metadata services
const TIER3: &[&str] = &[
    "Crossref",
    "DOAJ",
    "ORCID",
    "Dimensions",
    "Microsoft Academic",
];

/// Where a claimed indexer sits in the allowlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexerTier {
    Tier1,
    Tier2,
    Tier3,
    /// Configured by the operator
    Custom,
    Unrecognized,
}

impl IndexerTier {
    pub fn is_known(&self) -> bool {
        !matches!(self, IndexerTier::Unrecognized)
    }
}

/// Lowercase and collapse internal whitespace so "web  of Science " matches.
pub fn normalize_indexer(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Allowlist of indexers a venue may legitimately claim
#[derive(Debug, Clone)]
pub struct KnownIndexers {
    tiers: HashMap<String, IndexerTier>,
}

impl Default for KnownIndexers {
    fn default() -> Self {
        let mut tiers = HashMap::new();
        for (names, tier) in [
            (TIER1, IndexerTier::Tier1),
            (TIER2, IndexerTier::Tier2),
            (TIER3, IndexerTier::Tier3),
        ] {
            for name in names {
                tiers.insert(normalize_indexer(name), tier);
            }
        }
        Self { tiers }
    }
}

impl KnownIndexers {
    /// Built-in allowlist plus operator-supplied names
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = Self::default();
        for name in extra {
            let key = normalize_indexer(name.as_ref());
            if !key.is_empty() {
                known.tiers.entry(key).or_insert(IndexerTier::Custom);
            }
        }
        known
    }

    pub fn classify(&self, name: &str) -> IndexerTier {
        self.tiers
            .get(&normalize_indexer(name))
            .copied()
            .unwrap_or(IndexerTier::Unrecognized)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.classify(name).is_known()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
