//! Project-level configuration support
//!
//! Loads configuration from `credence.toml` or `.credencerc.json` in the
//! working directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # credence.toml
//!
//! [scoring.component_weights]
//! cfp_credibility = 0.25
//! website_credibility = 0.20
//! indexing_credibility = 0.20
//! contact_legitimacy = 0.15
//! org_structure = 0.10
//! pub_history = 0.10
//!
//! [scoring]
//! citation_flag_ceiling = 0.5
//!
//! [heuristics]
//! urgency_threshold = 3
//! extra_known_indexers = ["INSPIRE-HEP"]
//!
//! [citation]
//! identity_attributes = ["author", "affiliation"]
//! strict_nodes = false
//!
//! [defaults]
//! format = "text"
//! workers = 8
//! ```

use crate::errors::{CredenceError, CredenceResult};
use crate::models::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Tolerance used when checking that a weight set sums to 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Fixed component weights of the credibility formula.
///
/// This is the single table the weight invariant is checked against.
pub const DEFAULT_COMPONENT_WEIGHTS: ComponentWeights = ComponentWeights {
    cfp_credibility: 0.25,
    website_credibility: 0.20,
    indexing_credibility: 0.20,
    contact_legitimacy: 0.15,
    org_structure: 0.10,
    pub_history: 0.10,
};

/// Share of the overall credibility taken from the component score
pub const DEFAULT_COMPONENT_BLEND: f64 = 0.60;
/// Share of the overall credibility taken from the heuristic score
pub const DEFAULT_HEURISTIC_BLEND: f64 = 0.40;

/// Configuration loaded from credence.toml or similar
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CredenceConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub heuristics: HeuristicConfig,

    #[serde(default)]
    pub citation: CitationConfig,

    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Weights of the six credibility components (must sum to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub cfp_credibility: f64,
    pub website_credibility: f64,
    pub indexing_credibility: f64,
    pub contact_legitimacy: f64,
    pub org_structure: f64,
    pub pub_history: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        DEFAULT_COMPONENT_WEIGHTS
    }
}

impl ComponentWeights {
    fn as_array(&self) -> [(&'static str, f64); 6] {
        [
            ("cfp_credibility", self.cfp_credibility),
            ("website_credibility", self.website_credibility),
            ("indexing_credibility", self.indexing_credibility),
            ("contact_legitimacy", self.contact_legitimacy),
            ("org_structure", self.org_structure),
            ("pub_history", self.pub_history),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().map(|(_, w)| w).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Every weight finite and non-negative, total exactly 1.0
    pub fn validate(&self) -> CredenceResult<()> {
        for (name, weight) in self.as_array() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CredenceError::validation(format!(
                    "component weight {name} must be a non-negative number, got {weight}"
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(CredenceError::validation(format!(
                "component weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Lower bounds (inclusive) of each risk tier
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical: 0.75,
            high: 0.50,
            medium: 0.25,
        }
    }
}

impl RiskThresholds {
    /// Map a risk score to its tier; comparisons are inclusive at each lower bound
    pub fn level_for(&self, risk_score: f64) -> RiskLevel {
        if risk_score >= self.critical {
            RiskLevel::Critical
        } else if risk_score >= self.high {
            RiskLevel::High
        } else if risk_score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn validate(&self) -> CredenceResult<()> {
        let ordered = 0.0 <= self.medium
            && self.medium <= self.high
            && self.high <= self.critical
            && self.critical <= 1.0;
        if ordered {
            Ok(())
        } else {
            Err(CredenceError::validation(format!(
                "risk thresholds must satisfy 0 <= medium <= high <= critical <= 1, got {}/{}/{}",
                self.medium, self.high, self.critical
            )))
        }
    }
}

/// Component scores below these values raise a flag
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ComponentFlagThresholds {
    pub cfp_credibility: f64,
    pub indexing_credibility: f64,
    pub contact_legitimacy: f64,
    pub website_credibility: f64,
}

impl Default for ComponentFlagThresholds {
    fn default() -> Self {
        Self {
            cfp_credibility: 0.2,
            indexing_credibility: 0.3,
            contact_legitimacy: 0.4,
            website_credibility: 0.3,
        }
    }
}

/// Scoring configuration for the credibility engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub component_weights: ComponentWeights,

    #[serde(default = "default_component_blend")]
    pub component_blend: f64,

    #[serde(default = "default_heuristic_blend")]
    pub heuristic_blend: f64,

    #[serde(default)]
    pub risk_thresholds: RiskThresholds,

    /// Citation risk above this value adds a flag
    #[serde(default = "default_citation_flag_ceiling")]
    pub citation_flag_ceiling: f64,

    /// Confidence never drops below this value
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,

    #[serde(default)]
    pub flag_thresholds: ComponentFlagThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            component_weights: ComponentWeights::default(),
            component_blend: default_component_blend(),
            heuristic_blend: default_heuristic_blend(),
            risk_thresholds: RiskThresholds::default(),
            citation_flag_ceiling: default_citation_flag_ceiling(),
            confidence_floor: default_confidence_floor(),
            flag_thresholds: ComponentFlagThresholds::default(),
        }
    }
}

fn default_component_blend() -> f64 {
    DEFAULT_COMPONENT_BLEND
}
fn default_heuristic_blend() -> f64 {
    DEFAULT_HEURISTIC_BLEND
}
fn default_citation_flag_ceiling() -> f64 {
    0.5
}
fn default_confidence_floor() -> f64 {
    0.3
}

impl ScoringConfig {
    /// Check every invariant of the weight table
    pub fn validate(&self) -> CredenceResult<()> {
        self.component_weights.validate()?;

        let blends_ok = self.component_blend.is_finite()
            && self.heuristic_blend.is_finite()
            && self.component_blend >= 0.0
            && self.heuristic_blend >= 0.0
            && ((self.component_blend + self.heuristic_blend) - 1.0).abs() <= WEIGHT_TOLERANCE;
        if !blends_ok {
            return Err(CredenceError::validation(format!(
                "component_blend + heuristic_blend must equal 1.0, got {} + {}",
                self.component_blend, self.heuristic_blend
            )));
        }

        self.risk_thresholds.validate()?;

        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(CredenceError::validation(format!(
                "confidence_floor must be within [0, 1], got {}",
                self.confidence_floor
            )));
        }
        if !self.citation_flag_ceiling.is_finite() {
            return Err(CredenceError::validation(
                "citation_flag_ceiling must be finite",
            ));
        }
        Ok(())
    }
}

/// Thresholds used by the heuristic rule set
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeuristicConfig {
    /// Urgency rule fires when the count exceeds this value
    #[serde(default = "default_urgency_threshold")]
    pub urgency_threshold: u32,

    #[serde(default = "default_min_structural_completeness")]
    pub min_structural_completeness: f64,

    #[serde(default = "default_min_contact_legitimacy")]
    pub min_contact_legitimacy: f64,

    /// Shortest plausible submission-to-publication turnaround
    #[serde(default = "default_min_turnaround_days")]
    pub min_turnaround_days: u32,

    /// Indexers accepted in addition to the built-in allowlist
    #[serde(default)]
    pub extra_known_indexers: Vec<String>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            urgency_threshold: default_urgency_threshold(),
            min_structural_completeness: default_min_structural_completeness(),
            min_contact_legitimacy: default_min_contact_legitimacy(),
            min_turnaround_days: default_min_turnaround_days(),
            extra_known_indexers: Vec::new(),
        }
    }
}

fn default_urgency_threshold() -> u32 {
    3
}
fn default_min_structural_completeness() -> f64 {
    0.5
}
fn default_min_contact_legitimacy() -> f64 {
    0.4
}
fn default_min_turnaround_days() -> u32 {
    14
}

/// Citation graph analysis settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CitationConfig {
    /// Node attributes compared to decide whether an edge is a self-citation
    #[serde(default = "default_identity_attributes")]
    pub identity_attributes: Vec<String>,

    /// Minimum internal edge density for a mutual-citation group to count
    #[serde(default = "default_cluster_density_threshold")]
    pub cluster_density_threshold: f64,

    /// Share of edges the top identity pairs must exceed to flag a pattern
    #[serde(default = "default_pattern_share_threshold")]
    pub pattern_share_threshold: f64,

    /// Fraction of distinct identity pairs considered the "top" set
    #[serde(default = "default_pattern_top_fraction")]
    pub pattern_top_fraction: f64,

    /// Reject edges whose endpoints have no attribute entry
    #[serde(default)]
    pub strict_nodes: bool,

    /// Attributes assumed for nodes missing from the attribute map
    #[serde(default)]
    pub default_node_attributes: BTreeMap<String, String>,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            identity_attributes: default_identity_attributes(),
            cluster_density_threshold: default_cluster_density_threshold(),
            pattern_share_threshold: default_pattern_share_threshold(),
            pattern_top_fraction: default_pattern_top_fraction(),
            strict_nodes: false,
            default_node_attributes: BTreeMap::new(),
        }
    }
}

fn default_identity_attributes() -> Vec<String> {
    vec!["author".to_string(), "affiliation".to_string()]
}
fn default_cluster_density_threshold() -> f64 {
    0.5
}
fn default_pattern_share_threshold() -> f64 {
    0.5
}
fn default_pattern_top_fraction() -> f64 {
    0.1
}

/// Default CLI flags that can be set in config
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Default number of batch workers
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Example file written by `credence init`
pub const EXAMPLE_CONFIG: &str = r#"# Credence configuration

[scoring]
component_blend = 0.60
heuristic_blend = 0.40
citation_flag_ceiling = 0.5
confidence_floor = 0.3

[scoring.component_weights]
cfp_credibility = 0.25
website_credibility = 0.20
indexing_credibility = 0.20
contact_legitimacy = 0.15
org_structure = 0.10
pub_history = 0.10

[scoring.risk_thresholds]
critical = 0.75
high = 0.50
medium = 0.25

[heuristics]
urgency_threshold = 3
min_structural_completeness = 0.5
min_contact_legitimacy = 0.4
min_turnaround_days = 14
extra_known_indexers = []

[citation]
identity_attributes = ["author", "affiliation"]
cluster_density_threshold = 0.5
pattern_share_threshold = 0.5
pattern_top_fraction = 0.1
strict_nodes = false

[defaults]
format = "text"
"#;

/// Load configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `credence.toml`
/// 2. `.credencerc.json`
///
/// Returns default configuration if no config file is found or parsing fails.
pub fn load_project_config(dir: &Path) -> CredenceConfig {
    let toml_path = dir.join("credence.toml");
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(".credencerc.json");
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    CredenceConfig::default()
}

/// Load an explicitly requested config file; errors are surfaced, not swallowed.
pub fn load_config_file(path: &Path) -> anyhow::Result<CredenceConfig> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        load_json_config(path)
    } else {
        load_toml_config(path)
    }
}

fn load_toml_config(path: &Path) -> anyhow::Result<CredenceConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: CredenceConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<CredenceConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: CredenceConfig = serde_json::from_str(&content)?;
    Ok(config)
}
