//! Configuration module for Credence
//!
//! This module handles:
//! - Project-level configuration (credence.toml)
//! - The fixed scoring weight table and its invariants
//! - Heuristic and citation thresholds
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, CitationConfig, CliDefaults, ComponentFlagThresholds,
    ComponentWeights, CredenceConfig, HeuristicConfig, RiskThresholds, ScoringConfig,
    DEFAULT_COMPONENT_BLEND, DEFAULT_COMPONENT_WEIGHTS, DEFAULT_HEURISTIC_BLEND, EXAMPLE_CONFIG,
    WEIGHT_TOLERANCE,
};
