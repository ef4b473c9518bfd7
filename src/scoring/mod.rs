//! Credibility Scoring
//!
//! Combines component scores, heuristic outcomes and citation risk into one
//! explainable assessment.
//!
//! # Scoring Formula
//!
//! ```text
//! Component  = Σ weight_i × sub_score_i          (six weights, sum = 1.0)
//! Heuristic  = clamp(1 - Σ impact of triggered rules, 0, 1)
//! Overall    = Component × 0.60 + Heuristic × 0.40
//! Risk       = clamp((1 - Overall) + clamp(citation_risk, 0, 1), 0, 1)
//! ```
//!
//! # Component Weights
//!
//! - CFP credibility: 0.25
//! - Website credibility: 0.20
//! - Indexing credibility: 0.20
//! - Contact legitimacy: 0.15
//! - Organisational structure: 0.10
//! - Publication history: 0.10
//!
//! # Risk Levels (inclusive lower bounds)
//!
//! - Critical: risk ≥ 0.75
//! - High: risk ≥ 0.50
//! - Medium: risk ≥ 0.25
//! - Low: otherwise
//!
//! # Example
//!
//! All sub-scores 0.1 and every heuristic triggered:
//! - Component = 0.1, Heuristic = 0 (clamped)
//! - Overall = 0.1 × 0.6 + 0 × 0.4 = 0.06
//! - Risk ≥ 0.94 → critical

mod categorize;
mod credibility_engine;

pub use categorize::{affected_areas, categorize, describe, primary_risk};
pub use credibility_engine::{
    ensure_sufficient, heuristic_score, recommendations, CredibilityEngine,
};
