//! Rule descriptor types
//!
//! A heuristic is data: an id, a severity tier, an impact weight, the advisory
//! text used for recommendations, and a pure condition over the venue signal.
//! The evaluator runs every descriptor the same way.

use crate::config::HeuristicConfig;
use crate::fingerprint::KnownIndexers;
use crate::models::{RuleId, Severity, VenueSignal};

/// Everything a rule condition may read. Rules never mutate the signal.
pub struct RuleContext<'a> {
    pub signal: &'a VenueSignal,
    pub config: &'a HeuristicConfig,
    pub known_indexers: &'a KnownIndexers,
}

/// Result of evaluating one condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub triggered: bool,
    pub evidence: String,
}

impl RuleOutcome {
    pub fn triggered(evidence: impl Into<String>) -> Self {
        Self {
            triggered: true,
            evidence: evidence.into(),
        }
    }

    pub fn passed(evidence: impl Into<String>) -> Self {
        Self {
            triggered: false,
            evidence: evidence.into(),
        }
    }
}

pub type RuleCondition = fn(&RuleContext<'_>) -> RuleOutcome;

/// Declarative heuristic rule
#[derive(Clone, Copy)]
pub struct HeuristicRule {
    pub id: RuleId,
    pub name: &'static str,
    pub severity: Severity,
    /// Independent penalty magnitude; rule impacts are not a probability split
    pub impact: f64,
    /// Recommendation emitted when this rule raises a flag
    pub advisory: &'static str,
    pub condition: RuleCondition,
}

impl std::fmt::Debug for HeuristicRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicRule")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("impact", &self.impact)
            .finish()
    }
}
