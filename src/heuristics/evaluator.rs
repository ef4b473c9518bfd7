//! Heuristic evaluation
//!
//! The evaluator runs every rule in [`RULES`] against a venue signal and
//! returns one [`HeuristicResult`] per rule, in declaration order. A triggered
//! rule never stops the remaining rules from running.

use super::base::RuleContext;
use super::rules::RULES;
use crate::config::HeuristicConfig;
use crate::fingerprint::KnownIndexers;
use crate::models::{HeuristicResult, VenueSignal};
use tracing::debug;

/// Runs the canonical rule set with configurable thresholds
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    config: HeuristicConfig,
    known_indexers: KnownIndexers,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(HeuristicConfig::default())
    }
}

impl HeuristicEvaluator {
    /// Create an evaluator; the indexer allowlist is the built-in one plus
    /// `config.extra_known_indexers`
    pub fn new(config: HeuristicConfig) -> Self {
        let known_indexers = KnownIndexers::with_extra(&config.extra_known_indexers);
        Self {
            config,
            known_indexers,
        }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    pub fn known_indexers(&self) -> &KnownIndexers {
        &self.known_indexers
    }

    /// Evaluate all rules. Always returns `RULES.len()` results.
    pub fn evaluate(&self, signal: &VenueSignal) -> Vec<HeuristicResult> {
        let ctx = RuleContext {
            signal,
            config: &self.config,
            known_indexers: &self.known_indexers,
        };

        let results: Vec<HeuristicResult> = RULES
            .iter()
            .map(|rule| {
                let outcome = (rule.condition)(&ctx);
                if outcome.triggered {
                    debug!(
                        "Rule {} triggered for {}: {}",
                        rule.id, signal.venue_id, outcome.evidence
                    );
                }
                HeuristicResult {
                    rule: rule.id,
                    name: rule.name.to_string(),
                    severity: rule.severity,
                    triggered: outcome.triggered,
                    impact: rule.impact,
                    evidence: outcome.evidence,
                }
            })
            .collect();

        debug!(
            "Evaluated {} heuristics for {} ({} triggered)",
            results.len(),
            signal.venue_id,
            results.iter().filter(|r| r.triggered).count()
        );

        results
    }
}
