//! Single-venue assessment pipeline
//!
//! Runs one venue through every stage, in order:
//! 1. Build the fingerprint
//! 2. Evaluate the heuristic rules
//! 3. Analyze the citation graph (when citation data is supplied)
//! 4. Score and classify

use crate::citation::{CitationAnalyzer, CitationInput, CitationRiskReport};
use crate::config::CredenceConfig;
use crate::errors::{ensure_finite, CredenceResult};
use crate::fingerprint::{FingerprintBuilder, OrganizerRegistry, VenueFingerprint};
use crate::heuristics::HeuristicEvaluator;
use crate::models::{CredibilityAssessment, VenueSignal};
use crate::scoring::{ensure_sufficient, CredibilityEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Everything the collaborators deliver for one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueInput {
    pub signal: VenueSignal,
    /// Website depth score; defaults to the website's structural completeness
    #[serde(default)]
    pub website_depth: Option<f64>,
    #[serde(default)]
    pub citations: Option<CitationInput>,
}

impl VenueInput {
    pub fn new(signal: VenueSignal) -> Self {
        Self {
            signal,
            website_depth: None,
            citations: None,
        }
    }

    pub fn with_website_depth(mut self, depth: f64) -> Self {
        self.website_depth = Some(depth);
        self
    }

    pub fn with_citations(mut self, citations: CitationInput) -> Self {
        self.citations = Some(citations);
        self
    }

    fn effective_website_depth(&self) -> f64 {
        self.website_depth.unwrap_or_else(|| {
            self.signal
                .website
                .as_ref()
                .map(|w| w.structural_completeness)
                .unwrap_or(0.0)
        })
    }
}

/// Output of every stage for one venue
#[derive(Debug, Clone, Serialize)]
pub struct VenueReport {
    pub fingerprint: VenueFingerprint,
    pub citation: Option<CitationRiskReport>,
    pub assessment: CredibilityAssessment,
}

/// Owns one instance of each stage. Holds no mutable state, so one `Assessor`
/// can be shared by all batch workers.
#[derive(Debug, Clone)]
pub struct Assessor {
    builder: FingerprintBuilder,
    evaluator: HeuristicEvaluator,
    analyzer: CitationAnalyzer,
    engine: CredibilityEngine,
}

impl Assessor {
    /// Build every stage from configuration.
    ///
    /// # Errors
    /// - `Validation` if the scoring weight table is misconfigured
    pub fn new(config: &CredenceConfig) -> CredenceResult<Self> {
        let engine = CredibilityEngine::new(config.scoring.clone())?;
        let evaluator = HeuristicEvaluator::new(config.heuristics.clone());
        let builder =
            FingerprintBuilder::new().with_known_indexers(evaluator.known_indexers().clone());
        Ok(Self {
            builder,
            evaluator,
            analyzer: CitationAnalyzer::new(config.citation.clone()),
            engine,
        })
    }

    /// Use a historical organizer reference set for fingerprinting
    pub fn with_registry(mut self, registry: Arc<OrganizerRegistry>) -> Self {
        self.builder = self.builder.with_registry(registry);
        self
    }

    /// Replace the organizer reference set. Takes `&mut self`, so it can only
    /// happen between batches, never while workers hold the assessor.
    pub fn set_registry(&mut self, registry: Arc<OrganizerRegistry>) {
        self.builder = std::mem::take(&mut self.builder).with_registry(registry);
    }

    pub fn engine(&self) -> &CredibilityEngine {
        &self.engine
    }

    /// Assess one venue end to end.
    ///
    /// # Errors
    /// - `InsufficientData` if the venue id is empty or neither CFP nor
    ///   website data is present
    /// - `Validation` for non-finite numeric input
    /// - `GraphConstruction` if the citation graph cannot be built
    pub fn assess_venue(&self, input: &VenueInput) -> CredenceResult<VenueReport> {
        let signal = &input.signal;
        ensure_sufficient(signal)?;
        let website_depth = ensure_finite("website_depth", input.effective_website_depth())?;

        let fingerprint = self.builder.build(signal, website_depth)?;
        let heuristic_results = self.evaluator.evaluate(signal);
        let citation = input
            .citations
            .as_ref()
            .map(|citations| self.analyzer.analyze(citations))
            .transpose()?;

        debug!(
            "Venue {}: fingerprint {}, citation data {}",
            signal.venue_id,
            fingerprint.syntax_signature,
            if citation.is_some() { "present" } else { "absent" }
        );

        let assessment =
            self.engine
                .assess(signal, &fingerprint, &heuristic_results, citation.as_ref())?;

        Ok(VenueReport {
            fingerprint,
            citation,
            assessment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::CitationEdge;
    use crate::errors::ErrorKind;
    use crate::models::{CfpSignals, WebsiteSignals};

    fn input() -> VenueInput {
        VenueInput::new(
            VenueSignal::new("icml-like", "Example Conference on Learning")
                .with_cfp(CfpSignals {
                    syntax_score: 0.8,
                    professionalism_score: 0.8,
                    language_quality: 0.8,
                    ..Default::default()
                })
                .with_website(WebsiteSignals {
                    has_tls: true,
                    page_count: 20,
                    structural_completeness: 0.7,
                }),
        )
    }

    #[test]
    fn test_assess_venue_runs_every_stage() {
        let assessor = Assessor::new(&CredenceConfig::default()).unwrap();
        let report = assessor.assess_venue(&input()).unwrap();
        assert_eq!(report.assessment.heuristic_results.len(), 7);
        assert_eq!(
            report.assessment.fingerprint_hash,
            report.fingerprint.fingerprint_hash
        );
        assert!(report.citation.is_none());
        assert!((report.fingerprint.website_depth - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_citations_feed_the_assessment() {
        let assessor = Assessor::new(&CredenceConfig::default()).unwrap();
        let with_citations = input().with_citations(CitationInput {
            edges: vec![CitationEdge::new("a", "b")],
            ..Default::default()
        });
        let report = assessor.assess_venue(&with_citations).unwrap();
        let citation = report.citation.unwrap();
        // undeclared nodes carry no identity values to match on
        assert_eq!(citation.edge_count, 1);
        assert_eq!(citation.self_citation_rate, 0.0);
        assert_eq!(report.assessment.breakdown.citation_risk, citation.total_risk);
    }

    #[test]
    fn test_strict_graph_error_propagates() {
        let mut config = CredenceConfig::default();
        config.citation.strict_nodes = true;
        let assessor = Assessor::new(&config).unwrap();
        let bad = input().with_citations(CitationInput {
            edges: vec![CitationEdge::new("a", "b")],
            ..Default::default()
        });
        let err = assessor.assess_venue(&bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GraphConstruction);
    }

    #[test]
    fn test_missing_signal_is_insufficient() {
        let assessor = Assessor::new(&CredenceConfig::default()).unwrap();
        let empty = VenueInput::new(VenueSignal::new("v", "Empty"));
        let err = assessor.assess_venue(&empty).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn test_misconfigured_weights_fail_fast() {
        let mut config = CredenceConfig::default();
        config.scoring.component_weights.cfp_credibility = 0.9;
        assert!(Assessor::new(&config).is_err());
    }

    #[test]
    fn test_input_deserializes_without_optional_parts() {
        let parsed: VenueInput =
            serde_json::from_str(r#"{"signal": {"venue_id": "j1", "venue_type": "journal"}}"#)
                .unwrap();
        assert!(parsed.citations.is_none());
        assert!(parsed.website_depth.is_none());
    }
}
