//! Credibility scoring engine
//!
//! Fuses the component scores, heuristic outcomes and citation risk of one
//! venue into a [`CredibilityAssessment`].

use super::categorize::categorize;
use crate::citation::CitationRiskReport;
use crate::config::ScoringConfig;
use crate::errors::{ensure_finite, CredenceError, CredenceResult};
use crate::fingerprint::VenueFingerprint;
use crate::heuristics::rule;
use crate::models::{
    clamp_unit, ComponentScores, CredibilityAssessment, Flag, FlagKind, HeuristicResult,
    ScoreBreakdown, Severity, VenueSignal, NEUTRAL_SCORE,
};
use chrono::Utc;
use tracing::{debug, info};

/// Confidence lost for each absent optional input
const MISSING_CFP_PENALTY: f64 = 0.25;
const MISSING_WEBSITE_PENALTY: f64 = 0.25;
const MISSING_CITATIONS_PENALTY: f64 = 0.20;
const MISSING_ORGANIZERS_PENALTY: f64 = 0.10;
const MISSING_INDEXERS_PENALTY: f64 = 0.05;

/// Fail with `InsufficientData` when the mandatory signal is absent: no venue
/// id, or neither CFP nor website data
pub fn ensure_sufficient(signal: &VenueSignal) -> CredenceResult<()> {
    if signal.venue_id.trim().is_empty() {
        return Err(CredenceError::insufficient_data("venue id is missing"));
    }
    if signal.cfp.is_none() && signal.website.is_none() {
        return Err(CredenceError::insufficient_data(format!(
            "venue {} has neither call-for-papers nor website data",
            signal.venue_id
        )));
    }
    Ok(())
}

/// Heuristic score: 1 minus the impacts of triggered rules, clamped
pub fn heuristic_score(results: &[HeuristicResult]) -> f64 {
    let penalty: f64 = results.iter().map(HeuristicResult::applied_impact).sum();
    clamp_unit(1.0 - penalty)
}

/// Scores venues against a validated weight table
#[derive(Debug, Clone)]
pub struct CredibilityEngine {
    config: ScoringConfig,
}

impl Default for CredibilityEngine {
    fn default() -> Self {
        // The default table always satisfies the weight invariant
        Self {
            config: ScoringConfig::default(),
        }
    }
}

impl CredibilityEngine {
    /// Create an engine, rejecting a misconfigured weight table up front.
    ///
    /// # Errors
    /// - `Validation` if the component weights do not sum to 1.0, a weight is
    ///   negative, the blend weights do not sum to 1.0 or the risk thresholds
    ///   are out of order
    pub fn new(config: ScoringConfig) -> CredenceResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The six sub-scores, clamped; absent CFP data scores neutral
    pub fn component_scores(&self, signal: &VenueSignal) -> ComponentScores {
        ComponentScores {
            cfp_credibility: signal
                .cfp
                .as_ref()
                .map(|cfp| cfp.credibility())
                .unwrap_or(NEUTRAL_SCORE),
            website_credibility: clamp_unit(signal.website_credibility),
            indexing_credibility: clamp_unit(signal.indexing_credibility),
            contact_legitimacy: clamp_unit(signal.contact_legitimacy),
            org_structure: clamp_unit(signal.org_structure),
            pub_history: clamp_unit(signal.pub_history),
        }
    }

    pub fn component_score(&self, components: &ComponentScores) -> f64 {
        let w = &self.config.component_weights;
        clamp_unit(
            components.cfp_credibility * w.cfp_credibility
                + components.website_credibility * w.website_credibility
                + components.indexing_credibility * w.indexing_credibility
                + components.contact_legitimacy * w.contact_legitimacy
                + components.org_structure * w.org_structure
                + components.pub_history * w.pub_history,
        )
    }

    pub fn overall_credibility(&self, component_score: f64, heuristic_score: f64) -> f64 {
        clamp_unit(
            component_score * self.config.component_blend
                + heuristic_score * self.config.heuristic_blend,
        )
    }

    /// (1 - overall) plus the clamped citation risk, clamped again
    pub fn risk_score(&self, overall_credibility: f64, citation_risk: f64) -> f64 {
        clamp_unit((1.0 - overall_credibility) + clamp_unit(citation_risk))
    }

    /// Input completeness, floored so sparse input still yields an assessment
    pub fn confidence(&self, signal: &VenueSignal, citation: Option<&CitationRiskReport>) -> f64 {
        let mut confidence = 1.0;
        if signal.cfp.is_none() {
            confidence -= MISSING_CFP_PENALTY;
        }
        if signal.website.is_none() {
            confidence -= MISSING_WEBSITE_PENALTY;
        }
        if !citation.is_some_and(CitationRiskReport::has_citations) {
            confidence -= MISSING_CITATIONS_PENALTY;
        }
        if signal.organizers.is_empty() {
            confidence -= MISSING_ORGANIZERS_PENALTY;
        }
        if signal.claimed_indexers.is_empty() {
            confidence -= MISSING_INDEXERS_PENALTY;
        }
        clamp_unit(confidence).max(self.config.confidence_floor)
    }

    /// Assess one venue.
    ///
    /// # Errors
    /// - `InsufficientData` if the venue id is empty or neither CFP nor
    ///   website data is present
    /// - `Validation` if the fingerprint belongs to another venue, any
    ///   numeric input is not finite, or a heuristic impact is negative
    pub fn assess(
        &self,
        signal: &VenueSignal,
        fingerprint: &VenueFingerprint,
        heuristic_results: &[HeuristicResult],
        citation: Option<&CitationRiskReport>,
    ) -> CredenceResult<CredibilityAssessment> {
        ensure_sufficient(signal)?;
        signal.validate()?;
        if fingerprint.venue_id != signal.venue_id {
            return Err(CredenceError::validation(format!(
                "fingerprint is for venue {}, not {}",
                fingerprint.venue_id, signal.venue_id
            )));
        }
        for result in heuristic_results {
            let impact = ensure_finite(result.rule.as_str(), result.impact)?;
            if impact < 0.0 {
                return Err(CredenceError::validation(format!(
                    "{} impact must not be negative, got {impact}",
                    result.rule.as_str()
                )));
            }
        }
        let citation_risk = match citation {
            Some(report) => ensure_finite("citation.total_risk", report.total_risk)?,
            None => 0.0,
        };

        let components = self.component_scores(signal);
        let component_score = self.component_score(&components);
        let heuristic_score = heuristic_score(heuristic_results);
        let overall_credibility = self.overall_credibility(component_score, heuristic_score);
        let risk_score = self.risk_score(overall_credibility, citation_risk);
        let risk_level = self.config.risk_thresholds.level_for(risk_score);

        debug!(
            "Scores for {}: component={:.3} heuristic={:.3} citation={:.3} risk={:.3}",
            signal.venue_id, component_score, heuristic_score, citation_risk, risk_score
        );

        let flags = self.flags(&components, heuristic_results, citation_risk);
        let recommendations = recommendations(&flags);
        let confidence = self.confidence(signal, citation);
        let risk_category = categorize(&components, heuristic_results, risk_level);

        let assessment = CredibilityAssessment {
            venue_id: signal.venue_id.clone(),
            venue_name: signal.venue_name.clone(),
            fingerprint_hash: fingerprint.fingerprint_hash.clone(),
            overall_credibility,
            risk_level,
            breakdown: ScoreBreakdown {
                components,
                component_score,
                heuristic_score,
                citation_risk,
                normalized_citation_risk: clamp_unit(citation_risk),
                risk_score,
            },
            heuristic_results: heuristic_results.to_vec(),
            confidence,
            flags,
            recommendations,
            risk_category,
            assessed_at: Utc::now(),
        };

        info!(
            "Assessed {}: credibility {:.3}, risk {} ({} flags, confidence {:.2})",
            assessment.venue_id,
            assessment.overall_credibility,
            assessment.risk_level,
            assessment.flags.len(),
            assessment.confidence
        );

        Ok(assessment)
    }

    /// Weak components first, then flagged heuristics in rule order, then
    /// citation risk
    fn flags(
        &self,
        components: &ComponentScores,
        heuristic_results: &[HeuristicResult],
        citation_risk: f64,
    ) -> Vec<Flag> {
        let t = &self.config.flag_thresholds;
        let mut flags = Vec::new();

        let component_checks = [
            (
                FlagKind::CfpCredibility,
                components.cfp_credibility,
                t.cfp_credibility,
                Severity::High,
                "Call for papers shows poor linguistic quality",
            ),
            (
                FlagKind::IndexingCredibility,
                components.indexing_credibility,
                t.indexing_credibility,
                Severity::High,
                "Indexing claims could not be substantiated",
            ),
            (
                FlagKind::ContactLegitimacy,
                components.contact_legitimacy,
                t.contact_legitimacy,
                Severity::Medium,
                "Contact information appears illegitimate",
            ),
            (
                FlagKind::WebsiteCredibility,
                components.website_credibility,
                t.website_credibility,
                Severity::Medium,
                "Website lacks the structure of an established venue",
            ),
        ];
        for (kind, score, threshold, severity, text) in component_checks {
            if score < threshold {
                flags.push(Flag {
                    kind,
                    severity,
                    message: format!("{text} ({score:.2} < {threshold:.2})"),
                });
            }
        }

        for result in heuristic_results
            .iter()
            .filter(|r| r.triggered && r.severity.is_flagged())
        {
            flags.push(Flag {
                kind: FlagKind::Heuristic(result.rule),
                severity: result.severity,
                message: format!("{}: {}", result.name, result.evidence),
            });
        }

        if citation_risk > self.config.citation_flag_ceiling {
            flags.push(Flag {
                kind: FlagKind::CitationRisk,
                severity: Severity::High,
                message: format!(
                    "Citation manipulation risk {:.2} exceeds {:.2}",
                    citation_risk, self.config.citation_flag_ceiling
                ),
            });
        }

        flags
    }
}

/// Advisory text for one flag
fn advisory(kind: FlagKind) -> &'static str {
    match kind {
        FlagKind::CfpCredibility => {
            "Read the call for papers critically; legitimate venues write carefully."
        }
        FlagKind::IndexingCredibility => {
            "Check the venue's listing directly in each index it claims."
        }
        FlagKind::ContactLegitimacy => {
            "Contact the organisers through an institutional address before paying anything."
        }
        FlagKind::WebsiteCredibility => {
            "Look for an editorial board, review policy and archive on the venue website."
        }
        FlagKind::Heuristic(id) => rule(id).advisory,
        FlagKind::CitationRisk => {
            "Inspect the venue's past proceedings for citation rings and excessive self-citation."
        }
    }
}

/// Deterministic, de-duplicated recommendations in flag order
pub fn recommendations(flags: &[Flag]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for flag in flags {
        let text = advisory(flag.kind);
        if !out.iter().any(|r| r == text) {
            out.push(text.to_string());
        }
    }
    out
}
