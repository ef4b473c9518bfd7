//! Risk categorisation
//!
//! Picks the primary kind of harm a venue poses. Fee-related findings mean
//! financial risk first; weak indexing means reputational risk; a poor call
//! for papers or an implausible turnaround means wasted time. Reputational is
//! the fallback.

use crate::models::{ComponentScores, HeuristicResult, RiskCategory, RiskLevel, RiskType, RuleId};

const WEAK_INDEXING: f64 = 0.4;
const HIGH_CFP_RISK: f64 = 0.7;

fn triggered(results: &[HeuristicResult], rule: RuleId) -> bool {
    results.iter().any(|r| r.rule == rule && r.triggered)
}

pub fn primary_risk(components: &ComponentScores, results: &[HeuristicResult]) -> RiskType {
    if triggered(results, RuleId::FeeProminence) {
        return RiskType::Financial;
    }
    if components.indexing_credibility < WEAK_INDEXING {
        return RiskType::Reputational;
    }
    if 1.0 - components.cfp_credibility > HIGH_CFP_RISK
        || triggered(results, RuleId::PublicationSpeed)
    {
        return RiskType::Time;
    }
    RiskType::Reputational
}

pub fn affected_areas(risk_type: RiskType) -> &'static [&'static str] {
    match risk_type {
        RiskType::Financial => &["Publication fees", "Registration costs", "Hidden charges"],
        RiskType::Reputational => &["Academic reputation", "CV quality", "Future citations"],
        RiskType::Time => &["Research time", "Publication timeline", "Career progression"],
    }
}

pub fn describe(risk_type: RiskType, level: RiskLevel) -> &'static str {
    match (risk_type, level) {
        (RiskType::Financial, RiskLevel::Low) => "Minimal financial risk, fees appear standard",
        (RiskType::Financial, RiskLevel::Medium) => {
            "Moderate financial risk, verify the fee structure"
        }
        (RiskType::Financial, RiskLevel::High) => "High financial risk, questionable fee practices",
        (RiskType::Financial, RiskLevel::Critical) => {
            "Critical financial risk, likely predatory fees"
        }
        (RiskType::Reputational, RiskLevel::Low) => {
            "Minimal reputational risk, venue appears credible"
        }
        (RiskType::Reputational, RiskLevel::Medium) => {
            "Moderate reputational risk, mixed credibility signals"
        }
        (RiskType::Reputational, RiskLevel::High) => {
            "High reputational risk, venue shows predatory indicators"
        }
        (RiskType::Reputational, RiskLevel::Critical) => {
            "Critical reputational risk, publishing here may harm your career"
        }
        (RiskType::Time, RiskLevel::Low) => {
            "Minimal time risk, standard publishing process expected"
        }
        (RiskType::Time, RiskLevel::Medium) => {
            "Moderate time risk, review process may be problematic"
        }
        (RiskType::Time, RiskLevel::High) => "High time risk, significant delays or issues likely",
        (RiskType::Time, RiskLevel::Critical) => {
            "Critical time risk, likely to waste substantial time"
        }
    }
}

pub fn categorize(
    components: &ComponentScores,
    results: &[HeuristicResult],
    level: RiskLevel,
) -> RiskCategory {
    let primary = primary_risk(components, results);
    RiskCategory {
        primary,
        description: describe(primary, level).to_string(),
        affected_areas: affected_areas(primary)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn result(rule: RuleId, triggered: bool) -> HeuristicResult {
        HeuristicResult {
            rule,
            name: rule.to_string(),
            severity: Severity::Medium,
            triggered,
            impact: 0.1,
            evidence: String::new(),
        }
    }

    fn healthy() -> ComponentScores {
        ComponentScores {
            cfp_credibility: 0.9,
            website_credibility: 0.9,
            indexing_credibility: 0.9,
            contact_legitimacy: 0.9,
            org_structure: 0.9,
            pub_history: 0.9,
        }
    }

    #[test]
    fn test_fee_prominence_means_financial() {
        let results = [result(RuleId::FeeProminence, true)];
        let mut components = healthy();
        components.indexing_credibility = 0.1;
        assert_eq!(primary_risk(&components, &results), RiskType::Financial);
    }

    #[test]
    fn test_weak_indexing_means_reputational() {
        let mut components = healthy();
        components.indexing_credibility = 0.2;
        let results = [result(RuleId::FeeProminence, false)];
        assert_eq!(primary_risk(&components, &results), RiskType::Reputational);
    }

    #[test]
    fn test_fast_turnaround_means_time() {
        let results = [result(RuleId::PublicationSpeed, true)];
        assert_eq!(primary_risk(&healthy(), &results), RiskType::Time);

        let mut components = healthy();
        components.cfp_credibility = 0.2;
        assert_eq!(primary_risk(&components, &[]), RiskType::Time);
    }

    #[test]
    fn test_default_is_reputational() {
        let category = categorize(&healthy(), &[], RiskLevel::Low);
        assert_eq!(category.primary, RiskType::Reputational);
        assert_eq!(category.affected_areas.len(), 3);
        assert!(category.description.starts_with("Minimal reputational risk"));
    }

    #[test]
    fn test_every_type_and_level_is_described() {
        for risk_type in [RiskType::Financial, RiskType::Reputational, RiskType::Time] {
            for level in RiskLevel::ALL {
                assert!(!describe(risk_type, level).is_empty());
            }
        }
        assert_eq!(
            describe(RiskType::Time, RiskLevel::Critical),
            "Critical time risk, likely to waste substantial time"
        );
    }
}
