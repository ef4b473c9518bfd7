//! Venue comparison and ranking

use crate::models::{CredibilityAssessment, RiskLevel};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Most venues listed as recommended
const MAX_RECOMMENDED: usize = 5;

/// One venue's position in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVenue {
    /// 1-based
    pub rank: usize,
    pub venue_id: String,
    pub venue_name: String,
    pub overall_credibility: f64,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

/// Summary over a set of assessments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueComparison {
    pub total_venues: usize,
    pub average_credibility: f64,
    pub average_risk: f64,
    /// Every level is present, zero counts included
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
    pub best: RankedVenue,
    pub worst: RankedVenue,
    /// Low and medium risk venues, best first
    pub recommended: Vec<RankedVenue>,
    /// Descending credibility; ties broken by venue id
    pub ranking: Vec<RankedVenue>,
}

fn by_credibility(a: &CredibilityAssessment, b: &CredibilityAssessment) -> Ordering {
    b.overall_credibility
        .total_cmp(&a.overall_credibility)
        .then_with(|| a.venue_id.cmp(&b.venue_id))
}

/// Rank and summarize assessments. `None` for an empty slice.
pub fn compare(assessments: &[CredibilityAssessment]) -> Option<VenueComparison> {
    if assessments.is_empty() {
        return None;
    }

    let mut sorted: Vec<&CredibilityAssessment> = assessments.iter().collect();
    sorted.sort_by(|a, b| by_credibility(a, b));

    let ranking: Vec<RankedVenue> = sorted
        .iter()
        .enumerate()
        .map(|(i, a)| RankedVenue {
            rank: i + 1,
            venue_id: a.venue_id.clone(),
            venue_name: a.venue_name.clone(),
            overall_credibility: a.overall_credibility,
            risk_score: a.breakdown.risk_score,
            risk_level: a.risk_level,
        })
        .collect();

    let n = assessments.len() as f64;
    let average_credibility = assessments.iter().map(|a| a.overall_credibility).sum::<f64>() / n;
    let average_risk = assessments.iter().map(|a| a.breakdown.risk_score).sum::<f64>() / n;

    let mut risk_distribution: BTreeMap<RiskLevel, usize> =
        RiskLevel::ALL.iter().map(|&level| (level, 0)).collect();
    for a in assessments {
        *risk_distribution.entry(a.risk_level).or_insert(0) += 1;
    }

    let recommended = ranking
        .iter()
        .filter(|v| v.risk_level <= RiskLevel::Medium)
        .take(MAX_RECOMMENDED)
        .cloned()
        .collect();

    let best = ranking.first()?.clone();
    let worst = ranking.last()?.clone();

    Some(VenueComparison {
        total_venues: assessments.len(),
        average_credibility,
        average_risk,
        risk_distribution,
        best,
        worst,
        recommended,
        ranking,
    })
}
