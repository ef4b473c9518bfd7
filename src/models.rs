//! Core data models for Credence
//!
//! These models are shared by every stage of the pipeline: the normalized
//! venue signal supplied by parsing/scraping collaborators, heuristic
//! outcomes, and the final credibility assessment consumed by reporters.

use crate::errors::{ensure_finite, CredenceError, CredenceResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clamp a score into the unit interval.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Neutral value substituted for any absent optional score
pub const NEUTRAL_SCORE: f64 = 0.5;

fn neutral_score() -> f64 {
    NEUTRAL_SCORE
}

/// Kind of academic venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    #[default]
    Conference,
    Journal,
}

impl std::fmt::Display for VenueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenueType::Conference => write!(f, "conference"),
            VenueType::Journal => write!(f, "journal"),
        }
    }
}

/// Suspicious-phrase counts found in the call for papers, split by pattern family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhraseCounts {
    /// "guaranteed acceptance", "100% acceptance" and similar
    #[serde(default)]
    pub acceptance_guarantee: u32,
    /// Prominent fee / payment wording
    #[serde(default)]
    pub fee_emphasis: u32,
    /// Any other suspicious phrasing
    #[serde(default)]
    pub other: u32,
}

impl PhraseCounts {
    pub fn total(&self) -> u32 {
        self.acceptance_guarantee + self.fee_emphasis + self.other
    }
}

/// Signals extracted from the call for papers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CfpSignals {
    #[serde(default)]
    pub syntax_score: f64,
    #[serde(default)]
    pub professionalism_score: f64,
    #[serde(default)]
    pub language_quality: f64,
    #[serde(default)]
    pub urgency_count: u32,
    #[serde(default)]
    pub suspicious: PhraseCounts,
    /// Claimed submission-to-publication turnaround, if the CFP states one
    #[serde(default)]
    pub claimed_turnaround_days: Option<u32>,
}

impl CfpSignals {
    /// CFP credibility: mean of the three linguistic quality scores
    pub fn credibility(&self) -> f64 {
        clamp_unit(
            (clamp_unit(self.syntax_score)
                + clamp_unit(self.professionalism_score)
                + clamp_unit(self.language_quality))
                / 3.0,
        )
    }
}

/// Signals supplied by the scraping collaborator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WebsiteSignals {
    #[serde(default)]
    pub has_tls: bool,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub structural_completeness: f64,
}

/// Normalized per-venue input. Immutable once handed to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSignal {
    pub venue_id: String,
    #[serde(default)]
    pub venue_name: String,
    #[serde(default)]
    pub venue_type: VenueType,
    #[serde(default)]
    pub cfp: Option<CfpSignals>,
    #[serde(default)]
    pub website: Option<WebsiteSignals>,
    #[serde(default = "neutral_score")]
    pub contact_legitimacy: f64,
    #[serde(default = "neutral_score")]
    pub website_credibility: f64,
    #[serde(default = "neutral_score")]
    pub indexing_credibility: f64,
    #[serde(default = "neutral_score")]
    pub org_structure: f64,
    #[serde(default = "neutral_score")]
    pub pub_history: f64,
    #[serde(default)]
    pub claimed_indexers: Vec<String>,
    #[serde(default)]
    pub organizers: Vec<String>,
}

impl VenueSignal {
    /// Create a signal with neutral scores and no optional data
    pub fn new(venue_id: impl Into<String>, venue_name: impl Into<String>) -> Self {
        Self {
            venue_id: venue_id.into(),
            venue_name: venue_name.into(),
            venue_type: VenueType::default(),
            cfp: None,
            website: None,
            contact_legitimacy: NEUTRAL_SCORE,
            website_credibility: NEUTRAL_SCORE,
            indexing_credibility: NEUTRAL_SCORE,
            org_structure: NEUTRAL_SCORE,
            pub_history: NEUTRAL_SCORE,
            claimed_indexers: Vec::new(),
            organizers: Vec::new(),
        }
    }

    pub fn with_cfp(mut self, cfp: CfpSignals) -> Self {
        self.cfp = Some(cfp);
        self
    }

    pub fn with_website(mut self, website: WebsiteSignals) -> Self {
        self.website = Some(website);
        self
    }

    /// Reject malformed input: empty venue id or non-finite numbers.
    pub fn validate(&self) -> CredenceResult<()> {
        if self.venue_id.trim().is_empty() {
            return Err(CredenceError::validation("venue id must not be empty"));
        }

        ensure_finite("contact_legitimacy", self.contact_legitimacy)?;
        ensure_finite("website_credibility", self.website_credibility)?;
        ensure_finite("indexing_credibility", self.indexing_credibility)?;
        ensure_finite("org_structure", self.org_structure)?;
        ensure_finite("pub_history", self.pub_history)?;

        if let Some(cfp) = &self.cfp {
            ensure_finite("cfp.syntax_score", cfp.syntax_score)?;
            ensure_finite("cfp.professionalism_score", cfp.professionalism_score)?;
            ensure_finite("cfp.language_quality", cfp.language_quality)?;
        }
        if let Some(website) = &self.website {
            ensure_finite(
                "website.structural_completeness",
                website.structural_completeness,
            )?;
        }
        Ok(())
    }
}

/// Severity tier of a heuristic rule
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// High and critical rules raise a flag when triggered
    pub fn is_flagged(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Categorical risk level of an assessment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Identifier of a heuristic rule, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    AcceptanceGuarantee,
    UrgencyIndicators,
    WebsiteQuality,
    IndexingClaims,
    ContactLegitimacy,
    FeeProminence,
    PublicationSpeed,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::AcceptanceGuarantee => "acceptance_guarantee",
            RuleId::UrgencyIndicators => "urgency_indicators",
            RuleId::WebsiteQuality => "website_quality",
            RuleId::IndexingClaims => "indexing_claims",
            RuleId::ContactLegitimacy => "contact_legitimacy",
            RuleId::FeeProminence => "fee_prominence",
            RuleId::PublicationSpeed => "publication_speed",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one heuristic rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicResult {
    pub rule: RuleId,
    pub name: String,
    pub severity: Severity,
    pub triggered: bool,
    /// Penalty magnitude declared by the rule
    pub impact: f64,
    /// Machine-readable evidence, e.g. `urgency_count=5>3`
    pub evidence: String,
}

impl HeuristicResult {
    /// Penalty actually applied: the declared impact when triggered, else
    /// zero. Never negative.
    pub fn applied_impact(&self) -> f64 {
        if self.triggered {
            self.impact.max(0.0)
        } else {
            0.0
        }
    }
}

/// The six weighted sub-scores feeding the component score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    pub cfp_credibility: f64,
    pub website_credibility: f64,
    pub indexing_credibility: f64,
    pub contact_legitimacy: f64,
    pub org_structure: f64,
    pub pub_history: f64,
}

/// Complete score breakdown for transparency
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: ComponentScores,
    /// Weighted sum of the six components
    pub component_score: f64,
    /// 1 minus the triggered heuristic impacts, clamped
    pub heuristic_score: f64,
    /// Unclamped citation risk as reported by the analyzer
    pub citation_risk: f64,
    /// Citation risk clamped to [0, 1] before combination
    pub normalized_citation_risk: f64,
    /// (1 - overall) + normalized citation risk, clamped
    pub risk_score: f64,
}

/// What raised a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "rule")]
pub enum FlagKind {
    CfpCredibility,
    IndexingCredibility,
    ContactLegitimacy,
    WebsiteCredibility,
    Heuristic(RuleId),
    CitationRisk,
}

/// Human-facing warning attached to an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub kind: FlagKind,
    pub severity: Severity,
    pub message: String,
}

/// Primary kind of harm a risky venue poses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskType {
    Financial,
    Reputational,
    Time,
}

impl std::fmt::Display for RiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskType::Financial => write!(f, "financial"),
            RiskType::Reputational => write!(f, "reputational"),
            RiskType::Time => write!(f, "time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCategory {
    pub primary: RiskType,
    /// Short description of the primary risk at the assessed level
    pub description: String,
    pub affected_areas: Vec<String>,
}

/// Final credibility assessment of one venue. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityAssessment {
    pub venue_id: String,
    pub venue_name: String,
    pub fingerprint_hash: String,
    /// Overall credibility in [0, 1]; higher is more credible
    pub overall_credibility: f64,
    pub risk_level: RiskLevel,
    pub breakdown: ScoreBreakdown,
    /// In rule declaration order
    pub heuristic_results: Vec<HeuristicResult>,
    /// Input completeness, not accuracy
    pub confidence: f64,
    pub flags: Vec<Flag>,
    pub recommendations: Vec<String>,
    pub risk_category: RiskCategory,
    pub assessed_at: DateTime<Utc>,
}

impl CredibilityAssessment {
    pub fn triggered_count(&self) -> usize {
        self.heuristic_results.iter().filter(|r| r.triggered).count()
    }
}
