//! Venue fingerprint builder
//!
//! Derives a stable identity for a venue from its normalized signal. Both
//! digests are pure functions of their declared inputs:
//!
//! ```text
//! syntax_signature = MD5("syn:{syntax:.2}|pro:{professionalism:.2}|urg:{urgency}|sus:{suspicious}")
//! fingerprint_hash = SHA-256(venue_id | syntax_signature | depth:.2 | sorted indexers | sorted organizers)
//! ```
//!
//! Rounding to two decimals makes near-identical venues collide on purpose.
//! Sorting indexers and organizers makes the hash independent of input order.

use super::indexers::{IndexerTier, KnownIndexers};
use super::registry::OrganizerRegistry;
use crate::errors::{ensure_finite, CredenceError, CredenceResult};
use crate::models::{clamp_unit, CfpSignals, VenueSignal, VenueType, NEUTRAL_SCORE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Separator between list entries inside the fingerprint input
const LIST_SEPARATOR: &str = "-";

/// Derived identity record of a venue.
///
/// Two fingerprints are equal when their hashes are equal; the generation
/// timestamp and derived extras do not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueFingerprint {
    pub venue_id: String,
    pub venue_name: String,
    pub venue_type: VenueType,
    pub syntax_signature: String,
    pub website_depth: f64,
    pub structural_completeness: f64,
    pub organizer_recurrence: f64,
    /// Sorted, deduplicated
    pub claimed_indexers: Vec<String>,
    pub indexer_tiers: BTreeMap<String, IndexerTier>,
    /// Sorted, deduplicated
    pub organizers: Vec<String>,
    pub suspicious_patterns: Vec<String>,
    pub positive_signals: Vec<String>,
    /// Share of optional inputs that were present
    pub confidence: f64,
    pub fingerprint_hash: String,
    pub generated_at: DateTime<Utc>,
}

impl VenueFingerprint {
    /// Fingerprint equality is the domain's notion of "same venue"
    pub fn same_venue(&self, other: &VenueFingerprint) -> bool {
        self.fingerprint_hash == other.fingerprint_hash
    }

    pub fn unrecognized_indexers(&self) -> impl Iterator<Item = &str> {
        self.indexer_tiers
            .iter()
            .filter(|(_, tier)| !tier.is_known())
            .map(|(name, _)| name.as_str())
    }
}

impl PartialEq for VenueFingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.same_venue(other)
    }
}

impl Eq for VenueFingerprint {}

impl std::hash::Hash for VenueFingerprint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.fingerprint_hash.hash(state);
    }
}

/// Canonical unit value: clamped, with -0.0 folded into 0.0
fn canonical_unit(value: f64) -> f64 {
    clamp_unit(value) + 0.0
}

/// 128-bit digest over the rounded CFP syntax characteristics
pub fn syntax_signature(cfp: &CfpSignals) -> String {
    let input = format!(
        "syn:{:.2}|pro:{:.2}|urg:{}|sus:{}",
        canonical_unit(cfp.syntax_score),
        canonical_unit(cfp.professionalism_score),
        cfp.urgency_count,
        cfp.suspicious.total()
    );
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// Trim, drop empties, sort lexicographically and deduplicate
fn canonical_list(items: &[String]) -> Vec<String> {
    let mut list: Vec<String> = items
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    list.sort();
    list.dedup();
    list
}

/// 256-bit digest over the venue identity inputs.
///
/// `indexers` and `organizers` are canonicalized here, so callers may pass them
/// in any order.
pub fn fingerprint_hash(
    venue_id: &str,
    syntax_signature: &str,
    website_depth: f64,
    indexers: &[String],
    organizers: &[String],
) -> String {
    let components = [
        venue_id.to_string(),
        syntax_signature.to_string(),
        format!("{:.2}", canonical_unit(website_depth)),
        canonical_list(indexers).join(LIST_SEPARATOR),
        canonical_list(organizers).join(LIST_SEPARATOR),
    ];

    let mut hasher = Sha256::new();
    hasher.update(components.join("|").as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Stable venue id for collaborators that only know the name and type
pub fn derive_venue_id(venue_name: &str, venue_type: VenueType) -> String {
    let normalized = format!("{}:{}", venue_type, venue_name.trim().to_lowercase());
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

/// Builds venue fingerprints
#[derive(Debug, Clone, Default)]
pub struct FingerprintBuilder {
    registry: Option<Arc<OrganizerRegistry>>,
    known_indexers: KnownIndexers,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a historical organizer reference set for the recurrence score
    pub fn with_registry(mut self, registry: Arc<OrganizerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_known_indexers(mut self, known: KnownIndexers) -> Self {
        self.known_indexers = known;
        self
    }

    pub fn known_indexers(&self) -> &KnownIndexers {
        &self.known_indexers
    }

    /// Build a fingerprint for `signal`.
    ///
    /// # Errors
    /// - `Validation` if the venue id is empty or any numeric input is not finite
    pub fn build(
        &self,
        signal: &VenueSignal,
        website_depth: f64,
    ) -> CredenceResult<VenueFingerprint> {
        if signal.venue_id.trim().is_empty() {
            return Err(CredenceError::validation(
                "cannot fingerprint a venue without an id",
            ));
        }
        signal.validate()?;
        let website_depth = canonical_unit(ensure_finite("website_depth", website_depth)?);

        let cfp = signal.cfp.clone().unwrap_or_default();
        let syntax_signature = syntax_signature(&cfp);

        let claimed_indexers = canonical_list(&signal.claimed_indexers);
        let organizers = canonical_list(&signal.organizers);

        let fingerprint_hash = fingerprint_hash(
            &signal.venue_id,
            &syntax_signature,
            website_depth,
            &claimed_indexers,
            &organizers,
        );

        let indexer_tiers: BTreeMap<String, IndexerTier> = claimed_indexers
            .iter()
            .map(|name| (name.clone(), self.known_indexers.classify(name)))
            .collect();

        let structural_completeness = signal
            .website
            .as_ref()
            .map(|w| canonical_unit(w.structural_completeness))
            .unwrap_or(0.0);

        let organizer_recurrence = self.organizer_recurrence(&organizers);

        let fingerprint = VenueFingerprint {
            venue_id: signal.venue_id.clone(),
            venue_name: signal.venue_name.clone(),
            venue_type: signal.venue_type,
            suspicious_patterns: suspicious_patterns(signal, &indexer_tiers),
            positive_signals: positive_signals(
                signal,
                organizer_recurrence,
                self.registry.is_some(),
            ),
            confidence: fingerprint_confidence(signal),
            syntax_signature,
            website_depth,
            structural_completeness,
            organizer_recurrence,
            claimed_indexers,
            indexer_tiers,
            organizers,
            fingerprint_hash,
            generated_at: Utc::now(),
        };

        debug!(
            "Fingerprint {} for venue {} (syntax {})",
            &fingerprint.fingerprint_hash[..16],
            fingerprint.venue_id,
            fingerprint.syntax_signature
        );

        Ok(fingerprint)
    }

    /// Fraction of organizers found in the reference set; neutral without one
    fn organizer_recurrence(&self, organizers: &[String]) -> f64 {
        match &self.registry {
            Some(registry) if !registry.is_empty() && !organizers.is_empty() => {
                let recurring = organizers.iter().filter(|o| registry.contains(o)).count();
                clamp_unit(recurring as f64 / organizers.len() as f64)
            }
            _ => NEUTRAL_SCORE,
        }
    }
}

fn suspicious_patterns(
    signal: &VenueSignal,
    indexer_tiers: &BTreeMap<String, IndexerTier>,
) -> Vec<String> {
    let mut patterns = Vec::new();

    if let Some(cfp) = &signal.cfp {
        if cfp.suspicious.acceptance_guarantee > 0 {
            patterns.push(format!(
                "acceptance_guarantee_phrases:{}",
                cfp.suspicious.acceptance_guarantee
            ));
        }
        if cfp.suspicious.fee_emphasis > 0 {
            patterns.push(format!("fee_emphasis_phrases:{}", cfp.suspicious.fee_emphasis));
        }
        if cfp.suspicious.other > 0 {
            patterns.push(format!("other_suspicious_phrases:{}", cfp.suspicious.other));
        }
    }

    if let Some(website) = &signal.website {
        if !website.has_tls {
            patterns.push("no_tls".to_string());
        }
    }

    for (name, tier) in indexer_tiers {
        if !tier.is_known() {
            patterns.push(format!("unrecognized_indexer:{name}"));
        }
    }

    patterns
}

fn positive_signals(signal: &VenueSignal, recurrence: f64, has_registry: bool) -> Vec<String> {
    let mut signals = Vec::new();

    if let Some(cfp) = &signal.cfp {
        if cfp.professionalism_score > 0.7 {
            signals.push("high_professionalism".to_string());
        }
    }
    if signal.contact_legitimacy > 0.7 {
        signals.push("legitimate_contact".to_string());
    }
    if let Some(website) = &signal.website {
        if website.has_tls {
            signals.push("tls_enabled".to_string());
        }
        if website.page_count > 5 {
            signals.push("comprehensive_website".to_string());
        }
    }
    if has_registry && recurrence > NEUTRAL_SCORE {
        signals.push("recurring_organizers".to_string());
    }

    signals
}

fn fingerprint_confidence(signal: &VenueSignal) -> f64 {
    let mut confidence = 0.0;
    if signal.cfp.is_some() {
        confidence += 0.4;
    }
    if signal.website.is_some() {
        confidence += 0.4;
    }
    if !signal.organizers.is_empty() {
        confidence += 0.2;
    }
    clamp_unit(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::{PhraseCounts, WebsiteSignals};

    fn sample_signal() -> VenueSignal {
        let mut signal = VenueSignal::new("icml-2026", "Intl. Conference on Machine Learning")
            .with_cfp(CfpSignals {
                syntax_score: 0.91,
                professionalism_score: 0.88,
                language_quality: 0.9,
                urgency_count: 1,
                suspicious: PhraseCounts::default(),
                claimed_turnaround_days: None,
            })
            .with_website(WebsiteSignals {
                has_tls: true,
                page_count: 12,
                structural_completeness: 0.9,
            });
        signal.claimed_indexers = vec![
            "DBLP".into(),
            "Scopus".into(),
            "ACM Digital Library".into(),
        ];
        signal.organizers = vec!["Grace Hopper".into(), "Ada Lovelace".into()];
        signal
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = FingerprintBuilder::new();
        let a = builder.build(&sample_signal(), 0.7).unwrap();
        let b = builder.build(&sample_signal(), 0.7).unwrap();
        assert_eq!(a.fingerprint_hash, b.fingerprint_hash);
        assert_eq!(a.syntax_signature, b.syntax_signature);
        assert_eq!(a, b);
        assert_eq!(a.fingerprint_hash.len(), 64);
        assert_eq!(a.syntax_signature.len(), 32);
    }

    #[test]
    fn test_order_independence() {
        let builder = FingerprintBuilder::new();
        let original = builder.build(&sample_signal(), 0.7).unwrap();

        let mut permuted = sample_signal();
        permuted.claimed_indexers.reverse();
        permuted.organizers.reverse();
        let permuted = builder.build(&permuted, 0.7).unwrap();

        assert_eq!(original.fingerprint_hash, permuted.fingerprint_hash);
    }

    #[test]
    fn test_rounding_collapses_cosmetic_differences() {
        let a = CfpSignals {
            syntax_score: 0.801,
            professionalism_score: 0.6,
            ..Default::default()
        };
        let b = CfpSignals {
            syntax_score: 0.804,
            professionalism_score: 0.6,
            ..Default::default()
        };
        let c = CfpSignals {
            syntax_score: 0.82,
            professionalism_score: 0.6,
            ..Default::default()
        };
        assert_eq!(syntax_signature(&a), syntax_signature(&b));
        assert_ne!(syntax_signature(&a), syntax_signature(&c));
    }

    #[test]
    fn test_syntax_signature_matches_documented_format() {
        let cfp = CfpSignals {
            syntax_score: 0.5,
            professionalism_score: 0.25,
            urgency_count: 2,
            suspicious: PhraseCounts {
                acceptance_guarantee: 1,
                fee_emphasis: 1,
                other: 1,
            },
            ..Default::default()
        };
        let expected = format!("{:x}", md5::compute(b"syn:0.50|pro:0.25|urg:2|sus:3"));
        assert_eq!(syntax_signature(&cfp), expected);
    }

    #[test]
    fn test_hash_depends_on_every_input() {
        let base = fingerprint_hash("v", "sig", 0.5, &["A".to_string()], &["X".to_string()]);
        assert_ne!(base, fingerprint_hash("w", "sig", 0.5, &["A".to_string()], &["X".to_string()]));
        assert_ne!(base, fingerprint_hash("v", "sih", 0.5, &["A".to_string()], &["X".to_string()]));
        assert_ne!(base, fingerprint_hash("v", "sig", 0.6, &["A".to_string()], &["X".to_string()]));
        assert_ne!(base, fingerprint_hash("v", "sig", 0.5, &["B".to_string()], &["X".to_string()]));
        assert_ne!(base, fingerprint_hash("v", "sig", 0.5, &["A".to_string()], &["Y".to_string()]));
    }

    #[test]
    fn test_duplicate_and_blank_entries_do_not_change_identity() {
        let a = fingerprint_hash("v", "sig", 0.5, &["A".to_string(), "B".to_string()], &[]);
        let indexers = [
            "B".to_string(),
            " A ".to_string(),
            "A".to_string(),
            "".to_string(),
        ];
        let b = fingerprint_hash("v", "sig", 0.5, &indexers, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_venue_id_is_validation_error() {
        let builder = FingerprintBuilder::new();
        let signal = VenueSignal::new("", "No id");
        let err = builder.build(&signal, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_non_finite_depth_is_validation_error() {
        let builder = FingerprintBuilder::new();
        let err = builder.build(&sample_signal(), f64::NAN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let builder = FingerprintBuilder::new();
        let signal = VenueSignal::new("bare", "Bare Venue");
        let fp = builder.build(&signal, 0.0).unwrap();
        assert!(fp.claimed_indexers.is_empty());
        assert!(fp.organizers.is_empty());
        assert_eq!(fp.organizer_recurrence, NEUTRAL_SCORE);
        assert_eq!(fp.confidence, 0.0);
    }

    #[test]
    fn test_organizer_recurrence_uses_registry() {
        let registry = Arc::new(OrganizerRegistry::new(["grace hopper"]));
        let builder = FingerprintBuilder::new().with_registry(registry);
        let fp = builder.build(&sample_signal(), 0.7).unwrap();
        assert!((fp.organizer_recurrence - 0.5).abs() < 1e-9);

        let registry = Arc::new(OrganizerRegistry::new(["Grace Hopper", "Ada Lovelace"]));
        let builder = FingerprintBuilder::new().with_registry(registry);
        let fp = builder.build(&sample_signal(), 0.7).unwrap();
        assert_eq!(fp.organizer_recurrence, 1.0);
        assert!(fp.positive_signals.contains(&"recurring_organizers".to_string()));
    }

    #[test]
    fn test_unrecognized_indexers_are_reported() {
        let mut signal = sample_signal();
        signal.claimed_indexers.push("Global Impact Index".into());
        let fp = FingerprintBuilder::new().build(&signal, 0.7).unwrap();
        let unknown: Vec<&str> = fp.unrecognized_indexers().collect();
        assert_eq!(unknown, vec!["Global Impact Index"]);
        assert!(fp
            .suspicious_patterns
            .contains(&"unrecognized_indexer:Global Impact Index".to_string()));
    }

    #[test]
    fn test_depth_is_clamped_and_negative_zero_folded() {
        let builder = FingerprintBuilder::new();
        let a = builder.build(&sample_signal(), -0.0).unwrap();
        let b = builder.build(&sample_signal(), 0.0).unwrap();
        let c = builder.build(&sample_signal(), -3.0).unwrap();
        assert_eq!(a.fingerprint_hash, b.fingerprint_hash);
        assert_eq!(b.fingerprint_hash, c.fingerprint_hash);
        let d = builder.build(&sample_signal(), 7.0).unwrap();
        assert_eq!(d.website_depth, 1.0);
    }

    #[test]
    fn test_derive_venue_id() {
        let a = derive_venue_id("  NeurIPS ", VenueType::Conference);
        let b = derive_venue_id("neurips", VenueType::Conference);
        let c = derive_venue_id("neurips", VenueType::Journal);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }
}
