//! Canonical heuristic rule set, in declaration order
//!
//! | Rule | Severity | Impact |
//! |---|---|---|
//! | Acceptance-rate guarantee | critical | 0.30 |
//! | Urgency indicators | medium | 0.15 |
//! | Website quality | high | 0.20 |
//! | Indexing claims | high | 0.25 |
//! | Contact legitimacy | medium | 0.15 |
//! | Fee prominence | medium | 0.10 |
//! | Publication speed | low | 0.10 |

use super::base::{HeuristicRule, RuleContext, RuleOutcome};
use crate::models::{clamp_unit, RuleId, Severity};

pub static RULES: [HeuristicRule; 7] = [
    HeuristicRule {
        id: RuleId::AcceptanceGuarantee,
        name: "Acceptance-rate guarantee",
        severity: Severity::Critical,
        impact: 0.30,
        advisory: "Legitimate venues never guarantee acceptance. Do not submit until the \
                   peer-review process is independently confirmed.",
        condition: acceptance_guarantee,
    },
    HeuristicRule {
        id: RuleId::UrgencyIndicators,
        name: "Urgency indicators",
        severity: Severity::Medium,
        impact: 0.15,
        advisory: "The call for papers applies unusual deadline pressure. Take time to \
                   verify the venue before committing.",
        condition: urgency_indicators,
    },
    HeuristicRule {
        id: RuleId::WebsiteQuality,
        name: "Website quality",
        severity: Severity::High,
        impact: 0.20,
        advisory: "The venue website is incomplete or not served over HTTPS. Check for \
                   committee, submission and contact pages before submitting.",
        condition: website_quality,
    },
    HeuristicRule {
        id: RuleId::IndexingClaims,
        name: "Indexing claims",
        severity: Severity::High,
        impact: 0.25,
        advisory: "Some claimed indexers are not recognised. Verify indexing status \
                   directly with each database.",
        condition: indexing_claims,
    },
    HeuristicRule {
        id: RuleId::ContactLegitimacy,
        name: "Contact legitimacy",
        severity: Severity::Medium,
        impact: 0.15,
        advisory: "Contact details look unreliable. Confirm the organisers through their \
                   institutional addresses.",
        condition: contact_legitimacy,
    },
    HeuristicRule {
        id: RuleId::FeeProminence,
        name: "Fee prominence",
        severity: Severity::Medium,
        impact: 0.10,
        advisory: "Fees are emphasised over scholarship. Compare charges with established \
                   venues in the field.",
        condition: fee_prominence,
    },
    HeuristicRule {
        id: RuleId::PublicationSpeed,
        name: "Publication speed",
        severity: Severity::Low,
        impact: 0.10,
        advisory: "The promised turnaround is too short for real peer review.",
        condition: publication_speed,
    },
];

/// Look up the descriptor of a rule
pub fn rule(id: RuleId) -> &'static HeuristicRule {
    // RULES is declared in RuleId order
    &RULES[id as usize]
}

fn acceptance_guarantee(ctx: &RuleContext<'_>) -> RuleOutcome {
    match &ctx.signal.cfp {
        None => RuleOutcome::passed("cfp=absent"),
        Some(cfp) => {
            let count = cfp.suspicious.acceptance_guarantee;
            let evidence = format!("acceptance_guarantee_phrases={count}");
            if count > 0 {
                RuleOutcome::triggered(evidence)
            } else {
                RuleOutcome::passed(evidence)
            }
        }
    }
}

fn urgency_indicators(ctx: &RuleContext<'_>) -> RuleOutcome {
    let threshold = ctx.config.urgency_threshold;
    match &ctx.signal.cfp {
        None => RuleOutcome::passed("cfp=absent"),
        Some(cfp) if cfp.urgency_count > threshold => {
            RuleOutcome::triggered(format!("urgency_count={}>{}", cfp.urgency_count, threshold))
        }
        Some(cfp) => {
            RuleOutcome::passed(format!("urgency_count={}<={}", cfp.urgency_count, threshold))
        }
    }
}

fn website_quality(ctx: &RuleContext<'_>) -> RuleOutcome {
    let min_completeness = ctx.config.min_structural_completeness;
    let Some(website) = &ctx.signal.website else {
        return RuleOutcome::triggered("website=absent");
    };

    let completeness = clamp_unit(website.structural_completeness);
    let incomplete = completeness < min_completeness;
    let evidence = format!(
        "tls={},completeness={:.2}{}{:.2}",
        website.has_tls,
        completeness,
        if incomplete { "<" } else { ">=" },
        min_completeness
    );

    if !website.has_tls || incomplete {
        RuleOutcome::triggered(evidence)
    } else {
        RuleOutcome::passed(evidence)
    }
}

fn indexing_claims(ctx: &RuleContext<'_>) -> RuleOutcome {
    let claims: Vec<&str> = ctx
        .signal
        .claimed_indexers
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if claims.is_empty() {
        return RuleOutcome::passed("claimed=0");
    }

    let mut unverified: Vec<&str> = claims
        .iter()
        .copied()
        .filter(|name| !ctx.known_indexers.is_known(name))
        .collect();
    unverified.sort_unstable();
    unverified.dedup();

    if unverified.is_empty() {
        RuleOutcome::passed(format!("claimed={},unverified=0", claims.len()))
    } else {
        RuleOutcome::triggered(format!(
            "claimed={},unverified={}",
            claims.len(),
            unverified.join(";")
        ))
    }
}

fn contact_legitimacy(ctx: &RuleContext<'_>) -> RuleOutcome {
    let score = clamp_unit(ctx.signal.contact_legitimacy);
    let min = ctx.config.min_contact_legitimacy;
    if score < min {
        RuleOutcome::triggered(format!("contact_legitimacy={score:.2}<{min:.2}"))
    } else {
        RuleOutcome::passed(format!("contact_legitimacy={score:.2}>={min:.2}"))
    }
}

fn fee_prominence(ctx: &RuleContext<'_>) -> RuleOutcome {
    match &ctx.signal.cfp {
        None => RuleOutcome::passed("cfp=absent"),
        Some(cfp) => {
            let count = cfp.suspicious.fee_emphasis;
            let evidence = format!("fee_emphasis_phrases={count}");
            if count > 0 {
                RuleOutcome::triggered(evidence)
            } else {
                RuleOutcome::passed(evidence)
            }
        }
    }
}

fn publication_speed(ctx: &RuleContext<'_>) -> RuleOutcome {
    let min_days = ctx.config.min_turnaround_days;
    match ctx.signal.cfp.as_ref().and_then(|c| c.claimed_turnaround_days) {
        None => RuleOutcome::passed("turnaround=unstated"),
        Some(days) if days < min_days => {
            RuleOutcome::triggered(format!("turnaround_days={days}<{min_days}"))
        }
        Some(days) => RuleOutcome::passed(format!("turnaround_days={days}>={min_days}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicConfig;
    use crate::fingerprint::KnownIndexers;
    use crate::models::{CfpSignals, PhraseCounts, VenueSignal, WebsiteSignals};

    fn run(id: RuleId, signal: &VenueSignal) -> RuleOutcome {
        let config = HeuristicConfig::default();
        let known = KnownIndexers::default();
        let ctx = RuleContext {
            signal,
            config: &config,
            known_indexers: &known,
        };
        (rule(id).condition)(&ctx)
    }

    fn with_cfp(cfp: CfpSignals) -> VenueSignal {
        VenueSignal::new("v", "Venue").with_cfp(cfp)
    }

    #[test]
    fn test_rule_table_is_in_declaration_order() {
        for (i, r) in RULES.iter().enumerate() {
            assert_eq!(r.id as usize, i);
            assert_eq!(rule(r.id).id, r.id);
        }
    }

    #[test]
    fn test_canonical_weights_and_severities() {
        let expected = [
            (Severity::Critical, 0.30),
            (Severity::Medium, 0.15),
            (Severity::High, 0.20),
            (Severity::High, 0.25),
            (Severity::Medium, 0.15),
            (Severity::Medium, 0.10),
            (Severity::Low, 0.10),
        ];
        for (r, (severity, impact)) in RULES.iter().zip(expected) {
            assert_eq!(r.severity, severity, "{}", r.name);
            assert!((r.impact - impact).abs() < 1e-12, "{}", r.name);
        }
        let total: f64 = RULES.iter().map(|r| r.impact).sum();
        assert!(total > 1.0);
    }

    #[test]
    fn test_acceptance_guarantee() {
        let signal = with_cfp(CfpSignals {
            suspicious: PhraseCounts {
                acceptance_guarantee: 1,
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(run(RuleId::AcceptanceGuarantee, &signal).triggered);
        assert!(!run(RuleId::AcceptanceGuarantee, &with_cfp(CfpSignals::default())).triggered);
    }

    #[test]
    fn test_urgency_threshold_is_exclusive() {
        let at = with_cfp(CfpSignals {
            urgency_count: 3,
            ..Default::default()
        });
        let above = with_cfp(CfpSignals {
            urgency_count: 4,
            ..Default::default()
        });
        assert!(!run(RuleId::UrgencyIndicators, &at).triggered);
        let outcome = run(RuleId::UrgencyIndicators, &above);
        assert!(outcome.triggered);
        assert_eq!(outcome.evidence, "urgency_count=4>3");
    }

    #[test]
    fn test_website_quality() {
        let good = VenueSignal::new("v", "V").with_website(WebsiteSignals {
            has_tls: true,
            page_count: 8,
            structural_completeness: 0.8,
        });
        assert!(!run(RuleId::WebsiteQuality, &good).triggered);

        let no_tls = VenueSignal::new("v", "V").with_website(WebsiteSignals {
            has_tls: false,
            page_count: 8,
            structural_completeness: 0.8,
        });
        assert!(run(RuleId::WebsiteQuality, &no_tls).triggered);

        let sparse = VenueSignal::new("v", "V").with_website(WebsiteSignals {
            has_tls: true,
            page_count: 2,
            structural_completeness: 0.2,
        });
        assert!(run(RuleId::WebsiteQuality, &sparse).triggered);

        let absent = VenueSignal::new("v", "V");
        assert_eq!(
            run(RuleId::WebsiteQuality, &absent),
            RuleOutcome::triggered("website=absent")
        );
    }

    #[test]
    fn test_indexing_claims() {
        let mut signal = VenueSignal::new("v", "V");
        assert!(!run(RuleId::IndexingClaims, &signal).triggered);

        signal.claimed_indexers = vec!["Scopus".into(), "dblp".into()];
        assert!(!run(RuleId::IndexingClaims, &signal).triggered);

        signal.claimed_indexers.push("Global Impact Factor".into());
        let outcome = run(RuleId::IndexingClaims, &signal);
        assert!(outcome.triggered);
        assert_eq!(outcome.evidence, "claimed=3,unverified=Global Impact Factor");
    }

    #[test]
    fn test_contact_legitimacy() {
        let mut signal = VenueSignal::new("v", "V");
        signal.contact_legitimacy = 0.39;
        assert!(run(RuleId::ContactLegitimacy, &signal).triggered);
        signal.contact_legitimacy = 0.4;
        assert!(!run(RuleId::ContactLegitimacy, &signal).triggered);
    }

    #[test]
    fn test_fee_prominence() {
        let signal = with_cfp(CfpSignals {
            suspicious: PhraseCounts {
                fee_emphasis: 2,
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(run(RuleId::FeeProminence, &signal).triggered);
        assert!(!run(RuleId::FeeProminence, &VenueSignal::new("v", "V")).triggered);
    }

    #[test]
    fn test_publication_speed() {
        let fast = with_cfp(CfpSignals {
            claimed_turnaround_days: Some(3),
            ..Default::default()
        });
        let normal = with_cfp(CfpSignals {
            claimed_turnaround_days: Some(90),
            ..Default::default()
        });
        assert!(run(RuleId::PublicationSpeed, &fast).triggered);
        assert!(!run(RuleId::PublicationSpeed, &normal).triggered);
        assert!(!run(RuleId::PublicationSpeed, &with_cfp(CfpSignals::default())).triggered);
    }
}
