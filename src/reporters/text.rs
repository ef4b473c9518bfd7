//! Text (terminal) reporter with colors and formatting

use crate::batch::VenueComparison;
use crate::models::{CredibilityAssessment, RiskLevel, Severity};
use crate::pipeline::VenueReport;

/// Risk level colors (ANSI escape codes)
fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "\x1b[32m",      // Green
        RiskLevel::Medium => "\x1b[33m",   // Yellow
        RiskLevel::High => "\x1b[91m",     // Light red
        RiskLevel::Critical => "\x1b[31m", // Red
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m",
        Severity::High => "\x1b[91m",
        Severity::Medium => "\x1b[33m",
        Severity::Low => "\x1b[34m",
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RULE: &str = "──────────────────────────────────────";

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[C]",
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
    }
}

fn format_score(score: f64) -> String {
    let color = if score >= 0.75 {
        "\x1b[32m"
    } else if score >= 0.5 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{score:.2}{RESET}")
}

pub fn render_reports(reports: &[VenueReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&render_assessment(&report.assessment));
        if let Some(citation) = &report.citation {
            out.push_str(&format!(
                "{BOLD}CITATIONS{RESET} ({} works, {} citations)\n",
                citation.node_count, citation.edge_count
            ));
            out.push_str(&format!(
                "  Self-citation: {:.0}%  Clusters: {}  Reciprocal pairs: {}  Total risk: {:.2}\n\n",
                citation.self_citation_rate * 100.0,
                citation.clusters.len(),
                citation.reciprocal_pairs,
                citation.total_risk
            ));
        }
    }
    out
}

pub fn render_assessment(a: &CredibilityAssessment) -> String {
    let mut out = String::new();
    let level_c = risk_color(a.risk_level);

    out.push_str(&format!("\n{BOLD}{}{RESET} {DIM}({}){RESET}\n", a.venue_name, a.venue_id));
    out.push_str(&format!("{DIM}{RULE}{RESET}\n"));
    out.push_str(&format!(
        "Credibility: {}  Risk: {level_c}{BOLD}{}{RESET} ({:.2})  Confidence: {:.2}\n",
        format_score(a.overall_credibility),
        a.risk_level.to_string().to_uppercase(),
        a.breakdown.risk_score,
        a.confidence
    ));
    let short_hash: String = a.fingerprint_hash.chars().take(16).collect();
    out.push_str(&format!("{DIM}Fingerprint: {short_hash}{RESET}\n\n"));

    let c = &a.breakdown.components;
    out.push_str(&format!("{BOLD}SCORES{RESET}\n"));
    out.push_str(&format!(
        "  CFP: {}  Website: {}  Indexing: {}\n",
        format_score(c.cfp_credibility),
        format_score(c.website_credibility),
        format_score(c.indexing_credibility)
    ));
    out.push_str(&format!(
        "  Contact: {}  Organisation: {}  History: {}\n",
        format_score(c.contact_legitimacy),
        format_score(c.org_structure),
        format_score(c.pub_history)
    ));
    out.push_str(&format!(
        "  Component: {}  Heuristic: {}  Citation risk: {:.2}\n\n",
        format_score(a.breakdown.component_score),
        format_score(a.breakdown.heuristic_score),
        a.breakdown.citation_risk
    ));

    out.push_str(&format!(
        "{BOLD}HEURISTICS{RESET} ({} of {} triggered)\n",
        a.triggered_count(),
        a.heuristic_results.len()
    ));
    for r in a.heuristic_results.iter().filter(|r| r.triggered) {
        out.push_str(&format!(
            "  {}{}{RESET} {:<28} {DIM}-{:.2}  {}{RESET}\n",
            severity_color(r.severity),
            severity_tag(r.severity),
            r.name,
            r.impact,
            r.evidence
        ));
    }
    out.push('\n');

    if !a.flags.is_empty() {
        out.push_str(&format!("{BOLD}FLAGS{RESET}\n"));
        for flag in &a.flags {
            out.push_str(&format!(
                "  {}{}{RESET} {}\n",
                severity_color(flag.severity),
                severity_tag(flag.severity),
                flag.message
            ));
        }
        out.push('\n');
    }

    if !a.recommendations.is_empty() {
        out.push_str(&format!("{BOLD}RECOMMENDATIONS{RESET}\n"));
        for rec in &a.recommendations {
            out.push_str(&format!("  - {rec}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{BOLD}RISK{RESET} {}: {}\n  {DIM}Affects: {}{RESET}\n\n",
        a.risk_category.primary,
        a.risk_category.description,
        a.risk_category.affected_areas.join(", ")
    ));

    out
}

pub fn render_comparison(cmp: &VenueComparison) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Venue Comparison{RESET}\n"));
    out.push_str(&format!("{DIM}{RULE}{RESET}\n"));
    out.push_str(&format!(
        "Venues: {}  Avg credibility: {}  Avg risk: {:.2}\n",
        cmp.total_venues,
        format_score(cmp.average_credibility),
        cmp.average_risk
    ));

    let distribution: Vec<String> = cmp
        .risk_distribution
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(level, count)| format!("{}{} {}{RESET}", risk_color(*level), count, level))
        .collect();
    out.push_str(&format!("  {}\n\n", distribution.join(" | ")));

    out.push_str(&format!(
        "{DIM}  #   SCORE  RISK      VENUE{RESET}\n  {DIM}{RULE}{RESET}\n"
    ));
    for v in &cmp.ranking {
        out.push_str(&format!(
            "  {:<3} {}   {}{:<8}{RESET}  {} {DIM}({}){RESET}\n",
            v.rank,
            format_score(v.overall_credibility),
            risk_color(v.risk_level),
            v.risk_level.to_string(),
            v.venue_name,
            v.venue_id
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "Best: {BOLD}{}{RESET}  Worst: {BOLD}{}{RESET}\n",
        cmp.best.venue_id, cmp.worst.venue_id
    ));
    if cmp.recommended.is_empty() {
        out.push_str(&format!("{DIM}No low or medium risk venues{RESET}\n"));
    } else {
        let ids: Vec<&str> = cmp.recommended.iter().map(|v| v.venue_id.as_str()).collect();
        out.push_str(&format!("Recommended: {}\n", ids.join(", ")));
    }

    out
}
