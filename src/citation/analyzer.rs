//! Citation manipulation analysis
//!
//! Four risk components are computed over the citation graph:
//!
//! ```text
//! self_citation_penalty  0.30 if rate > 0.3, 0.15 if rate > 0.2, else 0
//! clustering_risk        share of edges inside dense mutual-citation groups
//! pattern_risk           share of edges held by the most repeated identity
//!                        pairs, counted only above the configured threshold
//! diversity_risk         1 - distinct cited works / edges
//! total_risk             sum of the four (not clamped)
//! ```
//!
//! The total is left unclamped so callers can see how far past the ceiling a
//! venue is; the scoring engine clamps it before combining.

use super::graph::{CitationGraph, CitationInput, UNKNOWN_ATTRIBUTE};
use crate::config::CitationConfig;
use crate::errors::{ensure_finite, CredenceResult};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Self-citation penalty step function. Boundaries are exclusive.
pub fn self_citation_penalty(rate: f64) -> f64 {
    if rate > 0.3 {
        0.3
    } else if rate > 0.2 {
        0.15
    } else {
        0.0
    }
}

/// A dense strongly connected group of works
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationCluster {
    /// Member ids, sorted
    pub members: Vec<String>,
    pub internal_edges: usize,
    pub density: f64,
}

/// Citation-manipulation risk for one venue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationRiskReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub self_citation_rate: f64,
    pub self_citation_penalty: f64,
    pub clustering_risk: f64,
    pub pattern_risk: f64,
    pub diversity_risk: f64,
    /// Sum of the four components, may exceed 1
    pub total_risk: f64,
    pub clusters: Vec<CitationCluster>,
    /// Unordered pairs of works citing each other
    pub reciprocal_pairs: usize,
    /// Year -> number of citations
    pub temporal_distribution: BTreeMap<String, usize>,
}

impl CitationRiskReport {
    /// True when the report was computed from at least one citation
    pub fn has_citations(&self) -> bool {
        self.edge_count > 0
    }
}

/// Analyzes citation graphs with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct CitationAnalyzer {
    config: CitationConfig,
}

impl CitationAnalyzer {
    pub fn new(config: CitationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CitationConfig {
        &self.config
    }

    /// Build the graph and compute every risk component.
    ///
    /// # Errors
    /// - `GraphConstruction` when the graph cannot be built
    /// - `Validation` when a configured threshold is not finite
    pub fn analyze(&self, input: &CitationInput) -> CredenceResult<CitationRiskReport> {
        ensure_finite(
            "citation.cluster_density_threshold",
            self.config.cluster_density_threshold,
        )?;
        ensure_finite(
            "citation.pattern_share_threshold",
            self.config.pattern_share_threshold,
        )?;
        ensure_finite("citation.pattern_top_fraction", self.config.pattern_top_fraction)?;

        let graph = CitationGraph::build(input, &self.config)?;
        let report = self.analyze_graph(&graph);

        debug!(
            "Citation analysis: {} nodes, {} edges, self-citation {:.2}, total risk {:.3}",
            report.node_count, report.edge_count, report.self_citation_rate, report.total_risk
        );

        Ok(report)
    }

    /// Compute the report for an already built graph
    pub fn analyze_graph(&self, graph: &CitationGraph) -> CitationRiskReport {
        let edge_count = graph.edge_count();
        let mut report = CitationRiskReport {
            node_count: graph.node_count(),
            edge_count,
            density: graph.density(),
            ..Default::default()
        };
        if edge_count == 0 {
            return report;
        }

        report.self_citation_rate = self.self_citation_rate(graph);
        report.self_citation_penalty = self_citation_penalty(report.self_citation_rate);

        let (clusters, clustered_edges) = self.dense_clusters(graph);
        report.clustering_risk = clustered_edges as f64 / edge_count as f64;
        report.clusters = clusters;

        report.pattern_risk = self.pattern_risk(graph);
        report.diversity_risk = diversity_risk(graph);

        report.total_risk = report.self_citation_penalty
            + report.clustering_risk
            + report.pattern_risk
            + report.diversity_risk;

        report.reciprocal_pairs = reciprocal_pairs(graph);
        report.temporal_distribution = temporal_distribution(graph);

        report
    }

    /// An edge is a self-citation when some identity attribute is set on
    /// both ends to the same value. Missing or unknown values never match,
    /// but the edge still counts toward the rate's denominator.
    fn is_self_citation(&self, graph: &CitationGraph, from: NodeIndex, to: NodeIndex) -> bool {
        self.config.identity_attributes.iter().any(|key| {
            match (
                graph.explicit_attribute(from, key),
                graph.explicit_attribute(to, key),
            ) {
                (Some(citing), Some(cited)) => citing != UNKNOWN_ATTRIBUTE && citing == cited,
                _ => false,
            }
        })
    }

    fn self_citation_rate(&self, graph: &CitationGraph) -> f64 {
        let self_citations = graph
            .edges()
            .filter(|(from, to, _)| self.is_self_citation(graph, *from, *to))
            .count();
        self_citations as f64 / graph.edge_count() as f64
    }

    /// Strongly connected groups of two or more works whose internal density
    /// reaches the configured threshold
    fn dense_clusters(&self, graph: &CitationGraph) -> (Vec<CitationCluster>, usize) {
        let mut clusters = Vec::new();
        let mut clustered_edges = 0;

        for scc in graph.strongly_connected(2) {
            let members: HashSet<NodeIndex> = scc.iter().copied().collect();
            let internal_edges = graph
                .edges()
                .filter(|(from, to, _)| members.contains(from) && members.contains(to))
                .count();
            let n = members.len();
            let density = internal_edges as f64 / (n * (n - 1)) as f64;

            if density >= self.config.cluster_density_threshold {
                clustered_edges += internal_edges;
                let mut ids: Vec<String> =
                    scc.iter().map(|&idx| graph.node_id(idx).to_string()).collect();
                ids.sort();
                clusters.push(CitationCluster {
                    members: ids,
                    internal_edges,
                    density,
                });
            }
        }

        clusters.sort_by(|a, b| a.members.cmp(&b.members));
        (clusters, clustered_edges)
    }

    /// Concentration of citations on a few repeated (citing, cited) identity
    /// pairs, keyed on the first identity attribute
    fn pattern_risk(&self, graph: &CitationGraph) -> f64 {
        let key = self
            .config
            .identity_attributes
            .first()
            .map(String::as_str)
            .unwrap_or("author");

        let mut pair_counts: HashMap<(&str, &str), usize> = HashMap::new();
        for (from, to, _) in graph.edges() {
            let citing = graph.attribute(from, key);
            let cited = graph.attribute(to, key);
            if citing == cited || citing == UNKNOWN_ATTRIBUTE || cited == UNKNOWN_ATTRIBUTE {
                continue;
            }
            *pair_counts.entry((citing, cited)).or_insert(0) += 1;
        }
        if pair_counts.is_empty() {
            return 0.0;
        }

        let top_n = ((pair_counts.len() as f64 * self.config.pattern_top_fraction).ceil() as usize)
            .max(1);

        let mut repeated: Vec<(&(&str, &str), &usize)> =
            pair_counts.iter().filter(|&(_, &count)| count >= 2).collect();
        repeated.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let top_edges: usize = repeated.iter().take(top_n).map(|&(_, &count)| count).sum();
        let share = top_edges as f64 / graph.edge_count() as f64;

        if share > self.config.pattern_share_threshold {
            share
        } else {
            0.0
        }
    }
}

/// 1 - (distinct cited works / edges)
fn diversity_risk(graph: &CitationGraph) -> f64 {
    let edge_count = graph.edge_count();
    if edge_count == 0 {
        return 0.0;
    }
    let distinct_cited: HashSet<NodeIndex> = graph.edges().map(|(_, to, _)| to).collect();
    1.0 - distinct_cited.len() as f64 / edge_count as f64
}

fn reciprocal_pairs(graph: &CitationGraph) -> usize {
    graph
        .edges()
        .filter(|(from, to, _)| from < to && graph.contains_edge(*to, *from))
        .count()
}

/// Citations per year: the edge's own `year`, else the cited work's `year`
fn temporal_distribution(graph: &CitationGraph) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for (_, to, attributes) in graph.edges() {
        let year = attributes
            .get("year")
            .map(String::as_str)
            .or_else(|| graph.explicit_attribute(to, "year"));
        if let Some(year) = year {
            *distribution.entry(year.to_string()).or_insert(0) += 1;
        }
    }
    distribution
}
