//! Citation graph analysis
//!
//! Builds a directed citation graph for a venue and scores manipulation risk:
//! self-citation, dense mutual-citation clusters, repeated identity pairs and
//! low reference diversity.

mod analyzer;
mod graph;

pub use analyzer::{self_citation_penalty, CitationAnalyzer, CitationCluster, CitationRiskReport};
pub use graph::{AttributeMap, CitationEdge, CitationGraph, CitationInput, UNKNOWN_ATTRIBUTE};
