//! Directed citation graph
//!
//! Nodes are works identified by string ids, each carrying a small attribute
//! map (author, affiliation, year...). Edges point from the citing work to the
//! cited work. Repeated edges between the same pair collapse into one.

use crate::config::CitationConfig;
use crate::errors::{CredenceError, CredenceResult};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Free-form node or edge attributes
pub type AttributeMap = BTreeMap<String, String>;

/// Value reported for an attribute a node does not carry
pub const UNKNOWN_ATTRIBUTE: &str = "unknown";

/// One citation: `citing` cites `cited`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEdge {
    pub citing: String,
    pub cited: String,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl CitationEdge {
    pub fn new(citing: impl Into<String>, cited: impl Into<String>) -> Self {
        Self {
            citing: citing.into(),
            cited: cited.into(),
            attributes: AttributeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Raw citation data for one venue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationInput {
    #[serde(default)]
    pub edges: Vec<CitationEdge>,
    /// Node id -> attributes
    #[serde(default)]
    pub nodes: BTreeMap<String, AttributeMap>,
}

impl CitationInput {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty()
    }
}

struct Work {
    id: String,
    attributes: AttributeMap,
}

/// Immutable graph built from a [`CitationInput`]
pub struct CitationGraph {
    graph: DiGraph<Work, AttributeMap>,
    index: HashMap<String, NodeIndex>,
}

impl CitationGraph {
    /// Build the graph.
    ///
    /// # Errors
    /// - `GraphConstruction` if an edge has an empty endpoint id, or if
    ///   `strict_nodes` is set and an endpoint has no attribute entry
    pub fn build(input: &CitationInput, config: &CitationConfig) -> CredenceResult<Self> {
        let mut graph: DiGraph<Work, AttributeMap> = DiGraph::new();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();

        // Declared nodes first (sorted by id) so isolated works count toward density
        for (id, attributes) in &input.nodes {
            let idx = graph.add_node(Work {
                id: id.clone(),
                attributes: attributes.clone(),
            });
            index.insert(id.clone(), idx);
        }

        for edge in &input.edges {
            let citing = Self::resolve(&mut graph, &mut index, &edge.citing, config)?;
            let cited = Self::resolve(&mut graph, &mut index, &edge.cited, config)?;
            // first occurrence wins; repeats add nothing
            if graph.find_edge(citing, cited).is_none() {
                graph.add_edge(citing, cited, edge.attributes.clone());
            }
        }

        Ok(Self { graph, index })
    }

    fn resolve(
        graph: &mut DiGraph<Work, AttributeMap>,
        index: &mut HashMap<String, NodeIndex>,
        id: &str,
        config: &CitationConfig,
    ) -> CredenceResult<NodeIndex> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CredenceError::graph_construction(
                "citation edge references an empty node id",
            ));
        }
        if let Some(&idx) = index.get(id) {
            return Ok(idx);
        }
        if config.strict_nodes {
            return Err(CredenceError::graph_construction(format!(
                "citation edge references node '{id}' with no attributes"
            )));
        }
        let idx = graph.add_node(Work {
            id: id.to_string(),
            attributes: config.default_node_attributes.clone(),
        });
        index.insert(id.to_string(), idx);
        Ok(idx)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node_id(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].id
    }

    /// Attribute value of a node, or [`UNKNOWN_ATTRIBUTE`]
    pub fn attribute(&self, idx: NodeIndex, key: &str) -> &str {
        self.graph[idx]
            .attributes
            .get(key)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ATTRIBUTE)
    }

    /// Explicitly set attribute value, without the unknown fallback
    pub fn explicit_attribute(&self, idx: NodeIndex, key: &str) -> Option<&str> {
        self.graph[idx].attributes.get(key).map(String::as_str)
    }

    pub fn contains_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// (citing, cited, edge attributes) for every distinct edge
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &AttributeMap)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// Directed density: E / (N * (N - 1)); zero below two nodes
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        self.edge_count() as f64 / (n * (n - 1)) as f64
    }

    /// Strongly connected components with at least `min_size` members
    pub fn strongly_connected(&self, min_size: usize) -> Vec<Vec<NodeIndex>> {
        petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() >= min_size)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let input = CitationInput {
            edges: vec![
                CitationEdge::new("a", "b"),
                CitationEdge::new("a", "b"),
                CitationEdge::new("b", "a"),
            ],
            nodes: BTreeMap::new(),
        };
        let graph = CitationGraph::build(&input, &CitationConfig::default()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_edge_keeps_first_attributes() {
        let input = CitationInput {
            edges: vec![
                CitationEdge::new("a", "b").with_attribute("year", "2019"),
                CitationEdge::new("a", "b").with_attribute("year", "2023"),
            ],
            nodes: BTreeMap::new(),
        };
        let graph = CitationGraph::build(&input, &CitationConfig::default()).unwrap();
        assert_eq!(graph.edge_count(), 1);
        let years: Vec<&str> = graph
            .edges()
            .filter_map(|(_, _, attributes)| attributes.get("year").map(String::as_str))
            .collect();
        assert_eq!(years, vec!["2019"]);
    }

    #[test]
    fn test_missing_attributes_read_as_unknown() {
        let mut nodes = BTreeMap::new();
        nodes.insert("a".to_string(), attrs(&[("author", "alice")]));
        let input = CitationInput {
            edges: vec![CitationEdge::new("a", "b")],
            nodes,
        };
        let graph = CitationGraph::build(&input, &CitationConfig::default()).unwrap();
        let a = graph.node_index("a").unwrap();
        let b = graph.node_index("b").unwrap();
        assert_eq!(graph.attribute(a, "author"), "alice");
        assert_eq!(graph.attribute(a, "affiliation"), UNKNOWN_ATTRIBUTE);
        assert_eq!(graph.attribute(b, "author"), UNKNOWN_ATTRIBUTE);
        assert_eq!(graph.explicit_attribute(b, "author"), None);
    }

    #[test]
    fn test_strict_nodes_rejects_unknown_endpoint() {
        let config = CitationConfig {
            strict_nodes: true,
            ..Default::default()
        };
        let input = CitationInput {
            edges: vec![CitationEdge::new("a", "ghost")],
            nodes: [("a".to_string(), AttributeMap::new())].into_iter().collect(),
        };
        let err = CitationGraph::build(&input, &config).err().unwrap();
        assert_eq!(err.kind(), crate::errors::ErrorKind::GraphConstruction);
    }

    #[test]
    fn test_default_node_attributes_fill_undeclared_nodes() {
        let config = CitationConfig {
            default_node_attributes: attrs(&[("affiliation", "independent")]),
            ..Default::default()
        };
        let input = CitationInput {
            edges: vec![CitationEdge::new("a", "b")],
            nodes: BTreeMap::new(),
        };
        let graph = CitationGraph::build(&input, &config).unwrap();
        let b = graph.node_index("b").unwrap();
        assert_eq!(graph.attribute(b, "affiliation"), "independent");
    }

    #[test]
    fn test_empty_node_id_is_rejected() {
        let input = CitationInput {
            edges: vec![CitationEdge::new("a", "  ")],
            nodes: BTreeMap::new(),
        };
        assert!(CitationGraph::build(&input, &CitationConfig::default()).is_err());
    }

    #[test]
    fn test_density_and_sccs() {
        let input = CitationInput {
            edges: vec![
                CitationEdge::new("a", "b"),
                CitationEdge::new("b", "c"),
                CitationEdge::new("c", "a"),
                CitationEdge::new("c", "d"),
            ],
            nodes: BTreeMap::new(),
        };
        let graph = CitationGraph::build(&input, &CitationConfig::default()).unwrap();
        assert!((graph.density() - 4.0 / 12.0).abs() < 1e-12);
        let sccs = graph.strongly_connected(2);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 3);
    }
}
