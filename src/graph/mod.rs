//! Program dependence graph model.
//!
//! A [`Pdg`] is a cheaply clonable value: the edge structure lives behind an
//! `Arc` and node attribute records live in a persistent `im::Vector`, so an
//! annotated copy shares everything it does not touch with the original.
//! Node `i` of the petgraph topology always corresponds to `nodes[i]`.

pub mod dot;
pub mod span;

pub use span::LineSpan;

use crate::core::ChangeColor;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::sync::Arc;

/// Attribute map of a node, edge, subgraph or graph.
pub type Attributes = im::OrdMap<String, String>;

/// Label of the structural node opening a subroutine.
pub const ENTRY_LABEL: &str = "Entry";
/// Label of the structural node closing a subroutine.
pub const EXIT_LABEL: &str = "Exit";

pub const LABEL_ATTR: &str = "label";
pub const SPAN_ATTR: &str = "span";
pub const CLUSTER_ATTR: &str = "cluster";
pub const FILEPATH_ATTR: &str = "filepath";
pub const COLOR_ATTR: &str = "color";
pub const COMMUNITY_ATTR: &str = "community";

/// A PDG vertex: an identifier plus its attribute record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdgNode {
    id: String,
    attrs: Attributes,
}

impl PdgNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn label(&self) -> Option<&str> {
        self.attr(LABEL_ATTR)
    }

    /// Entry/Exit nodes bound a subroutine and never carry a change color.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.label().map(|l| l.trim_matches('"')),
            Some(ENTRY_LABEL) | Some(EXIT_LABEL)
        )
    }

    pub fn raw_span(&self) -> Option<&str> {
        self.attr(SPAN_ATTR)
    }

    /// Parsed span; `None` if absent or malformed.
    pub fn span(&self) -> Option<LineSpan> {
        self.raw_span().and_then(LineSpan::parse)
    }

    pub fn cluster(&self) -> Option<&str> {
        self.attr(CLUSTER_ATTR)
    }

    /// Source file of the node: `filepath` if present, else `cluster`, with
    /// quote characters removed.
    pub fn file_path(&self) -> Option<String> {
        self.attr(FILEPATH_ATTR)
            .or_else(|| self.cluster())
            .map(|path| path.replace('"', ""))
    }

    pub fn color(&self) -> Option<&str> {
        self.attr(COLOR_ATTR)
    }

    pub fn set_color(&mut self, color: ChangeColor) {
        self.set_attr(COLOR_ATTR, color.as_str());
    }

    pub fn community(&self) -> Option<&str> {
        self.attr(COMMUNITY_ATTR)
    }
}

/// Borrowed view of one edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub attributes: &'a Attributes,
}

/// A (possibly nested) subgraph and the ids of the nodes listed inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgraph {
    pub name: Option<String>,
    pub attributes: Attributes,
    pub members: Vec<String>,
    pub subgraphs: Vec<Subgraph>,
}

#[derive(Debug, Clone)]
pub struct Pdg {
    name: Option<String>,
    directed: bool,
    strict: bool,
    graph_attrs: Attributes,
    node_defaults: Attributes,
    edge_defaults: Attributes,
    topology: Arc<DiGraph<(), Attributes>>,
    nodes: im::Vector<PdgNode>,
    index: im::HashMap<String, NodeIndex>,
    subgraphs: Arc<Vec<Subgraph>>,
}

impl Default for Pdg {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Pdg {
    pub fn new(directed: bool) -> Self {
        Self {
            name: None,
            directed,
            strict: false,
            graph_attrs: Attributes::new(),
            node_defaults: Attributes::new(),
            edge_defaults: Attributes::new(),
            topology: Arc::new(DiGraph::new()),
            nodes: im::Vector::new(),
            index: im::HashMap::new(),
            subgraphs: Arc::new(Vec::new()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn graph_attributes(&self) -> &Attributes {
        &self.graph_attrs
    }

    pub fn set_graph_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.graph_attrs.insert(key.into(), value.into());
    }

    /// Attributes of `node [...]` statements.
    pub fn node_defaults(&self) -> &Attributes {
        &self.node_defaults
    }

    pub fn extend_node_defaults(&mut self, attrs: Attributes) {
        self.node_defaults.extend(attrs);
    }

    /// Attributes of `edge [...]` statements.
    pub fn edge_defaults(&self) -> &Attributes {
        &self.edge_defaults
    }

    pub fn extend_edge_defaults(&mut self, attrs: Attributes) {
        self.edge_defaults.extend(attrs);
    }

    /// Insert a node, or merge `attrs` into the existing node with that id.
    pub fn add_node<I, K, V>(&mut self, id: &str, attrs: I) -> NodeIndex
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let idx = self.ensure_node(id);
        let mut attrs = attrs.into_iter().peekable();
        if attrs.peek().is_some() {
            if let Some(node) = self.nodes.get_mut(idx.index()) {
                for (key, value) in attrs {
                    node.set_attr(key, value);
                }
            }
        }
        idx
    }

    /// Index of the node with `id`, creating an attribute-less node if needed.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = Arc::make_mut(&mut self.topology).add_node(());
        self.nodes.push_back(PdgNode::new(id));
        self.index.insert(id.to_string(), idx);
        idx
    }

    pub fn add_edge<I, K, V>(&mut self, source: &str, target: &str, attrs: I) -> EdgeIndex
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let from = self.ensure_node(source);
        let to = self.ensure_node(target);
        let attrs: Attributes = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Arc::make_mut(&mut self.topology).add_edge(from, to, attrs)
    }

    pub fn add_subgraph(&mut self, subgraph: Subgraph) {
        Arc::make_mut(&mut self.subgraphs).push(subgraph);
    }

    pub fn subgraphs(&self) -> &[Subgraph] {
        &self.subgraphs
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    pub fn node(&self, id: &str) -> Option<&PdgNode> {
        self.index.get(id).and_then(|idx| self.node_at(*idx))
    }

    pub fn node_at(&self, idx: NodeIndex) -> Option<&PdgNode> {
        self.nodes.get(idx.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PdgNode> {
        self.nodes.iter()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.topology.node_indices()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.topology.edge_references().map(move |edge| EdgeView {
            source: self.nodes[edge.source().index()].id(),
            target: self.nodes[edge.target().index()].id(),
            attributes: edge.weight(),
        })
    }

    /// Mutate one node record in place. Only the touched chunk of the node
    /// vector is copied if it is shared with another graph value.
    pub fn update_node(&mut self, idx: NodeIndex, f: impl FnOnce(&mut PdgNode)) {
        if let Some(node) = self.nodes.get_mut(idx.index()) {
            f(node);
        }
    }

    /// Whether both values still share the same edge structure allocation.
    pub fn shares_structure_with(&self, other: &Pdg) -> bool {
        Arc::ptr_eq(&self.topology, &other.topology)
    }
}
