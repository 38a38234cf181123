//! Network model consumed by the layout engine.
//!
//! A [`Network`] is an ordered set of node identifiers plus the [`Segment`]s
//! (cable runs) joining them. The model is intentionally thin: the engine only
//! needs identity and adjacency, so connector/splice semantics, lengths and
//! wire assignments stay with the host application.
//!
//! Segments that form a self-loop or reference an unknown node are kept as
//! supplied but skipped by [`Network::valid_segments`], which is what the
//! layout engine consumes.

use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};

use wirenet_core::identifier::{NodeId, SegmentId};

use crate::{error::WirenetError, layout::PositionMap};

/// A physical cable run between two nodes.
///
/// The pair of endpoints is unordered; `node_a` and `node_b` only record the
/// order in which the segment was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    id: SegmentId,
    node_a: NodeId,
    node_b: NodeId,
}

impl Segment {
    /// Creates a new segment between `node_a` and `node_b`.
    pub fn new(
        id: impl Into<SegmentId>,
        node_a: impl Into<NodeId>,
        node_b: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            node_a: node_a.into(),
            node_b: node_b.into(),
        }
    }

    pub fn id(&self) -> &SegmentId {
        &self.id
    }

    pub fn node_a(&self) -> &NodeId {
        &self.node_a
    }

    pub fn node_b(&self) -> &NodeId {
        &self.node_b
    }

    /// Returns true if `node` is one of the two endpoints.
    pub fn has_endpoint(&self, node: &NodeId) -> bool {
        &self.node_a == node || &self.node_b == node
    }

    /// Returns true if both segments touch at least one common node.
    pub fn shares_endpoint(&self, other: &Segment) -> bool {
        self.has_endpoint(&other.node_a) || self.has_endpoint(&other.node_b)
    }

    pub fn is_self_loop(&self) -> bool {
        self.node_a == self.node_b
    }
}

/// Nodes and segments of one wiring-harness network.
///
/// # Examples
///
/// ```
/// use wirenet::network::{Network, Segment};
///
/// let mut network = Network::new();
/// network.add_node("A");
/// network.add_node("B");
/// network.add_segment(Segment::new("S1", "A", "B"));
/// network.add_segment(Segment::new("S2", "A", "missing"));
///
/// assert_eq!(network.node_count(), 2);
/// assert_eq!(network.valid_segments().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    nodes: IndexSet<NodeId>,
    segments: Vec<Segment>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a network from node and segment lists. Duplicate node ids collapse.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = NodeId>,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            segments: segments.into_iter().collect(),
        }
    }

    /// Adds a node. Returns false if the node was already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        self.nodes.insert(id.into())
    }

    /// Adds a segment as supplied; validity is decided by [`Network::valid_segments`].
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Returns the nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    /// Returns the segments in declaration order, including invalid ones.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the node ids as an owned list, in declaration order.
    pub fn node_list(&self) -> Vec<NodeId> {
        self.nodes.iter().cloned().collect()
    }

    /// Returns the segments the layout engine may use.
    ///
    /// Self-loops and segments with an endpoint outside the network are
    /// dropped; the rest keep their declaration order.
    pub fn valid_segments(&self) -> Vec<Segment> {
        self.segments
            .iter()
            .filter(|segment| {
                if segment.is_self_loop() {
                    debug!(segment_id:% = segment.id(); "Skipping self-loop segment");
                    return false;
                }
                if !self.contains_node(segment.node_a()) || !self.contains_node(segment.node_b()) {
                    debug!(
                        segment_id:% = segment.id(),
                        node_a:% = segment.node_a(),
                        node_b:% = segment.node_b();
                        "Skipping segment with unknown endpoint"
                    );
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }

    /// Checks that `positions` places every node of the network.
    ///
    /// The layout engine itself tolerates unplaced nodes; this is for callers
    /// that validate a complete manual placement.
    ///
    /// # Errors
    ///
    /// Returns [`WirenetError::Network`] listing the unplaced node ids.
    pub fn ensure_placed(&self, positions: &PositionMap) -> Result<(), WirenetError> {
        let missing: Vec<&str> = self
            .nodes
            .iter()
            .filter(|id| !positions.contains_key(*id))
            .map(NodeId::as_str)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(WirenetError::Network(format!(
                "nodes without a position: {}",
                missing.join(", ")
            )))
        }
    }
}
