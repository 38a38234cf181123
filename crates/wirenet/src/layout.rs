//! Automatic layout for wiring-harness networks.
//!
//! Layout runs in two phases:
//!
//! 1. [`generation`] places every node with a deterministic layered
//!    placement, one connected component at a time, and fits the result into
//!    the viewport.
//! 2. [`postprocess`] refines that placement with a bounded local search that
//!    removes segment crossings, nodes lying on foreign segments, and
//!    clearance violations, guided by [`scoring`] and the moves listed by
//!    [`candidates`].
//!
//! [`LayoutEngine`] bundles both phases behind validated [`LayoutOptions`].

pub mod candidates;
pub mod generation;
pub mod postprocess;
pub mod scoring;

use std::collections::BTreeMap;

use log::{debug, info};

use wirenet_core::{
    geometry::{Point, Size},
    identifier::NodeId,
};

use crate::{
    config::LayoutOptions,
    error::WirenetError,
    network::{Network, Segment},
};

use scoring::ConflictRank;

/// Node positions keyed by node id.
///
/// Ordered by id so that iteration, and therefore every tie-break that walks
/// the map, is deterministic.
pub type PositionMap = BTreeMap<NodeId, Point>;

/// Builder for a [`LayoutEngine`].
///
/// # Examples
///
/// ```
/// use wirenet::layout::LayoutBuilder;
///
/// let engine = LayoutBuilder::default()
///     .with_snap_to_grid(true)
///     .with_grid_step(10.0)
///     .build()
///     .unwrap();
/// assert!(engine.options().snap_to_grid());
///
/// assert!(LayoutBuilder::default().with_grid_step(0.0).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutBuilder {
    options: LayoutOptions,
}

impl LayoutBuilder {
    /// Starts from existing options.
    ///
    /// These usually come from [`crate::config::LayoutConfig::to_options`].
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn with_snap_to_grid(mut self, snap_to_grid: bool) -> Self {
        self.options = self.options.with_snap_to_grid(snap_to_grid);
        self
    }

    pub fn with_grid_step(mut self, grid_step: f64) -> Self {
        self.options = self.options.with_grid_step(grid_step);
        self
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.options = self.options.with_viewport(viewport);
        self
    }

    /// Validates the options and creates the engine.
    ///
    /// # Errors
    ///
    /// Returns [`WirenetError::Config`] if the grid step or viewport is unusable.
    pub fn build(self) -> Result<LayoutEngine, WirenetError> {
        self.options.validate()?;
        debug!(options:? = self.options; "Layout engine configured");
        Ok(LayoutEngine {
            options: self.options,
        })
    }
}

/// Computes and checks node placements for a [`Network`].
///
/// The engine holds no state besides its options; every call is a pure
/// function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Places every node of `network`.
    ///
    /// Invalid segments are ignored. The result holds exactly one position
    /// per node, each inside the placement bounds.
    pub fn layout(&self, network: &Network) -> PositionMap {
        let nodes = network.node_list();
        let segments = network.valid_segments();
        info!(
            nodes_len = nodes.len(),
            segments_len = segments.len();
            "Computing layout"
        );

        let positions = generation::create_node_position_map(&nodes, &segments, &self.options);
        log_rank(&segments, &positions);
        positions
    }

    /// Runs conflict resolution on an existing placement.
    ///
    /// Nodes missing from `positions` are left unplaced, and segments touching
    /// them are ignored. The result is never ranked worse than `positions`.
    pub fn refine(&self, network: &Network, positions: &PositionMap) -> PositionMap {
        let segments = network.valid_segments();
        info!(
            positions_len = positions.len(),
            segments_len = segments.len();
            "Refining placement"
        );

        let refined = postprocess::resolve_visual_overlaps(positions, &segments, &self.options);
        log_rank(&segments, &refined);
        refined
    }

    /// Measures the visual conflicts of a placement without changing it.
    pub fn check(&self, network: &Network, positions: &PositionMap) -> ConflictRank {
        scoring::visual_conflict_rank(&network.valid_segments(), positions)
    }
}

fn log_rank(segments: &[Segment], positions: &PositionMap) {
    let rank = scoring::visual_conflict_rank(segments, positions);
    debug!(
        crossings = rank.crossings(),
        node_overlaps = rank.node_overlaps(),
        clearance_violations = rank.clearance_violations(),
        score = rank.score();
        "Placement ranked"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Network {
        let mut network = Network::new();
        for id in ["A", "B", "C"] {
            network.add_node(id);
        }
        network.add_segment(Segment::new("S1", "A", "B"));
        network.add_segment(Segment::new("S2", "B", "C"));
        network
    }

    #[test]
    fn test_builder_rejects_invalid_options() {
        assert!(LayoutBuilder::default().with_grid_step(-1.0).build().is_err());
        assert!(
            LayoutBuilder::default()
                .with_viewport(Size::new(40.0, 300.0))
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_layout_places_every_node() {
        let engine = LayoutBuilder::default().build().unwrap();
        let network = chain();

        let positions = engine.layout(&network);
        assert_eq!(positions.len(), 3);
        assert!(network.ensure_placed(&positions).is_ok());
        assert!(engine.check(&network, &positions).is_clean());
    }

    #[test]
    fn test_layout_ignores_invalid_segments() {
        let engine = LayoutBuilder::default().build().unwrap();
        let mut network = chain();
        let expected = engine.layout(&network);

        network.add_segment(Segment::new("S3", "A", "A"));
        network.add_segment(Segment::new("S4", "A", "GHOST"));
        assert_eq!(engine.layout(&network), expected);
    }

    #[test]
    fn test_refine_keeps_clean_placement() {
        let engine = LayoutBuilder::default().build().unwrap();
        let network = chain();
        let positions = engine.layout(&network);

        assert_eq!(engine.refine(&network, &positions), positions);
    }

    #[test]
    fn test_check_counts_manual_overlap() {
        let engine = LayoutBuilder::default().build().unwrap();
        let mut network = chain();
        network.add_node("X");
        network.add_segment(Segment::new("S3", "A", "C"));

        let positions: PositionMap = [
            ("A", 100.0, 100.0),
            ("B", 200.0, 200.0),
            ("C", 300.0, 100.0),
            ("X", 200.0, 100.0),
        ]
        .into_iter()
        .map(|(id, x, y)| (NodeId::new(id), Point::new(x, y)))
        .collect();

        let rank = engine.check(&network, &positions);
        assert_eq!(rank.node_overlaps(), 1);
        assert_eq!(rank.crossings(), 0);
        assert!(!rank.is_clean());
    }
}
