//! TOML documents read and written by the CLI.
//!
//! An input document lists the network and, optionally, a placement:
//!
//! ```toml
//! nodes = ["A", "B"]
//!
//! [[segments]]
//! id = "S1"
//! node_a = "A"
//! node_b = "B"
//!
//! [positions]
//! A = { x = 120.0, y = 80.0 }
//! ```
//!
//! The output document carries the computed placement and its conflict report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use wirenet::{ConflictRank, Network, PositionMap, Segment, geometry::Point, identifier::NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
        }
    }
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Point::new(position.x, position.y)
    }
}

/// Input document: a network with an optional placement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkDocument {
    nodes: Vec<NodeId>,
    segments: Vec<Segment>,
    positions: BTreeMap<NodeId, Position>,
}

impl NetworkDocument {
    pub fn network(&self) -> Network {
        Network::from_parts(self.nodes.iter().cloned(), self.segments.iter().cloned())
    }

    pub fn positions(&self) -> PositionMap {
        self.positions
            .iter()
            .map(|(id, position)| (id.clone(), Point::from(*position)))
            .collect()
    }

    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }
}

/// Output document: a placement and its conflict report.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutDocument {
    report: ConflictRank,
    positions: BTreeMap<NodeId, Position>,
}

impl LayoutDocument {
    pub fn new(positions: &PositionMap, report: ConflictRank) -> Self {
        Self {
            report,
            positions: positions
                .iter()
                .map(|(id, point)| (id.clone(), Position::from(*point)))
                .collect(),
        }
    }
}
