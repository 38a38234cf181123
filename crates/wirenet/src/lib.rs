//! Wirenet - Deterministic automatic layout for wiring-harness network diagrams.
//!
//! A wiring-harness network is a set of nodes (connectors, splices, branch
//! points) joined by segments (cable runs). This crate assigns every node a
//! 2D position inside a fixed viewport so that the resulting diagram has as
//! few segment crossings, nodes lying on foreign segments, and clearance
//! violations as it can reasonably achieve.
//!
//! The same inputs always produce the same positions.
//!
//! # Example
//!
//! ```
//! use wirenet::{LayoutBuilder, Network, Segment};
//!
//! let mut network = Network::new();
//! for id in ["A", "B", "C"] {
//!     network.add_node(id);
//! }
//! network.add_segment(Segment::new("S1", "A", "B"));
//! network.add_segment(Segment::new("S2", "B", "C"));
//!
//! let engine = LayoutBuilder::default().build().unwrap();
//! let positions = engine.layout(&network);
//!
//! assert_eq!(positions.len(), 3);
//! assert!(engine.check(&network, &positions).is_clean());
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod network;

pub use wirenet_core::{geometry, identifier};

pub use error::{ConfigError, WirenetError};
pub use layout::{LayoutBuilder, LayoutEngine, PositionMap, scoring::ConflictRank};
pub use network::{Network, Segment};
