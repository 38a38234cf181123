//! Wirenet Core Types and Definitions
//!
//! This crate provides the foundational types shared by the wirenet layout
//! engine and its callers. It includes:
//!
//! - **Identifiers**: Ordered node and segment identifiers
//!   ([`identifier::NodeId`], [`identifier::SegmentId`])
//! - **Geometry**: Points, sizes, bounds and segment predicates ([`geometry`] module)

pub mod geometry;
pub mod identifier;
