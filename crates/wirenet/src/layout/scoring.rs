//! Visual defect counting and ranking.
//!
//! Three defect categories are measured on a position map:
//!
//! - **crossings**: pairs of segments without a common endpoint that properly cross,
//! - **overlaps**: nodes lying on a segment they are not an endpoint of,
//! - **clearance violations**: nodes closer than
//!   [`MIN_SEGMENT_NODE_CLEARANCE`] to a segment they are not an endpoint of.
//!
//! The counters are usable on any position map, including manually edited
//! ones. Segments with an unplaced endpoint and unplaced nodes are ignored.

use serde::Serialize;

use wirenet_core::{
    geometry::{
        DEFAULT_ON_SEGMENT_EPSILON, MIN_SEGMENT_NODE_CLEARANCE, Point, distance_to_segment,
        is_point_on_segment, segments_cross,
    },
    identifier::NodeId,
};

use crate::{layout::PositionMap, network::Segment};

/// Weight of one segment crossing in the weighted score.
pub const CROSSING_WEIGHT: usize = 400;

/// Weight of one node-on-segment overlap in the weighted score.
pub const OVERLAP_WEIGHT: usize = 120;

/// Weight of one clearance violation in the weighted score.
pub const CLEARANCE_WEIGHT: usize = 24;

/// Defect counts of one complete position map.
///
/// The derived ordering is lexicographic over
/// `(node_overlaps, clearance_violations, crossings, score)`, so fixing a more
/// severe category always dominates the weighted score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConflictRank {
    node_overlaps: usize,
    clearance_violations: usize,
    crossings: usize,
    score: usize,
}

impl ConflictRank {
    /// Builds a rank from raw counts, computing the weighted score.
    pub fn from_counts(
        crossings: usize,
        node_overlaps: usize,
        clearance_violations: usize,
    ) -> Self {
        Self {
            node_overlaps,
            clearance_violations,
            crossings,
            score: weighted_score(crossings, node_overlaps, clearance_violations),
        }
    }

    pub fn node_overlaps(&self) -> usize {
        self.node_overlaps
    }

    pub fn clearance_violations(&self) -> usize {
        self.clearance_violations
    }

    pub fn crossings(&self) -> usize {
        self.crossings
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Returns true if this rank is strictly better (lower) than `other`.
    pub fn is_better_than(&self, other: &ConflictRank) -> bool {
        self < other
    }

    /// Returns true if no defect of any category remains.
    pub fn is_clean(&self) -> bool {
        self.node_overlaps == 0 && self.clearance_violations == 0 && self.crossings == 0
    }
}

fn weighted_score(crossings: usize, node_overlaps: usize, clearance_violations: usize) -> usize {
    CROSSING_WEIGHT * crossings
        + OVERLAP_WEIGHT * node_overlaps
        + CLEARANCE_WEIGHT * clearance_violations
}

/// Resolves both endpoints of a segment, or `None` if either is unplaced.
pub(crate) fn segment_points(segment: &Segment, positions: &PositionMap) -> Option<(Point, Point)> {
    let start = positions.get(segment.node_a())?;
    let end = positions.get(segment.node_b())?;
    Some((*start, *end))
}

/// Returns true if both segments are placed, disjoint in endpoints, and properly cross.
pub(crate) fn segment_pair_crosses(
    first: &Segment,
    second: &Segment,
    positions: &PositionMap,
) -> bool {
    if first.shares_endpoint(second) {
        return false;
    }
    match (segment_points(first, positions), segment_points(second, positions)) {
        (Some((a_start, a_end)), Some((b_start, b_end))) => {
            segments_cross(a_start, a_end, b_start, b_end)
        }
        _ => false,
    }
}

/// Returns true if `node` lies on `segment` without being one of its endpoints.
pub(crate) fn node_overlaps_segment(
    node: &NodeId,
    segment: &Segment,
    positions: &PositionMap,
) -> bool {
    if segment.has_endpoint(node) {
        return false;
    }
    match (positions.get(node), segment_points(segment, positions)) {
        (Some(point), Some((start, end))) => {
            is_point_on_segment(start, end, *point, DEFAULT_ON_SEGMENT_EPSILON)
        }
        _ => false,
    }
}

/// Returns true if `node` is too close to `segment` without being one of its endpoints.
pub(crate) fn node_violates_clearance(
    node: &NodeId,
    segment: &Segment,
    positions: &PositionMap,
) -> bool {
    if segment.has_endpoint(node) {
        return false;
    }
    match (positions.get(node), segment_points(segment, positions)) {
        (Some(point), Some((start, end))) => {
            distance_to_segment(*point, start, end) < MIN_SEGMENT_NODE_CLEARANCE
        }
        _ => false,
    }
}

/// Counts unordered pairs of segments that properly cross.
pub fn count_segment_crossings(segments: &[Segment], positions: &PositionMap) -> usize {
    segments
        .iter()
        .enumerate()
        .map(|(idx, first)| {
            segments[idx + 1..]
                .iter()
                .filter(|second| segment_pair_crosses(first, second, positions))
                .count()
        })
        .sum()
}

/// Counts (segment, node) pairs where the node sits on a segment it does not terminate.
pub fn count_segment_node_overlaps(segments: &[Segment], positions: &PositionMap) -> usize {
    segments
        .iter()
        .map(|segment| {
            positions
                .keys()
                .filter(|node| node_overlaps_segment(node, segment, positions))
                .count()
        })
        .sum()
}

/// Counts (segment, node) pairs closer than the minimum clearance.
pub fn count_segment_node_clearance_violations(
    segments: &[Segment],
    positions: &PositionMap,
) -> usize {
    segments
        .iter()
        .map(|segment| {
            positions
                .keys()
                .filter(|node| node_violates_clearance(node, segment, positions))
                .count()
        })
        .sum()
}

/// Weighted defect score: `400 × crossings + 120 × overlaps + 24 × clearance`.
pub fn score_visual_conflicts(segments: &[Segment], positions: &PositionMap) -> usize {
    visual_conflict_rank(segments, positions).score()
}

/// Full rank of a position map.
pub fn visual_conflict_rank(segments: &[Segment], positions: &PositionMap) -> ConflictRank {
    ConflictRank::from_counts(
        count_segment_crossings(segments, positions),
        count_segment_node_overlaps(segments, positions),
        count_segment_node_clearance_violations(segments, positions),
    )
}
