//! Conflict resolution by bounded local search.
//!
//! Starting from an initial placement, each iteration relocates at most one
//! node to a nearby nudge candidate, targeting the first remaining defect in
//! priority order: crossing, node-on-segment overlap, clearance violation.
//! The search stops when no targeted move exists, when a state repeats, or
//! after [`MAX_REFINEMENT_ITERATIONS`]. The best-ranked state seen is
//! returned, so the result is never ranked worse than the input.

use std::collections::HashSet;

use log::{debug, trace};

use wirenet_core::{geometry::Point, identifier::NodeId};

use crate::{
    config::LayoutOptions,
    layout::{
        PositionMap,
        candidates::list_nudge_candidates,
        scoring::{
            node_overlaps_segment, node_violates_clearance, score_visual_conflicts,
            segment_pair_crosses, visual_conflict_rank,
        },
    },
    network::Segment,
};

/// Upper bound on refinement iterations.
pub const MAX_REFINEMENT_ITERATIONS: usize = 24;

/// A single relocation chosen by the search.
#[derive(Debug, Clone, PartialEq)]
struct Move {
    node: NodeId,
    position: Point,
    score: usize,
}

/// Refines `initial` to reduce visual conflicts.
///
/// The caller's map is left untouched; unplaced segment endpoints are ignored.
pub fn resolve_visual_overlaps(
    initial: &PositionMap,
    segments: &[Segment],
    options: &LayoutOptions,
) -> PositionMap {
    let mut segments = segments.to_vec();
    segments.sort_by(|a, b| {
        a.id()
            .cmp(b.id())
            .then_with(|| a.node_a().cmp(b.node_a()))
            .then_with(|| a.node_b().cmp(b.node_b()))
    });

    search(initial, &segments, |current| next_move(current, &segments, options))
}

/// Runs the bounded search from `initial`, asking `next` for each move.
///
/// `segments` must already be in canonical order.
fn search(
    initial: &PositionMap,
    segments: &[Segment],
    mut next: impl FnMut(&PositionMap) -> Option<Move>,
) -> PositionMap {
    let mut current = initial.clone();
    let mut best = initial.clone();
    let mut best_rank = visual_conflict_rank(segments, &best);
    let mut visited: HashSet<String> = HashSet::new();
    let initial_rank = best_rank;

    for iteration in 0..MAX_REFINEMENT_ITERATIONS {
        if !visited.insert(fingerprint(&current)) {
            debug!(iteration; "Refinement revisited a state, stopping");
            break;
        }

        let rank = visual_conflict_rank(segments, &current);
        if rank.is_better_than(&best_rank) {
            best = current.clone();
            best_rank = rank;
        }

        let Some(step) = next(&current) else {
            trace!(iteration; "No applicable move, stopping");
            break;
        };

        trace!(
            iteration,
            node = step.node.as_str(),
            x = step.position.x(),
            y = step.position.y(),
            score = step.score;
            "Applying move"
        );
        current.insert(step.node, step.position);
    }

    let final_rank = visual_conflict_rank(segments, &current);
    if final_rank.is_better_than(&best_rank) {
        best = current;
        best_rank = final_rank;
    }

    debug!(
        initial_rank:? = initial_rank,
        best_rank:? = best_rank;
        "Conflict resolution finished"
    );
    best
}

/// Targets the first remaining defect: crossings, then overlaps, then clearance.
fn next_move(
    positions: &PositionMap,
    segments: &[Segment],
    options: &LayoutOptions,
) -> Option<Move> {
    fix_crossing(positions, segments, options)
        .or_else(|| fix_overlap(positions, segments, options))
        .or_else(|| fix_clearance(positions, segments, options))
}

/// Serializes a state for cycle detection.
fn fingerprint(positions: &PositionMap) -> String {
    positions
        .iter()
        .map(|(node, point)| format!("{node}:{},{};", point.x(), point.y()))
        .collect()
}

/// Picks the lowest-scoring candidate of `node` for which `resolves` holds.
///
/// Earlier candidates win ties.
fn best_move_for(
    node: &NodeId,
    positions: &PositionMap,
    segments: &[Segment],
    options: &LayoutOptions,
    resolves: impl Fn(&PositionMap) -> bool,
) -> Option<Move> {
    let source = *positions.get(node)?;
    let mut trial = positions.clone();
    let mut best: Option<Move> = None;

    for candidate in list_nudge_candidates(source, options) {
        trial.insert(node.clone(), candidate);
        if !resolves(&trial) {
            continue;
        }

        let score = score_visual_conflicts(segments, &trial);
        if best.as_ref().is_none_or(|current| score < current.score) {
            best = Some(Move {
                node: node.clone(),
                position: candidate,
                score,
            });
        }
    }

    best
}

/// Picks the best move over several nodes; ties go to the smallest id.
fn best_move_among(
    movers: &[&NodeId],
    positions: &PositionMap,
    segments: &[Segment],
    options: &LayoutOptions,
    resolves: impl Fn(&PositionMap) -> bool,
) -> Option<Move> {
    let mut movers = movers.to_vec();
    movers.sort();
    movers.dedup();

    movers
        .into_iter()
        .filter_map(|node| best_move_for(node, positions, segments, options, &resolves))
        .fold(None, |best: Option<Move>, candidate| match best {
            Some(best) if best.score <= candidate.score => Some(best),
            _ => Some(candidate),
        })
}

/// Uncrosses the first crossing pair by moving one of its endpoints.
fn fix_crossing(
    positions: &PositionMap,
    segments: &[Segment],
    options: &LayoutOptions,
) -> Option<Move> {
    let (first, second) = segments.iter().enumerate().find_map(|(idx, first)| {
        segments[idx + 1..]
            .iter()
            .find(|second| segment_pair_crosses(first, second, positions))
            .map(|second| (first, second))
    })?;

    trace!(first:% = first.id(), second:% = second.id(); "Targeting crossing");
    let movers = [first.node_a(), first.node_b(), second.node_a(), second.node_b()];
    best_move_among(&movers, positions, segments, options, |trial| {
        !segment_pair_crosses(first, second, trial)
    })
}

/// Moves the first node found lying on a segment it does not terminate.
fn fix_overlap(
    positions: &PositionMap,
    segments: &[Segment],
    options: &LayoutOptions,
) -> Option<Move> {
    let (node, segment) = first_node_conflict(positions, segments, node_overlaps_segment)?;

    trace!(node:% = node, segment:% = segment.id(); "Targeting overlap");
    best_move_for(node, positions, segments, options, |trial| {
        !node_overlaps_segment(node, segment, trial)
    })
}

/// Restores clearance for the first violating node by moving it or the segment.
fn fix_clearance(
    positions: &PositionMap,
    segments: &[Segment],
    options: &LayoutOptions,
) -> Option<Move> {
    let (node, segment) = first_node_conflict(positions, segments, node_violates_clearance)?;

    trace!(node:% = node, segment:% = segment.id(); "Targeting clearance violation");
    let movers = [node, segment.node_a(), segment.node_b()];
    best_move_among(&movers, positions, segments, options, |trial| {
        !node_violates_clearance(node, segment, trial)
    })
}

/// First (node, segment) pair satisfying `conflict`, nodes in id order then segments in id order.
fn first_node_conflict<'a>(
    positions: &'a PositionMap,
    segments: &'a [Segment],
    conflict: fn(&NodeId, &Segment, &PositionMap) -> bool,
) -> Option<(&'a NodeId, &'a Segment)> {
    positions.keys().find_map(|node| {
        segments
            .iter()
            .find(|segment| conflict(node, segment, positions))
            .map(|segment| (node, segment))
    })
}

#[cfg(test)]
mod tests {
    use wirenet_core::geometry::Size;

    use super::*;
    use crate::layout::scoring::ConflictRank;

    fn rank_of(positions: &PositionMap, segments: &[Segment]) -> ConflictRank {
        visual_conflict_rank(segments, positions)
    }

    fn positions(entries: &[(&str, f64, f64)]) -> PositionMap {
        entries
            .iter()
            .map(|(id, x, y)| (NodeId::new(*id), Point::new(*x, *y)))
            .collect()
    }

    #[test]
    fn test_crossing_is_removed() {
        let segments = vec![Segment::new("S1", "A", "C"), Segment::new("S2", "B", "D")];
        let initial = positions(&[
            ("A", 200.0, 200.0),
            ("B", 260.0, 200.0),
            ("C", 260.0, 260.0),
            ("D", 200.0, 260.0),
        ]);
        assert_eq!(rank_of(&initial, &segments).crossings(), 1);

        let resolved = resolve_visual_overlaps(&initial, &segments, &LayoutOptions::default());
        let rank = rank_of(&resolved, &segments);
        assert!(rank.is_better_than(&rank_of(&initial, &segments)));
        assert_eq!(rank.crossings(), 0);
    }

    #[test]
    fn test_overlap_is_removed() {
        let segments = vec![Segment::new("S1", "Y", "Z")];
        let initial = positions(&[("X", 200.0, 100.0), ("Y", 100.0, 100.0), ("Z", 300.0, 100.0)]);

        let resolved = resolve_visual_overlaps(&initial, &segments, &LayoutOptions::default());
        let rank = rank_of(&resolved, &segments);
        assert_eq!(rank.node_overlaps(), 0);
        assert_eq!(rank.clearance_violations(), 0);
    }

    #[test]
    fn test_clean_layout_is_unchanged() {
        let segments = vec![Segment::new("S1", "A", "B"), Segment::new("S2", "B", "C")];
        let initial = positions(&[("A", 100.0, 100.0), ("B", 200.0, 100.0), ("C", 200.0, 200.0)]);

        let resolved = resolve_visual_overlaps(&initial, &segments, &LayoutOptions::default());
        assert_eq!(resolved, initial);
    }

    #[test]
    fn test_input_map_is_not_mutated() {
        let segments = vec![Segment::new("S1", "Y", "Z")];
        let initial = positions(&[("X", 200.0, 100.0), ("Y", 100.0, 100.0), ("Z", 300.0, 100.0)]);
        let snapshot = initial.clone();

        let _ = resolve_visual_overlaps(&initial, &segments, &LayoutOptions::default());
        assert_eq!(initial, snapshot);
    }

    #[test]
    fn test_unplaced_endpoints_are_tolerated() {
        let segments = vec![Segment::new("S1", "A", "GHOST")];
        let initial = positions(&[("A", 100.0, 100.0)]);

        let resolved = resolve_visual_overlaps(&initial, &segments, &LayoutOptions::default());
        assert_eq!(resolved, initial);
    }

    #[test]
    fn test_fingerprint_is_ordered_by_id() {
        let state = positions(&[("B", 2.0, 3.0), ("A", 0.5, 1.0)]);
        assert_eq!(fingerprint(&state), "A:0.5,1;B:2,3;");
    }

    #[test]
    fn test_best_move_among_breaks_ties_by_id() {
        // Two isolated nodes with no segments: every candidate scores zero.
        let state = positions(&[("B", 200.0, 200.0), ("A", 400.0, 200.0)]);
        let (a, b) = (NodeId::new("A"), NodeId::new("B"));

        let options = LayoutOptions::default();

        let chosen = best_move_among(&[&b, &a], &state, &[], &options, |_| true).unwrap();
        assert_eq!(chosen.node, a);
        assert_eq!(chosen.position, Point::new(412.0, 200.0));
        assert_eq!(chosen.score, 0);
    }

    #[test]
    fn test_clearance_moves_the_violating_node() {
        let segments = vec![Segment::new("S1", "Y", "Z")];
        let initial = positions(&[("X", 200.0, 110.0), ("Y", 100.0, 100.0), ("Z", 300.0, 100.0)]);
        let options = LayoutOptions::default();
        let x = NodeId::new("X");

        // Horizontal nudges stay within clearance; the first vertical one clears it
        let chosen = fix_clearance(&initial, &segments, &options).unwrap();
        assert_eq!(chosen.node, x);
        assert_eq!(chosen.position, Point::new(200.0, 122.0));
        assert_eq!(chosen.score, 0);

        let resolved = resolve_visual_overlaps(&initial, &segments, &options);
        assert_eq!(resolved.get(&x), Some(&Point::new(200.0, 122.0)));
        assert_eq!(resolved.get(&NodeId::new("Y")), initial.get(&NodeId::new("Y")));
        assert_eq!(resolved.get(&NodeId::new("Z")), initial.get(&NodeId::new("Z")));
        assert!(rank_of(&resolved, &segments).is_clean());
    }

    #[test]
    fn test_clearance_moves_segment_endpoint_when_node_is_pinned() {
        // Placement bounds are y in [20, 40]; every position X can reach stays
        // within clearance of the segment at y = 38.
        let options = LayoutOptions::default().with_viewport(Size::new(400.0, 60.0));
        let segments = vec![Segment::new("S1", "Y", "Z")];
        let initial = positions(&[("X", 20.0, 20.0), ("Y", 0.0, 38.0), ("Z", 400.0, 38.0)]);
        let x = NodeId::new("X");

        assert!(
            list_nudge_candidates(Point::new(20.0, 20.0), &options)
                .into_iter()
                .all(|candidate| {
                    let mut trial = initial.clone();
                    trial.insert(x.clone(), candidate);
                    node_violates_clearance(&x, &segments[0], &trial)
                })
        );

        let chosen = fix_clearance(&initial, &segments, &options).unwrap();
        assert_ne!(chosen.node, x);
        assert!(segments[0].has_endpoint(&chosen.node));

        let mut trial = initial.clone();
        trial.insert(chosen.node, chosen.position);
        assert!(!node_violates_clearance(&x, &segments[0], &trial));
    }

    #[test]
    fn test_crossing_is_fixed_before_overlap() {
        let segments = vec![
            Segment::new("S1", "A", "C"),
            Segment::new("S2", "B", "D"),
            Segment::new("S3", "Y", "Z"),
        ];
        let state = positions(&[
            ("A", 200.0, 200.0),
            ("B", 260.0, 200.0),
            ("C", 260.0, 260.0),
            ("D", 200.0, 260.0),
            ("X", 500.0, 100.0),
            ("Y", 400.0, 100.0),
            ("Z", 600.0, 100.0),
        ]);
        let rank = rank_of(&state, &segments);
        assert_eq!(rank.crossings(), 1);
        assert_eq!(rank.node_overlaps(), 1);

        let chosen = next_move(&state, &segments, &LayoutOptions::default()).unwrap();
        assert!(["A", "B", "C", "D"].contains(&chosen.node.as_str()));
    }

    #[test]
    fn test_search_stops_on_repeated_state_and_returns_best() {
        let segments = vec![Segment::new("S1", "Y", "Z")];
        let initial = positions(&[("X", 200.0, 100.0), ("Y", 100.0, 100.0), ("Z", 300.0, 100.0)]);
        let x = NodeId::new("X");
        let on_segment = Point::new(200.0, 100.0);
        let clear = Point::new(200.0, 140.0);

        // Alternate X between an overlapping and a clean position
        let mut calls = 0;
        let resolved = search(&initial, &segments, |current| {
            calls += 1;
            let position = if current.get(&x) == Some(&on_segment) {
                clear
            } else {
                on_segment
            };
            Some(Move {
                node: x.clone(),
                position,
                score: 0,
            })
        });

        assert_eq!(calls, 2);
        assert_eq!(resolved.get(&x), Some(&clear));
        assert!(rank_of(&resolved, &segments).is_clean());
    }
}
