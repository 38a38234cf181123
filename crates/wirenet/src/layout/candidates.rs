//! Nudge candidate generation.
//!
//! A nudge candidate is one of a bounded set of nearby positions a single node
//! may be moved to during conflict resolution. Candidates form a star around
//! the source: axis-aligned offsets of one to three steps followed by diagonal
//! offsets of one to four steps.

use wirenet_core::geometry::Point;

use crate::config::LayoutOptions;

/// Step size used when grid snapping is disabled.
pub const FREE_NUDGE_STEP: f64 = 12.0;

/// Largest axis-aligned offset, in steps.
const AXIS_MAGNITUDES: u32 = 3;

/// Largest diagonal offset, in steps.
const DIAGONAL_MAGNITUDES: u32 = 4;

/// Lists nearby positions for `source`, in generation order.
///
/// Every candidate is snapped (when enabled) and clamped into the placement
/// bounds. Candidates equal to the source or to an earlier candidate are
/// dropped, so the result may be shorter than the full star near a border.
///
/// # Examples
///
/// ```
/// use wirenet::{config::LayoutOptions, layout::candidates::list_nudge_candidates};
/// use wirenet_core::geometry::Point;
///
/// let candidates = list_nudge_candidates(Point::new(400.0, 260.0), &LayoutOptions::default());
/// assert_eq!(candidates.len(), 28);
/// assert_eq!(candidates[0], Point::new(412.0, 260.0));
/// ```
pub fn list_nudge_candidates(source: Point, options: &LayoutOptions) -> Vec<Point> {
    let step = if options.snap_to_grid() {
        options.effective_grid_step()
    } else {
        FREE_NUDGE_STEP
    };

    let axis = (1..=AXIS_MAGNITUDES).flat_map(|magnitude| {
        let distance = f64::from(magnitude) * step;
        [
            (distance, 0.0),
            (-distance, 0.0),
            (0.0, distance),
            (0.0, -distance),
        ]
    });
    let diagonal = (1..=DIAGONAL_MAGNITUDES).flat_map(|magnitude| {
        let distance = f64::from(magnitude) * step;
        [
            (distance, distance),
            (distance, -distance),
            (-distance, distance),
            (-distance, -distance),
        ]
    });

    let mut candidates: Vec<Point> = Vec::new();
    for (dx, dy) in axis.chain(diagonal) {
        let candidate = options.normalize_point(source.add_point(Point::new(dx, dy)));
        if candidate != source && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}
