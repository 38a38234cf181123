//! Layered placement of a whole network.
//!
//! The network is split into connected components. Each component receives a
//! layered (hierarchical) drawing: breadth-first layers from a root node,
//! barycenter sweeps to reduce crossings between adjacent layers, then fixed
//! spacing per layer and per rank. Components are packed into rows, and the
//! packed drawing is scaled down (never up) and centered in the viewport.
//!
//! Every ordering decision is made on sorted node ids, so identical inputs
//! always give bit-identical output.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use log::{debug, trace};

use wirenet_core::{
    geometry::{Bounds, Point, Size},
    identifier::NodeId,
};

use crate::{
    config::LayoutOptions,
    layout::{PositionMap, postprocess},
    network::Segment,
};

/// Horizontal distance between two consecutive layers of a component.
pub const LAYER_SPACING: f64 = 120.0;

/// Vertical distance between two consecutive nodes of a layer.
pub const RANK_SPACING: f64 = 96.0;

/// Padding around the nodes of one component.
pub const LOCAL_PADDING: f64 = 24.0;

/// Outer padding of the packed canvas.
pub const CANVAS_PADDING: f64 = 32.0;

/// Horizontal and vertical gap between packed components.
pub const COMPONENT_GAP: f64 = 72.0;

/// Margin kept free on each side when fitting the drawing to the viewport.
pub const FIT_PADDING: f64 = 24.0;

/// Number of alternating barycenter sweeps.
const CROSSING_REDUCTION_SWEEPS: usize = 4;

type Adjacency = BTreeMap<NodeId, BTreeSet<NodeId>>;

/// Layout of one component in its own coordinate frame.
#[derive(Debug, Default)]
struct LocalLayout {
    positions: Vec<(NodeId, Point)>,
    size: Size,
}

/// Computes positions for every node, refined by conflict resolution.
///
/// This is a total function: it never fails and every distinct input node
/// appears in the result. Segments that form a self-loop or reference an
/// unknown node are ignored.
///
/// # Examples
///
/// ```
/// use wirenet::{
///     config::LayoutOptions,
///     layout::generation::create_node_position_map,
///     network::Segment,
/// };
/// use wirenet_core::identifier::NodeId;
///
/// let nodes: Vec<NodeId> = ["A", "B", "C"].into_iter().map(NodeId::from).collect();
/// let segments = vec![Segment::new("S1", "A", "B")];
///
/// let positions = create_node_position_map(&nodes, &segments, &LayoutOptions::default());
/// assert_eq!(positions.len(), 3);
/// ```
pub fn create_node_position_map(
    nodes: &[NodeId],
    segments: &[Segment],
    options: &LayoutOptions,
) -> PositionMap {
    let node_set: BTreeSet<&NodeId> = nodes.iter().collect();
    let valid: Vec<Segment> = segments
        .iter()
        .filter(|segment| is_valid_segment(segment, &node_set))
        .cloned()
        .collect();

    let initial = place_layered(nodes, &valid, options);
    postprocess::resolve_visual_overlaps(&initial, &valid, options)
}

/// Computes the layered placement without conflict resolution.
pub fn place_layered(
    nodes: &[NodeId],
    segments: &[Segment],
    options: &LayoutOptions,
) -> PositionMap {
    let adjacency = build_adjacency(nodes, segments);
    let components = connected_components(&adjacency);
    debug!(
        nodes_len = adjacency.len(),
        components_len = components.len();
        "Decomposed network into connected components"
    );

    let locals: Vec<LocalLayout> = components
        .iter()
        .map(|component| local_layered_layout(component, &adjacency))
        .collect();

    let packed = pack_components(locals, options.viewport());
    fit_to_viewport(packed, options)
}

fn is_valid_segment(segment: &Segment, nodes: &BTreeSet<&NodeId>) -> bool {
    !segment.is_self_loop() && nodes.contains(segment.node_a()) && nodes.contains(segment.node_b())
}

/// Undirected adjacency with every node present, even when isolated.
fn build_adjacency(nodes: &[NodeId], segments: &[Segment]) -> Adjacency {
    let mut adjacency: Adjacency = nodes.iter().map(|id| (id.clone(), BTreeSet::new())).collect();

    for segment in segments {
        if segment.is_self_loop()
            || !adjacency.contains_key(segment.node_a())
            || !adjacency.contains_key(segment.node_b())
        {
            debug!(segment_id:% = segment.id(); "Ignoring segment outside the node set");
            continue;
        }
        if let Some(neighbors) = adjacency.get_mut(segment.node_a()) {
            neighbors.insert(segment.node_b().clone());
        }
        if let Some(neighbors) = adjacency.get_mut(segment.node_b()) {
            neighbors.insert(segment.node_a().clone());
        }
    }

    adjacency
}

/// Splits the graph into connected components using an explicit stack.
///
/// Each component is sorted; components are ordered by their smallest id.
fn connected_components(adjacency: &Adjacency) -> Vec<Vec<NodeId>> {
    let mut visited: BTreeSet<&NodeId> = BTreeSet::new();
    let mut components = Vec::new();

    for start in adjacency.keys() {
        if !visited.insert(start) {
            continue;
        }

        let mut component = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            component.push(node.clone());
            for neighbor in adjacency.get(node).into_iter().flatten() {
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        component.sort();
        components.push(component);
    }

    components.sort_by(|a, b| a.first().cmp(&b.first()));
    components
}

/// Layered drawing of a single component.
fn local_layered_layout(component: &[NodeId], adjacency: &Adjacency) -> LocalLayout {
    match component {
        [] => LocalLayout::default(),
        [single] => LocalLayout {
            positions: vec![(single.clone(), Point::new(LOCAL_PADDING, LOCAL_PADDING))],
            size: Size::new(2.0 * LOCAL_PADDING, 2.0 * LOCAL_PADDING),
        },
        _ => {
            let mut layers = assign_layers(component, adjacency);
            reduce_crossings(&mut layers, adjacency);
            assign_coordinates(&layers)
        }
    }
}

fn degree(node: &NodeId, adjacency: &Adjacency) -> usize {
    adjacency.get(node).map_or(0, BTreeSet::len)
}

/// Breadth-first layers from the highest-degree node (smallest id on ties).
fn assign_layers(component: &[NodeId], adjacency: &Adjacency) -> Vec<Vec<NodeId>> {
    let mut root = &component[0];
    for node in &component[1..] {
        let (node_degree, root_degree) = (degree(node, adjacency), degree(root, adjacency));
        if node_degree > root_degree || (node_degree == root_degree && node < root) {
            root = node;
        }
    }

    let members: BTreeSet<&NodeId> = component.iter().collect();
    let mut layer_of: HashMap<&NodeId, usize> = HashMap::new();
    let mut layers: Vec<Vec<NodeId>> = Vec::new();
    let mut queue = VecDeque::new();

    layer_of.insert(root, 0);
    queue.push_back(root);
    while let Some(node) = queue.pop_front() {
        let layer = layer_of[node];
        if layers.len() <= layer {
            layers.resize_with(layer + 1, Vec::new);
        }
        layers[layer].push(node.clone());

        for neighbor in adjacency.get(node).into_iter().flatten() {
            if members.contains(neighbor) && !layer_of.contains_key(neighbor) {
                layer_of.insert(neighbor, layer + 1);
                queue.push_back(neighbor);
            }
        }
    }

    let unreachable: Vec<NodeId> = component
        .iter()
        .filter(|node| !layer_of.contains_key(node))
        .cloned()
        .collect();
    if !unreachable.is_empty() {
        debug!(unreachable_len = unreachable.len(); "Appending nodes unreachable from the root");
        layers.push(unreachable);
    }

    for layer in &mut layers {
        layer.sort();
    }
    trace!(root:% = root, layers_len = layers.len(); "Assigned layers");
    layers
}

/// Alternating forward and backward barycenter sweeps.
fn reduce_crossings(layers: &mut [Vec<NodeId>], adjacency: &Adjacency) {
    if layers.len() < 2 {
        return;
    }

    for sweep in 0..CROSSING_REDUCTION_SWEEPS {
        if sweep % 2 == 0 {
            for idx in 1..layers.len() {
                let (before, after) = layers.split_at_mut(idx);
                order_by_barycenter(&mut after[0], &before[idx - 1], adjacency);
            }
        } else {
            for idx in (0..layers.len() - 1).rev() {
                let (before, after) = layers.split_at_mut(idx + 1);
                order_by_barycenter(&mut before[idx], &after[0], adjacency);
            }
        }
    }
}

/// Sorts `layer` by the mean index of each node's neighbors in `reference`.
///
/// Nodes without a neighbor in `reference` sort last; ties go to the smaller id.
fn order_by_barycenter(layer: &mut [NodeId], reference: &[NodeId], adjacency: &Adjacency) {
    let index_of: HashMap<&NodeId, usize> = reference
        .iter()
        .enumerate()
        .map(|(idx, node)| (node, idx))
        .collect();

    let barycenter = |node: &NodeId| -> f64 {
        let indices: Vec<usize> = adjacency
            .get(node)
            .into_iter()
            .flatten()
            .filter_map(|neighbor| index_of.get(neighbor).copied())
            .collect();
        if indices.is_empty() {
            f64::INFINITY
        } else {
            indices.iter().sum::<usize>() as f64 / indices.len() as f64
        }
    };

    let mut keyed: Vec<(f64, NodeId)> = layer
        .iter()
        .map(|node| (barycenter(node), node.clone()))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    for (slot, (_, node)) in layer.iter_mut().zip(keyed) {
        *slot = node;
    }
}

/// Fixed spacing per layer and rank, each layer centered on the tallest one.
fn assign_coordinates(layers: &[Vec<NodeId>]) -> LocalLayout {
    let tallest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let mut positions = Vec::new();

    for (layer_idx, layer) in layers.iter().enumerate() {
        let offset = (tallest - layer.len()) as f64 / 2.0;
        let x = layer_idx as f64 * LAYER_SPACING + LOCAL_PADDING;
        for (rank, node) in layer.iter().enumerate() {
            let y = (rank as f64 + offset) * RANK_SPACING + LOCAL_PADDING;
            positions.push((node.clone(), Point::new(x, y)));
        }
    }

    let width = layers.len().saturating_sub(1) as f64 * LAYER_SPACING + 2.0 * LOCAL_PADDING;
    let height = tallest.saturating_sub(1) as f64 * RANK_SPACING + 2.0 * LOCAL_PADDING;
    LocalLayout {
        positions,
        size: Size::new(width, height),
    }
}

/// Places component layouts left-to-right in rows, wrapping at the viewport width.
fn pack_components(locals: Vec<LocalLayout>, viewport: Size) -> PositionMap {
    let row_limit = viewport.width() - CANVAS_PADDING;
    let mut cursor = Point::new(CANVAS_PADDING, CANVAS_PADDING);
    let mut row_height: f64 = 0.0;
    let mut positions = PositionMap::new();

    for local in locals {
        let size = local.size;
        if cursor.x() > CANVAS_PADDING && cursor.x() + size.width() > row_limit {
            cursor = Point::new(CANVAS_PADDING, cursor.y() + row_height + COMPONENT_GAP);
            row_height = 0.0;
        }

        for (node, point) in local.positions {
            positions.insert(node, point.add_point(cursor));
        }

        cursor = Point::new(cursor.x() + size.width() + COMPONENT_GAP, cursor.y());
        row_height = row_height.max(size.height());
    }

    positions
}

/// Scales the drawing down to fit the viewport, centers it, then snaps and clamps.
fn fit_to_viewport(positions: PositionMap, options: &LayoutOptions) -> PositionMap {
    let Some(bounds) = Bounds::from_points(positions.values().copied()) else {
        return positions;
    };

    let viewport = options.viewport();
    let content = Size::new(bounds.width().max(1.0), bounds.height().max(1.0));
    let max_width = (viewport.width() - 2.0 * FIT_PADDING).max(1.0);
    let max_height = (viewport.height() - 2.0 * FIT_PADDING).max(1.0);
    let fit_scale = 1.0_f64
        .min(max_width / content.width())
        .min(max_height / content.height());

    let scaled = content.scale(fit_scale);
    let offset = Point::new(
        (viewport.width() - scaled.width()) / 2.0,
        (viewport.height() - scaled.height()) / 2.0,
    );
    debug!(
        fit_scale,
        content_width = content.width(),
        content_height = content.height();
        "Fitting layout to viewport"
    );

    positions
        .into_iter()
        .map(|(node, point)| {
            let fitted = point
                .sub_point(bounds.min_point())
                .scale(fit_scale)
                .add_point(offset);
            (node, options.normalize_point(fitted))
        })
        .collect()
}
