//! Flowchart layout — layering, crossing reduction, coordinates, bounds.
//!
//! DESIGN
//! ======
//! Works on node indices (insertion order in the diagram's node table) so
//! every stage is deterministic. Only edges whose endpoints both resolve take
//! part. Edges closing a cycle in a depth-first walk from the roots are left
//! out of layering, which keeps longest-path layering finite on cyclic input;
//! they still count as neighbors during crossing reduction.

use indexmap::IndexMap;
use tracing::debug;

use super::LaidOut;
use crate::config::LayoutConfig;
use crate::ir::{Diagram, Rect};

/// Barycenter sweep rounds (each is one forward plus one backward pass).
const CROSSING_PASSES: usize = 4;

// =============================================================================
// GRAPH
// =============================================================================

/// Index-based adjacency over resolvable edges.
pub(crate) struct Graph {
    /// `(from, to)` per resolvable edge, in edge order.
    edges: Vec<(usize, usize)>,
    /// Outgoing `(target, edge index)` per node.
    out: Vec<Vec<(usize, usize)>>,
    preds: Vec<Vec<usize>>,
    succs: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Active,
    Done,
}

impl Graph {
    pub(crate) fn build(diagram: &Diagram) -> Self {
        let n = diagram.nodes.len();
        let mut graph = Self {
            edges: Vec::new(),
            out: vec![Vec::new(); n],
            preds: vec![Vec::new(); n],
            succs: vec![Vec::new(); n],
        };
        for edge in &diagram.edges {
            let from = diagram.nodes.get_index_of(&edge.from_id);
            let to = diagram.nodes.get_index_of(&edge.to_id);
            let (Some(u), Some(v)) = (from, to) else {
                debug!(edge = %edge.id, "dangling edge ignored by layout");
                continue;
            };
            graph.out[u].push((v, graph.edges.len()));
            graph.edges.push((u, v));
            graph.preds[v].push(u);
            graph.succs[u].push(v);
        }
        graph
    }

    fn len(&self) -> usize {
        self.preds.len()
    }

    /// Nodes with no incoming edge other than self-loops; the first node when none.
    pub(crate) fn roots(&self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.len()).filter(|&v| self.preds[v].iter().all(|&u| u == v)).collect();
        if roots.is_empty() && self.len() > 0 {
            return vec![0];
        }
        roots
    }

    /// Depth-first walk from `roots`.
    ///
    /// Returns which edges close a cycle and which nodes were reached.
    fn walk(&self, roots: &[usize]) -> (Vec<bool>, Vec<bool>) {
        let mut state = vec![Visit::Unvisited; self.len()];
        let mut back = vec![false; self.edges.len()];

        for &root in roots {
            if state[root] != Visit::Unvisited {
                continue;
            }
            state[root] = Visit::Active;
            let mut stack = vec![(root, 0usize)];
            while let Some(top) = stack.last_mut() {
                let node = top.0;
                if let Some(&(target, edge)) = self.out[node].get(top.1) {
                    top.1 += 1;
                    match state[target] {
                        Visit::Active => back[edge] = true,
                        Visit::Unvisited => {
                            state[target] = Visit::Active;
                            stack.push((target, 0));
                        }
                        Visit::Done => {}
                    }
                } else {
                    state[node] = Visit::Done;
                    stack.pop();
                }
            }
        }

        let reached = state.iter().map(|s| *s != Visit::Unvisited).collect();
        (back, reached)
    }

    /// Longest-path layer per node; unreached nodes stay at layer 0.
    pub(crate) fn assign_layers(&self) -> Vec<usize> {
        let roots = self.roots();
        let (back, reached) = self.walk(&roots);

        let forward: Vec<(usize, usize)> = self
            .edges
            .iter()
            .zip(&back)
            .filter(|((u, _), is_back)| !**is_back && reached[*u])
            .map(|(edge, _)| *edge)
            .collect();

        let mut indegree = vec![0usize; self.len()];
        let mut next: Vec<Vec<usize>> = vec![Vec::new(); self.len()];
        for &(u, v) in &forward {
            indegree[v] += 1;
            next[u].push(v);
        }

        let mut layer = vec![0usize; self.len()];
        let mut queue: std::collections::VecDeque<usize> =
            (0..self.len()).filter(|&v| reached[v] && indegree[v] == 0).collect();
        while let Some(u) = queue.pop_front() {
            for &v in &next[u] {
                layer[v] = layer[v].max(layer[u] + 1);
                indegree[v] -= 1;
                if indegree[v] == 0 {
                    queue.push_back(v);
                }
            }
        }
        layer
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Lay out a flowchart (or any non-sequence diagram).
pub(crate) fn layout_flowchart(mut diagram: Diagram, config: &LayoutConfig) -> LaidOut {
    if diagram.nodes.is_empty() {
        diagram.width = 0.0;
        diagram.height = 0.0;
        return LaidOut::new(diagram, IndexMap::new(), config);
    }

    let graph = Graph::build(&diagram);
    let layer_of = graph.assign_layers();
    let mut layers = group_layers(&layer_of);
    reduce_crossings(&graph, &mut layers);
    place(&mut diagram, &layers, config);
    fit_bounds(&mut diagram);

    debug!(
        nodes = diagram.nodes.len(),
        layers = layers.len(),
        width = diagram.width,
        height = diagram.height,
        "flowchart laid out"
    );
    let layer_map = diagram.nodes.keys().cloned().zip(layer_of).collect();
    LaidOut::new(diagram, layer_map, config)
}

/// Bucket node indices by layer, keeping insertion order inside each layer.
fn group_layers(layer_of: &[usize]) -> Vec<Vec<usize>> {
    let depth = layer_of.iter().max().map_or(0, |m| m + 1);
    let mut layers = vec![Vec::new(); depth];
    for (v, &l) in layer_of.iter().enumerate() {
        layers[l].push(v);
    }
    layers
}

/// Barycenter heuristic: forward sweeps by predecessors, backward by successors.
fn reduce_crossings(graph: &Graph, layers: &mut [Vec<usize>]) {
    let mut pos = vec![0usize; graph.len()];
    for layer in layers.iter() {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }

    for _ in 0..CROSSING_PASSES {
        for layer in layers.iter_mut().skip(1) {
            sort_by_barycenter(layer, &graph.preds, &mut pos);
        }
        let last = layers.len().saturating_sub(1);
        for layer in layers[..last].iter_mut().rev() {
            sort_by_barycenter(layer, &graph.succs, &mut pos);
        }
    }
}

/// Stable-sort `layer` by mean neighbor position; nodes without neighbors keep theirs.
#[allow(clippy::cast_precision_loss)]
fn sort_by_barycenter(layer: &mut [usize], neighbors: &[Vec<usize>], pos: &mut [usize]) {
    let mut keyed: Vec<(f64, usize)> = layer
        .iter()
        .map(|&v| {
            let adjacent = &neighbors[v];
            let key = if adjacent.is_empty() {
                pos[v] as f64
            } else {
                adjacent.iter().map(|&u| pos[u] as f64).sum::<f64>() / adjacent.len() as f64
            };
            (key, v)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (i, (_, v)) in keyed.into_iter().enumerate() {
        layer[i] = v;
        pos[v] = i;
    }
}

/// Assign boxes: layers stack along the flow axis, each centered on the widest.
#[allow(clippy::cast_precision_loss)]
fn place(diagram: &mut Diagram, layers: &[Vec<usize>], config: &LayoutConfig) {
    let direction = diagram.direction;
    let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let last = layers.len().saturating_sub(1);
    let (w, h) = (config.node_width, config.node_height);

    for (l, layer) in layers.iter().enumerate() {
        let rank = if direction.is_reversed() { last - l } else { l };
        let rank = rank as f64;
        let slack = (widest - layer.len()) as f64;

        for (i, &v) in layer.iter().enumerate() {
            let slot = i as f64;
            let (x, y) = if direction.is_horizontal() {
                let offset = slack * (h + config.node_spacing_x) / 2.0;
                (
                    config.start_x + rank * (w + config.node_spacing_y),
                    config.start_y + offset + slot * (h + config.node_spacing_x),
                )
            } else {
                let offset = slack * (w + config.node_spacing_x) / 2.0;
                (
                    config.start_x + offset + slot * (w + config.node_spacing_x),
                    config.start_y + rank * (h + config.node_spacing_y),
                )
            };
            if let Some((_, node)) = diagram.nodes.get_index_mut(v) {
                node.rect = Rect::new(x, y, w, h);
            }
        }
    }
}

/// Width and height of the box covering every node.
fn fit_bounds(diagram: &mut Diagram) {
    let mut rects = diagram.nodes.values().map(crate::ir::Node::rect);
    let Some(first) = rects.next() else {
        return;
    };
    let bounds = rects.fold(first, |acc, r| acc.union(&r));
    diagram.width = bounds.width;
    diagram.height = bounds.height;
}

#[cfg(test)]
#[path = "flowchart_test.rs"]
mod tests;
