//! # Mesh Boundary Tracer
//!
//! Reconstructs the outline of each coplanar facet of a triangle mesh, so a
//! faceted surface can be drawn with crisp edges instead of every internal
//! triangulation edge (6 squares for a cube, not 12 triangles).
//!
//! ## Algorithm
//!
//! For each facet, and for each triangle outside any facet:
//!
//! 1. Collect the directed triangle edges not shared with another triangle
//!    of the same group. Edges whose dihedral angle to the neighboring
//!    triangle is below `min_edge_angle` are dropped here. An edge inside
//!    the group whose angle exceeds both `min_edge_angle` and the facet
//!    tolerance is a hard boundary and is kept from both sides.
//! 2. Store the edges in an arena indexed by start vertex. Take the first
//!    unused edge, then keep following an unused edge starting where the
//!    chain ends, until the chain returns to its start or runs out.
//! 3. Open fragments left over by dropped edges are reassembled with
//!    [`merge_fragments`].
//!
//! A two-vertex loop is degenerate and comes out as an open line segment.


use std::collections::{HashMap, HashSet};

use config::constants::{FACET_ANGLE_TOLERANCE, MIN_RING_POINTS};

use super::topology::MeshTopology;
use crate::source::IndexedMesh;

/// An ordered run of vertex indices along a facet outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Vertex indices; a closed chain does not repeat its first vertex
    pub vertices: Vec<u32>,
    /// Whether the last vertex connects back to the first
    pub closed: bool,
}

impl Chain {
    /// Creates an open chain.
    pub fn open(vertices: Vec<u32>) -> Self {
        Self {
            vertices,
            closed: false,
        }
    }

    /// Creates a closed chain.
    pub fn closed(vertices: Vec<u32>) -> Self {
        Self {
            vertices,
            closed: true,
        }
    }

    /// Builds a chain from a walk over edges. A walk ending where it started
    /// is closed, unless fewer than three distinct vertices remain.
    fn from_walk(mut vertices: Vec<u32>) -> Self {
        if vertices.len() > 2 && vertices.first() == vertices.last() {
            vertices.pop();
            if vertices.len() >= MIN_RING_POINTS {
                return Self::closed(vertices);
            }
        }
        Self::open(vertices)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Directed edges along the chain, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let closing = match (self.closed, self.vertices.first(), self.vertices.last()) {
            (true, Some(&first), Some(&last)) => Some((last, first)),
            _ => None,
        };
        self.vertices
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

/// The traced outline of one facet or stand-alone triangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetBoundary {
    /// Triangle indices of the group
    pub triangles: Vec<usize>,
    /// Outline chains; empty if every edge was dropped
    pub chains: Vec<Chain>,
}

/// Traces the outline chains of every facet and stand-alone triangle.
pub fn trace_boundaries(
    mesh: &IndexedMesh,
    topology: &MeshTopology,
    min_edge_angle: f64,
) -> Vec<FacetBoundary> {
    let mut excluded = 0usize;
    let boundaries: Vec<FacetBoundary> = topology
        .groups()
        .map(|triangles| {
            let (edges, dropped) = boundary_edges(mesh, topology, &triangles, min_edge_angle);
            excluded += dropped;

            let (closed, open): (Vec<Chain>, Vec<Chain>) =
                chain_edges(&edges).into_iter().partition(|c| c.closed);
            let mut chains = closed;
            chains.extend(merge_fragments(open));
            FacetBoundary { triangles, chains }
        })
        .collect();

    tracing::debug!(
        groups = boundaries.len(),
        facets = topology.facets().len(),
        chains = boundaries.iter().map(|b| b.chains.len()).sum::<usize>(),
        excluded,
        "traced mesh boundaries"
    );
    boundaries
}

/// Directed rim edges of a triangle group and the number of edges dropped
/// for being flatter than `min_edge_angle`.
fn boundary_edges(
    mesh: &IndexedMesh,
    topology: &MeshTopology,
    group: &[usize],
    min_edge_angle: f64,
) -> (Vec<(u32, u32)>, usize) {
    let members: HashSet<usize> = group.iter().copied().collect();
    let hard_angle = min_edge_angle.max(FACET_ANGLE_TOLERANCE);
    let mut edges = Vec::with_capacity(group.len() * 3);
    let mut dropped = 0;

    for &t in group {
        let [a, b, c] = mesh.triangles[t];
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let neighbors: Vec<usize> = topology
                .faces_for_edge(u, v)
                .iter()
                .copied()
                .filter(|&n| n != t)
                .collect();

            let inner: Vec<usize> = neighbors
                .iter()
                .copied()
                .filter(|n| members.contains(n))
                .collect();
            if !inner.is_empty() {
                let hard = inner.iter().any(|&n| {
                    topology
                        .angle(t, n)
                        .is_some_and(|angle| angle > hard_angle)
                });
                if hard {
                    edges.push((u, v));
                }
                continue;
            }

            let flat = !neighbors.is_empty()
                && neighbors.iter().all(|&n| {
                    topology
                        .angle(t, n)
                        .is_some_and(|angle| angle < min_edge_angle)
                });
            if flat {
                dropped += 1;
                continue;
            }

            edges.push((u, v));
        }
    }
    (edges, dropped)
}

/// Chains directed edges by matching each chain's end to an edge's start.
fn chain_edges(edges: &[(u32, u32)]) -> Vec<Chain> {
    let mut by_start: HashMap<u32, Vec<usize>> = HashMap::new();
    for (index, &(start, _)) in edges.iter().enumerate() {
        by_start.entry(start).or_default().push(index);
    }

    let mut removed = vec![false; edges.len()];
    let mut chains = Vec::new();

    for seed in 0..edges.len() {
        if removed[seed] {
            continue;
        }
        removed[seed] = true;

        let (start, end) = edges[seed];
        let mut walk = vec![start, end];
        let mut tip = end;
        while tip != start {
            let next = by_start
                .get(&tip)
                .and_then(|candidates| candidates.iter().copied().find(|&e| !removed[e]));
            let Some(next) = next else {
                break;
            };
            removed[next] = true;
            tip = edges[next].1;
            walk.push(tip);
        }
        chains.push(Chain::from_walk(walk));
    }
    chains
}

/// Reassembles open fragments split apart by dropped edges.
///
/// A single fragment is kept as is. With two or more, if the first
/// fragment starts where the last one ends, the two are joined (last, then
/// first) into one chain, which closes if it returns to its own start; any
/// fragments in between stay separate open chains.
///
/// ```rust
/// use shape_convert::mesh::tracer::{merge_fragments, Chain};
///
/// let merged = merge_fragments(vec![Chain::open(vec![0, 1, 2]), Chain::open(vec![2, 3, 0])]);
/// assert_eq!(merged, vec![Chain::closed(vec![2, 3, 0, 1])]);
/// ```
pub fn merge_fragments(mut fragments: Vec<Chain>) -> Vec<Chain> {
    if fragments.len() < 2 {
        return fragments;
    }

    let joins = match (
        fragments.first().and_then(|c| c.vertices.first()),
        fragments.last().and_then(|c| c.vertices.last()),
    ) {
        (Some(start), Some(end)) => start == end,
        _ => false,
    };
    if !joins {
        return fragments;
    }

    let first = fragments.remove(0);
    let Some(last) = fragments.pop() else {
        return vec![first];
    };
    let mut walk = last.vertices;
    walk.extend_from_slice(&first.vertices[1..]);

    let mut merged = Vec::with_capacity(fragments.len() + 1);
    merged.push(Chain::from_walk(walk));
    merged.extend(fragments);
    merged
}
