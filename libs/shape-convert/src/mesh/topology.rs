//! # Mesh Topology
//!
//! Edge-to-face lookup, dihedral angles between adjacent triangles, and the
//! grouping of triangles into coplanar facets.
//!
//! Mesh libraries usually hand over facets and face adjacency alongside the
//! triangles. When either is missing it is derived here from the vertex
//! geometry:
//!
//! - adjacency from undirected edges shared by two triangles
//! - angles from the triangle normals
//! - facets by joining adjacent triangles whose angle is below
//!   [`FACET_ANGLE_TOLERANCE`]; only groups of two or more triangles count
//!
//! Triangles with repeated or out-of-range indices never take part.

use std::collections::{HashMap, HashSet};

use config::constants::FACET_ANGLE_TOLERANCE;

use crate::source::IndexedMesh;

/// Undirected edge key, smaller vertex index first.
pub type EdgeKey = (u32, u32);

#[inline]
pub fn edge_key(a: u32, b: u32) -> EdgeKey {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[inline]
fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Connectivity and facet grouping of one mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshTopology {
    /// Undirected edge to the valid triangles using it
    edge_faces: HashMap<EdgeKey, Vec<usize>>,
    /// Dihedral angle per adjacent triangle pair, smaller index first
    angles: HashMap<(usize, usize), f64>,
    /// Facets as lists of triangle indices, ordered by first triangle
    facets: Vec<Vec<usize>>,
    /// Facet index per triangle
    facet_of: Vec<Option<usize>>,
    /// Valid triangle indices in mesh order
    valid: Vec<usize>,
}

impl MeshTopology {
    /// Builds the topology of a mesh, using its facets and adjacency when
    /// supplied. Supplied angles for triangles that share no edge are ignored.
    pub fn build(mesh: &IndexedMesh) -> Self {
        let valid: Vec<usize> = mesh.valid_triangles().map(|(i, _)| i).collect();

        let mut edge_faces: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        for (index, [a, b, c]) in mesh.valid_triangles() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                edge_faces.entry(edge_key(u, v)).or_default().push(index);
            }
        }

        let mut angles: HashMap<(usize, usize), f64> = HashMap::new();
        for faces in edge_faces.values() {
            for (i, &f0) in faces.iter().enumerate() {
                for &f1 in &faces[i + 1..] {
                    angles
                        .entry(pair_key(f0, f1))
                        .or_insert_with(|| dihedral_angle(mesh, f0, f1));
                }
            }
        }
        if let Some(adjacency) = &mesh.adjacency {
            for record in adjacency {
                let [a, b] = record.faces;
                if let Some(angle) = angles.get_mut(&pair_key(a as usize, b as usize)) {
                    *angle = record.angle;
                }
            }
        }

        let mut topology = Self {
            edge_faces,
            angles,
            facets: Vec::new(),
            facet_of: vec![None; mesh.triangle_count()],
            valid,
        };

        match &mesh.facets {
            Some(facets) => topology.assign_supplied_facets(mesh, facets),
            None => topology.derive_facets(),
        }
        topology
    }

    fn assign_supplied_facets(&mut self, mesh: &IndexedMesh, facets: &[Vec<u32>]) {
        for facet in facets {
            let mut seen = HashSet::new();
            let members: Vec<usize> = facet
                .iter()
                .map(|&t| t as usize)
                .filter(|&t| {
                    t < mesh.triangle_count()
                        && self.facet_of[t].is_none()
                        && mesh.is_valid_triangle(mesh.triangles[t])
                        && seen.insert(t)
                })
                .collect();
            self.push_facet(members);
        }
    }

    fn derive_facets(&mut self) {
        let mut sets = DisjointSets::new(self.facet_of.len());
        for (&(a, b), &angle) in &self.angles {
            if angle < FACET_ANGLE_TOLERANCE {
                sets.union(a, b);
            }
        }

        let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for &t in &self.valid {
            let root = sets.find(t);
            let members = by_root.entry(root).or_default();
            if members.is_empty() {
                roots.push(root);
            }
            members.push(t);
        }
        for root in roots {
            if let Some(members) = by_root.remove(&root) {
                if members.len() >= 2 {
                    self.push_facet(members);
                }
            }
        }
    }

    fn push_facet(&mut self, members: Vec<usize>) {
        if members.is_empty() {
            return;
        }
        let id = self.facets.len();
        for &t in &members {
            self.facet_of[t] = Some(id);
        }
        self.facets.push(members);
    }

    /// Valid triangles using an undirected edge.
    pub fn faces_for_edge(&self, a: u32, b: u32) -> &[usize] {
        self.edge_faces
            .get(&edge_key(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Dihedral angle between two adjacent triangles.
    pub fn angle(&self, a: usize, b: usize) -> Option<f64> {
        self.angles.get(&pair_key(a, b)).copied()
    }

    /// Facet a triangle belongs to, if any.
    pub fn facet_of(&self, triangle: usize) -> Option<usize> {
        self.facet_of.get(triangle).copied().flatten()
    }

    /// Facets as triangle index lists.
    pub fn facets(&self) -> &[Vec<usize>] {
        &self.facets
    }

    /// Number of unordered adjacent triangle pairs.
    pub fn adjacency_count(&self) -> usize {
        self.angles.len()
    }

    /// Triangle groups to outline: every facet, then every valid triangle
    /// outside a facet on its own.
    pub fn groups(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        self.facets.iter().cloned().chain(
            self.valid
                .iter()
                .filter(|&&t| self.facet_of[t].is_none())
                .map(|&t| vec![t]),
        )
    }
}

/// Angle between the planes of two triangles, in radians.
///
/// Zero for coplanar triangles with consistent winding.
pub fn dihedral_angle(mesh: &IndexedMesh, a: usize, b: usize) -> f64 {
    let n0 = mesh.face_normal(mesh.triangles[a]).normalize_or_zero();
    let n1 = mesh.face_normal(mesh.triangles[b]).normalize_or_zero();
    n0.dot(n1).clamp(-1.0, 1.0).acos()
}

/// Union-find over triangle indices.
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }
}
