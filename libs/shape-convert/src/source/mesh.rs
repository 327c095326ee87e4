//! # Indexed Mesh Source
//!
//! Triangle meshes as handed over by mesh libraries: vertex positions,
//! triangle indices, and whatever grouping and appearance metadata the
//! library computed.

use glam::{DVec2, DVec3};

use crate::color::Rgba;
use crate::shape::TextureRef;

/// Colors attached to a mesh.
///
/// Arrays whose length matches neither the element count nor one are
/// treated as invalid and ignored, unless every entry holds the same color.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MeshColors {
    /// No color information.
    #[default]
    None,
    /// One color per vertex, or a single color for the whole mesh.
    Vertex(Vec<Rgba>),
    /// One color per triangle, or a single color for the whole mesh.
    Face(Vec<Rgba>),
}

/// Two triangles sharing an edge, with the angle between their planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceAdjacency {
    /// Indices of the two triangles
    pub faces: [u32; 2],
    /// Dihedral angle in radians; zero for coplanar triangles
    pub angle: f64,
}

impl FaceAdjacency {
    /// Creates an adjacency record.
    pub fn new(a: u32, b: u32, angle: f64) -> Self {
        Self {
            faces: [a, b],
            angle,
        }
    }
}

/// An indexed triangle mesh.
///
/// Triangles are assumed manifold (each undirected edge borders at most two
/// triangles). Triangles with repeated or out-of-range indices are skipped
/// by every converter.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use shape_convert::IndexedMesh;
///
/// let mesh = IndexedMesh::new(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0)],
///     vec![[0, 1, 3], [0, 3, 2]],
/// )
/// .with_facets(vec![vec![0, 1]]);
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions
    pub vertices: Vec<DVec3>,
    /// Triangles as vertex index triplets
    pub triangles: Vec<[u32; 3]>,
    /// Coplanar triangle groups (only groups of two or more); derived when absent
    pub facets: Option<Vec<Vec<u32>>>,
    /// Face adjacency with dihedral angles; derived when absent
    pub adjacency: Option<Vec<FaceAdjacency>>,
    /// Vertex or face colors
    pub colors: MeshColors,
    /// Texture coordinates, one per vertex
    pub uvs: Option<Vec<DVec2>>,
    /// Texture the mesh material refers to
    pub texture: Option<TextureRef>,
}

impl IndexedMesh {
    /// Creates a mesh from vertices and triangles.
    pub fn new(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
            ..Self::default()
        }
    }

    /// Sets the facet grouping.
    #[must_use]
    pub fn with_facets(mut self, facets: Vec<Vec<u32>>) -> Self {
        self.facets = Some(facets);
        self
    }

    /// Sets the face adjacency.
    #[must_use]
    pub fn with_adjacency(mut self, adjacency: Vec<FaceAdjacency>) -> Self {
        self.adjacency = Some(adjacency);
        self
    }

    /// Sets per-vertex colors.
    #[must_use]
    pub fn with_vertex_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = MeshColors::Vertex(colors);
        self
    }

    /// Sets per-face colors.
    #[must_use]
    pub fn with_face_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = MeshColors::Face(colors);
        self
    }

    /// Sets texture coordinates.
    #[must_use]
    pub fn with_uvs(mut self, uvs: Vec<DVec2>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Sets the material texture.
    #[must_use]
    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles, valid or not.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True if the triangle has three distinct, in-range vertex indices.
    pub fn is_valid_triangle(&self, triangle: [u32; 3]) -> bool {
        let count = self.vertices.len();
        let [a, b, c] = triangle;
        a != b
            && b != c
            && a != c
            && triangle.iter().all(|&i| (i as usize) < count)
    }

    /// Iterates `(index, triangle)` over valid triangles.
    pub fn valid_triangles(&self) -> impl Iterator<Item = (usize, [u32; 3])> + '_ {
        self.triangles
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, t)| self.is_valid_triangle(*t))
    }

    /// Triangle normal (unnormalized length is twice the area).
    pub(crate) fn face_normal(&self, triangle: [u32; 3]) -> DVec3 {
        let v0 = self.vertices[triangle[0] as usize];
        let v1 = self.vertices[triangle[1] as usize];
        let v2 = self.vertices[triangle[2] as usize];
        (v1 - v0).cross(v2 - v0)
    }
}
