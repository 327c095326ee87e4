//! # Vertex Attributes
//!
//! Normalizes per-vertex position, texture coordinate and color arrays of a
//! source into the flat, per-emitted-vertex arrays the shape builders
//! consume. Triangle soup output repeats shared vertices, so every attribute
//! here is expanded through the triangle index list.

use glam::{DVec2, DVec3};

use crate::color::{uniform_color, Rgba};
use crate::options::ConvertOptions;
use crate::shape::TextureRef;
use crate::source::{IndexedMesh, MeshColors};

/// Color information resolved for one primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorAttachment {
    /// One color per emitted vertex.
    PerVertex(Vec<Rgba>),
    /// One color for the whole primitive.
    Uniform(Rgba),
    /// Nothing usable; the renderer default applies.
    None,
}

/// Resolves colors for an array that should hold one entry per element.
///
/// A matching length wins; otherwise a shared color is used if all entries
/// agree (including the single-entry case).
pub fn resolve_colors(colors: &[Rgba], element_count: usize) -> ColorAttachment {
    if !colors.is_empty() && colors.len() == element_count {
        ColorAttachment::PerVertex(colors.to_vec())
    } else {
        match uniform_color(colors) {
            Some(color) => ColorAttachment::Uniform(color),
            None => ColorAttachment::None,
        }
    }
}

/// Positions of every valid triangle's corners, in triangle order.
pub fn triangle_positions(mesh: &IndexedMesh) -> Vec<DVec3> {
    mesh.valid_triangles()
        .flat_map(|(_, t)| t.map(|i| mesh.vertices[i as usize]))
        .collect()
}

/// Texture coordinates of every valid triangle's corners, with V flipped so
/// the origin moves from the bottom-left to the top-left.
///
/// Returns `None` unless there is exactly one coordinate per vertex.
pub fn triangle_uvs(mesh: &IndexedMesh) -> Option<Vec<DVec2>> {
    let uvs = mesh.uvs.as_ref()?;
    if uvs.len() != mesh.vertex_count() {
        return None;
    }
    Some(
        mesh.valid_triangles()
            .flat_map(|(_, t)| t.map(|i| flip_v(uvs[i as usize])))
            .collect(),
    )
}

#[inline]
fn flip_v(uv: DVec2) -> DVec2 {
    DVec2::new(uv.x, 1.0 - uv.y)
}

/// Resolves mesh colors to the triangle soup's vertex layout.
///
/// Per-vertex colors are expanded through the triangle indices; per-face
/// colors are repeated for the three corners of each triangle.
pub fn triangle_colors(mesh: &IndexedMesh) -> ColorAttachment {
    match &mesh.colors {
        MeshColors::None => ColorAttachment::None,
        MeshColors::Vertex(colors) => match resolve_colors(colors, mesh.vertex_count()) {
            ColorAttachment::PerVertex(colors) => ColorAttachment::PerVertex(
                mesh.valid_triangles()
                    .flat_map(|(_, t)| t.map(|i| colors[i as usize]))
                    .collect(),
            ),
            other => other,
        },
        MeshColors::Face(colors) => match resolve_colors(colors, mesh.triangle_count()) {
            ColorAttachment::PerVertex(colors) => ColorAttachment::PerVertex(
                mesh.valid_triangles()
                    .flat_map(|(index, _)| [colors[index]; 3])
                    .collect(),
            ),
            other => other,
        },
    }
}

/// Texture and coordinates for a mesh's fill layer, if both resolve.
///
/// The texture given in the options overrides the mesh material's.
pub fn resolve_texture(
    mesh: &IndexedMesh,
    options: &ConvertOptions,
) -> Option<(TextureRef, Vec<DVec2>)> {
    let texture = options.texture.clone().or_else(|| mesh.texture.clone())?;
    let uvs = triangle_uvs(mesh)?;
    Some((texture, uvs))
}
