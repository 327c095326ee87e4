//! # Mesh Shape Builder
//!
//! Combines a mesh's triangle soup (the fill layer) with its traced facet
//! outlines (stroke-only primitives) into one Shape.

use crate::attributes::{resolve_texture, triangle_colors, triangle_positions, ColorAttachment};
use crate::options::ConvertOptions;
use crate::shape::{DrawMode, Paint, Primitive, Shape};
use crate::source::IndexedMesh;

use super::tracer::{Chain, FacetBoundary};

/// Builds the filled triangle soup of a mesh.
///
/// Every valid triangle contributes its three corners in order. A texture
/// takes priority over colors; either one disables the primitive's stroke.
pub fn fill_layer(mesh: &IndexedMesh, options: &ConvertOptions) -> Primitive {
    let fill = Primitive::new(DrawMode::Triangles).with_vertices(triangle_positions(mesh));

    let fill = match resolve_texture(mesh, options) {
        Some((texture, uvs)) => fill.with_texture(texture).with_uvs(uvs).no_stroke(),
        None => match triangle_colors(mesh) {
            ColorAttachment::PerVertex(colors) => fill.with_fill_colors(colors).no_stroke(),
            ColorAttachment::Uniform(color) => fill.with_fill(Paint::Color(color)).no_stroke(),
            ColorAttachment::None => fill,
        },
    };

    // Outlines come from the traced edges instead
    if options.facet_edges {
        fill.no_stroke()
    } else {
        fill
    }
}

/// Converts one traced chain into a stroke-only primitive.
pub fn chain_primitive(mesh: &IndexedMesh, chain: &Chain) -> Primitive {
    let points = chain
        .vertices
        .iter()
        .filter_map(|&i| mesh.vertices.get(i as usize).copied())
        .collect();

    match (chain.closed, chain.len()) {
        (true, _) => Primitive::new(DrawMode::ClosedPath)
            .with_vertices(points)
            .no_fill(),
        (false, 2) => Primitive::new(DrawMode::Lines).with_vertices(points),
        (false, _) => Primitive::new(DrawMode::OpenPath)
            .with_vertices(points)
            .no_fill(),
    }
}

/// Groups the fill layer with one outline primitive per chain.
pub fn build_mesh_shape(
    mesh: &IndexedMesh,
    boundaries: &[FacetBoundary],
    options: &ConvertOptions,
) -> Shape {
    let mut children = vec![Shape::primitive(fill_layer(mesh, options))];
    children.extend(
        boundaries
            .iter()
            .flat_map(|b| &b.chains)
            .map(|chain| Shape::primitive(chain_primitive(mesh, chain))),
    );
    Shape::group(children)
}
