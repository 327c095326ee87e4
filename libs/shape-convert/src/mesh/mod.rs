//! # Mesh Conversion
//!
//! Indexed triangle meshes become a filled triangle soup plus one outline
//! primitive per traced facet boundary.
//!
//! ```text
//! IndexedMesh ─► MeshTopology ─► trace_boundaries ─► build_mesh_shape
//!      │                                                   ▲
//!      └──────────────── fill_layer (facet_edges off) ─────┘
//! ```

pub mod builder;
pub mod topology;
pub mod tracer;

pub use builder::{build_mesh_shape, chain_primitive, fill_layer};
pub use topology::MeshTopology;
pub use tracer::{merge_fragments, trace_boundaries, Chain, FacetBoundary};

use crate::options::ConvertOptions;
use crate::shape::Shape;
use crate::source::IndexedMesh;

/// Converts a mesh into a Shape.
///
/// With `facet_edges` off the fill layer is returned on its own; otherwise
/// the result is a Group of the fill layer followed by the outlines.
pub fn convert_mesh(mesh: &IndexedMesh, options: &ConvertOptions) -> Shape {
    if !options.facet_edges {
        return Shape::primitive(fill_layer(mesh, options));
    }

    let topology = MeshTopology::build(mesh);
    let boundaries = trace_boundaries(mesh, &topology, options.min_edge_angle);
    build_mesh_shape(mesh, &boundaries, options)
}
