//! # Shape Convert
//!
//! Converts geometry handed over by polygon, path, point cloud and triangle
//! mesh libraries into one renderable [`Shape`] tree.
//!
//! ## Architecture
//!
//! ```text
//! GeometrySource → Registry → converter → Shape → ShapeBuilder (renderer)
//!                               │
//!                               ├─ polygon: rings, holes, paths, points
//!                               ├─ mesh:    fill layer + facet outlines
//!                               └─ scene:   named / unnamed members
//! ```
//!
//! ## Mesh Outlines
//!
//! Meshes are drawn as a filled triangle soup plus the traced outline of
//! each coplanar facet, so a cube shows 6 squares rather than 12 triangles.
//! See [`mesh::tracer`].
//!
//! ## Usage
//!
//! ```rust
//! use shape_convert::{ConvertOptions, Polygon, Registry, Ring};
//!
//! let polygon = Polygon::with_holes(
//!     Ring::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
//!     vec![Ring::from_xy(&[[3.0, 3.0], [3.0, 7.0], [7.0, 7.0], [7.0, 3.0]])],
//! );
//!
//! let registry = Registry::with_defaults();
//! let shape = registry.convert(&polygon.into(), &ConvertOptions::default())?;
//! let primitive = shape.as_primitive().unwrap();
//! assert_eq!(primitive.vertex_count(), 4);
//! assert_eq!(primitive.contours().len(), 1);
//! # Ok::<(), shape_convert::ConvertError>(())
//! ```

pub mod attributes;
pub mod color;
pub mod error;
pub mod mesh;
pub mod options;
pub mod polygon;
pub mod registry;
pub mod scene;
pub mod shape;
pub mod source;
pub mod transform;

pub use color::Rgba;
pub use error::{ConvertError, ConvertResult};
pub use options::ConvertOptions;
pub use registry::{convert, is_convertible, register_converter, Conversion, Registry};
pub use shape::{DrawMode, Paint, Primitive, Shape, ShapeBuilder, ShapeKind, TextureRef};
pub use source::{
    ExternalGeometry, FaceAdjacency, GeometrySource, IndexedMesh, MeshColors, OpenPath, PointSet,
    Polygon, Ring, Scene, Winding,
};
