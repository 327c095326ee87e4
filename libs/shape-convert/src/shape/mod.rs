//! # Shape Tree
//!
//! The unified output of every conversion.
//!
//! ## Structure
//!
//! - `Shape` - A tree node, optionally named
//! - `ShapeKind::Group` - Ordered children, no geometry of its own
//! - `ShapeKind::Primitive` - Drawable geometry plus style
//! - `emit` - Replays a finished shape into a renderer's shape builder
//!
//! Shapes are assembled bottom-up with consuming `with_*` methods and are
//! never mutated once handed to a parent or the caller.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use shape_convert::{DrawMode, Primitive, Shape};
//!
//! let outline = Primitive::new(DrawMode::ClosedPath)
//!     .with_vertices(vec![DVec3::ZERO, DVec3::X, DVec3::Y])
//!     .no_fill();
//! let shape = Shape::group(vec![Shape::primitive(outline)]).named("outline");
//! assert_eq!(shape.name(), Some("outline"));
//! assert_eq!(shape.vertex_count(), 3);
//! ```

pub mod emit;


use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

pub use emit::ShapeBuilder;

// =============================================================================
// STYLE TYPES
// =============================================================================

/// How a primitive's vertices are interpreted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMode {
    /// Independent points.
    Points,
    /// An explicit line segment between two vertices.
    Lines,
    /// An open polyline; the last vertex does not connect back to the first.
    OpenPath,
    /// A closed contour, optionally with hole contours.
    ClosedPath,
    /// Triangle soup, three vertices per triangle.
    Triangles,
}

/// Fill or stroke setting of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Paint {
    /// Leave the renderer's current style in effect.
    #[default]
    Default,
    /// Draw nothing for this channel.
    Disabled,
    /// A single flat color.
    Color(Rgba),
}

/// Opaque handle to a texture the renderer knows how to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub String);

impl TextureRef {
    /// Creates a texture reference from a renderer-side key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the renderer-side key.
    pub fn key(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// PRIMITIVE
// =============================================================================

/// A leaf shape carrying drawable geometry and its style.
///
/// Vertices are always 3D; planar sources use `z = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    mode: DrawMode,
    vertices: Vec<DVec3>,
    /// Texture coordinates, one per vertex, when textured
    uvs: Option<Vec<DVec2>>,
    /// Hole contours nested under the main contour
    contours: Vec<Vec<DVec3>>,
    fill: Paint,
    stroke: Paint,
    /// Per-vertex fill colors
    fill_colors: Option<Vec<Rgba>>,
    /// Per-vertex stroke colors
    stroke_colors: Option<Vec<Rgba>>,
    texture: Option<TextureRef>,
}

impl Primitive {
    /// Creates an empty primitive with default fill and stroke.
    pub fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            vertices: Vec::new(),
            uvs: None,
            contours: Vec::new(),
            fill: Paint::Default,
            stroke: Paint::Default,
            fill_colors: None,
            stroke_colors: None,
            texture: None,
        }
    }

    /// Sets the main vertex list.
    #[must_use]
    pub fn with_vertices(mut self, vertices: Vec<DVec3>) -> Self {
        self.vertices = vertices;
        self
    }

    /// Appends a hole contour.
    #[must_use]
    pub fn with_contour(mut self, contour: Vec<DVec3>) -> Self {
        self.contours.push(contour);
        self
    }

    /// Sets the fill.
    #[must_use]
    pub fn with_fill(mut self, fill: Paint) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Paint) -> Self {
        self.stroke = stroke;
        self
    }

    /// Disables the fill.
    #[must_use]
    pub fn no_fill(self) -> Self {
        self.with_fill(Paint::Disabled)
    }

    /// Disables the stroke.
    #[must_use]
    pub fn no_stroke(self) -> Self {
        self.with_stroke(Paint::Disabled)
    }

    /// Attaches one fill color per vertex.
    #[must_use]
    pub fn with_fill_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.fill_colors = Some(colors);
        self
    }

    /// Attaches one stroke color per vertex.
    #[must_use]
    pub fn with_stroke_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.stroke_colors = Some(colors);
        self
    }

    /// Attaches texture coordinates, one per vertex.
    #[must_use]
    pub fn with_uvs(mut self, uvs: Vec<DVec2>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Sets the texture.
    #[must_use]
    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Returns the draw mode.
    #[inline]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Returns the main vertex list.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the number of main-contour vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the primitive has no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.contours.iter().all(Vec::is_empty)
    }

    /// Returns the hole contours.
    #[inline]
    pub fn contours(&self) -> &[Vec<DVec3>] {
        &self.contours
    }

    /// Returns the texture coordinates.
    pub fn uvs(&self) -> Option<&[DVec2]> {
        self.uvs.as_deref()
    }

    /// Returns the fill setting.
    #[inline]
    pub fn fill(&self) -> Paint {
        self.fill
    }

    /// Returns the stroke setting.
    #[inline]
    pub fn stroke(&self) -> Paint {
        self.stroke
    }

    /// Returns the per-vertex fill colors.
    pub fn fill_colors(&self) -> Option<&[Rgba]> {
        self.fill_colors.as_deref()
    }

    /// Returns the per-vertex stroke colors.
    pub fn stroke_colors(&self) -> Option<&[Rgba]> {
        self.stroke_colors.as_deref()
    }

    /// Returns the texture.
    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }
}

// =============================================================================
// SHAPE
// =============================================================================

/// Node payload of a [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Ordered child shapes.
    Group(Vec<Shape>),
    /// Drawable geometry.
    Primitive(Primitive),
}

/// A node of the shape tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    name: Option<String>,
    kind: ShapeKind,
}

impl Shape {
    /// Creates a group from its children.
    pub fn group(children: Vec<Shape>) -> Self {
        Self {
            name: None,
            kind: ShapeKind::Group(children),
        }
    }

    /// Wraps a primitive as a leaf shape.
    pub fn primitive(primitive: Primitive) -> Self {
        Self {
            name: None,
            kind: ShapeKind::Primitive(primitive),
        }
    }

    /// Labels the shape.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the label, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the node payload.
    #[inline]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Returns true for group nodes.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group(_))
    }

    /// Returns the primitive if this is a leaf.
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match &self.kind {
            ShapeKind::Primitive(primitive) => Some(primitive),
            ShapeKind::Group(_) => None,
        }
    }

    /// Returns the children of a group; leaves have none.
    pub fn children(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Group(children) => children,
            ShapeKind::Primitive(_) => &[],
        }
    }

    /// Collects every primitive in the tree, depth first.
    pub fn primitives(&self) -> Vec<&Primitive> {
        let mut out = Vec::new();
        self.collect_primitives(&mut out);
        out
    }

    fn collect_primitives<'a>(&'a self, out: &mut Vec<&'a Primitive>) {
        match &self.kind {
            ShapeKind::Primitive(primitive) => out.push(primitive),
            ShapeKind::Group(children) => {
                for child in children {
                    child.collect_primitives(out);
                }
            }
        }
    }

    /// Total number of main-contour vertices over all primitives.
    pub fn vertex_count(&self) -> usize {
        self.primitives().iter().map(|p| p.vertex_count()).sum()
    }
}

impl From<Primitive> for Shape {
    fn from(primitive: Primitive) -> Self {
        Self::primitive(primitive)
    }
}
