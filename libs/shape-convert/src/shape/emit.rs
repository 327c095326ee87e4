//! # Shape Emission
//!
//! Hands a finished [`Shape`] to the renderer. The renderer exposes its
//! shape-construction capabilities through [`ShapeBuilder`]; emission only
//! describes the shape and never draws anything.

use glam::{DVec2, DVec3};

use super::{DrawMode, Paint, Primitive, Shape, ShapeKind, TextureRef};
use crate::color::Rgba;

/// Shape-construction operations of a renderer.
///
/// `Handle` is whatever the renderer uses to refer to a shape under
/// construction.
pub trait ShapeBuilder {
    /// Renderer-side shape handle.
    type Handle;

    /// Starts a primitive with the given draw mode.
    fn create_primitive(&mut self, mode: DrawMode) -> Self::Handle;

    /// Adds a vertex, with texture coordinates when the primitive is textured.
    fn add_vertex(&mut self, shape: &mut Self::Handle, position: DVec3, uv: Option<DVec2>);

    /// Starts a hole contour.
    fn begin_contour(&mut self, shape: &mut Self::Handle);

    /// Ends the current hole contour.
    fn end_contour(&mut self, shape: &mut Self::Handle);

    /// Sets a flat fill color.
    fn set_fill_color(&mut self, shape: &mut Self::Handle, color: Rgba);

    /// Sets a flat stroke color.
    fn set_stroke_color(&mut self, shape: &mut Self::Handle, color: Rgba);

    /// Disables the fill.
    fn disable_fill(&mut self, shape: &mut Self::Handle);

    /// Disables the stroke.
    fn disable_stroke(&mut self, shape: &mut Self::Handle);

    /// Sets one fill color per vertex.
    fn set_fill_colors(&mut self, shape: &mut Self::Handle, colors: &[Rgba]);

    /// Sets one stroke color per vertex.
    fn set_stroke_colors(&mut self, shape: &mut Self::Handle, colors: &[Rgba]);

    /// Sets the texture; coordinates arrive normalized to [0, 1].
    fn set_texture(&mut self, shape: &mut Self::Handle, texture: &TextureRef);

    /// Starts an empty group.
    fn create_group(&mut self) -> Self::Handle;

    /// Appends a finished child to a group.
    fn add_child(&mut self, parent: &mut Self::Handle, child: Self::Handle);

    /// Labels a shape.
    fn set_name(&mut self, shape: &mut Self::Handle, name: &str);
}

impl Shape {
    /// Replays this shape tree into `builder` and returns the root handle.
    ///
    /// Children are emitted in order; each primitive receives its style
    /// before its vertices, then its hole contours, then per-vertex colors.
    pub fn emit<B: ShapeBuilder>(&self, builder: &mut B) -> B::Handle {
        let mut handle = match &self.kind {
            ShapeKind::Primitive(primitive) => emit_primitive(primitive, builder),
            ShapeKind::Group(children) => {
                let mut group = builder.create_group();
                for child in children {
                    let child_handle = child.emit(builder);
                    builder.add_child(&mut group, child_handle);
                }
                group
            }
        };
        if let Some(name) = &self.name {
            builder.set_name(&mut handle, name);
        }
        handle
    }
}

fn emit_primitive<B: ShapeBuilder>(primitive: &Primitive, builder: &mut B) -> B::Handle {
    let mut handle = builder.create_primitive(primitive.mode());

    match primitive.fill() {
        Paint::Default => {}
        Paint::Disabled => builder.disable_fill(&mut handle),
        Paint::Color(color) => builder.set_fill_color(&mut handle, color),
    }
    match primitive.stroke() {
        Paint::Default => {}
        Paint::Disabled => builder.disable_stroke(&mut handle),
        Paint::Color(color) => builder.set_stroke_color(&mut handle, color),
    }
    if let Some(texture) = primitive.texture() {
        builder.set_texture(&mut handle, texture);
    }

    let uvs = primitive.uvs();
    for (i, vertex) in primitive.vertices().iter().enumerate() {
        let uv = uvs.and_then(|uvs| uvs.get(i).copied());
        builder.add_vertex(&mut handle, *vertex, uv);
    }

    for contour in primitive.contours() {
        builder.begin_contour(&mut handle);
        for vertex in contour {
            builder.add_vertex(&mut handle, *vertex, None);
        }
        builder.end_contour(&mut handle);
    }

    if let Some(colors) = primitive.fill_colors() {
        builder.set_fill_colors(&mut handle, colors);
    }
    if let Some(colors) = primitive.stroke_colors() {
        builder.set_stroke_colors(&mut handle, colors);
    }

    handle
}
