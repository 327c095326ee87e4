//! # Scene Flattening
//!
//! Composite sources convert each member through the registry and collect
//! the results in a group. Members are dispatched by the same recursive
//! call as the root, so a scene inside a scene needs no special handling.

use crate::error::{ConvertError, ConvertResult};
use crate::registry::Conversion;
use crate::shape::Shape;
use crate::source::{GeometrySource, Scene};

/// Converts a named scene.
///
/// A single entry is returned as its own shape, without a group around it.
/// Several entries become a group of children labelled with the entry
/// names, in insertion order. An entry no converter claims fails the whole
/// scene with its name attached.
pub fn convert_scene(scene: &Scene, conversion: &Conversion<'_>) -> ConvertResult<Shape> {
    if scene.len() == 1 {
        if let Some((name, member)) = scene.iter().next() {
            return convert_member(name, member, conversion);
        }
    }

    let children = scene
        .iter()
        .map(|(name, member)| {
            convert_member(name, member, conversion).map(|shape| shape.named(name))
        })
        .collect::<ConvertResult<Vec<_>>>()?;
    Ok(Shape::group(children))
}

fn convert_member(
    name: &str,
    member: &GeometrySource,
    conversion: &Conversion<'_>,
) -> ConvertResult<Shape> {
    conversion.convert(member).map_err(|err| match err {
        ConvertError::UnsupportedGeometry { type_name } => {
            ConvertError::scene_member(name, type_name)
        }
        other => other,
    })
}

/// Converts an unnamed collection into a group with one child per member.
pub fn convert_collection(
    members: &[GeometrySource],
    conversion: &Conversion<'_>,
) -> ConvertResult<Shape> {
    let children = members
        .iter()
        .map(|member| conversion.convert(member))
        .collect::<ConvertResult<Vec<_>>>()?;
    Ok(Shape::group(children))
}
