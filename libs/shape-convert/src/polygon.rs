//! # Planar Geometry Conversion
//!
//! Converts polygons with holes, stand-alone rings, open paths and point sets
//! into a single primitive each.
//!
//! ## Rules
//!
//! - Polygon exteriors are emitted counter-clockwise and holes clockwise,
//!   whatever the source winding
//! - Repeated closing points and repeated neighbors are dropped, so a ring
//!   of `n` distinct points yields exactly `n` vertices
//! - Degenerate rings (fewer than three distinct points) are dropped
//! - Lines and rings render as strokes only unless fill is explicitly allowed

use crate::attributes::{resolve_colors, ColorAttachment};
use crate::color::Rgba;
use crate::options::ConvertOptions;
use crate::shape::{DrawMode, Paint, Primitive, Shape};
use crate::source::{OpenPath, PointSet, Polygon, Ring, Winding};

/// Converts a polygon with holes into one closed primitive.
///
/// A degenerate exterior leaves nothing for holes to nest under, so the
/// result is an empty closed primitive.
pub fn convert_polygon(polygon: &Polygon) -> Shape {
    let mut primitive = Primitive::new(DrawMode::ClosedPath);
    if polygon.exterior.is_degenerate() {
        return Shape::primitive(primitive);
    }

    primitive = primitive.with_vertices(polygon.exterior.oriented(Winding::CounterClockwise));
    for hole in polygon.holes.iter().filter(|h| !h.is_degenerate()) {
        primitive = primitive.with_contour(hole.oriented(Winding::Clockwise));
    }
    Shape::primitive(primitive)
}

/// Converts a stand-alone ring into a closed contour.
///
/// The ring keeps its own winding; it is drawn as a closed polyline rather
/// than an area unless `allow_fill_on_open_paths` is set.
pub fn convert_ring(ring: &Ring, options: &ConvertOptions) -> Shape {
    let mut primitive = line_style(Primitive::new(DrawMode::ClosedPath), ring.stroke, options);
    if !ring.is_degenerate() {
        primitive = primitive.with_vertices(ring.outline());
    }
    Shape::primitive(primitive)
}

/// Converts an open path.
///
/// Two points become an explicit line segment; longer paths become an open
/// polyline. Shorter paths yield an empty polyline.
pub fn convert_open_path(path: &OpenPath, options: &ConvertOptions) -> Shape {
    let primitive = match path.points.len() {
        2 => with_stroke_color(Primitive::new(DrawMode::Lines), path.stroke)
            .with_vertices(path.points.clone()),
        n => {
            let primitive = line_style(Primitive::new(DrawMode::OpenPath), path.stroke, options);
            if n >= 3 {
                primitive.with_vertices(path.points.clone())
            } else {
                primitive
            }
        }
    };
    Shape::primitive(primitive)
}

/// Converts a point set into a points primitive.
///
/// A single color becomes the stroke color; one color per point becomes
/// per-vertex stroke colors.
pub fn convert_point_set(set: &PointSet) -> Shape {
    let primitive = Primitive::new(DrawMode::Points).with_vertices(set.points.clone());
    let primitive = match resolve_colors(&set.colors, set.points.len()) {
        ColorAttachment::PerVertex(colors) => primitive.with_stroke_colors(colors),
        ColorAttachment::Uniform(color) => primitive.with_stroke(Paint::Color(color)),
        ColorAttachment::None => primitive,
    };
    Shape::primitive(primitive)
}

fn line_style(primitive: Primitive, stroke: Option<Rgba>, options: &ConvertOptions) -> Primitive {
    let primitive = with_stroke_color(primitive, stroke);
    if options.allow_fill_on_open_paths {
        primitive
    } else {
        primitive.no_fill()
    }
}

fn with_stroke_color(primitive: Primitive, stroke: Option<Rgba>) -> Primitive {
    match stroke {
        Some(color) => primitive.with_stroke(Paint::Color(color)),
        None => primitive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn primitive(shape: &Shape) -> &Primitive {
        shape.as_primitive().unwrap()
    }

    fn winding_of(points: &[DVec3]) -> Winding {
        Ring::new(points.to_vec()).winding()
    }

    #[test]
    fn test_polygon_with_hole() {
        let polygon = Polygon::with_holes(
            Ring::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
            vec![Ring::from_xy(&[[3.0, 3.0], [3.0, 7.0], [7.0, 7.0], [7.0, 3.0]])],
        );
        let shape = convert_polygon(&polygon);
        let p = primitive(&shape);

        assert_eq!(p.mode(), DrawMode::ClosedPath);
        assert_eq!(p.vertex_count(), 4);
        assert_eq!(winding_of(p.vertices()), Winding::CounterClockwise);
        assert_eq!(p.contours().len(), 1);
        assert_eq!(p.contours()[0].len(), 4);
        assert_eq!(winding_of(&p.contours()[0]), Winding::Clockwise);
    }

    #[test]
    fn test_polygon_normalizes_reversed_input() {
        // Exterior given clockwise, hole given counter-clockwise, both closed
        let polygon = Polygon::with_holes(
            Ring::from_xy(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0]]),
            vec![Ring::from_xy(&[[3.0, 3.0], [7.0, 3.0], [7.0, 7.0], [3.0, 7.0], [3.0, 3.0]])],
        );
        let shape = convert_polygon(&polygon);
        let p = primitive(&shape);

        assert_eq!(p.vertex_count(), 4);
        assert_eq!(winding_of(p.vertices()), Winding::CounterClockwise);
        assert_eq!(p.contours()[0].len(), 4);
        assert_eq!(winding_of(&p.contours()[0]), Winding::Clockwise);
    }

    #[test]
    fn test_polygon_drops_degenerate_hole() {
        let polygon = Polygon::with_holes(
            Ring::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]),
            vec![Ring::from_xy(&[[1.0, 1.0], [2.0, 2.0]])],
        );
        let shape = convert_polygon(&polygon);
        assert_eq!(primitive(&shape).vertex_count(), 3);
        assert!(primitive(&shape).contours().is_empty());
    }

    #[test]
    fn test_polygon_degenerate_exterior_is_empty() {
        let polygon = Polygon::new(Ring::from_xy(&[[0.0, 0.0], [1.0, 0.0]]));
        let shape = convert_polygon(&polygon);
        assert!(primitive(&shape).is_empty());
    }

    #[test]
    fn test_polygon_repeated_point_exterior_is_empty() {
        let polygon = Polygon::with_holes(
            Ring::from_xy(&[[0.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 0.0]]),
            vec![Ring::from_xy(&[[0.2, 0.2], [0.8, 0.2], [0.8, 0.8]])],
        );
        let shape = convert_polygon(&polygon);
        assert_eq!(primitive(&shape).vertex_count(), 0);
        assert!(primitive(&shape).contours().is_empty());
    }

    #[test]
    fn test_polygon_repeated_point_hole_is_dropped() {
        let polygon = Polygon::with_holes(
            Ring::from_xy(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]),
            vec![
                Ring::from_xy(&[[2.0, 2.0], [3.0, 3.0], [3.0, 3.0], [2.0, 2.0]]),
                Ring::from_xy(&[[5.0, 5.0], [6.0, 5.0], [6.0, 5.0], [6.0, 6.0]]),
            ],
        );
        let shape = convert_polygon(&polygon);
        let p = primitive(&shape);
        assert_eq!(p.vertex_count(), 4);
        assert_eq!(p.contours().len(), 1);
        assert_eq!(p.contours()[0].len(), 3);
        assert_eq!(winding_of(&p.contours()[0]), Winding::Clockwise);
    }

    #[test]
    fn test_ring_is_stroke_only_by_default() {
        let ring = Ring::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
        let shape = convert_ring(&ring, &ConvertOptions::default());
        let p = primitive(&shape);
        assert_eq!(p.mode(), DrawMode::ClosedPath);
        assert_eq!(p.fill(), Paint::Disabled);
        assert_eq!(p.vertex_count(), 3);

        let options = ConvertOptions::default().with_fill_on_open_paths(true);
        let shape = convert_ring(&ring, &options);
        assert_eq!(primitive(&shape).fill(), Paint::Default);
    }

    #[test]
    fn test_ring_keeps_stroke_color() {
        let red = Rgba::new(255, 0, 0, 255);
        let ring = Ring::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]).with_stroke(red);
        let shape = convert_ring(&ring, &ConvertOptions::default());
        assert_eq!(primitive(&shape).stroke(), Paint::Color(red));
    }

    #[test]
    fn test_two_point_ring_is_empty() {
        let ring = Ring::from_xy(&[[0.0, 0.0], [1.0, 0.0]]);
        let shape = convert_ring(&ring, &ConvertOptions::default());
        assert!(primitive(&shape).is_empty());
    }

    #[test]
    fn test_two_point_path_is_line_segment() {
        let path = OpenPath::from_xy(&[[0.0, 0.0], [5.0, 5.0]]);
        let shape = convert_open_path(&path, &ConvertOptions::default());
        let p = primitive(&shape);
        assert_eq!(p.mode(), DrawMode::Lines);
        assert_eq!(p.vertex_count(), 2);
        assert_eq!(p.fill(), Paint::Default);
    }

    #[test]
    fn test_long_path_is_open_polyline() {
        let path = OpenPath::from_xy(&[[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]]);
        let shape = convert_open_path(&path, &ConvertOptions::default());
        let p = primitive(&shape);
        assert_eq!(p.mode(), DrawMode::OpenPath);
        assert_eq!(p.vertex_count(), 3);
        assert_eq!(p.fill(), Paint::Disabled);
    }

    #[test]
    fn test_single_point_path_is_empty() {
        let path = OpenPath::from_xy(&[[0.0, 0.0]]);
        let shape = convert_open_path(&path, &ConvertOptions::default());
        assert!(primitive(&shape).is_empty());
    }

    #[test]
    fn test_point_set() {
        let set = PointSet::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
        let shape = convert_point_set(&set);
        let p = primitive(&shape);
        assert_eq!(p.mode(), DrawMode::Points);
        assert_eq!(p.vertex_count(), 3);
        assert!(p.contours().is_empty());
        assert!(p.stroke_colors().is_none());
    }

    #[test]
    fn test_point_set_colors() {
        let red = Rgba::new(255, 0, 0, 255);
        let uniform = PointSet::new(vec![DVec3::ZERO, DVec3::X]).with_colors(vec![red]);
        assert_eq!(primitive(&convert_point_set(&uniform)).stroke(), Paint::Color(red));

        let per_point = PointSet::new(vec![DVec3::ZERO, DVec3::X])
            .with_colors(vec![red, Rgba::BLACK]);
        let shape = convert_point_set(&per_point);
        assert_eq!(primitive(&shape).stroke_colors(), Some(&[red, Rgba::BLACK][..]));
    }

    #[test]
    fn test_empty_point_set() {
        let shape = convert_point_set(&PointSet::default());
        assert!(primitive(&shape).is_empty());
    }
}
