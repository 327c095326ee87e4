//! # Source Transforms
//!
//! The vertical mirror applied once to the root geometry when
//! `flip_y_axis` is set. Nested members are mirrored as part of the root,
//! about the root's center, so recursion never flips again.

use glam::DVec3;

use crate::source::{GeometrySource, IndexedMesh, OpenPath, PointSet, Polygon};

/// Axis-aligned bounds of every point in the source, if it has any.
pub fn bounds(source: &GeometrySource) -> Option<(DVec3, DVec3)> {
    let mut acc: Option<(DVec3, DVec3)> = None;
    visit_points(source, &mut |p| {
        acc = Some(match acc {
            Some((min, max)) => (min.min(p), max.max(p)),
            None => (p, p),
        });
    });
    acc
}

/// Mirrors the source vertically about the center of its bounds.
///
/// External geometry cannot be inspected and is returned unchanged.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use shape_convert::transform::flip_y;
/// use shape_convert::{GeometrySource, OpenPath};
///
/// let path = OpenPath::from_xy(&[[0.0, 0.0], [1.0, 4.0]]);
/// let GeometrySource::OpenPath(flipped) = flip_y(&path.into()) else { unreachable!() };
/// assert_eq!(flipped.points, vec![DVec3::new(0.0, 4.0, 0.0), DVec3::new(1.0, 0.0, 0.0)]);
/// ```
pub fn flip_y(source: &GeometrySource) -> GeometrySource {
    match bounds(source) {
        Some((min, max)) => {
            let center_y = (min.y + max.y) / 2.0;
            map_points(source, &|p| DVec3::new(p.x, 2.0 * center_y - p.y, p.z))
        }
        None => source.clone(),
    }
}

fn visit_points(source: &GeometrySource, f: &mut dyn FnMut(DVec3)) {
    match source {
        GeometrySource::Polygon(polygon) => {
            polygon.exterior.points().iter().for_each(|p| f(*p));
            for hole in &polygon.holes {
                hole.points().iter().for_each(|p| f(*p));
            }
        }
        GeometrySource::LinearRing(ring) => ring.points().iter().for_each(|p| f(*p)),
        GeometrySource::OpenPath(path) => path.points.iter().for_each(|p| f(*p)),
        GeometrySource::PointSet(set) => set.points.iter().for_each(|p| f(*p)),
        GeometrySource::IndexedMesh(mesh) => mesh.vertices.iter().for_each(|p| f(*p)),
        GeometrySource::Collection(members) => {
            for member in members {
                visit_points(member, f);
            }
        }
        GeometrySource::Scene(scene) => {
            for (_, member) in scene.iter() {
                visit_points(member, f);
            }
        }
        GeometrySource::External(_) => {}
    }
}

fn map_points(source: &GeometrySource, f: &dyn Fn(DVec3) -> DVec3) -> GeometrySource {
    match source {
        GeometrySource::Polygon(polygon) => GeometrySource::Polygon(Polygon {
            exterior: polygon.exterior.map_points(f),
            holes: polygon.holes.iter().map(|h| h.map_points(f)).collect(),
        }),
        GeometrySource::LinearRing(ring) => GeometrySource::LinearRing(ring.map_points(f)),
        GeometrySource::OpenPath(path) => GeometrySource::OpenPath(OpenPath {
            points: path.points.iter().map(|p| f(*p)).collect(),
            stroke: path.stroke,
        }),
        GeometrySource::PointSet(set) => GeometrySource::PointSet(PointSet {
            points: set.points.iter().map(|p| f(*p)).collect(),
            colors: set.colors.clone(),
        }),
        GeometrySource::IndexedMesh(mesh) => GeometrySource::IndexedMesh(IndexedMesh {
            vertices: mesh.vertices.iter().map(|p| f(*p)).collect(),
            ..mesh.clone()
        }),
        GeometrySource::Collection(members) => {
            GeometrySource::Collection(members.iter().map(|m| map_points(m, f)).collect())
        }
        GeometrySource::Scene(scene) => {
            GeometrySource::Scene(scene.map_geometry(|m| map_points(m, f)))
        }
        GeometrySource::External(external) => GeometrySource::External(external.clone()),
    }
}
