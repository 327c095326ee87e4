//! # Geometry Sources
//!
//! The tagged union every conversion starts from. An adapter outside this
//! crate inspects third-party geometry objects once and builds one of these
//! variants; inside the engine dispatch only ever looks at the tag.
//!
//! ## Variants
//!
//! - `Polygon` - Exterior ring plus hole rings
//! - `LinearRing` - A single closed ring
//! - `OpenPath` - An ordered, unclosed point sequence
//! - `PointSet` - Points without connectivity
//! - `IndexedMesh` - Triangle mesh with optional facets, colors and UVs
//! - `Collection` - Unnamed list of sub-geometries
//! - `Scene` - Named sub-geometries in insertion order
//! - `External` - Any other value, claimed only by user-registered converters

pub mod mesh;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use config::constants::{approx_zero, EPSILON, MIN_RING_POINTS};
use glam::{DVec2, DVec3};

use crate::color::Rgba;

pub use mesh::{FaceAdjacency, IndexedMesh, MeshColors};

// =============================================================================
// GEOMETRY SOURCE
// =============================================================================

/// A geometry object entering the engine.
#[derive(Debug, Clone)]
pub enum GeometrySource {
    /// Polygon with holes.
    Polygon(Polygon),
    /// Stand-alone closed ring.
    LinearRing(Ring),
    /// Open polyline.
    OpenPath(OpenPath),
    /// Unconnected points.
    PointSet(PointSet),
    /// Indexed triangle mesh.
    IndexedMesh(IndexedMesh),
    /// Unnamed list of sub-geometries (multi-polygons, geometry collections).
    Collection(Vec<GeometrySource>),
    /// Named sub-geometries.
    Scene(Scene),
    /// Geometry of a type the engine does not know.
    External(ExternalGeometry),
}

impl GeometrySource {
    /// Returns the fully qualified type name, used in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            GeometrySource::Polygon(_) => std::any::type_name::<Polygon>(),
            GeometrySource::LinearRing(_) => std::any::type_name::<Ring>(),
            GeometrySource::OpenPath(_) => std::any::type_name::<OpenPath>(),
            GeometrySource::PointSet(_) => std::any::type_name::<PointSet>(),
            GeometrySource::IndexedMesh(_) => std::any::type_name::<IndexedMesh>(),
            GeometrySource::Collection(_) => "shape_convert::source::Collection",
            GeometrySource::Scene(_) => std::any::type_name::<Scene>(),
            GeometrySource::External(external) => external.type_name(),
        }
    }
}

impl From<Polygon> for GeometrySource {
    fn from(polygon: Polygon) -> Self {
        GeometrySource::Polygon(polygon)
    }
}

impl From<Ring> for GeometrySource {
    fn from(ring: Ring) -> Self {
        GeometrySource::LinearRing(ring)
    }
}

impl From<OpenPath> for GeometrySource {
    fn from(path: OpenPath) -> Self {
        GeometrySource::OpenPath(path)
    }
}

impl From<PointSet> for GeometrySource {
    fn from(points: PointSet) -> Self {
        GeometrySource::PointSet(points)
    }
}

impl From<IndexedMesh> for GeometrySource {
    fn from(mesh: IndexedMesh) -> Self {
        GeometrySource::IndexedMesh(mesh)
    }
}

impl From<Scene> for GeometrySource {
    fn from(scene: Scene) -> Self {
        GeometrySource::Scene(scene)
    }
}

impl From<ExternalGeometry> for GeometrySource {
    fn from(external: ExternalGeometry) -> Self {
        GeometrySource::External(external)
    }
}

// =============================================================================
// RINGS
// =============================================================================

/// Rotational direction of a ring.
///
/// Uses the Y-up convention: positive signed area is counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
}

/// An implicitly closed sequence of points.
///
/// The closing point may or may not be repeated; it is dropped on read.
///
/// # Example
///
/// ```rust
/// use shape_convert::{Ring, Winding};
///
/// let ring = Ring::from_xy(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]);
/// assert_eq!(ring.distinct_points().len(), 3);
/// assert_eq!(ring.winding(), Winding::Clockwise);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    points: Vec<DVec3>,
    /// Stroke color when the ring is drawn as a stand-alone line
    pub stroke: Option<Rgba>,
}

impl Ring {
    /// Creates a ring from 3D points.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self {
            points,
            stroke: None,
        }
    }

    /// Creates a planar ring from 2D points.
    pub fn from_xy(points: &[[f64; 2]]) -> Self {
        Self::new(points.iter().map(|p| DVec3::new(p[0], p[1], 0.0)).collect())
    }

    /// Sets the stroke color.
    #[must_use]
    pub fn with_stroke(mut self, color: Rgba) -> Self {
        self.stroke = Some(color);
        self
    }

    /// Returns the points as supplied.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns the points without a repeated closing point.
    pub fn distinct_points(&self) -> &[DVec3] {
        match self.points.as_slice() {
            [first, .., last] if first.abs_diff_eq(*last, EPSILON) => {
                &self.points[..self.points.len() - 1]
            }
            points => points,
        }
    }

    /// Returns the distinct points with runs of repeated points collapsed,
    /// so no two neighbors on the outline coincide.
    pub fn outline(&self) -> Vec<DVec3> {
        let mut points = self.distinct_points().to_vec();
        points.dedup_by(|b, a| a.abs_diff_eq(*b, EPSILON));
        while let [first, .., last] = points.as_slice() {
            if !first.abs_diff_eq(*last, EPSILON) {
                break;
            }
            points.pop();
        }
        points
    }

    /// True when the ring has fewer than three distinct points and so
    /// cannot enclose an area.
    pub fn is_degenerate(&self) -> bool {
        let mut unique: Vec<DVec3> = Vec::with_capacity(MIN_RING_POINTS);
        for &point in &self.points {
            if unique.iter().all(|u| !u.abs_diff_eq(point, EPSILON)) {
                unique.push(point);
                if unique.len() >= MIN_RING_POINTS {
                    return false;
                }
            }
        }
        true
    }

    /// Shoelace signed area of the ring projected onto the XY plane.
    pub fn signed_area(&self) -> f64 {
        let points = self.distinct_points();
        let n = points.len();
        if n < MIN_RING_POINTS {
            return 0.0;
        }
        let twice_area: f64 = (0..n)
            .map(|i| {
                let a = points[i];
                let b = points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice_area / 2.0
    }

    /// Returns the ring's winding. Zero-area rings count as counter-clockwise.
    pub fn winding(&self) -> Winding {
        let area = self.signed_area();
        if area < 0.0 && !approx_zero(area) {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Returns the outline points wound in the requested direction.
    pub fn oriented(&self, winding: Winding) -> Vec<DVec3> {
        let mut points = self.outline();
        if self.winding() != winding {
            points.reverse();
        }
        points
    }

    pub(crate) fn map_points(&self, f: impl Fn(DVec3) -> DVec3) -> Self {
        Self {
            points: self.points.iter().map(|p| f(*p)).collect(),
            stroke: self.stroke,
        }
    }
}

/// A polygon: one exterior ring and zero or more holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    /// Outer boundary, any winding
    pub exterior: Ring,
    /// Holes, any winding
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// Creates a polygon without holes.
    pub fn new(exterior: Ring) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    pub fn with_holes(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }
}

// =============================================================================
// PATHS AND POINTS
// =============================================================================

/// An ordered, unclosed sequence of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenPath {
    /// Path points in drawing order
    pub points: Vec<DVec3>,
    /// Stroke color
    pub stroke: Option<Rgba>,
}

impl OpenPath {
    /// Creates a path from 3D points.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self {
            points,
            stroke: None,
        }
    }

    /// Creates a planar path from 2D points.
    pub fn from_xy(points: &[[f64; 2]]) -> Self {
        Self::new(points.iter().map(|p| DVec3::new(p[0], p[1], 0.0)).collect())
    }

    /// Sets the stroke color.
    #[must_use]
    pub fn with_stroke(mut self, color: Rgba) -> Self {
        self.stroke = Some(color);
        self
    }
}

/// Points without connectivity.
///
/// `colors` holds either one color for the whole set or one per point; any
/// other length is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    /// Point positions
    pub points: Vec<DVec3>,
    /// Uniform or per-point colors
    pub colors: Vec<Rgba>,
}

impl PointSet {
    /// Creates a point set.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self {
            points,
            colors: Vec::new(),
        }
    }

    /// Creates a set holding a single point.
    pub fn single(point: DVec3) -> Self {
        Self::new(vec![point])
    }

    /// Creates a planar point set.
    pub fn from_xy(points: &[DVec2]) -> Self {
        Self::new(points.iter().map(|p| p.extend(0.0)).collect())
    }

    /// Sets the colors.
    #[must_use]
    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = colors;
        self
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// Named sub-geometries, kept in insertion order.
///
/// # Example
///
/// ```rust
/// use shape_convert::{OpenPath, Scene};
///
/// let mut scene = Scene::new();
/// scene.insert("a", OpenPath::from_xy(&[[0.0, 0.0], [1.0, 1.0]]));
/// scene.insert("b", OpenPath::from_xy(&[[1.0, 0.0], [0.0, 1.0]]));
/// let names: Vec<&str> = scene.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entries: Vec<(String, GeometrySource)>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Re-inserting a name replaces its geometry in place.
    pub fn insert(&mut self, name: impl Into<String>, geometry: impl Into<GeometrySource>) {
        let name = name.into();
        let geometry = geometry.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = geometry,
            None => self.entries.push((name, geometry)),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the scene has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeometrySource)> {
        self.entries.iter().map(|(name, geometry)| (name.as_str(), geometry))
    }

    pub(crate) fn map_geometry(&self, f: impl Fn(&GeometrySource) -> GeometrySource) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(name, geometry)| (name.clone(), f(geometry)))
                .collect(),
        }
    }
}

impl<S: Into<String>, G: Into<GeometrySource>> FromIterator<(S, G)> for Scene {
    fn from_iter<I: IntoIterator<Item = (S, G)>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for (name, geometry) in iter {
            scene.insert(name, geometry);
        }
        scene
    }
}

// =============================================================================
// EXTERNAL GEOMETRY
// =============================================================================

/// A value of a type the engine has no built-in converter for.
///
/// User-registered converters recognize it by downcasting.
#[derive(Clone)]
pub struct ExternalGeometry {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl ExternalGeometry {
    /// Wraps a value, remembering its type name.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Fully qualified type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrows the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// True if the wrapped value has type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }
}

impl fmt::Debug for ExternalGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalGeometry")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
