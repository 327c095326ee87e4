//! # Conversion Registry
//!
//! An ordered table of `(predicate, converter)` pairs. Conversion scans the
//! table front to back and hands the source to the first converter whose
//! predicate accepts it. New pairs are inserted at the front, so a later
//! registration shadows an earlier or built-in one without removing it.
//!
//! ## Example
//!
//! ```rust
//! use shape_convert::shape::{DrawMode, Primitive, Shape};
//! use shape_convert::{ConvertOptions, ExternalGeometry, GeometrySource, Registry};
//!
//! struct Marker;
//!
//! let mut registry = Registry::with_defaults();
//! registry.register(
//!     |source| matches!(source, GeometrySource::External(e) if e.is::<Marker>()),
//!     |_, _| Ok(Shape::primitive(Primitive::new(DrawMode::Points))),
//! );
//!
//! let source: GeometrySource = ExternalGeometry::new(Marker).into();
//! let shape = registry.convert(&source, &ConvertOptions::default())?;
//! assert!(shape.as_primitive().is_some());
//! # Ok::<(), shape_convert::ConvertError>(())
//! ```


use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use config::constants::MAX_RECURSION_DEPTH;

use crate::error::{ConvertError, ConvertResult};
use crate::mesh::convert_mesh;
use crate::options::ConvertOptions;
use crate::polygon::{convert_open_path, convert_point_set, convert_polygon, convert_ring};
use crate::scene::{convert_collection, convert_scene};
use crate::shape::Shape;
use crate::source::GeometrySource;
use crate::transform::flip_y;

/// Decides whether a converter handles a source.
pub type Predicate = dyn Fn(&GeometrySource) -> bool + Send + Sync;

/// Converts a source the paired predicate accepted.
pub type Converter =
    dyn Fn(&GeometrySource, &Conversion<'_>) -> ConvertResult<Shape> + Send + Sync;

#[derive(Clone)]
struct Entry {
    predicate: Arc<Predicate>,
    converter: Arc<Converter>,
}

/// State of one running conversion, handed to every converter.
///
/// Composite converters call [`Conversion::convert`] for their members so
/// the members go through the same table with the same options.
pub struct Conversion<'a> {
    registry: &'a Registry,
    options: &'a ConvertOptions,
    depth: usize,
}

impl<'a> Conversion<'a> {
    /// Options of the running conversion.
    pub fn options(&self) -> &'a ConvertOptions {
        self.options
    }

    /// Nesting depth of the source being converted; the root is at zero.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Converts a member of the current source.
    ///
    /// The vertical flip was applied to the whole root already and is not
    /// repeated here.
    pub fn convert(&self, member: &GeometrySource) -> ConvertResult<Shape> {
        let depth = self.depth + 1;
        if depth > MAX_RECURSION_DEPTH {
            return Err(ConvertError::RecursionLimit {
                depth,
                max: MAX_RECURSION_DEPTH,
            });
        }
        self.registry.dispatch(
            member,
            &Conversion {
                registry: self.registry,
                options: self.options,
                depth,
            },
        )
    }
}

/// Table of converters, most recently registered first.
///
/// Cloning shares the converters; the clone's table can grow independently.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Creates a registry with no converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(
            |s| matches!(s, GeometrySource::Polygon(_)),
            |s, _| match s {
                GeometrySource::Polygon(polygon) => Ok(convert_polygon(polygon)),
                other => Err(ConvertError::unsupported(other.type_name())),
            },
        );
        self.register(
            |s| matches!(s, GeometrySource::LinearRing(_)),
            |s, c| match s {
                GeometrySource::LinearRing(ring) => Ok(convert_ring(ring, c.options())),
                other => Err(ConvertError::unsupported(other.type_name())),
            },
        );
        self.register(
            |s| matches!(s, GeometrySource::OpenPath(_)),
            |s, c| match s {
                GeometrySource::OpenPath(path) => Ok(convert_open_path(path, c.options())),
                other => Err(ConvertError::unsupported(other.type_name())),
            },
        );
        self.register(
            |s| matches!(s, GeometrySource::PointSet(_)),
            |s, _| match s {
                GeometrySource::PointSet(set) => Ok(convert_point_set(set)),
                other => Err(ConvertError::unsupported(other.type_name())),
            },
        );
        self.register(
            |s| matches!(s, GeometrySource::IndexedMesh(_)),
            |s, c| match s {
                GeometrySource::IndexedMesh(mesh) => Ok(convert_mesh(mesh, c.options())),
                other => Err(ConvertError::unsupported(other.type_name())),
            },
        );
        self.register(
            |s| matches!(s, GeometrySource::Collection(_)),
            |s, c| match s {
                GeometrySource::Collection(members) => convert_collection(members, c),
                other => Err(ConvertError::unsupported(other.type_name())),
            },
        );
        self.register(
            |s| matches!(s, GeometrySource::Scene(_)),
            |s, c| match s {
                GeometrySource::Scene(scene) => convert_scene(scene, c),
                other => Err(ConvertError::unsupported(other.type_name())),
            },
        );
    }

    /// Adds a converter ahead of every existing one.
    pub fn register<P, C>(&mut self, predicate: P, converter: C)
    where
        P: Fn(&GeometrySource) -> bool + Send + Sync + 'static,
        C: Fn(&GeometrySource, &Conversion<'_>) -> ConvertResult<Shape> + Send + Sync + 'static,
    {
        self.entries.insert(
            0,
            Entry {
                predicate: Arc::new(predicate),
                converter: Arc::new(converter),
            },
        );
        tracing::debug!(converters = self.entries.len(), "registered shape converter");
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if some converter accepts the source.
    pub fn is_convertible(&self, source: &GeometrySource) -> bool {
        self.entries.iter().any(|entry| (entry.predicate)(source))
    }

    /// Converts a source into a Shape.
    ///
    /// With `flip_y_axis` set, the whole source is mirrored vertically once,
    /// before any converter runs.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnsupportedGeometry`] if no converter accepts the
    /// source, plus whatever the converters themselves return.
    pub fn convert(
        &self,
        source: &GeometrySource,
        options: &ConvertOptions,
    ) -> ConvertResult<Shape> {
        let conversion = Conversion {
            registry: self,
            options,
            depth: 0,
        };
        if options.flip_y_axis {
            self.dispatch(&flip_y(source), &conversion)
        } else {
            self.dispatch(source, &conversion)
        }
    }

    fn dispatch(
        &self,
        source: &GeometrySource,
        conversion: &Conversion<'_>,
    ) -> ConvertResult<Shape> {
        let Some((index, entry)) = self
            .entries
            .iter()
            .enumerate()
            .find(|(_, entry)| (entry.predicate)(source))
        else {
            return Err(ConvertError::unsupported(source.type_name()));
        };

        tracing::trace!(
            converter = index,
            type_name = source.type_name(),
            depth = conversion.depth,
            "converting geometry"
        );
        (entry.converter)(source, conversion)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("converters", &self.entries.len())
            .finish()
    }
}

// =============================================================================
// PROCESS-WIDE REGISTRY
// =============================================================================

fn global() -> &'static RwLock<Registry> {
    static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(Registry::with_defaults()))
}

/// Adds a converter to the process-wide registry, ahead of every existing
/// one. Meant to run at startup, before conversions begin.
///
/// A converter may call this while a conversion is running; the new entry
/// applies to conversions started afterwards.
pub fn register_converter<P, C>(predicate: P, converter: C)
where
    P: Fn(&GeometrySource) -> bool + Send + Sync + 'static,
    C: Fn(&GeometrySource, &Conversion<'_>) -> ConvertResult<Shape> + Send + Sync + 'static,
{
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(predicate, converter);
}

/// Converts a source with the process-wide registry.
///
/// Dispatch runs on a snapshot of the table, taken without holding the lock
/// while converters run.
///
/// ```rust
/// use shape_convert::{convert, ConvertOptions, Ring};
///
/// let ring = Ring::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
/// let shape = convert(&ring.into(), &ConvertOptions::default())?;
/// assert_eq!(shape.vertex_count(), 3);
/// # Ok::<(), shape_convert::ConvertError>(())
/// ```
pub fn convert(source: &GeometrySource, options: &ConvertOptions) -> ConvertResult<Shape> {
    let snapshot = global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    snapshot.convert(source, options)
}

/// True if the process-wide registry can convert the source.
pub fn is_convertible(source: &GeometrySource) -> bool {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_convertible(source)
}
