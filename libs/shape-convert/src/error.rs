//! # Conversion Errors
//!
//! Error types for shape conversion.
//!
//! ## Error Policy
//!
//! - Only inputs no converter claims are errors
//! - Degenerate but representable geometry converts to an empty or minimal
//!   shape instead of failing
//! - A failed conversion yields no partial shape

use thiserror::Error;

/// Errors that can occur during shape conversion.
///
/// ## Example
///
/// ```rust
/// use shape_convert::{ConvertError, ConvertOptions, GeometrySource, ExternalGeometry, Registry};
///
/// let registry = Registry::with_defaults();
/// let source = GeometrySource::External(ExternalGeometry::new(42_u8));
///
/// match registry.convert(&source, &ConvertOptions::default()) {
///     Err(ConvertError::UnsupportedGeometry { type_name }) => assert_eq!(type_name, "u8"),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// No registered converter claims the source.
    #[error("unable to convert geometry of type {type_name}")]
    UnsupportedGeometry {
        /// Fully qualified type name of the rejected source
        type_name: String,
    },

    /// A scene entry could not be converted.
    #[error("unable to convert scene member '{name}' of type {type_name}")]
    UnconvertibleSceneMember {
        /// Name of the scene entry
        name: String,
        /// Fully qualified type name of the entry's geometry
        type_name: String,
    },

    /// Scene or collection nesting exceeded the recursion limit.
    #[error("geometry nesting depth {depth} exceeds the limit of {max}")]
    RecursionLimit {
        /// Depth at which conversion stopped
        depth: usize,
        /// Configured maximum depth
        max: usize,
    },
}

impl ConvertError {
    /// Creates an unsupported geometry error.
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedGeometry {
            type_name: type_name.into(),
        }
    }

    /// Creates a scene member error.
    pub fn scene_member(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnconvertibleSceneMember {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::unsupported("shapely.geometry.Polygon");
        assert!(err.to_string().contains("shapely.geometry.Polygon"));

        let err = ConvertError::scene_member("wheel", "trimesh.Unknown");
        assert!(err.to_string().contains("wheel"));
        assert!(err.to_string().contains("trimesh.Unknown"));

        let err = ConvertError::RecursionLimit { depth: 300, max: 256 };
        assert!(err.to_string().contains("300"));
    }

    /// Errors must cross thread boundaries since conversions may run concurrently.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConvertError>();
    }
}
