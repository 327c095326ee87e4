//! # Configuration Constants
//!
//! Centralized constants for the shape conversion engine. All geometry
//! tolerances, option defaults and recursion limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Option Defaults**: Default values of the conversion options
//! - **Topology**: Thresholds used when deriving mesh facets
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance, e.g. when testing whether a ring's closing point
/// repeats its first point or whether a signed area is zero.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// OPTION DEFAULTS
// =============================================================================

/// Default for the `flipYAxis` option.
///
/// Geometry is passed through with its own vertical orientation unless the
/// caller asks for a mirror.
pub const DEFAULT_FLIP_Y_AXIS: bool = false;

/// Default for the `allowFillOnOpenPaths` option.
///
/// Open paths and stand-alone rings render as strokes only.
pub const DEFAULT_ALLOW_FILL_ON_OPEN_PATHS: bool = false;

/// Default for the `facetEdges` option.
///
/// Mesh conversion traces facet outlines unless disabled.
pub const DEFAULT_FACET_EDGES: bool = true;

/// Default for the `minEdgeAngle` option (radians).
///
/// Boundary edges whose dihedral angle is strictly below this value are
/// suppressed. Zero keeps every facet boundary.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_MIN_EDGE_ANGLE;
///
/// let dihedral = 0.0_f64;
/// let suppressed = dihedral < DEFAULT_MIN_EDGE_ANGLE;
/// assert!(!suppressed);
/// ```
pub const DEFAULT_MIN_EDGE_ANGLE: f64 = 0.0;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Maximum dihedral angle (radians) between two adjacent triangles that are
/// still considered coplanar when facets are derived from vertex geometry.
///
/// Only used when a mesh does not carry its own facet grouping.
///
/// # Example
///
/// ```rust
/// use config::constants::FACET_ANGLE_TOLERANCE;
///
/// let angle_between_normals = 1e-6;
/// assert!(angle_between_normals < FACET_ANGLE_TOLERANCE);
/// ```
pub const FACET_ANGLE_TOLERANCE: f64 = 1e-4;

/// Minimum number of distinct points a ring needs to enclose an area.
///
/// Rings with fewer points are degenerate and are dropped silently.
pub const MIN_RING_POINTS: usize = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum nesting depth for recursive conversion.
///
/// Scenes and collections convert their members through the registry; this
/// bounds how deep that recursion may go.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_RECURSION_DEPTH;
///
/// let current_depth = 3;
/// assert!(current_depth < MAX_RECURSION_DEPTH);
/// ```
pub const MAX_RECURSION_DEPTH: usize = 256;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
