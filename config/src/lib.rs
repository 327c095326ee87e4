//! # Config Crate
//!
//! Centralized configuration constants for the geometry-to-shape conversion
//! engine. Tolerances, default option values and safety limits are defined
//! here so the converters never carry magic numbers of their own.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_zero, DEFAULT_MIN_EDGE_ANGLE, EPSILON};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//! assert!(approx_zero(value));
//!
//! // Edge suppression is disabled by default
//! assert_eq!(DEFAULT_MIN_EDGE_ANGLE, 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Renderer-Agnostic**: No values tied to a particular drawing backend
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
