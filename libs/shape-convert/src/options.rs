//! # Conversion Options
//!
//! The option set threaded unchanged into whichever converter handles a
//! source. Known keys are typed fields; anything else is kept in `extra` so
//! user-registered converters can define their own keys.
//!
//! Options deserialize from JSON with camelCase keys:
//!
//! ```rust
//! use shape_convert::ConvertOptions;
//!
//! let options = ConvertOptions::from_json(r#"{ "flipYAxis": true, "minEdgeAngle": 0.2 }"#)?;
//! assert!(options.flip_y_axis);
//! assert!(options.facet_edges);
//! assert_eq!(options.min_edge_angle, 0.2);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::BTreeMap;

use config::constants::{
    DEFAULT_ALLOW_FILL_ON_OPEN_PATHS, DEFAULT_FACET_EDGES, DEFAULT_FLIP_Y_AXIS,
    DEFAULT_MIN_EDGE_ANGLE,
};
use serde::{Deserialize, Serialize};

use crate::shape::TextureRef;

/// Options recognized by the built-in converters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Mirror the root geometry vertically about its own center, once.
    pub flip_y_axis: bool,
    /// Let open paths and stand-alone rings keep the renderer's fill.
    pub allow_fill_on_open_paths: bool,
    /// Trace facet outlines for meshes.
    pub facet_edges: bool,
    /// Boundary edges with a dihedral angle below this (radians) are suppressed.
    pub min_edge_angle: f64,
    /// Texture overriding the one a mesh material refers to.
    pub texture: Option<TextureRef>,
    /// Keys no built-in converter reads.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            flip_y_axis: DEFAULT_FLIP_Y_AXIS,
            allow_fill_on_open_paths: DEFAULT_ALLOW_FILL_ON_OPEN_PATHS,
            facet_edges: DEFAULT_FACET_EDGES,
            min_edge_angle: DEFAULT_MIN_EDGE_ANGLE,
            texture: None,
            extra: BTreeMap::new(),
        }
    }
}

impl ConvertOptions {
    /// Parses options from a JSON object. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets `flip_y_axis`.
    #[must_use]
    pub fn with_flip_y_axis(mut self, flip: bool) -> Self {
        self.flip_y_axis = flip;
        self
    }

    /// Sets `allow_fill_on_open_paths`.
    #[must_use]
    pub fn with_fill_on_open_paths(mut self, allow: bool) -> Self {
        self.allow_fill_on_open_paths = allow;
        self
    }

    /// Sets `facet_edges`.
    #[must_use]
    pub fn with_facet_edges(mut self, enabled: bool) -> Self {
        self.facet_edges = enabled;
        self
    }

    /// Sets `min_edge_angle` in radians.
    #[must_use]
    pub fn with_min_edge_angle(mut self, radians: f64) -> Self {
        self.min_edge_angle = radians;
        self
    }

    /// Sets the texture override.
    #[must_use]
    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Stores a key for a custom converter.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Looks up a key for a custom converter.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert!(!options.flip_y_axis);
        assert!(!options.allow_fill_on_open_paths);
        assert!(options.facet_edges);
        assert_eq!(options.min_edge_angle, 0.0);
        assert!(options.texture.is_none());
        assert!(options.extra.is_empty());
    }

    #[test]
    fn test_from_json_empty_object() {
        let options = ConvertOptions::from_json("{}").unwrap();
        assert_eq!(options, ConvertOptions::default());
    }

    #[test]
    fn test_from_json_known_and_extra_keys() {
        let options = ConvertOptions::from_json(
            r#"{
                "allowFillOnOpenPaths": true,
                "facetEdges": false,
                "texture": "wood",
                "lineWeight": 2.5
            }"#,
        )
        .unwrap();
        assert!(options.allow_fill_on_open_paths);
        assert!(!options.facet_edges);
        assert_eq!(options.texture, Some(TextureRef::new("wood")));
        assert_eq!(options.extra("lineWeight"), Some(&serde_json::json!(2.5)));
    }

    #[test]
    fn test_from_json_rejects_wrong_type() {
        assert!(ConvertOptions::from_json(r#"{ "facetEdges": "yes" }"#).is_err());
    }

    #[test]
    fn test_builder_setters() {
        let options = ConvertOptions::default()
            .with_flip_y_axis(true)
            .with_fill_on_open_paths(true)
            .with_facet_edges(false)
            .with_min_edge_angle(0.5)
            .with_texture(TextureRef::new("t"))
            .with_extra("custom", serde_json::Value::Bool(true));
        assert!(options.flip_y_axis);
        assert!(options.allow_fill_on_open_paths);
        assert!(!options.facet_edges);
        assert_eq!(options.min_edge_angle, 0.5);
        assert_eq!(options.extra("custom"), Some(&serde_json::Value::Bool(true)));
    }
}
