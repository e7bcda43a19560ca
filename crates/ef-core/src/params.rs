//! Block parameter records.
//!
//! Parameters arrive as an ordered list of `{name, value, min?, max?}`
//! records. Lookup is by name, first match wins; duplicate names are
//! permitted and a missing parameter falls back to a caller default.

use serde::{Deserialize, Serialize};

/// One parameter record on a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Param {
    /// Create a plain name/value parameter.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            min: None,
            max: None,
        }
    }

    /// Create a parameter with a declared range.
    pub fn with_range(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            value,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Look up a parameter value by name, falling back to `default`.
pub fn read_param(params: &[Param], name: &str, default: f64) -> f64 {
    read_param_obj(params, name).map_or(default, |p| p.value)
}

/// Look up the full parameter record by name (first match).
pub fn read_param_obj<'a>(params: &'a [Param], name: &str) -> Option<&'a Param> {
    params.iter().find(|p| p.name == name)
}
