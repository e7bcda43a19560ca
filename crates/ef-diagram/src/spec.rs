//! Diagram specification schema.
//!
//! This is the wire format a diagram arrives in (typically JSON pushed from
//! the authoring UI). The spec is consumed once at construction; diagrams
//! are rebuilt wholesale on replacement, never patched incrementally.

use ef_core::{BlockId, Param};
use serde::{Deserialize, Serialize};

/// Output type tag marking an opaque image payload.
pub const IMAGE_TYPE: &str = "i";

/// Specification of a whole diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSpec {
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

/// Specification of one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Unique id within the diagram.
    pub id: BlockId,
    /// Display name; not required to be unique.
    pub name: String,
    /// Type tag dispatched through the block registry.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Ids of the blocks feeding this one, in input order.
    #[serde(default)]
    pub sources: Vec<BlockId>,
    /// Number of defined inputs required before the block computes.
    pub input_count: usize,
    /// Optional initial value; its textual form carries the precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Input type tag; together with `output_type`, absence marks a block
    /// bound to a physical device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Output type tag; `"i"` marks an image payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
    /// Optional explicit precision; overridden by a literal initial value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
}

/// Literal value as written in a spec: a bare number or a string whose
/// textual form carries the intended precision (`"2.500"` is three places).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    /// Textual form of the literal, used for precision inference.
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => format!("{n}"),
            Self::Text(s) => s.clone(),
        }
    }
}
