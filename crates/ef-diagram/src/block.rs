//! Block: one node in a diagram's arena.

use ef_core::{BlockId, Param, Value, decimal_places_of_literal};

use crate::error::{DiagramError, DiagramResult};
use crate::registry::Behavior;
use crate::spec::{BlockSpec, IMAGE_TYPE};

/// Type tags that map to physical sensors.
///
/// A sensor may be disconnected, so a spec-given initial value is ignored
/// for these: the block reads null until hardware injects a reading.
const SENSOR_DEVICE_TYPES: &[&str] = &["temperature", "humidity", "light", "soilmoisture", "CO2"];

/// A block in a data flow diagram: an input, a filter, or an output.
///
/// Blocks live in their diagram's arena; source and destination links are
/// arena indices resolved at construction, so the graph carries no owning
/// references between blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    pub type_tag: String,
    /// Number of defined inputs required before this block computes.
    pub required_sources: usize,
    /// Current value; `None` means the block holds no value this tick.
    pub value: Option<Value>,
    /// Fractional digits the value is rounded and formatted to.
    /// Meaningless for image-typed blocks.
    pub decimal_places: u32,
    pub params: Vec<Param>,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
    /// Arena indices of the blocks feeding this one, in input order.
    pub(crate) sources: Vec<usize>,
    /// Arena indices of the blocks this one feeds (topology back-links).
    pub(crate) dests: Vec<usize>,
    /// Set at the start of each pass, cleared exactly once per pass.
    pub(crate) stale: bool,
    pub(crate) behavior: Behavior,
}

impl Block {
    /// Build a block from its spec entry. Source links are wired later by
    /// the diagram, once every block exists.
    pub(crate) fn from_spec(spec: &BlockSpec) -> DiagramResult<Self> {
        let behavior = Behavior::resolve(&spec.type_tag, &spec.params);
        let mut block = Self {
            id: spec.id,
            name: spec.name.clone(),
            type_tag: spec.type_tag.clone(),
            required_sources: spec.input_count,
            value: None,
            decimal_places: spec.decimal_places.unwrap_or(0),
            params: spec.params.clone(),
            input_type: spec.input_type.clone(),
            output_type: spec.output_type.clone(),
            sources: Vec::new(),
            dests: Vec::new(),
            stale: true,
            behavior,
        };

        if let Some(literal) = &spec.value {
            if !SENSOR_DEVICE_TYPES.contains(&spec.type_tag.as_str()) {
                let text = literal.to_text();
                if block.is_numeric() {
                    let places = decimal_places_of_literal(&text).map_err(|_| {
                        DiagramError::InvalidLiteral {
                            block: spec.id,
                            literal: text.clone(),
                        }
                    })?;
                    let number: f64 =
                        text.trim()
                            .parse()
                            .map_err(|_| DiagramError::InvalidLiteral {
                                block: spec.id,
                                literal: text.clone(),
                            })?;
                    block.value = Some(Value::Number(number));
                    block.decimal_places = places;
                } else {
                    block.value = Some(Value::Image(text));
                }
            }
        }

        Ok(block)
    }

    /// Whether the block's value is subject to decimal rounding.
    pub fn is_numeric(&self) -> bool {
        self.output_type.as_deref() != Some(IMAGE_TYPE)
    }

    /// Leaf blocks have no required sources; their values come from outside.
    pub fn is_leaf(&self) -> bool {
        self.required_sources == 0
    }

    /// Sinks have no destinations; they anchor the evaluation pass.
    pub fn is_sink(&self) -> bool {
        self.dests.is_empty()
    }

    /// Blocks with neither input nor output type are bound to a physical
    /// device (actuators, relays).
    pub fn is_device_bound(&self) -> bool {
        self.input_type.is_none() && self.output_type.is_none()
    }

    /// Arena indices of this block's sources, in input order.
    pub fn source_indices(&self) -> &[usize] {
        &self.sources
    }

    /// Arena indices of this block's destinations.
    pub fn dest_indices(&self) -> &[usize] {
        &self.dests
    }

    /// Whether the block still awaits (re)computation this pass.
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}
