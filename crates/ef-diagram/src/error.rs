//! Error types for diagram construction and value injection.

use ef_core::BlockId;
use thiserror::Error;

pub type DiagramResult<T> = Result<T, DiagramError>;

/// Errors raised while building a diagram or injecting values.
///
/// Construction errors are fatal for the build: no partially wired diagram
/// is ever returned. Per-tick evaluation never raises; blocks that cannot
/// produce a value go null for the tick instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiagramError {
    /// A block lists a source id that resolves to no block in the diagram.
    ///
    /// The field is `source_id`, not `source`: a field named `source` would
    /// be picked up as the `Error::source()` cause chain by the derive.
    #[error("block {block} references unknown source {source_id}")]
    UnresolvedSource { block: BlockId, source_id: BlockId },

    /// Two blocks share an id.
    #[error("duplicate block id {block}")]
    DuplicateBlockId { block: BlockId },

    /// The source wiring contains a dependency cycle.
    #[error("dependency cycle through block {block}")]
    CyclicGraph { block: BlockId },

    /// Value injection targeted an id that is not in the diagram.
    #[error("no block with id {block}")]
    UnknownBlock { block: BlockId },

    /// A literal value could not be parsed as a number.
    #[error("block {block} has an invalid numeric literal: {literal:?}")]
    InvalidLiteral { block: BlockId, literal: String },
}
