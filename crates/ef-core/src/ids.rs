use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a block within one diagram.
///
/// Ids are assigned by the diagram author (they arrive in the spec), must be
/// unique within a diagram, and are stable for the diagram's lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub i64);

impl BlockId {
    /// Create a new block ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for BlockId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<BlockId> for i64 {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
