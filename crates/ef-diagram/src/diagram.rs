//! Diagram: a named block arena plus the per-tick evaluation pass.

use std::collections::{BTreeMap, HashMap};

use ef_core::{
    BlockId, Value, decimal_places_of_literal, format_places, infer_places, round_half_up,
};
use tracing::debug;

use crate::block::Block;
use crate::error::{DiagramError, DiagramResult};
use crate::spec::DiagramSpec;

/// A data flow diagram: a named, validated collection of blocks.
///
/// Blocks live in a vector arena; ids resolve to arena indices through a
/// side map built at construction. The diagram owns its blocks exclusively
/// and is discarded wholesale when a replacement spec arrives.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub name: String,
    blocks: Vec<Block>,
    index: HashMap<BlockId, usize>,
}

impl Diagram {
    /// Build and wire a diagram from its spec.
    ///
    /// Fails (returning no partial diagram) on a duplicate block id, a
    /// source id that resolves to no block, an invalid initial literal, or
    /// a dependency cycle.
    pub fn from_spec(spec: &DiagramSpec) -> DiagramResult<Self> {
        let mut blocks = Vec::with_capacity(spec.blocks.len());
        let mut index = HashMap::with_capacity(spec.blocks.len());
        for block_spec in &spec.blocks {
            let block = Block::from_spec(block_spec)?;
            if index.insert(block.id, blocks.len()).is_some() {
                return Err(DiagramError::DuplicateBlockId { block: block.id });
            }
            blocks.push(block);
        }

        // Wire source links and destination back-links by id.
        for (i, block_spec) in spec.blocks.iter().enumerate() {
            for &source_id in &block_spec.sources {
                let source_idx =
                    *index
                        .get(&source_id)
                        .ok_or(DiagramError::UnresolvedSource {
                            block: block_spec.id,
                            source_id,
                        })?;
                blocks[i].sources.push(source_idx);
                blocks[source_idx].dests.push(i);
            }
        }

        let diagram = Self {
            name: spec.name.clone(),
            blocks,
            index,
        };
        diagram.check_acyclic()?;
        debug!(name = %diagram.name, blocks = diagram.blocks.len(), "diagram constructed");
        Ok(diagram)
    }

    /// All blocks, in spec order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get a block by id; `None` if absent.
    pub fn find_by_id(&self, id: BlockId) -> Option<&Block> {
        self.index.get(&id).map(|&i| &self.blocks[i])
    }

    /// Get a block by name; `None` if absent.
    ///
    /// Names are not required to be unique: the first match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Inject an externally produced numeric value into a block, carrying
    /// the precision implied by the literal's textual form.
    pub fn inject_literal(&mut self, id: BlockId, literal: &str) -> DiagramResult<()> {
        let places =
            decimal_places_of_literal(literal).map_err(|_| DiagramError::InvalidLiteral {
                block: id,
                literal: literal.to_string(),
            })?;
        let number: f64 = literal
            .trim()
            .parse()
            .map_err(|_| DiagramError::InvalidLiteral {
                block: id,
                literal: literal.to_string(),
            })?;
        let block = self.block_mut(id)?;
        block.value = Some(Value::Number(number));
        block.decimal_places = places;
        Ok(())
    }

    /// Inject an opaque image payload into a block.
    pub fn inject_image(&mut self, id: BlockId, payload: impl Into<String>) -> DiagramResult<()> {
        let block = self.block_mut(id)?;
        block.value = Some(Value::Image(payload.into()));
        Ok(())
    }

    /// Clear a block's value, e.g. when its sensor drops offline.
    pub fn clear_value(&mut self, id: BlockId) -> DiagramResult<()> {
        let block = self.block_mut(id)?;
        block.value = None;
        Ok(())
    }

    /// Evaluate one control tick.
    ///
    /// Every block is marked stale, then each sink (no destinations) pulls
    /// values down through its sources; the staleness flag guarantees each
    /// block computes at most once per pass even under fan-out.
    pub fn update(&mut self) {
        for block in &mut self.blocks {
            block.stale = true;
        }
        for idx in 0..self.blocks.len() {
            if self.blocks[idx].dests.is_empty() {
                self.update_block(idx);
            }
        }
    }

    /// Snapshot of per-block outputs for the surrounding control loop.
    ///
    /// Numeric values are rendered fixed-point at the block's current
    /// precision; image payloads pass through untouched.
    pub fn outputs(&self) -> BTreeMap<BlockId, Option<String>> {
        self.blocks
            .iter()
            .map(|block| {
                let rendered = block.value.as_ref().map(|value| match value {
                    Value::Number(n) => format_places(*n, block.decimal_places),
                    Value::Image(payload) => payload.clone(),
                });
                (block.id, rendered)
            })
            .collect()
    }

    fn block_mut(&mut self, id: BlockId) -> DiagramResult<&mut Block> {
        match self.index.get(&id) {
            Some(&i) => Ok(&mut self.blocks[i]),
            None => Err(DiagramError::UnknownBlock { block: id }),
        }
    }

    /// Recursive pull: recompute one block, updating stale sources first.
    fn update_block(&mut self, idx: usize) {
        // Timers advance on every pass, whatever their wiring looks like.
        if self.blocks[idx].behavior.is_timer() {
            let block = &mut self.blocks[idx];
            block.value = block.behavior.compute(&[], &block.params);
            block.stale = false;
            return;
        }

        // Leaf blocks are fed from outside; nothing to recompute.
        if self.blocks[idx].required_sources == 0 {
            self.blocks[idx].stale = false;
            return;
        }

        // Gather defined source values, refreshing stale sources first, and
        // track the maximum source precision as this block's precision.
        let source_indices = self.blocks[idx].sources.clone();
        let mut inputs = Vec::with_capacity(source_indices.len());
        let mut source_places = Vec::with_capacity(source_indices.len());
        for source_idx in source_indices {
            if self.blocks[source_idx].stale {
                self.update_block(source_idx);
            }
            if let Some(value) = self.blocks[source_idx].value.clone() {
                source_places.push(self.blocks[source_idx].decimal_places);
                inputs.push(value);
            }
        }
        let places = infer_places(source_places);

        let block = &mut self.blocks[idx];
        block.decimal_places = places;
        // A wired-but-null source does not count toward the requirement.
        block.value = if !inputs.is_empty() && inputs.len() >= block.required_sources {
            match block.behavior.compute(&inputs, &block.params) {
                Some(Value::Number(n)) if block.is_numeric() => {
                    Some(Value::Number(round_half_up(n, places)))
                }
                other => other,
            }
        } else {
            None
        };
        block.stale = false;
    }

    /// Reject source wiring that contains a cycle.
    ///
    /// The pull evaluation recurses along source links, so an undetected
    /// cycle would recurse without bound. Iterative DFS coloring over the
    /// arena finds one at construction instead.
    fn check_acyclic(&self) -> DiagramResult<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Open,
            Done,
        }

        let mut marks = vec![Mark::New; self.blocks.len()];
        for start in 0..self.blocks.len() {
            if marks[start] != Mark::New {
                continue;
            }
            marks[start] = Mark::Open;
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            while let Some(frame) = stack.last_mut() {
                let idx = frame.0;
                if frame.1 < self.blocks[idx].sources.len() {
                    let child = self.blocks[idx].sources[frame.1];
                    frame.1 += 1;
                    match marks[child] {
                        Mark::Open => {
                            return Err(DiagramError::CyclicGraph {
                                block: self.blocks[child].id,
                            });
                        }
                        Mark::New => {
                            marks[child] = Mark::Open;
                            stack.push((child, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[idx] = Mark::Done;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}
