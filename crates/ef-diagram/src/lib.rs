//! ef-diagram: diagram graph construction and per-tick evaluation.
//!
//! A diagram is a named directed graph of typed blocks: leaf blocks carry
//! externally injected values (sensors, user entries), derived blocks
//! compute through the filter library, and sink blocks (no destinations)
//! anchor each evaluation pass.
//!
//! # Evaluation model
//!
//! One `Diagram::update` call is one control tick. Every block is first
//! marked stale, then each sink pulls values down through its sources
//! recursively; the staleness flag guarantees each block computes at most
//! once per pass even under heavy fan-out. Numeric results are rounded with
//! exact half-up decimal rounding to the maximum precision of the defined
//! sources.
//!
//! # Concurrency
//!
//! Evaluation is single-threaded and synchronous: a pass mutates block
//! values, precision and staleness in place, so one `update` must complete
//! before the next begins on the same diagram.

pub mod block;
pub mod diagram;
pub mod error;
pub mod registry;
pub mod spec;

pub use block::Block;
pub use diagram::Diagram;
pub use error::{DiagramError, DiagramResult};
pub use registry::Behavior;
pub use spec::{BlockSpec, DiagramSpec, IMAGE_TYPE, Literal};
