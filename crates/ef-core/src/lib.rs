//! ef-core: stable foundation for edgeflow.
//!
//! Contains:
//! - ids (spec-assigned block identifiers)
//! - value (runtime value: number or opaque image payload)
//! - params (parameter records + first-match lookup)
//! - decimal (precision inference + exact half-up rounding)
//! - error (shared error types)

pub mod decimal;
pub mod error;
pub mod ids;
pub mod params;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use decimal::{decimal_places_of_literal, format_places, infer_places, round_half_up};
pub use error::{CoreError, CoreResult};
pub use ids::BlockId;
pub use params::{Param, read_param, read_param_obj};
pub use value::Value;
