//! Error types for filter operations.

use thiserror::Error;

pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised by the image filters.
///
/// These never abort an evaluation pass; the diagram layer degrades them to
/// a null value for the failing block on that tick.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The payload was not valid base64 text.
    #[error("image payload is not valid base64: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    /// The decoded bytes were not a decodable image, or re-encoding failed.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}
