use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("not a numeric literal: {literal:?}")]
    InvalidLiteral { literal: String },
}
