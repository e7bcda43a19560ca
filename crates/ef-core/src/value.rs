//! Runtime block values.

use serde::{Deserialize, Serialize};

/// Value held by a block between evaluation passes.
///
/// Numbers cover every sensor/operator/filter output; images are opaque
/// base64-encoded payloads that only the image filters ever look inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Scalar numeric value.
    Number(f64),
    /// Opaque encoded image payload (base64 text).
    Image(String),
}

impl Value {
    /// Get the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Image(_) => None,
        }
    }

    /// Get the image payload, if this is an image.
    pub fn as_image(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Image(payload) => Some(payload),
        }
    }

    /// Check whether this value is an image payload.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_accessors() {
        let v = Value::Number(2.5);
        assert_eq!(v.as_number(), Some(2.5));
        assert_eq!(v.as_image(), None);
        assert!(!v.is_image());
    }

    #[test]
    fn image_accessors() {
        let v = Value::Image("aGVsbG8=".to_string());
        assert_eq!(v.as_number(), None);
        assert_eq!(v.as_image(), Some("aGVsbG8="));
        assert!(v.is_image());
    }
}
