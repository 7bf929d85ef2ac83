// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Arithmetic failures raised by matrix and transform operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// The matrix (or the submatrix an operation depends on) has a
    /// determinant too close to zero to invert.
    #[error("singular matrix (determinant {determinant})")]
    SingularMatrix {
        /// The offending determinant.
        determinant: f32,
    },
}

impl MathError {
    /// Accepts `determinant` for division or reports it as singular.
    ///
    /// Zero, subnormal and NaN determinants are all rejected; anything else is
    /// invertible as far as `f32` can represent the reciprocal.
    pub(crate) fn check_determinant(determinant: f32) -> Result<f32, Self> {
        if determinant.is_nan() || determinant.abs() < f32::MIN_POSITIVE {
            tracing::debug!(determinant, "refusing to invert singular matrix");
            return Err(Self::SingularMatrix { determinant });
        }
        Ok(determinant)
    }
}

/// Failures raised while decoding persisted values.
///
/// Decoding validates every field before building a value, so an error never
/// leaves a half-written result behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The text encoding had the wrong number of comma-separated fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Number of fields the type requires.
        expected: usize,
        /// Number of fields present in the input.
        found: usize,
    },
    /// A text field could not be parsed as an `f32`.
    #[error("field {index} is not a number: {text:?}")]
    InvalidNumber {
        /// Zero-based position of the field.
        index: usize,
        /// The offending text, trimmed.
        text: String,
    },
    /// The binary stream ended before the value was complete.
    #[error("truncated stream: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required to finish decoding.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// A tagged value carried a tag this version does not know.
    #[error("unknown variant tag {tag}")]
    UnknownVariant {
        /// The tag as read from the input.
        tag: u32,
    },
}
