use thiserror::Error;

/// Errors raised by the transform engine.
///
/// An unknown trigger is not an error; see [`crate::Dispatch::Ignored`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A non-finite value reached an operation (NaN or infinity).
    #[error("invalid parameter `{name}` for {op}: {value} is not finite")]
    InvalidParameter {
        op: &'static str,
        name: &'static str,
        value: f64,
    },
    /// A regular polygon needs at least three vertices.
    #[error("a regular polygon needs at least 3 sides, got {0}")]
    TooFewSides(usize),
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Reject NaN and infinities before anything is mutated.
pub(crate) fn ensure_finite(op: &'static str, name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TransformError::InvalidParameter { op, name, value })
    }
}
