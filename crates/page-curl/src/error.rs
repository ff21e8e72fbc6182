//! Error types for page construction.

/// Errors raised when page geometry is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Page {axis} must be a positive finite length, got {value}")]
    InvalidDimension { axis: &'static str, value: f32 },

    #[error("Page needs at least one {0} segment")]
    NoSegments(&'static str),

    #[error("{0} bend segments exceed the 16-bit joint index range")]
    TooManySegments(u32),
}
