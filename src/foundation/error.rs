/// Convenience result type used across pixtile.
pub type PixtileResult<T> = Result<T, PixtileError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixtileError {
    /// A coordinate or rectangle lies outside the surface extent.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// The surface is in a state that forbids the operation (locked, disposed).
    #[error("state error: {0}")]
    State(String),

    /// Backing allocation or codec failure.
    #[error("resource error: {0}")]
    Resource(String),

    /// Invalid arguments supplied by the caller.
    #[error("misuse: {0}")]
    Misuse(String),

    /// The operation is not available for this surface representation.
    #[error("unsupported for this representation: {0}")]
    Unsupported(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixtileError {
    /// Build a [`PixtileError::OutOfBounds`] value.
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    /// Build a [`PixtileError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`PixtileError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`PixtileError::Misuse`] value.
    pub fn misuse(msg: impl Into<String>) -> Self {
        Self::Misuse(msg.into())
    }

    /// Build a [`PixtileError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
