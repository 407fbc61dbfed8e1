/// Convenience result type used across drinkmakr.
pub type DrinkResult<T> = Result<T, DrinkError>;

/// Top-level error taxonomy used by the compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum DrinkError {
    /// Invalid caller-provided buffers, sizes or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading, decoding or encoding image assets.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing recipes and configs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrinkError {
    /// Build a [`DrinkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DrinkError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`DrinkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
