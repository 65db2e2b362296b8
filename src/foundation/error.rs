/// Convenience result type used across the crate.
pub type RelicResult<T> = Result<T, RelicError>;

/// Top-level error taxonomy used by compiler APIs.
#[derive(thiserror::Error, Debug)]
pub enum RelicError {
    /// Caller-supplied data violates an encode or layout bound.
    #[error("validation error: {0}")]
    Validation(String),

    /// A length field exceeded the remaining buffer while decoding a bundle.
    #[error("malformed bundle: {0}")]
    MalformedBundle(String),

    /// A required symbol/manifest/assets input is absent for an item.
    #[error("missing descriptor: {0}")]
    MissingDescriptor(String),

    /// The computed atlas exceeds the configured maximum bounds.
    #[error("packing overflow: {0}")]
    PackingOverflow(String),

    /// A single bundle entry failed to parse or decode.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// The external decompiler collaborator failed or timed out.
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RelicError {
    /// Build a [`RelicError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RelicError::MalformedBundle`] value.
    pub fn malformed_bundle(msg: impl Into<String>) -> Self {
        Self::MalformedBundle(msg.into())
    }

    /// Build a [`RelicError::MissingDescriptor`] value.
    pub fn missing_descriptor(msg: impl Into<String>) -> Self {
        Self::MissingDescriptor(msg.into())
    }

    /// Build a [`RelicError::PackingOverflow`] value.
    pub fn packing_overflow(msg: impl Into<String>) -> Self {
        Self::PackingOverflow(msg.into())
    }

    /// Build a [`RelicError::DecodeFailure`] value.
    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Build a [`RelicError::ExternalTool`] value.
    pub fn external_tool(msg: impl Into<String>) -> Self {
        Self::ExternalTool(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
