/// Convenience result type used across vdsl.
pub type VdslResult<T> = Result<T, VdslError>;

/// Hard error taxonomy for APIs outside the (never failing) DSL parser.
///
/// Problems inside a `$v` log are soft: they are collected into [`crate::Frame::errors`].
/// `VdslError` is reserved for callers asking for something that does not exist, or for
/// presentation steps that genuinely fail.
#[derive(thiserror::Error, Debug)]
pub enum VdslError {
    /// Invalid caller-provided data (unknown mode, frame index out of range, bad bounds).
    #[error("validation error: {0}")]
    Validation(String),

    /// Layout could not be computed for a command.
    #[error("layout error: {0}")]
    Layout(String),

    /// Building or rasterizing an SVG document failed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VdslError {
    /// Build a [`VdslError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VdslError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`VdslError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`VdslError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<std::fmt::Error> for VdslError {
    fn from(_: std::fmt::Error) -> Self {
        Self::render("failed to format svg document")
    }
}

impl From<serde_json::Error> for VdslError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
