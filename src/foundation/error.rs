/// Result type used across the crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Error taxonomy of the retrieval and overlay APIs.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// Blank query text or an unknown category hint.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Image bytes that do not decode, or a raster type that is not accepted.
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),

    /// Catalog data that breaks a pattern invariant.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Failures while rasterizing an overlay or SVG artwork.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::InvalidQuery`] value.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Build a [`LayoutError::UnsupportedMedia`] value.
    pub fn unsupported_media(msg: impl Into<String>) -> Self {
        Self::UnsupportedMedia(msg.into())
    }

    /// Build a [`LayoutError::InvalidCatalog`] value.
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    /// Build a [`LayoutError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LayoutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors the caller can fix by changing its input.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidQuery(_) | Self::UnsupportedMedia(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
