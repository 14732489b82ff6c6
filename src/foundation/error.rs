/// Convenience result type used across the crate.
pub type GaugeResult<T> = Result<T, GaugeError>;

/// Top-level error taxonomy for the watch face.
#[derive(thiserror::Error, Debug)]
pub enum GaugeError {
    /// A value handed to a constructor is outside its documented range.
    #[error("validation error: {0}")]
    Validation(String),

    /// One of the required face images is absent or could not be decoded.
    ///
    /// This is raised while assets are prepared, never while a frame is drawn.
    #[error("missing asset '{name}': {detail}")]
    MissingAsset {
        /// Logical asset name (`background`, `needle`, ...).
        name: String,
        /// What went wrong while locating or decoding it.
        detail: String,
    },

    /// The drawing surface rejected an operation.
    #[error("render error: {0}")]
    Render(String),

    /// Manifest or layout (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GaugeError {
    /// Build a [`GaugeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GaugeError::MissingAsset`] value.
    pub fn missing_asset(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MissingAsset {
            name: name.into(),
            detail: detail.into(),
        }
    }

    /// Build a [`GaugeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GaugeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
