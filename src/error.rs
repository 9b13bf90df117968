use thiserror::Error;

/// Errors surfaced by the HDBSCAN model.
#[derive(Debug, Clone, Error)]
pub enum HdbscanError {
    /// A hyper parameter or the input data is unusable. Raised at entry to
    /// `fit`, before any clustering work begins.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// An accessor was called before a successful call to `fit`.
    #[error("model has not been fitted")]
    NotFitted,
    /// A resource failure during fitting. The model is left unfitted.
    #[error("resource failure during fit: {0}")]
    Resource(String),
}
