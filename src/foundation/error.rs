/// Convenience result alias used across the crate.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Every failure the editing core can report.
///
/// None of these are fatal to a session: the operation that produced one is refused and the
/// editor state is left as it was before the call.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// Rejected locally before any mutation (empty text, malformed URL, bad scale, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A base image or thumbnail could not be decoded.
    #[error("asset load failure: {0}")]
    AssetLoad(String),

    /// An image decode finished after a newer load superseded it.
    #[error("stale load result: ticket {ticket} superseded by {current}")]
    StaleResult {
        /// Generation of the load that just completed.
        ticket: u64,
        /// Generation the session is currently waiting on.
        current: u64,
    },

    /// Drawing surface invariants were violated.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding the surface to an image payload failed.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped third-party failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build an [`ThumbError::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build an [`ThumbError::AssetLoad`].
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build an [`ThumbError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`ThumbError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// `true` for results the caller is expected to drop silently.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResult { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
