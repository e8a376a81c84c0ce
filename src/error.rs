//! Error types and result utilities for sequence diagram operations.

use thiserror::Error;

/// Convenience type alias for results that may contain SeqPlotError
pub type SeqPlotResult<T> = Result<T, SeqPlotError>;

/// Error types that can occur while building or rendering a sequence diagram.
///
/// Every variant is fatal to the operation that produced it; there is no
/// partial or best-effort diagram. Numeric edge cases (NaN/Inf from degenerate
/// shape parameters) are not errors and propagate through the buffers instead.
#[derive(Error, Debug)]
pub enum SeqPlotError {
    /// A channel name was looked up that was never created in the store.
    #[error("Unknown channel: '{0}'")]
    ChannelNotFound(String),

    /// A channel with the same name already exists in the store.
    ///
    /// Re-creating a channel would silently discard accumulated waveform data,
    /// so the collision is surfaced instead.
    #[error("Channel '{0}' already exists")]
    DuplicateChannel(String),

    /// A channel was built from a different time grid than the rest of the
    /// diagram. Grids are compared by identity, not by value.
    #[error("Channel '{channel}' does not share the diagram's time grid")]
    GridMismatch {
        /// Name of the offending channel.
        channel: String,
    },

    /// An amplitude vector could not be broadcast against the channel buffer.
    ///
    /// Overlay counts must be equal, or one of the two sides must be 1.
    #[error(
        "Cannot broadcast {incoming} overlay variant(s) against a buffer holding {existing}"
    )]
    BroadcastMismatch {
        /// Overlay count already held by the channel buffer.
        existing: usize,
        /// Overlay count of the incoming element.
        incoming: usize,
    },

    /// The time grid failed validation (empty, too short, non-finite or
    /// non-increasing sample points).
    #[error("Invalid time grid: {0}")]
    InvalidGrid(String),

    /// An annotation referenced a row label that the layout does not define.
    #[error("Unknown row label: '{0}'")]
    UnknownRow(String),

    /// The layout defines no rows at all.
    #[error("Layout defines no rows")]
    EmptyLayout,

    /// A layout row references no channels.
    #[error("Row '{0}' references no channels")]
    EmptyRow(String),

    /// The rendering backend reported a failure.
    #[error("Rendering failed: {0}")]
    Render(String),
}
