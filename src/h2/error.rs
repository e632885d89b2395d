//! HTTP/2 generator error types
//!
//! Every error is fatal for the generation call that produced it: no partial
//! buffer is ever returned.

/// Frame generation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Payload length or stream ID outside the representable range
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Header name or value longer than the literal encoding allows
    #[error("Header too long: {name} is {len} bytes (max {max})", max = super::MAX_HEADER_STRING_LEN)]
    HeaderTooLong {
        /// Header name the oversized string belongs to
        name: String,
        /// Byte length of the offending string
        len: usize,
    },

    /// Malformed logical request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error while persisting generated output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for frame generation
pub type Result<T> = std::result::Result<T, Error>;
