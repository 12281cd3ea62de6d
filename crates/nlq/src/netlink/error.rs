//! Error types for message construction.

use std::collections::TryReserveError;

/// Result type for message construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building netlink messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The message buffer could not be allocated or grown.
    #[error("buffer allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    /// Attribute record does not fit the 16-bit length field.
    #[error("attribute {attr_type} too large: {len} bytes (max {})", u16::MAX)]
    AttributeTooLarge {
        /// The attribute type being encoded.
        attr_type: u16,
        /// Record length including the attribute header.
        len: usize,
    },

    /// Message does not fit the 32-bit length field.
    #[error("message too large: {len} bytes (max {})", u32::MAX)]
    MessageTooLarge {
        /// Total message length.
        len: usize,
    },

    /// Not enough bytes to read a fixed-size record.
    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected record length.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
}

impl Error {
    /// Check if this is an allocation failure.
    pub fn is_alloc(&self) -> bool {
        matches!(self, Self::Alloc(_))
    }

    /// Check if a length field would have overflowed.
    pub fn is_too_large(&self) -> bool {
        matches!(
            self,
            Self::AttributeTooLarge { .. } | Self::MessageTooLarge { .. }
        )
    }
}
