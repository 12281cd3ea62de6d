//! Append-only growable byte buffer backing a message under construction.

use super::error::Result;

/// Default initial capacity: one page, enough for most requests.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Append-only byte accumulator.
///
/// Bytes can only be added, never removed or overwritten. [`close`](Self::close)
/// consumes the buffer, so no append can follow it.
#[derive(Debug, Clone, Default)]
pub struct GrowBuf {
    data: Vec<u8>,
}

impl GrowBuf {
    /// Open an empty buffer with room for `capacity` bytes.
    pub fn open(capacity: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve(capacity).inspect_err(|e| {
            tracing::debug!(capacity, error = %e, "failed to open message buffer");
        })?;
        Ok(Self { data })
    }

    /// Append `bytes` at the end of the buffer.
    ///
    /// On failure the buffer is left unchanged.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.data.try_reserve(bytes.len()).inspect_err(|e| {
            tracing::debug!(
                len = self.data.len(),
                additional = bytes.len(),
                error = %e,
                "failed to grow message buffer"
            );
        })?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append zero bytes until the length is a multiple of `align`.
    ///
    /// `align` must be a power of two.
    pub fn pad_to(&mut self, align: usize) -> Result<()> {
        debug_assert!(align.is_power_of_two());
        let padded = (self.data.len() + align - 1) & !(align - 1);
        self.data.try_reserve(padded - self.data.len())?;
        self.data.resize(padded, 0);
        Ok(())
    }

    /// Number of bytes appended so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the bytes appended so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Freeze the buffer and hand over its storage.
    ///
    /// The returned vector's length is the total number of bytes appended.
    pub fn close(self) -> Vec<u8> {
        self.data
    }
}
