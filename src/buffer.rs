//! Owned copies of engine output

use crate::{Error, Result};

/// Scratch capacity handed to the engine for scan output.
pub const SCAN_BUFFER_CAPACITY: usize = 100_000;

/// Scratch capacity handed to the engine for parser output.
pub const PARSER_BUFFER_CAPACITY: usize = 10_000;

/// Bytes produced by one engine call, owned by the host.
///
/// The logical length never exceeds the allocation. An empty buffer means the
/// engine found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResultBuffer {
    data: Vec<u8>,
}

impl RawResultBuffer {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Take ownership of a caller-supplied scratch buffer after the engine
    /// reported writing `len` bytes into it.
    ///
    /// A length beyond the scratch capacity means the engine wrote past the
    /// allocation; the contents are dropped unread.
    pub fn from_scratch(mut scratch: Vec<u8>, len: usize) -> Result<Self> {
        let capacity = scratch.len();
        if len > capacity {
            return Err(Error::BufferOverrunFatal { len, capacity });
        }
        scratch.truncate(len);
        Ok(Self { data: scratch })
    }

    /// Copy engine-owned bytes. Releasing the source stays with the caller.
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for RawResultBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for RawResultBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
