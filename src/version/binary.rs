//! Bounds-checked little-endian reader for the binary encodings

use tracing::trace;

use crate::config::LENGTH_PREFIX_LEN;
use crate::version::error::VersionError;

/// Sequential reader over a byte slice.
///
/// Every read checks the remaining length first and fails with
/// [`VersionError::TruncatedInput`] instead of panicking.
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], VersionError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(VersionError::TruncatedInput {
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        trace!("Read {} bytes, {} remaining", len, self.remaining());
        Ok(bytes)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, VersionError> {
        let mut buf = [0u8; LENGTH_PREFIX_LEN];
        buf.copy_from_slice(self.read_bytes(LENGTH_PREFIX_LEN)?);
        Ok(u32::from_le_bytes(buf))
    }

    /// Read a `u32` length prefix followed by that many bytes
    pub(crate) fn read_prefixed(&mut self) -> Result<&'a [u8], VersionError> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }
}

/// Append a `u32` length prefix followed by the bytes themselves
pub(crate) fn write_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), VersionError> {
    let len =
        u32::try_from(bytes.len()).map_err(|_| VersionError::Oversized { len: bytes.len() })?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}
