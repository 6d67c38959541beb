//! Byte cursor and TLV header reader
//!
//! The reader knows nothing about the schema it walks. Callers decide from
//! the X.509 field order which header comes next, and use [`DerCursor::peek_tag`]
//! to test for optional fields before consuming anything.

use crate::error::{CertError, Result};

/// A decoded tag/length header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvHeader {
    /// The raw identifier octet.
    pub tag: u8,
    /// Declared length of the value that follows the header.
    pub length: usize,
}

/// An immutable byte buffer plus a forward-moving read position.
///
/// `0 <= position <= len` holds at all times; any read that would move past
/// the end fails with [`CertError::Truncated`] and leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct DerCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DerCursor<'a> {
    /// Create a cursor positioned at the first byte.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current absolute read offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The whole underlying buffer, independent of position.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Look at the next tag octet without consuming it.
    #[must_use]
    pub fn peek_tag(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Whether the next tag octet equals `tag`.
    #[must_use]
    pub fn next_is(&self, tag: u8) -> bool {
        self.peek_tag() == Some(tag)
    }

    /// Read one tag octet and its length.
    ///
    /// Short form: a length octet below `0x80` is the length itself. Long form:
    /// the low seven bits count the big-endian length octets that follow.
    /// A declared length larger than the bytes left after the header fails
    /// with `Truncated`, as does running out while reading the header itself.
    pub fn read_header(&mut self) -> Result<TlvHeader> {
        let start = self.pos;
        let header = self.read_header_unchecked();
        match header {
            Ok(header) if header.length > self.remaining() => {
                let err = self.truncated(header.length);
                self.pos = start;
                Err(err)
            }
            Ok(header) => Ok(header),
            Err(err) => {
                self.pos = start;
                Err(err)
            }
        }
    }

    fn read_header_unchecked(&mut self) -> Result<TlvHeader> {
        let tag = self.read_u8()?;
        let first = self.read_u8()?;

        if first & 0x80 == 0 {
            return Ok(TlvHeader {
                tag,
                length: usize::from(first),
            });
        }

        let count = usize::from(first & 0x7F);
        let octets = self.read_bytes(count)?;
        let mut length: usize = 0;
        for &octet in octets {
            length = length
                .checked_mul(256)
                .and_then(|l| l.checked_add(usize::from(octet)))
                .ok_or_else(|| {
                    CertError::malformed("length", format!("{count}-octet length overflows"))
                })?;
        }

        Ok(TlvHeader { tag, length })
    }

    /// Return the next `n` bytes and advance past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.truncated(n));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a header and then exactly the value it declares.
    pub fn read_tlv_value(&mut self) -> Result<(TlvHeader, &'a [u8])> {
        let header = self.read_header()?;
        let value = self.read_bytes(header.length)?;
        Ok((header, value))
    }

    /// Advance past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Move to an absolute offset. Offsets past the end fail with `Truncated`.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(CertError::Truncated {
                offset: self.pos,
                needed: offset - self.pos,
                remaining: self.remaining(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = self.peek_tag().ok_or_else(|| self.truncated(1))?;
        self.pos += 1;
        Ok(byte)
    }

    fn truncated(&self, needed: usize) -> CertError {
        CertError::Truncated {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }
}
