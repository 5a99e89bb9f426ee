use std::io::{self, Read, Seek, SeekFrom};

use super::error::BencodeError;
use crate::constants::{DEFAULT_STRICT_DECODING, MAX_DEPTH};

/// A read-only, seekable byte source with one byte of lookahead.
///
/// The decoder classifies every value by its first byte, so it needs to look
/// at the next byte without consuming it. `PeekReader` caches at most one
/// peeked byte and keeps [`position`](Self::position) and [`Seek`] consistent
/// with that cache: while a byte is pending, the reported position is one
/// byte behind the underlying source's cursor.
///
/// The reader also carries the decoding policy: whether dictionaries must
/// arrive with their keys in ascending order (strict mode) and how deeply
/// lists and dictionaries may nest.
///
/// A `PeekReader` is meant for one decode at a time. It is not shared.
///
/// # Examples
///
/// ```
/// use bencoding::bencode::PeekReader;
/// use std::io::Cursor;
///
/// let mut reader = PeekReader::new(Cursor::new(b"i42e".to_vec()));
/// assert_eq!(reader.peek_byte().unwrap(), Some(b'i'));
/// assert_eq!(reader.position().unwrap(), 0);
/// assert_eq!(reader.read_byte().unwrap(), Some(b'i'));
/// assert_eq!(reader.position().unwrap(), 1);
/// assert!(reader.strict_decoding());
/// ```
#[derive(Debug)]
pub struct PeekReader<R> {
    inner: R,
    peeked: Option<u8>,
    strict: bool,
    max_depth: usize,
    depth: usize,
}

impl<R: Read + Seek> PeekReader<R> {
    /// Wraps `inner` using the default (strict) decoding policy.
    pub fn new(inner: R) -> Self {
        Self::with_strictness(inner, DEFAULT_STRICT_DECODING)
    }

    /// Wraps `inner` with strict key ordering disabled.
    pub fn lenient(inner: R) -> Self {
        Self::with_strictness(inner, false)
    }

    pub fn with_strictness(inner: R, strict: bool) -> Self {
        Self {
            inner,
            peeked: None,
            strict,
            max_depth: MAX_DEPTH,
            depth: 0,
        }
    }

    /// Sets the maximum nesting of lists and dictionaries.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns true if dictionaries must have ascending keys.
    pub fn strict_decoding(&self) -> bool {
        self.strict
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the next byte without consuming it, or `None` at end of input.
    ///
    /// Repeated calls without an intervening read return the same byte.
    pub fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = read_one(&mut self.inner)?;
        }
        Ok(self.peeked)
    }

    /// Consumes and returns the next byte, or `None` at end of input.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.peeked.take() {
            Some(byte) => Ok(Some(byte)),
            None => read_one(&mut self.inner),
        }
    }

    /// Returns the logical position, accounting for a pending peeked byte.
    pub fn position(&mut self) -> io::Result<u64> {
        let pos = self.inner.stream_position()?;
        Ok(if self.peeked.is_some() { pos - 1 } else { pos })
    }

    /// Moves to `pos`. Moving to a different position drops the peeked byte.
    pub fn set_position(&mut self, pos: u64) -> io::Result<()> {
        if pos != self.position()? {
            self.inner.seek(SeekFrom::Start(pos))?;
            self.peeked = None;
        }
        Ok(())
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the underlying source. A pending peeked byte is lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    pub(crate) fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        self.peek_byte().map_err(BencodeError::from_io)
    }

    pub(crate) fn next_byte(&mut self) -> Result<u8, BencodeError> {
        self.read_byte()
            .map_err(BencodeError::from_io)?
            .ok_or(BencodeError::UnexpectedEof)
    }

    pub(crate) fn expect_byte(
        &mut self,
        expected: u8,
        what: &'static str,
    ) -> Result<(), BencodeError> {
        match self.next_byte()? {
            byte if byte == expected => Ok(()),
            byte => Err(BencodeError::unexpected(what, byte)),
        }
    }

    /// Runs `f` one nesting level deeper, failing once the limit is hit.
    pub(crate) fn nested<T, F>(&mut self, f: F) -> Result<T, BencodeError>
    where
        F: FnOnce(&mut Self) -> Result<T, BencodeError>,
    {
        if self.depth >= self.max_depth {
            return Err(BencodeError::NestingTooDeep);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

fn read_one<R: Read>(inner: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match inner.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

impl<R: Read + Seek> Read for PeekReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.peeked.take() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => self.inner.read(buf),
        }
    }
}

impl<R: Read + Seek> Seek for PeekReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let pos = match pos {
            SeekFrom::Current(offset) if self.peeked.is_some() => {
                let offset = offset.checked_sub(1).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "seek offset out of range")
                })?;
                SeekFrom::Current(offset)
            }
            pos => pos,
        };
        let new_pos = self.inner.seek(pos)?;
        self.peeked = None;
        Ok(new_pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        self.position()
    }
}
