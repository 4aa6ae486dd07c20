//! Byte source for the parser.
//!
//! Wraps any [`Read`] in a buffer and adds one byte of lookahead, one byte
//! of pushback and a running offset used in error messages.

use std::io::{BufReader, Bytes, Read};

use crate::error::ParseResult;

/// Buffered reader with single-byte pushback.
pub struct Reader<R: Read> {
    bytes: Bytes<BufReader<R>>,
    pending: Option<u8>,
    pos: u64,
}

impl<R: Read> Reader<R> {
    /// Create a new reader over the given stream.
    pub fn new(input: R) -> Self {
        Self {
            bytes: BufReader::new(input).bytes(),
            pending: None,
            pos: 0,
        }
    }

    /// Offset of the next byte to be consumed.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Peek at the next byte without consuming it.
    pub fn peek(&mut self) -> ParseResult<Option<u8>> {
        if self.pending.is_none() {
            self.pending = self.bytes.next().transpose()?;
        }
        Ok(self.pending)
    }

    /// Consume and return the next byte.
    pub fn advance(&mut self) -> ParseResult<Option<u8>> {
        let b = match self.pending.take() {
            Some(b) => Some(b),
            None => self.bytes.next().transpose()?,
        };
        if b.is_some() {
            self.pos += 1;
        }
        Ok(b)
    }

    /// Push the byte just returned by [`advance`](Reader::advance) back.
    ///
    /// Only one byte can be pending at a time.
    pub fn unread(&mut self, b: u8) {
        debug_assert!(self.pending.is_none(), "pushback slot already occupied");
        self.pending = Some(b);
        self.pos -= 1;
    }

    /// Skip whitespace characters.
    pub fn skip_whitespace(&mut self) -> ParseResult<()> {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek()? {
            self.advance()?;
        }
        Ok(())
    }

    /// Skip whitespace, then consume the next byte.
    pub fn next_significant(&mut self) -> ParseResult<Option<u8>> {
        self.skip_whitespace()?;
        self.advance()
    }

    /// Consume `expected` byte by byte, stopping at the first mismatch.
    pub fn consume_exact(&mut self, expected: &[u8]) -> ParseResult<bool> {
        for &b in expected {
            if self.advance()? != Some(b) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_peek_does_not_consume() {
        let mut reader = Reader::new(&b"ab"[..]);
        assert_eq!(reader.peek().unwrap(), Some(b'a'));
        assert_eq!(reader.peek().unwrap(), Some(b'a'));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.advance().unwrap(), Some(b'a'));
        assert_eq!(reader.advance().unwrap(), Some(b'b'));
        assert_eq!(reader.advance().unwrap(), None);
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn test_unread() {
        let mut reader = Reader::new(&b"-1"[..]);
        let b = reader.advance().unwrap().unwrap();
        reader.unread(b);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.advance().unwrap(), Some(b'-'));
        assert_eq!(reader.advance().unwrap(), Some(b'1'));
    }

    #[test]
    fn test_next_significant_skips_whitespace() {
        let mut reader = Reader::new(&b" \t\r\n ,"[..]);
        assert_eq!(reader.next_significant().unwrap(), Some(b','));
        assert_eq!(reader.position(), 6);
        assert_eq!(reader.next_significant().unwrap(), None);
    }

    #[test]
    fn test_consume_exact() {
        let mut reader = Reader::new(&b"ull,"[..]);
        assert!(reader.consume_exact(b"ull").unwrap());
        assert_eq!(reader.peek().unwrap(), Some(b','));

        let mut reader = Reader::new(&b"ul"[..]);
        assert!(!reader.consume_exact(b"ull").unwrap());

        let mut reader = Reader::new(&b"uxl"[..]);
        assert!(!reader.consume_exact(b"ull").unwrap());
    }

    struct FailingRead;

    impl Read for FailingRead {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_io_error_surfaces() {
        let mut reader = Reader::new(FailingRead);
        let err = reader.advance().unwrap_err();
        assert_eq!(err.code(), 111);
    }
}
