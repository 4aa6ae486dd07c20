//! Recursive descent JSON parser.
//!
//! One routine per grammar production. The dispatcher consumes the first
//! significant byte to pick a production; for numbers that byte belongs to
//! the token and is pushed back before [`Parser::parse_number`] runs. No
//! other backtracking happens.
//!
//! Departures from RFC 8259, kept on purpose:
//!
//! - string escapes are limited to `\n \t \r \" \\`; raw tabs and other
//!   control bytes are accepted, raw LF/CR are not
//! - empty `[]` / `{}` are rejected when [`Limits::allow_empty_containers`]
//!   is off
//! - integers outside the `i32` range become doubles

use std::io::Read;
use std::str::FromStr;

use crate::error::{ParseError, ParseResult};
use crate::limits::Limits;
use crate::reader::Reader;
use crate::types::{Array, Document, Node, Object};

/// JSON parser over a byte stream.
pub struct Parser<R: Read> {
    reader: Reader<R>,
    limits: Limits,
    depth: u64,
}

impl<R: Read> Parser<R> {
    /// Create a new parser for the given input.
    pub fn new(input: R, limits: Limits) -> Self {
        Self {
            reader: Reader::new(input),
            limits,
            depth: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Parse one complete JSON text.
    ///
    /// Only whitespace may follow the root value.
    pub fn parse(&mut self) -> ParseResult<Node> {
        let value = self.parse_value()?;

        self.reader.skip_whitespace()?;
        if self.reader.peek()?.is_some() {
            return Err(ParseError::TrailingCharacters(self.reader.position()));
        }

        Ok(value)
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> ParseResult<Node> {
        match self.reader.next_significant()? {
            None => Err(ParseError::UnexpectedEof("value")),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(b'"') => self.parse_string().map(Node::from),
            Some(b'n') => self.parse_literal("null", Node::null()),
            Some(b't') => self.parse_literal("true", Node::from(true)),
            Some(b'f') => self.parse_literal("false", Node::from(false)),
            Some(b @ (b'-' | b'0'..=b'9')) => {
                self.reader.unread(b);
                self.parse_number()
            }
            Some(b) => Err(self.unexpected(b, "a value")),
        }
    }

    /// Parse a JSON array; the opening bracket is already consumed.
    fn parse_array(&mut self) -> ParseResult<Node> {
        self.enter()?;
        tracing::trace!(offset = self.reader.position(), depth = self.depth, "array");

        let mut arr = Array::new();

        self.reader.skip_whitespace()?;
        if self.reader.peek()? == Some(b']') {
            self.reader.advance()?;
            self.check_empty("array")?;
            self.depth -= 1;
            return Ok(Node::from(arr));
        }

        loop {
            arr.push(self.parse_value()?);

            match self.reader.next_significant()? {
                Some(b',') => {}
                Some(b']') => break,
                Some(b) => return Err(self.unexpected(b, "',' or ']'")),
                None => return Err(ParseError::UnexpectedEof("array")),
            }
        }

        self.depth -= 1;
        Ok(Node::from(arr))
    }

    /// Parse a JSON object; the opening brace is already consumed.
    ///
    /// A repeated key replaces the earlier value.
    fn parse_object(&mut self) -> ParseResult<Node> {
        self.enter()?;
        tracing::trace!(
            offset = self.reader.position(),
            depth = self.depth,
            "object"
        );

        let mut map = Object::new();

        match self.reader.next_significant()? {
            Some(b'"') => {}
            Some(b'}') => {
                self.check_empty("object")?;
                self.depth -= 1;
                return Ok(Node::from(map));
            }
            Some(b) => return Err(self.unexpected(b, "a string key or '}'")),
            None => return Err(ParseError::UnexpectedEof("object")),
        }

        loop {
            let key = self.parse_string()?;

            match self.reader.next_significant()? {
                Some(b':') => {}
                Some(b) => return Err(self.unexpected(b, "':'")),
                None => return Err(ParseError::UnexpectedEof("object")),
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            match self.reader.next_significant()? {
                Some(b',') => {}
                Some(b'}') => break,
                Some(b) => return Err(self.unexpected(b, "',' or '}'")),
                None => return Err(ParseError::UnexpectedEof("object")),
            }

            // Trailing comma is not allowed in JSON
            match self.reader.next_significant()? {
                Some(b'"') => {}
                Some(b) => return Err(self.unexpected(b, "a string key")),
                None => return Err(ParseError::UnexpectedEof("object")),
            }
        }

        self.depth -= 1;
        Ok(Node::from(map))
    }

    /// Parse string contents; the opening quote is already consumed.
    fn parse_string(&mut self) -> ParseResult<String> {
        let mut buf = Vec::new();

        loop {
            let b = self
                .reader
                .advance()?
                .ok_or(ParseError::UnexpectedEof("string"))?;
            match b {
                b'"' => break,
                b'\\' => {
                    let escaped = self
                        .reader
                        .advance()?
                        .ok_or(ParseError::UnexpectedEof("string"))?;
                    buf.push(match escaped {
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'r' => b'\r',
                        b'"' => b'"',
                        b'\\' => b'\\',
                        other => {
                            let offset = self.reader.position() - 1;
                            return Err(ParseError::InvalidEscape {
                                escape: self.finish_char(other)?,
                                offset,
                            });
                        }
                    });
                }
                b'\n' | b'\r' => {
                    return Err(ParseError::LineBreakInString(self.reader.position() - 1));
                }
                b => buf.push(b),
            }

            if buf.len() as u64 > self.limits.max_string_length {
                return Err(ParseError::StringTooLong(
                    buf.len() as u64,
                    self.limits.max_string_length,
                ));
            }
        }

        String::from_utf8(buf).map_err(|_| ParseError::InvalidUtf8(self.reader.position()))
    }

    /// Decode the character whose first byte is `lead`, reading any UTF-8
    /// continuation bytes that follow it.
    fn finish_char(&mut self, lead: u8) -> ParseResult<char> {
        let len = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Ok(char::from(lead)),
        };
        let mut bytes = vec![lead];
        for _ in 1..len {
            match self.reader.advance()? {
                Some(b) => bytes.push(b),
                None => break,
            }
        }
        Ok(std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Parse a number token.
    ///
    /// Integers that fit in `i32` become `Int`; anything with a fraction, an
    /// exponent, or outside the `i32` range becomes `Double`.
    fn parse_number(&mut self) -> ParseResult<Node> {
        let mut text = String::new();

        if self.reader.peek()? == Some(b'-') {
            self.read_char(&mut text)?;
        }

        // Integer part
        if self.reader.peek()? == Some(b'0') {
            self.read_char(&mut text)?;
            if let Some(b'0'..=b'9') = self.reader.peek()? {
                return Err(ParseError::MalformedNumber {
                    text,
                    reason: "leading zero followed by a digit",
                });
            }
        } else {
            self.read_digits(&mut text)?;
        }

        let mut is_int = true;

        // Fractional part
        if self.reader.peek()? == Some(b'.') {
            self.read_char(&mut text)?;
            self.read_digits(&mut text)?;
            is_int = false;
        }

        // Exponent
        if let Some(b'e' | b'E') = self.reader.peek()? {
            self.read_char(&mut text)?;
            if let Some(b'+' | b'-') = self.reader.peek()? {
                self.read_char(&mut text)?;
            }
            self.read_digits(&mut text)?;
            is_int = false;
        }

        if is_int {
            if let Ok(n) = text.parse::<i32>() {
                return Ok(Node::from(n));
            }
        }

        match text.parse::<f64>() {
            Ok(d) if d.is_finite() => Ok(Node::from(d)),
            _ => Err(ParseError::MalformedNumber {
                text,
                reason: "out of double range",
            }),
        }
    }

    /// Append the next byte of a number token to `text`.
    fn read_char(&mut self, text: &mut String) -> ParseResult<()> {
        match self.reader.advance()? {
            Some(b) => {
                text.push(char::from(b));
                Ok(())
            }
            None => Err(ParseError::UnexpectedEof("number")),
        }
    }

    /// Append one or more digits to `text`.
    fn read_digits(&mut self, text: &mut String) -> ParseResult<()> {
        if !matches!(self.reader.peek()?, Some(b'0'..=b'9')) {
            return Err(ParseError::MalformedNumber {
                text: std::mem::take(text),
                reason: "a digit is expected",
            });
        }
        while let Some(b'0'..=b'9') = self.reader.peek()? {
            self.read_char(text)?;
        }
        Ok(())
    }

    /// Match the rest of a keyword; its first byte is already consumed.
    fn parse_literal(&mut self, keyword: &'static str, node: Node) -> ParseResult<Node> {
        let offset = self.reader.position() - 1;
        if self.reader.consume_exact(&keyword.as_bytes()[1..])? {
            Ok(node)
        } else {
            Err(ParseError::UnrecognizedLiteral {
                expected: keyword,
                offset,
            })
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::NestingTooDeep(
                self.depth,
                self.limits.max_nesting_depth,
            ));
        }
        Ok(())
    }

    fn check_empty(&self, kind: &'static str) -> ParseResult<()> {
        if self.limits.allow_empty_containers {
            Ok(())
        } else {
            Err(ParseError::EmptyContainer(kind))
        }
    }

    /// Error for byte `b`, which was just consumed.
    fn unexpected(&self, b: u8, expected: &'static str) -> ParseError {
        ParseError::UnexpectedCharacter {
            found: char::from(b),
            offset: self.reader.position() - 1,
            expected,
        }
    }
}

/// Parse a JSON text from a stream with standard limits.
pub fn load<R: Read>(input: R) -> ParseResult<Document> {
    load_with_limits(input, Limits::standard())
}

/// Parse a JSON text from a stream with custom limits.
#[tracing::instrument(level = "debug", skip_all, err(level = "debug"))]
pub fn load_with_limits<R: Read>(input: R, limits: Limits) -> ParseResult<Document> {
    let mut parser = Parser::new(input, limits);
    let root = parser.parse()?;
    tracing::debug!(
        kind = root.type_name(),
        bytes = parser.position(),
        "parsed document"
    );
    Ok(Document::new(root))
}

/// Parse a JSON text held in memory.
pub fn load_str(input: &str) -> ParseResult<Document> {
    load(input.as_bytes())
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        load_str(s)
    }
}

impl FromStr for Node {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        load_str(s).map(Document::into_root)
    }
}
