//! Low-level character cursor for signature and descriptor decoding.
//!
//! This module provides the [`crate::Parser`] type, a cursor over the bytes of a raw
//! signature attribute string. It offers bounds-checked access with one byte of
//! lookahead, which is all the generic-signature grammar needs.
//!
//! # Key Components
//!
//! - [`crate::Parser::peek_byte`] - Look at the current byte without consuming it
//! - [`crate::Parser::read_byte`] - Consume the current byte
//! - [`crate::Parser::expect`] - Consume a specific byte or fail with its offset
//! - [`crate::Parser::read_identifier`] - Consume an identifier up to a delimiter
//!
//! All failures are reported as [`crate::Error::SignatureSyntax`] carrying the byte
//! offset of the cursor and the token class that was expected there.
//!
//! # Usage Examples
//!
//! ```rust
//! use sigscope::{Expected, Parser};
//!
//! let mut parser = Parser::new("TK;");
//! parser.expect(b'T', Expected::ReferenceType)?;
//! assert_eq!(parser.read_identifier(b";")?, "K");
//! parser.expect(b';', Expected::Char(';'))?;
//! assert!(!parser.has_more_data());
//! # Ok::<(), sigscope::Error>(())
//! ```

use crate::{Expected, Result};

/// A cursor over a signature string.
///
/// Signatures are modified-UTF-8 text in the class file, handed to us as Rust
/// strings. Every delimiter of the grammar is ASCII, so scanning bytes and
/// slicing at delimiter positions always lands on character boundaries.
pub struct Parser<'a> {
    /// The text being parsed
    data: &'a str,
    /// Current byte position within the text
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] over a string.
    ///
    /// # Arguments
    /// * `data` - The text to read from
    #[must_use]
    pub fn new(data: &'a str) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current byte position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Returns the full text this parser reads from.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.data
    }

    /// Peek at the current byte without advancing; `None` at the end of input.
    #[must_use]
    pub fn peek_byte(&self) -> Option<u8> {
        self.data.as_bytes().get(self.position).copied()
    }

    /// Returns `true` if the current byte equals `byte`.
    #[must_use]
    pub fn peek_is(&self, byte: u8) -> bool {
        self.peek_byte() == Some(byte)
    }

    /// Move the position forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] if the cursor is already at the end.
    pub fn advance(&mut self) -> Result<()> {
        if !self.has_more_data() {
            return Err(syntax_error!(self.position, Expected::EndOfInput));
        }
        self.position += 1;
        Ok(())
    }

    /// Consume the current byte.
    ///
    /// # Arguments
    /// * `expected` - Token class reported if the input is exhausted
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] on end of input.
    pub fn read_byte(&mut self, expected: Expected) -> Result<u8> {
        match self.peek_byte() {
            Some(byte) => {
                self.position += 1;
                Ok(byte)
            }
            None => Err(syntax_error!(self.position, expected)),
        }
    }

    /// Consume `byte` or fail.
    ///
    /// # Arguments
    /// * `byte`     - The byte that must come next
    /// * `expected` - Token class reported on mismatch
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] pointing at the current position if the
    /// next byte differs or the input is exhausted.
    pub fn expect(&mut self, byte: u8, expected: Expected) -> Result<()> {
        if self.peek_is(byte) {
            self.position += 1;
            Ok(())
        } else {
            Err(syntax_error!(self.position, expected))
        }
    }

    /// Consume a non-empty run of bytes up to (not including) the first delimiter.
    ///
    /// Reaching the end of input before a delimiter is an error: every identifier
    /// in the grammar is terminated by one.
    ///
    /// # Arguments
    /// * `delimiters` - Bytes that end the identifier
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] if the identifier is empty or unterminated.
    pub fn read_identifier(&mut self, delimiters: &[u8]) -> Result<&'a str> {
        let start = self.position;
        let bytes = self.data.as_bytes();
        while let Some(&byte) = bytes.get(self.position) {
            if delimiters.contains(&byte) {
                break;
            }
            self.position += 1;
        }

        if self.position == start {
            return Err(syntax_error!(start, Expected::Identifier));
        }
        if !self.has_more_data() {
            return Err(syntax_error!(self.position, Expected::Identifier));
        }

        Ok(&self.data[start..self.position])
    }

    /// Fail unless all input has been consumed.
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] pointing at the first trailing byte.
    pub fn finish(&self) -> Result<()> {
        if self.has_more_data() {
            Err(syntax_error!(self.position, Expected::EndOfInput))
        } else {
            Ok(())
        }
    }
}
