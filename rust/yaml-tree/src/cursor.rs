// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! A backtrackable character cursor over YAML source text.
//!
//! The cursor tracks the byte offset together with a 1-based line and column.
//! Speculative parsing pushes a snapshot with [`Cursor::save()`] and later
//! either rolls back with [`Cursor::restore()`] or keeps the progress with
//! [`Cursor::discard()`].

use chumsky::span::Span as _;

use crate::error::{Error, ErrorKind};
use crate::span::{Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mark {
    position: usize,
    line: usize,
    column: usize,
}

/// Cursor over an in-memory, LF-normalised copy of the source.
#[derive(Debug, Clone)]
pub struct Cursor {
    text: String,
    mark: Mark,
    saved: Vec<Mark>,
}

impl Cursor {
    /// Create a cursor over `source`.
    ///
    /// CRLF and lone CR line endings are normalised to LF. Empty input is rejected.
    pub fn new(source: &str) -> Result<Self, Error> {
        if source.is_empty() {
            return Err(ErrorKind::EmptySource.into());
        }
        let text = if source.contains('\r') {
            source.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            source.to_owned()
        };
        Ok(Self {
            text,
            mark: Mark {
                position: 0,
                line: 1,
                column: 1,
            },
            saved: Vec::new(),
        })
    }

    /// The character under the cursor, `None` once the end has been reached.
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` characters ahead of the cursor.
    pub fn peek(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Advance one character.
    #[allow(
        clippy::should_implement_trait,
        reason = "Advancing past the end is an error, not the end of an iteration"
    )]
    pub fn next(&mut self) -> Result<(), Error> {
        let Some(ch) = self.current() else {
            return Err(self.error(ErrorKind::ReadPastEnd));
        };
        self.bump(ch);
        Ok(())
    }

    pub fn more(&self) -> bool {
        self.mark.position < self.text.len()
    }

    /// Consume `literal` if the input continues with it; otherwise leave the cursor untouched.
    pub fn matches(&mut self, literal: &str) -> bool {
        if !self.rest().starts_with(literal) {
            return false;
        }
        literal.chars().for_each(|ch| self.bump(ch));
        true
    }

    /// Consume characters while `accept(current, following)` holds and return them.
    pub fn consume_while(&mut self, mut accept: impl FnMut(char, Option<char>) -> bool) -> String {
        let mut taken = String::new();
        while let Some(ch) = self.current() {
            if !accept(ch, self.peek(1)) {
                break;
            }
            self.bump(ch);
            taken.push(ch);
        }
        taken
    }

    /// Check whether the input continues with `literal` without consuming anything.
    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Push the current position so that it can be returned to later.
    pub fn save(&mut self) {
        self.saved.push(self.mark);
    }

    /// Pop the most recently saved position and return to it.
    pub fn restore(&mut self) {
        if let Some(mark) = self.saved.pop() {
            self.mark = mark;
        }
    }

    /// Pop the most recently saved position, keeping the current one.
    pub fn discard(&mut self) {
        self.saved.pop();
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.mark.position
    }

    pub fn line(&self) -> usize {
        self.mark.line
    }

    pub fn column(&self) -> usize {
        self.mark.column
    }

    pub fn location(&self) -> Position {
        Position::new(self.mark.line, self.mark.column)
    }

    /// Span from `start` up to the cursor.
    pub fn span_from(&self, start: usize) -> Span {
        Span::new((), start.min(self.mark.position)..self.mark.position)
    }

    /// Raw source text between two byte offsets previously returned by [`Cursor::position()`].
    pub fn slice(&self, start: usize, end: usize) -> &str {
        self.text.get(start..end).unwrap_or_default()
    }

    /// Move back `count` characters on the current line.
    pub fn backup(&mut self, count: usize) -> Result<(), Error> {
        if count >= self.mark.column {
            return Err(self.error(ErrorKind::BackupPastLineStart));
        }
        let consumed = self.text.get(..self.mark.position).unwrap_or_default();
        let bytes: usize = consumed.chars().rev().take(count).map(char::len_utf8).sum();
        self.mark.position -= bytes;
        self.mark.column -= count;
        Ok(())
    }

    /// Build an error positioned at the cursor.
    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.location(), self.span_from(self.mark.position))
    }

    /// Step over `ch`, which must be the current character.
    fn bump(&mut self, ch: char) {
        self.mark.position += ch.len_utf8();
        if ch == '\n' {
            self.mark.line += 1;
            self.mark.column = 1;
        } else {
            self.mark.column += 1;
        }
    }

    fn rest(&self) -> &str {
        self.text.get(self.mark.position..).unwrap_or_default()
    }
}
