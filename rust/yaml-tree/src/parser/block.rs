// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Block collection parsing (indentation-based dictionaries and arrays).

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind};
use crate::node::{Node, Quote};

use super::anchor::merge_overrides;
use super::scalar::{plain_key, read_quoted, read_token};
use super::{
    Parser, Scope, advance_to_next_indent, at_any_document_marker, at_break, is_blank,
    is_separator, skip_blanks,
};

impl Parser {
    pub fn is_array(&self, cursor: &mut Cursor, scope: Scope) -> bool {
        !scope.flow && cursor.current() == Some('-') && is_separator(cursor.peek(1))
    }

    pub fn is_dictionary(&self, cursor: &mut Cursor, scope: Scope) -> bool {
        !scope.flow && probe_key(cursor)
    }

    /// Parse a block array. Items continue while lines start with `- ` at the
    /// column of the first one.
    pub fn parse_array(&mut self, cursor: &mut Cursor, _scope: Scope) -> Result<Node, Error> {
        let indent = cursor.column();
        let mut items = Vec::new();

        loop {
            // Step over the `-` indicator.
            cursor.next()?;
            skip_blanks(cursor);
            let item = if cursor.current() == Some('#') || at_break(cursor) {
                advance_to_next_indent(cursor);
                if cursor.more() && !at_any_document_marker(cursor) && cursor.column() > indent {
                    self.parse_value(cursor, Scope::block(indent))?
                } else {
                    Node::Null
                }
            } else {
                self.parse_value(cursor, Scope::block(indent))?
            };
            items.push(item);

            advance_to_next_indent(cursor);
            if !cursor.more() || at_any_document_marker(cursor) || cursor.column() < indent {
                break;
            }
            if cursor.column() > indent {
                return Err(cursor.error(ErrorKind::ArrayIndentation));
            }
            if !self.is_array(cursor, Scope::block(indent)) {
                break;
            }
        }

        Ok(Node::Array(items))
    }

    /// Parse a block dictionary. Entries continue while keys start at the
    /// column of the first one.
    pub fn parse_dictionary(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let indent = cursor.column();
        let mut dictionary = Node::dictionary();
        let mut overrides = Vec::new();

        loop {
            if self.is_override(cursor, scope) {
                overrides.extend(self.parse_override_targets(cursor, Scope::block(indent))?);
            } else {
                let key = self.parse_key(cursor)?;
                let key_text = key.to_key();
                if dictionary.contains(&key_text) {
                    return Err(cursor.error(ErrorKind::DuplicateKey(key_text)));
                }
                let value = self.parse_block_value(cursor, indent)?;
                dictionary.insert(key, value)?;
            }

            advance_to_next_indent(cursor);
            if !cursor.more() || at_any_document_marker(cursor) || cursor.column() < indent {
                break;
            }
            if cursor.column() > indent {
                return Err(cursor.error(ErrorKind::DictionaryIndentation));
            }
            if !self.is_override(cursor, scope) && !probe_key(cursor) {
                return Err(cursor.error(ErrorKind::MissingKeyValue));
            }
        }

        if let Node::Dictionary(entries) = &mut dictionary {
            merge_overrides(entries, overrides);
        }
        Ok(dictionary)
    }

    /// Parse the value following a block key's `:`.
    fn parse_block_value(&mut self, cursor: &mut Cursor, indent: usize) -> Result<Node, Error> {
        let scope = Scope::key_value(indent);
        skip_blanks(cursor);

        if cursor.current() == Some('#') || at_break(cursor) {
            advance_to_next_indent(cursor);
            if !cursor.more() || at_any_document_marker(cursor) {
                return Ok(Node::Null);
            }
            let column = cursor.column();
            // A block array may sit at its key's own column.
            if column > indent || (column == indent && self.is_array(cursor, scope)) {
                return self.parse_value(cursor, Scope::block(indent));
            }
            return Ok(Node::Null);
        }

        if self.is_dictionary(cursor, scope) {
            return Err(cursor.error(ErrorKind::NestedMappingOnKeyLine));
        }
        if self.is_array(cursor, scope) {
            return Err(cursor.error(ErrorKind::ArrayIndentation));
        }
        self.parse_value(cursor, scope)
    }

    /// Parse a block key and its `:` indicator.
    ///
    /// Quoted keys keep their quotes, inline collections become their `to_key()`
    /// text and plain booleans, nulls and numbers are normalised to canonical text.
    fn parse_key(&mut self, cursor: &mut Cursor) -> Result<Node, Error> {
        let start = cursor.position();
        let location = cursor.location();
        let key = match cursor.current() {
            Some('"' | '\'') => read_quoted(cursor)?,
            Some(open @ ('[' | '{')) => {
                let scope = Scope::block(cursor.column()).into_flow();
                let (node, kind) = if open == '[' {
                    (self.parse_inline_array(cursor, scope)?, "array")
                } else {
                    (self.parse_inline_dictionary(cursor, scope)?, "dictionary")
                };
                if cursor.line() != location.line {
                    return Err(Error::at(
                        ErrorKind::KeyNotOnOneLine(kind),
                        location,
                        cursor.span_from(start),
                    ));
                }
                Node::quoted(node.to_key(), Quote::Double)
            }
            _ => {
                let token = read_token(cursor, Scope::DOCUMENT);
                if token.is_empty() {
                    return Err(Error::at(
                        ErrorKind::InvalidKey(token),
                        location,
                        cursor.span_from(start),
                    ));
                }
                plain_key(token)
            }
        };
        skip_blanks(cursor);
        if !cursor.matches(":") {
            return Err(cursor.error(ErrorKind::MissingKeyValue));
        }
        Ok(key)
    }
}

/// Whether a block key followed by `:` and a separator starts at the cursor.
/// The cursor is left where it was.
pub(crate) fn probe_key(cursor: &mut Cursor) -> bool {
    cursor.save();
    let found = scan_key(cursor);
    cursor.restore();
    found
}

fn scan_key(cursor: &mut Cursor) -> bool {
    match cursor.current() {
        None | Some('#' | '&' | '*' | '|' | '>' | '\n') => return false,
        Some('-') if is_separator(cursor.peek(1)) => return false,
        Some(quote @ ('"' | '\'')) => {
            if !skip_quoted_on_line(cursor, quote) {
                return false;
            }
        }
        Some('[' | '{') => {
            if !skip_bracketed(cursor) {
                return false;
            }
        }
        Some(_) => {
            cursor.consume_while(|ch, next| {
                !(ch == '\n' || (is_blank(ch) && next == Some('#')) || (ch == ':' && is_separator(next)))
            });
        }
    }
    skip_blanks(cursor);
    cursor.current() == Some(':') && is_separator(cursor.peek(1))
}

/// Skip a quoted scalar that closes on the current line.
fn skip_quoted_on_line(cursor: &mut Cursor, quote: char) -> bool {
    let mut escaped = false;
    let mut first = true;
    let mut closed = false;
    cursor.consume_while(|ch, next| {
        if first {
            first = false;
            return true;
        }
        if closed || ch == '\n' {
            return false;
        }
        if escaped {
            escaped = false;
        } else if quote == '"' && ch == '\\' {
            escaped = true;
        } else if quote == '\'' && ch == '\'' && next == Some('\'') {
            escaped = true;
        } else if ch == quote {
            closed = true;
        }
        true
    });
    closed
}

/// Skip a bracketed flow collection up to its matching closer, across lines.
fn skip_bracketed(cursor: &mut Cursor) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut closed = false;
    cursor.consume_while(|ch, _| {
        if closed {
            return false;
        }
        match (quote, ch) {
            (Some(open), ch) if ch == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[' | '{') => depth += 1,
            (None, ']' | '}') => {
                depth = depth.saturating_sub(1);
                closed = depth == 0;
            }
            (None, _) => {}
        }
        true
    });
    closed
}
