// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Flow collection parsing (arrays and dictionaries in `[]` and `{}`).
//!
//! Flow collections may span lines; comments and line breaks between entries
//! are skipped. Entries must be separated by exactly one comma.

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind};
use crate::node::{Node, Quote};

use super::anchor::merge_overrides;
use super::scalar::{plain_key, read_quoted, read_token};
use super::{Parser, Scope, advance_to_next_indent, finish_line, skip_blanks};

impl Parser {
    pub fn is_inline_dictionary(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        cursor.current() == Some('{')
    }

    pub fn is_inline_array(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        cursor.current() == Some('[')
    }

    /// Inline dictionary in value position. In block context nothing but a
    /// comment may follow it on its last line.
    pub fn parse_inline_dictionary_value(
        &mut self,
        cursor: &mut Cursor,
        scope: Scope,
    ) -> Result<Node, Error> {
        let node = self.parse_inline_dictionary(cursor, scope.into_flow())?;
        if !scope.flow {
            finish_line(cursor)?;
        }
        Ok(node)
    }

    pub fn parse_inline_array_value(
        &mut self,
        cursor: &mut Cursor,
        scope: Scope,
    ) -> Result<Node, Error> {
        let node = self.parse_inline_array(cursor, scope.into_flow())?;
        if !scope.flow {
            finish_line(cursor)?;
        }
        Ok(node)
    }

    /// Parse `[a, b, ...]`, leaving the cursor after the closing bracket.
    pub fn parse_inline_array(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let mut items = Vec::new();
        self.parse_flow_entries(cursor, scope, ']', "array", |parser, cursor, scope| {
            items.push(parser.parse_value(cursor, scope)?);
            Ok(())
        })?;
        Ok(Node::Array(items))
    }

    /// Parse `{key: value, ...}`, leaving the cursor after the closing brace.
    /// A key without a value maps to null.
    pub fn parse_inline_dictionary(
        &mut self,
        cursor: &mut Cursor,
        scope: Scope,
    ) -> Result<Node, Error> {
        let mut dictionary = Node::dictionary();
        let mut overrides = Vec::new();
        self.parse_flow_entries(cursor, scope, '}', "dictionary", |parser, cursor, scope| {
            if parser.is_override(cursor, scope) {
                overrides.extend(parser.parse_override_targets(cursor, scope)?);
                return Ok(());
            }
            let key = parser.parse_flow_key(cursor, scope)?;
            let key_text = key.to_key();
            if dictionary.contains(&key_text) {
                return Err(cursor.error(ErrorKind::DuplicateKey(key_text)));
            }
            skip_blanks(cursor);
            let value = if cursor.matches(":") {
                advance_to_next_indent(cursor);
                if matches!(cursor.current(), Some(',' | '}')) {
                    Node::Null
                } else {
                    parser.parse_value(cursor, scope)?
                }
            } else {
                Node::Null
            };
            dictionary.insert(key, value)
        })?;

        if let Node::Dictionary(entries) = &mut dictionary {
            merge_overrides(entries, overrides);
        }
        Ok(dictionary)
    }

    /// Drive the comma separated entries of a flow collection whose opener is
    /// under the cursor, calling `entry` at the start of each entry.
    fn parse_flow_entries(
        &mut self,
        cursor: &mut Cursor,
        scope: Scope,
        close: char,
        what: &'static str,
        mut entry: impl FnMut(&mut Self, &mut Cursor, Scope) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let opened_at = cursor.location();
        let start = cursor.position();
        cursor.next()?;

        let mut expecting_entry = true;
        let mut after_comma = false;
        loop {
            advance_to_next_indent(cursor);
            match cursor.current() {
                None => {
                    return Err(Error::at(
                        ErrorKind::MissingClosingBracket(close, what),
                        opened_at,
                        cursor.span_from(start),
                    ));
                }
                Some(ch) if ch == close => {
                    if after_comma {
                        return Err(cursor.error(ErrorKind::UnexpectedComma(what)));
                    }
                    cursor.next()?;
                    return Ok(());
                }
                Some(',') => {
                    if expecting_entry {
                        return Err(cursor.error(ErrorKind::UnexpectedComma(what)));
                    }
                    cursor.next()?;
                    expecting_entry = true;
                    after_comma = true;
                }
                Some(_) => {
                    if !expecting_entry {
                        return Err(cursor.error(ErrorKind::MissingComma(what)));
                    }
                    entry(self, cursor, scope)?;
                    expecting_entry = false;
                    after_comma = false;
                }
            }
        }
    }

    fn parse_flow_key(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        match cursor.current() {
            Some('"' | '\'') => read_quoted(cursor),
            Some('[') => {
                let node = self.parse_inline_array(cursor, scope)?;
                Ok(Node::quoted(node.to_key(), Quote::Double))
            }
            Some('{') => {
                let node = self.parse_inline_dictionary(cursor, scope)?;
                Ok(Node::quoted(node.to_key(), Quote::Double))
            }
            Some(ch) => {
                let token = read_token(cursor, scope);
                if token.is_empty() {
                    return Err(cursor.error(ErrorKind::UnexpectedCharacter(ch)));
                }
                Ok(plain_key(token))
            }
            None => Err(cursor.error(ErrorKind::ReadPastEnd)),
        }
    }
}
