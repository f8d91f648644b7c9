// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Recursive-descent YAML parser.
//!
//! The parser works directly on a [`Cursor`]. Every value position is
//! resolved through a fixed dispatch table of `(predicate, action)` pairs:
//! the first predicate that recognises the text under the cursor selects the
//! action that parses it, and text nothing else recognises is parsed as a
//! plain string.
//!
//! Block structure is tracked by column. A [`Scope`] carries the column of
//! the enclosing block collection so that nested parsers know where their
//! content ends.

mod anchor;
mod block;
mod block_scalar;
mod flow;
mod scalar;

use std::collections::HashMap;

pub(crate) use block_scalar::Chomping;
pub(crate) use scalar::{FALSE_LITERALS, TRUE_LITERALS};

use log::{debug, trace};

use crate::config::Configuration;
use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind};
use crate::node::Node;

/// A stream of YAML documents.
pub type Stream = Vec<Node>;

/// Where a value is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scope {
    /// Column of the enclosing block collection, 0 at document level.
    /// Continuation lines of the value must be indented past it.
    pub indent: usize,
    /// Inside `[...]` or `{...}`.
    pub flow: bool,
    /// Value of a block dictionary key, which may be a block array at the key's column.
    pub key: bool,
}

impl Scope {
    pub const DOCUMENT: Self = Self::block(0);

    pub const fn block(indent: usize) -> Self {
        Self {
            indent,
            flow: false,
            key: false,
        }
    }

    pub const fn key_value(indent: usize) -> Self {
        Self {
            indent,
            flow: false,
            key: true,
        }
    }

    pub const fn into_flow(self) -> Self {
        Self {
            indent: self.indent,
            flow: true,
            key: false,
        }
    }
}

type Predicate = fn(&Parser, &mut Cursor, Scope) -> bool;
type Action = fn(&mut Parser, &mut Cursor, Scope) -> Result<Node, Error>;

/// Value parsers, tried in order. Plain strings are the fallback.
const DISPATCH: [(&str, Predicate, Action); 13] = [
    ("array", Parser::is_array, Parser::parse_array),
    ("dictionary", Parser::is_dictionary, Parser::parse_dictionary),
    (
        "inline dictionary",
        Parser::is_inline_dictionary,
        Parser::parse_inline_dictionary_value,
    ),
    (
        "inline array",
        Parser::is_inline_array,
        Parser::parse_inline_array_value,
    ),
    ("boolean", Parser::is_boolean, Parser::parse_boolean),
    ("quoted string", Parser::is_quoted, Parser::parse_quoted),
    ("number", Parser::is_number, Parser::parse_number),
    ("null", Parser::is_null, Parser::parse_null),
    ("folded block", Parser::is_folded, Parser::parse_folded),
    ("literal block", Parser::is_literal, Parser::parse_literal),
    ("anchor", Parser::is_anchor, Parser::parse_anchor),
    ("alias", Parser::is_alias, Parser::parse_alias),
    ("override", Parser::is_override, Parser::parse_override),
];

/// Source text of an anchored value and the scope it was parsed in.
#[derive(Debug, Clone)]
pub(crate) struct Anchored {
    /// Raw text, padded with spaces to the column the value started at.
    pub text: String,
    pub scope: Scope,
}

/// Parser state shared by all the value parsers of one parse call.
#[derive(Debug)]
pub(crate) struct Parser {
    pub config: Configuration,
    pub anchors: HashMap<String, Anchored>,
    /// Number of alias expansions currently in progress.
    pub alias_depth: usize,
    /// Number of values currently being parsed inside each other.
    pub depth: usize,
}

impl Parser {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            anchors: HashMap::new(),
            alias_depth: 0,
            depth: 0,
        }
    }

    /// Parse every document in the source.
    ///
    /// `---` at column 1 starts a new document and `...` ends the current one.
    /// `%` directive lines before the first document are skipped.
    pub fn parse_documents(&mut self, cursor: &mut Cursor) -> Result<Stream, Error> {
        let mut documents = Vec::new();
        let mut current: Option<Vec<Node>> = None;

        loop {
            advance_to_next_indent(cursor);
            if !cursor.more() {
                break;
            }
            if at_document_marker(cursor, "---") {
                cursor.matches("---");
                trace!("Document start at {}", cursor.location());
                if let Some(content) = current.replace(Vec::new()) {
                    documents.push(Node::Document(content));
                }
                continue;
            }
            if at_document_marker(cursor, "...") {
                cursor.matches("...");
                finish_line(cursor)?;
                trace!("Document end at {}", cursor.location());
                documents.push(Node::Document(current.take().unwrap_or_default()));
                continue;
            }
            if current.is_none() && cursor.column() == 1 && cursor.current() == Some('%') {
                let directive = read_to_line_end(cursor);
                debug!("Skipping directive '{directive}'");
                continue;
            }

            let content = current.get_or_insert_with(Vec::new);
            if !content.is_empty() {
                return Err(cursor.error(ErrorKind::MultipleTopLevelValues));
            }
            content.push(self.parse_value(cursor, Scope::DOCUMENT)?);
        }

        if let Some(content) = current {
            documents.push(Node::Document(content));
        }
        debug!("Parsed {} document(s)", documents.len());
        Ok(documents)
    }

    /// Parse the value under the cursor by dispatching on its first characters.
    pub fn parse_value(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        if self.depth >= self.config.max_depth {
            return Err(cursor.error(ErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let result = self.dispatch(cursor, scope);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        for (name, is_match, parse) in DISPATCH {
            if is_match(self, cursor, scope) {
                trace!("Parsing {name} at {}", cursor.location());
                return parse(self, cursor, scope);
            }
        }
        trace!("Parsing plain string at {}", cursor.location());
        self.parse_plain(cursor, scope)
    }
}

/// Skip whitespace, line breaks and comments up to the next significant character.
pub(crate) fn advance_to_next_indent(cursor: &mut Cursor) {
    loop {
        cursor.consume_while(|ch, _| is_blank(ch) || ch == '\n');
        if cursor.current() != Some('#') {
            return;
        }
        read_to_line_end(cursor);
    }
}

pub(crate) const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t')
}

/// Whether `ch` ends a token: end of input, whitespace or a line break.
pub(crate) fn is_separator(ch: Option<char>) -> bool {
    ch.is_none_or(|ch| is_blank(ch) || ch == '\n')
}

pub(crate) const fn is_flow_indicator(ch: char) -> bool {
    matches!(ch, ',' | '[' | ']' | '{' | '}')
}

/// The cursor is at the end of the line or the input.
pub(crate) fn at_break(cursor: &Cursor) -> bool {
    cursor.current().is_none_or(|ch| ch == '\n')
}

/// `---` or `...` at column 1 followed by a separator.
pub(crate) fn at_document_marker(cursor: &Cursor, marker: &str) -> bool {
    cursor.column() == 1 && cursor.starts_with(marker) && is_separator(cursor.peek(marker.len()))
}

pub(crate) fn at_any_document_marker(cursor: &Cursor) -> bool {
    at_document_marker(cursor, "---") || at_document_marker(cursor, "...")
}

pub(crate) fn skip_blanks(cursor: &mut Cursor) {
    cursor.consume_while(|ch, _| is_blank(ch));
}

/// Consume the rest of the line, leaving the line break in place.
pub(crate) fn read_to_line_end(cursor: &mut Cursor) -> String {
    cursor.consume_while(|ch, _| ch != '\n')
}

/// Only blanks and a comment may follow a completed value on its line.
pub(crate) fn finish_line(cursor: &mut Cursor) -> Result<(), Error> {
    skip_blanks(cursor);
    if cursor.current() == Some('#') {
        read_to_line_end(cursor);
    }
    if at_break(cursor) {
        return Ok(());
    }
    cursor.save();
    let rest = read_to_line_end(cursor);
    cursor.restore();
    Err(cursor.error(ErrorKind::TrailingContent(rest.trim_end().to_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(text: &str) -> Cursor {
        Cursor::new(text).unwrap()
    }

    #[test]
    fn test_advance_skips_comments_and_blank_lines() {
        let mut cur = cursor("  # comment\n\n   value");
        advance_to_next_indent(&mut cur);
        assert_eq!(cur.current(), Some('v'));
        assert_eq!((cur.line(), cur.column()), (3, 4));
    }

    #[test]
    fn test_document_markers_need_column_one_and_separator() {
        assert!(at_document_marker(&cursor("---\n"), "---"));
        assert!(at_document_marker(&cursor("--- a"), "---"));
        assert!(at_document_marker(&cursor("..."), "..."));
        assert!(!at_document_marker(&cursor("---a"), "---"));

        let mut cur = cursor(" ---");
        cur.next().unwrap();
        assert!(!at_document_marker(&cur, "---"));
    }

    #[test]
    fn test_finish_line() {
        let mut cur = cursor("   # trailing comment\nnext");
        finish_line(&mut cur).unwrap();
        assert_eq!(cur.current(), Some('\n'));

        let mut cur = cursor("  extra stuff  \n");
        let err = finish_line(&mut cur).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingContent("extra stuff".to_owned()));
        assert_eq!(err.position.map(|p| p.column), Some(3));
    }

    #[test]
    fn test_nesting_limit() {
        let mut parser = Parser::new(Configuration {
            max_depth: 3,
            ..Configuration::default()
        });
        let mut cur = cursor("[[[[1]]]]");
        let err = parser.parse_documents(&mut cur).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep);
    }
}
