// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Literal (`|`) and folded (`>`) block strings.

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind};
use crate::node::{Node, Quote};

use super::{Parser, Scope, at_any_document_marker, at_break, read_to_line_end, skip_blanks};

/// Trailing line break handling of a block string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Chomping {
    /// Keep a single trailing newline.
    #[default]
    Clip,
    /// `-`: drop every trailing newline.
    Strip,
    /// `+`: keep every trailing newline.
    Keep,
}

impl Chomping {
    pub const fn indicator(self) -> Option<char> {
        match self {
            Self::Clip => None,
            Self::Strip => Some('-'),
            Self::Keep => Some('+'),
        }
    }

    /// Choose the indicator that reproduces the trailing newlines of `text`.
    pub fn for_text(text: &str) -> Self {
        match text.len() - text.trim_end_matches('\n').len() {
            0 => Self::Strip,
            1 => Self::Clip,
            _ => Self::Keep,
        }
    }
}

impl Parser {
    pub fn is_folded(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        cursor.current() == Some('>')
    }

    pub fn is_literal(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        cursor.current() == Some('|')
    }

    pub fn parse_folded(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        parse_block_string(cursor, scope, Quote::Folded)
    }

    pub fn parse_literal(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        parse_block_string(cursor, scope, Quote::Literal)
    }
}

fn parse_block_string(cursor: &mut Cursor, scope: Scope, style: Quote) -> Result<Node, Error> {
    let (chomping, indicator) = parse_header(cursor)?;

    // Content must be indented past the enclosing block.
    let min_spaces = scope.indent;
    let mut content_indent = indicator.map(|digit| match scope.indent {
        0 => digit,
        indent => indent - 1 + digit,
    });

    let mut lines: Vec<String> = Vec::new();
    while cursor.more() && !at_any_document_marker(cursor) {
        cursor.save();
        let spaces = cursor.consume_while(|ch, _| ch == ' ').len();

        if at_break(cursor) {
            cursor.discard();
            let extra = content_indent.map_or(0, |indent| spaces.saturating_sub(indent));
            lines.push(" ".repeat(extra));
            if cursor.more() {
                cursor.next()?;
            }
            continue;
        }

        let indent = *content_indent.get_or_insert(spaces);
        if spaces < indent || spaces < min_spaces {
            cursor.restore();
            break;
        }
        cursor.discard();

        let mut line = " ".repeat(spaces - indent);
        line.push_str(&read_to_line_end(cursor));
        lines.push(line);
        if cursor.more() {
            cursor.next()?;
        }
    }

    let text = match style {
        Quote::Folded => compose(&lines, chomping, fold_block),
        _ => compose(&lines, chomping, |body| body.join("\n")),
    };
    Ok(Node::quoted(text, style))
}

/// Parse the `|`/`>` header: chomping and indentation indicators in either
/// order, then only blanks or a comment up to the end of the line.
fn parse_header(cursor: &mut Cursor) -> Result<(Chomping, Option<usize>), Error> {
    let start = cursor.position();
    cursor.next()?;

    let mut chomping = None;
    let mut indicator = None;
    loop {
        match cursor.current() {
            Some('-') if chomping.is_none() => chomping = Some(Chomping::Strip),
            Some('+') if chomping.is_none() => chomping = Some(Chomping::Keep),
            Some(digit @ '1'..='9') if indicator.is_none() => {
                indicator = digit.to_digit(10).and_then(|digit| usize::try_from(digit).ok());
            }
            _ => break,
        }
        cursor.next()?;
    }

    skip_blanks(cursor);
    if cursor.current() == Some('#') {
        read_to_line_end(cursor);
    }
    if !at_break(cursor) {
        read_to_line_end(cursor);
        let header = cursor.slice(start, cursor.position()).trim_end().to_owned();
        return Err(cursor.error(ErrorKind::InvalidBlockHeader(header)));
    }
    if cursor.more() {
        cursor.next()?;
    }
    Ok((chomping.unwrap_or_default(), indicator))
}

/// Apply chomping around the body produced by `join` from the lines before the
/// trailing empty ones.
fn compose(lines: &[String], chomping: Chomping, join: impl Fn(&[String]) -> String) -> String {
    let body_len = lines.iter().rposition(|line| !line.is_empty()).map_or(0, |last| last + 1);
    let (body, trailing) = lines.split_at(body_len);
    let mut text = join(body);
    match chomping {
        Chomping::Strip => {}
        Chomping::Clip => {
            if !body.is_empty() {
                text.push('\n');
            }
        }
        Chomping::Keep => {
            if !body.is_empty() {
                text.push('\n');
            }
            text.extend(std::iter::repeat_n('\n', trailing.len()));
        }
    }
    text
}

/// Folded style: lines are joined with spaces, empty lines become line breaks
/// and more-indented lines keep their line breaks.
fn fold_block(lines: &[String]) -> String {
    let mut folded = String::new();
    let mut previous: Option<&str> = None;
    let mut empty = 0;
    for line in lines {
        if line.is_empty() {
            empty += 1;
            continue;
        }
        if let Some(prev) = previous {
            let indented = is_more_indented(prev) || is_more_indented(line);
            if empty == 0 && !indented {
                folded.push(' ');
            } else {
                let breaks = if indented { empty + 1 } else { empty };
                folded.extend(std::iter::repeat_n('\n', breaks));
            }
        } else {
            folded.extend(std::iter::repeat_n('\n', empty));
        }
        folded.push_str(line);
        previous = Some(line);
        empty = 0;
    }
    folded
}

fn is_more_indented(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    fn parse(text: &str) -> Node {
        let mut cursor = Cursor::new(text).unwrap();
        Parser::new(Configuration::default())
            .parse_value(&mut cursor, Scope::DOCUMENT)
            .unwrap()
    }

    #[test]
    fn test_chomping() {
        let test_cases = [
            ("|\n  text\n\n", "text\n"),
            ("|-\n  text\n\n", "text"),
            ("|+\n  text\n\n", "text\n\n"),
            (">\n  one\n  two\n", "one two\n"),
            (">-\n  one\n\n  two\n", "one\ntwo"),
        ];
        for (input, expected) in test_cases {
            assert_eq!(parse(input).as_str().unwrap(), expected, "{input:?}");
        }
    }

    #[test]
    fn test_literal_keeps_relative_indentation() {
        let node = parse("|\n  def f():\n      return 1\n");
        assert_eq!(node.as_str().unwrap(), "def f():\n    return 1\n");
        assert!(matches!(node, Node::String { quote: Quote::Literal, .. }));
    }

    #[test]
    fn test_folded_keeps_more_indented_lines() {
        let node = parse(">\n  intro\n    code\n  outro\n");
        assert_eq!(node.as_str().unwrap(), "intro\n  code\noutro\n");
    }

    #[test]
    fn test_indentation_indicator() {
        let node = parse("|2\n    indented\n  base\n");
        assert_eq!(node.as_str().unwrap(), "  indented\nbase\n");
        let node = parse("|-1\n  x\n");
        assert_eq!(node.as_str().unwrap(), " x");
    }

    #[test]
    fn test_invalid_header() {
        let mut cursor = Cursor::new("|x\n  text\n").unwrap();
        let err = Parser::new(Configuration::default())
            .parse_value(&mut cursor, Scope::DOCUMENT)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBlockHeader("|x".to_owned()));
    }

    #[test]
    fn test_chomping_for_text() {
        assert_eq!(Chomping::for_text("a"), Chomping::Strip);
        assert_eq!(Chomping::for_text("a\n"), Chomping::Clip);
        assert_eq!(Chomping::for_text("a\n\n"), Chomping::Keep);
    }
}
