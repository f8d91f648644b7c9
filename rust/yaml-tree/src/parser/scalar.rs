// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Scalar parsing (plain, quoted, boolean, null and numbers).

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind};
use crate::node::{Node, Quote};
use crate::number::Number;
use crate::translator::{Translator as _, YamlTranslator};

use super::{
    Parser, Scope, at_any_document_marker, finish_line, is_blank, is_flow_indicator, is_separator,
    skip_blanks,
};

pub(crate) const TRUE_LITERALS: [&str; 3] = ["True", "On", "Yes"];
pub(crate) const FALSE_LITERALS: [&str; 3] = ["False", "Off", "No"];
const NULL_LITERALS: [&str; 2] = ["null", "~"];

impl Parser {
    pub fn is_boolean(&self, cursor: &mut Cursor, scope: Scope) -> bool {
        is_boolean_literal(&peek_token(cursor, scope))
    }

    pub fn parse_boolean(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let token = read_token(cursor, scope);
        Ok(Node::boolean_literal(TRUE_LITERALS.contains(&token.as_str()), token))
    }

    pub fn is_null(&self, cursor: &mut Cursor, scope: Scope) -> bool {
        NULL_LITERALS.contains(&peek_token(cursor, scope).as_str())
    }

    pub fn parse_null(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        read_token(cursor, scope);
        Ok(Node::Null)
    }

    pub fn is_number(&self, cursor: &mut Cursor, scope: Scope) -> bool {
        Number::parse(&peek_token(cursor, scope)).is_some()
    }

    pub fn parse_number(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let token = read_token(cursor, scope);
        Number::parse(&token)
            .map(Node::Number)
            .ok_or_else(|| cursor.error(ErrorKind::TrailingContent(token)))
    }

    pub fn is_quoted(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        matches!(cursor.current(), Some('"' | '\''))
    }

    pub fn parse_quoted(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let node = read_quoted(cursor)?;
        if !scope.flow {
            finish_line(cursor)?;
        }
        Ok(node)
    }

    /// Parse a plain scalar, folding continuation lines indented past the enclosing block.
    pub fn parse_plain(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let first = read_token(cursor, scope);
        if first.is_empty() {
            return Err(match cursor.current() {
                Some(ch) => cursor.error(ErrorKind::UnexpectedCharacter(ch)),
                None => cursor.error(ErrorKind::ReadPastEnd),
            });
        }
        if scope.flow {
            return Ok(Node::string(first));
        }

        let mut lines = vec![first];
        // A comment ends the scalar; only a bare line break allows continuation.
        while cursor.current() == Some('\n') {
            cursor.save();
            let mut empty_lines = 0;
            loop {
                cursor.next()?;
                skip_blanks(cursor);
                if cursor.current() != Some('\n') {
                    break;
                }
                empty_lines += 1;
            }
            if !continues_plain(cursor, scope) {
                cursor.restore();
                break;
            }
            cursor.discard();
            lines.extend(std::iter::repeat_n(String::new(), empty_lines));
            lines.push(read_token(cursor, scope));
        }
        Ok(Node::string(fold_lines(&lines)))
    }
}

fn continues_plain(cursor: &Cursor, scope: Scope) -> bool {
    cursor.more()
        && cursor.column() > scope.indent
        && cursor.current() != Some('#')
        && !at_any_document_marker(cursor)
}

/// Read a scalar token up to the next structural delimiter: a line break,
/// ` #`, `: ` and in flow context also `,`, `]` and `}`. Trailing blanks are dropped.
pub(crate) fn read_token(cursor: &mut Cursor, scope: Scope) -> String {
    let token = cursor.consume_while(|ch, next| {
        !(ch == '\n'
            || (is_blank(ch) && next == Some('#'))
            || (ch == ':' && (is_separator(next) || (scope.flow && next.is_some_and(is_flow_indicator))))
            || (scope.flow && matches!(ch, ',' | ']' | '}')))
    });
    token.trim_end_matches(is_blank).to_owned()
}

/// [`read_token`] without moving the cursor.
pub(crate) fn peek_token(cursor: &mut Cursor, scope: Scope) -> String {
    cursor.save();
    let token = read_token(cursor, scope);
    cursor.restore();
    token
}

/// Interpret a plain key token: booleans, nulls and numbers are normalised to their
/// canonical key text and double quoted, anything else stays a plain string.
pub(crate) fn plain_key(token: String) -> Node {
    if is_boolean_literal(&token) {
        Node::quoted(token, Quote::Double)
    } else if NULL_LITERALS.contains(&token.as_str()) {
        Node::quoted(Node::Null.to_key(), Quote::Double)
    } else if let Some(number) = Number::parse(&token) {
        Node::quoted(number.to_string(), Quote::Double)
    } else {
        Node::string(token)
    }
}

fn is_boolean_literal(token: &str) -> bool {
    TRUE_LITERALS.contains(&token) || FALSE_LITERALS.contains(&token)
}

/// Read a single or double quoted scalar, leaving the cursor after the closing quote.
pub(crate) fn read_quoted(cursor: &mut Cursor) -> Result<Node, Error> {
    let start = cursor.position();
    let location = cursor.location();
    let Some(quote) = cursor.current() else {
        return Err(cursor.error(ErrorKind::ReadPastEnd));
    };
    cursor.next()?;

    let mut raw = String::new();
    loop {
        match cursor.current() {
            None => {
                return Err(Error::at(
                    ErrorKind::UnterminatedString(quote),
                    location,
                    cursor.span_from(start),
                ));
            }
            Some('\'') if quote == '\'' && cursor.peek(1) == Some('\'') => {
                raw.push('\'');
                cursor.next()?;
                cursor.next()?;
            }
            Some(ch) if ch == quote => {
                cursor.next()?;
                break;
            }
            Some('\\') if quote == '"' => {
                raw.push('\\');
                cursor.next()?;
                if let Some(escaped) = cursor.current() {
                    raw.push(escaped);
                    cursor.next()?;
                }
            }
            Some(ch) => {
                raw.push(ch);
                cursor.next()?;
            }
        }
    }

    let folded = fold_quoted(&raw);
    if quote == '\'' {
        return Ok(Node::quoted(folded, Quote::Single));
    }
    let text = YamlTranslator
        .from(&folded)
        .map_err(|err| Error::at(err.kind, location, cursor.span_from(start)))?;
    Ok(Node::quoted(text, Quote::Double))
}

/// Fold the line breaks of a multi-line quoted scalar.
fn fold_quoted(raw: &str) -> String {
    if !raw.contains('\n') {
        return raw.to_owned();
    }
    let mut lines: Vec<&str> = raw.split('\n').collect();
    let last = lines.len() - 1;
    for (index, line) in lines.iter_mut().enumerate() {
        *line = match index {
            0 => line.trim_end_matches(is_blank),
            _ if index == last => line.trim_start_matches(is_blank),
            _ => line.trim_matches(is_blank),
        };
    }
    fold_lines(&lines)
}

/// Join lines: a single break becomes a space and every empty line between
/// two text lines contributes one `\n`. The final line always counts as text.
pub(crate) fn fold_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut folded = String::new();
    let mut empty = 0;
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if index == 0 {
            folded.push_str(line);
            continue;
        }
        if line.is_empty() && index + 1 < lines.len() {
            empty += 1;
            continue;
        }
        if empty == 0 {
            folded.push(' ');
        } else {
            folded.extend(std::iter::repeat_n('\n', empty));
        }
        folded.push_str(line);
        empty = 0;
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(text: &str) -> Cursor {
        Cursor::new(text).unwrap()
    }

    #[test]
    fn test_tokens_stop_at_delimiters() {
        let block = Scope::DOCUMENT;
        let flow = Scope::DOCUMENT.into_flow();
        let test_cases = [
            ("42  # answer", block, "42"),
            ("a b: c", block, "a b"),
            ("url:http://x", block, "url:http://x"),
            ("1, 2]", flow, "1"),
            ("1, 2]", block, "1, 2]"),
            ("x}", flow, "x"),
            ("value\nnext", block, "value"),
        ];
        for (input, scope, expected) in test_cases {
            assert_eq!(read_token(&mut cursor(input), scope), expected, "{input:?}");
        }
    }

    #[test]
    fn test_peek_token_does_not_move() {
        let mut cur = cursor("Yes");
        assert_eq!(peek_token(&mut cur, Scope::DOCUMENT), "Yes");
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_fold_lines() {
        assert_eq!(fold_lines(&["a", "b"]), "a b");
        assert_eq!(fold_lines(&["a", "", "b"]), "a\nb");
        assert_eq!(fold_lines(&["a", "", "", "b"]), "a\n\nb");
        assert_eq!(fold_lines(&["a", ""]), "a ");
    }

    #[test]
    fn test_read_quoted() {
        let node = read_quoted(&mut cursor(r"'it''s'")).unwrap();
        assert_eq!(node, Node::quoted("it's", Quote::Single));

        let node = read_quoted(&mut cursor(r#""tab\there \"q\"""#)).unwrap();
        assert_eq!(node, Node::quoted("tab\there \"q\"", Quote::Double));

        let node = read_quoted(&mut cursor("\"one\n   two\n\n  three\"")).unwrap();
        assert_eq!(node.as_str().unwrap(), "one two\nthree");
    }

    #[test]
    fn test_unterminated_quote() {
        let err = read_quoted(&mut cursor("'open\nstill open")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString('\''));
        assert_eq!(
            err.to_string(),
            "YAML Syntax Error [Line: 1 Column: 1]: Missing closing ' on quoted string."
        );
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(plain_key("name".to_owned()), Node::string("name"));
        assert_eq!(plain_key("0x10".to_owned()), Node::quoted("16", Quote::Double));
        assert_eq!(plain_key("~".to_owned()), Node::quoted("null", Quote::Double));
        assert_eq!(plain_key("Yes".to_owned()), Node::quoted("Yes", Quote::Double));
    }
}
