// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Block style YAML output.
//!
//! Output read back by the parser yields the same tree, so stringifying a
//! parsed stringified tree reproduces the text exactly. Strings keep their
//! quoting unless the text cannot be represented in it.

use std::fmt;

use crate::error::Error;
use crate::node::{Node, Quote};
use crate::number::Number;
use crate::parser::{Chomping, FALSE_LITERALS, TRUE_LITERALS};
use crate::translator::{Translator as _, YamlTranslator};

use super::{Stringify, write_indent};

/// Writes documents as `---` ... `...` blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStringifier;

impl Stringify for YamlStringifier {
    fn stringify(&self, node: &Node, sink: &mut dyn fmt::Write, indent: usize) -> Result<(), Error> {
        let mut writer = Writer {
            out: sink,
            unit: indent.clamp(1, 9),
        };
        match node {
            Node::Document(items) => {
                writer.out.write_str("---\n")?;
                for item in items {
                    writer.top(item)?;
                }
                writer.out.write_str("...\n")?;
            }
            other => writer.top(other)?,
        }
        Ok(())
    }
}

struct Writer<'a> {
    out: &'a mut dyn fmt::Write,
    /// Spaces per nesting level. Also used as the block string indentation indicator.
    unit: usize,
}

impl Writer<'_> {
    /// A value starting at column 1.
    fn top(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Dictionary(entries) if !entries.is_empty() => self.entries(entries, 0, false),
            Node::Array(items) | Node::Document(items) if !items.is_empty() => {
                self.items(items, 0, false)
            }
            other => self.value(other, "", self.unit, self.unit, false),
        }
    }

    /// Write `node` after an indicator (`key:`, `-`, `&name`) on the current line.
    ///
    /// `child` is the indentation of content on the following lines and `step`
    /// its distance from the indicator's own indentation. With `inline` a block
    /// collection starts on the current line.
    fn value(&mut self, node: &Node, lead: &str, child: usize, step: usize, inline: bool) -> fmt::Result {
        match node {
            Node::Anchor { name, node } => {
                write!(self.out, "{lead}&{name}")?;
                self.value(node, " ", child, step, false)
            }
            Node::Alias { name, .. } => writeln!(self.out, "{lead}*{name}"),
            Node::Dictionary(entries) if !entries.is_empty() => {
                if inline {
                    self.out.write_str(lead)?;
                    self.entries(entries, child, true)
                } else {
                    self.out.write_char('\n')?;
                    self.entries(entries, child, false)
                }
            }
            Node::Array(items) | Node::Document(items) if !items.is_empty() => {
                if inline {
                    self.out.write_str(lead)?;
                    self.items(items, child, true)
                } else {
                    self.out.write_char('\n')?;
                    self.items(items, child, false)
                }
            }
            Node::Dictionary(_) => writeln!(self.out, "{lead}{{}}"),
            Node::Array(_) | Node::Document(_) => writeln!(self.out, "{lead}[]"),
            Node::Comment(text) => writeln!(self.out, "{lead}# {text}"),
            Node::String {
                text,
                quote: quote @ (Quote::Folded | Quote::Literal),
            } if !text.trim_end_matches('\n').is_empty() => {
                self.block_string(text, *quote, lead, child, step)
            }
            other => writeln!(self.out, "{lead}{}", scalar(other)),
        }
    }

    fn entries(&mut self, entries: &[(Node, Node)], spaces: usize, first_inline: bool) -> fmt::Result {
        for (index, (key, value)) in entries.iter().enumerate() {
            if index > 0 || !first_inline {
                write_indent(self.out, spaces)?;
            }
            write!(self.out, "{}:", key_text(key))?;
            self.value(value, " ", spaces + self.unit, self.unit, false)?;
        }
        Ok(())
    }

    fn items(&mut self, items: &[Node], spaces: usize, first_inline: bool) -> fmt::Result {
        for (index, item) in items.iter().enumerate() {
            if index > 0 || !first_inline {
                write_indent(self.out, spaces)?;
            }
            if let Node::Comment(text) = item {
                writeln!(self.out, "# {text}")?;
                continue;
            }
            self.out.write_char('-')?;
            // Content of an item lines up after the `- ` indicator.
            self.value(item, " ", spaces + 2, 2, true)?;
        }
        Ok(())
    }

    /// Folded text is only kept folded while it is a single line; anything else
    /// is written literally, which reads back to the same text.
    fn block_string(&mut self, text: &str, quote: Quote, lead: &str, child: usize, step: usize) -> fmt::Result {
        let body = text.trim_end_matches('\n');
        let trailing = text.len() - body.len();
        let style = if quote == Quote::Folded && !body.contains('\n') {
            '>'
        } else {
            '|'
        };

        write!(self.out, "{lead}{style}")?;
        if let Some(indicator) = Chomping::for_text(text).indicator() {
            self.out.write_char(indicator)?;
        }
        if body
            .split('\n')
            .find(|line| !line.is_empty())
            .is_some_and(|line| line.starts_with(' '))
        {
            write!(self.out, "{step}")?;
        }
        self.out.write_char('\n')?;

        for line in body.split('\n') {
            if !line.is_empty() {
                write_indent(self.out, child)?;
                self.out.write_str(line)?;
            }
            self.out.write_char('\n')?;
        }
        for _ in 1..trailing {
            self.out.write_char('\n')?;
        }
        Ok(())
    }
}

fn key_text(key: &Node) -> String {
    match key.resolve() {
        Node::Dictionary(_) | Node::Array(_) | Node::Document(_) => {
            string_text(&key.to_key(), Quote::Double)
        }
        other => scalar(other),
    }
}

fn scalar(node: &Node) -> String {
    match node {
        Node::Number(number) => number.to_string(),
        Node::Boolean { literal, .. } => literal.clone(),
        Node::String { text, quote } => string_text(text, *quote),
        Node::Comment(text) => string_text(text, Quote::Double),
        Node::Anchor { node, .. } | Node::Alias { node, .. } => scalar(node),
        Node::Null
        | Node::Hole
        | Node::Array(_)
        | Node::Dictionary(_)
        | Node::Document(_) => node.to_key(),
    }
}

fn string_text(text: &str, quote: Quote) -> String {
    match quote {
        Quote::Single if !text.contains(|ch: char| ch.is_control()) => {
            format!("'{}'", text.replace('\'', "''"))
        }
        Quote::None if is_plain_safe(text) => text.to_owned(),
        _ => format!("\"{}\"", YamlTranslator.to(text)),
    }
}

/// Whether `text` reads back as the same plain string.
fn is_plain_safe(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if "-?:,[]{}#&*!|>'\"%@`<".contains(first)
        || first.is_whitespace()
        || text.ends_with(char::is_whitespace)
        || text.ends_with(':')
        || text.contains(|ch: char| ch.is_control())
        || text.contains(": ")
        || text.contains(" #")
        || text.starts_with("...")
    {
        return false;
    }
    !(TRUE_LITERALS.contains(&text)
        || FALSE_LITERALS.contains(&text)
        || text == "null"
        || text == "~"
        || Number::parse(text).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stringify::{Format, to_string};

    #[test]
    fn test_scalars() {
        let test_cases = [
            (Node::string("plain text"), "plain text\n"),
            (Node::string("42"), "\"42\"\n"),
            (Node::string("Yes"), "\"Yes\"\n"),
            (Node::string("a: b"), "\"a: b\"\n"),
            (Node::string("two\nlines"), "\"two\\nlines\"\n"),
            (Node::quoted("it's", Quote::Single), "'it''s'\n"),
            (Node::quoted("tab\t", Quote::Double), "\"tab\\t\"\n"),
            (Node::number(1.5_f32), "1.5\n"),
            (Node::boolean_literal(false, "Off"), "Off\n"),
            (Node::Null, "null\n"),
            (Node::Hole, "null\n"),
        ];
        for (node, expected) in test_cases {
            assert_eq!(to_string(&node, Format::Yaml, 2).unwrap(), expected, "{node:?}");
        }
    }

    #[test]
    fn test_block_collections() {
        let mut node = Node::hole();
        node["name"] = Node::string("demo");
        node["list"] = Node::from(vec![1, 2]);
        node["nested"]["key"] = Node::string("value");
        node["rows"][0]["a"] = Node::from(1);
        node["rows"][0]["b"] = Node::from(2);
        node["empty"] = Node::array();

        let expected = "\
name: demo
list:
  - 1
  - 2
nested:
  key: value
rows:
  - a: 1
    b: 2
empty: []
";
        assert_eq!(to_string(&node, Format::Yaml, 2).unwrap(), expected);
    }

    #[test]
    fn test_document_markers() {
        let document = Node::Document(vec![Node::string("x")]);
        assert_eq!(to_string(&document, Format::Yaml, 2).unwrap(), "---\nx\n...\n");
    }

    #[test]
    fn test_block_strings() {
        let mut node = Node::hole();
        node["keep"] = Node::quoted("a\nb\n\n", Quote::Literal);
        node["strip"] = Node::quoted("folded line", Quote::Folded);
        node["indented"] = Node::quoted("  code\n", Quote::Literal);
        let expected = "\
keep: |+
  a
  b

strip: >-
  folded line
indented: |2
    code
";
        assert_eq!(to_string(&node, Format::Yaml, 2).unwrap(), expected);
    }

    #[test]
    fn test_anchors_and_aliases() {
        let mut node = Node::hole();
        let mut base = Node::hole();
        base["x"] = Node::from(1);
        node["base"] = Node::anchor("b", base);
        node["copy"] = Node::alias("b", Node::Null);
        assert_eq!(
            to_string(&node, Format::Yaml, 2).unwrap(),
            "base: &b\n  x: 1\ncopy: *b\n"
        );
    }
}
