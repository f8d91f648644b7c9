// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use std::fmt;

use crate::error::Error;
use crate::node::Node;

use super::Stringify;

/// Writes Bencode. Dictionaries keep their insertion order, floating point
/// numbers are written as strings and `null` as the string `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BencodeStringifier;

impl Stringify for BencodeStringifier {
    fn stringify(&self, node: &Node, sink: &mut dyn fmt::Write, _indent: usize) -> Result<(), Error> {
        write_node(node, sink)?;
        Ok(())
    }
}

fn write_node(node: &Node, out: &mut dyn fmt::Write) -> fmt::Result {
    match node {
        Node::Number(number) if number.is_integer() => write!(out, "i{number}e"),
        Node::Number(number) => write_string(&number.to_string(), out),
        Node::Boolean { value, .. } => write!(out, "i{}e", u8::from(*value)),
        Node::String { text, .. } | Node::Comment(text) => write_string(text, out),
        Node::Null | Node::Hole => write_string("null", out),
        // A document holding one value is that value.
        Node::Document(items) if content(items).count() == 1 => {
            content(items).try_for_each(|item| write_node(item, out))
        }
        Node::Array(items) | Node::Document(items) => {
            out.write_char('l')?;
            for item in content(items) {
                write_node(item, out)?;
            }
            out.write_char('e')
        }
        Node::Dictionary(entries) => {
            out.write_char('d')?;
            for (key, value) in entries {
                write_string(&key.key_text(), out)?;
                write_node(value, out)?;
            }
            out.write_char('e')
        }
        Node::Anchor { node, .. } | Node::Alias { node, .. } => write_node(node, out),
    }
}

/// Collection items without comments, which have no Bencode form.
fn content(items: &[Node]) -> impl Iterator<Item = &Node> {
    items.iter().filter(|item| !matches!(item, Node::Comment(_)))
}

/// `<byte length>:<bytes>`
fn write_string(text: &str, out: &mut dyn fmt::Write) -> fmt::Result {
    write!(out, "{}:{text}", text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stringify::{Format, to_string};

    #[test]
    fn test_scalars() {
        let test_cases = [
            (Node::from(42), "i42e"),
            (Node::from(-7_i64), "i-7e"),
            (Node::from(1.5_f32), "3:1.5"),
            (Node::from("spam"), "4:spam"),
            (Node::from("é"), "2:é"),
            (Node::from(true), "i1e"),
            (Node::from(false), "i0e"),
            (Node::Null, "4:null"),
        ];
        for (node, expected) in test_cases {
            assert_eq!(to_string(&node, Format::Bencode, 0).unwrap(), expected, "{node:?}");
        }
    }

    #[test]
    fn test_collections() {
        let mut node = Node::hole();
        node["zeta"] = Node::from(vec!["a", "bc"]);
        node["alpha"] = Node::from(1);
        assert_eq!(
            to_string(&node, Format::Bencode, 2).unwrap(),
            "d4:zetal1:a2:bce5:alphai1ee"
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let node = Node::Array(vec![Node::comment("x"), Node::from(1)]);
        assert_eq!(to_string(&node, Format::Bencode, 0).unwrap(), "li1ee");

        let document = Node::Document(vec![Node::comment("x"), Node::from("v")]);
        assert_eq!(to_string(&document, Format::Bencode, 0).unwrap(), "1:v");
    }
}
