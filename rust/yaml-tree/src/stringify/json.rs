// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use std::fmt;

use serde::ser::{Serialize, SerializeMap as _, SerializeSeq as _, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, ErrorKind};
use crate::node::Node;
use crate::number::Number;

use super::Stringify;

/// Writes JSON through `serde_json`. An indent of zero gives compact output.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStringifier;

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(val) => serializer.serialize_i32(val),
            Self::Long(val) => serializer.serialize_i64(val),
            Self::LongLong(val) => serializer.serialize_i128(val),
            Self::Float(val) => serializer.serialize_f32(val),
            Self::Double(val) => serializer.serialize_f64(val),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(number) => number.serialize(serializer),
            Self::String { text, .. } | Self::Comment(text) => serializer.serialize_str(text),
            Self::Boolean { value, .. } => serializer.serialize_bool(*value),
            Self::Null | Self::Hole => serializer.serialize_unit(),
            // A document holding one value is that value.
            Self::Document(items) if content(items).count() == 1 => match content(items).next() {
                Some(item) => item.serialize(serializer),
                None => serializer.serialize_unit(),
            },
            Self::Array(items) | Self::Document(items) => {
                let mut seq = serializer.serialize_seq(Some(content(items).count()))?;
                for item in content(items) {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Dictionary(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key.key_text().as_ref(), value)?;
                }
                map.end()
            }
            Self::Anchor { node, .. } | Self::Alias { node, .. } => node.serialize(serializer),
        }
    }
}

/// Collection items without comments, which have no JSON form.
fn content(items: &[Node]) -> impl Iterator<Item = &Node> {
    items.iter().filter(|item| !matches!(item, Node::Comment(_)))
}

fn to_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, Error> {
    let mut bytes = Vec::new();
    let result = if indent == 0 {
        value.serialize(&mut serde_json::Serializer::new(&mut bytes))
    } else {
        let unit = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(unit.as_bytes());
        value.serialize(&mut serde_json::Serializer::with_formatter(&mut bytes, formatter))
    };
    result.map_err(|err| Error::from(ErrorKind::Io(err.to_string())))?;
    String::from_utf8(bytes).map_err(|_| ErrorKind::InvalidText("UTF-8").into())
}

impl Stringify for JsonStringifier {
    fn stringify(&self, node: &Node, sink: &mut dyn fmt::Write, indent: usize) -> Result<(), Error> {
        sink.write_str(&to_json(node, indent)?)?;
        sink.write_char('\n')?;
        Ok(())
    }

    /// Several documents are written as one JSON array.
    fn stringify_stream(&self, documents: &[Node], sink: &mut dyn fmt::Write, indent: usize) -> Result<(), Error> {
        match documents {
            [document] => self.stringify(document, sink, indent),
            documents => {
                sink.write_str(&to_json(documents, indent)?)?;
                sink.write_char('\n')?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stringify::{Format, to_string};

    fn sample() -> Node {
        let mut node = Node::hole();
        node["name"] = Node::from("demo");
        node["count"] = Node::from(3);
        node["ratio"] = Node::from(0.5_f64);
        node["enabled"] = Node::boolean_literal(true, "On");
        node["missing"] = Node::Null;
        node["tags"] = Node::from(vec!["a", "b"]);
        node
    }

    #[test]
    fn test_compact() {
        assert_eq!(
            to_string(&sample(), Format::Json, 0).unwrap(),
            "{\"name\":\"demo\",\"count\":3,\"ratio\":0.5,\"enabled\":true,\"missing\":null,\"tags\":[\"a\",\"b\"]}\n"
        );
    }

    #[test]
    fn test_pretty_keeps_key_order() {
        let mut node = Node::hole();
        node["z"] = Node::from(1);
        node["a"]["b"] = Node::from(2);
        let expected = "{\n    \"z\": 1,\n    \"a\": {\n        \"b\": 2\n    }\n}\n";
        assert_eq!(to_string(&node, Format::Json, 4).unwrap(), expected);
    }

    #[test]
    fn test_documents_and_comments() {
        let single = Node::Document(vec![Node::comment("note"), Node::from(1)]);
        assert_eq!(to_string(&single, Format::Json, 0).unwrap(), "1\n");

        let mut text = String::new();
        JsonStringifier
            .stringify_stream(
                &[Node::Document(vec![Node::from(1)]), Node::Document(vec![Node::from("x")])],
                &mut text,
                0,
            )
            .unwrap();
        assert_eq!(text, "[1,\"x\"]\n");
    }

    #[test]
    fn test_large_integers() {
        let node = Node::from(100_000_000_000_000_000_000_i128);
        assert_eq!(to_string(&node, Format::Json, 0).unwrap(), "100000000000000000000\n");
    }
}
