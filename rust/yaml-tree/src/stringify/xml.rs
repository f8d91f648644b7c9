// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! XML output.
//!
//! Everything is wrapped in a `<root>` element. Dictionary keys become
//! element names and array items become `<Row>` elements.

use std::fmt;

use crate::error::Error;
use crate::node::Node;
use crate::translator::{Translator as _, XmlTranslator};

use super::{Stringify, write_indent};

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const ROOT: &str = "root";
const ROW: &str = "Row";
const DOCUMENT: &str = "Document";

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlStringifier;

impl Stringify for XmlStringifier {
    fn stringify(&self, node: &Node, sink: &mut dyn fmt::Write, indent: usize) -> Result<(), Error> {
        sink.write_str(DECLARATION)?;
        Writer { out: sink, indent }.element(ROOT, node, 0)?;
        Ok(())
    }

    /// All documents share one root. With more than one document each is
    /// wrapped in its own `<Document>` element.
    fn stringify_stream(&self, documents: &[Node], sink: &mut dyn fmt::Write, indent: usize) -> Result<(), Error> {
        if let [document] = documents {
            return self.stringify(document, sink, indent);
        }
        sink.write_str(DECLARATION)?;
        let mut writer = Writer { out: sink, indent };
        writeln!(writer.out, "<{ROOT}>")?;
        for document in documents {
            writer.element(DOCUMENT, document, 1)?;
        }
        writeln!(writer.out, "</{ROOT}>")?;
        Ok(())
    }
}

struct Writer<'a> {
    out: &'a mut dyn fmt::Write,
    indent: usize,
}

impl Writer<'_> {
    fn pad(&mut self, level: usize) -> fmt::Result {
        write_indent(self.out, level * self.indent)
    }

    fn element(&mut self, name: &str, node: &Node, level: usize) -> fmt::Result {
        let node = node.resolve();
        self.pad(level)?;
        match node {
            Node::Dictionary(entries) if !entries.is_empty() => {}
            Node::Array(items) | Node::Document(items) if !items.is_empty() => {}
            other => return writeln!(self.out, "<{name}>{}</{name}>", text(other)),
        }
        writeln!(self.out, "<{name}>")?;
        self.contents(node, level + 1)?;
        self.pad(level)?;
        writeln!(self.out, "</{name}>")
    }

    fn contents(&mut self, node: &Node, level: usize) -> fmt::Result {
        match node.resolve() {
            Node::Dictionary(entries) => {
                for (key, value) in entries {
                    self.element(&tag(&key.key_text()), value, level)?;
                }
            }
            Node::Array(items) => {
                for item in items {
                    match item {
                        Node::Comment(comment) => self.comment(comment, level)?,
                        item => self.element(ROW, item, level)?,
                    }
                }
            }
            Node::Document(items) => {
                for item in items {
                    match item.resolve() {
                        Node::Comment(comment) => self.comment(comment, level)?,
                        Node::Dictionary(_) | Node::Array(_) | Node::Document(_) => {
                            self.contents(item, level)?;
                        }
                        scalar => {
                            self.pad(level)?;
                            writeln!(self.out, "{}", text(scalar))?;
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn comment(&mut self, comment: &str, level: usize) -> fmt::Result {
        self.pad(level)?;
        // `--` may not appear inside an XML comment.
        writeln!(self.out, "<!-- {} -->", comment.replace("--", "- -"))
    }
}

/// Element name for a dictionary key.
fn tag(key: &str) -> String {
    key.chars()
        .map(|ch| if ch.is_whitespace() { '-' } else { ch })
        .collect()
}

fn text(node: &Node) -> String {
    match node {
        Node::Number(number) => number.to_string(),
        Node::Boolean { literal, .. } => literal.clone(),
        Node::String { text, .. } | Node::Comment(text) => XmlTranslator.to(text),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stringify::{Format, to_string};

    #[test]
    fn test_elements_and_rows() {
        let mut node = Node::hole();
        node["server name"] = Node::from("a & b");
        node["ports"] = Node::from(vec![80, 443]);
        node["empty"] = Node::Null;
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<root>
  <server-name>a &amp; b</server-name>
  <ports>
    <Row>80</Row>
    <Row>443</Row>
  </ports>
  <empty></empty>
</root>
";
        assert_eq!(to_string(&node, Format::Xml, 2).unwrap(), expected);
    }

    #[test]
    fn test_document_content_and_comments() {
        let document = Node::Document(vec![
            Node::comment("generated"),
            Node::from_iter([("k", Node::from(true))]),
        ]);
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<root>
  <!-- generated -->
  <k>True</k>
</root>
";
        assert_eq!(to_string(&document, Format::Xml, 2).unwrap(), expected);
    }

    #[test]
    fn test_stream_wraps_documents() {
        let mut text = String::new();
        XmlStringifier
            .stringify_stream(
                &[Node::Document(vec![Node::from(1)]), Node::Document(vec![Node::from(2)])],
                &mut text,
                1,
            )
            .unwrap();
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<root>
 <Document>
  1
 </Document>
 <Document>
  2
 </Document>
</root>
";
        assert_eq!(text, expected);
    }
}
