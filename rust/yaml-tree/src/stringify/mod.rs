// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Rendering of node trees as YAML, JSON, XML or Bencode.

mod bencode;
mod json;
mod xml;
mod yaml;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::node::Node;

pub use bencode::BencodeStringifier;
pub use json::JsonStringifier;
pub use xml::XmlStringifier;
pub use yaml::YamlStringifier;

/// Writes a node tree in one output format.
pub trait Stringify {
    /// Render `node` into `sink`. `indent` is the number of spaces per nesting
    /// level for formats that indent.
    fn stringify(&self, node: &Node, sink: &mut dyn fmt::Write, indent: usize) -> Result<(), Error>;

    /// Render a stream of documents. By default the documents are written one after another.
    fn stringify_stream(
        &self,
        documents: &[Node],
        sink: &mut dyn fmt::Write,
        indent: usize,
    ) -> Result<(), Error> {
        documents
            .iter()
            .try_for_each(|document| self.stringify(document, sink, indent))
    }
}

/// Output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    #[display("YAML")]
    Yaml,
    #[display("JSON")]
    Json,
    #[display("XML")]
    Xml,
    #[display("Bencode")]
    Bencode,
}

impl Format {
    /// The stringifier writing this format.
    pub fn stringifier(self) -> &'static dyn Stringify {
        match self {
            Self::Yaml => &YamlStringifier,
            Self::Json => &JsonStringifier,
            Self::Xml => &XmlStringifier,
            Self::Bencode => &BencodeStringifier,
        }
    }
}

/// Render `node` in `format` into a new string.
pub fn to_string(node: &Node, format: Format, indent: usize) -> Result<String, Error> {
    let mut text = String::new();
    format.stringifier().stringify(node, &mut text, indent)?;
    Ok(text)
}

/// Write `spaces` spaces.
fn write_indent(out: &mut dyn fmt::Write, spaces: usize) -> fmt::Result {
    write!(out, "{:spaces$}", "")
}
