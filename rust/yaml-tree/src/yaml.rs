// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use std::path::Path;

use crate::config::Configuration;
use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind};
use crate::file;
use crate::node::{HOLE, Node};
use crate::parser::{Parser, Stream};
use crate::stringify::Format;

/// A parsed YAML stream together with the configuration and file encoding
/// it is written back with.
#[derive(Debug, Default)]
pub struct Yaml {
    config: Configuration,
    encoding: file::Format,
    documents: Stream,
}

impl Yaml {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Parse `text` with the default configuration.
    pub fn parse_str(text: &str) -> Result<Self, Error> {
        let mut yaml = Self::default();
        yaml.parse(text)?;
        Ok(yaml)
    }

    /// Read and parse a file, remembering its encoding for [`Yaml::to_file`].
    pub fn from_file(path: impl AsRef<Path>, config: Configuration) -> Result<Self, Error> {
        let (text, encoding) = file::read_file(path)?;
        let mut yaml = Self::new(config);
        yaml.encoding = encoding;
        yaml.parse(&text)?;
        Ok(yaml)
    }

    /// Replace the documents with those parsed from `text`.
    ///
    /// On error the previous documents are left untouched.
    pub fn parse(&mut self, text: &str) -> Result<(), Error> {
        let mut cursor = Cursor::new(text)?;
        let documents = Parser::new(self.config).parse_documents(&mut cursor)?;
        self.documents = documents;
        Ok(())
    }

    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Encoding used by [`Yaml::to_file`].
    pub const fn encoding(&self) -> file::Format {
        self.encoding
    }

    pub const fn set_encoding(&mut self, encoding: file::Format) {
        self.encoding = encoding;
    }

    pub fn documents(&self) -> &[Node] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut Stream {
        &mut self.documents
    }

    /// The document at `index`.
    pub fn document(&self, index: usize) -> Result<&Node, Error> {
        self.documents
            .get(index)
            .ok_or_else(|| ErrorKind::IndexOutOfRange.into())
    }

    /// The value of the first document, or a hole when there is none.
    pub fn root(&self) -> &Node {
        match self.documents.first() {
            Some(Node::Document(content)) => content.first().unwrap_or(&HOLE),
            Some(other) => other,
            None => &HOLE,
        }
    }

    pub fn into_documents(self) -> Stream {
        self.documents
    }

    /// Render every document in `format` using the configured indentation.
    pub fn stringify(&self, format: Format) -> Result<String, Error> {
        let mut text = String::new();
        format
            .stringifier()
            .stringify_stream(&self.documents, &mut text, self.config.indent)?;
        Ok(text)
    }

    /// Write the documents as YAML in the remembered encoding.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let text = self.stringify(Format::Yaml)?;
        file::write_file(path, &text, self.encoding)
    }
}
