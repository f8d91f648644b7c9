// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! A recursive-descent YAML parser building an owned node tree.
//!
//! This crate provides a YAML parser that:
//! - Parses block and flow collections, every scalar style and multiple documents
//! - Resolves anchors, aliases and `<<` overrides into independent subtrees
//! - Stops at the first error and reports it with its line and column
//! - Writes trees back as YAML, JSON, XML or Bencode
//!
//! # Example
//!
//! ```
//! use yaml_tree::{Format, Yaml};
//!
//! let input = r#"
//! name: John
//! age: 30
//! "#;
//!
//! let yaml = Yaml::parse_str(input)?;
//! assert_eq!(yaml.root()["name"].as_str()?, "John");
//! assert_eq!(yaml.root()["age"].value::<u8>()?, 30);
//!
//! let json = yaml.stringify(Format::Json)?;
//! assert!(json.contains("\"age\": 30"));
//! # Ok::<(), yaml_tree::Error>(())
//! ```

mod config;
mod cursor;
mod error;
pub mod file;
mod node;
mod number;
mod parser;
mod span;
pub mod stringify;
mod translator;
mod yaml;

pub use config::Configuration;
pub use cursor::Cursor;
pub use error::{Category, Error, ErrorKind};
pub use node::{Kind, Node, Quote};
pub use number::{FromNumber, Number};
pub use parser::Stream;
pub use span::{Position, Span};
pub use stringify::{Format, Stringify};
pub use translator::{Translator, XmlTranslator, YamlTranslator};
pub use yaml::Yaml;

/// Parse YAML input with the default configuration.
///
/// Returns one [`Node::Document`] per document in the input. Parsing stops at
/// the first error.
pub fn parse(input: &str) -> Result<Stream, Error> {
    parse_with(input, Configuration::default())
}

/// Parse YAML input with an explicit configuration.
pub fn parse_with(input: &str, config: Configuration) -> Result<Stream, Error> {
    let mut cursor = Cursor::new(input)?;
    parser::Parser::new(config).parse_documents(&mut cursor)
}
