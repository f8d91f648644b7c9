// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Error types for YAML parsing, tree access and I/O.
//!
//! Every error renders in one of two fixed shapes:
//!
//! - `<Category> Error [Line: <n> Column: <n>]: <message>.` when a source position is known
//! - `<Category> Error: <message>.` otherwise

use crate::node::Kind;
use crate::span::{Position, Span};

/// The subsystem an error originates from. Used as the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Category {
    #[display("YAML")]
    Yaml,
    #[display("YAML Syntax")]
    Syntax,
    #[display("Node")]
    Node,
    #[display("Dictionary")]
    Dictionary,
    #[display("Array")]
    Array,
    #[display("Translator")]
    Translator,
    #[display("File")]
    File,
    #[display("Source")]
    Source,
}

/// The kind of error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    // Syntax errors.
    #[display("Dictionary already contains key '{_0}'")]
    DuplicateKey(String),
    #[display("Invalid key '{_0}' specified")]
    InvalidKey(String),
    #[display("Missing key/value pair")]
    MissingKeyValue,
    #[display("Invalid indentation for dictionary")]
    DictionaryIndentation,
    #[display("Invalid indentation for array")]
    ArrayIndentation,
    #[display("Mapping value not allowed on the same line as its key")]
    NestedMappingOnKeyLine,
    #[display("Missing closing {_0} on quoted string")]
    UnterminatedString(char),
    #[display("Invalid block string header '{_0}'")]
    InvalidBlockHeader(String),
    #[display("Unexpected ',' in in-line {_0}")]
    UnexpectedComma(&'static str),
    #[display("Missing ',' in in-line {_0}")]
    MissingComma(&'static str),
    #[display("Missing closing '{_0}' in in-line {_1}")]
    MissingClosingBracket(char, &'static str),
    #[display("Inline {_0} used as key is meant to be on one line")]
    KeyNotOnOneLine(&'static str),
    #[display("Unexpected content '{_0}' after value")]
    TrailingContent(String),
    #[display("Unexpected character '{_0}'")]
    UnexpectedCharacter(char),
    #[display("Only one top-level value allowed per document")]
    MultipleTopLevelValues,
    #[display("Invalid anchor name")]
    InvalidAnchorName,
    #[display("Invalid alias name")]
    InvalidAliasName,
    #[display("Alias '{_0}' does not have a defined anchor")]
    UndefinedAlias(String),
    #[display("Alias '{_0}' expands too deeply")]
    AliasTooDeep(String),
    #[display("Override '<<' must reference a dictionary")]
    InvalidOverride,
    #[display("Collections nested too deeply")]
    NestingTooDeep,

    // Source (cursor) errors.
    #[display("Empty source buffer passed to be parsed")]
    EmptySource,
    #[display("Tried to read past end of buffer")]
    ReadPastEnd,
    #[display("Backup would move before the start of the current line")]
    BackupPastLineStart,

    // Tree access errors.
    #[display("Node is a {found} not a {expected}")]
    WrongKind { expected: Kind, found: Kind },
    #[display("Key '{_0}' does not exist")]
    KeyNotFound(String),
    #[display("Invalid index used to access array")]
    IndexOutOfRange,
    #[display("Key '{_0}' already exists")]
    KeyExists(String),

    // Translator errors.
    #[display("Invalid escape sequence '{_0}'")]
    InvalidEscape(String),
    #[display("Unpaired surrogate found in escape sequence")]
    UnpairedSurrogate,
    #[display("Invalid character entity '{_0}'")]
    InvalidEntity(String),

    // File errors.
    #[display("{_0}")]
    Io(String),
    #[display("Unsupported encoding '{_0}'")]
    UnsupportedEncoding(&'static str),
    #[display("Invalid {_0} text in file")]
    InvalidText(&'static str),
}

impl ErrorKind {
    /// The category (message prefix) this kind of error belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::DuplicateKey(_)
            | Self::InvalidKey(_)
            | Self::MissingKeyValue
            | Self::DictionaryIndentation
            | Self::ArrayIndentation
            | Self::NestedMappingOnKeyLine
            | Self::UnterminatedString(_)
            | Self::InvalidBlockHeader(_)
            | Self::UnexpectedComma(_)
            | Self::MissingComma(_)
            | Self::MissingClosingBracket(..)
            | Self::KeyNotOnOneLine(_)
            | Self::TrailingContent(_)
            | Self::UnexpectedCharacter(_)
            | Self::InvalidAnchorName
            | Self::InvalidAliasName
            | Self::UndefinedAlias(_)
            | Self::AliasTooDeep(_)
            | Self::InvalidOverride => Category::Syntax,
            Self::MultipleTopLevelValues | Self::NestingTooDeep => Category::Yaml,
            Self::EmptySource | Self::ReadPastEnd | Self::BackupPastLineStart => Category::Source,
            Self::WrongKind { .. } => Category::Node,
            Self::KeyNotFound(_) | Self::KeyExists(_) => Category::Dictionary,
            Self::IndexOutOfRange => Category::Array,
            Self::InvalidEscape(_) | Self::UnpairedSurrogate | Self::InvalidEntity(_) => {
                Category::Translator
            }
            Self::Io(_) | Self::UnsupportedEncoding(_) | Self::InvalidText(_) => Category::File,
        }
    }
}

/// An error raised while parsing, accessing the tree, translating or doing file I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The kind of error
    pub kind: ErrorKind,
    /// Line/column where the error was detected, if it came from source text
    pub position: Option<Position>,
    /// Byte span where the error was detected, if it came from source text
    pub span: Option<Span>,
}

impl Error {
    /// Create an error without a source location.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            position: None,
            span: None,
        }
    }

    /// Create an error positioned in the source text.
    #[must_use]
    pub const fn at(kind: ErrorKind, position: Position, span: Span) -> Self {
        Self {
            kind,
            position: Some(position),
            span: Some(span),
        }
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.kind.category()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(
                f,
                "{} Error [{position}]: {}.",
                self.category(),
                self.kind
            ),
            None => write!(f, "{} Error: {}.", self.category(), self.kind),
        }
    }
}

impl std::error::Error for Error {}
