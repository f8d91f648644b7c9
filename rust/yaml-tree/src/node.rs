// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! The YAML node tree.
//!
//! A [`Node`] exclusively owns its payload and, transitively, every child
//! node. Nodes are move-only: there is no `Clone`, one document is one
//! ownership chain. Aliases hold an independent copy produced by re-parsing
//! the anchored source text, never a shared reference.
//!
//! The tree can also be built by hand. Indexing an empty ([`Node::Hole`])
//! node by key or index promotes it in place to a dictionary or an array:
//!
//! ```
//! use yaml_tree::Node;
//!
//! let mut root = Node::hole();
//! root["servers"][2] = Node::from("db");
//! assert_eq!(root["servers"].len(), 3);
//! assert!(root["servers"][0].is_hole());
//! ```

use std::ops::{Index, IndexMut};

use crate::error::{Error, ErrorKind};
use crate::number::{FromNumber, Number};

/// How a string scalar was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quote {
    /// Plain (unquoted) scalar
    #[default]
    None,
    /// `'single quoted'`
    Single,
    /// `"double quoted"`
    Double,
    /// `>` folded block scalar
    Folded,
    /// `|` literal block scalar
    Literal,
}

impl Quote {
    /// The character that introduced the scalar, if any.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Single => Some('\''),
            Self::Double => Some('"'),
            Self::Folded => Some('>'),
            Self::Literal => Some('|'),
        }
    }
}

/// The kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Kind {
    Number,
    String,
    Boolean,
    Null,
    Array,
    Dictionary,
    Document,
    Comment,
    Hole,
    Anchor,
    Alias,
}

/// A single node of the YAML tree.
#[derive(Debug, Default, PartialEq)]
pub enum Node {
    Number(Number),
    String {
        text: String,
        quote: Quote,
    },
    /// A boolean plus the spelling that produced it (`True`, `On`, `Yes`, ...).
    Boolean {
        value: bool,
        literal: String,
    },
    Null,
    Array(Vec<Node>),
    /// Ordered key/value pairs. Keys are always `String` nodes and unique.
    Dictionary(Vec<(Node, Node)>),
    Document(Vec<Node>),
    Comment(String),
    /// Placeholder for array slots that have not been assigned yet.
    #[default]
    Hole,
    Anchor {
        name: String,
        node: Box<Node>,
    },
    Alias {
        name: String,
        node: Box<Node>,
    },
}

pub(crate) static HOLE: Node = Node::Hole;

impl Node {
    pub fn number(number: impl Into<Number>) -> Self {
        Self::Number(number.into())
    }

    /// A plain (unquoted) string.
    pub fn string(text: impl Into<String>) -> Self {
        Self::quoted(text, Quote::None)
    }

    pub fn quoted(text: impl Into<String>, quote: Quote) -> Self {
        Self::String {
            text: text.into(),
            quote,
        }
    }

    /// A boolean spelled `True`/`False`.
    pub fn boolean(value: bool) -> Self {
        Self::Boolean {
            value,
            literal: if value { "True" } else { "False" }.to_owned(),
        }
    }

    /// A boolean with an explicit source spelling.
    pub fn boolean_literal(value: bool, literal: impl Into<String>) -> Self {
        Self::Boolean {
            value,
            literal: literal.into(),
        }
    }

    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn array() -> Self {
        Self::Array(Vec::new())
    }

    pub const fn dictionary() -> Self {
        Self::Dictionary(Vec::new())
    }

    pub const fn document() -> Self {
        Self::Document(Vec::new())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    pub const fn hole() -> Self {
        Self::Hole
    }

    pub fn anchor(name: impl Into<String>, node: Self) -> Self {
        Self::Anchor {
            name: name.into(),
            node: Box::new(node),
        }
    }

    pub fn alias(name: impl Into<String>, node: Self) -> Self {
        Self::Alias {
            name: name.into(),
            node: Box::new(node),
        }
    }

    pub const fn kind(&self) -> Kind {
        match self {
            Self::Number(_) => Kind::Number,
            Self::String { .. } => Kind::String,
            Self::Boolean { .. } => Kind::Boolean,
            Self::Null => Kind::Null,
            Self::Array(_) => Kind::Array,
            Self::Dictionary(_) => Kind::Dictionary,
            Self::Document(_) => Kind::Document,
            Self::Comment(_) => Kind::Comment,
            Self::Hole => Kind::Hole,
            Self::Anchor { .. } => Kind::Anchor,
            Self::Alias { .. } => Kind::Alias,
        }
    }

    pub const fn is_hole(&self) -> bool {
        matches!(self, Self::Hole)
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Look through anchors and aliases to the node they carry.
    pub fn resolve(&self) -> &Self {
        match self {
            Self::Anchor { node, .. } | Self::Alias { node, .. } => node.resolve(),
            other => other,
        }
    }

    pub fn resolve_mut(&mut self) -> &mut Self {
        match self {
            Self::Anchor { node, .. } | Self::Alias { node, .. } => node.resolve_mut(),
            other => other,
        }
    }

    /// Number of children of an array, dictionary or document; zero for anything else.
    pub fn len(&self) -> usize {
        match self.resolve() {
            Self::Array(items) | Self::Document(items) => items.len(),
            Self::Dictionary(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_str(&self) -> Result<&str, Error> {
        match self.resolve() {
            Self::String { text, .. } => Ok(text),
            other => Err(other.wrong_kind(Kind::String)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, Error> {
        match self.resolve() {
            Self::Boolean { value, .. } => Ok(*value),
            other => Err(other.wrong_kind(Kind::Boolean)),
        }
    }

    pub fn as_number(&self) -> Result<Number, Error> {
        match self.resolve() {
            Self::Number(number) => Ok(*number),
            other => Err(other.wrong_kind(Kind::Number)),
        }
    }

    /// Numeric value converted to `T` (floats round to the nearest integer).
    pub fn value<T: FromNumber>(&self) -> Result<T, Error> {
        self.as_number().map(|number| number.value())
    }

    /// Dictionary entries in insertion order.
    pub fn entries(&self) -> Result<&[(Self, Self)], Error> {
        match self.resolve() {
            Self::Dictionary(entries) => Ok(entries),
            other => Err(other.wrong_kind(Kind::Dictionary)),
        }
    }

    /// Array or document elements.
    pub fn items(&self) -> Result<&[Self], Error> {
        match self.resolve() {
            Self::Array(items) | Self::Document(items) => Ok(items),
            other => Err(other.wrong_kind(Kind::Array)),
        }
    }

    /// Whether a dictionary contains `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries()
            .is_ok_and(|entries| entries.iter().any(|(k, _)| k.key_text() == key))
    }

    /// Look up a dictionary value by key.
    pub fn get(&self, key: &str) -> Result<&Self, Error> {
        self.entries()?
            .iter()
            .find(|(k, _)| k.key_text() == key)
            .map(|(_, value)| value)
            .ok_or_else(|| ErrorKind::KeyNotFound(key.to_owned()).into())
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Self, Error> {
        match self.resolve_mut() {
            Self::Dictionary(entries) => entries
                .iter_mut()
                .find(|(k, _)| k.key_text() == key)
                .map(|(_, value)| value)
                .ok_or_else(|| ErrorKind::KeyNotFound(key.to_owned()).into()),
            other => Err(other.wrong_kind(Kind::Dictionary)),
        }
    }

    /// Look up an array or document element by index.
    pub fn at(&self, index: usize) -> Result<&Self, Error> {
        self.items()?
            .get(index)
            .ok_or_else(|| ErrorKind::IndexOutOfRange.into())
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Self, Error> {
        match self.resolve_mut() {
            Self::Array(items) | Self::Document(items) => items
                .get_mut(index)
                .ok_or_else(|| ErrorKind::IndexOutOfRange.into()),
            other => Err(other.wrong_kind(Kind::Array)),
        }
    }

    /// Mutable access to the value stored under `key`, creating it as a
    /// [`Node::Hole`] if it does not exist. A hole is promoted to an empty
    /// dictionary first.
    pub fn entry(&mut self, key: &str) -> Result<&mut Self, Error> {
        if self.is_hole() {
            *self = Self::dictionary();
        }
        match self.resolve_mut() {
            Self::Dictionary(entries) => {
                let index = match entries.iter().position(|(k, _)| k.key_text() == key) {
                    Some(index) => index,
                    None => {
                        entries.push((Self::string(key), Self::Hole));
                        entries.len() - 1
                    }
                };
                entries
                    .get_mut(index)
                    .map(|(_, value)| value)
                    .ok_or_else(|| ErrorKind::KeyNotFound(key.to_owned()).into())
            }
            other => Err(other.wrong_kind(Kind::Dictionary)),
        }
    }

    /// Mutable access to element `index`, growing the array with holes as
    /// needed. A hole is promoted to an empty array first.
    pub fn slot(&mut self, index: usize) -> Result<&mut Self, Error> {
        if self.is_hole() {
            *self = Self::array();
        }
        match self.resolve_mut() {
            Self::Array(items) | Self::Document(items) => {
                if index >= items.len() {
                    items.resize_with(index + 1, Self::hole);
                }
                items
                    .get_mut(index)
                    .ok_or_else(|| ErrorKind::IndexOutOfRange.into())
            }
            other => Err(other.wrong_kind(Kind::Array)),
        }
    }

    /// Insert a new dictionary entry; fails if `key` already exists.
    pub fn insert(&mut self, key: Self, value: Self) -> Result<(), Error> {
        if self.is_hole() {
            *self = Self::dictionary();
        }
        match self.resolve_mut() {
            Self::Dictionary(entries) => {
                let name = key.key_text();
                if entries.iter().any(|(k, _)| k.key_text() == name) {
                    return Err(ErrorKind::KeyExists(name.into_owned()).into());
                }
                let key = match key {
                    key @ Self::String { .. } => key,
                    other => Self::quoted(other.to_key(), Quote::Double),
                };
                entries.push((key, value));
                Ok(())
            }
            other => Err(other.wrong_kind(Kind::Dictionary)),
        }
    }

    /// Append to an array or document.
    pub fn push(&mut self, value: Self) -> Result<(), Error> {
        if self.is_hole() {
            *self = Self::array();
        }
        match self.resolve_mut() {
            Self::Array(items) | Self::Document(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(other.wrong_kind(Kind::Array)),
        }
    }

    /// Grow an array to `index + 1` elements, filling new slots with holes.
    pub fn resize(&mut self, index: usize) -> Result<(), Error> {
        self.slot(index).map(|_| ())
    }

    /// Render this node as a mapping key string.
    ///
    /// Scalars render as their text; collections render in flow style, for
    /// example `[one, two]` or `{a: 1}`.
    pub fn to_key(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::String { text, .. } | Self::Comment(text) => text.clone(),
            Self::Boolean { literal, .. } => literal.clone(),
            Self::Null | Self::Hole => "null".to_owned(),
            Self::Array(items) | Self::Document(items) => {
                let items: Vec<String> = items.iter().map(Self::to_key).collect();
                format!("[{}]", items.join(", "))
            }
            Self::Dictionary(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key.to_key(), value.to_key()))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            Self::Anchor { node, .. } | Self::Alias { node, .. } => node.to_key(),
        }
    }

    /// Key text without allocating for the common string case.
    pub(crate) fn key_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Self::String { text, .. } => std::borrow::Cow::Borrowed(text),
            other => std::borrow::Cow::Owned(other.to_key()),
        }
    }

    fn wrong_kind(&self, expected: Kind) -> Error {
        ErrorKind::WrongKind {
            expected,
            found: self.kind(),
        }
        .into()
    }
}

impl Index<&str> for Node {
    type Output = Self;

    /// Returns a hole for missing keys and non-dictionaries.
    fn index(&self, key: &str) -> &Self {
        self.get(key).unwrap_or(&HOLE)
    }
}

impl IndexMut<&str> for Node {
    /// # Panics
    ///
    /// Panics if the node is neither a hole nor a dictionary.
    fn index_mut(&mut self, key: &str) -> &mut Self {
        match self.entry(key) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Index<usize> for Node {
    type Output = Self;

    /// Returns a hole for out of range indices and non-arrays.
    fn index(&self, index: usize) -> &Self {
        self.at(index).unwrap_or(&HOLE)
    }
}

impl IndexMut<usize> for Node {
    /// # Panics
    ///
    /// Panics if the node is neither a hole nor an array.
    fn index_mut(&mut self, index: usize) -> &mut Self {
        match self.slot(index) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }
}

impl From<Number> for Node {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(val: $ty) -> Self {
                    Self::Number(val.into())
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, f32, f64);

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::boolean(value)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::string(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::string(text)
    }
}

impl From<()> for Node {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Self> for Node {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

/// Build a dictionary from ordered key/value pairs. Later duplicates are dropped.
impl<K: Into<String>, V: Into<Self>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(Self, Self)> = Vec::new();
        for (key, value) in iter {
            let key = key.into();
            if !entries.iter().any(|(k, _)| k.key_text() == key.as_str()) {
                entries.push((Self::string(key), value.into()));
            }
        }
        Self::Dictionary(entries)
    }
}
