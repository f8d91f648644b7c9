// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Anchors, aliases and `<<` overrides.
//!
//! An anchor records the raw source text of its value. An alias parses that
//! text again through a nested [`Cursor`], so every alias yields a tree of its
//! own that shares nothing with the anchored one.

use log::debug;

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind};
use crate::node::Node;

use super::{
    Anchored, Parser, Scope, advance_to_next_indent, at_any_document_marker, at_break, finish_line,
    is_flow_indicator, is_separator, skip_blanks,
};

impl Parser {
    pub fn is_anchor(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        cursor.current() == Some('&')
    }

    pub fn is_alias(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        cursor.current() == Some('*')
    }

    /// `<<` followed by `:` and a separator.
    pub fn is_override(&self, cursor: &mut Cursor, _scope: Scope) -> bool {
        if !cursor.starts_with("<<") {
            return false;
        }
        cursor.save();
        cursor.matches("<<");
        skip_blanks(cursor);
        let found = cursor.current() == Some(':') && is_separator(cursor.peek(1));
        cursor.restore();
        found
    }

    /// Parse `&name value`, register the value's source text under `name`
    /// and wrap the parsed value in an Anchor node.
    pub fn parse_anchor(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        cursor.next()?;
        let name = read_name(cursor);
        if name.is_empty() {
            return Err(cursor.error(ErrorKind::InvalidAnchorName));
        }
        skip_blanks(cursor);

        if scope.flow {
            advance_to_next_indent(cursor);
            if matches!(cursor.current(), None | Some(',' | ']' | '}')) {
                self.register(&name, String::new(), scope);
                return Ok(Node::anchor(name, Node::Null));
            }
        } else if cursor.current() == Some('#') || at_break(cursor) {
            // The anchored value starts on the next line and must be nested deeper,
            // or be a block array at the column of its key.
            advance_to_next_indent(cursor);
            let nested = cursor.more()
                && !at_any_document_marker(cursor)
                && (cursor.column() > scope.indent
                    || (scope.key
                        && cursor.column() == scope.indent
                        && self.is_array(cursor, scope)));
            if !nested {
                self.register(&name, String::new(), scope);
                return Ok(Node::anchor(name, Node::Null));
            }
        }

        let start = cursor.position();
        let column = cursor.column();
        let node = self.parse_value(cursor, scope)?;
        let raw = cursor.slice(start, cursor.position()).trim_end_matches([' ', '\t']);
        // Pad to the original column so that block structure parses the same way again.
        let text = format!("{}{raw}", " ".repeat(column - 1));
        self.register(&name, text, scope);
        Ok(Node::anchor(name, node))
    }

    /// Parse `*name` into an Alias node holding a fresh copy of the anchored value.
    pub fn parse_alias(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let location = cursor.location();
        let start = cursor.position();
        cursor.next()?;
        let name = read_name(cursor);
        if name.is_empty() {
            return Err(cursor.error(ErrorKind::InvalidAliasName));
        }
        let node = self
            .expand_alias(&name)
            .map_err(|err| Error::at(err.kind, location, cursor.span_from(start)))?;
        if !scope.flow {
            finish_line(cursor)?;
        }
        Ok(Node::alias(name, node))
    }

    /// Override entry inside a flow collection: a dictionary holding the
    /// merged content of the referenced dictionaries.
    pub fn parse_override(&mut self, cursor: &mut Cursor, scope: Scope) -> Result<Node, Error> {
        let mut entries = Vec::new();
        let overrides = self.parse_override_targets(cursor, scope)?;
        merge_overrides(&mut entries, overrides);
        Ok(Node::Dictionary(entries))
    }

    /// Parse `<<: *a` or `<<: [*a, *b]` and return the entries of the
    /// referenced dictionaries in order.
    pub(crate) fn parse_override_targets(
        &mut self,
        cursor: &mut Cursor,
        scope: Scope,
    ) -> Result<Vec<Vec<(Node, Node)>>, Error> {
        let location = cursor.location();
        cursor.matches("<<");
        skip_blanks(cursor);
        cursor.matches(":");
        skip_blanks(cursor);

        let targets = match cursor.current() {
            Some('*') => vec![self.parse_alias(cursor, scope.into_flow())?],
            Some('[') => match self.parse_inline_array(cursor, scope.into_flow())? {
                Node::Array(items) => items,
                _ => Vec::new(),
            },
            _ => return Err(cursor.error(ErrorKind::InvalidOverride)),
        };
        if !scope.flow {
            finish_line(cursor)?;
        }

        let mut dictionaries = Vec::with_capacity(targets.len());
        for target in targets {
            let Node::Alias { name, node } = target else {
                return Err(Error::at(
                    ErrorKind::InvalidOverride,
                    location,
                    cursor.span_from(cursor.position()),
                ));
            };
            match into_entries(*node) {
                Ok(entries) => {
                    debug!("Override merges {} key(s) from '{name}'", entries.len());
                    dictionaries.push(entries);
                }
                Err(_) => {
                    return Err(Error::at(
                        ErrorKind::InvalidOverride,
                        location,
                        cursor.span_from(cursor.position()),
                    ));
                }
            }
        }
        Ok(dictionaries)
    }

    /// Parse the stored text of an anchor again, in the scope the anchored
    /// value was first parsed in.
    fn expand_alias(&mut self, name: &str) -> Result<Node, Error> {
        let Some(Anchored { text, scope }) = self.anchors.get(name).cloned() else {
            return Err(ErrorKind::UndefinedAlias(name.to_owned()).into());
        };
        if self.alias_depth >= self.config.max_alias_depth {
            return Err(ErrorKind::AliasTooDeep(name.to_owned()).into());
        }
        if text.trim().is_empty() {
            return Ok(Node::Null);
        }

        debug!("Expanding alias '{name}'");
        self.alias_depth += 1;
        let result = Cursor::new(&text).and_then(|mut nested| {
            advance_to_next_indent(&mut nested);
            self.parse_value(&mut nested, scope)
        });
        self.alias_depth -= 1;
        result
    }

    fn register(&mut self, name: &str, text: String, scope: Scope) {
        debug!("Registering anchor '{name}'");
        self.anchors.insert(name.to_owned(), Anchored { text, scope });
    }
}

/// Anchor and alias names run up to whitespace or a flow indicator.
fn read_name(cursor: &mut Cursor) -> String {
    cursor.consume_while(|ch, _| !is_separator(Some(ch)) && !is_flow_indicator(ch))
}

/// The entries of a dictionary, looking through anchors and aliases.
fn into_entries(node: Node) -> Result<Vec<(Node, Node)>, Node> {
    match node {
        Node::Dictionary(entries) => Ok(entries),
        Node::Anchor { node, .. } | Node::Alias { node, .. } => into_entries(*node),
        other => Err(other),
    }
}

/// Merge override dictionaries into `entries`, in order. Keys already present
/// win and dictionaries present on both sides are merged recursively.
pub(crate) fn merge_overrides(entries: &mut Vec<(Node, Node)>, overrides: Vec<Vec<(Node, Node)>>) {
    for source in overrides {
        merge_entries(entries, source);
    }
}

fn merge_entries(target: &mut Vec<(Node, Node)>, source: Vec<(Node, Node)>) {
    for (key, value) in source {
        let existing = target
            .iter_mut()
            .find(|(existing_key, _)| existing_key.key_text() == key.key_text());
        match existing {
            Some((_, existing_value)) => {
                if let Node::Dictionary(existing_entries) = existing_value.resolve_mut()
                    && let Ok(incoming) = into_entries(value)
                {
                    merge_entries(existing_entries, incoming);
                }
            }
            None => target.push((key, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    fn parse(text: &str) -> Result<Node, Error> {
        let mut cursor = Cursor::new(text)?;
        let mut documents = Parser::new(Configuration::default()).parse_documents(&mut cursor)?;
        let Some(Node::Document(mut content)) = documents.pop() else {
            panic!("expected a document");
        };
        Ok(content.pop().unwrap_or_default())
    }

    #[test]
    fn test_alias_is_an_independent_copy() {
        let node = parse("base: &b\n  x: 1\n  y: [1, 2]\ncopy: *b\n").unwrap();
        assert!(matches!(&node["base"], Node::Anchor { name, .. } if name == "b"));
        assert!(matches!(&node["copy"], Node::Alias { name, .. } if name == "b"));
        assert_eq!(node["copy"]["x"].value::<i32>().unwrap(), 1);
        assert_eq!(node["copy"]["y"].len(), 2);
        assert_eq!(node["base"].resolve(), node["copy"].resolve());
    }

    #[test]
    fn test_inline_anchor() {
        let node = parse("- &v hello\n- *v\n- [&n 5, *n]\n").unwrap();
        assert_eq!(node[1].as_str().unwrap(), "hello");
        assert_eq!(node[2][1].value::<i32>().unwrap(), 5);
    }

    #[test]
    fn test_empty_anchor_in_array() {
        let node = parse("- &a\n- b\n- *a\n").unwrap();
        assert_eq!(node.len(), 3);
        assert_eq!(node[0], Node::anchor("a", Node::Null));
        assert_eq!(node[1].as_str().unwrap(), "b");
        assert_eq!(node[2], Node::alias("a", Node::Null));
    }

    #[test]
    fn test_anchor_followed_by_sibling() {
        let node = parse("- &a x\n- y\n").unwrap();
        assert_eq!(node.len(), 2);
        assert_eq!(node[1].as_str().unwrap(), "y");

        let node = parse("k: &a\nj: 1\n").unwrap();
        assert_eq!(node["k"], Node::anchor("a", Node::Null));
        assert_eq!(node["j"].value::<i32>().unwrap(), 1);
    }

    #[test]
    fn test_anchored_array_at_key_column() {
        let node = parse("a: &x\n- 1\n- 2\nb: *x\n").unwrap();
        assert_eq!(node["a"].len(), 2);
        assert_eq!(node["b"].len(), 2);
        assert_eq!(node["a"].resolve(), node["b"].resolve());
    }

    #[test]
    fn test_alias_of_nested_block_with_indentation_indicator() {
        let node = parse("a:\n  b: &x |2\n      indented\n    base\nc: *x\n").unwrap();
        assert_eq!(node["a"]["b"].as_str().unwrap(), "  indented\nbase\n");
        assert_eq!(node["c"].as_str().unwrap(), "  indented\nbase\n");
    }

    #[test]
    fn test_undefined_alias() {
        let err = parse("a: *missing").unwrap_err();
        assert_eq!(
            err.to_string(),
            "YAML Syntax Error [Line: 1 Column: 4]: Alias 'missing' does not have a defined anchor."
        );
    }

    #[test]
    fn test_override_precedence() {
        let text = "\
defaults: &d
  a: 1
  b: 2
  nested:
    x: 1
    y: 2
item:
  <<: *d
  b: 3
  nested:
    y: 20
";
        let node = parse(text).unwrap();
        let item = &node["item"];
        assert!(!item.contains("<<"));
        assert_eq!(item["a"].value::<i32>().unwrap(), 1);
        assert_eq!(item["b"].value::<i32>().unwrap(), 3);
        assert_eq!(item["nested"]["x"].value::<i32>().unwrap(), 1);
        assert_eq!(item["nested"]["y"].value::<i32>().unwrap(), 20);
    }

    #[test]
    fn test_override_list_first_wins() {
        let text = "a: &a {k: 1, only_a: x}\nb: &b {k: 2, only_b: y}\nc:\n  <<: [*a, *b]\n";
        let node = parse(text).unwrap();
        assert_eq!(node["c"]["k"].value::<i32>().unwrap(), 1);
        assert!(node["c"].contains("only_a"));
        assert!(node["c"].contains("only_b"));
    }

    #[test]
    fn test_override_in_flow_context() {
        let node = parse("a: &a {k: 1}\nb: [<<: *a]\n").unwrap();
        assert_eq!(node["b"][0]["k"].value::<i32>().unwrap(), 1);
    }

    #[test]
    fn test_override_requires_dictionary() {
        let err = parse("a: &a [1]\nb:\n  <<: *a\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidOverride);
    }

    #[test]
    fn test_self_referencing_anchor_is_bounded() {
        let err = parse("a: &x [1]\nb: &x [*x, *x]\nc: *x\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::AliasTooDeep("x".to_owned()));
    }
}
