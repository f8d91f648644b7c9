// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Parser and stringifier settings.

use serde::{Deserialize, Serialize};

/// Configuration used while parsing and stringifying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Number of spaces per indentation level when stringifying.
    pub indent: usize,
    /// How many aliases may expand inside each other before parsing is aborted.
    /// Guards against anchors that were redefined to refer to themselves.
    pub max_alias_depth: usize,
    /// Maximum nesting of collections accepted by the parser.
    pub max_depth: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            indent: 2,
            max_alias_depth: 32,
            max_depth: 512,
        }
    }
}

impl Configuration {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
