// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! End-to-end tests through the public API.
//!
//! Sources are parsed, rendered in every output format and, for YAML, parsed
//! again to check that rendering reaches a fixed point.

use serde_json::json;

use yaml_tree::{
    Configuration, ErrorKind, Format, Node, Number, Quote, Stringify as _, Yaml, file, parse, stringify,
};

/// Sources that must survive a YAML round trip unchanged.
const ROUND_TRIP_SOURCES: [&str; 11] = [
    "name: demo\nports: [80, 443]\nnested:\n  a: 1\n  b: [x, y]\n",
    "lit: |\n  line1\n  line2\nfold: >-\n  folded text\n  continues\nkeep: |+\n  kept\n\n",
    "base: &b\n  x: 1\n  list: [1, 2]\ncopy: *b\n",
    "a: 'single'\nb: \"double\"\nc: \"42\"\nd: plain text\ne: Yes\nf: ~\ng: 'it''s'\n",
    "---\na: 1\n...\n---\n- x\n- y\n",
    "- - a\n  - b\n- k: v\n  l: [1, 2]\n- []\n- {}\n",
    "a: \"x: y\"\nb: \"# not a comment\"\nc: \"line\\nbreak\"\nd: \"\"\n\"key with spaces\": 1\n",
    "int: 7\nlong: 3000000000\nhuge: 100000000000000000000\nfloat: 1.5\ndouble: 1e40\n",
    "code: |2\n    indented first\n  then base\nnull key: {~: 1}\n",
    "a:\n  b: &x |2\n      indented\n    base\nc: *x\n",
    "- &a\n- b\n- *a\n",
];

fn render(documents: &[Node], format: Format, indent: usize) -> String {
    let mut text = String::new();
    format
        .stringifier()
        .stringify_stream(documents, &mut text, indent)
        .unwrap();
    text
}

#[test]
fn test_yaml_round_trip_is_fixed_point() {
    for source in ROUND_TRIP_SOURCES {
        let documents = parse(source).unwrap();
        let first = render(&documents, Format::Yaml, 2);
        let reparsed = parse(&first).unwrap_or_else(|err| panic!("{err}\n{first}"));
        assert_eq!(reparsed, documents, "{source:?} rendered as\n{first}");
        assert_eq!(render(&reparsed, Format::Yaml, 2), first, "{source:?}");
    }
}

#[test]
fn test_canonical_yaml_is_reproduced() {
    let source = "\
name: demo
list:
  - 1
  - two
nested:
  key: value
  deeper:
    - a: 1
      b: 'quoted'
";
    let documents = parse(source).unwrap();
    assert_eq!(render(&documents, Format::Yaml, 2), format!("---\n{source}...\n"));
}

#[test]
fn test_alias_copies_are_independent() {
    let mut documents = parse("base: &b\n  x: 1\ncopy: *b\n").unwrap();
    let root = &mut documents[0][0];
    root["copy"]["x"] = Node::from(5);
    assert_eq!(root["base"]["x"].value::<i32>().unwrap(), 1);
    assert_eq!(root["copy"]["x"].value::<i32>().unwrap(), 5);
}

#[test]
fn test_alias_in_sequence() {
    let yaml = Yaml::parse_str("hr:\n  - &SS Sammy Sosa\nrbi:\n  - *SS\n").unwrap();
    let root = yaml.root();
    assert!(matches!(&root["hr"][0], Node::Anchor { name, .. } if name == "SS"));
    assert_eq!(root["rbi"][0].as_str().unwrap(), "Sammy Sosa");
    assert_eq!(root["hr"][0].resolve(), root["rbi"][0].resolve());
    assert_eq!(
        yaml.stringify(Format::Yaml).unwrap(),
        "---\nhr:\n  - &SS Sammy Sosa\nrbi:\n  - *SS\n...\n"
    );
}

#[test]
fn test_alias_of_indented_block_survives_round_trip() {
    let source = "a:\n  b: &x |2\n      indented\n    base\nc: *x\n";
    let documents = parse(source).unwrap();
    let root = &documents[0][0];
    assert_eq!(root["a"]["b"].as_str().unwrap(), "  indented\nbase\n");
    assert_eq!(root["c"].as_str().unwrap(), "  indented\nbase\n");

    let text = render(&documents, Format::Yaml, 2);
    assert_eq!(text, format!("---\n{source}...\n"));
    let reparsed = parse(&text).unwrap();
    assert_eq!(reparsed[0][0]["c"].as_str().unwrap(), "  indented\nbase\n");
}

#[test]
fn test_override_precedence() {
    let source = "\
defaults: &defaults
  adapter: postgres
  host: localhost
  pool:
    size: 5
    timeout: 30
development:
  <<: *defaults
  database: dev
  pool:
    size: 10
";
    let yaml = Yaml::parse_str(source).unwrap();
    let development = &yaml.root()["development"];
    assert!(!development.contains("<<"));
    assert_eq!(development["adapter"].as_str().unwrap(), "postgres");
    assert_eq!(development["database"].as_str().unwrap(), "dev");
    assert_eq!(development["pool"]["size"].value::<i32>().unwrap(), 10);
    assert_eq!(development["pool"]["timeout"].value::<i32>().unwrap(), 30);

    let text = yaml.stringify(Format::Yaml).unwrap();
    assert!(!text.contains("<<"));
}

#[test]
fn test_number_type_selection() {
    let yaml = Yaml::parse_str("[12, 3000000000, 100000000000000000000, 2.5, 1e40, 0x10, 010]").unwrap();
    let values: Vec<Number> = yaml
        .root()
        .items()
        .unwrap()
        .iter()
        .map(|node| node.as_number().unwrap())
        .collect();
    assert_eq!(
        values,
        [
            Number::Int(12),
            Number::Long(3_000_000_000),
            Number::LongLong(100_000_000_000_000_000_000),
            Number::Float(2.5),
            Number::Double(1e40),
            Number::Int(16),
            Number::Int(8),
        ]
    );
}

#[test]
fn test_block_chomping() {
    let source = "strip: |-\n  text\n\nclip: |\n  text\n\nkeep: |+\n  text\n\nend: x\n";
    let yaml = Yaml::parse_str(source).unwrap();
    let root = yaml.root();
    assert_eq!(root["strip"].as_str().unwrap(), "text");
    assert_eq!(root["clip"].as_str().unwrap(), "text\n");
    assert_eq!(root["keep"].as_str().unwrap(), "text\n\n");
    assert_eq!(root["end"], Node::string("x"));
}

#[test]
fn test_error_messages() {
    let test_cases = [
        (
            "a: 1\na: 2\n",
            "YAML Syntax Error [Line: 2 Column: 3]: Dictionary already contains key 'a'.",
        ),
        (
            "[a, b",
            "YAML Syntax Error [Line: 1 Column: 1]: Missing closing ']' in in-line array.",
        ),
        (
            "[a,, b]",
            "YAML Syntax Error [Line: 1 Column: 4]: Unexpected ',' in in-line array.",
        ),
        (
            "a: *missing\n",
            "YAML Syntax Error [Line: 1 Column: 4]: Alias 'missing' does not have a defined anchor.",
        ),
        (
            "a: \"open\n",
            "YAML Syntax Error [Line: 1 Column: 4]: Missing closing \" on quoted string.",
        ),
        (
            "a: \"bad \\q\"\n",
            "Translator Error [Line: 1 Column: 4]: Invalid escape sequence '\\q'.",
        ),
        ("", "Source Error: Empty source buffer passed to be parsed."),
    ];
    for (source, expected) in test_cases {
        assert_eq!(parse(source).unwrap_err().to_string(), expected, "{source:?}");
    }
}

#[test]
fn test_invalid_block_header() {
    let err = parse("a: |x\n  text\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidBlockHeader("|x".to_owned()));
}

#[test]
fn test_document_markers() {
    let documents = parse("--- first\n...\n--- second\n---\n").unwrap();
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0][0].as_str().unwrap(), "first");
    assert_eq!(documents[1][0].as_str().unwrap(), "second");
    assert!(documents[2].is_empty());

    let text = render(&documents, Format::Yaml, 2);
    assert_eq!(text, "---\nfirst\n...\n---\nsecond\n...\n---\n...\n");
}

#[test]
fn test_json_output() {
    let source = "\
name: demo
ports: [80, 443]
enabled: On
ratio: 0.25
nothing: ~
nested:
  list:
    - a
    - {b: 2}
";
    let yaml = Yaml::parse_str(source).unwrap();
    let json: serde_json::Value = serde_json::from_str(&yaml.stringify(Format::Json).unwrap()).unwrap();
    assert_eq!(
        json,
        json!({
            "name": "demo",
            "ports": [80, 443],
            "enabled": true,
            "ratio": 0.25,
            "nothing": null,
            "nested": {"list": ["a", {"b": 2}]}
        })
    );

    let documents = parse("--- 1\n--- two\n").unwrap();
    let json: serde_json::Value = serde_json::from_str(&render(&documents, Format::Json, 0)).unwrap();
    assert_eq!(json, json!([1, "two"]));
}

#[test]
fn test_xml_output() {
    let documents = parse("server name: a<b\nitems:\n  - 1\n  - x\n").unwrap();
    let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<root>
  <server-name>a&lt;b</server-name>
  <items>
    <Row>1</Row>
    <Row>x</Row>
  </items>
</root>
";
    assert_eq!(render(&documents, Format::Xml, 2), expected);
}

#[test]
fn test_bencode_output() {
    let documents = parse("name: spam\ncount: 3\nratio: 1.5\nflags: [Yes, No]\nnothing: ~\n").unwrap();
    assert_eq!(
        render(&documents, Format::Bencode, 0),
        "d4:name4:spam5:counti3e5:ratio3:1.55:flagsli1ei0ee7:nothing4:nulle"
    );
}

#[test]
fn test_format_names() {
    let format: Format = serde_json::from_str("\"bencode\"").unwrap();
    assert_eq!(format, Format::Bencode);
    assert_eq!(format.to_string(), "Bencode");
    assert_eq!(stringify::to_string(&Node::from(1), format, 0).unwrap(), "i1e");
}

#[test]
fn test_file_with_bom() {
    let path = std::env::temp_dir().join(format!("yaml-tree-suite-{}.yaml", std::process::id()));
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"a: 1\r\nb:\r\n  - x\r\n");
    std::fs::write(&path, bytes).unwrap();

    let yaml = Yaml::from_file(&path, Configuration::default()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(yaml.encoding(), file::Format::Utf8Bom);
    assert_eq!(yaml.root()["b"][0], Node::string("x"));
}

#[test]
fn test_utf32_file_is_rejected() {
    let path = std::env::temp_dir().join(format!("yaml-tree-utf32-{}.yaml", std::process::id()));
    std::fs::write(&path, [0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x00, b'a']).unwrap();
    let err = Yaml::from_file(&path, Configuration::default()).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(err.to_string(), "File Error: Unsupported encoding 'UTF-32BE'.");
}

#[test]
fn test_programmatic_tree_stringifies() {
    let mut root = Node::hole();
    root["servers"][2]["name"] = Node::from("db");
    root["servers"][0] = Node::quoted("web", Quote::Single);
    root["note"] = Node::quoted("first line\nsecond line\n", Quote::Literal);
    let text = stringify::to_string(&root, Format::Yaml, 2).unwrap();
    assert_eq!(
        text,
        "servers:\n  - 'web'\n  - null\n  - name: db\nnote: |\n  first line\n  second line\n"
    );
    let reparsed = parse(&text).unwrap();
    assert!(reparsed[0][0]["servers"][1].is_null());
}
