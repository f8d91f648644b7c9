// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Escape translators for quoted YAML and XML text.
//!
//! For every translator `from(to(text)) == text`.

use crate::error::{Error, ErrorKind};

/// Converts raw text to and from an escaped representation.
pub trait Translator {
    /// Escape raw text.
    fn to(&self, raw: &str) -> String;

    /// Unescape text, failing on malformed escapes.
    fn from(&self, escaped: &str) -> Result<String, Error>;
}

/// Escapes of YAML double-quoted scalars.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlTranslator;

/// Character entities of XML text and attribute values.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlTranslator;

impl Translator for YamlTranslator {
    fn to(&self, raw: &str) -> String {
        let mut escaped = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match ch {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\t' => escaped.push_str("\\t"),
                '\r' => escaped.push_str("\\r"),
                '\u{08}' => escaped.push_str("\\b"),
                '\u{0C}' => escaped.push_str("\\f"),
                '\0' => escaped.push_str("\\0"),
                '\u{07}' => escaped.push_str("\\a"),
                '\u{1B}' => escaped.push_str("\\e"),
                '\u{0B}' => escaped.push_str("\\v"),
                ch if ch.is_control() && u32::from(ch) <= 0xFF => {
                    escaped.push_str(&format!("\\x{:02X}", u32::from(ch)));
                }
                ch if ch.is_control() => escaped.push_str(&format!("\\u{:04X}", u32::from(ch))),
                ch => escaped.push(ch),
            }
        }
        escaped
    }

    fn from(&self, escaped: &str) -> Result<String, Error> {
        let mut raw = String::with_capacity(escaped.len());
        let mut chars = escaped.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                raw.push(ch);
                continue;
            }
            let Some(code) = chars.next() else {
                return Err(ErrorKind::InvalidEscape("\\".to_owned()).into());
            };
            let unescaped = match code {
                'n' => '\n',
                't' | '\t' => '\t',
                'r' => '\r',
                'b' => '\u{08}',
                'f' => '\u{0C}',
                '0' => '\0',
                'a' => '\u{07}',
                'e' => '\u{1B}',
                'v' => '\u{0B}',
                ' ' => ' ',
                'N' => '\u{85}',
                '_' => '\u{A0}',
                'L' => '\u{2028}',
                'P' => '\u{2029}',
                '\\' | '"' | '/' => code,
                'x' => hex_char(&mut chars, code, 2)?,
                'U' => hex_char(&mut chars, code, 8)?,
                'u' => {
                    let unit = hex_value(&mut chars, code, 4)?;
                    utf16_char(unit, &mut chars)?
                }
                other => return Err(ErrorKind::InvalidEscape(format!("\\{other}")).into()),
            };
            raw.push(unescaped);
        }
        Ok(raw)
    }
}

fn hex_value(
    chars: &mut impl Iterator<Item = char>,
    code: char,
    digits: usize,
) -> Result<u32, Error> {
    let hex: String = chars.take(digits).collect();
    if hex.len() != digits {
        return Err(ErrorKind::InvalidEscape(format!("\\{code}{hex}")).into());
    }
    u32::from_str_radix(&hex, 16).map_err(|_| ErrorKind::InvalidEscape(format!("\\{code}{hex}")).into())
}

fn hex_char(chars: &mut impl Iterator<Item = char>, code: char, digits: usize) -> Result<char, Error> {
    let value = hex_value(chars, code, digits)?;
    char::from_u32(value).ok_or_else(|| ErrorKind::InvalidEscape(format!("\\{code}{value:X}")).into())
}

/// Combine a `\u` code unit with a following low surrogate escape when needed.
fn utf16_char(
    unit: u32,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<char, Error> {
    match unit {
        0xD800..=0xDBFF => {
            if chars.next() != Some('\\') || chars.next() != Some('u') {
                return Err(ErrorKind::UnpairedSurrogate.into());
            }
            let low = hex_value(chars, 'u', 4)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ErrorKind::UnpairedSurrogate.into());
            }
            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(combined).ok_or_else(|| ErrorKind::UnpairedSurrogate.into())
        }
        0xDC00..=0xDFFF => Err(ErrorKind::UnpairedSurrogate.into()),
        _ => char::from_u32(unit).ok_or_else(|| ErrorKind::InvalidEscape(format!("\\u{unit:04X}")).into()),
    }
}

const XML_ENTITIES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
];

impl Translator for XmlTranslator {
    fn to(&self, raw: &str) -> String {
        let mut escaped = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match XML_ENTITIES.iter().find(|(special, _)| *special == ch) {
                Some((_, entity)) => escaped.push_str(entity),
                None => escaped.push(ch),
            }
        }
        escaped
    }

    fn from(&self, escaped: &str) -> Result<String, Error> {
        let mut raw = String::with_capacity(escaped.len());
        let mut rest = escaped;
        while let Some(amp) = rest.find('&') {
            raw.push_str(rest.get(..amp).unwrap_or_default());
            let tail = rest.get(amp..).unwrap_or_default();
            let Some(semicolon) = tail.find(';') else {
                return Err(ErrorKind::InvalidEntity(tail.to_owned()).into());
            };
            let entity = tail.get(..=semicolon).unwrap_or_default();
            raw.push(decode_entity(entity)?);
            rest = tail.get(semicolon + 1..).unwrap_or_default();
        }
        raw.push_str(rest);
        Ok(raw)
    }
}

fn decode_entity(entity: &str) -> Result<char, Error> {
    if let Some((ch, _)) = XML_ENTITIES.iter().find(|(_, name)| *name == entity) {
        return Ok(*ch);
    }
    let invalid = || Error::from(ErrorKind::InvalidEntity(entity.to_owned()));
    let body = entity
        .strip_prefix("&#")
        .and_then(|body| body.strip_suffix(';'))
        .ok_or_else(invalid)?;
    let value = match body.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => body.parse::<u32>(),
    }
    .map_err(|_| invalid())?;
    char::from_u32(value).ok_or_else(invalid)
}
