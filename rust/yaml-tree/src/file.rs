// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Reading and writing YAML files in their original encoding.
//!
//! The encoding is detected from the byte order mark. Files without one are
//! read as UTF-8. Line endings are normalised to `\n` on read; 16-bit
//! encodings are written back with `\r\n` line endings and a BOM.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, ErrorKind};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];
const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];

/// Text encoding of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
pub enum Format {
    #[default]
    #[display("UTF-8")]
    Utf8,
    #[display("UTF-8 with BOM")]
    Utf8Bom,
    #[display("UTF-16BE")]
    Utf16Be,
    #[display("UTF-16LE")]
    Utf16Le,
}

impl Format {
    const fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[],
            Self::Utf8Bom => &UTF8_BOM,
            Self::Utf16Be => &UTF16_BE_BOM,
            Self::Utf16Le => &UTF16_LE_BOM,
        }
    }
}

/// Detect the encoding of `bytes` from its byte order mark.
///
/// UTF-32 byte order marks are recognised but not supported.
pub fn detect_format(bytes: &[u8]) -> Result<Format, Error> {
    // The UTF-32LE mark starts with the UTF-16LE one, so it is checked first.
    if bytes.starts_with(&UTF32_LE_BOM) {
        return Err(ErrorKind::UnsupportedEncoding("UTF-32LE").into());
    }
    if bytes.starts_with(&UTF32_BE_BOM) {
        return Err(ErrorKind::UnsupportedEncoding("UTF-32BE").into());
    }
    let format = if bytes.starts_with(&UTF8_BOM) {
        Format::Utf8Bom
    } else if bytes.starts_with(&UTF16_BE_BOM) {
        Format::Utf16Be
    } else if bytes.starts_with(&UTF16_LE_BOM) {
        Format::Utf16Le
    } else {
        Format::Utf8
    };
    Ok(format)
}

/// Decode `bytes` to text with `\n` line endings.
pub fn decode(bytes: &[u8]) -> Result<(String, Format), Error> {
    let format = detect_format(bytes)?;
    let body = bytes.get(format.bom().len()..).unwrap_or_default();
    let text = match format {
        Format::Utf8 | Format::Utf8Bom => String::from_utf8(body.to_vec())
            .map_err(|_| Error::from(ErrorKind::InvalidText("UTF-8")))?,
        Format::Utf16Be => decode_utf16(body, u16::from_be_bytes)?,
        Format::Utf16Le => decode_utf16(body, u16::from_le_bytes)?,
    };
    Ok((normalise_line_endings(&text), format))
}

fn decode_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, Error> {
    let invalid = || Error::from(ErrorKind::InvalidText("UTF-16"));
    let (pairs, rest) = body.as_chunks::<2>();
    if !rest.is_empty() {
        return Err(invalid());
    }
    let units: Vec<u16> = pairs.iter().copied().map(unit).collect();
    String::from_utf16(&units).map_err(|_| invalid())
}

/// Encode `text` for writing in `format`, including the byte order mark.
pub fn encode(text: &str, format: Format) -> Vec<u8> {
    let mut bytes = format.bom().to_vec();
    match format {
        Format::Utf8 | Format::Utf8Bom => bytes.extend_from_slice(text.as_bytes()),
        Format::Utf16Be | Format::Utf16Le => {
            let text = normalise_line_endings(text).replace('\n', "\r\n");
            for unit in text.encode_utf16() {
                let pair = if format == Format::Utf16Be {
                    unit.to_be_bytes()
                } else {
                    unit.to_le_bytes()
                };
                bytes.extend_from_slice(&pair);
            }
        }
    }
    bytes
}

/// Read a file, returning its text and the encoding it was stored in.
pub fn read_file(path: impl AsRef<Path>) -> Result<(String, Format), Error> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let (text, format) = decode(&bytes)?;
    debug!("Read {} byte(s) of {format} from {}", bytes.len(), path.display());
    Ok((text, format))
}

/// Write `text` to a file in `format`.
pub fn write_file(path: impl AsRef<Path>, text: &str, format: Format) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, encode(text, format))?;
    debug!("Wrote {format} to {}", path.display());
    Ok(())
}

fn normalise_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
