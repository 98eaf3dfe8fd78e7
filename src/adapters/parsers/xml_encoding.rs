use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::core::errors::{DmarcError, Result};

/// How far into the file the `<?xml ... ?>` declaration is searched for.
const PROLOG_LIMIT: usize = 1024;

/// Decode raw report bytes into UTF-8 text.
///
/// A byte order mark wins, then the `encoding="..."` of the XML
/// declaration, then UTF-8. Bytes that are invalid in the chosen encoding
/// are a `ParseError`; nothing is replaced silently.
pub fn decode_document(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| DmarcError::ParseError {
            detail: format!("file is not valid {}", encoding.name()),
        })
}

/// Encoding named in the XML declaration, if there is one.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
    let head = &bytes[..bytes.len().min(PROLOG_LIMIT)];
    if !head.starts_with(b"<?xml") {
        return Ok(None);
    }
    let Some(end) = find(head, b"?>") else {
        return Ok(None);
    };
    let prolog = &head[..end];

    let Some(label) = attribute(prolog, b"encoding") else {
        return Ok(None);
    };

    Encoding::for_label(label)
        .map(Some)
        .ok_or_else(|| DmarcError::ParseError {
            detail: format!(
                "unsupported encoding '{}' in XML declaration",
                String::from_utf8_lossy(label)
            ),
        })
}

/// Value of `name="..."` or `name='...'` inside an XML declaration.
fn attribute<'a>(prolog: &'a [u8], name: &[u8]) -> Option<&'a [u8]> {
    let start = find(prolog, name)? + name.len();
    let rest = prolog[start..].trim_ascii_start();
    let rest = rest.strip_prefix(b"=")?.trim_ascii_start();

    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &rest[1..];
    let len = value.iter().position(|&b| b == quote)?;
    Some(&value[..len])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
