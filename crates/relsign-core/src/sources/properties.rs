//! `key.properties` loading and parsing
//!
//! The accepted syntax is the line-oriented subset of Java properties files
//! that signing setups actually use:
//!
//! - blank lines and lines starting with `#` or `!` are ignored
//! - the first unescaped `=` or `:` separates key from value; whitespace
//!   around the key and before the value is dropped
//! - a line ending in an odd number of backslashes continues on the next line
//! - `\t \n \r \f \uXXXX` escapes are decoded, any other `\c` yields `c`
//! - a repeated key overrides the earlier one
//!
//! A missing file is an empty source. A line without a separator, an empty
//! key or a broken `\u` escape makes the whole file malformed.

use std::collections::BTreeMap;

use relsign_fs::{NormalizedPath, io};

use super::field::SigningField;
use crate::{Error, Result};

/// A syntax error in properties text, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

/// Key/value pairs read from an optional properties file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PropertySource {
    path: Option<NormalizedPath>,
    loaded: bool,
    entries: BTreeMap<String, String>,
}

impl PropertySource {
    /// A source with no entries and no backing file.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the properties file at `path`.
    ///
    /// A missing file yields an empty source. A file that exists but cannot
    /// be parsed is [`Error::MalformedProperties`].
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let Some(content) = io::read_text_optional(path)? else {
            tracing::debug!(path = %path, "No properties file, continuing with an empty source");
            return Ok(Self {
                path: Some(path.clone()),
                loaded: false,
                entries: BTreeMap::new(),
            });
        };

        let mut source = Self::parse(&content).map_err(|e| Error::MalformedProperties {
            path: path.to_native(),
            line: e.line,
            message: e.message,
        })?;
        source.path = Some(path.clone());
        source.loaded = true;
        tracing::debug!(path = %path, entries = source.len(), "Loaded properties file");
        Ok(source)
    }

    /// Parse properties text.
    pub fn parse(content: &str) -> std::result::Result<Self, SyntaxError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut entries = BTreeMap::new();

        for logical in logical_lines(content) {
            let (key, value) = split_entry(&logical.text).map_err(|message| SyntaxError {
                line: logical.line,
                message,
            })?;
            entries.insert(key, value);
        }

        Ok(Self {
            path: None,
            loaded: false,
            entries,
        })
    }

    /// Raw value for `key`, blank or not.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Raw value for one of the signing fields.
    pub fn get_field(&self, field: SigningField) -> Option<&str> {
        self.get(field.property_key())
    }

    /// Path this source was loaded from, if any.
    pub fn path(&self) -> Option<&NormalizedPath> {
        self.path.as_ref()
    }

    /// Whether a file was actually read.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            path: None,
            loaded: false,
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// Values may hold passwords, so only keys are shown
impl std::fmt::Debug for PropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySource")
            .field("path", &self.path)
            .field("loaded", &self.loaded)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

struct LogicalLine {
    line: usize,
    text: String,
}

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

fn logical_lines(content: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, raw) in content.lines().enumerate() {
        let trimmed = raw.trim_start_matches(WHITESPACE);

        if let Some(mut current) = pending.take() {
            match strip_continuation(trimmed) {
                Some(head) => {
                    current.text.push_str(head);
                    pending = Some(current);
                }
                None => {
                    current.text.push_str(trimmed);
                    lines.push(current);
                }
            }
            continue;
        }

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let line = idx + 1;
        match strip_continuation(trimmed) {
            Some(head) => {
                pending = Some(LogicalLine {
                    line,
                    text: head.to_string(),
                })
            }
            None => lines.push(LogicalLine {
                line,
                text: trimmed.to_string(),
            }),
        }
    }

    // Continuation on the last line of the file
    if let Some(current) = pending {
        lines.push(current);
    }
    lines
}

/// Line without its continuation backslash, if it has one.
fn strip_continuation(line: &str) -> Option<&str> {
    let trailing = line.bytes().rev().take_while(|b| *b == b'\\').count();
    (trailing % 2 == 1).then(|| &line[..line.len() - 1])
}

fn find_separator(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return Some(idx),
            _ => {}
        }
    }
    None
}

// Error messages never echo the line: it may contain a password.
fn split_entry(text: &str) -> std::result::Result<(String, String), String> {
    let sep = find_separator(text).ok_or_else(|| "missing '=' or ':' separator".to_string())?;

    let key = unescape(text[..sep].trim_end_matches(WHITESPACE))?;
    if key.is_empty() {
        return Err("empty key".to_string());
    }
    let value = unescape(text[sep + 1..].trim_start_matches(WHITESPACE))?;
    Ok((key, value))
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(unicode_escape(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decode the hex digits after `\u`, joining a surrogate pair written as
/// two consecutive escapes.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> std::result::Result<char, String> {
    let invalid = || "invalid \\u escape".to_string();
    let unit = hex_unit(chars).ok_or_else(invalid)?;

    if !(0xD800..=0xDBFF).contains(&unit) {
        return char::from_u32(u32::from(unit)).ok_or_else(invalid);
    }

    let mut ahead = chars.clone();
    let low = match (ahead.next(), ahead.next()) {
        (Some('\\'), Some('u')) => hex_unit(&mut ahead).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    let decoded = char::decode_utf16([unit, low])
        .next()
        .and_then(|r| r.ok())
        .ok_or_else(invalid)?;
    *chars = ahead;
    Ok(decoded)
}

fn hex_unit(chars: &mut std::str::Chars<'_>) -> Option<u16> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(&hex, 16).ok()
}
