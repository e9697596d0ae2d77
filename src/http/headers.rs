//! HTTP headers abstraction shared by [`Request`](crate::http::request::Request) and
//! [`ResponseWriter`](crate::http::response::ResponseWriter).
//!
//! Header names are normalized to lower case on every access, so lookups are
//! case-insensitive. Each name maps to a single string value: setting a name that
//! is already present appends the new value to the old one, separated by a bare
//! comma, the way repeated list-style header lines are folded together.
//!
//! Entries are kept in insertion order, which is also the order in which the
//! response writer serializes them.
//!
//! [`Headers::parse_one`] is the resumable building block of the request parser:
//! it consumes at most one header line from the front of a buffer and reports
//! whether more bytes are needed.

use indexmap::IndexMap;
use thiserror::Error;

use crate::http::{CRLF, find_crlf};

/// Punctuation allowed in a field name besides ASCII alphanumerics.
const FIELD_NAME_SPECIALS: &[u8] = b"!#$%&'*+-.^_`|~";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("malformed header")]
    MalformedHeader,

    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: IndexMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    /// Returns the value stored for `name`, or an empty string if absent.
    pub fn get(&self, name: &str) -> &str {
        self.headers
            .get(&name.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Stores `value` under `name`, comma-joining it onto any existing value.
    pub fn set(&mut self, name: &str, value: &str) {
        self.headers
            .entry(name.to_lowercase())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Overwrites whatever is stored under `name`.
    pub fn replace(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_lowercase(), value.to_string());
    }

    pub fn delete(&mut self, name: &str) {
        self.headers.shift_remove(&name.to_lowercase());
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses at most one `name: value` line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the line was the empty
    /// line terminating the header block. `(0, false)` means no complete line is
    /// buffered yet and the caller should come back with more bytes.
    pub fn parse_one(&mut self, data: &[u8]) -> Result<(usize, bool), HeaderError> {
        let Some(line_end) = find_crlf(data) else {
            return Ok((0, false));
        };

        if line_end == 0 {
            return Ok((CRLF.len(), true));
        }

        let line = &data[..line_end];
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(HeaderError::MalformedHeader)?;

        // Only leading spaces are stripped: "Host : x" keeps the space and fails validation.
        let name = trim_leading_spaces(&line[..colon]);
        if !is_valid_field_name(name) {
            return Err(HeaderError::InvalidFieldName(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }
        // Validated names are pure ASCII.
        let name = String::from_utf8_lossy(name);

        // Values are opaque; bytes outside UTF-8 (obs-text) are kept lossily.
        let value = String::from_utf8_lossy(&line[colon + 1..]);

        self.set(&name, value.trim());

        Ok((line_end + CRLF.len(), false))
    }
}

fn trim_leading_spaces(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != b' ').unwrap_or(bytes.len());
    &bytes[start..]
}

fn is_valid_field_name(name: &[u8]) -> bool {
    !name.is_empty()
        && name
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || FIELD_NAME_SPECIALS.contains(b))
}
