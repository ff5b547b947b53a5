//! Decoding of daemon replies.
//!
//! Replies are either one JSON document or a stream of JSON documents, one
//! per line (NDJSON). Field access on decoded values goes through
//! [`require_field`] so that every endpoint reports missing fields the same
//! way.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Longest input excerpt kept in a [`Error::MalformedResponse`].
const MAX_EXCERPT_CHARS: usize = 1024;

/// Parses a whole reply body as one JSON document.
pub fn decode_json(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|source| Error::MalformedResponse {
        line: None,
        input: excerpt(&String::from_utf8_lossy(body)),
        source,
    })
}

/// Parses a reply body as newline-delimited JSON.
///
/// Lines end at `\n`, with an optional `\r` before it; a final line needs
/// no terminator. Lines are yielded lazily with their 1-based number. Blank
/// lines are not skipped: a blank line is malformed like any other, and so
/// is a line that is not valid UTF-8. The first malformed line ends the
/// iteration.
pub fn decode_lines(body: &[u8]) -> Lines<'_> {
    Lines {
        rest: (!body.is_empty()).then_some(body),
        number: 0,
        failed: false,
    }
}

#[derive(Debug)]
pub struct Lines<'a> {
    rest: Option<&'a [u8]>,
    number: usize,
    failed: bool,
}

impl<'a> Lines<'a> {
    fn next_line(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest.take()?;
        let line = match rest.iter().position(|b| *b == b'\n') {
            Some(end) => {
                let after = &rest[end + 1..];
                self.rest = (!after.is_empty()).then_some(after);
                &rest[..end]
            }
            None => rest,
        };
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }
}

impl Iterator for Lines<'_> {
    type Item = Result<(usize, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = self.next_line()?;
        self.number += 1;
        match serde_json::from_slice(line) {
            Ok(value) => Some(Ok((self.number, value))),
            Err(source) => {
                self.failed = true;
                Some(Err(Error::MalformedResponse {
                    line: Some(self.number),
                    input: excerpt(&String::from_utf8_lossy(line)),
                    source,
                }))
            }
        }
    }
}

impl std::iter::FusedIterator for Lines<'_> {}

/// Returns the named field of a JSON object.
///
/// `line` is the NDJSON line the value came from, if any.
pub fn require_field<'a>(value: &'a Value, field: &str, line: Option<usize>) -> Result<&'a Value> {
    value.get(field).ok_or_else(|| Error::MissingField {
        field: field.to_string(),
        line,
        value: value.to_string(),
    })
}

/// Returns the named field converted to `T`.
///
/// A field of the wrong type is reported as a malformed reply.
pub fn require_as<T: DeserializeOwned>(value: &Value, field: &str, line: Option<usize>) -> Result<T> {
    let found = require_field(value, field, line)?;
    T::deserialize(found).map_err(|source| Error::MalformedResponse {
        line,
        input: excerpt(&value.to_string()),
        source,
    })
}

fn excerpt(input: &str) -> String {
    let escaped: String = input.escape_debug().collect();
    match escaped.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &escaped[..cut], input.len()),
        None => escaped,
    }
}
