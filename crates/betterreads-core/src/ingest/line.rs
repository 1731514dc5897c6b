//! Splitting a raw dump line into the JSON document it carries.
//!
//! Dump lines look like `/type/author\t/authors/OL1A\t3\t2008-04-01T03:28:50.625462\t{...}`:
//! a tab-separated metadata prefix followed by the record as a JSON object.

use super::error::RecordError;

/// Decode one raw line, dropping the `\n` / `\r\n` terminator.
pub fn decode_line(raw: &[u8]) -> Result<&str, RecordError> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    Ok(std::str::from_utf8(raw)?)
}

/// Everything from the first `{` to the end of the line.
pub fn extract_json(line: &str) -> Result<&str, RecordError> {
    line.find('{')
        .map(|start| &line[start..])
        .ok_or(RecordError::MissingJsonObject)
}
