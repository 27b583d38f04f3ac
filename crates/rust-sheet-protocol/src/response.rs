//! Parsing of engine responses.

use rust_sheet_core::{CellValue, Position, Snapshot};
use thiserror::Error;

/// What was wrong with a response line.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MalformedKind {
    #[error("response is empty")]
    Empty,

    #[error("expected `<n_cols> <n_rows>`")]
    Header,

    #[error("expected `<location> <value>`")]
    MissingValue,

    #[error("unexpected extra line")]
    UnexpectedLine,

    #[error("not valid UTF-8 ({0})")]
    Encoding(std::str::Utf8Error),

    #[error(transparent)]
    Invalid(#[from] rust_sheet_core::Error),
}

/// An engine response that does not follow the protocol.
///
/// Carries the offending line so it can be reported as-is.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("line {line_number} {line:?}: {kind}")]
pub struct MalformedResponse {
    /// 1-based line number within stdout
    pub line_number: usize,
    pub line: String,
    pub kind: MalformedKind,
}

impl MalformedResponse {
    fn new(line_number: usize, line: &str, kind: impl Into<MalformedKind>) -> Self {
        Self {
            line_number,
            line: line.to_string(),
            kind: kind.into(),
        }
    }
}

/// Split raw engine stdout into lines.
///
/// Lines end at `\n` (an optional `\r` before it is dropped), the same way
/// [`str::lines`] splits them. Stdout must be valid UTF-8: the first line that is not
/// fails the whole response instead of being patched with replacement characters.
pub fn decode_lines(stdout: &[u8]) -> Result<Vec<String>, MalformedResponse> {
    if stdout.is_empty() {
        return Ok(Vec::new());
    }
    let stdout = stdout.strip_suffix(b"\n").unwrap_or(stdout);

    stdout
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(i, raw)| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            std::str::from_utf8(raw).map(str::to_string).map_err(|e| {
                let line = String::from_utf8_lossy(raw);
                MalformedResponse::new(i + 1, &line, MalformedKind::Encoding(e))
            })
        })
        .collect()
}

/// Parse a full-sheet response into a new snapshot.
///
/// Any line that cannot be parsed fails the whole response.
pub fn parse_snapshot<S: AsRef<str>>(lines: &[S]) -> Result<Snapshot, MalformedResponse> {
    let (header, cells) = lines
        .split_first()
        .ok_or_else(|| MalformedResponse::new(0, "", MalformedKind::Empty))?;

    let header = header.as_ref();
    let (n_cols, n_rows) = parse_header(header)
        .ok_or_else(|| MalformedResponse::new(1, header, MalformedKind::Header))?;

    let mut builder = Snapshot::builder(n_cols, n_rows);
    for (i, line) in cells.iter().enumerate() {
        let line = line.as_ref();
        let line_number = i + 2;

        let (pos, value) = parse_cell_line(line)
            .map_err(|kind| MalformedResponse::new(line_number, line, kind))?;
        builder
            .insert(pos, value)
            .map_err(|e| MalformedResponse::new(line_number, line, e))?;
    }

    Ok(builder.build())
}

/// Parse the answer to `read_cell`: a single tagged value, or nothing for an empty cell.
pub fn parse_cell_reply<S: AsRef<str>>(
    lines: &[S],
) -> Result<Option<CellValue>, MalformedResponse> {
    match lines {
        [] => Ok(None),
        [line] => {
            let line = line.as_ref();
            CellValue::decode(line)
                .map(Some)
                .map_err(|e| MalformedResponse::new(1, line, e))
        }
        [_, extra, ..] => Err(MalformedResponse::new(
            2,
            extra.as_ref(),
            MalformedKind::UnexpectedLine,
        )),
    }
}

fn parse_header(line: &str) -> Option<(u32, u32)> {
    let mut parts = line.split_whitespace();
    let n_cols = parse_count(parts.next()?)?;
    let n_rows = parse_count(parts.next()?)?;
    match parts.next() {
        Some(_) => None,
        None => Some((n_cols, n_rows)),
    }
}

// Plain decimal digits only; `str::parse` would also take a leading `+`.
fn parse_count(text: &str) -> Option<u32> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

// The location ends at the first whitespace; the value may contain more.
fn parse_cell_line(line: &str) -> Result<(Position, CellValue), MalformedKind> {
    let (location, value) = line
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or(MalformedKind::MissingValue)?;

    let value = value.trim();
    if value.is_empty() {
        return Err(MalformedKind::MissingValue);
    }

    Ok((Position::parse(location)?, CellValue::decode(value)?))
}
