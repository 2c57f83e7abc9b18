//! The generator-owned region of a file and the merge that replaces it.
//!
//! A generated file contains exactly one region:
//!
//! ```text
//! user text (never touched)
//! # ===== GENERATED_START =====
//! generator output
//! # ===== GENERATED_END =====
//! user text (never touched)
//! ```
//!
//! The marker literals are part of the on-disk contract and are fixed. The
//! comment wrapper around them depends on the file type ([`CommentStyle`]).
//!
//! Only the first region is owned. A start marker that appears after the
//! first end marker is left alone; [`GeneratedRegion::has_trailing_region`]
//! reports it so callers can warn.

use crate::domain::{error::RegionError, value_objects::CommentStyle};

/// Literal opening marker.
pub const START_MARKER: &str = "===== GENERATED_START =====";
/// Literal closing marker.
pub const END_MARKER: &str = "===== GENERATED_END =====";

/// Marker lines for one comment style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMarkers {
    start: String,
    end: String,
}

impl RegionMarkers {
    pub fn new(style: CommentStyle) -> Self {
        Self {
            start: style.wrap(START_MARKER),
            end: style.wrap(END_MARKER),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    fn is_start(&self, line: &str) -> bool {
        line.trim() == self.start
    }

    fn is_end(&self, line: &str) -> bool {
        line.trim() == self.end
    }

    /// A complete region around `body` (already newline-terminated).
    fn wrap(&self, body: &str) -> String {
        format!("{}\n{}{}\n", self.start, body, self.end)
    }
}

/// Byte span of the owned region inside a file.
///
/// `start..end` covers both marker lines including the end marker's line
/// terminator; `body_start..body_end` is what the generator owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRegion<'a> {
    text: &'a str,
    start: usize,
    start_terminator: &'a str,
    body_start: usize,
    body_end: usize,
    end: usize,
    end_terminator: &'a str,
    pub start_line: usize,
    pub end_line: usize,
}

impl<'a> GeneratedRegion<'a> {
    /// Locate the first region in `text`.
    ///
    /// Returns `Ok(None)` when the file has no start marker at all.
    pub fn locate(text: &'a str, markers: &RegionMarkers) -> Result<Option<Self>, RegionError> {
        let mut open: Option<Line<'a>> = None;

        for line in lines(text) {
            if markers.is_start(line.content) {
                if let Some(first) = &open {
                    return Err(RegionError::NestedStartMarker {
                        start_line: first.number,
                        nested_line: line.number,
                    });
                }
                open = Some(line);
            } else if markers.is_end(line.content) {
                let Some(first) = open else {
                    return Err(RegionError::UnexpectedEndMarker { line: line.number });
                };
                return Ok(Some(Self {
                    text,
                    start: first.offset,
                    start_terminator: first.terminator,
                    body_start: first.offset + first.raw_len(),
                    body_end: line.offset,
                    end: line.offset + line.raw_len(),
                    end_terminator: line.terminator,
                    start_line: first.number,
                    end_line: line.number,
                }));
            }
        }

        match open {
            Some(first) => Err(RegionError::MissingEndMarker {
                start_line: first.number,
            }),
            None => Ok(None),
        }
    }

    /// Bytes before the start marker.
    pub fn before(&self) -> &'a str {
        &self.text[..self.start]
    }

    /// The generator-owned bytes between the markers.
    pub fn body(&self) -> &'a str {
        &self.text[self.body_start..self.body_end]
    }

    /// Bytes after the end marker line.
    pub fn after(&self) -> &'a str {
        &self.text[self.end..]
    }

    /// Whether another start marker follows this region (ignored on merge).
    pub fn has_trailing_region(&self, markers: &RegionMarkers) -> bool {
        lines(self.after()).any(|l| markers.is_start(l.content))
    }
}

/// Combine freshly rendered `body` with the current file contents.
///
/// - No file, or no start marker: the region is appended after any existing
///   bytes, separated by a blank line when the file was non-empty.
/// - A region exists: only the bytes between the markers change.
/// - An unmatched or nested start marker, or an end marker with no start,
///   is an error. Nothing is guessed.
pub fn merge_region(
    existing: Option<&str>,
    body: &str,
    style: CommentStyle,
) -> Result<String, RegionError> {
    let markers = RegionMarkers::new(style);
    let body = normalize_body(body);

    if let Some(line) = lines(&body).find(|l| markers.is_start(l.content) || markers.is_end(l.content)) {
        return Err(RegionError::MarkerInBody { line: line.number });
    }

    let existing = match existing {
        None | Some("") => return Ok(markers.wrap(&body)),
        Some(text) => text,
    };

    match GeneratedRegion::locate(existing, &markers)? {
        None => {
            let mut out = String::with_capacity(existing.len() + body.len() + 64);
            out.push_str(existing);
            if !existing.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&markers.wrap(&body));
            Ok(out)
        }
        Some(region) => {
            let mut out = String::with_capacity(existing.len() + body.len());
            out.push_str(region.before());
            out.push_str(markers.start());
            out.push_str(region.start_terminator);
            out.push_str(&body);
            out.push_str(markers.end());
            out.push_str(region.end_terminator);
            out.push_str(region.after());
            Ok(out)
        }
    }
}

fn normalize_body(body: &str) -> String {
    let mut body = body.to_string();
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    body
}

// ── Line scanning ─────────────────────────────────────────────────────────────

struct Line<'a> {
    /// 1-based.
    number: usize,
    offset: usize,
    content: &'a str,
    terminator: &'a str,
}

impl Line<'_> {
    fn raw_len(&self) -> usize {
        self.content.len() + self.terminator.len()
    }
}

fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let content = match raw.strip_suffix('\n') {
                Some(s) => s.strip_suffix('\r').unwrap_or(s),
                None => raw,
            };
            let line = Line {
                number: index + 1,
                offset,
                content,
                terminator: &raw[content.len()..],
            };
            offset += raw.len();
            line
        })
}
