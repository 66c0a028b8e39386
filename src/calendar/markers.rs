use std::ops::Range;

use crate::types::{RenderedBlock, ResourceKind};

/// Start/end sentinels delimiting the region owned by one (kind, key) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    start: String,
    end: String,
}

impl MarkerPair {
    pub fn new(kind: ResourceKind, key: &str) -> Self {
        Self {
            start: format!("<!-- {}:{} START -->", kind.marker_token(), key),
            end: format!("<!-- {}:{} END -->", kind.marker_token(), key),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Assembles `start\n{block}end\n`.
    pub fn wrap(&self, block: &RenderedBlock) -> String {
        let mut span =
            String::with_capacity(self.start.len() + block.as_str().len() + self.end.len() + 2);
        span.push_str(&self.start);
        span.push('\n');
        span.push_str(block.as_str());
        span.push_str(&self.end);
        span.push('\n');
        span
    }

    /// Locates the first well-formed pair: the first end sentinel that has a
    /// start sentinel before it, paired with the closest such start. Stray
    /// start or end sentinels outside that pair are left alone.
    ///
    /// The span covers both sentinels plus one line break directly following
    /// the end sentinel, so replacing it with [`MarkerPair::wrap`] output is
    /// byte-stable across runs.
    pub fn find_span(&self, document: &str) -> Option<Range<usize>> {
        let mut from = 0;
        let (start, mut end) = loop {
            let end_at = from + document[from..].find(&self.end)?;
            let start = document[..end_at].rfind(&self.start);
            from = end_at + self.end.len();
            if let Some(start) = start {
                break (start, from);
            }
        };

        let tail = &document[end..];
        if tail.starts_with("\r\n") {
            end += 2;
        } else if tail.starts_with('\n') {
            end += 1;
        }

        Some(start..end)
    }
}

/// Finds the first `### {key}` heading line and returns the byte offset of the
/// end of that line (before its line break).
///
/// The key must start the heading text (after optional spaces or tabs), is
/// compared case-insensitively and must be followed by a non-word character
/// or the end of the line, so `S1` never matches `### S10`.
pub fn find_heading_offset(document: &str, key: &str) -> Option<usize> {
    let mut line_start = 0;

    while line_start <= document.len() {
        let line_end = document[line_start..]
            .find('\n')
            .map_or(document.len(), |i| line_start + i);
        let line = &document[line_start..line_end];
        let content_end = if line.ends_with('\r') {
            line_end - 1
        } else {
            line_end
        };

        if heading_matches(&document[line_start..content_end], key) {
            return Some(content_end);
        }

        if line_end == document.len() {
            break;
        }
        line_start = line_end + 1;
    }

    None
}

fn heading_matches(line: &str, key: &str) -> bool {
    let Some(rest) = line.strip_prefix("###") else {
        return false;
    };
    let rest = rest.trim_start_matches([' ', '\t']);

    let Some(candidate) = rest.get(..key.len()) else {
        return false;
    };
    if !candidate.eq_ignore_ascii_case(key) {
        return false;
    }

    rest[key.len()..]
        .chars()
        .next()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
}
