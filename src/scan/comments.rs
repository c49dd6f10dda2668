//! Comment tracking shared by the dialect matchers.
//!
//! This is not a lexer: string literals are not tracked, so a
//! `/*` inside a string still opens a block comment.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_MARKER: &str = "//";

lazy_static! {
    /// A block comment opened and closed on the same line.
    static ref INLINE_BLOCK: Regex = Regex::new(r"/\*.*?\*/").unwrap();
}

/// Whether `text` begins with `marker` once leading whitespace is ignored.
pub fn starts_with_marker(text: &str, marker: &str) -> bool {
    text.trim_start().starts_with(marker)
}

/// Line-by-line tracker for C-style `/* ... */` and `//` comments.
///
/// The only state carried between lines is whether the previous line left
/// a block comment open.
#[derive(Debug, Default)]
pub struct BlockComments {
    inside: bool,
}

impl BlockComments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tracker is currently inside an unterminated block comment.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Consume one line and return the part of it that is live code.
    ///
    /// Returns `None` when the whole line is commented out. The returned text
    /// is only meant for signature matching; callers report the raw line.
    pub fn live_code<'a>(&mut self, line: &'a str) -> Option<Cow<'a, str>> {
        if self.inside {
            let end = line.find(BLOCK_CLOSE)?;
            self.inside = false;
            let after = &line[end + BLOCK_CLOSE.len()..];
            if starts_with_marker(after, LINE_MARKER) {
                return None;
            }
            return Some(Cow::Borrowed(after));
        }

        if let Some(start) = line.find(BLOCK_OPEN) {
            if !line.contains(BLOCK_CLOSE) {
                // The flag is set even for `// ... /*` lines.
                self.inside = true;
                if starts_with_marker(line, LINE_MARKER) {
                    return None;
                }
                return Some(Cow::Borrowed(&line[..start]));
            }
        }

        if starts_with_marker(line, LINE_MARKER) {
            return None;
        }

        let stripped = INLINE_BLOCK.replace_all(line, "");
        if stripped.trim().is_empty() || starts_with_marker(&stripped, LINE_MARKER) {
            return None;
        }
        Some(stripped)
    }
}
