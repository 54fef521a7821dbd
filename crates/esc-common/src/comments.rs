//! Comment ranges.
//!
//! Comments are not part of the AST. The scanner records the range of every
//! comment it skips so later passes (directive handling) can look at them
//! without rescanning the source.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
    /// Whether this comment has a trailing newline
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    /// Create a new comment range.
    pub const fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }

    /// The text after `//` of a single-line comment, with leading whitespace removed.
    pub fn single_line_body<'a>(&self, source: &'a str) -> Option<&'a str> {
        if self.is_multi_line {
            return None;
        }
        self.get_text(source)
            .strip_prefix("//")
            .map(str::trim_start)
    }
}

/// Check whether a single-line comment is the pragma `name` (e.g.
/// `@ts-expect-exception`), optionally followed by free text.
pub fn is_pragma_comment(comment: &CommentRange, source: &str, name: &str) -> bool {
    let Some(body) = comment.single_line_body(source) else {
        return false;
    };
    let Some(rest) = body.strip_prefix(name) else {
        return false;
    };
    rest.chars().next().is_none_or(char::is_whitespace)
}

/// Check if a comment is a triple-slash directive.
pub fn is_triple_slash_directive(comment: &CommentRange, source: &str) -> bool {
    comment.get_text(source).starts_with("///")
}
