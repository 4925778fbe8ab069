//! Blank-line measurement around a directive
//!
//! Spacing is measured against the nearest comment, not the nearest
//! statement: a comment touching the directive belongs to its block, and only
//! a gap around the whole comment-plus-directive unit counts.

use crate::ast::Span;
use crate::trivia::{Comment, Token};

/// Lines apart two elements must be for a fully empty line to sit between them
pub const BLANK_LINE_GAP: usize = 2;

/// Whether at least one empty line separates `from_line` and `to_line`
pub fn is_blank_gap(from_line: usize, to_line: usize) -> bool {
    to_line.saturating_sub(from_line) >= BLANK_LINE_GAP
}

/// Blank line between the last leading comment and the directive.
///
/// `None` when there are no leading comments; there is nothing to measure.
pub fn blank_line_before(directive: Span, leading: &[Comment]) -> Option<bool> {
    let nearest = leading.last()?;
    Some(is_blank_gap(nearest.span.end_line, directive.start_line))
}

/// Blank line between the directive and whatever follows it: the first
/// trailing comment if any, otherwise the next token.
///
/// `None` when nothing follows.
pub fn blank_line_after(directive: Span, trailing: &[Comment], next: Option<&Token>) -> Option<bool> {
    let following_line = match trailing.first() {
        Some(comment) => comment.span.start_line,
        None => next?.span.start_line,
    };
    Some(is_blank_gap(directive.end_line, following_line))
}
