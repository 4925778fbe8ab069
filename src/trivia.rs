//! Comments and tokens adjacent to statements
//!
//! The checker never scans source text. Everything it knows about what sits
//! around a statement comes through [`TriviaSource`]: the comment run right
//! before it, the comment run right after it, and the next token.

use crate::ast::{NodeId, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub span: Span,
    pub text: String,
}

impl Comment {
    pub fn new(kind: CommentKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}

/// A lexical token; `kind` is the grammar's node kind (`"}"`, `"var"`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            span,
        }
    }
}

/// Comment/token lookups for a statement
pub trait TriviaSource {
    /// Comments directly before the statement, in source order (nearest last)
    fn leading_comments(&self, id: NodeId) -> &[Comment];

    /// Comments directly after the statement, in source order (nearest first)
    fn trailing_comments(&self, id: NodeId) -> &[Comment];

    /// First token following the statement
    fn token_after(&self, id: NodeId) -> Option<&Token>;
}

/// Trivia recorded for one statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StmtTrivia {
    pub leading: Vec<Comment>,
    pub trailing: Vec<Comment>,
    pub next_token: Option<Token>,
}

/// Table of trivia keyed by statement
#[derive(Debug, Clone, Default)]
pub struct Trivia {
    entries: HashMap<NodeId, StmtTrivia>,
}

impl Trivia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, trivia: StmtTrivia) {
        self.entries.insert(id, trivia);
    }

    pub fn get(&self, id: NodeId) -> Option<&StmtTrivia> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TriviaSource for Trivia {
    fn leading_comments(&self, id: NodeId) -> &[Comment] {
        self.entries
            .get(&id)
            .map(|t| t.leading.as_slice())
            .unwrap_or(&[])
    }

    fn trailing_comments(&self, id: NodeId) -> &[Comment] {
        self.entries
            .get(&id)
            .map(|t| t.trailing.as_slice())
            .unwrap_or(&[])
    }

    fn token_after(&self, id: NodeId) -> Option<&Token> {
        self.entries.get(&id).and_then(|t| t.next_token.as_ref())
    }
}
