//! Rule interface and diagnostics

use crate::ast::{NodeKind, Scope, Span};
use crate::trivia::TriviaSource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A check run on every scope of a kind it subscribes to
pub trait Rule: Send + Sync {
    /// Rule name as it appears in reports
    fn name(&self) -> &'static str;

    /// Scope kinds this rule is dispatched for
    fn interested_kinds(&self) -> &'static [NodeKind];

    /// Check one scope, pushing any violations onto `diagnostics`
    fn check(&self, scope: &Scope, trivia: &dyn TriviaSource, diagnostics: &mut Vec<Diagnostic>);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    #[default]
    Error,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "warning" | "warn" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which side of the directive a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Before,
    After,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Before => write!(f, "before"),
            Side::After => write!(f, "after"),
        }
    }
}

/// Whether a newline was missing or present when it shouldn't be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    Expected,
    Unexpected,
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Expected => write!(f, "Expected"),
            Expectation::Unexpected => write!(f, "Unexpected"),
        }
    }
}

/// A reported violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: String,
    pub severity: Severity,
    /// The offending directive statement
    pub span: Span,
    pub side: Side,
    pub expectation: Expectation,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        rule: &str,
        severity: Severity,
        span: Span,
        side: Side,
        expectation: Expectation,
        message: String,
    ) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            span,
            side,
            expectation,
            message,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}  {}  {}  {}",
            self.span.start_line,
            self.span.start_col + 1,
            self.severity,
            self.message,
            self.rule
        )
    }
}
