//! Blank lines around a leading `'use strict'` directive

use crate::ast::{NodeKind, Scope, Span};
use crate::directive::{self, USE_STRICT};
use crate::policy::{Mode, Policy};
use crate::rule::{Diagnostic, Expectation, Rule, Severity, Side};
use crate::spacing;
use crate::trivia::TriviaSource;
use tracing::debug;

pub const RULE_NAME: &str = "lines-around-use-strict";

/// Checks blank-line spacing before and after a `'use strict'` directive
#[derive(Debug, Clone, Copy, Default)]
pub struct LinesAroundUseStrict {
    policy: Policy,
    severity: Severity,
}

impl LinesAroundUseStrict {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            severity: Severity::default(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    fn report(&self, stmt_span: Span, side: Side, expectation: Expectation) -> Diagnostic {
        Diagnostic::new(
            RULE_NAME,
            self.severity,
            stmt_span,
            side,
            expectation,
            message(expectation, side),
        )
    }
}

/// `"{Expected|Unexpected} newline {before|after} 'use strict' directive."`
pub fn message(expectation: Expectation, side: Side) -> String {
    format!("{} newline {} '{}' directive.", expectation, side, USE_STRICT)
}

/// Compare measured spacing against the mode for one side
fn mismatch(mode: Mode, has_blank_line: bool) -> Option<Expectation> {
    match (mode, has_blank_line) {
        (Mode::Always, false) => Some(Expectation::Expected),
        (Mode::Never, true) => Some(Expectation::Unexpected),
        _ => None,
    }
}

impl Rule for LinesAroundUseStrict {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn interested_kinds(&self) -> &'static [NodeKind] {
        &NodeKind::ALL
    }

    fn check(&self, scope: &Scope, trivia: &dyn TriviaSource, diagnostics: &mut Vec<Diagnostic>) {
        let Some(body) = scope.body() else {
            debug!(kind = ?scope.kind(), "expression body, nothing to check");
            return;
        };

        let Some(stmt) = directive::locate(body) else {
            return;
        };

        let leading = trivia.leading_comments(stmt.id);
        if let Some(has_blank) = spacing::blank_line_before(stmt.span, leading) {
            if let Some(expectation) = mismatch(self.policy.before, has_blank) {
                diagnostics.push(self.report(stmt.span, Side::Before, expectation));
            }
        }

        if body.len() == 1 {
            return;
        }

        let trailing = trivia.trailing_comments(stmt.id);
        let next = trivia.token_after(stmt.id);
        if let Some(has_blank) = spacing::blank_line_after(stmt.span, trailing, next) {
            if let Some(expectation) = mismatch(self.policy.after, has_blank) {
                diagnostics.push(self.report(stmt.span, Side::After, expectation));
            }
        }
    }
}
