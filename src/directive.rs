//! Directive detection

use crate::ast::Stmt;

/// Text of the strict-mode directive
pub const USE_STRICT: &str = "use strict";

/// Whether `stmt` is the expression statement `"use strict"`
pub fn is_use_strict(stmt: &Stmt) -> bool {
    stmt.expression()
        .and_then(|expr| expr.as_string_literal())
        .is_some_and(|value| value == USE_STRICT)
}

/// The directive heading `body`, if there is one. Only index 0 is examined.
pub fn locate(body: &[Stmt]) -> Option<&Stmt> {
    body.first().filter(|stmt| is_use_strict(stmt))
}
