// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # strict-spacing
//!
//! Checks blank-line spacing around a leading `'use strict'` directive in
//! JavaScript and TypeScript programs and function bodies.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strict_spacing::{lint_source, Language, LintConfig};
//!
//! let diagnostics = lint_source("'use strict';\nvar foo;\n", Language::JavaScript, &LintConfig::default())?;
//! assert_eq!(diagnostics[0].message, "Expected newline after 'use strict' directive.");
//! ```
//!
//! ## Policy
//!
//! The `newline` option is either a single mode applied to both sides, or a
//! pair:
//!
//! ```yaml
//! newline: always          # or: never
//! newline:
//!   before: never
//!   after: always
//! ```
//!
//! - `always`: at least one empty line is required
//! - `never`: no empty line is allowed
//!
//! "Before" is measured from the nearest leading comment, and only when the
//! directive has one. "After" is measured to the nearest trailing comment or
//! the next token, and only when the directive is not the last statement.
//!
//! ## Architecture
//!
//! ```text
//! source ──► parse (tree-sitter) ──► SourceFile { scopes, trivia }
//!                                          │
//!                                          ▼
//!                      Linter: NodeKind ──► [Rule] dispatch
//!                                          │
//!           policy ──► LinesAroundUseStrict ◄── directive + spacing
//!                                          │
//!                                          ▼
//!                                   Vec<Diagnostic> ──► LintReport
//! ```

// Core
pub mod directive;
pub mod policy;
pub mod rules;
pub mod spacing;

// Model and driver
pub mod ast;
pub mod lint;
pub mod rule;
pub mod trivia;

// Front-end and configuration
pub mod config;
pub mod config_validate;
pub mod error;
pub mod parse;

// Re-exports
pub use ast::{
    Expr, ExprKind, Function, FunctionBody, FunctionKind, Language, Literal, NodeId, NodeKind,
    Program, Scope, SourceFile, Span, Stmt, StmtKind,
};
pub use config::{ConfigOverrides, LintConfig};
pub use error::{Error, Result};
pub use lint::{lint_paths, lint_source, FileReport, LintReport, Linter};
pub use parse::{detect_language, parse_file, parse_source, to_sexp};
pub use policy::{Mode, Policy, PolicyOption};
pub use rule::{Diagnostic, Expectation, Rule, Severity, Side};
pub use rules::LinesAroundUseStrict;
pub use trivia::{Comment, CommentKind, Token, Trivia, TriviaSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static TRACING_INIT: std::sync::Once = std::sync::Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=strict_spacing=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
