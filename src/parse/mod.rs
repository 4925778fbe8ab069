//! Code parsing via tree-sitter
//!
//! Lowers JavaScript/TypeScript source into the scope/statement model in
//! [`crate::ast`] plus the comment/token table in [`crate::trivia`].

mod javascript;

use crate::ast::*;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

pub use javascript::lower_program;

/// A syntax error tree-sitter recovered from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxErrorInfo {
    /// Error message
    pub message: String,
    /// Source location
    pub span: Span,
    /// The source text with the error
    pub source_text: String,
}

/// Context for collecting syntax errors while walking a tree
struct ParseContext<'a> {
    errors: Vec<SyntaxErrorInfo>,
    source: &'a str,
}

impl<'a> ParseContext<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            errors: Vec::new(),
            source,
        }
    }

    fn record_syntax_error(&mut self, message: &str, span: Span) {
        let source_text = self.extract_source_text(span);
        self.errors.push(SyntaxErrorInfo {
            message: message.to_string(),
            span,
            source_text,
        });
    }

    fn extract_source_text(&self, span: Span) -> String {
        let lines: Vec<&str> = self.source.lines().collect();
        if span.start_line > 0 && span.start_line <= lines.len() {
            let line = lines[span.start_line - 1];
            // Extract the relevant portion, limit to 100 chars
            let start = span.start_col.min(line.len());
            let end = (start + 100).min(line.len());
            line.get(start..end).unwrap_or("").to_string()
        } else {
            String::new()
        }
    }

    fn collect(&mut self, node: Node) {
        if !node.has_error() {
            return;
        }
        if node.is_error() {
            self.record_syntax_error("unexpected syntax", node_span(node));
            return;
        }
        if node.is_missing() {
            self.record_syntax_error(&format!("missing '{}'", node.kind()), node_span(node));
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect(child);
        }
    }
}

/// Detect language from file extension
pub fn detect_language(path: &str) -> Language {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "js" | "mjs" | "cjs" => Language::JavaScript,
        "jsx" => Language::Jsx,
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        _ => Language::Unknown,
    }
}

/// Grammar used for a language. Plain JavaScript goes through the TSX
/// grammar so files mixing in JSX still parse.
fn grammar(lang: Language) -> Result<tree_sitter::Language> {
    match lang {
        Language::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        Language::JavaScript | Language::Jsx | Language::Tsx => {
            Ok(tree_sitter_typescript::LANGUAGE_TSX.into())
        }
        Language::Unknown => Err(Error::UnsupportedLanguage(
            "Cannot parse unknown language".into(),
        )),
    }
}

fn parse_tree(source: &str, lang: Language) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar(lang)?)
        .map_err(|e| Error::CodeParse(format!("Failed to set language: {}", e)))?;

    parser
        .parse(source, None)
        .ok_or_else(|| Error::CodeParse("Failed to parse source".into()))
}

/// Parse source into scopes and trivia; fails on syntax errors
pub fn parse_source(source: &str, lang: Language) -> Result<SourceFile> {
    let tree = parse_tree(source, lang)?;
    let root = tree.root_node();

    let mut ctx = ParseContext::new(source);
    ctx.collect(root);
    if let Some(first) = ctx.errors.first() {
        return Err(Error::CodeParse(format!(
            "{} at {}:{} `{}`",
            first.message,
            first.span.start_line,
            first.span.start_col + 1,
            first.source_text.trim()
        )));
    }

    let (scopes, trivia) = lower_program(root, source);

    Ok(SourceFile {
        language: lang,
        scopes,
        trivia,
        source_hash: source_hash(source),
    })
}

/// Read and parse a file, picking the grammar from its extension
pub fn parse_file(path: &Path) -> Result<SourceFile> {
    let lang = detect_language(&path.to_string_lossy());
    if lang == Language::Unknown {
        return Err(Error::UnsupportedLanguage(path.display().to_string()));
    }
    let source = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_source(&source, lang)
}

/// Syntax errors in `source`, without failing
pub fn syntax_errors(source: &str, lang: Language) -> Result<Vec<SyntaxErrorInfo>> {
    let tree = parse_tree(source, lang)?;
    let mut ctx = ParseContext::new(source);
    ctx.collect(tree.root_node());
    Ok(ctx.errors)
}

/// Get raw tree-sitter S-expression for source code
///
/// Useful for seeing which nodes the front-end lowers into scopes and
/// statements.
pub fn to_sexp(source: &str, lang: Language) -> Result<String> {
    Ok(parse_tree(source, lang)?.root_node().to_sexp())
}

pub(crate) fn source_hash(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
}

/// Convert tree-sitter Node position to Span
pub(crate) fn node_span(node: Node) -> Span {
    Span {
        start_line: node.start_position().row + 1,
        start_col: node.start_position().column,
        end_line: node.end_position().row + 1,
        end_col: node.end_position().column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("a/b.js"), Language::JavaScript);
        assert_eq!(detect_language("a/b.cjs"), Language::JavaScript);
        assert_eq!(detect_language("b.jsx"), Language::Jsx);
        assert_eq!(detect_language("b.ts"), Language::TypeScript);
        assert_eq!(detect_language("b.tsx"), Language::Tsx);
        assert_eq!(detect_language("b.rs"), Language::Unknown);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(matches!(
            parse_source("x", Language::Unknown),
            Err(Error::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_syntax_error_fails_parse() {
        let err = parse_source("'use strict';\nvar = ;\n", Language::JavaScript).unwrap_err();
        assert!(matches!(err, Error::CodeParse(_)));
    }

    #[test]
    fn test_syntax_errors_collected() {
        let errors = syntax_errors("function (", Language::JavaScript).unwrap();
        assert!(!errors.is_empty());
        assert!(syntax_errors("var a = 1;", Language::JavaScript)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_source_hash_is_stable() {
        let file = parse_source("'use strict';", Language::JavaScript).unwrap();
        assert!(file.source_hash.starts_with("sha256:"));
        assert_eq!(file.source_hash, source_hash("'use strict';"));
        assert_eq!(file.source_hash.len(), "sha256:".len() + 16);
    }

    #[test]
    fn test_sexp_contains_program() {
        let sexp = to_sexp("'use strict';", Language::TypeScript).unwrap();
        assert!(sexp.starts_with("(program"));
        assert!(sexp.contains("expression_statement"));
    }

    #[test]
    fn test_typescript_syntax_parses() {
        let file = parse_source(
            "'use strict';\n\nfunction f(a: number): string {\n  'use strict';\n  return '';\n}\n",
            Language::TypeScript,
        )
        .unwrap();
        assert_eq!(file.scopes.len(), 2);
    }

    #[test]
    fn test_jsx_in_javascript_parses() {
        let file = parse_source(
            "'use strict';\n\nconst el = <div>hi</div>;\n",
            Language::JavaScript,
        )
        .unwrap();
        assert_eq!(file.program().map(|p| p.body.len()), Some(2));
    }
}
