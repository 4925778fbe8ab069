//! JavaScript/TypeScript lowering - tree-sitter tree to scopes and trivia

use crate::ast::*;
use crate::trivia::{Comment, CommentKind, StmtTrivia, Token, Trivia};
use tree_sitter::Node;

use super::node_span;

/// Lower a `program` node. The program scope comes first, then every
/// function-like scope in source order.
pub fn lower_program(root: Node, source: &str) -> (Vec<Scope>, Trivia) {
    let mut lowerer = Lowerer::new(source);

    let body = lowerer.lower_body(root);
    lowerer.scopes.push(Scope::Program(Program {
        body,
        span: node_span(root),
    }));
    lowerer.collect_functions(root);

    (lowerer.scopes, lowerer.trivia)
}

struct Lowerer<'a> {
    source: &'a str,
    next_id: u32,
    scopes: Vec<Scope>,
    trivia: Trivia,
}

impl<'a> Lowerer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            next_id: 0,
            scopes: Vec::new(),
            trivia: Trivia::new(),
        }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Walk the whole tree, lowering each function-like node into a scope
    fn collect_functions(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(func) = self.lower_function(child) {
                self.scopes.push(Scope::Function(func));
            }
            self.collect_functions(child);
        }
    }

    fn lower_function(&mut self, node: Node) -> Option<Function> {
        let kind = match node.kind() {
            "function_declaration" | "generator_function_declaration" => FunctionKind::Declaration,
            "function_expression" | "function" | "generator_function" => FunctionKind::Expression,
            "arrow_function" => FunctionKind::Arrow,
            "method_definition" => FunctionKind::Method,
            _ => return None,
        };

        // Overload signatures and the like have no body
        let body_node = node.child_by_field_name("body")?;
        let body = if body_node.kind() == "statement_block" {
            FunctionBody::Block(self.lower_body(body_node))
        } else {
            FunctionBody::Expression(self.lower_expr(body_node))
        };

        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string());

        Some(Function {
            kind,
            name,
            body,
            span: node_span(node),
        })
    }

    /// Lower the statements of a `program` or `statement_block`, recording
    /// the comments and token around each one
    fn lower_body(&mut self, container: Node) -> Vec<Stmt> {
        let mut cursor = container.walk();
        let children: Vec<Node> = container.children(&mut cursor).collect();
        let mut statements = Vec::new();

        for (i, child) in children.iter().enumerate() {
            if !child.is_named() || is_comment(*child) {
                continue;
            }

            let id = self.fresh_id();
            let (span, inner_trailing) = self.split_trailing_comments(*child);

            let mut leading: Vec<Comment> = children[..i]
                .iter()
                .rev()
                .take_while(|n| is_comment(**n))
                .map(|n| self.comment(*n))
                .collect();
            leading.reverse();

            let mut trailing = inner_trailing;
            trailing.extend(
                children[i + 1..]
                    .iter()
                    .take_while(|n| is_comment(**n))
                    .map(|n| self.comment(*n)),
            );

            let next_token = children[i + 1..]
                .iter()
                .find(|n| !is_comment(**n))
                .map(|n| first_token(*n));

            self.trivia.insert(
                id,
                StmtTrivia {
                    leading,
                    trailing,
                    next_token,
                },
            );

            statements.push(Stmt {
                id,
                kind: self.lower_stmt_kind(*child),
                span,
            });
        }

        statements
    }

    /// Comments tree-sitter attached as the last children of a statement
    /// belong after it. Returns the statement span without them.
    fn split_trailing_comments(&self, node: Node) -> (Span, Vec<Comment>) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        let kept = children
            .iter()
            .rposition(|n| !is_comment(*n))
            .map_or(0, |last| last + 1);

        if kept == children.len() || kept == 0 {
            return (node_span(node), Vec::new());
        }

        let start = node_span(node);
        let end = node_span(children[kept - 1]);
        let span = Span::new(start.start_line, start.start_col, end.end_line, end.end_col);
        let comments = children[kept..].iter().map(|n| self.comment(*n)).collect();
        (span, comments)
    }

    fn lower_stmt_kind(&self, node: Node) -> StmtKind {
        if node.kind() != "expression_statement" {
            return StmtKind::Other {
                kind: node.kind().to_string(),
            };
        }

        let mut cursor = node.walk();
        let expr = node
            .named_children(&mut cursor)
            .find(|n| !is_comment(*n))
            .map(|n| self.lower_expr(n));

        match expr {
            Some(expr) => StmtKind::Expression(expr),
            None => StmtKind::Other {
                kind: node.kind().to_string(),
            },
        }
    }

    fn lower_expr(&self, node: Node) -> Expr {
        let span = node_span(node);
        let kind = match node.kind() {
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .find(|n| !is_comment(*n));
                if let Some(inner) = inner {
                    return self.lower_expr(inner);
                }
                ExprKind::Other {
                    kind: node.kind().to_string(),
                }
            }
            "string" => ExprKind::Literal(Literal::String(self.cook(node))),
            "template_string" => {
                let mut cursor = node.walk();
                let has_substitution = node
                    .named_children(&mut cursor)
                    .any(|n| n.kind() == "template_substitution");
                if has_substitution {
                    ExprKind::Other {
                        kind: node.kind().to_string(),
                    }
                } else {
                    ExprKind::Literal(Literal::Template(self.cook(node)))
                }
            }
            "number" => ExprKind::Literal(Literal::Number(parse_number(self.text(node)))),
            "true" => ExprKind::Literal(Literal::Boolean(true)),
            "false" => ExprKind::Literal(Literal::Boolean(false)),
            "null" => ExprKind::Literal(Literal::Null),
            "regex" => ExprKind::Literal(Literal::Regex(self.text(node).to_string())),
            other => ExprKind::Other {
                kind: other.to_string(),
            },
        };

        Expr { kind, span }
    }

    /// Cooked value of a string or template: fragments verbatim, escapes decoded
    fn cook(&self, node: Node) -> String {
        let mut value = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "string_fragment" => value.push_str(self.text(child)),
                "escape_sequence" => value.push_str(&decode_escape(self.text(child))),
                _ => {}
            }
        }
        value
    }

    fn comment(&self, node: Node) -> Comment {
        let text = self.text(node);
        let kind = if text.starts_with("/*") {
            CommentKind::Block
        } else {
            CommentKind::Line
        };
        Comment::new(kind, node_span(node), text)
    }
}

/// Comments, plus the hashbang line, which sits before the first statement
/// the same way a line comment does
fn is_comment(node: Node) -> bool {
    matches!(node.kind(), "comment" | "html_comment" | "hash_bang_line")
}

fn first_token(node: Node) -> Token {
    let mut cursor = node.walk();
    while cursor.goto_first_child() {}
    let leaf = cursor.node();
    Token::new(leaf.kind(), node_span(leaf))
}

/// Decode one escape sequence, `raw` including the backslash
fn decode_escape(raw: &str) -> String {
    let body = raw.strip_prefix('\\').unwrap_or(raw);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();

    let decoded = match first {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'v' => Some('\u{b}'),
        // line continuation
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => return String::new(),
        'x' => code_point(rest, 16),
        'u' => match rest.strip_prefix('{') {
            Some(braced) => code_point(braced.trim_end_matches('}'), 16),
            None => code_point(rest, 16),
        },
        '0'..='7' => code_point(body, 8),
        other => Some(other),
    };

    match decoded {
        Some(c) => c.to_string(),
        None => raw.to_string(),
    }
}

fn code_point(digits: &str, radix: u32) -> Option<char> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}

fn parse_number(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    let cleaned = cleaned.strip_suffix('n').unwrap_or(&cleaned);

    let radix_digits = [("0x", 16), ("0o", 8), ("0b", 2)]
        .iter()
        .find_map(|(prefix, radix)| cleaned.strip_prefix(prefix).map(|d| (d, *radix)));

    match radix_digits {
        Some((digits, radix)) => u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN),
        None => cleaned.parse::<f64>().unwrap_or(f64::NAN),
    }
}
