//! AST types for code representation
//!
//! A deliberately small view over JavaScript/TypeScript source: just enough
//! structure to find scopes, their statement bodies, and the shape of each
//! statement's expression. Parsed from source code via tree-sitter.

use crate::trivia::Trivia;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parsed source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Source language
    pub language: Language,

    /// The program scope followed by every function-like scope, in source order
    pub scopes: Vec<Scope>,

    /// Comments and tokens adjacent to statements
    #[serde(skip)]
    pub trivia: Trivia,

    /// Hash of source for change detection
    pub source_hash: String,
}

impl SourceFile {
    /// The program root, if the front-end produced one
    pub fn program(&self) -> Option<&Program> {
        self.scopes.iter().find_map(|scope| match scope {
            Scope::Program(program) => Some(program),
            Scope::Function(_) => None,
        })
    }

    /// Function-like scopes only
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.scopes.iter().filter_map(|scope| match scope {
            Scope::Function(func) => Some(func),
            Scope::Program(_) => None,
        })
    }
}

/// Source language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Unknown,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::JavaScript => write!(f, "javascript"),
            Language::Jsx => write!(f, "jsx"),
            Language::TypeScript => write!(f, "typescript"),
            Language::Tsx => write!(f, "tsx"),
            Language::Unknown => write!(f, "unknown"),
        }
    }
}

/// Source location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Span covering whole lines, columns zeroed
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        Self::new(start_line, 0, end_line, 0)
    }
}

/// Identity of a statement, used to look up its trivia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Syntactic category a rule can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Program,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Program,
        NodeKind::FunctionDeclaration,
        NodeKind::FunctionExpression,
        NodeKind::ArrowFunctionExpression,
    ];
}

/// A body that can host a directive at position 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scope {
    Program(Program),
    Function(Function),
}

impl Scope {
    pub fn kind(&self) -> NodeKind {
        match self {
            Scope::Program(_) => NodeKind::Program,
            Scope::Function(func) => match func.kind {
                FunctionKind::Declaration => NodeKind::FunctionDeclaration,
                FunctionKind::Expression | FunctionKind::Method => NodeKind::FunctionExpression,
                FunctionKind::Arrow => NodeKind::ArrowFunctionExpression,
            },
        }
    }

    /// Statement list of the scope; `None` for expression-bodied arrows
    pub fn body(&self) -> Option<&[Stmt]> {
        match self {
            Scope::Program(program) => Some(&program.body),
            Scope::Function(func) => match &func.body {
                FunctionBody::Block(stmts) => Some(stmts),
                FunctionBody::Expression(_) => None,
            },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Scope::Program(program) => program.span,
            Scope::Function(func) => func.span,
        }
    }
}

/// Program root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A function-like construct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub kind: FunctionKind,

    /// Function name, when the source gives one
    pub name: Option<String>,

    pub body: FunctionBody,

    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
    Method,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FunctionBody {
    /// `{ ... }`
    Block(Vec<Stmt>),
    /// `() => expr`
    Expression(Expr),
}

/// A statement in a program or block body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StmtKind {
    /// `expr;`
    Expression(Expr),
    /// Any other statement; `kind` is the grammar's node kind
    Other { kind: String },
}

impl Stmt {
    /// The expression of an expression statement
    pub fn expression(&self) -> Option<&Expr> {
        match &self.kind {
            StmtKind::Expression(expr) => Some(expr),
            StmtKind::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Literal(Literal),
    Other { kind: String },
}

impl Expr {
    /// Cooked value of a string literal
    pub fn as_string_literal(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Literal(Literal::String(value)) => Some(value),
            _ => None,
        }
    }
}

/// Literal values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Regex(String),
    /// Template literal without substitutions
    Template(String),
}
