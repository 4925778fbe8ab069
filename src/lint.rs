//! Lint driver: dispatches scopes to rules and collects reports
//!
//! Each rule declares the scope kinds it handles; [`Linter`] turns that into
//! a `NodeKind -> rules` table once, then visits every scope of a file
//! exactly once.

use crate::ast::{Language, NodeKind, Scope, SourceFile};
use crate::config::LintConfig;
use crate::error::{Error, Result};
use crate::parse::{detect_language, parse_file, parse_source};
use crate::rule::{Diagnostic, Rule, Severity};
use crate::rules::default_rules;
use crate::trivia::TriviaSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A set of rules plus the dispatch table built from them
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
    dispatch: HashMap<NodeKind, Vec<usize>>,
}

impl Linter {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        let mut dispatch: HashMap<NodeKind, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for kind in rule.interested_kinds() {
                dispatch.entry(*kind).or_default().push(index);
            }
        }
        Self { rules, dispatch }
    }

    /// Linter with the built-in rules configured from `config`
    pub fn from_config(config: &LintConfig) -> Self {
        Self::new(default_rules(config))
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule subscribed to this scope's kind
    pub fn check_scope(&self, scope: &Scope, trivia: &dyn TriviaSource) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let Some(indices) = self.dispatch.get(&scope.kind()) else {
            return diagnostics;
        };
        for &index in indices {
            self.rules[index].check(scope, trivia, &mut diagnostics);
        }
        diagnostics
    }

    /// Lint every scope of a parsed file; diagnostics ordered by position
    pub fn lint(&self, file: &SourceFile) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = file
            .scopes
            .iter()
            .flat_map(|scope| self.check_scope(scope, &file.trivia))
            .collect();

        for diag in &diagnostics {
            debug!(line = diag.span.start_line, rule = %diag.rule, "{}", diag.message);
        }

        diagnostics.sort_by_key(|d| (d.span.start_line, d.span.start_col));
        diagnostics
    }

    /// Parse and lint one file, capturing parse failures in the report
    pub fn lint_file(&self, path: &Path) -> FileReport {
        let mut report = FileReport::new(path, detect_language(&path.to_string_lossy()));
        match parse_file(path) {
            Ok(file) => {
                debug!(path = %path.display(), scopes = file.scopes.len(), "parsed");
                report.source_hash = Some(file.source_hash.clone());
                report.diagnostics = self.lint(&file);
            }
            Err(e) => {
                report.error = Some(e.to_string());
            }
        }
        report
    }
}

/// Parse and lint a source string
pub fn lint_source(source: &str, lang: Language, config: &LintConfig) -> Result<Vec<Diagnostic>> {
    let file = parse_source(source, lang)?;
    Ok(Linter::from_config(config).lint(&file))
}

/// Lint files and directories. Directories are walked recursively, keeping
/// files whose extension the config accepts; explicit files are always linted.
pub fn lint_paths(paths: &[PathBuf], config: &LintConfig) -> Result<LintReport> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_files(path, config, &mut files)?;
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("No such file or directory: {}", path.display()),
            )));
        }
    }

    let linter = Linter::from_config(config);
    let reports = files.iter().map(|path| linter.lint_file(path)).collect();
    Ok(LintReport::new(reports))
}

fn collect_files(dir: &Path, config: &LintConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return Ok(());
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::Io)?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    for path in paths {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if path.is_dir() {
            if !name.starts_with('.') && !config.ignore.iter().any(|i| i == name) {
                collect_files(&path, config, files)?;
            }
        } else {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if config.accepts_extension(ext) && detect_language(name) != Language::Unknown {
                files.push(path);
            }
        }
    }

    Ok(())
}

/// Lint results for one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the file could not be read or parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(path: &Path, language: Language) -> Self {
        Self {
            path: path.display().to_string(),
            language,
            source_hash: None,
            diagnostics: Vec::new(),
            error: None,
        }
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Lint results for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    pub files: Vec<FileReport>,
    pub error_count: usize,
    pub warning_count: usize,
    /// Files that failed to read or parse
    pub fatal_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl LintReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let error_count = files.iter().map(|f| f.count(Severity::Error)).sum();
        let warning_count = files.iter().map(|f| f.count(Severity::Warning)).sum();
        let fatal_count = files.iter().filter(|f| f.error.is_some()).count();
        Self {
            files,
            error_count,
            warning_count,
            fatal_count,
            generated_at: Utc::now(),
        }
    }

    /// No errors and no fatal files; warnings don't fail a run
    pub fn passed(&self) -> bool {
        self.error_count == 0 && self.fatal_count == 0
    }

    pub fn to_report(&self) -> String {
        let mut out = String::new();

        for file in &self.files {
            if file.diagnostics.is_empty() && file.error.is_none() {
                continue;
            }

            out.push_str(&format!("{}\n", file.path));
            if let Some(error) = &file.error {
                out.push_str(&format!("  fatal  {}\n", error));
            }
            for diag in &file.diagnostics {
                out.push_str(&format!("  {}\n", diag));
            }
            out.push('\n');
        }

        let problems = self.error_count + self.warning_count + self.fatal_count;
        if problems == 0 {
            out.push_str(&format!("✓ {} file(s) checked, no problems\n", self.files.len()));
        } else {
            out.push_str(&format!(
                "✗ {} problem(s) ({} error(s), {} warning(s), {} fatal) in {} file(s)\n",
                problems,
                self.error_count,
                self.warning_count,
                self.fatal_count,
                self.files.len()
            ));
        }

        out
    }
}
