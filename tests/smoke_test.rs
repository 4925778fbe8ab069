//! Smoke tests over real files: config discovery, directory walking, reports

use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use strict_spacing::config_validate::validate_config;
use strict_spacing::{lint_paths, ConfigOverrides, LintConfig, Mode, PolicyOption, Severity};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn smoke_test_lint_directory() {
    let dir = TempDir::new().unwrap();
    write(&dir, "good.js", "'use strict';\n\nvar foo;\n");
    write(&dir, "bad.js", "'use strict';\nvar foo;\n");
    write(&dir, "lib/nested.ts", "'use strict';\nconst x: number = 1;\n");
    write(&dir, "notes.txt", "'use strict';\nvar foo;\n");
    write(&dir, "node_modules/dep.js", "'use strict';\nvar foo;\n");
    write(&dir, ".hidden/skip.js", "'use strict';\nvar foo;\n");

    let report = lint_paths(&[dir.path().to_path_buf()], &LintConfig::default()).unwrap();

    let mut linted: Vec<String> = report
        .files
        .iter()
        .map(|f| {
            PathBuf::from(&f.path)
                .strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    linted.sort();
    assert_eq!(linted, vec!["bad.js", "good.js", "lib/nested.ts"]);
    assert_eq!(report.error_count, 2);
    assert_eq!(report.warning_count, 0);
    assert!(!report.passed());
}

#[test]
fn smoke_test_warning_severity_passes() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "bad.js", "'use strict';\nvar foo;\n");

    let config = LintConfig::default().merge(&ConfigOverrides {
        newline: None,
        severity: Some(Severity::Warning),
    });
    let report = lint_paths(&[file], &config).unwrap();

    assert_eq!(report.error_count, 0);
    assert_eq!(report.warning_count, 1);
    assert!(report.passed());
}

#[test]
fn smoke_test_parse_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "broken.js", "'use strict';\nvar = ;\n");

    let report = lint_paths(&[file], &LintConfig::default()).unwrap();

    assert_eq!(report.fatal_count, 1);
    assert!(report.files[0].error.is_some());
    assert!(!report.passed());
    assert!(report.to_report().contains("fatal"));
}

#[test]
fn smoke_test_missing_path_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.js");
    assert!(lint_paths(&[missing], &LintConfig::default()).is_err());
}

#[test]
fn smoke_test_config_file_drives_policy() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".strict-spacing.yaml", "newline:\n  before: always\n  after: never\n");
    let file = write(&dir, "src/a.js", "'use strict';\nvar foo;\n");

    let (path, config) = LintConfig::discover(&dir.path().join("src"))
        .unwrap()
        .unwrap();
    assert_eq!(path, dir.path().join(".strict-spacing.yaml"));
    assert_eq!(
        config.newline,
        Some(PolicyOption::Split {
            before: Mode::Always,
            after: Mode::Never
        })
    );

    let report = lint_paths(&[file], &config).unwrap();
    assert!(report.passed());
    assert!(report.to_report().contains("no problems"));
}

#[test]
fn smoke_test_cli_overrides_win() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".strict-spacing.yaml", "newline: never\n");
    let file = write(&dir, "a.js", "'use strict';\nvar foo;\n");

    let config = LintConfig::load(&dir.path().join(".strict-spacing.yaml"))
        .unwrap()
        .merge(&ConfigOverrides {
            newline: Some(PolicyOption::Uniform(Mode::Always)),
            severity: None,
        });

    let report = lint_paths(&[file], &config).unwrap();
    assert_eq!(report.error_count, 1);
}

#[test]
fn smoke_test_json_report_shape() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "bad.js", "'use strict';\nvar foo;\n");

    let report = lint_paths(&[file], &LintConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let diag = &json["files"][0]["diagnostics"][0];
    assert_eq!(diag["rule"], "lines-around-use-strict");
    assert_eq!(diag["severity"], "error");
    assert_eq!(diag["side"], "after");
    assert_eq!(diag["expectation"], "expected");
    assert_eq!(diag["message"], "Expected newline after 'use strict' directive.");
    assert!(json["files"][0]["source_hash"]
        .as_str()
        .unwrap()
        .starts_with("sha256:"));
}

#[test]
fn smoke_test_validate_config_file() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.yaml", "version: 1\nnewline: always\n");
    let bad = write(&dir, "bad.yaml", "newline: sometimes\nsevrity: error\n");

    let result = validate_config(&good);
    assert!(!result.has_errors());

    let result = validate_config(&bad);
    let codes: Vec<&str> = result.issues.iter().map(|i| i.code.as_str()).collect();
    assert!(codes.contains(&"E003"));
    assert!(codes.contains(&"E005"));
}
