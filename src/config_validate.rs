//! Config validation for strict-spacing
//!
//! Checks a config file field by field so every problem is reported, not
//! just the first one serde trips over.

use crate::config::DEFAULT_EXTENSIONS;
use crate::policy::PolicyOption;
use crate::rule::Severity as RuleSeverity;
use serde_json::Value;
use std::path::Path;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A validation issue found in config
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub file: String,
}

impl ConfigIssue {
    pub fn error(code: &str, message: &str, file: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.to_string(),
            file: file.to_string(),
        }
    }

    pub fn warning(code: &str, message: &str, file: &str) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.to_string(),
            file: file.to_string(),
        }
    }
}

/// Result of config validation
#[derive(Debug, Default)]
pub struct ConfigValidationResult {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigValidationResult {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}

const KNOWN_KEYS: [&str; 5] = ["version", "severity", "newline", "extensions", "ignore"];

/// Validate a config file
pub fn validate_config(path: &Path) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::default();
    let file_str = path.display().to_string();

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            result.issues.push(ConfigIssue::error(
                "E001",
                &format!("Cannot read file: {}", e),
                &file_str,
            ));
            return result;
        }
    };

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let parsed: Result<Value, String> = if is_json {
        serde_json::from_str(&content).map_err(|e| format!("Invalid JSON: {}", e))
    } else {
        serde_norway::from_str(&content).map_err(|e| format!("Invalid YAML: {}", e))
    };

    let value = match parsed {
        Ok(Value::Null) => return result,
        Ok(v) => v,
        Err(msg) => {
            result
                .issues
                .push(ConfigIssue::error("E002", &msg, &file_str));
            return result;
        }
    };

    validate_value(&value, &file_str, &mut result);
    result
}

/// Validate an already-parsed config document
pub fn validate_value(value: &Value, file: &str, result: &mut ConfigValidationResult) {
    let Some(map) = value.as_object() else {
        result.issues.push(ConfigIssue::error(
            "E002",
            "Config must be a mapping",
            file,
        ));
        return;
    };

    for key in map.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            result.issues.push(ConfigIssue::error(
                "E005",
                &format!("Unknown key '{}'", key),
                file,
            ));
        }
    }

    if let Some(newline) = map.get("newline") {
        if let Err(e) = PolicyOption::from_value(newline) {
            result.issues.push(ConfigIssue::error(
                "E003",
                &format!("Invalid 'newline': {}", e),
                file,
            ));
        }
    }

    if let Some(version) = map.get("version") {
        if version.as_u64() != Some(1) {
            result.issues.push(ConfigIssue::error(
                "E004",
                &format!(
                    "Unsupported version: {}. Only version 1 is supported.",
                    version
                ),
                file,
            ));
        }
    }

    if let Some(severity) = map.get("severity") {
        if severity.as_str().and_then(RuleSeverity::parse).is_none() {
            result.issues.push(ConfigIssue::error(
                "E006",
                &format!("Invalid 'severity': {}. Use \"error\" or \"warning\".", severity),
                file,
            ));
        }
    }

    if let Some(extensions) = map.get("extensions") {
        match extensions.as_array() {
            Some(list) => {
                for ext in list {
                    match ext.as_str() {
                        Some(e) if DEFAULT_EXTENSIONS.contains(&e) => {}
                        Some(e) => result.issues.push(ConfigIssue::warning(
                            "W001",
                            &format!("Extension '{}' has no JavaScript/TypeScript grammar and will be skipped", e),
                            file,
                        )),
                        None => result.issues.push(ConfigIssue::error(
                            "E007",
                            &format!("Extensions must be strings, got {}", ext),
                            file,
                        )),
                    }
                }
            }
            None => result.issues.push(ConfigIssue::error(
                "E007",
                "'extensions' must be a list",
                file,
            )),
        }
    }

    if let Some(ignore) = map.get("ignore") {
        let valid = ignore
            .as_array()
            .is_some_and(|list| list.iter().all(Value::is_string));
        if !valid {
            result.issues.push(ConfigIssue::error(
                "E008",
                "'ignore' must be a list of directory names",
                file,
            ));
        }
    }

    if map.get("newline").is_none() {
        result.issues.push(ConfigIssue::warning(
            "W002",
            "No 'newline' option set. Defaulting to \"always\".",
            file,
        ));
    }
}
