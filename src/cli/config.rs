//! Config and schema CLI commands

use super::util::{flag_value, has_flag};
use std::path::PathBuf;
use strict_spacing::*;

pub fn cmd_config(args: &[String]) -> Result<()> {
    use config_validate::{validate_config, Severity};

    if args.is_empty() {
        return Err("Usage: strict-spacing config check [--config <file>] [--json]".into());
    }

    match args[0].as_str() {
        "check" => {
            let json_output = has_flag(args, "--json");

            let path = match flag_value(args, "--config") {
                Some(p) => PathBuf::from(p),
                None => {
                    let current_dir = std::env::current_dir().map_err(Error::Io)?;
                    match LintConfig::find(&current_dir) {
                        Some(p) => p,
                        None => {
                            println!("No config file found; defaults apply (newline: always)");
                            return Ok(());
                        }
                    }
                }
            };

            let result = validate_config(&path);

            if json_output {
                let issues_json: Vec<_> = result
                    .issues
                    .iter()
                    .map(|i| {
                        serde_json::json!({
                            "severity": match i.severity { Severity::Error => "error", Severity::Warning => "warning" },
                            "code": i.code,
                            "message": i.message,
                            "file": i.file,
                        })
                    })
                    .collect();

                let output = serde_json::json!({
                    "valid": !result.has_errors(),
                    "errors": result.error_count(),
                    "warnings": result.warning_count(),
                    "issues": issues_json,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if result.issues.is_empty() {
                println!("✓ Configuration is valid");
            } else {
                for issue in &result.issues {
                    let (prefix, level) = match issue.severity {
                        Severity::Error => ("✗", "ERROR"),
                        Severity::Warning => ("⚠", "WARN"),
                    };
                    println!("{} [{}] {}: {}", prefix, issue.code, level, issue.message);
                    println!("  File: {}", issue.file);
                }

                println!();
                if result.has_errors() {
                    println!(
                        "✗ {} error(s), {} warning(s)",
                        result.error_count(),
                        result.warning_count()
                    );
                } else {
                    println!("✓ {} warning(s) (no errors)", result.warning_count());
                }
            }

            if result.has_errors() {
                return Err("Configuration validation failed".into());
            }
            Ok(())
        }
        other => Err(format!("Unknown config subcommand: {}", other).into()),
    }
}

pub fn cmd_schema(_args: &[String]) -> Result<()> {
    let schema = schemars::schema_for!(LintConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
