//! Lint commands: check, sexp

use super::util::{has_flag, load_config, parse_overrides, positional};
use std::fs;
use std::path::PathBuf;
use strict_spacing::*;

pub fn cmd_check(args: &[String]) -> Result<()> {
    let paths: Vec<PathBuf> = positional(args).into_iter().map(PathBuf::from).collect();
    if paths.is_empty() {
        return Err("Usage: strict-spacing check <path>... [--newline always|never] [--json]".into());
    }

    let json_output = has_flag(args, "--json");
    let overrides = parse_overrides(args)?;
    let (config_path, config) = load_config(args)?;
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "using config");
    }
    let config = config.merge(&overrides);

    let report = lint_paths(&paths, &config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_report());
    }

    if report.passed() {
        Ok(())
    } else {
        Err("Lint failed".into())
    }
}

pub fn cmd_sexp(args: &[String]) -> Result<()> {
    let Some(path) = positional(args).first().copied() else {
        return Err("Usage: strict-spacing sexp <file>".into());
    };

    let lang = detect_language(path);
    let source = fs::read_to_string(path).map_err(Error::Io)?;
    println!("{}", to_sexp(&source, lang)?);
    Ok(())
}
