//! CLI utility helpers

use std::path::PathBuf;
use strict_spacing::{ConfigOverrides, Error, LintConfig, Mode, PolicyOption, Result, Severity};

/// Flags that take a value
const VALUE_FLAGS: [&str; 5] = ["--config", "--newline", "--before", "--after", "--severity"];

/// Value following `flag`, if present
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Positional arguments, skipping flags and their values
pub fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_mode(flag: &str, value: &str) -> Result<Mode> {
    Mode::parse(value).ok_or_else(|| {
        Error::Config(format!(
            "{} expects \"always\" or \"never\", got \"{}\"",
            flag, value
        ))
    })
}

/// Parse `--newline`, `--before`/`--after` and `--severity`
pub fn parse_overrides(args: &[String]) -> Result<ConfigOverrides> {
    let newline = flag_value(args, "--newline")
        .map(|v| parse_mode("--newline", v))
        .transpose()?;
    let before = flag_value(args, "--before")
        .map(|v| parse_mode("--before", v))
        .transpose()?;
    let after = flag_value(args, "--after")
        .map(|v| parse_mode("--after", v))
        .transpose()?;

    let newline = match (newline, before, after) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(Error::Config(
                "--newline cannot be combined with --before/--after".into(),
            ));
        }
        (Some(mode), None, None) => Some(PolicyOption::Uniform(mode)),
        (None, Some(before), Some(after)) => Some(PolicyOption::Split { before, after }),
        (None, Some(_), None) | (None, None, Some(_)) => {
            return Err(Error::Config(
                "--before and --after must be given together".into(),
            ));
        }
        (None, None, None) => None,
    };

    let severity = flag_value(args, "--severity")
        .map(|v| {
            Severity::parse(v).ok_or_else(|| {
                Error::Config(format!(
                    "--severity expects \"error\" or \"warning\", got \"{}\"",
                    v
                ))
            })
        })
        .transpose()?;

    Ok(ConfigOverrides { newline, severity })
}

/// Explicit `--config` file, else the nearest config above the current
/// directory, else defaults
pub fn load_config(args: &[String]) -> Result<(Option<PathBuf>, LintConfig)> {
    if let Some(path) = flag_value(args, "--config") {
        let path = PathBuf::from(path);
        let config = LintConfig::load(&path)?;
        return Ok((Some(path), config));
    }

    let current_dir = std::env::current_dir().map_err(Error::Io)?;
    match LintConfig::discover(&current_dir)? {
        Some((path, config)) => Ok((Some(path), config)),
        None => Ok((None, LintConfig::default())),
    }
}
