//! strict-spacing CLI - Command-line interface
//!
//! Commands:
//!   check    - Lint files and directories
//!   config   - Validate the config file
//!   schema   - Print the config JSON schema
//!   sexp     - Dump the tree-sitter tree of a file

mod cli;

use std::process::ExitCode;
use strict_spacing::*;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "check" => cli::cmd_check(&args[2..]),
        "config" => cli::cmd_config(&args[2..]),
        "schema" => cli::cmd_schema(&args[2..]),
        "sexp" => cli::cmd_sexp(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("strict-spacing {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
strict-spacing - blank lines around 'use strict' directives

USAGE:
    strict-spacing <COMMAND> [OPTIONS]

COMMANDS:
    check <path>...                  Lint files and directories
    config check                     Validate the nearest config file
    schema                           Print JSON schema for the config file
    sexp <file>                      Print the tree-sitter tree of a file
    version                          Print version

OPTIONS:
    --config <file>                  Config file (default: nearest .strict-spacing.yaml)
    --newline <always|never>         Policy for both sides
    --before <always|never>          Policy before the directive (with --after)
    --after <always|never>           Policy after the directive (with --before)
    --severity <error|warning>       Severity of reported problems
    --json                           JSON output format (check, config check)

EXAMPLES:
    strict-spacing check src/
    strict-spacing check lib/index.js --newline never
    strict-spacing check . --before never --after always --json
"#
    );
}
