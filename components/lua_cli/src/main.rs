//! Lua minifier CLI.
//!
//! Entry point for `luamin`. Parses CLI arguments and delegates to the
//! Runtime for minification.

use clap::Parser as ClapParser;
use lua_cli::{Cli, CliError, Runtime};

fn main() {
    let cli = Cli::parse();

    let runtime = Runtime::new()
        .with_rename(!cli.no_rename)
        .with_print_ast(cli.ast)
        .with_print_stats(cli.stats);

    if let Some(file) = &cli.file {
        match runtime.minify_file(file) {
            Ok(outcome) => {
                if let Some(ast) = &outcome.ast {
                    eprint!("{}", ast);
                }
                println!("{}", outcome.minified);
                if let Some(stats) = &outcome.stats {
                    eprintln!(
                        "{} bytes in, {} bytes out, {} identifier occurrences renamed",
                        stats.source_bytes, stats.minified_bytes, stats.occurrences_renamed
                    );
                }
            }
            Err(error) => {
                report_error(&error, cli.json);
                std::process::exit(1);
            }
        }
    } else if cli.interactive {
        if let Err(error) = lua_cli::repl::run_repl(&runtime) {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    } else {
        println!("luamin - Lua minifier");
        println!();
        println!("Usage:");
        println!("  luamin <FILE>            Minify a Lua file to stdout");
        println!("  luamin <FILE> --ast      Also dump the syntax tree to stderr");
        println!("  luamin --interactive     Start an interactive session");
        println!();
        println!("Run 'luamin --help' for more options.");
    }
}

/// Print a failure to stderr, or as a JSON diagnostic on stdout when
/// requested.
fn report_error(error: &CliError, json: bool) {
    match error.diagnostic() {
        Some(diagnostic) if json => match serde_json::to_string(diagnostic) {
            Ok(payload) => println!("{}", payload),
            Err(e) => eprintln!("Error: could not encode diagnostic: {}", e),
        },
        Some(diagnostic) => {
            eprintln!("{}", diagnostic.line_text);
            eprintln!("{}", diagnostic.marker_line());
            eprintln!(
                "line {}, column {}: {}",
                diagnostic.line, diagnostic.column, diagnostic.message
            );
        }
        None => eprintln!("Error: {}", error),
    }
}
