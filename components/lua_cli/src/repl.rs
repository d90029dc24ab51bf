//! Interactive minification session.
//!
//! Each submitted snippet is parsed and minified on its own. Input that
//! fails with the error token at end of input is treated as incomplete
//! and accumulated across lines.

use crate::error::{CliError, CliResult};
use crate::runtime::Runtime;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive session.
pub fn run_repl(runtime: &Runtime) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("failed to initialize editor: {}", e)))?;

    println!("luamin interactive session");
    println!("Type Lua code to minify it, or 'exit' to quit.");
    println!();

    let mut buffer = String::new();
    let mut continuing = false;

    loop {
        let prompt = if continuing { ">> " } else { "> " };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !continuing && (trimmed == "exit" || trimmed == "quit") {
                    break;
                }
                if !continuing && trimmed.is_empty() {
                    continue;
                }

                if continuing {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                match runtime.minify_string(&buffer) {
                    Ok(outcome) => {
                        let _ = editor.add_history_entry(&buffer);
                        if let Some(ast) = outcome.ast {
                            print!("{}", ast);
                        }
                        println!("{}", outcome.minified);
                        buffer.clear();
                        continuing = false;
                    }
                    Err(error) if is_incomplete(&error) => {
                        continuing = true;
                    }
                    Err(error) => {
                        let _ = editor.add_history_entry(&buffer);
                        if let Some(diagnostic) = error.diagnostic() {
                            eprintln!("{}", diagnostic.line_text);
                            eprintln!("{}", diagnostic.marker_line());
                            eprintln!(
                                "line {}, column {}: {}",
                                diagnostic.line, diagnostic.column, diagnostic.message
                            );
                        } else {
                            eprintln!("Error: {}", error);
                        }
                        buffer.clear();
                        continuing = false;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                if continuing {
                    println!("^C");
                    buffer.clear();
                    continuing = false;
                } else {
                    println!("Press Ctrl-D or type 'exit' to quit");
                }
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("readline error: {}", err)));
            }
        }
    }

    Ok(())
}

/// A parse error whose offending token is the end of input means the
/// snippet is merely unfinished.
fn is_incomplete(error: &CliError) -> bool {
    error
        .diagnostic()
        .is_some_and(|d| d.offending_text.is_empty())
}
