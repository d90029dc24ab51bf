//! Command-line argument definitions.

use clap::Parser;

/// Lua minifier: parses Lua 5.x source, renames identifiers to the
/// shortest names their frequency rank allows, and prints the minified
/// source to standard output.
#[derive(Parser, Debug)]
#[command(name = "luamin", version, about)]
pub struct Cli {
    /// Lua source file to minify
    pub file: Option<String>,

    /// Parse and re-serialize without renaming identifiers
    #[arg(long)]
    pub no_rename: bool,

    /// Print the parsed syntax tree before the minified output
    #[arg(long)]
    pub ast: bool,

    /// Print size statistics to standard error
    #[arg(long)]
    pub stats: bool,

    /// Report parse errors as JSON on standard output
    #[arg(long)]
    pub json: bool,

    /// Start an interactive session
    #[arg(short, long)]
    pub interactive: bool,
}
