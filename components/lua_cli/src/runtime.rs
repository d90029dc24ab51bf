//! Minification orchestration.
//!
//! The Runtime wires the pipeline together: read source, parse, rename
//! (unless disabled), serialize. Parse errors come back as fully
//! rendered diagnostics so callers never touch raw byte offsets.

use crate::error::{CliError, CliResult};

/// Everything one minification run produces.
#[derive(Debug)]
pub struct MinifyOutcome {
    /// The minified source text
    pub minified: String,
    /// Rendered syntax tree, when AST printing is enabled
    pub ast: Option<String>,
    /// Size statistics, when stats are enabled
    pub stats: Option<MinifyStats>,
}

/// Size statistics for one run.
#[derive(Debug, Clone, Copy)]
pub struct MinifyStats {
    /// Bytes of input source
    pub source_bytes: usize,
    /// Bytes of minified output
    pub minified_bytes: usize,
    /// Identifier occurrences that received a new name
    pub occurrences_renamed: usize,
}

/// Coordinates parsing, renaming and serialization.
pub struct Runtime {
    rename_enabled: bool,
    print_ast: bool,
    print_stats: bool,
}

impl Runtime {
    /// Create a runtime with renaming enabled and extras off.
    pub fn new() -> Self {
        Runtime {
            rename_enabled: true,
            print_ast: false,
            print_stats: false,
        }
    }

    /// Enable or disable identifier renaming.
    pub fn with_rename(mut self, enabled: bool) -> Self {
        self.rename_enabled = enabled;
        self
    }

    /// Enable AST rendering in the outcome.
    pub fn with_print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Enable size statistics in the outcome.
    pub fn with_print_stats(mut self, enabled: bool) -> Self {
        self.print_stats = enabled;
        self
    }

    /// Minify a file.
    pub fn minify_file(&self, path: &str) -> CliResult<MinifyOutcome> {
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_string(),
            source,
        })?;
        self.minify_string(&source)
    }

    /// Minify a source string.
    pub fn minify_string(&self, source: &str) -> CliResult<MinifyOutcome> {
        let mut chunk =
            parser::parse(source).map_err(|e| CliError::Parse(e.diagnose(source)))?;

        let names_before = self.rename_enabled.then(|| chunk.names.clone());
        if self.rename_enabled {
            parser::rename(&mut chunk);
        }

        let ast = self.print_ast.then(|| chunk.tree());
        let minified = parser::serialize(&chunk);
        let stats = self.print_stats.then(|| MinifyStats {
            source_bytes: source.len(),
            minified_bytes: minified.len(),
            occurrences_renamed: match &names_before {
                Some(before) => before
                    .iter()
                    .zip(&chunk.names)
                    .filter(|(old, new)| old != new)
                    .count(),
                None => 0,
            },
        });

        Ok(MinifyOutcome {
            minified,
            ast,
            stats,
        })
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
