//! End-to-End CLI Runtime Tests
//!
//! Exercises the lua_cli Runtime the way the binary drives it: reading
//! files from disk, toggling renaming, and surfacing diagnostics.

use std::io::Write;

use lua_cli::{CliError, Runtime};
use tempfile::NamedTempFile;

fn write_source(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(source.as_bytes()).expect("write source");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

/// Test: minifying a file renames locals and strips trivia
#[test]
fn test_minify_file() {
    let file = write_source("-- doubles the input\nlocal value = 10\nprint(value * 2)\n");
    let outcome = Runtime::new().minify_file(&path_of(&file)).unwrap();
    assert_eq!(outcome.minified, "local a=10 print(a*2)");
}

/// Test: --no-rename keeps identifiers while still compacting
#[test]
fn test_minify_file_without_rename() {
    let file = write_source("local value = 10\nprint( value )\n");
    let outcome = Runtime::new()
        .with_rename(false)
        .minify_file(&path_of(&file))
        .unwrap();
    assert_eq!(outcome.minified, "local value=10 print(value)");
}

/// Test: the AST dump renders the full tree
#[test]
fn test_ast_dump() {
    let file = write_source("if ready then go() end");
    let outcome = Runtime::new()
        .with_print_ast(true)
        .minify_file(&path_of(&file))
        .unwrap();
    let ast = outcome.ast.expect("ast requested");
    assert!(ast.starts_with("Chunk"));
    assert!(ast.contains("If"));
    assert!(ast.contains("Call"));
}

/// Test: stats report sizes and renamed occurrence counts
#[test]
fn test_stats() {
    let file = write_source("local counter = 0\ncounter = counter + 1\n");
    let outcome = Runtime::new()
        .with_print_stats(true)
        .minify_file(&path_of(&file))
        .unwrap();
    let stats = outcome.stats.expect("stats requested");
    assert_eq!(stats.occurrences_renamed, 3);
    assert!(stats.minified_bytes < stats.source_bytes);
    assert_eq!(stats.minified_bytes, outcome.minified.len());
}

/// Test: a parse error carries a positioned diagnostic
#[test]
fn test_parse_error_diagnostic() {
    let file = write_source("local x = 1\nlocal = 2\n");
    let error = Runtime::new().minify_file(&path_of(&file)).unwrap_err();
    let diagnostic = error.diagnostic().expect("parse diagnostic");
    assert_eq!(diagnostic.line, 2);
    assert_eq!(diagnostic.column, 7);
    assert_eq!(diagnostic.offending_text, "=");
    assert_eq!(diagnostic.line_text, "local = 2");
    assert_eq!(
        diagnostic.message,
        "wrong token: '=' but variable name expected after 'local'"
    );
}

/// Test: diagnostics serialize to JSON for machine consumption
#[test]
fn test_diagnostic_json() {
    let error = Runtime::new().minify_string("return @").unwrap_err();
    let diagnostic = error.diagnostic().expect("parse diagnostic");
    let payload = serde_json::to_string(diagnostic).expect("encode");
    assert!(payload.contains("\"line\":1"));
    assert!(payload.contains("\"column\":8"));
    assert!(payload.contains("unexpected symbol: @"));
}

/// Test: a missing input file is an I/O error naming the path
#[test]
fn test_missing_file() {
    let error = Runtime::new()
        .minify_file("/nonexistent/input.lua")
        .unwrap_err();
    match error {
        CliError::Io { path, .. } => assert_eq!(path, "/nonexistent/input.lua"),
        other => panic!("expected Io error, got {:?}", other),
    }
}

/// Test: an empty file minifies to an empty string
#[test]
fn test_empty_file() {
    let file = write_source("");
    let outcome = Runtime::new().minify_file(&path_of(&file)).unwrap();
    assert_eq!(outcome.minified, "");
}

/// Test: minified output of a larger program stays valid and shrinks
#[test]
fn test_program_shrinks_and_reparses() {
    let source = r#"
local width, height = 32, 32

local function clamp(value, low, high)
    if value < low then
        return low
    elseif value > high then
        return high
    end
    return value
end

function onDraw()
    local x = clamp(input.getNumber(1), 0, width)
    local y = clamp(input.getNumber(2), 0, height)
    screen.drawLine(0, 0, x, y)
end
"#;
    let file = write_source(source);
    let outcome = Runtime::new()
        .with_print_stats(true)
        .minify_file(&path_of(&file))
        .unwrap();
    assert!(outcome.minified.len() < source.len());
    assert!(outcome.minified.contains("onDraw"));
    assert!(outcome.minified.contains("screen.drawLine"));
    // the output must itself be minifiable without changing
    let again = Runtime::new()
        .minify_string(&outcome.minified)
        .unwrap();
    assert_eq!(again.minified, outcome.minified);
}
