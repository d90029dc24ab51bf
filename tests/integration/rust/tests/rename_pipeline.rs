//! Rename Pipeline Integration Tests
//!
//! Tests the complete flow: source -> parse -> scope analysis ->
//! rename -> serialize, including the scoping rules the renamer
//! depends on.

use parser::{Chunk, ScopeAnalyzer};

fn parse(source: &str) -> Chunk {
    parser::parse(source).expect("parse failed")
}

fn minify(source: &str) -> String {
    let mut chunk = parse(source);
    parser::rename(&mut chunk);
    parser::serialize(&chunk)
}

/// Test: a twice-used local takes the shortest name; reserved globals
/// and constants stay untouched
#[test]
fn test_local_gets_shortest_name() {
    assert_eq!(minify("local x = 1\nprint(x)"), "local a=1 print(a)");
}

/// Test: the loop body scope holds both the control variable and its
/// locals, each independently eligible for a short name
#[test]
fn test_loop_body_scope_names() {
    assert_eq!(
        minify("for i = 1, 10 do local t = {} end"),
        "for a=1,10 do local b={}end"
    );
}

/// Test: a missing name after `local` is a wrong-token error at `=`
#[test]
fn test_missing_local_name() {
    let error = parser::parse("local = 1").unwrap_err();
    assert_eq!(error.offset, 6);
    assert_eq!(
        error.to_string(),
        "wrong token: '=' but variable name expected after 'local'"
    );
}

/// Test: a repeat condition resolves in the body's scope
#[test]
fn test_repeat_condition_uses_body_scope() {
    let chunk = parse("repeat local x = 1 x = x + 1 until x > 10");
    let tree = ScopeAnalyzer::analyze(&chunk);
    assert!(tree.root().entry("x").is_none());
    let body = &tree.scopes[1];
    assert_eq!(body.entry("x").expect("body binding").uses.len(), 4);

    assert_eq!(
        minify("repeat local x = 1 x = x + 1 until x > 10"),
        "repeat local a=1 a=a+1 until a>10"
    );
}

/// Test: locals in disjoint function scopes may share one short name
#[test]
fn test_disjoint_scopes_share_short_name() {
    let out = minify(
        "local function f() local count = 1 return count end \
         local function g() local count = 2 return count end",
    );
    assert_eq!(
        out,
        "local function b()local a=1 return a end local function c()local a=2 return a end"
    );
}

/// Test: renaming never changes the tree shape
#[test]
fn test_rename_preserves_structure() {
    let source = "local function f(a) for i = 1, a do print(i) end end f(3)";
    let mut chunk = parse(source);
    let shape = chunk.block.clone();
    parser::rename(&mut chunk);
    assert_eq!(chunk.block, shape);
}

/// Test: renaming is deterministic across runs and stable on its own
/// output
#[test]
fn test_rename_deterministic() {
    let source = "local alpha = 1 local beta = alpha print(alpha, beta)";
    let first = minify(source);
    assert_eq!(minify(source), first);
    // minifying already-minified output regenerates the same names
    assert_eq!(minify(&first), first);
}

/// Test: more uses never means a longer name
#[test]
fn test_frequency_monotonicity() {
    let source = "local busy = 0 busy = busy + busy busy = busy - 1 local quiet = 2";
    let out = minify(source);
    // busy has six occurrences, quiet one: busy must get `a`
    assert_eq!(out, "local a=0 a=a+a a=a-1 local b=2");
}

/// Test: reserved globals are never renamed
#[test]
fn test_reserved_globals_survive() {
    let source =
        "function onTick() local v = input.getNumber(1) output.setNumber(1, math.abs(v)) end";
    let out = minify(source);
    assert!(out.contains("onTick"));
    assert!(out.contains("input.getNumber"));
    assert!(out.contains("output.setNumber"));
    assert!(out.contains("math.abs"));
    assert!(out.contains("local a="));
}

/// Test: an unresolved non-reserved global is renamed consistently
/// everywhere
#[test]
fn test_plain_global_renamed_consistently() {
    let out = minify("helper(1) do helper(2) end helper(3)");
    assert_eq!(out, "a(1)do a(2)end a(3)");
}

/// Test: field and method names never change
#[test]
fn test_field_names_survive() {
    let out = minify("local t = {} t.first = 1 t:second() return t.first");
    assert_eq!(out, "local a={}a.first=1 a:second()return a.first");
}

/// Test: the minified output of a renamed program still parses
#[test]
fn test_renamed_output_reparses() {
    let source = "local function fib(n) if n < 2 then return n end \
                  return fib(n - 1) + fib(n - 2) end print(fib(10))";
    let out = minify(source);
    let reparsed = parser::parse(&out).expect("renamed output must parse");
    assert_eq!(parser::serialize(&reparsed), out);
}
