//! Lexical scope analysis.
//!
//! A single depth-first walk over the AST builds a tree of scopes, each
//! holding a name table: variable text mapped to every [`NameId`]
//! occurrence that resolves to that binding. Declarations insert into
//! the innermost scope; uses walk the scope stack outward and join the
//! first entry that matches. A use that resolves nowhere is a global:
//! unless the name is reserved, its first occurrence creates an entry in
//! the root scope that all later occurrences join.
//!
//! Scope boundaries follow execution order, not surface syntax. A
//! `while` condition runs before the body scope exists and resolves in
//! the enclosing scope; a `repeat` condition runs after the body and
//! resolves inside the body's scope. Numeric and generic `for` bound
//! expressions resolve in the enclosing scope while the control
//! variables are declared inside the body scope.

use std::collections::HashMap;

use crate::ast::{
    Accessor, Block, CallArgs, Chunk, Expr, Field, FuncBody, NameId, Param, PrefixBase,
    PrefixExpr, Statement,
};

/// Global names the renamer must never touch: standard library entries
/// plus the host environment's fixed callbacks and interfaces.
pub const RESERVED_GLOBALS: &[&str] = &[
    // global libs
    "math",
    "table",
    "string",
    // global functions
    "print",
    "pairs",
    "ipairs",
    "next",
    "tostring",
    "tonumber",
    "type",
    // host environment
    "async",
    "onTick",
    "onDraw",
    "input",
    "output",
    "screen",
    "property",
    "map",
];

/// One binding visible in a scope, with every occurrence that resolves
/// to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    /// The variable's source text
    pub text: String,
    /// All occurrences, in resolution order
    pub uses: Vec<NameId>,
}

/// One lexical scope.
#[derive(Debug, Default)]
pub struct Scope {
    /// Index of the enclosing scope; `None` for the root
    pub parent: Option<usize>,
    /// Child scopes in traversal order
    pub children: Vec<usize>,
    /// Bindings in declaration order
    pub entries: Vec<NameEntry>,
    index: HashMap<String, usize>,
}

impl Scope {
    /// Look up a binding by name.
    pub fn entry(&self, text: &str) -> Option<&NameEntry> {
        self.index.get(text).map(|&i| &self.entries[i])
    }
}

/// The scope tree produced by analysis. Index 0 is the root scope.
#[derive(Debug)]
pub struct ScopeTree {
    /// All scopes; children refer to their parents by index
    pub scopes: Vec<Scope>,
}

impl ScopeTree {
    /// The root (global) scope.
    pub fn root(&self) -> &Scope {
        &self.scopes[0]
    }
}

/// DFS walker that builds a [`ScopeTree`] for a chunk.
pub struct ScopeAnalyzer<'a> {
    chunk: &'a Chunk,
    scopes: Vec<Scope>,
    stack: Vec<usize>,
}

impl<'a> ScopeAnalyzer<'a> {
    /// Analyze a chunk and return its scope tree.
    pub fn analyze(chunk: &'a Chunk) -> ScopeTree {
        let mut analyzer = ScopeAnalyzer {
            chunk,
            scopes: vec![Scope::default()],
            stack: vec![0],
        };
        analyzer.visit_block(&chunk.block);
        ScopeTree {
            scopes: analyzer.scopes,
        }
    }

    fn enter_scope(&mut self) {
        let parent = *self.stack.last().unwrap_or(&0);
        let id = self.scopes.len();
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        self.scopes[parent].children.push(id);
        self.stack.push(id);
    }

    fn exit_scope(&mut self) {
        self.stack.pop();
    }

    /// Insert a declaring occurrence into the innermost scope.
    fn declare(&mut self, id: NameId) {
        let text = self.chunk.name(id);
        let scope = *self.stack.last().unwrap_or(&0);
        let scope = &mut self.scopes[scope];
        match scope.index.get(text) {
            Some(&i) => scope.entries[i].uses.push(id),
            None => {
                scope.index.insert(text.to_string(), scope.entries.len());
                scope.entries.push(NameEntry {
                    text: text.to_string(),
                    uses: vec![id],
                });
            }
        }
    }

    /// Resolve a use by walking the scope stack outward. Unresolved
    /// non-reserved names establish a fresh root-scope entry.
    fn reference(&mut self, id: NameId) {
        let text = self.chunk.name(id);
        for &scope in self.stack.iter().rev() {
            if let Some(&i) = self.scopes[scope].index.get(text) {
                self.scopes[scope].entries[i].uses.push(id);
                return;
            }
        }
        if !RESERVED_GLOBALS.contains(&text) {
            let root = &mut self.scopes[0];
            root.index.insert(text.to_string(), root.entries.len());
            root.entries.push(NameEntry {
                text: text.to_string(),
                uses: vec![id],
            });
        }
    }

    fn visit_block(&mut self, block: &Block) {
        for statement in &block.statements {
            self.visit_statement(statement);
        }
    }

    fn visit_scoped_block(&mut self, block: &Block) {
        self.enter_scope();
        self.visit_block(block);
        self.exit_scope();
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Call(prefix) => self.visit_prefix(prefix),
            Statement::Assign { targets, values } => {
                for target in targets {
                    self.visit_prefix(target);
                }
                self.visit_exprs(values);
            }
            Statement::LocalAssign { names, values } => {
                // names are visible to their own initializers
                for &name in names {
                    self.declare(name);
                }
                self.visit_exprs(values);
            }
            Statement::Function { name, body } => {
                self.reference(name.first);
                self.visit_func_body(body);
            }
            Statement::LocalFunction { name, body } => {
                // declared before the body so the function can recurse
                self.declare(*name);
                self.visit_func_body(body);
            }
            Statement::Do(block) => self.visit_scoped_block(block),
            Statement::While { condition, body } => {
                self.visit_expr(condition);
                self.visit_scoped_block(body);
            }
            Statement::Repeat { body, condition } => {
                self.enter_scope();
                self.visit_block(body);
                self.visit_expr(condition);
                self.exit_scope();
            }
            Statement::NumericFor {
                var,
                start,
                stop,
                step,
                body,
            } => {
                self.visit_expr(start);
                self.visit_expr(stop);
                if let Some(step) = step {
                    self.visit_expr(step);
                }
                self.enter_scope();
                self.declare(*var);
                self.visit_block(body);
                self.exit_scope();
            }
            Statement::GenericFor { names, exprs, body } => {
                self.visit_exprs(exprs);
                self.enter_scope();
                for &name in names {
                    self.declare(name);
                }
                self.visit_block(body);
                self.exit_scope();
            }
            Statement::If { arms, else_body } => {
                for arm in arms {
                    self.visit_expr(&arm.condition);
                    self.visit_scoped_block(&arm.body);
                }
                if let Some(else_body) = else_body {
                    self.visit_scoped_block(else_body);
                }
            }
            Statement::Label(name) => self.declare(*name),
            Statement::Goto(name) => self.reference(*name),
            Statement::Return(values) => self.visit_exprs(values),
            Statement::Break | Statement::Empty => {}
        }
    }

    fn visit_exprs(&mut self, exprs: &[Expr]) {
        for expr in exprs {
            self.visit_expr(expr);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Const { .. } | Expr::Vararg => {}
            Expr::Function(body) => self.visit_func_body(body),
            Expr::Table(fields) => self.visit_fields(fields),
            Expr::Prefix(prefix) => self.visit_prefix(prefix),
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
        }
    }

    fn visit_prefix(&mut self, prefix: &PrefixExpr) {
        match &prefix.base {
            PrefixBase::Name(id) => self.reference(*id),
            PrefixBase::Paren(expr) => self.visit_expr(expr),
        }
        for accessor in &prefix.accessors {
            match accessor {
                // field and method names are not variable uses
                Accessor::Field(_) => {}
                Accessor::Index(expr) => self.visit_expr(expr),
                Accessor::Call(args) => self.visit_args(args),
                Accessor::Method { args, .. } => self.visit_args(args),
            }
        }
    }

    fn visit_args(&mut self, args: &CallArgs) {
        match args {
            CallArgs::List(exprs) => self.visit_exprs(exprs),
            CallArgs::Table(fields) => self.visit_fields(fields),
            CallArgs::Str(_) => {}
        }
    }

    fn visit_fields(&mut self, fields: &[Field]) {
        for field in fields {
            match field {
                Field::Positional(expr) => self.visit_expr(expr),
                // named keys are not variable uses
                Field::Named { value, .. } => self.visit_expr(value),
                Field::Indexed { key, value } => {
                    self.visit_expr(key);
                    self.visit_expr(value);
                }
            }
        }
    }

    fn visit_func_body(&mut self, body: &FuncBody) {
        self.enter_scope();
        for param in &body.params {
            if let Param::Name(id) = param {
                self.declare(*id);
            }
        }
        self.visit_block(&body.body);
        self.exit_scope();
    }
}
