//! AST serialization back to Lua source.
//!
//! Emission is the exact inverse of parsing: every node regenerates the
//! token sequence it was built from, minus whitespace and comments.
//! [`serialize`] then joins the tokens, inserting a space only where two
//! adjacent tokens would otherwise merge into a different token.

use crate::ast::{
    Accessor, Block, CallArgs, Chunk, Expr, Field, FuncBody, Param, PrefixBase, PrefixExpr,
    Statement,
};

/// Regenerate the chunk's token sequence in source order.
pub fn to_tokens(chunk: &Chunk) -> Vec<String> {
    let mut emitter = Emitter {
        chunk,
        out: Vec::new(),
    };
    emitter.emit_block(&chunk.block);
    emitter.out.into_iter().map(str::to_string).collect()
}

/// Serialize the chunk to minified source text.
pub fn serialize(chunk: &Chunk) -> String {
    let mut emitter = Emitter {
        chunk,
        out: Vec::new(),
    };
    emitter.emit_block(&chunk.block);

    let mut text = String::new();
    for (i, token) in emitter.out.iter().enumerate() {
        if i > 0 && needs_space(emitter.out[i - 1], token) {
            text.push(' ');
        }
        text.push_str(token);
    }
    text
}

/// Characters that never merge with a neighboring token.
fn is_glue(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '*'
            | '/'
            | '%'
            | '^'
            | '#'
            | '&'
            | '~'
            | '|'
            | '<'
            | '>'
            | '='
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ':'
            | ';'
            | ','
            | '.'
            | '\''
            | '"'
    )
}

/// A space is needed when neither adjacent token ends in a glue
/// character, or when the pair would fuse into a different lexeme: both
/// tokens ending in `.` (a longer dot token), or a `-` followed by a
/// `-` (a line comment).
fn needs_space(prev: &str, next: &str) -> bool {
    let p = prev.chars().last().unwrap_or(' ');
    let n = next.chars().last().unwrap_or(' ');
    !(is_glue(p) || is_glue(n)) || (p == '.' && n == '.') || (p == '-' && next.starts_with('-'))
}

struct Emitter<'a> {
    chunk: &'a Chunk,
    out: Vec<&'a str>,
}

impl<'a> Emitter<'a> {
    fn push(&mut self, token: &'a str) {
        self.out.push(token);
    }

    fn emit_block(&mut self, block: &'a Block) {
        for statement in &block.statements {
            self.emit_statement(statement);
        }
    }

    fn emit_statement(&mut self, statement: &'a Statement) {
        match statement {
            Statement::Call(prefix) => self.emit_prefix(prefix),
            Statement::Assign { targets, values } => {
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        self.push(",");
                    }
                    self.emit_prefix(target);
                }
                self.push("=");
                self.emit_exprs(values);
            }
            Statement::LocalAssign { names, values } => {
                self.push("local");
                for (i, &name) in names.iter().enumerate() {
                    if i > 0 {
                        self.push(",");
                    }
                    self.push(self.chunk.name(name));
                }
                if !values.is_empty() {
                    self.push("=");
                    self.emit_exprs(values);
                }
            }
            Statement::Function { name, body } => {
                self.push("function");
                self.push(self.chunk.name(name.first));
                for part in &name.rest {
                    self.push(".");
                    self.push(part);
                }
                if let Some(method) = &name.method {
                    self.push(":");
                    self.push(method);
                }
                self.emit_func_body(body);
            }
            Statement::LocalFunction { name, body } => {
                self.push("local");
                self.push("function");
                self.push(self.chunk.name(*name));
                self.emit_func_body(body);
            }
            Statement::Do(block) => {
                self.push("do");
                self.emit_block(block);
                self.push("end");
            }
            Statement::While { condition, body } => {
                self.push("while");
                self.emit_expr(condition);
                self.push("do");
                self.emit_block(body);
                self.push("end");
            }
            Statement::Repeat { body, condition } => {
                self.push("repeat");
                self.emit_block(body);
                self.push("until");
                self.emit_expr(condition);
            }
            Statement::NumericFor {
                var,
                start,
                stop,
                step,
                body,
            } => {
                self.push("for");
                self.push(self.chunk.name(*var));
                self.push("=");
                self.emit_expr(start);
                self.push(",");
                self.emit_expr(stop);
                if let Some(step) = step {
                    self.push(",");
                    self.emit_expr(step);
                }
                self.push("do");
                self.emit_block(body);
                self.push("end");
            }
            Statement::GenericFor { names, exprs, body } => {
                self.push("for");
                for (i, &name) in names.iter().enumerate() {
                    if i > 0 {
                        self.push(",");
                    }
                    self.push(self.chunk.name(name));
                }
                self.push("in");
                self.emit_exprs(exprs);
                self.push("do");
                self.emit_block(body);
                self.push("end");
            }
            Statement::If { arms, else_body } => {
                for (i, arm) in arms.iter().enumerate() {
                    self.push(if i == 0 { "if" } else { "elseif" });
                    self.emit_expr(&arm.condition);
                    self.push("then");
                    self.emit_block(&arm.body);
                }
                if let Some(else_body) = else_body {
                    self.push("else");
                    self.emit_block(else_body);
                }
                self.push("end");
            }
            Statement::Label(name) => {
                self.push("::");
                self.push(self.chunk.name(*name));
                self.push("::");
            }
            Statement::Goto(name) => {
                self.push("goto");
                self.push(self.chunk.name(*name));
            }
            Statement::Break => self.push("break"),
            Statement::Return(values) => {
                self.push("return");
                self.emit_exprs(values);
            }
            Statement::Empty => self.push(";"),
        }
    }

    fn emit_exprs(&mut self, exprs: &'a [Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.push(",");
            }
            self.emit_expr(expr);
        }
    }

    fn emit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Const { text, .. } => self.push(text),
            Expr::Vararg => self.push("..."),
            Expr::Function(body) => {
                self.push("function");
                self.emit_func_body(body);
            }
            Expr::Table(fields) => self.emit_table(fields),
            Expr::Prefix(prefix) => self.emit_prefix(prefix),
            Expr::Binary { op, left, right } => {
                self.emit_expr(left);
                self.push(op);
                self.emit_expr(right);
            }
            Expr::Unary { op, operand } => {
                self.push(op);
                self.emit_expr(operand);
            }
        }
    }

    fn emit_prefix(&mut self, prefix: &'a PrefixExpr) {
        match &prefix.base {
            PrefixBase::Name(id) => self.push(self.chunk.name(*id)),
            PrefixBase::Paren(expr) => {
                self.push("(");
                self.emit_expr(expr);
                self.push(")");
            }
        }
        for accessor in &prefix.accessors {
            match accessor {
                Accessor::Field(name) => {
                    self.push(".");
                    self.push(name);
                }
                Accessor::Index(expr) => {
                    self.push("[");
                    self.emit_expr(expr);
                    self.push("]");
                }
                Accessor::Call(args) => self.emit_args(args),
                Accessor::Method { name, args } => {
                    self.push(":");
                    self.push(name);
                    self.emit_args(args);
                }
            }
        }
    }

    fn emit_args(&mut self, args: &'a CallArgs) {
        match args {
            CallArgs::List(exprs) => {
                self.push("(");
                self.emit_exprs(exprs);
                self.push(")");
            }
            CallArgs::Table(fields) => self.emit_table(fields),
            CallArgs::Str(text) => self.push(text),
        }
    }

    fn emit_table(&mut self, fields: &'a [Field]) {
        self.push("{");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.push(",");
            }
            match field {
                Field::Positional(expr) => self.emit_expr(expr),
                Field::Named { key, value } => {
                    self.push(key);
                    self.push("=");
                    self.emit_expr(value);
                }
                Field::Indexed { key, value } => {
                    self.push("[");
                    self.emit_expr(key);
                    self.push("]");
                    self.push("=");
                    self.emit_expr(value);
                }
            }
        }
        self.push("}");
    }

    fn emit_func_body(&mut self, body: &'a FuncBody) {
        self.push("(");
        for (i, param) in body.params.iter().enumerate() {
            if i > 0 {
                self.push(",");
            }
            match param {
                Param::Name(id) => self.push(self.chunk.name(*id)),
                Param::Vararg => self.push("..."),
            }
        }
        self.push(")");
        self.emit_block(&body.body);
        self.push("end");
    }
}
