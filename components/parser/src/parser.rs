//! Recursive-descent parser for Lua chunks.
//!
//! Statement dispatch is predictive: the leading token selects the
//! production, with short extra lookahead where one token is not enough
//! (`local` vs `local function`, numeric vs generic `for`). Statements
//! led by a prefix expression are classified by skipping ahead to the
//! last trailing accessor without building nodes: a call or method
//! accessor makes it a call statement, anything else an assignment.
//!
//! Expressions use an explicit operand/operator stack. Before a new
//! binary operator is pushed, the stack is reduced while the operator
//! below the top binds tighter (or equally tight and right-associative).

use core_types::LuaError;

use crate::ast::{
    Accessor, Block, CallArgs, Chunk, ConstKind, Expr, Field, FuncBody, FuncName, IfArm, NameId,
    Param, PrefixBase, PrefixExpr, Statement,
};
use crate::error::wrong_token;
use crate::lexer::TokenKind;
use crate::stream::TokenStream;

/// Binding strength of a binary operator, or `None` for non-operators.
fn binary_precedence(op: &str) -> Option<u8> {
    Some(match op {
        "or" => 0,
        "and" => 1,
        "<" | ">" | "<=" | ">=" | "~=" | "==" => 2,
        "|" => 3,
        "~" => 4,
        "&" => 5,
        "<<" | ">>" => 6,
        ".." => 7,
        "+" | "-" => 8,
        "*" | "/" | "//" | "%" => 9,
        "^" => 11,
        _ => return None,
    })
}

/// Unary operators bind tighter than everything except `^`.
const UNARY_PRECEDENCE: u8 = 10;

fn is_right_assoc(op: &str) -> bool {
    op == ".." || op == "^"
}

fn is_unary_op(op: &str) -> bool {
    matches!(op, "-" | "not" | "#" | "~")
}

/// The rough shape of an accessor at some lookahead position, used to
/// classify prefix-led statements before parsing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessorShape {
    /// `.name` or `[expr]`
    TableGet,
    /// `(args)`, a string argument, or a table argument
    CallLike,
    /// `:name(args)`
    MethodLike,
}

/// One entry of the expression parser's stack.
enum ExpEntry {
    Operand(Expr),
    Binary { op: String, precedence: u8 },
    Unary { op: String },
}

impl ExpEntry {
    fn precedence(&self) -> Option<u8> {
        match self {
            ExpEntry::Operand(_) => None,
            ExpEntry::Binary { precedence, .. } => Some(*precedence),
            ExpEntry::Unary { .. } => Some(UNARY_PRECEDENCE),
        }
    }

    fn right_assoc(&self) -> bool {
        match self {
            ExpEntry::Binary { op, .. } => is_right_assoc(op),
            _ => false,
        }
    }
}

/// Parser over a buffered token stream.
///
/// Every renameable identifier occurrence is appended to the name table
/// as it is parsed, so distinct occurrences of the same name get
/// distinct [`NameId`] handles.
pub struct Parser<'a> {
    stream: TokenStream<'a>,
    names: Vec<String>,
}

impl<'a> Parser<'a> {
    /// Create a parser over the given source.
    pub fn new(source: &'a str) -> Self {
        Parser {
            stream: TokenStream::new(source),
            names: Vec::new(),
        }
    }

    /// Parse a complete chunk. The whole input must be consumed.
    pub fn parse_chunk(mut self) -> Result<Chunk, LuaError> {
        let block = self.parse_block()?;
        if !self.stream.peek(0)?.is_eof() {
            let token = self.stream.next_token()?;
            return Err(wrong_token(&token, "end of input", None));
        }
        Ok(Chunk {
            block,
            names: self.names,
        })
    }

    fn intern(&mut self, text: &str) -> NameId {
        self.names.push(text.to_string());
        NameId((self.names.len() - 1) as u32)
    }

    // ---- token helpers ----

    fn expect_terminal(&mut self, text: &str, after: Option<&str>) -> Result<(), LuaError> {
        let token = self.stream.next_token()?;
        if token.is(text) {
            Ok(())
        } else {
            Err(wrong_token(&token, &format!("'{}'", text), after))
        }
    }

    fn expect_name(&mut self, after: Option<&str>) -> Result<NameId, LuaError> {
        let token = self.stream.next_token()?;
        if token.kind == TokenKind::Identifier {
            Ok(self.intern(&token.text))
        } else {
            Err(wrong_token(&token, "variable name", after))
        }
    }

    /// A name in a position where renaming never applies: field access,
    /// method names, named table keys, the tail of a function name.
    fn expect_raw_name(&mut self, after: Option<&str>) -> Result<String, LuaError> {
        let token = self.stream.next_token()?;
        if token.kind == TokenKind::Identifier {
            Ok(token.text)
        } else {
            Err(wrong_token(&token, "variable name", after))
        }
    }

    // ---- statements ----

    fn parse_block(&mut self) -> Result<Block, LuaError> {
        let mut statements = Vec::new();
        loop {
            let token = self.stream.peek(0)?;
            let kind = token.kind;
            let text = token.text.clone();
            match (kind, text.as_str()) {
                (TokenKind::Keyword, "return") => {
                    statements.push(self.parse_return()?);
                    break;
                }
                (TokenKind::Keyword, "break") => {
                    self.stream.next_token()?;
                    statements.push(Statement::Break);
                }
                (TokenKind::Keyword, "goto") => {
                    self.stream.next_token()?;
                    let name = self.expect_name(Some("'goto'"))?;
                    statements.push(Statement::Goto(name));
                }
                (TokenKind::Keyword, "do") => {
                    self.stream.next_token()?;
                    let body = self.parse_block()?;
                    self.expect_terminal("end", None)?;
                    statements.push(Statement::Do(body));
                }
                (TokenKind::Keyword, "while") => statements.push(self.parse_while()?),
                (TokenKind::Keyword, "repeat") => statements.push(self.parse_repeat()?),
                (TokenKind::Keyword, "if") => statements.push(self.parse_if()?),
                (TokenKind::Keyword, "for") => statements.push(self.parse_for()?),
                (TokenKind::Keyword, "function") => statements.push(self.parse_function()?),
                (TokenKind::Keyword, "local") => statements.push(self.parse_local()?),
                (TokenKind::Other, "::") => statements.push(self.parse_label()?),
                (TokenKind::Punct, ";") => {
                    self.stream.next_token()?;
                    statements.push(Statement::Empty);
                }
                (TokenKind::Identifier, _) | (TokenKind::Punct, "(") => {
                    statements.push(self.parse_call_or_assign()?);
                }
                _ => break,
            }
        }
        Ok(Block { statements })
    }

    fn parse_return(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let values = self.parse_exp_list(false, false, "'return'")?;
        if self.stream.peek(0)?.is(";") {
            self.stream.next_token()?;
        }
        Ok(Statement::Return(values))
    }

    fn parse_while(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let condition = self.parse_required_expression("'while'")?;
        self.expect_terminal("do", Some("expression"))?;
        let body = self.parse_block()?;
        self.expect_terminal("end", None)?;
        Ok(Statement::While { condition, body })
    }

    fn parse_repeat(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let body = self.parse_block()?;
        self.expect_terminal("until", None)?;
        let condition = self.parse_required_expression("'until'")?;
        Ok(Statement::Repeat { body, condition })
    }

    fn parse_if(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let mut arms = vec![self.parse_if_arm("'if'")?];
        let mut else_body = None;
        loop {
            let token = self.stream.peek(0)?;
            if token.is("elseif") {
                self.stream.next_token()?;
                arms.push(self.parse_if_arm("'elseif'")?);
            } else if token.is("else") {
                self.stream.next_token()?;
                else_body = Some(self.parse_block()?);
                break;
            } else {
                break;
            }
        }
        self.expect_terminal("end", None)?;
        Ok(Statement::If { arms, else_body })
    }

    fn parse_if_arm(&mut self, after: &str) -> Result<IfArm, LuaError> {
        let condition = self.parse_required_expression(after)?;
        self.expect_terminal("then", Some("expression"))?;
        let body = self.parse_block()?;
        Ok(IfArm { condition, body })
    }

    /// Both `for` forms start with `for Name`; the third token picks the
    /// production.
    fn parse_for(&mut self) -> Result<Statement, LuaError> {
        if self.stream.peek(2)?.is("=") {
            self.parse_numeric_for()
        } else {
            self.parse_generic_for()
        }
    }

    fn parse_numeric_for(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let var = self.expect_name(Some("'for'"))?;
        self.expect_terminal("=", Some("variable name"))?;
        let start = self.parse_required_expression("'='")?;
        self.expect_terminal(",", Some("expression"))?;
        let stop = self.parse_required_expression("','")?;
        let step = if self.stream.peek(0)?.is(",") {
            self.stream.next_token()?;
            Some(self.parse_required_expression("','")?)
        } else {
            None
        };
        self.expect_terminal("do", Some("expression"))?;
        let body = self.parse_block()?;
        self.expect_terminal("end", None)?;
        Ok(Statement::NumericFor {
            var,
            start,
            stop,
            step,
            body,
        })
    }

    fn parse_generic_for(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let names = self.parse_name_list("'for'")?;
        self.expect_terminal("in", Some("variable name"))?;
        let exprs = self.parse_exp_list(true, true, "'in'")?;
        self.expect_terminal("do", Some("expression"))?;
        let body = self.parse_block()?;
        self.expect_terminal("end", None)?;
        Ok(Statement::GenericFor { names, exprs, body })
    }

    fn parse_function(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let first = self.expect_name(Some("'function'"))?;
        let mut rest = Vec::new();
        while self.stream.peek(0)?.is(".") {
            self.stream.next_token()?;
            rest.push(self.expect_raw_name(Some("'.'"))?);
        }
        let method = if self.stream.peek(0)?.is(":") {
            self.stream.next_token()?;
            Some(self.expect_raw_name(Some("':'"))?)
        } else {
            None
        };
        let body = self.parse_func_body()?;
        Ok(Statement::Function {
            name: FuncName {
                first,
                rest,
                method,
            },
            body,
        })
    }

    fn parse_local(&mut self) -> Result<Statement, LuaError> {
        if self.stream.peek(1)?.is("function") {
            self.stream.next_token()?;
            self.stream.next_token()?;
            let name = self.expect_name(Some("'function'"))?;
            let body = self.parse_func_body()?;
            return Ok(Statement::LocalFunction { name, body });
        }
        self.stream.next_token()?;
        let names = self.parse_name_list("'local'")?;
        let values = if self.stream.peek(0)?.is("=") {
            self.stream.next_token()?;
            self.parse_exp_list(true, true, "'='")?
        } else {
            Vec::new()
        };
        Ok(Statement::LocalAssign { names, values })
    }

    fn parse_label(&mut self) -> Result<Statement, LuaError> {
        self.stream.next_token()?;
        let name = self.expect_name(Some("'::'"))?;
        self.expect_terminal("::", Some("variable name"))?;
        Ok(Statement::Label(name))
    }

    /// A statement led by a prefix expression is a call statement when
    /// the chain's last accessor is a call or method call; otherwise it
    /// is the first target of an assignment.
    fn parse_call_or_assign(&mut self) -> Result<Statement, LuaError> {
        if self.is_call_statement()? {
            let prefix = self.parse_prefix_expr()?;
            return Ok(Statement::Call(prefix));
        }
        let mut targets = vec![self.parse_variable()?];
        while self.stream.peek(0)?.is(",") {
            self.stream.next_token()?;
            targets.push(self.parse_variable()?);
        }
        self.expect_terminal("=", Some("variable"))?;
        let values = self.parse_exp_list(true, true, "'='")?;
        Ok(Statement::Assign { targets, values })
    }

    fn parse_variable(&mut self) -> Result<PrefixExpr, LuaError> {
        if !self.variable_starts()? {
            let token = self.stream.next_token()?;
            return Err(wrong_token(&token, "variable", None));
        }
        let start = self.stream.peek(0)?.clone();
        let prefix = self.parse_prefix_expr()?;
        if prefix.is_variable() {
            Ok(prefix)
        } else {
            Err(wrong_token(&start, "variable", None))
        }
    }

    // ---- lists ----

    fn parse_name_list(&mut self, after: &str) -> Result<Vec<NameId>, LuaError> {
        let mut names = vec![self.expect_name(Some(after))?];
        while self.stream.peek(0)?.is(",") {
            self.stream.next_token()?;
            names.push(self.expect_name(Some("','"))?);
        }
        Ok(names)
    }

    /// Parse a comma-separated expression list.
    ///
    /// When `required`, an empty list is an error. When `greedy`, a comma
    /// must be followed by another expression; otherwise a trailing comma
    /// is left unconsumed for the caller to reject.
    fn parse_exp_list(
        &mut self,
        required: bool,
        greedy: bool,
        after: &str,
    ) -> Result<Vec<Expr>, LuaError> {
        let mut exprs = Vec::new();
        if !self.expression_starts(0)? {
            if required {
                let token = self.stream.next_token()?;
                return Err(wrong_token(&token, "expression", Some(after)));
            }
            return Ok(exprs);
        }
        exprs.push(self.parse_expression()?);
        while self.stream.peek(0)?.is(",") {
            if self.expression_starts(1)? {
                self.stream.next_token()?;
                exprs.push(self.parse_expression()?);
            } else if greedy {
                self.stream.next_token()?;
                let token = self.stream.next_token()?;
                return Err(wrong_token(&token, "expression", Some("','")));
            } else {
                break;
            }
        }
        Ok(exprs)
    }

    // ---- expressions ----

    /// Whether an expression can start at lookahead position `index`.
    fn expression_starts(&mut self, index: usize) -> Result<bool, LuaError> {
        let token = self.stream.peek(index)?;
        Ok(match (token.kind, token.text.as_str()) {
            (TokenKind::Str, _) | (TokenKind::Numeral, _) | (TokenKind::Identifier, _) => true,
            (TokenKind::Keyword, "nil" | "true" | "false" | "function") => true,
            (TokenKind::Punct, "(" | "{") => true,
            (TokenKind::Other, "...") => true,
            (TokenKind::Operator, op) => is_unary_op(op),
            _ => false,
        })
    }

    fn parse_required_expression(&mut self, after: &str) -> Result<Expr, LuaError> {
        if !self.expression_starts(0)? {
            let token = self.stream.next_token()?;
            return Err(wrong_token(&token, "expression", Some(after)));
        }
        self.parse_expression()
    }

    fn parse_expression(&mut self) -> Result<Expr, LuaError> {
        let mut stack: Vec<ExpEntry> = Vec::new();
        loop {
            loop {
                let token = self.stream.peek(0)?;
                if token.kind == TokenKind::Operator && is_unary_op(&token.text) {
                    let token = self.stream.next_token()?;
                    stack.push(ExpEntry::Unary { op: token.text });
                } else {
                    break;
                }
            }

            let operand = self.parse_operand()?;
            stack.push(ExpEntry::Operand(operand));

            let token = self.stream.peek(0)?;
            let next_op = if token.kind == TokenKind::Operator {
                binary_precedence(&token.text).map(|precedence| (token.text.clone(), precedence))
            } else {
                None
            };
            match next_op {
                Some((op, precedence)) => {
                    self.stream.next_token()?;
                    Self::reduce_stack(&mut stack, Some(precedence));
                    stack.push(ExpEntry::Binary { op, precedence });
                }
                None => {
                    Self::reduce_stack(&mut stack, None);
                    break;
                }
            }
        }
        match stack.pop() {
            Some(ExpEntry::Operand(expr)) => Ok(expr),
            _ => unreachable!("reduction always leaves a single operand"),
        }
    }

    /// Combine completed subtrees on the stack. With `Some(precedence)`,
    /// reduce while the operator below the top binds strictly tighter
    /// than the incoming operator, or equally tight and right-associative;
    /// with `None`, reduce everything.
    fn reduce_stack(stack: &mut Vec<ExpEntry>, incoming: Option<u8>) {
        while stack.len() > 1 {
            let below = &stack[stack.len() - 2];
            let below_precedence = match below.precedence() {
                Some(p) => p,
                None => break,
            };
            if let Some(incoming) = incoming {
                let wins = below_precedence > incoming
                    || (below_precedence == incoming && below.right_assoc());
                if !wins {
                    break;
                }
            }
            let right = match stack.pop() {
                Some(ExpEntry::Operand(expr)) => expr,
                _ => unreachable!("operator entries always sit below an operand"),
            };
            match stack.pop() {
                Some(ExpEntry::Binary { op, .. }) => {
                    let left = match stack.pop() {
                        Some(ExpEntry::Operand(expr)) => expr,
                        _ => unreachable!("binary operator always has a left operand"),
                    };
                    stack.push(ExpEntry::Operand(Expr::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    }));
                }
                Some(ExpEntry::Unary { op }) => {
                    stack.push(ExpEntry::Operand(Expr::Unary {
                        op,
                        operand: Box::new(right),
                    }));
                }
                _ => unreachable!(),
            }
        }
    }

    fn parse_operand(&mut self) -> Result<Expr, LuaError> {
        let token = self.stream.peek(0)?;
        match (token.kind, token.text.as_str()) {
            (TokenKind::Keyword, "nil") => self.parse_const(ConstKind::Nil),
            (TokenKind::Keyword, "true" | "false") => self.parse_const(ConstKind::Boolean),
            (TokenKind::Str, _) => self.parse_const(ConstKind::Str),
            (TokenKind::Numeral, _) => {
                let kind = classify_numeral(&token.text);
                self.parse_const(kind)
            }
            (TokenKind::Keyword, "function") => {
                self.stream.next_token()?;
                Ok(Expr::Function(self.parse_func_body()?))
            }
            (TokenKind::Punct, "{") => Ok(Expr::Table(self.parse_table_fields()?)),
            (TokenKind::Other, "...") => {
                self.stream.next_token()?;
                Ok(Expr::Vararg)
            }
            (TokenKind::Identifier, _) | (TokenKind::Punct, "(") => {
                Ok(Expr::Prefix(self.parse_prefix_expr()?))
            }
            _ => {
                let token = self.stream.next_token()?;
                Err(wrong_token(&token, "operand", None))
            }
        }
    }

    fn parse_const(&mut self, kind: ConstKind) -> Result<Expr, LuaError> {
        let token = self.stream.next_token()?;
        Ok(Expr::Const {
            text: token.text,
            kind,
        })
    }

    // ---- prefix expressions ----

    fn parse_prefix_expr(&mut self) -> Result<PrefixExpr, LuaError> {
        let token = self.stream.peek(0)?;
        let base = if token.kind == TokenKind::Identifier {
            let token = self.stream.next_token()?;
            PrefixBase::Name(self.intern(&token.text))
        } else if token.is("(") {
            self.stream.next_token()?;
            let inner = self.parse_required_expression("'('")?;
            self.expect_terminal(")", Some("expression"))?;
            PrefixBase::Paren(Box::new(inner))
        } else {
            let token = self.stream.next_token()?;
            return Err(wrong_token(&token, "variable", None));
        };

        let mut accessors = Vec::new();
        loop {
            let token = self.stream.peek(0)?;
            match (token.kind, token.text.as_str()) {
                (TokenKind::Str, _) => {
                    let token = self.stream.next_token()?;
                    accessors.push(Accessor::Call(CallArgs::Str(token.text)));
                }
                (TokenKind::Other, ".") => {
                    self.stream.next_token()?;
                    accessors.push(Accessor::Field(self.expect_raw_name(Some("'.'"))?));
                }
                (TokenKind::Punct, "[") => {
                    self.stream.next_token()?;
                    let index = self.parse_required_expression("'['")?;
                    self.expect_terminal("]", Some("expression"))?;
                    accessors.push(Accessor::Index(index));
                }
                (TokenKind::Punct, "(") => {
                    accessors.push(Accessor::Call(self.parse_paren_args()?));
                }
                (TokenKind::Punct, "{") => {
                    accessors.push(Accessor::Call(CallArgs::Table(self.parse_table_fields()?)));
                }
                (TokenKind::Other, ":") => {
                    self.stream.next_token()?;
                    let name = self.expect_raw_name(Some("':'"))?;
                    let args = self.parse_method_args()?;
                    accessors.push(Accessor::Method { name, args });
                }
                _ => break,
            }
        }
        Ok(PrefixExpr { base, accessors })
    }

    fn parse_paren_args(&mut self) -> Result<CallArgs, LuaError> {
        self.stream.next_token()?;
        let args = self.parse_exp_list(false, false, "'('")?;
        self.expect_terminal(")", None)?;
        Ok(CallArgs::List(args))
    }

    fn parse_method_args(&mut self) -> Result<CallArgs, LuaError> {
        let token = self.stream.peek(0)?;
        match (token.kind, token.text.as_str()) {
            (TokenKind::Punct, "(") => self.parse_paren_args(),
            (TokenKind::Punct, "{") => Ok(CallArgs::Table(self.parse_table_fields()?)),
            (TokenKind::Str, _) => {
                let token = self.stream.next_token()?;
                Ok(CallArgs::Str(token.text))
            }
            _ => {
                let token = self.stream.next_token()?;
                Err(wrong_token(&token, "function arguments", Some("method name")))
            }
        }
    }

    // ---- tables and function bodies ----

    fn field_starts(&mut self, index: usize) -> Result<bool, LuaError> {
        Ok(self.stream.peek(index)?.is("[") || self.expression_starts(index)?)
    }

    fn parse_table_fields(&mut self) -> Result<Vec<Field>, LuaError> {
        self.stream.next_token()?;
        let mut fields = Vec::new();
        if self.field_starts(0)? {
            fields.push(self.parse_field()?);
            loop {
                let token = self.stream.peek(0)?;
                if !token.is(",") && !token.is(";") {
                    break;
                }
                if self.field_starts(1)? {
                    self.stream.next_token()?;
                    fields.push(self.parse_field()?);
                } else {
                    // single trailing separator
                    self.stream.next_token()?;
                    break;
                }
            }
        }
        self.expect_terminal("}", None)?;
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<Field, LuaError> {
        let token = self.stream.peek(0)?;
        if token.is("[") {
            self.stream.next_token()?;
            let key = self.parse_required_expression("'['")?;
            self.expect_terminal("]", Some("expression"))?;
            self.expect_terminal("=", Some("']'"))?;
            let value = self.parse_required_expression("'='")?;
            return Ok(Field::Indexed { key, value });
        }
        if token.kind == TokenKind::Identifier && self.stream.peek(1)?.is("=") {
            let token = self.stream.next_token()?;
            let key = token.text;
            self.stream.next_token()?;
            let value = self.parse_required_expression("'='")?;
            return Ok(Field::Named { key, value });
        }
        Ok(Field::Positional(self.parse_expression()?))
    }

    fn parse_func_body(&mut self) -> Result<FuncBody, LuaError> {
        self.expect_terminal("(", None)?;
        let mut params = Vec::new();
        let token = self.stream.peek(0)?;
        if token.kind == TokenKind::Identifier {
            let token = self.stream.next_token()?;
            let id = self.intern(&token.text);
            params.push(Param::Name(id));
            while self.stream.peek(0)?.is(",") && self.stream.peek(1)?.kind == TokenKind::Identifier
            {
                self.stream.next_token()?;
                let token = self.stream.next_token()?;
                let id = self.intern(&token.text);
                params.push(Param::Name(id));
            }
            if self.stream.peek(0)?.is(",") {
                self.stream.next_token()?;
                let token = self.stream.next_token()?;
                if token.is("...") {
                    params.push(Param::Vararg);
                } else {
                    return Err(wrong_token(
                        &token,
                        "variable name or vararg expression",
                        Some("','"),
                    ));
                }
            }
        } else if token.is("...") {
            self.stream.next_token()?;
            params.push(Param::Vararg);
        }
        self.expect_terminal(")", None)?;
        let body = self.parse_block()?;
        self.expect_terminal("end", None)?;
        Ok(FuncBody { params, body })
    }

    // ---- prefix-led statement classification ----

    /// Lookahead position of the last accessor of the prefix expression
    /// starting at `index`, or `index` itself when no prefix expression
    /// starts there. When the chain has no accessors the position just
    /// past the base is returned.
    fn skip_prefix(&mut self, index: usize) -> Result<usize, LuaError> {
        let mut after_base = self.skip_name(index)?;
        if after_base == index {
            after_base = self.stream.skip_matching("(", ")", index)?;
        }
        if after_base == index {
            return Ok(index);
        }
        let mut last = after_base;
        while let Some(shape) = self.accessor_shape_at(last)? {
            let next = self.skip_accessor(last, shape)?;
            if self.accessor_shape_at(next)?.is_some() {
                last = next;
            } else {
                break;
            }
        }
        Ok(last)
    }

    fn skip_name(&mut self, index: usize) -> Result<usize, LuaError> {
        if self.stream.peek(index)?.kind == TokenKind::Identifier {
            Ok(index + 1)
        } else {
            Ok(index)
        }
    }

    fn accessor_shape_at(&mut self, index: usize) -> Result<Option<AccessorShape>, LuaError> {
        let token = self.stream.peek(index)?;
        Ok(match (token.kind, token.text.as_str()) {
            (TokenKind::Str, _) => Some(AccessorShape::CallLike),
            (TokenKind::Other, ".") => Some(AccessorShape::TableGet),
            (TokenKind::Punct, "[") => Some(AccessorShape::TableGet),
            (TokenKind::Punct, "(" | "{") => Some(AccessorShape::CallLike),
            (TokenKind::Other, ":") => Some(AccessorShape::MethodLike),
            _ => None,
        })
    }

    /// Position just past the accessor starting at `index`.
    fn skip_accessor(&mut self, index: usize, shape: AccessorShape) -> Result<usize, LuaError> {
        match shape {
            AccessorShape::TableGet => {
                if self.stream.peek(index)?.is(".") {
                    self.skip_name(index + 1)
                } else {
                    self.stream.skip_matching("[", "]", index)
                }
            }
            AccessorShape::CallLike => self.skip_call_args(index),
            AccessorShape::MethodLike => {
                let after_name = self.skip_name(index + 1)?;
                self.skip_call_args(after_name)
            }
        }
    }

    fn skip_call_args(&mut self, index: usize) -> Result<usize, LuaError> {
        let token = self.stream.peek(index)?;
        if token.kind == TokenKind::Str {
            Ok(index + 1)
        } else if token.is("(") {
            self.stream.skip_matching("(", ")", index)
        } else if token.is("{") {
            self.stream.skip_matching("{", "}", index)
        } else {
            Ok(index)
        }
    }

    fn is_call_statement(&mut self) -> Result<bool, LuaError> {
        let last = self.skip_prefix(0)?;
        if last == 0 {
            return Ok(false);
        }
        Ok(matches!(
            self.accessor_shape_at(last)?,
            Some(AccessorShape::CallLike) | Some(AccessorShape::MethodLike)
        ))
    }

    fn variable_starts(&mut self) -> Result<bool, LuaError> {
        let last = self.skip_prefix(0)?;
        if last == 0 {
            return Ok(false);
        }
        match self.accessor_shape_at(last)? {
            Some(AccessorShape::TableGet) => Ok(true),
            Some(_) => Ok(false),
            None => Ok(self.stream.peek(0)?.kind == TokenKind::Identifier),
        }
    }
}

/// A numeral is a float exactly when its literal text contains a decimal
/// point or an exponent marker.
fn classify_numeral(text: &str) -> ConstKind {
    if text.contains(['.', 'e', 'E', 'p', 'P']) {
        ConstKind::Float
    } else {
        ConstKind::Int
    }
}
