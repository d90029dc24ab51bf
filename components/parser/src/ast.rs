//! Abstract syntax tree for Lua chunks.
//!
//! Identifier occurrences that can participate in renaming are not stored
//! as strings in the tree. Each occurrence gets a [`NameId`] into the
//! chunk's name table, one slot per occurrence. The scope analyzer groups
//! slots that resolve to the same binding, and the renamer rewrites the
//! table in place; the tree itself never changes shape. Identifiers that
//! can never be renamed (field names after `.`, method names, named table
//! keys) are kept as plain strings.

/// Handle to one identifier occurrence in [`Chunk::names`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameId(pub u32);

impl NameId {
    /// The table index this handle refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A parsed Lua chunk: the top-level block plus the name table all
/// [`NameId`] handles point into.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The top-level statement block
    pub block: Block,
    /// Current text of every identifier occurrence, indexed by [`NameId`]
    pub names: Vec<String>,
}

impl Chunk {
    /// The current text of an identifier occurrence.
    pub fn name(&self, id: NameId) -> &str {
        &self.names[id.index()]
    }

    /// Render the tree as an indented box-drawing diagram, one node per
    /// line. Used by the CLI's AST dump.
    pub fn tree(&self) -> String {
        let node = tree::chunk_node(self);
        let mut out = String::new();
        tree::render(&node, "", true, true, &mut out);
        out
    }
}

/// A sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Statements in source order
    pub statements: Vec<Statement>,
}

/// A single Lua statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A function or method call in statement position
    Call(PrefixExpr),
    /// `targets = values`
    Assign {
        /// Assignment targets, each a variable-shaped prefix expression
        targets: Vec<PrefixExpr>,
        /// Right-hand side expressions
        values: Vec<Expr>,
    },
    /// `local names = values` (values may be empty)
    LocalAssign {
        /// Declared names
        names: Vec<NameId>,
        /// Initializer expressions
        values: Vec<Expr>,
    },
    /// `function name.path:method(...) ... end`
    Function {
        /// The dotted function name
        name: FuncName,
        /// Parameters and body
        body: FuncBody,
    },
    /// `local function name(...) ... end`
    LocalFunction {
        /// The declared local name
        name: NameId,
        /// Parameters and body
        body: FuncBody,
    },
    /// `do ... end`
    Do(Block),
    /// `while condition do ... end`
    While {
        /// Loop condition, evaluated in the enclosing scope
        condition: Expr,
        /// Loop body
        body: Block,
    },
    /// `repeat ... until condition`
    Repeat {
        /// Loop body
        body: Block,
        /// Loop condition; sees names declared in the body
        condition: Expr,
    },
    /// `for var = start, stop [, step] do ... end`
    NumericFor {
        /// The control variable, scoped to the body
        var: NameId,
        /// Initial value
        start: Expr,
        /// Limit value
        stop: Expr,
        /// Optional step value
        step: Option<Expr>,
        /// Loop body
        body: Block,
    },
    /// `for names in exprs do ... end`
    GenericFor {
        /// Control variables, scoped to the body
        names: Vec<NameId>,
        /// Iterator expressions, evaluated in the enclosing scope
        exprs: Vec<Expr>,
        /// Loop body
        body: Block,
    },
    /// `if ... then ... [elseif ...]* [else ...] end`
    If {
        /// The `if` arm followed by any `elseif` arms
        arms: Vec<IfArm>,
        /// The `else` block, if present
        else_body: Option<Block>,
    },
    /// `::name::`
    Label(NameId),
    /// `goto name`
    Goto(NameId),
    /// `break`
    Break,
    /// `return exprs` (always the last statement of its block)
    Return(Vec<Expr>),
    /// A bare `;`
    Empty,
}

/// One `if`/`elseif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct IfArm {
    /// Branch condition, evaluated in the enclosing scope
    pub condition: Expr,
    /// Branch body
    pub body: Block,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `nil`, `true`, `false`, a string literal or a numeral, kept as raw
    /// source text
    Const {
        /// Raw source text of the literal
        text: String,
        /// Literal classification
        kind: ConstKind,
    },
    /// `...`
    Vararg,
    /// An anonymous `function (...) ... end`
    Function(FuncBody),
    /// A table constructor `{ ... }`
    Table(Vec<Field>),
    /// A variable, call or parenthesized expression with accessors
    Prefix(PrefixExpr),
    /// `left op right`
    Binary {
        /// Operator text (`+`, `..`, `and`, ...)
        op: String,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
    /// `op operand`
    Unary {
        /// Operator text (`-`, `not`, `#`, `~`)
        op: String,
        /// The operand
        operand: Box<Expr>,
    },
}

/// Classification of a constant literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstKind {
    /// `nil`
    Nil,
    /// `true` or `false`
    Boolean,
    /// A string literal
    Str,
    /// An integer numeral
    Int,
    /// A float numeral: the literal contains `.`, `e`, `E`, `p` or `P`
    Float,
}

/// A prefix expression: a base followed by a chain of accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    /// The leading name or parenthesized expression
    pub base: PrefixBase,
    /// Accessors applied left to right
    pub accessors: Vec<Accessor>,
}

impl PrefixExpr {
    /// Whether the last accessor is a call or method call, which makes
    /// this prefix expression a valid statement on its own.
    pub fn ends_in_call(&self) -> bool {
        matches!(
            self.accessors.last(),
            Some(Accessor::Call(_)) | Some(Accessor::Method { .. })
        )
    }

    /// Whether this prefix expression is a valid assignment target: a
    /// bare name, or any chain ending in a field or index accessor.
    pub fn is_variable(&self) -> bool {
        match self.accessors.last() {
            Some(Accessor::Field(_)) | Some(Accessor::Index(_)) => true,
            Some(_) => false,
            None => matches!(self.base, PrefixBase::Name(_)),
        }
    }
}

/// The base of a prefix expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefixBase {
    /// A bare name
    Name(NameId),
    /// A parenthesized expression
    Paren(Box<Expr>),
}

/// One accessor in a prefix expression chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    /// `.name` (the name is never renamed)
    Field(String),
    /// `[expr]`
    Index(Expr),
    /// A call: `(args)`, a single string, or a single table
    Call(CallArgs),
    /// `:name(args)` (the name is never renamed)
    Method {
        /// Method name after the colon
        name: String,
        /// Call arguments
        args: CallArgs,
    },
}

/// Arguments of a call accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArgs {
    /// `(a, b, c)` (possibly empty)
    List(Vec<Expr>),
    /// A single table constructor, no parentheses
    Table(Vec<Field>),
    /// A single string literal, no parentheses
    Str(String),
}

/// One field of a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A positional value
    Positional(Expr),
    /// `name = value` (the key is never renamed)
    Named {
        /// Field key
        key: String,
        /// Field value
        value: Expr,
    },
    /// `[key] = value`
    Indexed {
        /// Key expression
        key: Expr,
        /// Field value
        value: Expr,
    },
}

/// One parameter of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A named parameter, declared in the function's scope
    Name(NameId),
    /// A trailing `...`
    Vararg,
}

/// Parameters and body shared by all function forms.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncBody {
    /// Parameter list
    pub params: Vec<Param>,
    /// Function body; opens its own scope
    pub body: Block,
}

/// The dotted name of a `function` statement.
///
/// Only the first segment is a variable use; the remaining segments and
/// the method name are field names and never renamed.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncName {
    /// The leading name (a variable use)
    pub first: NameId,
    /// `.name` segments after the first
    pub rest: Vec<String>,
    /// `:name` method segment, if present
    pub method: Option<String>,
}

mod tree {
    //! Box-drawing renderer behind [`Chunk::tree`].

    use super::*;

    pub(super) struct Node {
        label: String,
        children: Vec<Node>,
    }

    fn node(label: impl Into<String>, children: Vec<Node>) -> Node {
        Node {
            label: label.into(),
            children,
        }
    }

    fn leaf(label: impl Into<String>) -> Node {
        node(label, Vec::new())
    }

    pub(super) fn render(n: &Node, prefix: &str, is_root: bool, is_last: bool, out: &mut String) {
        if is_root {
            out.push_str(&n.label);
        } else {
            out.push_str(prefix);
            out.push_str(if is_last { "└── " } else { "├── " });
            out.push_str(&n.label);
        }
        out.push('\n');
        let child_prefix = if is_root {
            String::new()
        } else {
            format!("{}{}", prefix, if is_last { "    " } else { "│   " })
        };
        for (i, child) in n.children.iter().enumerate() {
            render(child, &child_prefix, false, i + 1 == n.children.len(), out);
        }
    }

    pub(super) fn chunk_node(chunk: &Chunk) -> Node {
        node("Chunk", vec![block_node(chunk, &chunk.block)])
    }

    fn block_node(chunk: &Chunk, block: &Block) -> Node {
        node(
            "Block",
            block.statements.iter().map(|s| stmt_node(chunk, s)).collect(),
        )
    }

    fn name_leaf(chunk: &Chunk, id: NameId) -> Node {
        leaf(format!("Name {}", chunk.name(id)))
    }

    fn stmt_node(chunk: &Chunk, stmt: &Statement) -> Node {
        match stmt {
            Statement::Call(prefix) => node("CallStatement", vec![prefix_node(chunk, prefix)]),
            Statement::Assign { targets, values } => {
                let mut children: Vec<Node> =
                    targets.iter().map(|t| prefix_node(chunk, t)).collect();
                children.extend(values.iter().map(|v| expr_node(chunk, v)));
                node("Assign", children)
            }
            Statement::LocalAssign { names, values } => {
                let mut children: Vec<Node> =
                    names.iter().map(|&n| name_leaf(chunk, n)).collect();
                children.extend(values.iter().map(|v| expr_node(chunk, v)));
                node("LocalAssign", children)
            }
            Statement::Function { name, body } => {
                let mut label = format!("Function {}", chunk.name(name.first));
                for part in &name.rest {
                    label.push('.');
                    label.push_str(part);
                }
                if let Some(method) = &name.method {
                    label.push(':');
                    label.push_str(method);
                }
                node(label, vec![body_node(chunk, body)])
            }
            Statement::LocalFunction { name, body } => node(
                format!("LocalFunction {}", chunk.name(*name)),
                vec![body_node(chunk, body)],
            ),
            Statement::Do(block) => node("Do", vec![block_node(chunk, block)]),
            Statement::While { condition, body } => node(
                "While",
                vec![expr_node(chunk, condition), block_node(chunk, body)],
            ),
            Statement::Repeat { body, condition } => node(
                "Repeat",
                vec![block_node(chunk, body), expr_node(chunk, condition)],
            ),
            Statement::NumericFor {
                var,
                start,
                stop,
                step,
                body,
            } => {
                let mut children = vec![
                    name_leaf(chunk, *var),
                    expr_node(chunk, start),
                    expr_node(chunk, stop),
                ];
                if let Some(step) = step {
                    children.push(expr_node(chunk, step));
                }
                children.push(block_node(chunk, body));
                node("NumericFor", children)
            }
            Statement::GenericFor { names, exprs, body } => {
                let mut children: Vec<Node> =
                    names.iter().map(|&n| name_leaf(chunk, n)).collect();
                children.extend(exprs.iter().map(|e| expr_node(chunk, e)));
                children.push(block_node(chunk, body));
                node("GenericFor", children)
            }
            Statement::If { arms, else_body } => {
                let mut children = Vec::new();
                for arm in arms {
                    children.push(expr_node(chunk, &arm.condition));
                    children.push(block_node(chunk, &arm.body));
                }
                if let Some(else_body) = else_body {
                    children.push(node("Else", vec![block_node(chunk, else_body)]));
                }
                node("If", children)
            }
            Statement::Label(name) => leaf(format!("Label ::{}::", chunk.name(*name))),
            Statement::Goto(name) => leaf(format!("Goto {}", chunk.name(*name))),
            Statement::Break => leaf("Break"),
            Statement::Return(values) => node(
                "Return",
                values.iter().map(|v| expr_node(chunk, v)).collect(),
            ),
            Statement::Empty => leaf("Empty"),
        }
    }

    fn body_node(chunk: &Chunk, body: &FuncBody) -> Node {
        let mut children: Vec<Node> = body
            .params
            .iter()
            .map(|param| match param {
                Param::Name(id) => name_leaf(chunk, *id),
                Param::Vararg => leaf("Vararg"),
            })
            .collect();
        children.push(block_node(chunk, &body.body));
        node("Body", children)
    }

    fn expr_node(chunk: &Chunk, expr: &Expr) -> Node {
        match expr {
            Expr::Const { text, .. } => leaf(format!("Const {}", text)),
            Expr::Vararg => leaf("Vararg"),
            Expr::Function(body) => node("FunctionExpr", vec![body_node(chunk, body)]),
            Expr::Table(fields) => {
                node("Table", fields.iter().map(|f| field_node(chunk, f)).collect())
            }
            Expr::Prefix(prefix) => prefix_node(chunk, prefix),
            Expr::Binary { op, left, right } => node(
                format!("Binary {}", op),
                vec![expr_node(chunk, left), expr_node(chunk, right)],
            ),
            Expr::Unary { op, operand } => {
                node(format!("Unary {}", op), vec![expr_node(chunk, operand)])
            }
        }
    }

    fn prefix_node(chunk: &Chunk, prefix: &PrefixExpr) -> Node {
        let base = match &prefix.base {
            PrefixBase::Name(id) => name_leaf(chunk, *id),
            PrefixBase::Paren(expr) => node("Paren", vec![expr_node(chunk, expr)]),
        };
        if prefix.accessors.is_empty() {
            return base;
        }
        let mut children = vec![base];
        for accessor in &prefix.accessors {
            children.push(match accessor {
                Accessor::Field(name) => leaf(format!("Field .{}", name)),
                Accessor::Index(expr) => node("Index", vec![expr_node(chunk, expr)]),
                Accessor::Call(args) => node("Call", args_nodes(chunk, args)),
                Accessor::Method { name, args } => {
                    node(format!("Method :{}", name), args_nodes(chunk, args))
                }
            });
        }
        node("PrefixExpr", children)
    }

    fn args_nodes(chunk: &Chunk, args: &CallArgs) -> Vec<Node> {
        match args {
            CallArgs::List(exprs) => exprs.iter().map(|e| expr_node(chunk, e)).collect(),
            CallArgs::Table(fields) => fields.iter().map(|f| field_node(chunk, f)).collect(),
            CallArgs::Str(text) => vec![leaf(format!("Const {}", text))],
        }
    }

    fn field_node(chunk: &Chunk, field: &Field) -> Node {
        match field {
            Field::Positional(expr) => expr_node(chunk, expr),
            Field::Named { key, value } => {
                node(format!("NamedField {}", key), vec![expr_node(chunk, value)])
            }
            Field::Indexed { key, value } => node(
                "IndexedField",
                vec![expr_node(chunk, key), expr_node(chunk, value)],
            ),
        }
    }
}
