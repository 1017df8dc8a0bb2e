//! Abstract syntax tree for Monkey programs.
//!
//! Every node owns the literal token text that produced it. That text is
//! only used for diagnostics; evaluation never looks at it. Ownership is
//! tree-shaped except for function bodies, which sit behind an `Rc` so every
//! closure created from one literal can share it.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

/// Access to the token text a node was built from.
pub trait Node {
    fn token_literal(&self) -> &str;
}

/// Root of a parsed program.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |statement| statement.token_literal())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let {
        token: String,
        name: Identifier,
        value: Expression,
    },

    /// `return <value>;`
    Return {
        token: String,
        return_value: Expression,
    },

    /// A bare expression used as a statement.
    Expression {
        token: String,
        expression: Expression,
    },
}

impl Node for Statement {
    fn token_literal(&self) -> &str {
        match self {
            Statement::Let { token, .. }
            | Statement::Return { token, .. }
            | Statement::Expression { token, .. } => token,
        }
    }
}

/// `{ <statements> }`, the body of functions and `if` branches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatement {
    pub token: String,
    pub statements: Vec<Statement>,
}

impl Node for BlockStatement {
    fn token_literal(&self) -> &str {
        &self.token
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub token: String,
    pub value: String,
}

impl Identifier {
    pub fn new<S: Into<String>>(name: S) -> Self {
        let value: String = name.into();

        Identifier {
            token: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOperator {
    /// `!`
    Bang,
    /// `-`
    Minus,
}

impl PrefixOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixOperator::Bang => "!",
            PrefixOperator::Minus => "-",
        }
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl InfixOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Asterisk => "*",
            InfixOperator::Slash => "/",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
        }
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// Variable reference.
    Identifier(Identifier),

    /// `5`
    IntegerLiteral { token: String, value: i64 },

    /// `true` / `false`
    Boolean { token: String, value: bool },

    /// `!x`, `-x`
    Prefix {
        token: String,
        operator: PrefixOperator,
        right: Box<Expression>,
    },

    /// `a + b`, `a == b`, …
    Infix {
        token: String,
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },

    /// `if (<condition>) { … } else { … }`
    If {
        token: String,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },

    /// `fn(<parameters>) { <body> }`
    FunctionLiteral {
        token: String,
        parameters: Vec<Identifier>,
        body: Rc<BlockStatement>,
    },

    /// `<function>(<arguments>)`
    Call {
        token: String,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(identifier) => &identifier.token,
            Expression::IntegerLiteral { token, .. }
            | Expression::Boolean { token, .. }
            | Expression::Prefix { token, .. }
            | Expression::Infix { token, .. }
            | Expression::If { token, .. }
            | Expression::FunctionLiteral { token, .. }
            | Expression::Call { token, .. } => token,
        }
    }
}
