use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::ast_printer::AstPrinter;
use crate::environment::Env;
use crate::error::RuntimeError;

/// The canonical `true`.
pub const TRUE: Value = Value::Boolean(true);

/// The canonical `false`.
pub const FALSE: Value = Value::Boolean(false);

/// The canonical `null`.
pub const NULL: Value = Value::Null;

/// Everything the evaluator can produce.
///
/// `ReturnValue` and `Error` are control signals: they unwind evaluation and
/// are never meant to be bound to a name.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    Function(Rc<Function>),
    ReturnValue(Box<Value>),
    Error(RuntimeError),
}

/// A closure: parameters and body of a function literal together with the
/// scope that was active where the literal was evaluated.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Env,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.parameters.iter().map(|p| p.value.as_str()).collect();

        f.debug_struct("Function")
            .field("parameters", &names)
            .field("body", &AstPrinter::block(&self.body))
            .finish_non_exhaustive()
    }
}

/// Runtime type tag, as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Boolean,
    Null,
    Function,
    ReturnValue,
    Error,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Integer => "INTEGER",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Null => "NULL",
            ValueType::Function => "FUNCTION",
            ValueType::ReturnValue => "RETURN_VALUE",
            ValueType::Error => "ERROR",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::Function(_) => ValueType::Function,
            Value::ReturnValue(_) => ValueType::ReturnValue,
            Value::Error(_) => ValueType::Error,
        }
    }

    /// Everything except `false` and `null` counts as true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Identity comparison used by `==` and `!=` on non-integer operands.
    ///
    /// Booleans and null only ever exist as the canonical [`TRUE`], [`FALSE`]
    /// and [`NULL`], so identity and value equality coincide for them.
    /// Functions are identical only when they are the same closure
    /// allocation. Values of different types are never identical.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            TRUE
        } else {
            FALSE
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => self.is_identical(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Value::Boolean(b) => write!(f, "{}", b),

            Value::Null => f.write_str("null"),

            Value::Function(function) => {
                let params: Vec<&str> = function
                    .parameters
                    .iter()
                    .map(|p| p.value.as_str())
                    .collect();

                write!(
                    f,
                    "fn({}) {{\n{}\n}}",
                    params.join(", "),
                    AstPrinter::statements(&function.body.statements)
                )
            }

            Value::ReturnValue(inner) => write!(f, "{}", inner),

            Value::Error(error) => write!(f, "ERROR: {}", error),
        }
    }
}
