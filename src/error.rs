//! Centralised error hierarchy for the **Monkey interpreter**.
//!
//! Two families live here:
//!
//! * [`MonkeyError`] covers the front end (scanner, parser). These abort
//!   before any evaluation happens and travel through the crate-wide
//!   `Result<T>` alias.
//! * [`RuntimeError`] is the payload of the `Error` runtime value. It is never
//!   thrown; the evaluator hands it back as an ordinary value so callers can
//!   store, compare and print it.
//!
//! The module **does not** print diagnostics itself

use thiserror::Error;

use log::info;

use crate::ast::{InfixOperator, PrefixOperator};
use crate::value::ValueType;

/// Canonical front-end error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MonkeyError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error: {message}")]
    Parse { message: String, line: usize },
}

impl MonkeyError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        MonkeyError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        MonkeyError::Parse { message, line }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, MonkeyError>;

/// A fault raised while evaluating a program.
///
/// The `Display` output is the exact message a user sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: ValueType,
    },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ValueType,
        operator: InfixOperator,
        right: ValueType,
    },

    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ValueType,
        operator: InfixOperator,
        right: ValueType,
    },

    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("not a function: {0}")]
    NotAFunction(ValueType),

    #[error("wrong number of arguments: want={want}, got={got}")]
    WrongArgumentCount { want: usize, got: usize },

    #[error("division by zero: {0} / 0")]
    DivisionByZero(i64),

    #[error("integer overflow: {left} {operator} {right}")]
    IntegerOverflow {
        left: i64,
        operator: InfixOperator,
        right: i64,
    },

    #[error("integer overflow: -({0})")]
    NegationOverflow(i64),
}
