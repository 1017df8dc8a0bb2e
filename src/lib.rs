pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

pub use environment::{Env, Environment};
pub use error::{MonkeyError, Result, RuntimeError};
pub use interpreter::{eval, Interpreter};
pub use parser::parse_program;
pub use value::Value;
