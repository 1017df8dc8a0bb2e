//! Tree-walking evaluator.
//!
//! Internally every evaluation step returns `IResult<Value>`. The two control
//! signals, early `return` and runtime errors, ride on the `Err` side so each
//! composition point short-circuits with `?`. The public [`eval`] turns them
//! back into the `ReturnValue` / `Error` runtime values.

use std::rc::Rc;

use log::{debug, info};
use thiserror::Error;

use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, Node as _, PrefixOperator, Program,
    Statement,
};
use crate::environment::{Env, Environment};
use crate::error::RuntimeError;
use crate::value::{Function, Value, FALSE, NULL, TRUE};

#[derive(Error, Debug)]
enum Signal {
    #[error("{0}")]
    Error(#[from] RuntimeError),

    #[error("Return signal with value: {0}")]
    Return(Value),
}

/// Convenient alias for evaluation results.
type IResult<T> = Result<T, Signal>;

/// Any AST node the evaluator can be pointed at.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Block(&'a BlockStatement),
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a BlockStatement> for Node<'a> {
    fn from(block: &'a BlockStatement) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

/// Evaluates `node` in `env`.
///
/// A program unwraps an early `return` into its value. Any other node
/// hands the signal back as `Value::ReturnValue` so an enclosing call can
/// consume it. Runtime faults come back as `Value::Error`.
pub fn eval<'a>(node: impl Into<Node<'a>>, env: &Env) -> Value {
    match node.into() {
        Node::Program(program) => eval_program(program, env),
        Node::Statement(statement) => settle(eval_statement(statement, env)),
        Node::Block(block) => settle(eval_block(block, env)),
        Node::Expression(expression) => settle(eval_expression(expression, env)),
    }
}

/// Owns a root scope and evaluates successive programs against it, so
/// bindings persist from one call to the next.
pub struct Interpreter {
    environment: Env,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        info!("Initializing Interpreter");

        Self {
            environment: Environment::new().into_shared(),
        }
    }

    /// Interpreter over an existing root scope.
    pub fn with_environment(environment: Env) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> &Env {
        &self.environment
    }

    /// Interprets a whole program against the session scope.
    pub fn interpret(&mut self, program: &Program) -> Value {
        info!("Interpreting {} statements", program.statements.len());

        let value = eval_program(program, &self.environment);

        match &value {
            Value::Error(error) => info!("Interpretation stopped: {}", error),
            _ => info!("Interpretation completed successfully"),
        }

        value
    }
}

fn settle(result: IResult<Value>) -> Value {
    match result {
        Ok(value) => value,
        Err(Signal::Return(value)) => Value::ReturnValue(Box::new(value)),
        Err(Signal::Error(error)) => Value::Error(error),
    }
}

/// Turns a signal value found in a binding back into a signal.
fn resume(value: Value) -> IResult<Value> {
    match value {
        Value::ReturnValue(inner) => Err(Signal::Return(*inner)),
        Value::Error(error) => Err(Signal::Error(error)),
        value => Ok(value),
    }
}

// ───────────────────────── statements ─────────────────────────

fn eval_program(program: &Program, env: &Env) -> Value {
    debug!(
        "Evaluating program starting at '{}'",
        program.token_literal()
    );

    let mut result: Value = NULL;

    for statement in &program.statements {
        match eval_statement(statement, env) {
            Ok(value) => result = value,
            Err(Signal::Return(value)) => return value,
            Err(Signal::Error(error)) => {
                debug!("Program aborted by error: {}", error);
                return Value::Error(error);
            }
        }
    }

    result
}

/// Unlike a program, a block leaves an early return as a signal so the
/// enclosing call can catch it.
fn eval_block(block: &BlockStatement, env: &Env) -> IResult<Value> {
    let mut result: Value = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env)?;
    }

    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Env) -> IResult<Value> {
    match statement {
        Statement::Expression { expression, .. } => eval_expression(expression, env),

        Statement::Return { return_value, .. } => {
            let value = eval_expression(return_value, env)?;
            debug!("Returning value: {}", value);
            Err(Signal::Return(value))
        }

        Statement::Let { name, value, .. } => {
            let value = eval_expression(value, env)?;
            env.borrow_mut().set(&name.value, value);
            Ok(NULL)
        }
    }
}

// ───────────────────────── expressions ────────────────────────

fn eval_expression(expression: &Expression, env: &Env) -> IResult<Value> {
    match expression {
        Expression::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),

        Expression::Boolean { value, .. } => Ok(Value::from(*value)),

        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env)?;
            eval_prefix_expression(*operator, right)
        }

        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            eval_infix_expression(*operator, left, right)
        }

        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_expression(condition, env)?;

            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(NULL)
            }
        }

        Expression::Identifier(identifier) => eval_identifier(identifier, env),

        Expression::FunctionLiteral {
            parameters, body, ..
        } => Ok(Value::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: Rc::clone(body),
            env: Rc::clone(env),
        }))),

        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let callee = eval_expression(function, env)?;

            let mut args: Vec<Value> = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(eval_expression(argument, env)?);
            }

            apply_function(callee, args)
        }
    }
}

fn eval_identifier(identifier: &Identifier, env: &Env) -> IResult<Value> {
    let value = env.borrow().get(&identifier.value);

    match value {
        Some(value) => resume(value),
        None => {
            debug!("Identifier '{}' is unbound", identifier.value);
            Err(RuntimeError::IdentifierNotFound(identifier.value.clone()).into())
        }
    }
}

fn apply_function(callee: Value, args: Vec<Value>) -> IResult<Value> {
    let function: Rc<Function> = match callee {
        Value::Function(function) => function,
        other => return Err(RuntimeError::NotAFunction(other.value_type()).into()),
    };

    if args.len() != function.parameters.len() {
        return Err(RuntimeError::WrongArgumentCount {
            want: function.parameters.len(),
            got: args.len(),
        }
        .into());
    }

    debug!("Calling function with {} arguments", args.len());

    let extended = extend_function_env(&function, args);

    match eval_block(&function.body, &extended) {
        Err(Signal::Return(value)) => Ok(value),
        other => other,
    }
}

/// Parameters are bound in a fresh scope whose outer link is the closure's
/// captured scope, never the caller's.
fn extend_function_env(function: &Function, args: Vec<Value>) -> Env {
    let mut env = Environment::new_enclosed(Rc::clone(&function.env));

    for (param, arg) in function.parameters.iter().zip(args) {
        env.set(&param.value, arg);
    }

    env.into_shared()
}

// ───────────────────────── operators ──────────────────────────

fn eval_prefix_expression(operator: PrefixOperator, right: Value) -> IResult<Value> {
    match operator {
        PrefixOperator::Bang => Ok(eval_bang_operator_expression(&right)),
        PrefixOperator::Minus => eval_minus_prefix_operator_expression(right),
    }
}

fn eval_bang_operator_expression(right: &Value) -> Value {
    if right.is_truthy() {
        FALSE
    } else {
        TRUE
    }
}

fn eval_minus_prefix_operator_expression(right: Value) -> IResult<Value> {
    match right {
        Value::Integer(n) => n
            .checked_neg()
            .map(Value::Integer)
            .ok_or_else(|| RuntimeError::NegationOverflow(n).into()),

        other => Err(RuntimeError::UnknownPrefixOperator {
            operator: PrefixOperator::Minus,
            operand: other.value_type(),
        }
        .into()),
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Value, right: Value) -> IResult<Value> {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),

        _ if operator == InfixOperator::Eq => Ok(Value::from(left.is_identical(&right))),

        _ if operator == InfixOperator::NotEq => Ok(Value::from(!left.is_identical(&right))),

        _ if left.value_type() != right.value_type() => Err(RuntimeError::TypeMismatch {
            left: left.value_type(),
            operator,
            right: right.value_type(),
        }
        .into()),

        _ => Err(RuntimeError::UnknownInfixOperator {
            left: left.value_type(),
            operator,
            right: right.value_type(),
        }
        .into()),
    }
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> IResult<Value> {
    let arithmetic = match operator {
        InfixOperator::Plus => left.checked_add(right),
        InfixOperator::Minus => left.checked_sub(right),
        InfixOperator::Asterisk => left.checked_mul(right),
        InfixOperator::Slash => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero(left).into());
            }
            left.checked_div(right)
        }
        InfixOperator::Lt => return Ok(Value::from(left < right)),
        InfixOperator::Gt => return Ok(Value::from(left > right)),
        InfixOperator::Eq => return Ok(Value::from(left == right)),
        InfixOperator::NotEq => return Ok(Value::from(left != right)),
    };

    arithmetic.map(Value::Integer).ok_or_else(|| {
        RuntimeError::IntegerOverflow {
            left,
            operator,
            right,
        }
        .into()
    })
}
