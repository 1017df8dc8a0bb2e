//! Property-based tests for the evaluator.
//!
//! Operands are written straight into source text; negative numbers go
//! through the prefix `-` operator, so the literal range stops one short of
//! `i64::MIN`.

use monkey_interpreter as monkey;

use monkey::ast::InfixOperator;
use monkey::environment::Environment;
use monkey::error::RuntimeError;
use monkey::interpreter::eval;
use monkey::parser::parse_program;
use monkey::value::Value;
use proptest::prelude::*;

fn eval_source(source: &str) -> Value {
    match parse_program(source) {
        Ok(program) => eval(&program, &Environment::new().into_shared()),
        Err(e) => panic!("Failed to parse {:?}: {}", source, e),
    }
}

fn arb_operand() -> impl Strategy<Value = i64> {
    prop_oneof![
        -1000i64..=1000,
        (i64::MIN + 1)..=i64::MAX,
        Just(i64::MAX),
        Just(i64::MIN + 1),
        Just(0),
    ]
}

fn arithmetic_expected(
    a: i64,
    operator: InfixOperator,
    b: i64,
    checked: Option<i64>,
) -> Value {
    match checked {
        Some(n) => Value::Integer(n),
        None => Value::Error(RuntimeError::IntegerOverflow {
            left: a,
            operator,
            right: b,
        }),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn integer_arithmetic_matches_checked_host_arithmetic(a in arb_operand(), b in arb_operand()) {
        prop_assert_eq!(
            eval_source(&format!("{} + {}", a, b)),
            arithmetic_expected(a, InfixOperator::Plus, b, a.checked_add(b))
        );
        prop_assert_eq!(
            eval_source(&format!("{} - {}", a, b)),
            arithmetic_expected(a, InfixOperator::Minus, b, a.checked_sub(b))
        );
        prop_assert_eq!(
            eval_source(&format!("{} * {}", a, b)),
            arithmetic_expected(a, InfixOperator::Asterisk, b, a.checked_mul(b))
        );
    }

    #[test]
    fn integer_division_matches_host_or_reports_zero(a in arb_operand(), b in arb_operand()) {
        let expected = if b == 0 {
            Value::Error(RuntimeError::DivisionByZero(a))
        } else {
            arithmetic_expected(a, InfixOperator::Slash, b, a.checked_div(b))
        };

        prop_assert_eq!(eval_source(&format!("{} / {}", a, b)), expected);
    }

    #[test]
    fn integer_comparisons_match_host(a in arb_operand(), b in arb_operand()) {
        prop_assert_eq!(eval_source(&format!("{} < {}", a, b)), Value::from(a < b));
        prop_assert_eq!(eval_source(&format!("{} > {}", a, b)), Value::from(a > b));
        prop_assert_eq!(eval_source(&format!("{} == {}", a, b)), Value::from(a == b));
        prop_assert_eq!(eval_source(&format!("{} != {}", a, b)), Value::from(a != b));
    }

    #[test]
    fn evaluation_is_repeatable(a in -1000i64..=1000, b in -1000i64..=1000) {
        let source = format!(
            "let f = fn(x) {{ fn(y) {{ if (x < y) {{ return y - x; }} x * y }} }}; f({})({})",
            a, b
        );
        let program = match parse_program(&source) {
            Ok(program) => program,
            Err(e) => panic!("Failed to parse {:?}: {}", source, e),
        };

        let first = eval(&program, &Environment::new().into_shared());
        let second = eval(&program, &Environment::new().into_shared());

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, Value::Integer(if a < b { b - a } else { a * b }));
    }
}
