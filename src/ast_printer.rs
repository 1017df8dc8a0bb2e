use crate::ast::{BlockStatement, Expression, Program, Statement};

/// Renders AST nodes back to a canonical, fully parenthesised source form.
///
/// Every prefix and infix expression gets its own parentheses, so the output
/// shows exactly how the parser grouped the operands:
/// `-a * b + c` prints as `(((-a) * b) + c)`.
pub struct AstPrinter;

impl AstPrinter {
    /// One line per top-level statement.
    pub fn print(program: &Program) -> String {
        Self::statements(&program.statements)
    }

    pub fn statements(statements: &[Statement]) -> String {
        statements
            .iter()
            .map(Self::statement)
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn statement(statement: &Statement) -> String {
        match statement {
            Statement::Let { name, value, .. } => {
                format!("let {} = {};", name.value, Self::expression(value))
            }

            Statement::Return { return_value, .. } => {
                format!("return {};", Self::expression(return_value))
            }

            Statement::Expression { expression, .. } => Self::expression(expression),
        }
    }

    /// Inline form: `{ stmt stmt }`.
    pub fn block(block: &BlockStatement) -> String {
        if block.statements.is_empty() {
            return "{ }".into();
        }

        let body: Vec<String> = block.statements.iter().map(Self::statement).collect();

        format!("{{ {} }}", body.join(" "))
    }

    pub fn expression(expr: &Expression) -> String {
        match expr {
            // ── leaves ──────────────────────────────────────────────────
            Expression::Identifier(identifier) => identifier.value.clone(),

            Expression::IntegerLiteral { value, .. } => value.to_string(),

            Expression::Boolean { value, .. } => value.to_string(),

            // ── operators ───────────────────────────────────────────────
            Expression::Prefix {
                operator, right, ..
            } => format!("({}{})", operator, Self::expression(right)),

            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => format!(
                "({} {} {})",
                Self::expression(left),
                operator,
                Self::expression(right)
            ),

            // ── compound ────────────────────────────────────────────────
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                // Prefix and infix nodes already carry their own parentheses.
                let condition: String = match condition.as_ref() {
                    Expression::Prefix { .. } | Expression::Infix { .. } => {
                        Self::expression(condition)
                    }
                    _ => format!("({})", Self::expression(condition)),
                };

                let mut s = format!("if {} {}", condition, Self::block(consequence));
                if let Some(alternative) = alternative {
                    s.push_str(" else ");
                    s.push_str(&Self::block(alternative));
                }
                s
            }

            Expression::FunctionLiteral {
                parameters, body, ..
            } => {
                let params: Vec<&str> = parameters.iter().map(|p| p.value.as_str()).collect();

                format!("fn({}) {}", params.join(", "), Self::block(body))
            }

            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let args: Vec<String> = arguments.iter().map(Self::expression).collect();

                format!("{}({})", Self::expression(function), args.join(", "))
            }
        }
    }
}
