/*!
Recursive‑descent parser producing the Monkey AST.

Definitions
-----------
* **n** = number of tokens (including the sole EOF).

Each token is consumed once via `advance()`, so parsing is **Θ(n)**. Call‑stack
depth grows with syntactic nesting.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `statement`, `block`         | `debug`| High‑level descent into grammar branches. |

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program        → statement* EOF ;
statement      → letStmt | returnStmt | exprStmt ;
letStmt        → "let" IDENT "=" expression ";"? ;
returnStmt     → "return" expression ";"? ;
exprStmt       → expression ";"? ;
block          → "{" statement* "}" ;
expression     → equality ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → term ( ( ">" | "<" ) term )* ;
term           → factor ( ( "-" | "+" ) factor )* ;
factor         → unary ( ( "/" | "*" ) unary )* ;
unary          → ( "!" | "-" ) unary | call ;
call           → primary ( "(" arguments? ")" )* ;
arguments      → expression ( "," expression )* ;
primary        → INT | "true" | "false" | IDENT | "(" expression ")"
               | ifExpr | fnLiteral ;
ifExpr         → "if" "(" expression ")" block ( "else" block )? ;
fnLiteral      → "fn" "(" parameters? ")" block ;
parameters     → IDENT ( "," IDENT )* ;
```
*/

use std::rc::Rc;

use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::error::{MonkeyError, Result};
use crate::scanner::Scanner;
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Scan and parse `source` in one step.
///
/// The returned [`Program`] owns all of its text and does not borrow `source`.
pub fn parse_program(source: &str) -> Result<Program> {
    let tokens: Vec<Token<'_>> = Scanner::new(source).collect::<Result<_>>()?;

    let mut parser = Parser::new(&tokens);
    parser.parse()
}

/// Top‑level parser over an immutable slice of tokens.
///
/// The slice must end with an `EOF` token, as produced by [`Scanner`].
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self { tokens, current: 0 }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program, stopping at the first syntax error.
    pub fn parse(&mut self) -> Result<Program> {
        info!("Beginning parse phase");

        let mut statements: Vec<Statement> = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        info!("Parsed {} top-level statements", statements.len());

        Ok(Program { statements })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Statement> {
        debug!("Entering statement at line {}", self.peek().line);

        if self.matches(TokenType::LET) {
            self.let_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else {
            self.expression_statement()
        }
    }

    fn let_statement(&mut self) -> Result<Statement> {
        let token: String = self.previous().lexeme.to_string();
        let name: &Token<'_> = self.consume(TokenType::IDENT, "Expected variable name")?;
        let name = Identifier::new(name.lexeme);

        self.consume(TokenType::ASSIGN, "Expected '=' after variable name")?;

        let value: Expression = self.expression()?;
        self.matches(TokenType::SEMICOLON);

        Ok(Statement::Let { token, name, value })
    }

    fn return_statement(&mut self) -> Result<Statement> {
        let token: String = self.previous().lexeme.to_string();
        let return_value: Expression = self.expression()?;
        self.matches(TokenType::SEMICOLON);

        Ok(Statement::Return {
            token,
            return_value,
        })
    }

    fn expression_statement(&mut self) -> Result<Statement> {
        let token: String = self.peek().lexeme.to_string();
        let expression: Expression = self.expression()?;
        self.matches(TokenType::SEMICOLON);

        Ok(Statement::Expression { token, expression })
    }

    /// Parses the statements of a block whose `{` has already been consumed.
    fn block(&mut self) -> Result<BlockStatement> {
        let token: String = self.previous().lexeme.to_string();
        let mut statements: Vec<Statement> = Vec::new();

        while !self.check(TokenType::RBRACE) && !self.is_at_end() {
            statements.push(self.statement()?);
        }

        self.consume(TokenType::RBRACE, "Expected '}' after block")?;

        debug!("Parsed block with {} statements", statements.len());

        Ok(BlockStatement { token, statements })
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expression> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expression> {
        let mut expr: Expression = self.comparison()?;

        while self.matches(TokenType::NOT_EQ) || self.matches(TokenType::EQ) {
            expr = self.finish_infix(expr, Self::comparison)?;
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expression> {
        let mut expr: Expression = self.term()?;

        while self.matches(TokenType::GT) || self.matches(TokenType::LT) {
            expr = self.finish_infix(expr, Self::term)?;
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expression> {
        let mut expr: Expression = self.factor()?;

        while self.matches(TokenType::MINUS) || self.matches(TokenType::PLUS) {
            expr = self.finish_infix(expr, Self::factor)?;
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expression> {
        let mut expr: Expression = self.unary()?;

        while self.matches(TokenType::ASTERISK) || self.matches(TokenType::SLASH) {
            expr = self.finish_infix(expr, Self::unary)?;
        }

        Ok(expr)
    }

    /// Builds an infix node whose operator token was just consumed; the right
    /// operand is parsed one precedence level higher.
    fn finish_infix(
        &mut self,
        left: Expression,
        operand: fn(&mut Self) -> Result<Expression>,
    ) -> Result<Expression> {
        let operator_token: &Token<'_> = self.previous();
        let token: String = operator_token.lexeme.to_string();

        let operator: InfixOperator = match operator_token.token_type {
            TokenType::PLUS => InfixOperator::Plus,
            TokenType::MINUS => InfixOperator::Minus,
            TokenType::ASTERISK => InfixOperator::Asterisk,
            TokenType::SLASH => InfixOperator::Slash,
            TokenType::LT => InfixOperator::Lt,
            TokenType::GT => InfixOperator::Gt,
            TokenType::EQ => InfixOperator::Eq,
            TokenType::NOT_EQ => InfixOperator::NotEq,
            _ => {
                return Err(MonkeyError::parse(
                    operator_token.line,
                    format!("Invalid infix operator '{}'", operator_token.lexeme),
                ));
            }
        };

        let right: Expression = operand(self)?;

        Ok(Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn unary(&mut self) -> Result<Expression> {
        let operator = if self.matches(TokenType::BANG) {
            PrefixOperator::Bang
        } else if self.matches(TokenType::MINUS) {
            PrefixOperator::Minus
        } else {
            return self.call();
        };

        let token: String = self.previous().lexeme.to_string();
        let right: Expression = self.unary()?;

        Ok(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn call(&mut self) -> Result<Expression> {
        let mut expr: Expression = self.primary()?;

        while self.matches(TokenType::LPAREN) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, function: Expression) -> Result<Expression> {
        let token: String = self.previous().lexeme.to_string();
        let mut arguments: Vec<Expression> = Vec::new();

        if !self.check(TokenType::RPAREN) {
            loop {
                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RPAREN, "Expected ')' after arguments")?;

        Ok(Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expression> {
        if self.matches(TokenType::TRUE) || self.matches(TokenType::FALSE) {
            let token: &Token<'_> = self.previous();

            return Ok(Expression::Boolean {
                token: token.lexeme.to_string(),
                value: token.token_type == TokenType::TRUE,
            });
        }

        if let TokenType::INT(value) = self.peek().token_type {
            let token: &Token<'_> = self.advance();

            return Ok(Expression::IntegerLiteral {
                token: token.lexeme.to_string(),
                value,
            });
        }

        if self.matches(TokenType::IDENT) {
            return Ok(Expression::Identifier(Identifier::new(
                self.previous().lexeme,
            )));
        }

        if self.matches(TokenType::LPAREN) {
            let expr: Expression = self.expression()?;

            self.consume(TokenType::RPAREN, "Expected ')' after expression")?;

            return Ok(expr);
        }

        if self.matches(TokenType::IF) {
            return self.if_expression();
        }

        if self.matches(TokenType::FUNCTION) {
            return self.function_literal();
        }

        let token: &Token<'_> = self.peek();

        Err(MonkeyError::parse(
            token.line,
            format!("Expected expression, found '{}'", token.lexeme),
        ))
    }

    fn if_expression(&mut self) -> Result<Expression> {
        let token: String = self.previous().lexeme.to_string();

        self.consume(TokenType::LPAREN, "Expected '(' after 'if'")?;
        let condition: Expression = self.expression()?;
        self.consume(TokenType::RPAREN, "Expected ')' after condition")?;

        self.consume(TokenType::LBRACE, "Expected '{' before if body")?;
        let consequence: BlockStatement = self.block()?;

        let alternative: Option<BlockStatement> = if self.matches(TokenType::ELSE) {
            self.consume(TokenType::LBRACE, "Expected '{' after 'else'")?;
            Some(self.block()?)
        } else {
            None
        };

        Ok(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn function_literal(&mut self) -> Result<Expression> {
        let token: String = self.previous().lexeme.to_string();

        self.consume(TokenType::LPAREN, "Expected '(' after 'fn'")?;

        let mut parameters: Vec<Identifier> = Vec::new();
        if !self.check(TokenType::RPAREN) {
            loop {
                let name: &Token<'_> =
                    self.consume(TokenType::IDENT, "Expected parameter name")?;
                parameters.push(Identifier::new(name.lexeme));

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RPAREN, "Expected ')' after parameters")?;
        self.consume(TokenType::LBRACE, "Expected '{' before function body")?;
        let body: BlockStatement = self.block()?;

        Ok(Expression::FunctionLiteral {
            token,
            parameters,
            body: Rc::new(body),
        })
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<&'a Token<'a>> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        let token: &Token<'_> = self.peek();

        debug!("consume failed at '{}' on line {}", token.lexeme, token.line);

        Err(MonkeyError::parse(token.line, message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &'a Token<'a> {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current - 1]
    }
}
