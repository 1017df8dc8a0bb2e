use log::{debug, info};
use std::fmt;
use std::mem;

/// The different kinds of tokens recognized by the Monkey scanner.
///
/// Variants without data represent single‑character or keyword tokens.
/// `INT(i64)` carries its already-parsed literal value.
/// `IDENT` is used for user‑defined names.
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone)]
pub enum TokenType {
    /// A user‑defined identifier
    IDENT,

    /// An integer literal
    INT(i64),

    /// '='
    ASSIGN,

    /// '+'
    PLUS,

    /// '-'
    MINUS,

    /// '!'
    BANG,

    /// '*'
    ASTERISK,

    /// '/'
    SLASH,

    /// '<'
    LT,

    /// '>'
    GT,

    /// '=='
    EQ,

    /// '!='
    NOT_EQ,

    /// ','
    COMMA,

    /// ';'
    SEMICOLON,

    /// '('
    LPAREN,

    /// ')'
    RPAREN,

    /// '{'
    LBRACE,

    /// '}'
    RBRACE,

    /// 'fn'
    FUNCTION,

    /// 'let'
    LET,

    /// 'true'
    TRUE,

    /// 'false'
    FALSE,

    /// 'if'
    IF,

    /// 'else'
    ELSE,

    /// 'return'
    RETURN,

    /// End‑of‑file marker
    EOF,
}

impl TokenType {
    /// Variant name without payload, as printed by `tokenize`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::IDENT => "IDENT",
            TokenType::INT(_) => "INT",
            TokenType::ASSIGN => "ASSIGN",
            TokenType::PLUS => "PLUS",
            TokenType::MINUS => "MINUS",
            TokenType::BANG => "BANG",
            TokenType::ASTERISK => "ASTERISK",
            TokenType::SLASH => "SLASH",
            TokenType::LT => "LT",
            TokenType::GT => "GT",
            TokenType::EQ => "EQ",
            TokenType::NOT_EQ => "NOT_EQ",
            TokenType::COMMA => "COMMA",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::LPAREN => "LPAREN",
            TokenType::RPAREN => "RPAREN",
            TokenType::LBRACE => "LBRACE",
            TokenType::RBRACE => "RBRACE",
            TokenType::FUNCTION => "FUNCTION",
            TokenType::LET => "LET",
            TokenType::TRUE => "TRUE",
            TokenType::FALSE => "FALSE",
            TokenType::IF => "IF",
            TokenType::ELSE => "ELSE",
            TokenType::RETURN => "RETURN",
            TokenType::EOF => "EOF",
        }
    }
}

impl PartialEq for TokenType {
    /// Two TokenTypes are equal if they share the same variant
    /// (ignoring any inner data). Uses `mem::discriminant` to compare.
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the line number where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given type, lexeme, and line.
    pub fn new(token_type: TokenType, lexeme: &'a str, line: usize) -> Self {
        debug!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            lexeme,
            line,
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant: &'static str = self.token_type.name();

        match &self.token_type {
            TokenType::INT(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                let literal: &str = buf.format(*n);

                info!("Formatted token: {} {} {}", variant, self.lexeme, literal);

                write!(f, "{} {} {}", variant, self.lexeme, literal)
            }

            _ => write!(f, "{} {} null", variant, self.lexeme),
        }
    }
}
