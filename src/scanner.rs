//! Module `scanner` implements a one‑pass, streaming lexer for the Monkey language.
//!
//! It transforms a source string into a sequence of `Token<'a>`s, skipping whitespace
//! and comments, and emitting exactly one `EOF` token at the end. Designed as a `FusedIterator`,
//! it can be chained safely with other iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a new lexer over the input buffer.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token<'a>, MonkeyError>` on each `.next()`, where `Ok(token)` is a scanned
//!   token and `Err` reports a lexing error with line information.
//!
//! # Token Recognition (`scan_token`)
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `;`, `+`, `-`, `*`, `/`, `<`, `>`.
//! - Two‑character operators: `==`, `!=`.
//! - Integer literals: decimal digit runs that must fit in an `i64`.
//! - Identifiers/keywords: alphanumeric/_ sequences, resolved via a perfect‑hash `KEYWORDS` map.
//! - Comments: `//` to end of line, skipped with `memchr`.
//! - Errors: any unexpected character yields `MonkeyError::lex(line, message)`; scanning
//!   resumes right after it.
//!
//! # Example
//!
//! ```rust
//! use monkey_interpreter::scanner::Scanner;
//!
//! let mut scanner = Scanner::new("let five = 5; // example");
//! for result in &mut scanner {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{MonkeyError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"fn"     => TokenType::FUNCTION,
    b"let"    => TokenType::LET,
    b"true"   => TokenType::TRUE,
    b"false"  => TokenType::FALSE,
    b"if"     => TokenType::IF,
    b"else"   => TokenType::ELSE,
    b"return" => TokenType::RETURN,
};

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    src: &'a str,               // entire source text
    bytes: &'a [u8],            // byte view of `src` for fast dispatch
    start: usize,               // index of the *first* byte of the current lexeme
    curr: usize,                // index *one past* the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            bytes: src.as_bytes(),
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`Self::is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes[self.curr]
        }
    }

    /// Conditionally consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* token starting at `self.curr`.  If the lexeme produces an
    /// actual token the kind is stored in `self.pending`.  Whitespace and
    /// comments are skipped by returning `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => self.pending = Some(TokenType::LPAREN),
            b')' => self.pending = Some(TokenType::RPAREN),
            b'{' => self.pending = Some(TokenType::LBRACE),
            b'}' => self.pending = Some(TokenType::RBRACE),
            b',' => self.pending = Some(TokenType::COMMA),
            b';' => self.pending = Some(TokenType::SEMICOLON),
            b'+' => self.pending = Some(TokenType::PLUS),
            b'-' => self.pending = Some(TokenType::MINUS),
            b'*' => self.pending = Some(TokenType::ASTERISK),
            b'<' => self.pending = Some(TokenType::LT),
            b'>' => self.pending = Some(TokenType::GT),

            // ── one‑or‑two character operators (!, !=, =, ==) ────────────
            b'!' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::NOT_EQ
                } else {
                    TokenType::BANG
                };

                self.pending = Some(tt);
            }

            b'=' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::EQ
                } else {
                    TokenType::ASSIGN
                };

                self.pending = Some(tt);
            }

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => {
                return Ok(());
            }

            b'\n' => {
                self.line += 1;

                return Ok(());
            }

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    // The newline itself is left for the loop so the line
                    // counter stays correct.
                    if let Some(pos) = memchr(b'\n', &self.bytes[self.curr..]) {
                        self.curr += pos;
                    } else {
                        self.curr = self.len();
                    }

                    return Ok(());
                }

                self.pending = Some(TokenType::SLASH);
            }

            b'0'..=b'9' => {
                return self.parse_integer();
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.parse_identifier();
            }

            // ── unexpected character ─────────────────────────────────────
            _ => {
                // Skip the whole code point so the next lexeme starts on a
                // char boundary.
                let ch: char = self.src[self.start..].chars().next().unwrap_or('\u{FFFD}');
                self.curr = self.start + ch.len_utf8();

                return Err(MonkeyError::lex(
                    self.line,
                    format!("Unexpected character: {}", ch),
                ));
            }
        }

        Ok(())
    }

    /// Parse a decimal integer literal.
    fn parse_integer(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let lexeme: &str = &self.src[self.start..self.curr];

        match lexeme.parse::<i64>() {
            Ok(n) => {
                self.pending = Some(TokenType::INT(n));

                Ok(())
            }

            Err(_) => Err(MonkeyError::lex(
                self.line,
                format!("Integer literal out of range: {}", lexeme),
            )),
        }
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENT` token.
    fn parse_identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.bytes[self.start..self.curr];

        let tt: TokenType = KEYWORDS.get(slice).cloned().unwrap_or(TokenType::IDENT);

        self.pending = Some(tt);
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        // Loop until we either emit a token, hit EOF, or see an error.
        while self.curr <= self.len() {
            // 1. EOF guard – emit exactly one EOF then terminate.
            if self.curr == self.len() {
                self.curr += 1;
                return Some(Ok(Token::new(TokenType::EOF, "", self.line)));
            }

            // 2. Reset per‑token state.
            self.start = self.curr;
            self.pending = None;

            // 3. Attempt to scan a token.
            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            // 4. If a real token was recognised, build and return it.
            if let Some(tt) = self.pending.take() {
                let src: &'a str = self.src;
                let lex: &'a str = &src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, lex, self.line)));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        None // already yielded EOF
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
