#[cfg(test)]
mod scanner_tests {
    use monkey_interpreter as monkey;

    use monkey::error::MonkeyError;
    use monkey::scanner::*;
    use monkey::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "=+(){},;-!*/<>",
            &[
                (TokenType::ASSIGN, "="),
                (TokenType::PLUS, "+"),
                (TokenType::LPAREN, "("),
                (TokenType::RPAREN, ")"),
                (TokenType::LBRACE, "{"),
                (TokenType::RBRACE, "}"),
                (TokenType::COMMA, ","),
                (TokenType::SEMICOLON, ";"),
                (TokenType::MINUS, "-"),
                (TokenType::BANG, "!"),
                (TokenType::ASTERISK, "*"),
                (TokenType::SLASH, "/"),
                (TokenType::LT, "<"),
                (TokenType::GT, ">"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_character_operators() {
        assert_token_sequence(
            "10 == 10; 10 != 9; a = !b",
            &[
                (TokenType::INT(0), "10"),
                (TokenType::EQ, "=="),
                (TokenType::INT(0), "10"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::INT(0), "10"),
                (TokenType::NOT_EQ, "!="),
                (TokenType::INT(0), "9"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::IDENT, "a"),
                (TokenType::ASSIGN, "="),
                (TokenType::BANG, "!"),
                (TokenType::IDENT, "b"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "let add = fn(x, y) { if (x) { return true; } else { return false_y; } };",
            &[
                (TokenType::LET, "let"),
                (TokenType::IDENT, "add"),
                (TokenType::ASSIGN, "="),
                (TokenType::FUNCTION, "fn"),
                (TokenType::LPAREN, "("),
                (TokenType::IDENT, "x"),
                (TokenType::COMMA, ","),
                (TokenType::IDENT, "y"),
                (TokenType::RPAREN, ")"),
                (TokenType::LBRACE, "{"),
                (TokenType::IF, "if"),
                (TokenType::LPAREN, "("),
                (TokenType::IDENT, "x"),
                (TokenType::RPAREN, ")"),
                (TokenType::LBRACE, "{"),
                (TokenType::RETURN, "return"),
                (TokenType::TRUE, "true"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::RBRACE, "}"),
                (TokenType::ELSE, "else"),
                (TokenType::LBRACE, "{"),
                (TokenType::RETURN, "return"),
                (TokenType::IDENT, "false_y"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::RBRACE, "}"),
                (TokenType::RBRACE, "}"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_integer_literal_carries_value() {
        let tokens: Vec<_> = Scanner::new("9223372036854775807")
            .filter_map(Result::ok)
            .collect();

        match tokens[0].token_type {
            TokenType::INT(n) => assert_eq!(n, i64::MAX),
            ref other => panic!("Expected INT, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_literal_out_of_range() {
        let results: Vec<_> = Scanner::new("9223372036854775808").collect();

        assert_eq!(
            results[0],
            Err(MonkeyError::lex(
                1,
                "Integer literal out of range: 9223372036854775808"
            ))
        );
        assert!(matches!(
            results.last(),
            Some(Ok(Token {
                token_type: TokenType::EOF,
                ..
            }))
        ));
    }

    #[test]
    fn test_comments_and_lines() {
        let source = "let a = 1; // ignored ;;; fn\n// whole line\nlet b = 2;";
        let tokens: Vec<_> = Scanner::new(source).filter_map(Result::ok).collect();

        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 1, 1, 3, 3, 3, 3, 3, 3]);
        assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",;$(é";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // COMMA, SEMICOLON, error for '$', LPAREN, error for 'é', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::SEMICOLON, ";");
        assert_token_matches(&results[3], TokenType::LPAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        assert_eq!(
            results[2].as_ref().err().map(|e| e.to_string()),
            Some("[line 1] Error: Unexpected character: $".to_string())
        );
        assert_eq!(
            results[4].as_ref().err().map(|e| e.to_string()),
            Some("[line 1] Error: Unexpected character: é".to_string())
        );

        fn assert_token_matches(
            result: &Result<Token, MonkeyError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut scanner = Scanner::new("x");

        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_token_display() {
        let tokens: Vec<_> = Scanner::new("let x = 42;").filter_map(Result::ok).collect();
        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            rendered,
            vec![
                "LET let null",
                "IDENT x null",
                "ASSIGN = null",
                "INT 42 42",
                "SEMICOLON ; null",
                "EOF  null",
            ]
        );
    }
}
