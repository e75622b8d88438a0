#[cfg(test)]
mod scanner_tests {
    use complex_calc as calc;

    use calc::scanner::*;
    use calc::token::*;

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
            "(+-*/)√",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::PLUS, "+"),
                (TokenType::MINUS, "-"),
                (TokenType::STAR, "*"),
                (TokenType::SLASH, "/"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::SQRT, "√"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_power_before_star() {
        assert_token_sequence(
            "2**3*4***5",
            &[
                (TokenType::NUMBER, "2"),
                (TokenType::STAR_STAR, "**"),
                (TokenType::NUMBER, "3"),
                (TokenType::STAR, "*"),
                (TokenType::NUMBER, "4"),
                (TokenType::STAR_STAR, "**"),
                (TokenType::STAR, "*"),
                (TokenType::NUMBER, "5"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_numbers_and_imaginary_unit() {
        assert_token_sequence(
            "3i+2.5+7.+i",
            &[
                (TokenType::NUMBER, "3"),
                (TokenType::IMAGINARY_UNIT, "i"),
                (TokenType::PLUS, "+"),
                (TokenType::NUMBER, "2.5"),
                (TokenType::PLUS, "+"),
                (TokenType::NUMBER, "7."),
                (TokenType::PLUS, "+"),
                (TokenType::IMAGINARY_UNIT, "i"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_keywords_any_case() {
        assert_token_sequence(
            "conj(x)+CONJ(y)+Sqrt z",
            &[
                (TokenType::CONJ, "conj"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::IDENTIFIER, "x"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::PLUS, "+"),
                (TokenType::CONJ, "CONJ"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::IDENTIFIER, "y"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::PLUS, "+"),
                (TokenType::SQRT, "Sqrt"),
                (TokenType::IDENTIFIER, "z"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_identifiers() {
        assert_token_sequence(
            "x1 _tmp ix I conjugate",
            &[
                (TokenType::IDENTIFIER, "x1"),
                (TokenType::IDENTIFIER, "_tmp"),
                (TokenType::IDENTIFIER, "ix"),
                (TokenType::IDENTIFIER, "I"),
                (TokenType::CONJ, "conj"),
                (TokenType::IDENTIFIER, "ugate"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_06_keyword_prefix_is_split() {
        assert_token_sequence(
            "conj1+sqrtx",
            &[
                (TokenType::CONJ, "conj"),
                (TokenType::NUMBER, "1"),
                (TokenType::PLUS, "+"),
                (TokenType::SQRT, "sqrt"),
                (TokenType::IDENTIFIER, "x"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_07_columns_count_characters() {
        let tokens: Vec<Token> = tokenize("√x+1").unwrap();

        let cols: Vec<usize> = tokens.iter().map(|t| t.col).collect();

        assert_eq!(cols, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_normalize_removes_whitespace() {
        assert_eq!(normalize(" conj ( 3 + 4 i )\t"), "conj(3+4i)");
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = "1$+#€";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // 0: NUMBER '1'
        // 1: Error for '$'
        // 2: PLUS '+'
        // 3: Error for '#'
        // 4: Error for '€'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::NUMBER, "1");
        assert_token_matches(&results[2], TokenType::PLUS, "+");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 3, "Expected 3 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                err
            );
        }

        let first = results[1].as_ref().unwrap_err().to_string();
        assert_eq!(first, "[col 2] Error: Unexpected character: $");

        // Helper function
        fn assert_token_matches(
            result: &calc::Result<Token>,
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
    fn test_tokenize_stops_at_first_error() {
        let err = tokenize("1+%").unwrap_err();

        assert!(err.is_parse_error());
        assert_eq!(err.to_string(), "[col 3] Error: Unexpected character: %");
    }

    #[test]
    fn test_token_display() {
        let tokens: Vec<Token> = tokenize("2.5*3").unwrap();
        let lines: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            lines,
            vec![
                "NUMBER 2.5 2.5",
                "STAR * null",
                "NUMBER 3 3.0",
                "EOF  null"
            ]
        );
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut scanner = Scanner::new("1");

        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
