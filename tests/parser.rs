#[cfg(test)]
mod parser_tests {
    use complex_calc as calc;

    use calc::error::CalcError;
    use calc::expr::{BinaryOp, Expr, UnaryOp};
    use calc::parser::{parse_expression, Parser};
    use calc::token::{Token, TokenType};
    use num_complex::Complex64;

    fn render(source: &str) -> String {
        match parse_expression(source) {
            Ok(expr) => expr.to_string(),
            Err(e) => panic!("Expected {:?} to parse, got: {}", source, e),
        }
    }

    fn syntax_error(source: &str) -> String {
        match parse_expression(source) {
            Ok(expr) => panic!("Expected {:?} to fail, parsed as {}", source, expr),
            Err(e @ CalcError::Syntax { .. }) => e.to_string(),
            Err(e) => panic!("Expected a syntax error for {:?}, got: {:?}", source, e),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(render("2+3*4"), "(2 + (3 * 4))");
        assert_eq!(render("(2+3)*4"), "((2 + 3) * 4)");
        assert_eq!(render("1-2/x"), "(1 - (2 / x))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(render("1-2-3"), "((1 - 2) - 3)");
        assert_eq!(render("8/4/2"), "((8 / 4) / 2)");
        assert_eq!(render("2**3**2"), "((2 ** 3) ** 2)");
        assert_eq!(render("2*3**2"), "((2 * 3) ** 2)");
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            parse_expression("3i").unwrap(),
            Expr::Literal(Complex64::new(0.0, 3.0))
        );
        assert_eq!(
            parse_expression("i").unwrap(),
            Expr::Literal(Complex64::new(0.0, 1.0))
        );
        assert_eq!(
            parse_expression("2.5").unwrap(),
            Expr::Literal(Complex64::new(2.5, 0.0))
        );

        assert_eq!(render("3i"), "3i");
        assert_eq!(render("i"), "i");
        assert_eq!(render("1i"), "i");
        assert_eq!(render("0.5i"), "0.5i");
        assert_eq!(render("3+4i"), "(3 + 4i)");
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(render("conj(3+4i)"), "(conj (3 + 4i))");
        assert_eq!(render("√(-4)"), "(√ (- 4))");
        assert_eq!(render("√x*2"), "((√ x) * 2)");
        assert_eq!(render("√√16"), "(√ (√ 16))");
        assert_eq!(render("sqrt(2)"), "(√ 2)");
        assert_eq!(render("-x+1"), "((- x) + 1)");
    }

    #[test]
    fn test_tree_shape() {
        let expr = parse_expression("conj(x)**2").unwrap();

        assert_eq!(
            expr,
            Expr::binary(
                Expr::unary(UnaryOp::Conj, Expr::Variable("x".into())),
                BinaryOp::Pow,
                Expr::Literal(Complex64::new(2.0, 0.0)),
            )
        );
        assert_eq!(expr.arity(), 2);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(render(" conj ( x ) * 2 i "), "((conj x) * 2i)");
    }

    #[test]
    fn test_variables_in_first_use_order() {
        let expr = parse_expression("b*a+b-c").unwrap();

        assert_eq!(expr.variables(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_close_paren() {
        assert_eq!(syntax_error("(1+2"), "[col 5] Error: unbalanced parentheses");
    }

    #[test]
    fn test_extra_close_paren() {
        assert_eq!(syntax_error("(1+2))"), "[col 6] Error: unbalanced parentheses");
    }

    #[test]
    fn test_conj_without_open_paren() {
        assert_eq!(
            syntax_error("conj 1+2)"),
            "[col 5] Error: expected '(' after conj"
        );
    }

    #[test]
    fn test_conj_without_close_paren() {
        assert_eq!(
            syntax_error("conj(1+2"),
            "[col 9] Error: expected ')' after conj(...)"
        );
    }

    #[test]
    fn test_unexpected_end_of_input() {
        assert_eq!(syntax_error("1+"), "[col 3] Error: unexpected end of input");
        assert_eq!(syntax_error(""), "[col 1] Error: unexpected end of input");
    }

    #[test]
    fn test_token_slice_without_eof() {
        let err = Parser::new(&[]).parse().unwrap_err();

        assert_eq!(err.to_string(), "[col 1] Error: unexpected end of input");

        let tokens = [
            Token::new(TokenType::NUMBER, "12", 1),
            Token::new(TokenType::PLUS, "+", 3),
        ];
        let err = Parser::new(&tokens).parse().unwrap_err();

        assert_eq!(err.to_string(), "[col 4] Error: unexpected end of input");

        let tokens = [Token::new(TokenType::IMAGINARY_UNIT, "i", 1)];

        assert_eq!(Parser::new(&tokens).parse().unwrap(), Expr::Literal(Complex64::i()));
    }

    #[test]
    fn test_unexpected_token() {
        assert_eq!(syntax_error("*2"), "[col 1] Error: unexpected token '*'");
        assert_eq!(syntax_error("2x"), "[col 2] Error: unexpected token 'x'");
        assert_eq!(syntax_error("()"), "[col 2] Error: unexpected token ')'");
    }

    #[test]
    fn test_lexical_errors_abort_parsing() {
        let err = parse_expression("1+2;").unwrap_err();

        assert!(matches!(err, CalcError::Lex { col: 4, .. }));
    }

    #[test]
    fn test_tree_serializes_to_json() {
        let expr = parse_expression("x+1").unwrap();
        let json = serde_json::to_value(&expr).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "Binary": {
                    "left": { "Variable": "x" },
                    "op": "Add",
                    "right": { "Literal": [1.0, 0.0] }
                }
            })
        );
    }
}
