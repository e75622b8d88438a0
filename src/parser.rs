/*!
Recursive‑descent parser for complex‑number expressions.

Cost is Θ(n) in the number of tokens: each token is consumed once by
`advance()` and no production backtracks.  Call‑stack depth grows with
syntactic nesting.

### Logging Policy

| Location                      | Level  | Purpose                                    |
|-------------------------------|--------|--------------------------------------------|
| `Parser::new`, `parse`        | `info` | Lifecycle milestones.                      |
| `expression`, `term`, `factor`| `debug`| Descent into grammar branches.             |
| Error paths (`consume`, etc.) | `debug`| Context before returning structured error. |

--------------------------------------------------------------------------------
Grammar (EBNF, loosest binding first)
--------------------------------------------------------------------------------

```text
expression     → term ( ( "+" | "-" ) term )* ;
term           → factor ( ( "*" | "/" | "**" ) factor )* ;
factor         → "(" expression ")"
               | ( "√" | "sqrt" ) factor
               | "-" factor
               | "conj" "(" expression ")"
               | IDENT
               | NUMBER "i"?
               | "i" ;
```

`**` shares the precedence of `*` and `/` and, like them, associates to the
left: `2**3**2` is `(2**3)**2`.
*/

use num_complex::Complex64;

use crate::error::{CalcError, Result};
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::scanner::{normalize, tokenize};
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Top‑level parser over an immutable slice of tokens, normally ending in
/// `EOF` as produced by [`tokenize`].
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    /// Stands in for `EOF` once the slice runs out.
    end: Token<'a>,
}

impl<'a> Parser<'a> {
    /// Construct a new parser.  A slice without a trailing `EOF` (including
    /// an empty one) is treated as if it ended in one, placed just after the
    /// last token.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        let end_col: usize = tokens
            .last()
            .map_or(1, |last| last.col + last.lexeme.chars().count());

        Self {
            tokens,
            current: 0,
            end: Token::new(TokenType::EOF, "", end_col),
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse the whole token slice as exactly one expression.
    pub fn parse(&mut self) -> Result<Expr> {
        info!("Beginning parse phase");

        let expr: Expr = self.expression()?;

        if !self.is_at_end() {
            let token: &Token<'_> = self.peek();

            debug!("Trailing token {:?} after expression", token);

            if token.token_type == TokenType::RIGHT_PAREN {
                return Err(CalcError::syntax(token.col, "unbalanced parentheses"));
            }

            return Err(CalcError::syntax(
                token.col,
                format!("unexpected token '{}'", token.lexeme),
            ));
        }

        info!("Parsed expression {}", expr);

        Ok(expr)
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expr> {
        debug!("Entering expression");

        let mut expr: Expr = self.term()?;

        while self.check(TokenType::PLUS) || self.check(TokenType::MINUS) {
            let op: BinaryOp = BinaryOp::try_from(self.advance())?;
            let right: Expr = self.term()?;

            expr = Expr::binary(expr, op, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        debug!("Entering term");

        let mut expr: Expr = self.factor()?;

        while self.check(TokenType::STAR)
            || self.check(TokenType::SLASH)
            || self.check(TokenType::STAR_STAR)
        {
            let op: BinaryOp = BinaryOp::try_from(self.advance())?;
            let right: Expr = self.factor()?;

            expr = Expr::binary(expr, op, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        debug!("Entering factor at {:?}", self.peek());

        if self.matches(TokenType::LEFT_PAREN) {
            let expr: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "unbalanced parentheses")?;

            return Ok(expr);
        }

        if self.matches(TokenType::SQRT) {
            let operand: Expr = self.factor()?;

            return Ok(Expr::unary(UnaryOp::Sqrt, operand));
        }

        if self.matches(TokenType::MINUS) {
            let operand: Expr = self.factor()?;

            return Ok(Expr::unary(UnaryOp::Neg, operand));
        }

        if self.matches(TokenType::CONJ) {
            self.consume(TokenType::LEFT_PAREN, "expected '(' after conj")?;

            let operand: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "expected ')' after conj(...)")?;

            return Ok(Expr::unary(UnaryOp::Conj, operand));
        }

        if self.matches(TokenType::IDENTIFIER) {
            return Ok(Expr::Variable(self.previous().lexeme.to_string()));
        }

        if self.matches(TokenType::NUMBER) {
            let token: &Token<'_> = self.previous();
            let n: f64 = token
                .lexeme
                .parse::<f64>()
                .map_err(|_| CalcError::InvalidLiteral {
                    lexeme: token.lexeme.to_string(),
                    col: token.col,
                })?;

            if self.matches(TokenType::IMAGINARY_UNIT) {
                return Ok(Expr::Literal(Complex64::new(0.0, n)));
            }

            return Ok(Expr::Literal(Complex64::new(n, 0.0)));
        }

        if self.matches(TokenType::IMAGINARY_UNIT) {
            return Ok(Expr::Literal(Complex64::i()));
        }

        let token: &Token<'_> = self.peek();

        if self.is_at_end() {
            debug!("Ran out of tokens while expecting a factor");

            return Err(CalcError::syntax(token.col, "unexpected end of input"));
        }

        Err(CalcError::syntax(
            token.col,
            format!("unexpected token '{}'", token.lexeme),
        ))
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

        debug!("Expected {:?}, found {:?}", ttype, self.peek());

        Err(CalcError::syntax(self.peek().col, message))
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
    fn peek(&self) -> &Token<'a> {
        self.tokens.get(self.current).unwrap_or(&self.end)
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current - 1]
    }
}

/// Normalise, tokenize and parse `src` into one expression tree.
pub fn parse_expression(src: &str) -> Result<Expr> {
    let normalized: String = normalize(src);
    let tokens: Vec<Token<'_>> = tokenize(&normalized)?;

    Parser::new(&tokens).parse()
}
