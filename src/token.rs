use log::{debug, info};
use serde::Serialize;
use std::fmt;

/// The different kinds of tokens recognized by the expression scanner.
///
/// Variants carry no data; the numeric value of a `NUMBER` is taken from the
/// token's lexeme by the parser.  `IDENTIFIER` is used for variable names.
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenType {
    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '+'
    PLUS,

    /// '-'
    MINUS,

    /// '*'
    STAR,

    /// '**'
    STAR_STAR,

    /// '/'
    SLASH,

    /// '√' or the keyword 'sqrt'
    SQRT,

    /// 'conj' (any letter case)
    CONJ,

    /// The bare imaginary unit 'i'
    IMAGINARY_UNIT,

    /// A variable name
    IDENTIFIER,

    /// A numeric literal, digits with an optional fractional part
    NUMBER,

    /// End‑of‑input marker
    EOF,
}

impl TokenType {
    /// Name used in the `tokenize` listing.
    pub fn name(self) -> &'static str {
        match self {
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::PLUS => "PLUS",
            TokenType::MINUS => "MINUS",
            TokenType::STAR => "STAR",
            TokenType::STAR_STAR => "STAR_STAR",
            TokenType::SLASH => "SLASH",
            TokenType::SQRT => "SQRT",
            TokenType::CONJ => "CONJ",
            TokenType::IMAGINARY_UNIT => "IMAGINARY_UNIT",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::NUMBER => "NUMBER",
            TokenType::EOF => "EOF",
        }
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the column where it starts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based character column in the normalised source.
    pub col: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given type, lexeme, and column.
    pub fn new(token_type: TokenType, lexeme: &'a str, col: usize) -> Self {
        info!(
            "Creating new token: type={:?}, lexeme={}, col={}",
            token_type, lexeme, col
        );

        Self {
            token_type,
            lexeme,
            col,
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug!(
            "Formatting token: type={:?}, lexeme={}, col={}",
            self.token_type, self.lexeme, self.col
        );

        let variant: &'static str = self.token_type.name();

        match self.token_type {
            // 3 → "3.0", 3.14 → "3.14"
            TokenType::NUMBER => match self.lexeme.parse::<f64>() {
                Ok(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                    let mut buf: itoa::Buffer = itoa::Buffer::new();

                    write!(f, "{} {} {}.0", variant, self.lexeme, buf.format(n as i64))
                }

                Ok(n) => write!(f, "{} {} {}", variant, self.lexeme, n),

                Err(_) => write!(f, "{} {} null", variant, self.lexeme),
            },

            _ => write!(f, "{} {} null", variant, self.lexeme),
        }
    }
}
