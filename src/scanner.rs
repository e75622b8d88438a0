//! Module `scanner` implements a one‑pass lexer for complex‑number expressions.
//!
//! It transforms an expression string into a sequence of `Token<'a>`s, skipping
//! whitespace and emitting exactly one `EOF` token at the end. Designed as a
//! `FusedIterator`, it can be chained safely with other iterator adapters.
//!
//! # Public API
//!
//! - `normalize(src: &str) -> String`
//!   Strip every whitespace character, producing the normalised form the
//!   parser and error columns refer to.
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a new lexer over the input.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token<'a>, CalcError>` on each `.next()`.
//!
//! # Token Recognition (`scan_token`)
//!
//! - `**` is checked before `*`.
//! - Single‑character tokens: `+`, `-`, `*`, `/`, `(`, `)`, `√`.
//! - Words (`[A-Za-z_][A-Za-z0-9_]*`): the keywords `conj` and `sqrt` in any
//!   letter case via the perfect‑hash `KEYWORDS` map (a word starting with a
//!   keyword is split after it), exactly `i` as the imaginary unit, anything
//!   else as an identifier.
//! - Numbers: digits with an optional `.` and optional fraction digits.
//! - Any other character yields `CalcError::lex(col, message)`; scanning then
//!   resumes after it.
//!
//! # Example
//!
//! ```rust
//! use complex_calc::scanner::Scanner;
//!
//! for result in Scanner::new("3i + x") {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{CalcError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash), keys in lower case
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"conj" => TokenType::CONJ,
    b"sqrt" => TokenType::SQRT,
};

/// Every keyword is four letters long.
const KEYWORD_LEN: usize = 4;

/// UTF‑8 encoding of `√` (U+221A).
const SQRT_SIGN: &[u8] = "√".as_bytes();

/// Remove all whitespace from `src`.
pub fn normalize(src: &str) -> String {
    let normalized: String = src.chars().filter(|c| !c.is_whitespace()).collect();

    debug!("Normalized {:?} to {:?}", src, normalized);

    normalized
}

/// A single pass **scanner / lexer** that converts an expression string into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token's
/// `lexeme` slice back to the original source.
pub struct Scanner<'a> {
    src: &'a str,               // entire expression
    start: usize,               // byte index of the *first* byte of the current lexeme
    curr: usize,                // byte index *one past* the last byte examined
    col: usize,                 // 1‑based character column of `curr`
    start_col: usize,           // column of `start`
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            col: 1,
            start_col: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    /// Are we at (or past) the end of input?
    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one ASCII byte and return it.  Callers guard with
    /// [`is_at_end`](Self::is_at_end).
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        self.col += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes()[self.curr]
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
    /// actual token the kind is stored in `self.pending`.  Whitespace is
    /// skipped by returning `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        if self.bytes()[self.curr..].starts_with(SQRT_SIGN) {
            self.curr += SQRT_SIGN.len();
            self.col += 1;
            self.pending = Some(TokenType::SQRT);

            return Ok(());
        }

        if !self.peek().is_ascii() {
            return Err(self.unexpected_char());
        }

        let b = self.advance();

        match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => self.pending = Some(TokenType::LEFT_PAREN),
            b')' => self.pending = Some(TokenType::RIGHT_PAREN),
            b'+' => self.pending = Some(TokenType::PLUS),
            b'-' => self.pending = Some(TokenType::MINUS),
            b'/' => self.pending = Some(TokenType::SLASH),

            // ── '*' or '**' ──────────────────────────────────────────────
            b'*' => {
                let tt = if self.match_byte(b'*') {
                    TokenType::STAR_STAR
                } else {
                    TokenType::STAR
                };

                self.pending = Some(tt);
            }

            // ── whitespace ───────────────────────────────────────────────
            b' ' | b'\r' | b'\t' | b'\n' => {
                return Ok(()); // skip insignificants
            }

            // ── number literal (digit‑leading) ───────────────────────────
            b'0'..=b'9' => {
                self.parse_number();
            }

            // ── identifiers / keywords (alpha or underscore‑leading) ─────
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.parse_word();
            }

            // ── unexpected character ─────────────────────────────────────
            _ => {
                return Err(CalcError::lex(
                    self.start_col,
                    format!("Unexpected character: {}", b as char),
                ));
            }
        }

        Ok(())
    }

    /// Consume one (possibly multi‑byte) character and report it.
    fn unexpected_char(&mut self) -> CalcError {
        let c: char = self.src[self.curr..].chars().next().unwrap_or('\u{FFFD}');

        self.curr += c.len_utf8();
        self.col += 1;

        CalcError::lex(self.start_col, format!("Unexpected character: {}", c))
    }

    /// Parse a numeric literal (`123`, `3.`, `3.14`).
    fn parse_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.match_byte(b'.') {
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.pending = Some(TokenType::NUMBER);
    }

    /// Parse a word and decide whether it is a **keyword**, the imaginary unit,
    /// or a generic `IDENTIFIER`.  Keywords are matched before identifiers,
    /// so a word that merely starts with one is split: `conj1` is `conj` `1`.
    fn parse_word(&mut self) {
        if let Some(prefix) = self.bytes().get(self.start..self.start + KEYWORD_LEN) {
            if let Some(&tt) = KEYWORDS.get(prefix.to_ascii_lowercase().as_slice()) {
                for _ in 1..KEYWORD_LEN {
                    self.advance();
                }

                self.pending = Some(tt);

                return;
            }
        }

        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.bytes()[self.start..self.curr];

        let tt: TokenType = if slice == b"i" {
            TokenType::IMAGINARY_UNIT
        } else {
            TokenType::IDENTIFIER
        };

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
                self.curr += 1; // ensure fused semantics
                return Some(Ok(Token::new(TokenType::EOF, "", self.col)));
            }

            // 2. Reset per‑token state.
            self.start = self.curr;
            self.start_col = self.col;
            self.pending = None;

            // 3. Attempt to scan a token.
            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            // 4. If a real token was recognised, build and return it.
            if let Some(tt) = self.pending.take() {
                let lex: &'a str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) at col {}", tt, self.start_col);

                return Some(Ok(Token::new(tt, lex, self.start_col)));
            }
            // Otherwise it was whitespace → continue loop.
        }

        None // already yielded EOF
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan `src` completely, stopping at the first lexical error.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>> {
    let tokens: Vec<Token<'_>> = Scanner::new(src).collect::<Result<_>>()?;

    info!("Tokenized {} tokens", tokens.len());

    Ok(tokens)
}
