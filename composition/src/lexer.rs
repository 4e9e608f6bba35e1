//! Lexer (tokenizer) for formula strings.

use crate::{ParseError, ParseResult, Span};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Element-shaped symbol: an uppercase letter and any lowercase run.
    Symbol(String),
    /// Exact decimal amount.
    Amount(BigRational),

    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]

    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Amount(_) => "amount",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens ending with `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.pos = pos + c.len_utf8();
        self.column += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let start = self.pos;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::new(TokenKind::Eof, self.span_from(start, start_col)));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            'A'..='Z' => self.scan_symbol(c),
            '0'..='9' | '.' => self.scan_amount(c, start, start_col)?,
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", c),
                    self.span_from(start, start_col),
                )
                .with_found(c.to_string()));
            }
        };

        Ok(Token::new(kind, self.span_from(start, start_col)))
    }

    fn scan_symbol(&mut self, first: char) -> TokenKind {
        let mut symbol = String::from(first);
        while let Some(c) = self.peek_char() {
            if c.is_ascii_lowercase() {
                symbol.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        TokenKind::Symbol(symbol)
    }

    fn scan_amount(
        &mut self,
        first: char,
        start: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut whole = String::new();
        let mut fraction = String::new();
        let mut seen_dot = first == '.';
        if !seen_dot {
            whole.push(first);
        }

        while let Some(c) = self.peek_char() {
            match c {
                '0'..='9' if seen_dot => fraction.push(c),
                '0'..='9' => whole.push(c),
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.next_char();
        }

        if seen_dot && fraction.is_empty() {
            return Err(ParseError::new(
                "malformed amount: expected digits after '.'",
                self.span_from(start, start_col),
            )
            .with_expected(vec!["digit".to_string()]));
        }

        let digits = format!("{}{}", whole, fraction);
        let numer: BigInt = digits.parse().map_err(|_| {
            ParseError::new(
                format!("malformed amount '{}'", digits),
                self.span_from(start, start_col),
            )
        })?;
        let denom = if fraction.is_empty() {
            BigInt::one()
        } else {
            num_traits::pow(BigInt::from(10), fraction.len())
        };
        Ok(TokenKind::Amount(BigRational::new(numer, denom)))
    }
}
