//! Recursive-descent parser for formula strings.
//!
//! ```text
//! formula := group+
//! group   := (SYMBOL | '(' formula ')' | '[' formula ']') AMOUNT?
//! ```

use crate::lexer::{Lexer, Token, TokenKind};
use crate::{ParseError, ParseResult, Species};
use num_rational::BigRational;
use num_traits::One;

/// A species with the amount it contributes at one point in the formula.
/// The same species may appear in several terms.
pub(crate) type Term = (Species, BigRational);

/// Parser state.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from formula text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    /// Parse a complete formula into its terms, in source order.
    pub fn parse_formula(&mut self) -> ParseResult<Vec<Term>> {
        if self.check(&TokenKind::Eof) {
            return Err(ParseError::empty_formula(self.peek().span));
        }
        let terms = self.parse_sequence()?;
        self.expect(&TokenKind::Eof, "symbol or group")?;
        Ok(terms)
    }

    fn parse_sequence(&mut self) -> ParseResult<Vec<Term>> {
        let mut terms = Vec::new();
        loop {
            let token = self.peek().clone();
            match token.kind {
                TokenKind::Symbol(symbol) => {
                    self.advance();
                    let species = Species::from_symbol(&symbol)
                        .ok_or_else(|| ParseError::unknown_symbol(token.span, &symbol))?;
                    let amount = self.parse_amount();
                    terms.push((species, amount));
                }
                TokenKind::LParen => {
                    self.advance();
                    terms.extend(self.parse_group(&TokenKind::RParen, token)?);
                }
                TokenKind::LBracket => {
                    self.advance();
                    terms.extend(self.parse_group(&TokenKind::RBracket, token)?);
                }
                _ => break,
            }
        }
        Ok(terms)
    }

    fn parse_group(&mut self, close: &TokenKind, open: Token) -> ParseResult<Vec<Term>> {
        let inner = self.parse_sequence()?;
        if inner.is_empty() {
            return Err(ParseError::new(
                format!("empty group after '{}'", open.kind.name()),
                open.span,
            ));
        }
        if !self.check(close) {
            let found = self.peek();
            return Err(ParseError::new(
                format!("unbalanced '{}'", open.kind.name()),
                open.span,
            )
            .with_expected(vec![close.name().to_string()])
            .with_found(found.kind.name()));
        }
        self.advance();
        let multiplier = self.parse_amount();
        Ok(inner
            .into_iter()
            .map(|(species, amount)| (species, amount * &multiplier))
            .collect())
    }

    fn parse_amount(&mut self) -> BigRational {
        match &self.peek().kind {
            TokenKind::Amount(amount) => {
                let amount = amount.clone();
                self.advance();
                amount
            }
            _ => BigRational::one(),
        }
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize() always ends the stream with Eof and advance() never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                expected,
                token.kind.name(),
            ))
        }
    }
}
