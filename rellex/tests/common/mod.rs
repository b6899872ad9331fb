#![allow(dead_code)]

use std::io::{self, Read};

use relexpr::{Error, Pos, Result};
use rellex::{LexerConfig, Token, TokenFilter, TokenKind, TokenSource};

/// Run `src` through the lexer and the filter, collecting every delivered token.
pub fn deliver(src: &str) -> Vec<Token> {
    TokenFilter::from_reader(LexerConfig::new("model.als"), src.as_bytes())
        .tokens()
        .collect::<Result<Vec<_>>>()
        .unwrap()
}

pub fn kinds(src: &str) -> Vec<TokenKind> {
    deliver(src).iter().map(Token::kind).collect()
}

/// A reader whose every read fails.
pub struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
    }
}

/// Hands out `tokens`, then fails.
pub struct FailingSource {
    pub tokens: Vec<Token>,
}

impl TokenSource for FailingSource {
    fn next_token(&mut self) -> Result<Token> {
        if self.tokens.is_empty() {
            Err(Error::syntax(Pos::new("model.als", 9, 9), "source exhausted"))
        } else {
            Ok(self.tokens.remove(0))
        }
    }
}

pub fn tok(kind: TokenKind, column: u32) -> Token {
    Token::new(kind, Pos::new("model.als", 1, column), kind.to_string())
}
