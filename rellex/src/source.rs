//! Where the filter gets its tokens from.
use std::collections::VecDeque;

use relexpr::{Pos, Result};

use crate::token::{Token, TokenKind};

/// A stream of raw tokens.
///
/// Implementations return [`TokenKind::Eof`] forever once the input is exhausted, and report
/// read failures as errors. The stream is driven by a single consumer.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Result<Token> {
        (**self).next_token()
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn next_token(&mut self) -> Result<Token> {
        (**self).next_token()
    }
}

/// Replays a fixed list of tokens, then `Eof` positioned at the last token.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    tokens: VecDeque<Token>,
    eof: Option<Pos>,
}

impl ReplaySource {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        let tokens: VecDeque<Token> = tokens.into_iter().collect();
        let eof = tokens.back().map(|t| t.pos().clone());
        Self { tokens, eof }
    }

    /// Tokens not yet handed out.
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl From<Vec<Token>> for ReplaySource {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<Token> for ReplaySource {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl TokenSource for ReplaySource {
    fn next_token(&mut self) -> Result<Token> {
        Ok(self.tokens.pop_front().unwrap_or_else(|| {
            let pos = self.eof.clone().unwrap_or_else(Pos::unknown);
            Token::new(TokenKind::Eof, pos, "")
        }))
    }
}
