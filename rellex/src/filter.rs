//! The token filter between the primitive lexer and the parser.
//!
//! The lexer cannot see far enough to produce three groups of tokens the grammar expects:
//! - negated comparisons: `!` `in` becomes a single [`TokenKind::NotIn`], and likewise for
//!   `=`, `<`, `<=`, `>`, `>=`;
//! - multiplicity arrows: `one` `->` `lone` becomes [`TokenKind::OneArrowLone`], for every
//!   combination of `lone`/`one`/`some` (or nothing) on either side;
//! - declaration quantifiers: `one x: X | ...` retags `one` as [`TokenKind::One2`], while
//!   `one X` (a multiplicity formula) and `f: one X` (a field bound) keep [`TokenKind::One`].
//!
//! It also rewrites the command header `name: run ...` into `run . name ...`.
//!
//! Tokens read ahead but not delivered sit in a pushback queue, front first, and are always
//! delivered later in their original order.
use std::collections::VecDeque;
use std::io::Read;

use log::trace;
use relexpr::Result;
use smallvec::SmallVec;

use crate::config::LexerConfig;
use crate::lexer::Lexer;
use crate::source::TokenSource;
use crate::token::{Token, TokenKind};

/// Compound arrow classes, indexed by left multiplicity (none, lone, one, some) and right
/// multiplicity (lone, one, some, unspecified).
const ARROWS: [[TokenKind; 4]; 4] = {
    use TokenKind::*;
    [
        [AnyArrowLone, AnyArrowOne, AnyArrowSome, Arrow],
        [LoneArrowLone, LoneArrowOne, LoneArrowSome, LoneArrowAny],
        [OneArrowLone, OneArrowOne, OneArrowSome, OneArrowAny],
        [SomeArrowLone, SomeArrowOne, SomeArrowSome, SomeArrowAny],
    ]
};

const ANY_ROW: usize = 0;

fn arrow_row(kind: TokenKind) -> Option<usize> {
    match kind {
        TokenKind::Lone => Some(1),
        TokenKind::One => Some(2),
        TokenKind::Some => Some(3),
        _ => None,
    }
}

fn arrow_column(kind: TokenKind) -> Option<usize> {
    match kind {
        TokenKind::Lone => Some(0),
        TokenKind::One => Some(1),
        TokenKind::Some => Some(2),
        TokenKind::Set => Some(3),
        _ => None,
    }
}

/// Rewrites a raw token stream into the stream the grammar expects.
///
/// Not reentrant: one consumer drives a filter at a time.
pub struct TokenFilter<S> {
    source: S,
    undo: VecDeque<Token>,
    last: Option<TokenKind>,
}

impl<R: Read> TokenFilter<Lexer<R>> {
    /// A filter over a fresh [`Lexer`] reading `reader`.
    pub fn from_reader(config: LexerConfig, reader: R) -> Self {
        Self::new(Lexer::new(config, reader))
    }
}

impl<S: TokenSource> TokenFilter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            undo: VecDeque::new(),
            last: None,
        }
    }

    /// Class of the most recently delivered token.
    pub fn last(&self) -> Option<TokenKind> {
        self.last
    }

    /// Number of tokens read ahead and not yet delivered.
    pub fn pending(&self) -> usize {
        self.undo.len()
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Iterate over delivered tokens up to, not including, end of input.
    ///
    /// The iterator stops after yielding the first error.
    pub fn tokens(&mut self) -> Tokens<'_, S> {
        Tokens {
            filter: self,
            done: false,
        }
    }

    fn read(&mut self) -> Result<Token> {
        match self.undo.pop_front() {
            Some(token) => Ok(token),
            None => self.source.next_token(),
        }
    }

    fn unread(&mut self, token: Token) {
        self.undo.push_front(token);
    }

    fn in_decl_colon(&self) -> bool {
        self.last == Some(TokenKind::Colon)
    }

    /// Deliver the next grammar token.
    ///
    /// # Errors
    /// Whatever the underlying source reports. Tokenization is over after an error.
    pub fn next_token(&mut self) -> Result<Token> {
        let token = self.resolve()?;
        self.last = Some(token.kind());
        Ok(token)
    }

    fn resolve(&mut self) -> Result<Token> {
        let a = self.read()?;
        match a.kind() {
            TokenKind::Id => self.command_header(a),
            TokenKind::Not => self.negation(a),
            TokenKind::Arrow => self.arrow(a, ANY_ROW),
            TokenKind::Set => {
                let b = self.read()?;
                if b.kind().is_arrow() {
                    return self.arrow(a, ANY_ROW);
                }
                self.unread(b);
                Ok(a)
            }
            kind @ (TokenKind::Lone | TokenKind::One | TokenKind::Some) => {
                let b = self.read()?;
                if b.kind().is_arrow() {
                    let row = arrow_row(kind).unwrap_or(ANY_ROW);
                    return self.arrow(a, row);
                }
                self.unread(b);
                if self.in_decl_colon() {
                    Ok(a)
                } else {
                    self.declaration(a)
                }
            }
            TokenKind::No | TokenKind::All | TokenKind::Sum if !self.in_decl_colon() => {
                self.declaration(a)
            }
            _ => Ok(a),
        }
    }

    // `name : run` / `name : check` becomes `run . name`.
    fn command_header(&mut self, a: Token) -> Result<Token> {
        let b = self.read()?;
        if b.kind().is_colon() {
            let c = self.read()?;
            if c.kind().is_directive() {
                trace!("command header `{}: {}` at {}", a.text(), c.kind(), a.pos());
                self.unread(a);
                self.unread(b.retag(TokenKind::Dot));
                return Ok(c);
            }
            self.unread(c);
        }
        self.unread(b);
        Ok(a)
    }

    fn negation(&mut self, a: Token) -> Result<Token> {
        let b = self.read()?;
        match b.kind().negated() {
            Some(merged) => {
                trace!("merged `{}` `{}` into {merged} at {}", a.text(), b.text(), a.pos());
                Ok(a.retag(merged))
            }
            None => {
                self.unread(b);
                Ok(a)
            }
        }
    }

    // `a` is the arrow itself, or the multiplicity keyword before it (already consumed).
    fn arrow(&mut self, a: Token, row: usize) -> Result<Token> {
        let b = self.read()?;
        let column = match arrow_column(b.kind()) {
            Some(column) => column,
            None => {
                self.unread(b);
                3
            }
        };
        let merged = ARROWS[row][column];
        trace!("merged arrow {merged} at {}", a.pos());
        Ok(a.retag(merged))
    }

    // Retag `a` as a declaration quantifier when it is followed by `[disj] x, y, ... :`.
    // Every token looked at is pushed back.
    fn declaration(&mut self, a: Token) -> Result<Token> {
        let is_decl = {
            let mut look = Lookahead::new(self);
            let mut b = look.next()?;
            if b.is_decl_modifier() {
                b = look.next()?;
            }
            let mut found_colon = false;
            if b.is_id() {
                loop {
                    match look.next()? {
                        TokenKind::Colon => {
                            found_colon = true;
                            break;
                        }
                        TokenKind::Comma => {}
                        _ => break,
                    }
                    if !look.next()?.is_id() {
                        break;
                    }
                }
            }
            found_colon
        };

        match a.kind().decl_variant() {
            Some(decl) if is_decl => {
                trace!("{} at {} starts a declaration", a.kind(), a.pos());
                Ok(a.retag(decl))
            }
            _ => Ok(a),
        }
    }
}

impl<S: TokenSource> TokenSource for TokenFilter<S> {
    fn next_token(&mut self) -> Result<Token> {
        TokenFilter::next_token(self)
    }
}

/// Reads ahead through a filter and puts everything back when dropped.
struct Lookahead<'f, S: TokenSource> {
    filter: &'f mut TokenFilter<S>,
    taken: SmallVec<[Token; 8]>,
}

impl<'f, S: TokenSource> Lookahead<'f, S> {
    fn new(filter: &'f mut TokenFilter<S>) -> Self {
        Self {
            filter,
            taken: SmallVec::new(),
        }
    }

    fn next(&mut self) -> Result<TokenKind> {
        let token = self.filter.read()?;
        let kind = token.kind();
        self.taken.push(token);
        Ok(kind)
    }
}

impl<S: TokenSource> Drop for Lookahead<'_, S> {
    fn drop(&mut self) {
        while let Some(token) = self.taken.pop() {
            self.filter.unread(token);
        }
    }
}

/// Iterator returned by [`TokenFilter::tokens`].
pub struct Tokens<'f, S> {
    filter: &'f mut TokenFilter<S>,
    done: bool,
}

impl<S: TokenSource> Iterator for Tokens<'_, S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.filter.next_token() {
            Ok(token) if token.kind().is_eof() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
