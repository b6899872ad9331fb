//! Primitive lexer built with chumsky.
//!
//! The lexer turns characters into [`Token`]s and nothing more: `!` followed by `in` is two
//! tokens, `one` is always [`TokenKind::One`], and `->` is always [`TokenKind::Arrow`].
//! Merging and reinterpretation are the [`TokenFilter`](crate::TokenFilter)'s job.
//!
//! Input is read in full on the first call to [`TokenSource::next_token`]. A read failure
//! or an unrecognized character is reported from that call and from every later one.
use std::collections::VecDeque;
use std::io::Read;
use std::sync::Arc;

use chumsky::prelude::*;
use log::debug;
use relexpr::{Error, Pos, Result};

use crate::config::LexerConfig;
use crate::source::TokenSource;
use crate::token::{Token, TokenKind};

type Spanned<T> = (T, SimpleSpan);

fn lexer<'src>(
    allow_dollar: bool,
) -> impl Parser<'src, &'src str, Vec<Spanned<TokenKind>>, extra::Err<Rich<'src, char>>> {
    use TokenKind as T;

    // Multi-char operators first to avoid prefix capture
    let symbol = choice((
        just("<=>").to(T::Iff),
        just(">>>").to(T::Shr),
        just("=>").to(T::Implies),
        just("->").to(T::Arrow),
        just("<=").to(T::Lte),
        just("=<").to(T::Lte),
        just(">=").to(T::Gte),
        just("<:").to(T::DomainRestrict),
        just(":>").to(T::RangeRestrict),
        just("<<").to(T::Shl),
        just(">>").to(T::Sha),
        just("++").to(T::PlusPlus),
        just("&&").to(T::And),
        just("||").to(T::Or),
    ));

    let delimiter = choice((
        just('(').to(T::LParen),
        just(')').to(T::RParen),
        just('[').to(T::LBracket),
        just(']').to(T::RBracket),
        just('{').to(T::LBrace),
        just('}').to(T::RBrace),
        just(',').to(T::Comma),
        just(':').to(T::Colon),
        just('.').to(T::Dot),
        just('|').to(T::Bar),
        just('@').to(T::At),
        just('/').to(T::Slash),
    ));

    let operator = choice((
        just('!').to(T::Not),
        just('=').to(T::Equals),
        just('<').to(T::Lt),
        just('>').to(T::Gt),
        just('&').to(T::Amp),
        just('+').to(T::Plus),
        just('-').to(T::Minus),
        just('#').to(T::Hash),
        just('~').to(T::Tilde),
        just('^').to(T::Caret),
        just('*').to(T::Star),
        just('%').to(T::Percent),
    ));

    // Keywords and identifiers
    let word = any()
        .filter(|c: &char| c.is_alphabetic())
        .then(
            any()
                .filter(move |c: &char| {
                    c.is_alphanumeric() || *c == '_' || *c == '\'' || (allow_dollar && *c == '$')
                })
                .repeated(),
        )
        .to_slice()
        .map(|s: &str| TokenKind::keyword(s).unwrap_or(T::Id));

    let number = text::digits(10).to(T::Number);

    let string = just('"')
        .then(
            just('\\')
                .then(any())
                .ignored()
                .or(none_of("\\\"\n").ignored())
                .repeated(),
        )
        .then(just('"'))
        .to(T::Str);

    let token = choice((symbol, word, number, string, delimiter, operator));

    let whitespace = any()
        .filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .ignored();
    let line_comment = just("//")
        .or(just("--"))
        .then(any().and_is(just('\n').not()).repeated())
        .ignored();
    let block_comment = just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored();
    let skip = choice((whitespace, line_comment, block_comment)).repeated();

    skip.clone()
        .ignore_then(
            token
                .map_with(|tok, e| (tok, e.span()))
                .then_ignore(skip)
                .repeated()
                .collect(),
        )
        .then_ignore(end())
}

/// Maps byte offsets of the source to line/column positions.
struct LineIndex<'s> {
    src: &'s str,
    starts: Vec<usize>,
    filename: Arc<str>,
    line_offset: u32,
}

impl<'s> LineIndex<'s> {
    fn new(src: &'s str, config: &LexerConfig) -> Self {
        let starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            src,
            starts,
            filename: config.filename.as_str().into(),
            line_offset: config.line_offset,
        }
    }

    fn locate(&self, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        let column = self.src[self.starts[line]..offset].chars().count() + 1;
        (
            (line as u32 + 1).saturating_add(self.line_offset),
            column as u32,
        )
    }

    fn span(&self, start: usize, end: usize) -> Pos {
        let (line, column) = self.locate(start);
        let width = self.src[start..end].chars().count().max(1) as u32;
        Pos::span(self.filename.clone(), line, column, line, column + width - 1)
    }
}

/// Chumsky-based primitive lexer over any [`Read`]er.
pub struct Lexer<R> {
    config: LexerConfig,
    reader: Option<R>,
    tokens: VecDeque<Token>,
    eof: Pos,
    failure: Option<Error>,
}

impl<R: Read> Lexer<R> {
    pub fn new(config: LexerConfig, reader: R) -> Self {
        let eof = config.start_pos();
        Self {
            config,
            reader: Some(reader),
            tokens: VecDeque::new(),
            eof,
            failure: None,
        }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    fn fill(&mut self, mut reader: R) -> Result<()> {
        let mut src = String::new();
        reader.read_to_string(&mut src).map_err(|e| {
            Error::syntax(self.config.start_pos(), format!("IO error: {e}"))
        })?;

        let lines = LineIndex::new(&src, &self.config);
        let (tokens, errors) = lexer(self.config.allow_dollar)
            .parse(src.as_str())
            .into_output_errors();
        if let Some(err) = errors.into_iter().next() {
            let span = err.span();
            return Err(Error::syntax(
                lines.span(span.start, span.start),
                format!("lexing error: {err}"),
            ));
        }

        self.tokens = tokens
            .unwrap_or_default()
            .into_iter()
            .map(|(kind, span)| {
                Token::new(kind, lines.span(span.start, span.end), &src[span.start..span.end])
            })
            .collect();
        self.eof = lines.span(src.len(), src.len());
        debug!(
            "lexed {} tokens from {:?}",
            self.tokens.len(),
            self.config.filename
        );
        Ok(())
    }
}

impl<R: Read> TokenSource for Lexer<R> {
    fn next_token(&mut self) -> Result<Token> {
        if let Some(reader) = self.reader.take() {
            if let Err(err) = self.fill(reader) {
                self.failure = Some(err);
            }
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self
            .tokens
            .pop_front()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, self.eof.clone(), "")))
    }
}
