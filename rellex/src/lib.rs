//! Rellex: tokens for a relational-logic modelling language.
//!
//! Two stages sit in front of the parser:
//! 1) [`Lexer`], a chumsky-based primitive lexer that turns characters into [`Token`]s;
//! 2) [`TokenFilter`], which merges and reinterprets tokens the lexer cannot classify on its
//!    own (negated comparisons, multiplicity arrows, declaration quantifiers, command
//!    headers).
//!
//! Both stages implement [`TokenSource`], so filters can be driven by any token stream,
//! including a [`ReplaySource`] of hand-built tokens.
//!
//! Example
//! ```
//! use rellex::{LexerConfig, TokenFilter, TokenKind};
//!
//! let src = "all x: Person | x.owns !in Car";
//! let mut filter = TokenFilter::from_reader(LexerConfig::new("model.als"), src.as_bytes());
//! let kinds: Vec<TokenKind> = filter.tokens().map(|t| t.unwrap().kind()).collect();
//! assert_eq!(kinds[0], TokenKind::All2);
//! assert!(kinds.contains(&TokenKind::NotIn));
//! ```

/// Lexer settings.
pub mod config;
/// Token filter between the lexer and the parser.
pub mod filter;
/// Primitive lexer.
pub mod lexer;
/// Token stream abstraction.
pub mod source;
/// Token vocabulary.
pub mod token;

pub use config::LexerConfig;
pub use filter::{TokenFilter, Tokens};
pub use lexer::Lexer;
pub use source::{ReplaySource, TokenSource};
pub use token::{Token, TokenKind};
