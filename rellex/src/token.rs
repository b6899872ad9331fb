//! Token vocabulary.
//!
//! [`TokenKind`] is the closed set of symbol classes seen by the grammar. Most classes come
//! straight out of the [`Lexer`](crate::Lexer). The compound classes at the end of the enum
//! (negated comparisons, multiplicity arrows, declaration quantifiers) are never produced by
//! the lexer; only the [`TokenFilter`](crate::TokenFilter) emits them.
use std::fmt;
use std::sync::Arc;

use relexpr::Pos;
use strum::{Display, EnumIs, EnumIter};

/// Symbol class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumIs, Display)]
pub enum TokenKind {
    // Punctuation
    #[strum(to_string = "(")]
    LParen,
    #[strum(to_string = ")")]
    RParen,
    #[strum(to_string = "[")]
    LBracket,
    #[strum(to_string = "]")]
    RBracket,
    #[strum(to_string = "{{")]
    LBrace,
    #[strum(to_string = "}}")]
    RBrace,
    #[strum(to_string = ",")]
    Comma,
    #[strum(to_string = ":")]
    Colon,
    #[strum(to_string = ".")]
    Dot,
    #[strum(to_string = "|")]
    Bar,
    #[strum(to_string = "@")]
    At,
    #[strum(to_string = "/")]
    Slash,

    // Operators
    #[strum(to_string = "!")]
    Not,
    #[strum(to_string = "=")]
    Equals,
    #[strum(to_string = "<")]
    Lt,
    #[strum(to_string = "<=")]
    Lte,
    #[strum(to_string = ">")]
    Gt,
    #[strum(to_string = ">=")]
    Gte,
    #[strum(to_string = "in")]
    In,
    #[strum(to_string = "->")]
    Arrow,
    #[strum(to_string = "&&")]
    And,
    #[strum(to_string = "||")]
    Or,
    #[strum(to_string = "<=>")]
    Iff,
    #[strum(to_string = "=>")]
    Implies,
    #[strum(to_string = "&")]
    Amp,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "++")]
    PlusPlus,
    #[strum(to_string = "<:")]
    DomainRestrict,
    #[strum(to_string = ":>")]
    RangeRestrict,
    #[strum(to_string = "#")]
    Hash,
    #[strum(to_string = "~")]
    Tilde,
    #[strum(to_string = "^")]
    Caret,
    #[strum(to_string = "*")]
    Star,
    #[strum(to_string = "%")]
    Percent,
    #[strum(to_string = "<<")]
    Shl,
    #[strum(to_string = ">>")]
    Sha,
    #[strum(to_string = ">>>")]
    Shr,

    // Keywords
    #[strum(to_string = "abstract")]
    Abstract,
    #[strum(to_string = "all")]
    All,
    #[strum(to_string = "as")]
    As,
    #[strum(to_string = "assert")]
    Assert,
    #[strum(to_string = "but")]
    But,
    #[strum(to_string = "check")]
    Check,
    #[strum(to_string = "disj")]
    Disj,
    #[strum(to_string = "else")]
    Else,
    #[strum(to_string = "enum")]
    Enum,
    #[strum(to_string = "exactly")]
    Exactly,
    #[strum(to_string = "exh")]
    Exh,
    #[strum(to_string = "expect")]
    Expect,
    #[strum(to_string = "extends")]
    Extends,
    #[strum(to_string = "fact")]
    Fact,
    #[strum(to_string = "for")]
    For,
    #[strum(to_string = "fun")]
    Fun,
    #[strum(to_string = "iden")]
    Iden,
    #[strum(to_string = "Int")]
    Int,
    #[strum(to_string = "int")]
    SigInt,
    #[strum(to_string = "let")]
    Let,
    #[strum(to_string = "lone")]
    Lone,
    #[strum(to_string = "module")]
    Module,
    #[strum(to_string = "no")]
    No,
    #[strum(to_string = "none")]
    None,
    #[strum(to_string = "one")]
    One,
    #[strum(to_string = "open")]
    Open,
    #[strum(to_string = "part")]
    Part,
    #[strum(to_string = "pred")]
    Pred,
    #[strum(to_string = "private")]
    Private,
    #[strum(to_string = "run")]
    Run,
    #[strum(to_string = "seq")]
    Seq,
    #[strum(to_string = "set")]
    Set,
    #[strum(to_string = "sig")]
    Sig,
    #[strum(to_string = "some")]
    Some,
    #[strum(to_string = "sum")]
    Sum,
    #[strum(to_string = "this")]
    This,
    #[strum(to_string = "univ")]
    Univ,

    // Literals
    #[strum(to_string = "identifier")]
    Id,
    #[strum(to_string = "number")]
    Number,
    #[strum(to_string = "string")]
    Str,

    /// End of input. Repeated forever once reached.
    #[strum(to_string = "end of file")]
    Eof,

    // Negated comparisons (filter only)
    #[strum(to_string = "!in")]
    NotIn,
    #[strum(to_string = "!=")]
    NotEquals,
    #[strum(to_string = "!<")]
    NotLt,
    #[strum(to_string = "!<=")]
    NotLte,
    #[strum(to_string = "!>")]
    NotGt,
    #[strum(to_string = "!>=")]
    NotGte,

    // Multiplicity arrows (filter only). The plain `->` is `Arrow` above.
    #[strum(to_string = "->lone")]
    AnyArrowLone,
    #[strum(to_string = "->one")]
    AnyArrowOne,
    #[strum(to_string = "->some")]
    AnyArrowSome,
    #[strum(to_string = "lone->")]
    LoneArrowAny,
    #[strum(to_string = "lone->lone")]
    LoneArrowLone,
    #[strum(to_string = "lone->one")]
    LoneArrowOne,
    #[strum(to_string = "lone->some")]
    LoneArrowSome,
    #[strum(to_string = "one->")]
    OneArrowAny,
    #[strum(to_string = "one->lone")]
    OneArrowLone,
    #[strum(to_string = "one->one")]
    OneArrowOne,
    #[strum(to_string = "one->some")]
    OneArrowSome,
    #[strum(to_string = "some->")]
    SomeArrowAny,
    #[strum(to_string = "some->lone")]
    SomeArrowLone,
    #[strum(to_string = "some->one")]
    SomeArrowOne,
    #[strum(to_string = "some->some")]
    SomeArrowSome,

    // Declaration quantifiers (filter only): `one x: X | ...` as opposed to `one X`.
    #[strum(to_string = "all (decl)")]
    All2,
    #[strum(to_string = "no (decl)")]
    No2,
    #[strum(to_string = "lone (decl)")]
    Lone2,
    #[strum(to_string = "one (decl)")]
    One2,
    #[strum(to_string = "some (decl)")]
    Some2,
    #[strum(to_string = "sum (decl)")]
    Sum2,
}

impl TokenKind {
    /// Map a word to its keyword class, if it is one.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Option::Some(match word {
            "abstract" => Abstract,
            "all" => All,
            "and" => And,
            "as" => As,
            "assert" => Assert,
            "but" => But,
            "check" => Check,
            "disj" => Disj,
            "else" => Else,
            "enum" => Enum,
            "exactly" => Exactly,
            "exh" => Exh,
            "expect" => Expect,
            "extends" => Extends,
            "fact" => Fact,
            "for" => For,
            "fun" => Fun,
            "iden" => Iden,
            "iff" => Iff,
            "implies" => Implies,
            "in" => In,
            "Int" => Int,
            "int" => SigInt,
            "let" => Let,
            "lone" => Lone,
            "module" => Module,
            "no" => No,
            "none" => None,
            "not" => Not,
            "one" => One,
            "open" => Open,
            "or" => Or,
            "part" => Part,
            "pred" => Pred,
            "private" => Private,
            "run" => Run,
            "seq" => Seq,
            "set" => Set,
            "sig" => Sig,
            "some" => Some,
            "sum" => Sum,
            "this" => This,
            "univ" => Univ,
            _ => return Option::None,
        })
    }

    /// The merged class for `!` followed by `self`, when `self` is one of the six
    /// negatable comparisons.
    pub fn negated(self) -> Option<TokenKind> {
        use TokenKind::*;
        match self {
            In => Option::Some(NotIn),
            Equals => Option::Some(NotEquals),
            Lt => Option::Some(NotLt),
            Lte => Option::Some(NotLte),
            Gt => Option::Some(NotGt),
            Gte => Option::Some(NotGte),
            _ => Option::None,
        }
    }

    /// The declaration-quantifier class paired with a quantifier keyword.
    pub fn decl_variant(self) -> Option<TokenKind> {
        use TokenKind::*;
        match self {
            All => Option::Some(All2),
            No => Option::Some(No2),
            Lone => Option::Some(Lone2),
            One => Option::Some(One2),
            Some => Option::Some(Some2),
            Sum => Option::Some(Sum2),
            _ => Option::None,
        }
    }

    /// `disj`, `part`, or `exh`, which may precede the names of a declaration.
    pub fn is_decl_modifier(self) -> bool {
        matches!(self, TokenKind::Disj | TokenKind::Part | TokenKind::Exh)
    }

    /// Keywords that start a `name: run ...` / `name: check ...` command header.
    pub fn is_directive(self) -> bool {
        matches!(self, TokenKind::Run | TokenKind::Check)
    }

    /// The sixteen product arrows, the plain `->` included.
    pub fn is_product_arrow(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Arrow
                | AnyArrowLone
                | AnyArrowOne
                | AnyArrowSome
                | LoneArrowAny
                | LoneArrowLone
                | LoneArrowOne
                | LoneArrowSome
                | OneArrowAny
                | OneArrowLone
                | OneArrowOne
                | OneArrowSome
                | SomeArrowAny
                | SomeArrowLone
                | SomeArrowOne
                | SomeArrowSome
        )
    }

    /// Classes that only the token filter produces.
    pub fn is_compound(self) -> bool {
        use TokenKind::*;
        (self.is_product_arrow() && self != Arrow)
            || matches!(
                self,
                NotIn | NotEquals | NotLt | NotLte | NotGt | NotGte
                    | All2 | No2 | Lone2 | One2 | Some2 | Sum2
            )
    }
}

/// A token: its class, where it came from, and the source text it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    pos: Pos,
    text: Arc<str>,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Pos, text: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            pos,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn pos(&self) -> &Pos {
        &self.pos
    }

    /// The source text, unchanged by any retagging.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Change the class, keeping position and text. Only the filter retags tokens.
    pub(crate) fn retag(mut self, kind: TokenKind) -> Self {
        self.kind = kind;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Id | TokenKind::Number | TokenKind::Str => {
                write!(f, "{} `{}` at {}", self.kind, self.text, self.pos)
            }
            kind => write!(f, "`{kind}` at {}", self.pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn keywords_map_back_to_their_display() {
        for kind in TokenKind::iter() {
            if let Some(k) = TokenKind::keyword(&kind.to_string()) {
                assert_eq!(k, kind);
            }
        }
        assert_eq!(TokenKind::keyword("and"), Some(TokenKind::And));
        assert_eq!(TokenKind::keyword("Person"), None);
    }

    #[test]
    fn compound_classes_are_never_keywords() {
        let compound: Vec<_> = TokenKind::iter().filter(|k| k.is_compound()).collect();
        assert_eq!(compound.len(), 6 + 15 + 6);
        for kind in compound {
            assert_eq!(TokenKind::keyword(&kind.to_string()), None);
        }
    }

    #[test]
    fn braces_display_literally() {
        assert_eq!(TokenKind::LBrace.to_string(), "{");
        assert_eq!(TokenKind::RBrace.to_string(), "}");
    }

    #[test]
    fn retag_keeps_payload() {
        let t = Token::new(TokenKind::Not, Pos::new("m.als", 2, 5), "not");
        let merged = t.clone().retag(TokenKind::NotIn);
        assert_eq!(merged.kind(), TokenKind::NotIn);
        assert_eq!(merged.pos(), t.pos());
        assert_eq!(merged.text(), "not");
    }
}
