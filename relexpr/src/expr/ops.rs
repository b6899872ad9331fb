//! Operator vocabularies of the expression language.
use std::fmt;
use std::sync::Arc;

use strum::{Display, EnumIs, EnumIter};

/// Binary operators.
///
/// The sixteen arrow operators are the relational product `->` annotated with an optional
/// multiplicity on either side (`lone -> one`, `-> some`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumIs, Display)]
pub enum BinaryOp {
    // Multiplicity arrows
    #[strum(to_string = "->")]
    Arrow,
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

    // Relational operators
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "&")]
    Intersect,
    #[strum(to_string = "<:")]
    DomainRestrict,
    #[strum(to_string = ":>")]
    RangeRestrict,
    #[strum(to_string = "++")]
    Override,

    // Comparisons
    #[strum(to_string = "=")]
    Equals,
    #[strum(to_string = "!=")]
    NotEquals,
    #[strum(to_string = "in")]
    In,
    #[strum(to_string = "!in")]
    NotIn,
    #[strum(to_string = "<")]
    Lt,
    #[strum(to_string = "<=")]
    Lte,
    #[strum(to_string = ">")]
    Gt,
    #[strum(to_string = ">=")]
    Gte,
    #[strum(to_string = "!<")]
    NotLt,
    #[strum(to_string = "!<=")]
    NotLte,
    #[strum(to_string = "!>")]
    NotGt,
    #[strum(to_string = "!>=")]
    NotGte,

    // Logical connectives
    #[strum(to_string = "&&")]
    And,
    #[strum(to_string = "||")]
    Or,
    #[strum(to_string = "<=>")]
    Iff,
    #[strum(to_string = "=>")]
    Implies,

    // Integer arithmetic
    #[strum(to_string = "@+")]
    IPlus,
    #[strum(to_string = "@-")]
    IMinus,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "%")]
    Rem,
    #[strum(to_string = "<<")]
    Shl,
    #[strum(to_string = ">>")]
    Sha,
    #[strum(to_string = ">>>")]
    Shr,
}

impl BinaryOp {
    /// Any of the sixteen product arrows, including the plain `->`.
    pub fn is_product(self) -> bool {
        use BinaryOp::*;
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

    /// Product arrows that constrain multiplicity on at least one side.
    pub fn carries_multiplicity(self) -> bool {
        self.is_product() && self != BinaryOp::Arrow
    }

    pub fn is_comparison(self) -> bool {
        use BinaryOp::*;
        matches!(
            self,
            Equals | NotEquals | In | NotIn | Lt | Lte | Gt | Gte | NotLt | NotLte | NotGt | NotGte
        )
    }

    /// Operators whose right-nested chains read the same without parentheses.
    pub fn is_associative(self) -> bool {
        use BinaryOp::*;
        matches!(self, And | Or | Plus | Intersect | Override | Arrow | IPlus | Mul)
    }

    pub fn is_connective(self) -> bool {
        use BinaryOp::*;
        matches!(self, And | Or | Iff | Implies)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumIs, Display)]
pub enum UnaryOp {
    /// Transparent wrapper left behind by parentheses and desugaring.
    #[strum(to_string = "")]
    Noop,
    #[strum(to_string = "!")]
    Not,

    // Multiplicity formulas: `no X`, `some X`, ...
    #[strum(to_string = "no")]
    No,
    #[strum(to_string = "some")]
    Some,
    #[strum(to_string = "lone")]
    Lone,
    #[strum(to_string = "one")]
    One,

    // Multiplicity markers in declarations: `f: set X`, `f: one X`, ...
    #[strum(to_string = "set")]
    SetOf,
    #[strum(to_string = "some")]
    SomeOf,
    #[strum(to_string = "lone")]
    LoneOf,
    #[strum(to_string = "one")]
    OneOf,

    #[strum(to_string = "~")]
    Transpose,
    #[strum(to_string = "^")]
    Closure,
    #[strum(to_string = "*")]
    ReflexiveClosure,
    #[strum(to_string = "#")]
    Cardinality,
    #[strum(to_string = "Int")]
    CastToInt,
    #[strum(to_string = "int")]
    CastToSigint,
}

impl UnaryOp {
    /// Operators that turn their operand into a multiplicity constraint `(? X)`.
    pub fn is_multiplicity_marker(self) -> bool {
        matches!(
            self,
            UnaryOp::SetOf | UnaryOp::SomeOf | UnaryOp::LoneOf | UnaryOp::OneOf
        )
    }
}

/// Quantifiers and set comprehension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumIs, Display)]
pub enum QuantOp {
    #[strum(to_string = "all")]
    All,
    #[strum(to_string = "no")]
    No,
    #[strum(to_string = "lone")]
    Lone,
    #[strum(to_string = "one")]
    One,
    #[strum(to_string = "some")]
    Some,
    #[strum(to_string = "sum")]
    Sum,
    #[strum(to_string = "comprehension")]
    Comprehension,
}

/// Builtin predicates that are not ordinary function calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumIs, Display)]
pub enum BuiltinOp {
    #[strum(to_string = "disj")]
    Disjoint,
    #[strum(to_string = "totalOrder")]
    TotalOrder,
}

/// Constant leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
pub enum Constant {
    /// The universal set.
    Univ,
    /// The identity relation.
    Iden,
    /// The empty set.
    None,
    True,
    False,
    /// Smallest integer in scope.
    Min,
    /// Largest integer in scope.
    Max,
    /// Successor relation over integers.
    Next,
    Number(i32),
    Str(Arc<str>),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Univ => f.write_str("univ"),
            Constant::Iden => f.write_str("iden"),
            Constant::None => f.write_str("none"),
            Constant::True => f.write_str("true"),
            Constant::False => f.write_str("false"),
            Constant::Min => f.write_str("min"),
            Constant::Max => f.write_str("max"),
            Constant::Next => f.write_str("next"),
            Constant::Number(n) => write!(f, "{n}"),
            Constant::Str(s) => write!(f, "{s:?}"),
        }
    }
}
