//! Typing rules behind the typed builders.
//!
//! Each rule is a pure function from operand types to the result type. The builders in
//! [`super::builders`] run the rule first and only construct a node when it succeeds, so a
//! rule violation is always reported before anything is built.
use thiserror::Error;

use crate::types::Type;

/// Why a typing rule rejected its operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypingFault {
    #[error("operands have arities {left} and {right}, expected equal positive arities")]
    ArityMismatch { left: usize, right: usize },

    #[error("operand is not a formula")]
    NotFormula,

    #[error("the joined type has arity 0")]
    EmptyJoin,

    #[error("the product type has arity 0")]
    EmptyProduct,
}

/// `left in right`: equal, positive arities; the result is a formula.
pub fn rule_in(left: &Type, right: &Type) -> Result<Type, TypingFault> {
    let (l, r) = (left.arity(), right.arity());
    if l > 0 && l == r {
        Ok(Type::formula())
    } else {
        Err(TypingFault::ArityMismatch { left: l, right: r })
    }
}

/// `!sub`: the operand must be a formula.
pub fn rule_not(sub: &Type) -> Result<Type, TypingFault> {
    if sub.is_formula() {
        Ok(Type::formula())
    } else {
        Err(TypingFault::NotFormula)
    }
}

/// `left && right`: both operands must be formulas.
pub fn rule_and(left: &Type, right: &Type) -> Result<Type, TypingFault> {
    if left.is_formula() && right.is_formula() {
        Ok(Type::formula())
    } else {
        Err(TypingFault::NotFormula)
    }
}

/// `left.right`: the joined type must keep at least one column.
pub fn rule_join(left: &Type, right: &Type) -> Result<Type, TypingFault> {
    let joined = left.join(right);
    if joined.arity() >= 1 {
        Ok(joined)
    } else {
        Err(TypingFault::EmptyJoin)
    }
}

/// `left -> right`: the product type must keep at least one column.
pub fn rule_product(left: &Type, right: &Type) -> Result<Type, TypingFault> {
    let product = left.product(right);
    if product.arity() >= 1 {
        Ok(product)
    } else {
        Err(TypingFault::EmptyProduct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_requires_matching_arity() {
        let set = Type::relation(["A"]);
        let rel = Type::relation(["A", "B"]);
        assert_eq!(rule_in(&set, &set), Ok(Type::formula()));
        assert_eq!(
            rule_in(&set, &rel),
            Err(TypingFault::ArityMismatch { left: 1, right: 2 })
        );
        assert!(rule_in(&Type::formula(), &Type::formula()).is_err());
    }

    #[test]
    fn connectives_require_formulas() {
        let f = Type::formula();
        let set = Type::relation(["A"]);
        assert!(rule_not(&f).is_ok());
        assert_eq!(rule_not(&set), Err(TypingFault::NotFormula));
        assert!(rule_and(&f, &f).is_ok());
        assert_eq!(rule_and(&f, &set), Err(TypingFault::NotFormula));
    }

    #[test]
    fn product_with_empty_side_is_rejected() {
        let set = Type::relation(["A"]);
        assert_eq!(rule_product(&set, &Type::empty()), Err(TypingFault::EmptyProduct));
        assert_eq!(rule_product(&set, &set).map(|t| t.arity()), Ok(2));
    }
}
