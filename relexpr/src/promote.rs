//! Conjunction promotion.
//!
//! Rewrites a typed formula so that as many conjuncts as possible become direct operands of
//! top-level `&&` nodes. The boolean encoder then produces one clause group per conjunct,
//! which lets an unsatisfiable core point at individual source-level conjuncts.
//!
//! The rewrite only walks boolean connective structure:
//! - `l && r` promotes both sides and rebuilds the conjunction;
//! - `all x: X | l && r` becomes `(all x: X | l) && (all x: X | r)`;
//! - `!(l || r)` becomes `!l && !r`;
//! - parentheses are transparent.
//!
//! Everything else is returned as is, without descending into it.
use log::trace;

use crate::error::Result;
use crate::expr::ops::{BinaryOp, QuantOp, UnaryOp};
use crate::expr::{BoundVar, Expr, ExprKind};

/// Promote conjunctions in `expr` as far up as possible.
///
/// The input is never modified. Nodes that are not rewritten are cloned.
///
/// # Errors
/// Propagates [`Error::Internal`](crate::Error::Internal) from the `and`/`not` builders when
/// the tree reaching a rewritten position is untyped or not a formula.
pub fn promote(expr: &Expr) -> Result<Expr> {
    match expr.kind() {
        ExprKind::Binary {
            op: BinaryOp::And,
            left,
            right,
        } => promote(left)?.and(promote(right)?),

        ExprKind::Quant {
            op: QuantOp::All,
            vars,
            body,
        } => match body.deparen().kind() {
            ExprKind::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                trace!("distributing `all` over `&&` at {}", expr.pos());
                let l = promote(&forall_like(expr, vars, left))?;
                let r = promote(&forall_like(expr, vars, right))?;
                l.and(r)
            }
            _ => Ok(expr.clone()),
        },

        ExprKind::Unary {
            op: UnaryOp::Noop,
            sub,
        } => promote(sub),

        ExprKind::Unary {
            op: UnaryOp::Not,
            sub,
        } => match sub.deparen().kind() {
            ExprKind::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                trace!("applying De Morgan at {}", expr.pos());
                let l = promote(&(**left).clone().not()?)?;
                let r = promote(&(**right).clone().not()?)?;
                l.and(r)
            }
            _ => Ok(expr.clone()),
        },

        _ => Ok(expr.clone()),
    }
}

// `all vars | body`, reusing the position and type of `quant`.
fn forall_like(quant: &Expr, vars: &[BoundVar], body: &Expr) -> Expr {
    Expr::make_typed(
        quant.pos().clone(),
        quant.ty().cloned(),
        ExprKind::Quant {
            op: QuantOp::All,
            vars: vars.to_vec(),
            body: Box::new(body.clone()),
        },
    )
}

/// The operands of the top-level conjunction of `expr`, left to right.
///
/// Parentheses are looked through. A formula that is not a conjunction is its own single
/// conjunct.
pub fn conjuncts(expr: &Expr) -> Vec<&Expr> {
    let mut out = Vec::new();
    let mut stack = vec![expr];
    while let Some(e) = stack.pop() {
        match e.deparen().kind() {
            ExprKind::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                stack.push(right);
                stack.push(left);
            }
            _ => out.push(e.deparen()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ops::Constant;
    use crate::pos::Pos;
    use crate::types::Type;

    fn formula(c: Constant) -> Expr {
        Expr::constant(Pos::unknown(), c)
            .with_type(Type::formula())
            .unwrap()
    }

    #[test]
    fn leaves_are_returned_unchanged() {
        let t = formula(Constant::True);
        assert_eq!(promote(&t).unwrap(), t);
    }

    #[test]
    fn conjuncts_of_a_single_formula() {
        let t = formula(Constant::True);
        assert_eq!(conjuncts(&t), vec![&t]);
    }

    #[test]
    fn untyped_or_under_not_is_an_internal_error() {
        let p = Pos::unknown();
        let or = Expr::binary(
            p.clone(),
            BinaryOp::Or,
            Expr::constant(p.clone(), Constant::True),
            Expr::constant(p.clone(), Constant::False),
        );
        let neg = Expr::unary(p, UnaryOp::Not, or);
        assert!(promote(&neg).unwrap_err().is_internal());
    }
}
